//! Benchmark tests for gesture expansion and validation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tactus_core::{
    EventDispatcher, FlickDirection, GestureKinematics, Offset, PointerStateTable, ScreenPoint,
    ThreadPacer, TimingConfig,
};

fn bench_scroll_expand(c: &mut Criterion) {
    let kin = GestureKinematics::new(TimingConfig::default());
    let from = ScreenPoint::new(540, 1500);

    c.bench_function("scroll_expand_1000px", |b| {
        b.iter(|| kin.scroll(black_box(from), black_box(Offset::new(0, -1000))))
    });
}

fn bench_flick_expand(c: &mut Criterion) {
    let kin = GestureKinematics::new(TimingConfig::default());
    let from = ScreenPoint::new(540, 960);

    c.bench_function("flick_velocity_expand", |b| {
        b.iter(|| kin.flick_velocity(black_box(from), black_box(2000), black_box(-3000)))
    });

    c.bench_function("directional_flick_expand", |b| {
        b.iter(|| {
            kin.directional_flick(
                black_box(from),
                FlickDirection::UpLeft,
                black_box(800),
                std::time::Duration::from_millis(300),
            )
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let kin = GestureKinematics::new(TimingConfig::default());
    let events = kin.scroll(ScreenPoint::new(540, 1500), Offset::new(0, -1000));
    let table = PointerStateTable::new();

    c.bench_function("validate_scroll_sequence", |b| {
        b.iter(|| {
            EventDispatcher::<Box<dyn tactus_core::DeviceSink>, ThreadPacer>::validate(
                black_box(&table),
                black_box(&events),
            )
        })
    });
}

criterion_group!(benches, bench_scroll_expand, bench_flick_expand, bench_validate);
criterion_main!(benches);
