use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use daybook::calendar::{
    window_for, CalendarEngine, DayGenerator, DayStore, EngineConfig, GridLayout, ScrollMetrics,
};
use daybook::config::Config;
use daybook::tui::action::Action;
use daybook::tui::reducer::reduce;
use daybook::tui::state::AppState;
use std::time::Instant;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Benchmark window measurement over a large store
fn bench_window(c: &mut Criterion) {
    let generator = DayGenerator::new(today());
    let start = NaiveDate::from_ymd_opt(2014, 1, 5).unwrap();
    let days = generator.generate(start, 20 * 365);
    let layout = GridLayout {
        row_height: 100,
        buffer_rows: 20,
        edge_threshold: 200,
    };

    let mut group = c.benchmark_group("window");

    group.bench_function("window_for_middle", |b| {
        let metrics = ScrollMetrics::new(52_000, 800);
        b.iter(|| window_for(black_box(metrics), black_box(&layout), black_box(&days)))
    });

    group.finish();
}

/// Benchmark merging runs into the day store
fn bench_store(c: &mut Criterion) {
    let generator = DayGenerator::new(today());
    let base = generator.generate(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(), 365);
    let before = generator.generate(NaiveDate::from_ymd_opt(2023, 7, 9).unwrap(), 182);

    let mut group = c.benchmark_group("store");

    group.bench_function("merge_prepend_run", |b| {
        b.iter(|| {
            let mut store = DayStore::new();
            store.merge(base.iter().copied());
            store.merge(black_box(before.iter().copied()))
        })
    });

    group.bench_function("merge_overlapping_run", |b| {
        b.iter(|| {
            let mut store = DayStore::new();
            store.merge(base.iter().copied());
            store.merge(black_box(base[100..200].iter().copied()))
        })
    });

    group.finish();
}

/// Benchmark jumps that must generate days around the target
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    group.bench_function("scroll_to_date_ten_years", |b| {
        b.iter(|| {
            let mut engine = CalendarEngine::new(today(), EngineConfig::default());
            let metrics = ScrollMetrics::new(0, 800);
            engine.initialize(metrics);
            let target = NaiveDate::from_ymd_opt(2034, 6, 15).unwrap();
            engine.scroll_to_date(black_box(target), metrics, Instant::now())
        })
    });

    group.finish();
}

/// Benchmark reducer dispatch for scroll input
fn bench_reducer_dispatch(c: &mut Criterion) {
    let state = AppState::new(today(), Config::default());
    let (state, _effect) = reduce(state, Action::Resize(40));

    let mut group = c.benchmark_group("reducer");

    group.bench_function("scroll_by_row", |b| {
        b.iter(|| {
            let (new_state, _effect) = reduce(black_box(state.clone()), black_box(Action::ScrollBy(4)));
            new_state
        })
    });

    group.bench_function("move_selection_week", |b| {
        b.iter(|| {
            let (new_state, _effect) =
                reduce(black_box(state.clone()), black_box(Action::MoveSelection(7)));
            new_state
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_window,
    bench_store,
    bench_engine,
    bench_reducer_dispatch
);
criterion_main!(benches);
