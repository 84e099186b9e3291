//! Criterion benchmarks for the strategy hot path.
//!
//! Benchmarks:
//! 1. Full bar replay through the driver (pipeline + scoring + lifecycle)
//! 2. Indicator pipeline updates in isolation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use launchlab_core::domain::{Bar, TradingCalendar};
use launchlab_core::events::{EventCatalog, LaunchEvent, LaunchOutcome};
use launchlab_core::indicators::IndicatorPipeline;
use launchlab_core::strategy::{StrategyDriver, StrategyParams};

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 20.0 + (i as f64 * 0.1).sin() * 2.0;
            Bar {
                symbol: "BENCH".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.1,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1_000_000,
            }
        })
        .collect()
}

fn make_launches(bars: &[Bar]) -> Vec<LaunchEvent> {
    bars.iter()
        .enumerate()
        .filter(|(i, _)| i % 11 == 5)
        .map(|(i, b)| LaunchEvent {
            date: b.date,
            mission: format!("Flight {i}"),
            outcome: if i % 22 == 5 {
                LaunchOutcome::Success
            } else {
                LaunchOutcome::Scheduled
            },
        })
        .collect()
}

fn bench_full_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_replay");
    for n in [1_000usize, 5_000] {
        let bars = make_bars(n);
        let launches = make_launches(&bars);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| {
                let calendar = TradingCalendar::from_dates(bars.iter().map(|bar| bar.date));
                let catalog = EventCatalog::new(launches.clone());
                let mut driver =
                    StrategyDriver::new(StrategyParams::default(), catalog, calendar).unwrap();
                let mut intents = 0usize;
                for bar in bars {
                    if driver.on_bar(black_box(bar)).unwrap().is_some() {
                        intents += 1;
                    }
                }
                black_box(intents)
            });
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let bars = make_bars(5_000);
    c.bench_function("pipeline_5000_bars", |b| {
        b.iter(|| {
            let mut pipeline = IndicatorPipeline::new(&StrategyParams::default());
            let mut valid = 0usize;
            for bar in &bars {
                if pipeline.update(black_box(bar)).is_some() {
                    valid += 1;
                }
            }
            black_box(valid)
        });
    });
}

criterion_group!(benches, bench_full_replay, bench_pipeline);
criterion_main!(benches);
