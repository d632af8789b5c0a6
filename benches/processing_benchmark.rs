use chrono::NaiveDate;
use covid_rate::models::{RawRow, SourceFile};
use covid_rate::processors::SeriesMerger;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CANTONS: [&str; 27] = [
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW",
    "SG", "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH", "FL",
];

// Each canton reports on most days, skipping every `gap`-th day to exercise forward-fill.
fn create_sources(days: usize, gap: usize) -> Vec<SourceFile> {
    let base_date = NaiveDate::from_ymd_opt(2020, 2, 25).unwrap();

    CANTONS
        .iter()
        .enumerate()
        .map(|(canton_index, canton)| {
            let mut cumulative = 0u64;
            let rows = (0..days)
                .filter(|day| (day + canton_index) % gap != 0)
                .enumerate()
                .map(|(row_index, day)| {
                    cumulative += (day as u64 % 17) + canton_index as u64;
                    let date = base_date + chrono::Duration::days(day as i64);
                    RawRow::new(
                        row_index + 2,
                        format!("{},12:00,{},,{},,,,,,", date, canton, cumulative),
                    )
                })
                .collect();
            SourceFile::new(format!("COVID19_Fallzahlen_Kanton_{}_CH_total.csv", canton), rows)
        })
        .collect()
}

fn benchmark_ingest(c: &mut Criterion) {
    let sources = create_sources(120, 5);
    let merger = SeriesMerger::new();

    c.bench_function("ingest_120_days", |b| {
        b.iter(|| merger.ingest(black_box(&sources)).unwrap());
    });
}

fn benchmark_national_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("national_series");
    let merger = SeriesMerger::new();

    for days in [30, 180, 720] {
        let data = merger.ingest(&create_sources(days, 4)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(days), &data, |b, data| {
            b.iter(|| {
                let national = merger
                    .compute_national_series(black_box(&data.regions), black_box(&data.dates))
                    .unwrap();
                merger.compute_increments(&national).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_report_counts(c: &mut Criterion) {
    let merger = SeriesMerger::new();
    let data = merger.ingest(&create_sources(365, 3)).unwrap();

    c.bench_function("report_counts_365_days", |b| {
        b.iter(|| merger.compute_report_counts(black_box(&data.dates), black_box(&data.regions)));
    });
}

criterion_group!(
    benches,
    benchmark_ingest,
    benchmark_national_series,
    benchmark_report_counts
);
criterion_main!(benches);
