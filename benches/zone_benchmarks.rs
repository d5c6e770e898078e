use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fivezone::dashboard::{Dashboard, DashboardSettings};
use fivezone::import::CsvLogImporter;
use fivezone::models::{ActivityType, WorkoutLog, ZoneMinutes};
use fivezone::{all_zone_ranges, classify_zone, estimate_max_heart_rate, ZoneAnalyzer};
use uuid::Uuid;

/// Benchmarks for the zone model and the aggregation built on it
///
/// Sample counts mirror second-by-second heart rate recordings from
/// a short run up to a long ride.

fn bench_zone_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("Zone Math");

    group.bench_function("estimate_max_heart_rate", |b| {
        b.iter(|| {
            for age in 10u8..=100 {
                black_box(estimate_max_heart_rate(black_box(age)));
            }
        });
    });

    group.bench_function("all_zone_ranges", |b| {
        b.iter(|| all_zone_ranges(black_box(185)));
    });

    group.bench_function("classify_zone", |b| {
        b.iter(|| classify_zone(black_box(145.0), black_box(185.0)));
    });

    group.finish();
}

fn bench_sample_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sample Analysis");

    for &size in &[600usize, 3600, 14400] {
        let samples = create_heart_rate_samples(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("zone_analysis", size), &samples, |b, samples| {
            b.iter(|| ZoneAnalyzer::analyze(samples, 185));
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dashboard");
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default();

    for &days in &[30i64, 365, 1825] {
        let logs = create_log_history(today, days);

        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("build", days), &logs, |b, logs| {
            b.iter(|| Dashboard::build(185, &[], &[], logs, today, &DashboardSettings::default()));
        });
    }

    group.finish();
}

fn bench_csv_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("CSV Import");
    let importer = CsvLogImporter::new();

    for &rows in &[100usize, 1000] {
        let mut csv = String::from("date,activity,duration,avg_hr,zone1,zone2,zone3,zone4,zone5\n");
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
        for day in 0..rows {
            let date = start + Duration::days(day as i64);
            csv.push_str(&format!("{},run,60,140,10,30,15,5,0\n", date));
        }

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("parse", rows), &csv, |b, csv| {
            b.iter(|| importer.parse(csv));
        });
    }

    group.finish();
}

fn create_heart_rate_samples(size: usize) -> Vec<u16> {
    (0..size)
        .map(|second| 90 + ((second * 7) % 100) as u16)
        .collect()
}

fn create_log_history(today: NaiveDate, days: i64) -> Vec<WorkoutLog> {
    (0..days)
        .map(|offset| WorkoutLog {
            id: Uuid::new_v4(),
            date: today - Duration::days(offset),
            activity_type: ActivityType::Run,
            duration_minutes: 60,
            average_heart_rate: Some(140),
            max_heart_rate: Some(170),
            zone_minutes: ZoneMinutes::from_array([10, 30, 15, 5, 0]),
            notes: None,
        })
        .collect()
}

criterion_group!(
    benches,
    bench_zone_math,
    bench_sample_analysis,
    bench_dashboard,
    bench_csv_import
);
criterion_main!(benches);
