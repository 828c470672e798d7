use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use track_geotagger::track::RawTrackRecord;
use track_geotagger::{TimeOffset, TrackStore};

/// A day-long track with one point every two seconds, written out of order
/// across two files and with every hundredth timestamp duplicated.
fn synthetic_records(count: usize) -> Vec<RawTrackRecord> {
    let start = DateTime::from_timestamp(1_625_900_000, 0).unwrap_or_default();
    (0..count)
        .map(|i| {
            let step = if i % 100 == 99 { i - 1 } else { i };
            let time = start + TimeDelta::seconds(2 * step as i64);
            RawTrackRecord {
                latitude: format!("{:.6}", 55.7 + i as f64 * 1e-6),
                longitude: format!("{:.6}", 37.6 + i as f64 * 1e-6),
                time: time.to_rfc3339(),
                file: if i % 2 == 0 { "a.gpx" } else { "b.gpx" }.to_string(),
            }
        })
        .rev()
        .collect()
}

fn bench(c: &mut Criterion) {
    let records = synthetic_records(50_000);
    let offset = TimeOffset::Fixed(FixedOffset::east_opt(3 * 3600).unwrap());

    c.bench_function("track_store::build", |b| {
        b.iter(|| TrackStore::build(black_box(&records), offset).unwrap());
    });

    let store = TrackStore::build(&records, offset).unwrap();
    let first: NaiveDateTime = store.first().timestamp;
    let probes: Vec<_> = (0..1_000)
        .map(|i| first + TimeDelta::seconds(i * 97 - 600))
        .collect();

    c.bench_function("track_store::nearest", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(store.nearest(black_box(*probe)));
            }
        });
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
