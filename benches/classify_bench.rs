use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use scholar_profile_metrics::classify::{classify_record, parse_record_date, window_position};
use scholar_profile_metrics::common::FieldValuePair;

fn sample_records() -> Vec<Vec<FieldValuePair>> {
    vec![
        vec![
            FieldValuePair::new("Authors", "A Lovelace, C Babbage"),
            FieldValuePair::new("Publication date", "2023/06/15"),
            FieldValuePair::new("Journal", "Annals of Computation"),
            FieldValuePair::new("Volume", "12"),
            FieldValuePair::new("Pages", "1-27"),
            FieldValuePair::new("Total citations", "Cited by 42"),
        ],
        vec![
            FieldValuePair::new("Publication date", "2023/08"),
            FieldValuePair::new("Journal", "arXiv preprint arXiv:2308.00001"),
        ],
        vec![
            FieldValuePair::new("Publication date", "2023/09"),
            FieldValuePair::new("Book", "Handbook of Metrics"),
            FieldValuePair::new("Book Chapter", "Chapter 4: Counting"),
        ],
        vec![
            FieldValuePair::new("Publication date", "2024/02"),
            FieldValuePair::new("Source", "Proceedings of the 12th Workshop"),
        ],
    ]
}

fn bench_classify_record(c: &mut Criterion) {
    let records = sample_records();

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("classify_record", |b| {
        b.iter(|| {
            for pairs in &records {
                let _ = black_box(classify_record(pairs));
            }
        })
    });

    group.finish();
}

fn bench_date_window(c: &mut Criterion) {
    let dates = ["2023/06/15", "2023/6", "2024/02", "June 2023", "2022/12/31"];

    let mut group = c.benchmark_group("date_window");
    group.throughput(Throughput::Elements(dates.len() as u64));

    group.bench_function("parse_and_position", |b| {
        b.iter(|| {
            for raw in &dates {
                if let Some((year, month)) = parse_record_date(raw) {
                    black_box(window_position(year, month, 2023));
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_classify_record, bench_date_window);
criterion_main!(benches);
