use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openmeteo::ResponseTable;
use serde_json::{json, Map, Value};

/// A week of hourly data for two variables with 31 ensemble members each.
fn ensemble_week() -> Value {
    let times: Vec<String> = (0..168)
        .map(|h| format!("2024-06-{:02}T{:02}:00", 1 + h / 24, h % 24))
        .collect();
    let mut hourly = Map::new();
    hourly.insert("time".to_string(), json!(times));
    for variable in ["temperature_2m", "precipitation"] {
        for member in 0..31 {
            let key = if member == 0 {
                variable.to_string()
            } else {
                format!("{variable}_member{member:02}")
            };
            let values: Vec<Option<f64>> = (0..168)
                .map(|h| (h % 17 != 0).then(|| member as f64 + h as f64 * 0.1))
                .collect();
            hourly.insert(key, json!(values));
        }
    }
    json!({"latitude": 39.0, "longitude": -86.0, "hourly": hourly})
}

fn bench_flatten(c: &mut Criterion) {
    let body = ensemble_week();
    c.bench_function("flatten_ensemble_week", |b| {
        b.iter(|| {
            ResponseTable::from_json(
                black_box(body.clone()),
                &["temperature_2m", "precipitation"],
                &[],
            )
        })
    });
}

criterion_group!(benches, bench_flatten);
criterion_main!(benches);
