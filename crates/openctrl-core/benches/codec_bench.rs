//! Criterion benchmarks for the request-to-report codec.
//!
//! Measures the cost of turning a decoded JSON body into report bytes for
//! every device class, which is the only CPU work on the request hot path.
//!
//! Run with:
//! ```bash
//! cargo bench --package openctrl-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use openctrl_core::{build_report, DeviceClass};
use serde_json::{json, Value};

// ── Body fixtures ─────────────────────────────────────────────────────────────

fn bodies() -> Vec<(DeviceClass, Value)> {
    vec![
        (
            DeviceClass::Keyboard,
            json!({"modifiers": 2, "keys": [4, 5, 6, 7, 8, 9, 10, 11]}),
        ),
        (
            DeviceClass::Mouse,
            json!({"dx": 10, "dy": -5, "wheel": 0, "buttons": 1}),
        ),
        (
            DeviceClass::Gamepad,
            json!({
                "buttons": 1, "leftX": 200, "leftY": -20, "rightX": 0, "rightY": 0,
                "leftTrigger": 0, "rightTrigger": 127, "hat": 3
            }),
        ),
        (
            DeviceClass::Pen,
            json!({"tip": true, "inRange": true, "x": 1200, "y": 800, "pressure": 300}),
        ),
        (
            DeviceClass::Touch,
            json!({"tip": true, "inRange": true, "contactId": 1, "x": 10, "y": 20, "contactCount": 1}),
        ),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `build_report` for every device class.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_report");
    for (class, body) in bodies() {
        group.bench_with_input(BenchmarkId::new("class", class), &body, |b, body| {
            b.iter(|| build_report(black_box(class), black_box(body)).expect("build must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks the full body → bytes path, including serialisation.
fn bench_build_and_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_and_encode");
    for (class, body) in bodies() {
        group.bench_with_input(BenchmarkId::new("class", class), &body, |b, body| {
            b.iter(|| {
                build_report(black_box(class), black_box(body))
                    .expect("build must succeed")
                    .to_bytes()
            })
        });
    }
    group.finish();
}

/// Benchmarks decoding raw request text, the step the HTTP layer performs first.
fn bench_parse_body(c: &mut Criterion) {
    let raw = br#"{"modifiers":2,"keys":[4,5]}"#;
    c.bench_function("parse_keyboard_body", |b| {
        b.iter(|| {
            let body: Value = serde_json::from_slice(black_box(raw)).unwrap();
            build_report(DeviceClass::Keyboard, &body).unwrap()
        })
    });
}

criterion_group!(benches, bench_build, bench_build_and_encode, bench_parse_body);
criterion_main!(benches);
