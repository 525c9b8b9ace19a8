//! Criterion benchmarks for the Ducklink binary codec.
//!
//! Measures encode, decode and checksum cost for every message kind.
//!
//! Run with:
//! ```bash
//! cargo bench --package ducklink-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ducklink_core::protocol::checksum::compute_checksum;
use ducklink_core::protocol::codec::{decode_message, encode_message};
use ducklink_core::protocol::messages::{
    AnyMessage, DownToto, DuckMessage, InterMcuProut, UpPlop, UpSpeedReport,
};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_down_toto() -> AnyMessage {
    let mut m = DownToto::new();
    m.set_decimal(12.75);
    m.set_entier(-300);
    m.set_name("bench-toto");
    m.set_vx(0.5);
    m.into()
}

fn make_inter_mcu_prout() -> AnyMessage {
    let mut m = InterMcuProut::new();
    m.set_odeur("roquefort");
    m.into()
}

fn make_up_plop() -> AnyMessage {
    let mut m = UpPlop::new();
    m.set_decimal(250.0);
    m.set_entier(42);
    m.set_name("bench-plop");
    m.into()
}

fn make_up_speed_report() -> AnyMessage {
    let mut m = UpSpeedReport::new();
    m.set_vtheta(5);
    m.set_vx(-20);
    m.set_vy(3);
    m.into()
}

fn all_messages() -> Vec<AnyMessage> {
    vec![
        make_down_toto(),
        make_inter_mcu_prout(),
        make_up_plop(),
        make_up_speed_report(),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `encode_message` for every message kind.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_message");
    for msg in all_messages() {
        group.bench_with_input(BenchmarkId::new("msg", msg.name()), &msg, |b, msg| {
            b.iter(|| encode_message(black_box(msg)))
        });
    }
    group.finish();
}

/// Benchmarks `serialize` into a reused stack buffer (no allocation).
fn bench_serialize_in_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_in_place");
    let report = make_up_speed_report();
    let mut buf = [0u8; UpSpeedReport::WIRE_LEN];
    group.bench_function("UpSpeedReport", |b| {
        b.iter(|| black_box(&report).serialize(black_box(&mut buf)).expect("fits"))
    });
    group.finish();
}

/// Benchmarks `decode_message` for every message kind (from pre-encoded bytes).
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_message");
    for msg in all_messages() {
        let bytes = encode_message(&msg);
        group.bench_with_input(BenchmarkId::new("msg", msg.name()), &bytes, |b, bytes| {
            b.iter(|| decode_message(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks the checksum alone over the longest frame body.
fn bench_checksum(c: &mut Criterion) {
    let bytes = encode_message(&make_down_toto());
    let body = &bytes[..bytes.len() - 2];
    c.bench_function("compute_checksum/DownToto", |b| {
        b.iter(|| compute_checksum(black_box(body)))
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_serialize_in_place,
    bench_decode,
    bench_checksum
);
criterion_main!(benches);
