//! Criterion benchmarks for the key symbol mapper and the wire decoder.
//!
//! Both sit on the per-event hot path: every `text_input` character goes
//! through `map_char`, and every frame goes through the decoder.
//!
//! Run with:
//! ```bash
//! cargo bench --package mobilemouse-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mobilemouse_core::keymap::KeyMapper;
use mobilemouse_core::protocol::decode_client_message;

// ── Representative inputs ─────────────────────────────────────────────────────

const BENCH_KEY_NAMES: &[&str] = &[
    "Enter", "Escape", "ArrowLeft", "PageDown", "F1", "F12", "a", "Z", "7", "?", "Unknown",
];

const MIXED_TEXT: &str = "Hello, world! Grüße aus Köln 😀 (100% done) ~/path?q=1";

const MOVE_FRAME: &str = r#"{"type":"mouse_move","dx":3.4,"dy":-1.2}"#;
const KEY_FRAME: &str =
    r#"{"type":"key_event","key":"c","action":"down","mod":{"ctrl":true,"shift":false}}"#;

// ── Benchmarks: key mapping ───────────────────────────────────────────────────

fn bench_map_char(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_char");

    // Best case: letters are an arithmetic lookup.  Worst case: '~' is the
    // last punctuation entry.  'é' scans everything and misses.
    for ch in ['a', '~', 'é'] {
        group.bench_with_input(BenchmarkId::new("map_char", ch), &ch, |b, &ch| {
            b.iter(|| KeyMapper::map_char(black_box(ch)))
        });
    }

    group.bench_function("map_char_mixed_text", |b| {
        b.iter(|| {
            MIXED_TEXT
                .chars()
                .map(|ch| KeyMapper::map_char(black_box(ch)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_map_key_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_name");

    group.bench_function("map_key_name_batch", |b| {
        b.iter(|| {
            BENCH_KEY_NAMES
                .iter()
                .map(|name| KeyMapper::map_key_name(black_box(name)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

// ── Benchmarks: wire decoding ─────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_decode");

    group.bench_function("mouse_move", |b| {
        b.iter(|| decode_client_message(black_box(MOVE_FRAME)))
    });
    group.bench_function("key_event", |b| {
        b.iter(|| decode_client_message(black_box(KEY_FRAME)))
    });

    group.finish();
}

criterion_group!(benches, bench_map_char, bench_map_key_name, bench_decode);
criterion_main!(benches);
