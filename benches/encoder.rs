#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use nvf::prelude::*;

const N_FLAT: i32 = 2000;

fn flat_doc() -> Vec<Entry> {
    (0..N_FLAT).map(|i| Entry::new(format!("k{}", i), i)).collect()
}

const N_DEPTH: usize = 10;
const N_WIDTH: i32 = 10;

fn nested_doc() -> Vec<Entry> {
    let fields = |tag: char| -> Vec<Entry> {
        (0..N_WIDTH)
            .map(|i| Entry::new(format!("{}{}", tag, i), i))
            .collect()
    };
    let mut doc = fields('f');
    for d in 0..N_DEPTH {
        let mut outer = fields('f');
        outer.push(Entry::new(format!("s{}", d), doc));
        doc = outer;
    }
    doc
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!(
            "Creating a document of size {}",
            encode_full(&nested_doc()).unwrap().len()
        ),
        |b| b.iter(|| black_box(nested_doc())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let doc = nested_doc();
    let enc_len = encode_full(&doc).unwrap().len();
    c.bench_function(
        &format!("Encoding a document, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&doc))),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let doc = nested_doc();
    let enc_len = encode_full(&doc).unwrap().len();
    c.bench_function(
        &format!(
            "Encoding a document, output size of {} bytes, buffer preallocated",
            enc_len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(enc_len * 2);
                encode(black_box(&doc), &mut out)
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = encode_full(&nested_doc()).unwrap();
    c.bench_function(
        &format!("Decoding a document, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(&enc)).unwrap()),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let doc = flat_doc();
    let enc_len = encode_full(&doc).unwrap().len();
    c.bench_function(
        &format!("Encoding a flat document, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&doc))),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = encode_full(&flat_doc()).unwrap();
    c.bench_function(
        &format!("Decoding a flat document of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full(black_box(&enc)).unwrap()),
    );
}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_enc_single_alloc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat
);
criterion_main!(benches);
