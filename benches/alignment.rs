//! Alignment throughput with an in-memory WordPiece vocabulary.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench alignment
//! ```

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metalign::codec::{decode, encode};
use metalign::{HfSubwordTokenizer, RuleTagger, TokenAligner};

const BENCH_TEXT: &str =
    "I don't think Mr. Smith visited the Bank of America in Paris yesterday, but we're playing it safe.";

fn aligner() -> TokenAligner {
    let vocab = [
        "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "i", "do", "not", "think", "mr", ".",
        "smith", "visit", "##ed", "the", "bank", "of", "america", "in", "paris", "yesterday",
        ",", "but", "we", "are", "play", "##ing", "it", "safe",
    ];
    let subword = HfSubwordTokenizer::from_vocab(vocab, true).expect("vocab");
    TokenAligner::new(Arc::new(subword), Arc::new(RuleTagger::new()))
}

fn bench_tagging(c: &mut Criterion) {
    let aligner = aligner();
    c.bench_function("tokenize_with_metadata", |b| {
        b.iter(|| aligner.tokenize_with_metadata(black_box(BENCH_TEXT)).unwrap())
    });
}

fn bench_alignment(c: &mut Criterion) {
    let aligner = aligner();
    let bpe = aligner.to_wrapped_subwords(BENCH_TEXT).unwrap();

    c.bench_function("subword_metadata", |b| {
        b.iter(|| aligner.subword_metadata(black_box(BENCH_TEXT)).unwrap())
    });
    c.bench_function("subword_metadata_from_tokens", |b| {
        b.iter(|| {
            aligner
                .subword_metadata_from_tokens(black_box(BENCH_TEXT), &bpe)
                .unwrap()
        })
    });
}

fn bench_codec(c: &mut Criterion) {
    let meta = aligner().subword_metadata(BENCH_TEXT).unwrap();
    c.bench_function("encode_decode", |b| {
        b.iter(|| decode(&encode(black_box(&meta))).unwrap())
    });
}

criterion_group!(benches, bench_tagging, bench_alignment, bench_codec);
criterion_main!(benches);
