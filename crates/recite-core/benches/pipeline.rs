use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use recite_core::chunker::merge_chunks;
use recite_core::selector::select_blanks;
use recite_core::tokenizer::{tokenize, StopWords};
use recite_core::{QuizAssembler, QuizConfig};

const VERSE: &str = "이 예언의 말씀을 읽는 자와 듣는 자들과 그 가운데 기록한 것을 지키는 자들이 복이 있나니 때가 가까움이라";

fn chapter(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("[1:{i}] {VERSE}")).collect()
}

fn bench_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunking");
    let stop_words = StopWords::default();

    group.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box(VERSE), &stop_words))
    });

    let tokens = tokenize(VERSE, &stop_words);
    group.bench_function("merge", |b| b.iter(|| merge_chunks(black_box(&tokens), 3)));

    let chunks = merge_chunks(&tokens, 3);
    group.bench_function("select", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| select_blanks(black_box(&chunks), 0.28, &mut rng))
    });

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let assembler = QuizAssembler::new(QuizConfig::default());

    for size in [5, 20, 100] {
        let lines = chapter(size);
        group.bench_function(format!("verses={size}"), |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| assembler.assemble_verses("bench", "Bench", black_box(&lines), &mut rng))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunking, bench_assemble);
criterion_main!(benches);
