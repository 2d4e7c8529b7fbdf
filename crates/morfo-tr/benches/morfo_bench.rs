// Criterion benchmarks for morfo-tr.
//
// Uses the bundled lexicon, so no external data is needed.
//
// Run:
//   cargo bench -p morfo-tr

use criterion::{Criterion, criterion_group, criterion_main};
use morfo_tr::{TurkishMorpheme as T, TurkishMorphology};

const WORDS: &[&str] = &[
    "elmalarımız",
    "kitabım",
    "evdeydim",
    "arıyor",
    "yapmıyor",
    "yapacağım",
    "zeytinyağları",
    "güzeller",
    "TBMM'ye",
    "gnctrkcll",
];

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_bundled", |b| {
        b.iter(|| std::hint::black_box(TurkishMorphology::bundled().expect("bundled lexicon")));
    });
}

fn bench_analyze(c: &mut Criterion) {
    let m = TurkishMorphology::bundled().expect("bundled lexicon");
    c.bench_function("analyze_10_words", |b| {
        b.iter(|| {
            for word in WORDS {
                std::hint::black_box(m.analyze(word));
            }
        });
    });
}

fn bench_generate(c: &mut Criterion) {
    let m = TurkishMorphology::bundled().expect("bundled lexicon");
    let elma = m.lexicon().by_id("elma_Noun").expect("elma").clone();
    let yap = m.lexicon().by_id("yapmak_Verb").expect("yapmak").clone();
    c.bench_function("generate", |b| {
        b.iter(|| {
            std::hint::black_box(m.generate(&elma, &[T::A3pl, T::P1pl]).expect("generation"));
            std::hint::black_box(m.generate(&yap, &[T::Fut, T::Past, T::A3sg]).expect("generation"));
        });
    });
}

criterion_group!(benches, bench_build, bench_analyze, bench_generate);
criterion_main!(benches);
