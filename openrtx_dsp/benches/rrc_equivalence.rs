use criterion::{criterion_group, criterion_main, Criterion};
use openrtx_dsp::rrc::{upsample, DirectFir, LookupFir, TX_GAIN};
use openrtx_dsp::symbol::Symbol;

fn sample_symbols(n: usize) -> Vec<Symbol> {
    let pattern = [Symbol::Pos3, Symbol::Neg1, Symbol::Pos1, Symbol::Neg3];
    (0..n).map(|i| pattern[i % pattern.len()]).collect()
}

fn bench_direct(c: &mut Criterion) {
    let symbols = sample_symbols(192);
    let stuffed = upsample(&symbols);
    c.bench_function("rrc_direct_fir_192_symbols", |b| {
        b.iter(|| {
            let mut fir = DirectFir::new(TX_GAIN);
            fir.process(&stuffed)
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let symbols = sample_symbols(192);
    c.bench_function("rrc_lookup_fir_192_symbols", |b| {
        b.iter(|| {
            let fir = LookupFir::new(TX_GAIN);
            fir.process(&symbols)
        })
    });
}

criterion_group!(benches, bench_direct, bench_lookup);
criterion_main!(benches);
