use criterion::{criterion_group, Criterion};

use dxt_ans::ans::interleaved::encode_grouped;

use crate::benchmarks::{texture_message, LEN_PER_STREAM, NUM_STREAMS};

fn grouped_encoding_bench(c: &mut Criterion) {
    let (symbols, encoder_model, _) = texture_message();

    let mut group = c.benchmark_group("encoder");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.sample_size(50);

    group.bench_function("grouped interleaved encode", |b| {
        b.iter(|| encode_grouped(&symbols, &encoder_model, NUM_STREAMS, LEN_PER_STREAM).unwrap())
    });
    group.finish()
}

criterion_group! {
    name = encoder_benches;
    config = Criterion::default();
    targets = grouped_encoding_bench
}
