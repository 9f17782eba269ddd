use criterion::{criterion_group, Criterion};

use dxt_ans::ans::interleaved::{decode_grouped, encode_grouped};

use crate::benchmarks::{texture_message, LEN_PER_STREAM, NUM_STREAMS};

fn grouped_decoding_bench(c: &mut Criterion) {
    let (symbols, encoder_model, decoder_model) = texture_message();
    let (blob, offsets) =
        encode_grouped(&symbols, &encoder_model, NUM_STREAMS, LEN_PER_STREAM).unwrap();

    let mut group = c.benchmark_group("decoder");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.sample_size(50);

    group.bench_function("grouped interleaved decode", |b| {
        b.iter(|| {
            decode_grouped(
                &blob,
                &offsets,
                &decoder_model,
                NUM_STREAMS,
                LEN_PER_STREAM,
            )
            .unwrap()
        })
    });
    group.finish()
}

criterion_group! {
    name = decoder_benches;
    config = Criterion::default();
    targets = grouped_decoding_bench
}
