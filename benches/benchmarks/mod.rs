pub mod decoder;
pub mod encoder;

use rand::prelude::{Distribution, StdRng};
use rand::SeedableRng;
use rand_distr::Zipf;

use dxt_ans::ans::model4decoder::DecoderModel;
use dxt_ans::ans::model4encoder::EncoderModel;
use dxt_ans::ans::{normalize_for_texture, texture_params, STREAMS_PER_GROUP, SYMBOLS_PER_STREAM};
use dxt_ans::Symbol;

/// Encoding groups used by the benches.
const NUM_GROUPS: usize = 64;

pub const NUM_STREAMS: usize = STREAMS_PER_GROUP;
pub const LEN_PER_STREAM: usize = SYMBOLS_PER_STREAM;

/// A texture-profile message: Zipf-distributed byte symbols, normalized to
/// the texture table size.
pub fn texture_message() -> (Vec<Symbol>, EncoderModel, DecoderModel) {
    let mut rng = StdRng::seed_from_u64(0);
    let distribution = Zipf::new(256, 1.0).unwrap();

    let num_symbols = NUM_GROUPS * NUM_STREAMS * LEN_PER_STREAM;
    let symbols: Vec<Symbol> = (0..num_symbols)
        .map(|_| distribution.sample(&mut rng) as Symbol - 1)
        .collect();

    let mut counts = vec![0u32; 256];
    for &symbol in &symbols {
        counts[symbol as usize] += 1;
    }

    let freqs = normalize_for_texture(&counts).unwrap();
    let encoder_model = EncoderModel::new(&freqs, texture_params()).unwrap();
    let decoder_model = DecoderModel::new(&freqs, texture_params()).unwrap();
    (symbols, encoder_model, decoder_model)
}
