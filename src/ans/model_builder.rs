use anyhow::{bail, ensure, Result};
use log::info;

use crate::ans::model4decoder::DecoderModel;
use crate::ans::model4encoder::EncoderModel;
use crate::ans::CodecParams;
use crate::histogram::normalize_counts;
use crate::Symbol;

/// Accumulates raw symbol statistics and turns them into the paired
/// encoder/decoder models of a message.
///
/// This is the one-stop path for callers that own a symbol sequence: push
/// the symbols (first traversal), `build` the models, then encode (second
/// traversal).
pub struct ModelBuilder {
    /// The number of occurrences of each symbol.
    counts: Vec<u32>,

    /// The sum of all symbols' occurrences.
    total: u64,
}

impl ModelBuilder {
    pub fn new(alphabet_size: usize) -> Self {
        Self {
            counts: vec![0; alphabet_size],
            total: 0,
        }
    }

    /// Records one occurrence of `symbol`.
    pub fn push_symbol(&mut self, symbol: Symbol) -> Result<()> {
        if symbol as usize >= self.counts.len() {
            bail!(
                "symbol {} is outside the alphabet of size {}",
                symbol,
                self.counts.len()
            );
        }

        self.counts[symbol as usize] += 1;
        self.total += 1;
        Ok(())
    }

    pub fn push_symbols(&mut self, symbols: &[Symbol]) -> Result<()> {
        for &symbol in symbols {
            self.push_symbol(symbol)?;
        }
        Ok(())
    }

    /// Normalizes the accumulated counts to `table_size` and builds the
    /// encoder and decoder models.
    pub fn build(self, params: CodecParams, table_size: u32) -> Result<(EncoderModel, DecoderModel)> {
        ensure!(self.total > 0, "no symbols were pushed");

        let freqs = normalize_counts(&self.counts, table_size)?;

        info!(
            "model: {} symbols over alphabet {} | M = {} | H = {:.3} bps | quantized cost = {:.3} bps",
            self.total,
            self.counts.iter().filter(|&&c| c > 0).count(),
            table_size,
            self.entropy(),
            self.quantized_cost(&freqs, table_size),
        );

        let encoder_model = EncoderModel::new(&freqs, params)?;
        let decoder_model = DecoderModel::new(&freqs, params)?;
        Ok((encoder_model, decoder_model))
    }

    /// The empirical entropy of the pushed sequence, in bits per symbol.
    fn entropy(&self) -> f64 {
        self.counts
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let prob = count as f64 / self.total as f64;
                -prob.log2() * count as f64
            })
            .sum::<f64>()
            / self.total as f64
    }

    /// The expected code length under the quantized probabilities, in bits
    /// per symbol. The gap to [`entropy`](Self::entropy) is the price of the
    /// normalization.
    fn quantized_cost(&self, freqs: &[u32], table_size: u32) -> f64 {
        self.counts
            .iter()
            .zip(freqs)
            .filter(|(&count, _)| count > 0)
            .map(|(&count, &freq)| {
                let prob = freq as f64 / table_size as f64;
                -prob.log2() * count as f64
            })
            .sum::<f64>()
            / self.total as f64
    }
}
