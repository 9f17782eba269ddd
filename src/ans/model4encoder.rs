use anyhow::Result;

use crate::ans::{checked_denominator, CodecParams};
use crate::histogram::cumulative_freqs;
use crate::{Freq, State, Symbol};

/// Contains, for a specific symbol, all the data needed by the encoder to
/// push it into the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderModelEntry {
    /// The frequency of the symbol.
    pub freq: Freq,

    /// The cumulative frequency of the symbol.
    pub cumul_freq: Freq,

    /// The smallest state that forces a renormalization before this symbol
    /// can be encoded, that is `b·k·freq`.
    pub upperbound: State,
}

/// The immutable model shared by every encoder of a message: the frequency
/// table, its cumulative form and the coder parameters, precomputed into
/// per-symbol entries.
#[derive(Clone, Debug)]
pub struct EncoderModel {
    table: Vec<EncoderModelEntry>,
    m: u32,
    b: u32,
    k: u32,
    log_b: u32,
}

impl EncoderModel {
    pub fn new(freqs: &[u32], params: CodecParams) -> Result<Self> {
        let m = checked_denominator(freqs, params)?;

        let cumulative = cumulative_freqs(freqs);
        let table = freqs
            .iter()
            .zip(&cumulative)
            .map(|(&freq, &cumul)| EncoderModelEntry {
                freq: freq as Freq,
                cumul_freq: cumul as Freq,
                upperbound: params.b() * params.k() * freq,
            })
            .collect();

        Ok(Self {
            table,
            m,
            b: params.b(),
            k: params.k(),
            log_b: params.log_b(),
        })
    }

    #[inline(always)]
    pub fn entry(&self, symbol: Symbol) -> &EncoderModelEntry {
        &self.table[symbol as usize]
    }

    /// The denominator `M` of the frequency table.
    #[inline(always)]
    pub fn m(&self) -> u32 {
        self.m
    }

    #[inline(always)]
    pub fn b(&self) -> u32 {
        self.b
    }

    #[inline(always)]
    pub fn log_b(&self) -> u32 {
        self.log_b
    }

    /// `k·M`, the lower bound of the renormalization interval and the
    /// initial state of every encoder.
    #[inline(always)]
    pub fn lower_bound(&self) -> State {
        self.k * self.m
    }

    /// `b·k·M`, the exclusive upper bound of the renormalization interval.
    #[inline(always)]
    pub fn upper_bound(&self) -> State {
        self.b * self.k * self.m
    }

    pub fn alphabet_size(&self) -> usize {
        self.table.len()
    }

    /// The frequency table in its wire form.
    pub fn frequencies(&self) -> Vec<Freq> {
        self.table.iter().map(|entry| entry.freq).collect()
    }
}
