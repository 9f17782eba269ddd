use anyhow::Result;

use crate::ans::{checked_denominator, CodecParams};
use crate::{Freq, State, Symbol};

/// The data associated to one slot of `[0, M)`: the symbol owning the slot
/// plus its frequency and cumulative frequency.
///
/// This is the same triple the GPU decoder keeps in constant memory, one
/// entry per slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderModelEntry {
    pub symbol: Symbol,
    pub freq: Freq,
    pub cumul_freq: Freq,
}

/// The immutable model shared by every decoder of a message.
///
/// Symbol lookup is a reverse table from slot to symbol precomputed from the
/// frequency table, so that `decode` resolves `state mod M` with a single
/// indexed load instead of a binary search over the cumulative table.
#[derive(Clone, Debug)]
pub struct DecoderModel {
    table: Vec<DecoderModelEntry>,
    m: u32,
    b: u32,
    k: u32,
    log_b: u32,
}

impl DecoderModel {
    pub fn new(freqs: &[u32], params: CodecParams) -> Result<Self> {
        let m = checked_denominator(freqs, params)?;

        let mut table = vec![DecoderModelEntry::default(); m as usize];
        let mut cumul = 0u32;
        for (symbol, &freq) in freqs.iter().enumerate() {
            for slot in cumul..cumul + freq {
                table[slot as usize] = DecoderModelEntry {
                    symbol: symbol as Symbol,
                    freq: freq as Freq,
                    cumul_freq: cumul as Freq,
                };
            }
            cumul += freq;
        }

        Ok(Self {
            table,
            m,
            b: params.b(),
            k: params.k(),
            log_b: params.log_b(),
        })
    }

    #[inline(always)]
    pub fn symbol(&self, slot: State) -> &DecoderModelEntry {
        &self.table[slot as usize]
    }

    #[inline(always)]
    pub fn m(&self) -> u32 {
        self.m
    }

    #[inline(always)]
    pub fn log_b(&self) -> u32 {
        self.log_b
    }

    #[inline(always)]
    pub fn lower_bound(&self) -> State {
        self.k * self.m
    }

    #[inline(always)]
    pub fn upper_bound(&self) -> State {
        self.b * self.k * self.m
    }

    /// The slot-to-symbol column of the table.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.table.iter().map(|entry| entry.symbol).collect()
    }

    /// The per-slot frequency column of the table.
    pub fn frequencies(&self) -> Vec<Freq> {
        self.table.iter().map(|entry| entry.freq).collect()
    }

    /// The per-slot cumulative frequency column of the table.
    pub fn cumulative_frequencies(&self) -> Vec<Freq> {
        self.table.iter().map(|entry| entry.cumul_freq).collect()
    }
}
