use crate::ans::model4decoder::DecoderModel;
use crate::bits::BitRead;
use crate::{State, Symbol};

/// rANS decoder over a borrowed [`DecoderModel`].
///
/// Seeded with the final state published by an encoder; each `decode` pops
/// one symbol and refills the state from the bit stream whenever it falls
/// below `k·M`. Symbols come back in reverse encoding order, and the reader
/// must hand bits back in reverse write order (see
/// [`Direction::Backward`](crate::bits::Direction)).
#[derive(Clone)]
pub struct RansDecoder<'a> {
    model: &'a DecoderModel,
    state: State,
}

impl<'a> RansDecoder<'a> {
    pub fn new(model: &'a DecoderModel, state: State) -> Self {
        Self { model, state }
    }

    /// Pops one symbol from the state, refilling from `reader` as needed.
    pub fn decode<R: BitRead>(&mut self, reader: &mut R) -> Symbol {
        debug_assert!(
            self.state >= self.model.lower_bound() && self.state < self.model.upper_bound()
        );

        let m = self.model.m();
        let slot = self.state % m;
        let entry = *self.model.symbol(slot);

        self.state = (self.state / m) * entry.freq as State + slot - entry.cumul_freq as State;

        while self.state < self.model.lower_bound() {
            self.state = (self.state << self.model.log_b()) | reader.read_bits(self.model.log_b());
        }

        debug_assert!(
            self.state >= self.model.lower_bound() && self.state < self.model.upper_bound()
        );

        entry.symbol
    }

    pub fn state(&self) -> State {
        self.state
    }
}
