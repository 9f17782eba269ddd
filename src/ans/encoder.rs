use crate::ans::model4encoder::EncoderModel;
use crate::bits::BitWrite;
use crate::{State, Symbol};

/// rANS encoder over a borrowed [`EncoderModel`].
///
/// The encoder is a single 32-bit state word. Every `encode` first spills as
/// many `log2(b)`-bit chunks as needed to keep the subsequent state update
/// inside `[k·M, b·k·M)`, then folds the symbol in. Decoding unwinds the
/// state, so the decoder recovers symbols in reverse encoding order and
/// consumes the spilled bits LIFO.
#[derive(Clone)]
pub struct RansEncoder<'a> {
    model: &'a EncoderModel,
    state: State,
}

impl<'a> RansEncoder<'a> {
    pub fn new(model: &'a EncoderModel) -> Self {
        Self {
            model,
            state: model.lower_bound(),
        }
    }

    /// Pushes one symbol into the state, spilling renormalization bits to
    /// `writer`.
    ///
    /// Encoding a symbol outside the alphabet or with zero frequency is a
    /// programming error.
    pub fn encode<W: BitWrite>(&mut self, symbol: Symbol, writer: &mut W) {
        debug_assert!(
            self.state >= self.model.lower_bound() && self.state < self.model.upper_bound()
        );

        let entry = self.model.entry(symbol);
        debug_assert!(entry.freq > 0, "symbol {} has zero frequency", symbol);

        // `upperbound` is the largest threshold for which the state update
        // below cannot leave the interval.
        while self.state >= entry.upperbound {
            writer.write_bits(self.state & (self.model.b() - 1), self.model.log_b());
            self.state /= self.model.b();
        }

        let freq = entry.freq as State;
        self.state =
            (self.state / freq) * self.model.m() + entry.cumul_freq as State + self.state % freq;

        debug_assert!(
            self.state >= self.model.lower_bound() && self.state < self.model.upper_bound()
        );
    }

    pub fn state(&self) -> State {
        self.state
    }
}
