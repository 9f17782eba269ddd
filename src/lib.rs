//! Entropy-codec core for supercompressed block-based GPU textures.
//!
//! The crate implements the lossless half of a texture supercompressor: an
//! interleaved range-coded ANS (rANS) codec together with the probability
//! normalization that conditions empirical symbol counts into a
//! fixed-denominator frequency table. The encoder packs symbols into a 32-bit
//! state word, spilling low bits to a little-endian bit stream whenever the
//! state would leave its renormalization interval; the decoder runs the exact
//! mirror image, which makes the stream traversal LIFO. N independent streams
//! can be encoded in lock-step round-robin order into a single blob so that a
//! SIMT work group can decode all of them in parallel.
//!
//! The crate is consumed as a library; it deals in plain byte buffers and
//! scalar state words and leaves the texture pipeline, the container format
//! and any GPU kernels to its callers.

pub mod ans;
pub mod bits;
pub mod histogram;

/// The type representing a symbol, that is an index within the alphabet.
///
/// Production alphabets stay within 256 symbols, but nothing in the coder
/// depends on that bound.
pub type Symbol = u16;

/// The type representing normalized symbol frequencies.
///
/// Frequencies are deliberately bounded to 16 bits so that a decoder-side
/// table entry can hold both the frequency and the cumulative frequency of a
/// symbol as 16-bit unsigned values, which is also how they travel on the
/// wire.
pub type Freq = u16;

/// The type representing the state of the encoder/decoder.
pub type State = u32;
