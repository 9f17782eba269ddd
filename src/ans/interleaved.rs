//! Lock-step encoding and decoding of N independent rANS streams.
//!
//! The input is split into N contiguous equal partitions, one per stream.
//! Encoders take turns pushing one symbol each into a single shared bit
//! stream, so the spilled bits of all streams land interleaved in one blob
//! in the exact order they were produced. The N final state words are
//! appended to the blob as little-endian words. Decoders replay the same
//! round-robin schedule backwards over a backward bit reader; the streams
//! share nothing but the bit-stream cursor, which is what lets a SIMT work
//! group advance all N of them in lock-step.
//!
//! For larger messages, [`encode_grouped`] cuts the input into groups of
//! `streams · symbols_per_stream` symbols, each encoded with fresh encoders
//! and terminated by its own state dump, and records the end-of-group byte
//! offsets in a parallel table so that every group is independently
//! decodable.

use anyhow::{ensure, Result};
use itertools::Itertools;

use crate::ans::decoder::RansDecoder;
use crate::ans::encoder::RansEncoder;
use crate::ans::model4decoder::DecoderModel;
use crate::ans::model4encoder::EncoderModel;
use crate::ans::{CodecParams, Prelude};
use crate::bits::{BitReader, Direction, VecBitWriter};
use crate::{State, Symbol};

/// Bytes taken by one state word on the wire.
const STATE_SIZE: usize = std::mem::size_of::<State>();

fn encode_streams(
    symbols: &[Symbol],
    model: &EncoderModel,
    num_streams: usize,
) -> Result<(Vec<u8>, Vec<State>)> {
    ensure!(num_streams > 0, "at least one stream is required");
    ensure!(
        symbols.len() % num_streams == 0,
        "{} symbols cannot be split into {} equal partitions",
        symbols.len(),
        num_streams
    );
    ensure!(
        model.log_b() % 8 == 0,
        "interleaved streams require a byte-aligned renormalization radix"
    );

    let len_per_stream = symbols.len() / num_streams;
    let mut encoders: Vec<RansEncoder<'_>> =
        (0..num_streams).map(|_| RansEncoder::new(model)).collect();
    let mut writer = VecBitWriter::new();

    for i in 0..len_per_stream {
        for (j, encoder) in encoders.iter_mut().enumerate() {
            encoder.encode(symbols[j * len_per_stream + i], &mut writer);
        }
    }

    let states = encoders.iter().map(|encoder| encoder.state()).collect();
    Ok((writer.into_bytes(), states))
}

fn decode_streams(
    stream: &[u8],
    states: &[State],
    len_per_stream: usize,
    model: &DecoderModel,
) -> Result<Vec<Symbol>> {
    ensure!(
        model.log_b() % 8 == 0,
        "interleaved streams require a byte-aligned renormalization radix"
    );

    let mut reader = BitReader::new(stream, Direction::Backward);
    let mut decoders: Vec<RansDecoder<'_>> = states
        .iter()
        .map(|&state| RansDecoder::new(model, state))
        .collect();

    // The encoder filled the blob with round i of every stream before round
    // i + 1; unwinding it therefore visits rounds backwards, and within one
    // round the streams in reverse order.
    let mut out = vec![0 as Symbol; len_per_stream * states.len()];
    for i in 0..len_per_stream {
        for (j, decoder) in decoders.iter_mut().enumerate().rev() {
            out[j * len_per_stream + (len_per_stream - 1 - i)] = decoder.decode(&mut reader);
        }
    }

    Ok(out)
}

/// Encodes `symbols` as `num_streams` interleaved streams sharing `model`.
///
/// Returns the blob: the interleaved renormalization bits followed by the
/// final state of each encoder as a little-endian word.
pub fn encode_interleaved(
    symbols: &[Symbol],
    model: &EncoderModel,
    num_streams: usize,
) -> Result<Vec<u8>> {
    let (mut blob, states) = encode_streams(symbols, model, num_streams)?;
    for state in states {
        blob.extend_from_slice(&state.to_le_bytes());
    }
    Ok(blob)
}

/// Decodes a blob produced by [`encode_interleaved`] back into its
/// `num_symbols` symbols.
pub fn decode_interleaved(
    data: &[u8],
    num_symbols: usize,
    model: &DecoderModel,
    num_streams: usize,
) -> Result<Vec<Symbol>> {
    ensure!(num_streams > 0, "at least one stream is required");
    ensure!(
        num_symbols % num_streams == 0,
        "{} symbols cannot have come from {} equal streams",
        num_symbols,
        num_streams
    );

    let states_size = num_streams * STATE_SIZE;
    ensure!(
        data.len() >= states_size,
        "blob of {} bytes is too short to hold {} state words",
        data.len(),
        num_streams
    );

    let (stream, state_bytes) = data.split_at(data.len() - states_size);
    let states: Vec<State> = state_bytes
        .chunks_exact(STATE_SIZE)
        .map(|chunk| State::from_le_bytes(chunk.try_into().unwrap()))
        .collect();

    decode_streams(stream, &states, num_symbols / num_streams, model)
}

/// Encodes `symbols` into a [`Prelude`], keeping the blob and the state
/// words separate as they travel on the wire.
pub fn encode_message(
    symbols: &[Symbol],
    model: &EncoderModel,
    num_streams: usize,
) -> Result<Prelude> {
    let (stream, states) = encode_streams(symbols, model, num_streams)?;
    Ok(Prelude {
        frequencies: model.frequencies(),
        states,
        stream,
    })
}

/// Decodes a [`Prelude`] back into its `num_symbols` symbols.
///
/// The message length and the coder parameters travel out of band.
pub fn decode_message(
    prelude: &Prelude,
    num_symbols: usize,
    params: CodecParams,
) -> Result<Vec<Symbol>> {
    let num_streams = prelude.states.len();
    ensure!(num_streams > 0, "the message carries no state words");
    ensure!(
        num_symbols % num_streams == 0,
        "{} symbols cannot have come from {} equal streams",
        num_symbols,
        num_streams
    );

    let freqs: Vec<u32> = prelude.frequencies.iter().map(|&f| f as u32).collect();
    let model = DecoderModel::new(&freqs, params)?;
    decode_streams(
        &prelude.stream,
        &prelude.states,
        num_symbols / num_streams,
        &model,
    )
}

/// Encodes a message as a sequence of independently decodable groups.
///
/// Each group holds `num_streams · symbols_per_stream` symbols, encoded with
/// a fresh set of encoders and terminated by its own state dump. Returns the
/// concatenated group blobs plus the parallel offsets table: one cumulative
/// end-of-group byte position per group.
pub fn encode_grouped(
    symbols: &[Symbol],
    model: &EncoderModel,
    num_streams: usize,
    symbols_per_stream: usize,
) -> Result<(Vec<u8>, Vec<u32>)> {
    ensure!(
        num_streams > 0 && symbols_per_stream > 0,
        "group geometry must be nonzero"
    );
    let group_len = num_streams * symbols_per_stream;
    ensure!(
        symbols.len() % group_len == 0,
        "{} symbols cannot be cut into groups of {}",
        symbols.len(),
        group_len
    );

    let mut blob = Vec::new();
    let mut offsets = Vec::with_capacity(symbols.len() / group_len);
    for group in symbols.chunks_exact(group_len) {
        blob.extend(encode_interleaved(group, model, num_streams)?);
        offsets.push(blob.len() as u32);
    }

    Ok((blob, offsets))
}

/// Decodes the blob and offsets table produced by [`encode_grouped`].
pub fn decode_grouped(
    blob: &[u8],
    offsets: &[u32],
    model: &DecoderModel,
    num_streams: usize,
    symbols_per_stream: usize,
) -> Result<Vec<Symbol>> {
    ensure!(
        num_streams > 0 && symbols_per_stream > 0,
        "group geometry must be nonzero"
    );
    let group_len = num_streams * symbols_per_stream;

    let mut out = Vec::with_capacity(offsets.len() * group_len);
    for (start, end) in std::iter::once(0u32)
        .chain(offsets.iter().copied())
        .tuple_windows()
    {
        ensure!(
            start <= end && end as usize <= blob.len(),
            "group offsets must grow monotonically within the blob"
        );
        out.extend(decode_interleaved(
            &blob[start as usize..end as usize],
            group_len,
            model,
            num_streams,
        )?);
    }

    Ok(out)
}
