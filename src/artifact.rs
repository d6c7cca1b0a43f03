//! Self-describing artifact wire format
//!
//! Layout (integers little-endian):
//! `[magic:4][version:u8][symbol_width:u8][alphabet:u32]`
//! `[symbol:width,freq:u64]*alphabet[bit_len:u64][payload...]`
//!
//! Entries are written in ascending symbol order. The payload holds exactly
//! `ceil(bit_len / 8)` bytes with zero pad bits.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use crate::error::CodecError;
use crate::frequency::FrequencyMap;
use crate::symbol::Symbol;

pub const MAGIC: [u8; 4] = *b"HUFP";
pub const FORMAT_VERSION: u8 = 1;

const FIXED_HEADER_LEN: usize = 4 + 1 + 1 + 4 + 8;

/// Header plus packed payload of one compressed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact<S: Symbol> {
    frequencies: FrequencyMap<S>,
    bit_len: u64,
    payload: Vec<u8>,
}

impl<S: Symbol> Artifact<S> {
    pub(crate) fn new(frequencies: FrequencyMap<S>, bit_len: u64, payload: Vec<u8>) -> Self {
        Self {
            frequencies,
            bit_len,
            payload,
        }
    }

    pub fn frequencies(&self) -> &FrequencyMap<S> {
        &self.frequencies
    }

    /// Payload length in bits before padding.
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Header size in bytes for an alphabet of `alphabet` symbols.
    pub fn header_len(alphabet: usize) -> usize {
        FIXED_HEADER_LEN + alphabet * (S::WIDTH as usize + 8)
    }

    /// Total serialized size.
    pub fn encoded_len(&self) -> usize {
        Self::header_len(self.frequencies.len()) + self.payload.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(self.encoded_len());
        output.extend_from_slice(&MAGIC);
        output.push(FORMAT_VERSION);
        output.push(S::WIDTH);
        output.extend_from_slice(&(self.frequencies.len() as u32).to_le_bytes());

        let width = S::WIDTH as usize;
        for (sym, freq) in self.frequencies.iter() {
            output.extend_from_slice(&sym.to_header().to_le_bytes()[..width]);
            output.extend_from_slice(&freq.to_le_bytes());
        }

        output.extend_from_slice(&self.bit_len.to_le_bytes());
        output.extend_from_slice(&self.payload);
        output
    }

    /// Parse and structurally validate serialized bytes.
    ///
    /// Checks everything that can be checked without decoding: framing,
    /// symbol ordering, payload size against the declared bit length and
    /// zeroed padding.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = Cursor::new(data);

        let magic: [u8; 4] = read_array(&mut cursor, "magic")?;
        if magic != MAGIC {
            return Err(CodecError::corrupt("bad magic"));
        }
        let [version] = read_array::<1>(&mut cursor, "version")?;
        if version != FORMAT_VERSION {
            return Err(CodecError::corrupt(format!("unsupported version {}", version)));
        }
        let [width] = read_array::<1>(&mut cursor, "symbol width")?;
        if width != S::WIDTH {
            return Err(CodecError::corrupt(format!(
                "symbol width {} does not match expected {}",
                width,
                S::WIDTH
            )));
        }

        let alphabet = u32::from_le_bytes(read_array(&mut cursor, "alphabet size")?) as usize;
        let remaining = data.len() - cursor.position() as usize;
        if alphabet.saturating_mul(width as usize + 8) > remaining {
            return Err(CodecError::corrupt("alphabet size exceeds artifact length"));
        }

        let mut counts = BTreeMap::new();
        let mut last: Option<S> = None;
        let mut total = 0u64;
        for _ in 0..alphabet {
            let mut raw = [0u8; 4];
            cursor
                .read_exact(&mut raw[..width as usize])
                .map_err(|_| CodecError::corrupt("truncated symbol table"))?;
            let sym = S::from_header(u32::from_le_bytes(raw))
                .ok_or_else(|| CodecError::corrupt("invalid symbol value"))?;
            let freq = u64::from_le_bytes(read_array(&mut cursor, "symbol table")?);
            if freq == 0 {
                return Err(CodecError::corrupt(format!("zero frequency for {:?}", sym)));
            }
            if last.map_or(false, |prev| prev >= sym) {
                return Err(CodecError::corrupt("symbol table not strictly ascending"));
            }
            last = Some(sym);
            total = total
                .checked_add(freq)
                .ok_or_else(|| CodecError::corrupt("frequency total overflows"))?;
            counts.insert(sym, freq);
        }

        let bit_len = u64::from_le_bytes(read_array(&mut cursor, "bit length")?);
        // every code is at least one bit long
        if total > bit_len {
            return Err(CodecError::corrupt(format!(
                "{} symbols cannot fit in {} bits",
                total, bit_len
            )));
        }
        let payload = data[cursor.position() as usize..].to_vec();

        let expected = bit_len.div_ceil(8);
        if payload.len() as u64 != expected {
            return Err(CodecError::corrupt(format!(
                "declared {} bits need {} payload bytes, found {}",
                bit_len,
                expected,
                payload.len()
            )));
        }
        let used = (bit_len % 8) as u32;
        if used != 0 {
            let last_byte = payload[payload.len() - 1];
            if last_byte & (0xFFu8 >> used) != 0 {
                return Err(CodecError::corrupt("non-zero padding bits"));
            }
        }

        tracing::debug!(alphabet, bit_len, payload = payload.len(), "parsed artifact header");
        Ok(Self::new(FrequencyMap::from_counts(counts), bit_len, payload))
    }
}

fn read_array<const N: usize>(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<[u8; N], CodecError> {
    let mut buf = [0u8; N];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| CodecError::corrupt(format!("truncated header: {}", field)))?;
    Ok(buf)
}
