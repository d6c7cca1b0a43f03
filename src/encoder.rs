//! Bit-level packing of symbols through a code table.

use bitstream_io::{BigEndian, BitWrite, BitWriter};

use crate::code_table::CodeTable;
use crate::error::CodecError;
use crate::symbol::Symbol;

/// Packed payload plus its length in bits before padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub bit_len: u64,
}

/// Concatenate the code of every symbol, MSB first, zero-padded to a byte boundary.
pub fn encode<S: Symbol>(symbols: &[S], table: &CodeTable<S>) -> Result<EncodedPayload, CodecError> {
    let mut bytes = Vec::new();
    let mut bit_len = 0u64;
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        for &sym in symbols {
            let code = table
                .get(sym)
                .ok_or_else(|| CodecError::UnsupportedSymbol(format!("{:?}", sym)))?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_len += code.len() as u64;
        }
        writer.byte_align()?;
    }

    tracing::trace!(bit_len, bytes = bytes.len(), "encoded payload");
    Ok(EncodedPayload { bytes, bit_len })
}
