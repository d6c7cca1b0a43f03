//! Tree-guided decoding of an artifact payload.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::artifact::Artifact;
use crate::code_table::CodeTable;
use crate::error::CodecError;
use crate::frequency::FrequencyMap;
use crate::symbol::Symbol;
use crate::tree::{HuffmanTree, Node};

/// Rebuild the tree from the header and walk the payload bit by bit.
///
/// Consumes exactly `bit_len` bits, so padding is never read as data. The
/// decoded symbol counts must match the header frequencies.
pub fn decode<S: Symbol>(artifact: &Artifact<S>) -> Result<Vec<S>, CodecError> {
    let freq = artifact.frequencies();
    let bit_len = artifact.bit_len();

    if freq.total() > bit_len {
        return Err(CodecError::corrupt("more symbols declared than payload bits"));
    }

    let Some(tree) = HuffmanTree::build(freq) else {
        if bit_len != 0 {
            return Err(CodecError::corrupt("payload present with empty alphabet"));
        }
        return Ok(Vec::new());
    };

    let table = CodeTable::generate(&tree);
    match table.encoded_bits(freq) {
        Some(expected) if expected == bit_len => {}
        Some(expected) => {
            return Err(CodecError::corrupt(format!(
                "declared {} payload bits, frequencies imply {}",
                bit_len, expected
            )));
        }
        None => return Err(CodecError::corrupt("frequency totals overflow")),
    }

    // bit_len matched above, so total symbols are bounded by the payload size
    let mut output = Vec::with_capacity(freq.total() as usize);
    let mut reader = BitReader::endian(Cursor::new(artifact.payload()), BigEndian);
    let root = tree.root();
    let mut node = root;

    for _ in 0..bit_len {
        let bit = reader
            .read_bit()
            .map_err(|_| CodecError::corrupt("payload ended before declared bit length"))?;

        node = match root {
            // lone-leaf tree: each symbol is the single bit 0
            Node::Leaf { symbol, .. } => {
                if bit {
                    return Err(CodecError::corrupt("unexpected 1 bit in single-symbol payload"));
                }
                output.push(*symbol);
                continue;
            }
            Node::Internal { .. } => node
                .child(bit)
                .ok_or_else(|| CodecError::corrupt("walk left the tree"))?,
        };

        if let Some(sym) = node.symbol() {
            output.push(sym);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(CodecError::corrupt("payload ends in the middle of a code"));
    }

    if FrequencyMap::analyze(&output) != *freq {
        return Err(CodecError::corrupt("decoded symbol counts differ from header"));
    }

    tracing::debug!(symbols = output.len(), bit_len, "decoded payload");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    fn artifact_for(input: &[u8]) -> Artifact<u8> {
        let freq = FrequencyMap::analyze(input);
        let table = HuffmanTree::build(&freq)
            .map(|t| CodeTable::generate(&t))
            .unwrap_or_else(CodeTable::empty);
        let payload = encode(input, &table).unwrap();
        Artifact::new(freq, payload.bit_len, payload.bytes)
    }

    #[test]
    fn test_decode_two_symbols() {
        let artifact = artifact_for(b"aaab");
        assert_eq!(decode(&artifact).unwrap(), b"aaab");
    }

    #[test]
    fn test_decode_single_symbol() {
        let artifact = artifact_for(b"aaaa");
        assert_eq!(artifact.bit_len(), 4);
        assert_eq!(decode(&artifact).unwrap(), b"aaaa");
    }

    #[test]
    fn test_decode_empty() {
        let artifact = artifact_for(b"");
        assert!(decode(&artifact).unwrap().is_empty());
    }

    #[test]
    fn test_padding_not_decoded() {
        // 3 bits of data, 5 zero pad bits that would otherwise decode as 'b'
        let artifact = artifact_for(b"aab");
        assert_eq!(artifact.bit_len(), 3);
        assert_eq!(decode(&artifact).unwrap(), b"aab");
    }

    #[test]
    fn test_single_symbol_rejects_one_bit() {
        let freq = FrequencyMap::analyze(b"aa");
        let artifact = Artifact::new(freq, 2, vec![0b0100_0000]);
        assert!(matches!(decode(&artifact), Err(CodecError::CorruptArtifact(_))));
    }

    #[test]
    fn test_rejects_bit_length_mismatch() {
        let freq = FrequencyMap::analyze(b"aaab");
        let artifact = Artifact::new(freq, 5, vec![0b1110_0000]);
        assert!(matches!(decode(&artifact), Err(CodecError::CorruptArtifact(_))));
    }

    #[test]
    fn test_rejects_counts_larger_than_payload() {
        let freq = FrequencyMap::from_counts(
            [(b'a', u64::MAX), (b'b', u64::MAX)].into_iter().collect(),
        );
        let artifact = Artifact::new(freq, 0, Vec::new());
        assert!(matches!(decode(&artifact), Err(CodecError::CorruptArtifact(_))));
    }

    #[test]
    fn test_rejects_swapped_counts() {
        // a=1 b=0 under {a:3, b:1}; payload spells "abbb"
        let freq = FrequencyMap::analyze(b"aaab");
        let artifact = Artifact::new(freq, 4, vec![0b1000_0000]);
        assert!(matches!(decode(&artifact), Err(CodecError::CorruptArtifact(_))));
    }

    #[test]
    fn test_rejects_mid_code_end() {
        // a=0 b=10 c=11 under {a:2, b:1, c:1}: 6 bits total
        let freq = FrequencyMap::analyze(b"aabc");
        let table = CodeTable::generate(&HuffmanTree::build(&freq).unwrap());
        assert_eq!(table.encoded_bits(&freq), Some(6));
        // four 1-bit codes then a dangling prefix of a 2-bit code
        let long = table.iter().find(|(_, c)| c.len() == 2).unwrap().1.clone();
        let short = table.iter().find(|(_, c)| c.len() == 1).unwrap().1.clone();
        let mut bits = Vec::new();
        for _ in 0..5 {
            bits.extend_from_slice(short.bits());
        }
        bits.push(long.bits()[0]);
        let mut byte = 0u8;
        for (i, &b) in bits.iter().enumerate() {
            if b {
                byte |= 1 << (7 - i);
            }
        }
        let artifact = Artifact::new(freq, 6, vec![byte]);
        assert!(matches!(decode(&artifact), Err(CodecError::CorruptArtifact(_))));
    }
}
