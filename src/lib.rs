//! huffpress: self-describing Huffman compression engine.
//!
//! Pipeline:
//! - Frequency analysis of the (optionally filtered) symbol sequence
//! - Greedy min-heap tree construction with deterministic tie-breaks
//! - Prefix code derivation from root-to-leaf paths
//! - MSB-first bit packing into a header + payload artifact
//!
//! Decompression needs nothing but the artifact bytes: the header carries the
//! symbol frequencies and the exact payload bit length.

pub mod artifact;
pub mod background;
pub mod code_table;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod symbol;
pub mod tree;

pub use crate::artifact::Artifact;
pub use crate::code_table::{Code, CodeTable};
pub use crate::config::{CodecConfig, SymbolFilter};
pub use crate::error::CodecError;
pub use crate::frequency::FrequencyMap;
pub use crate::symbol::Symbol;
pub use crate::tree::{HuffmanTree, Node};

/// Summary of one compression, for inspection and reporting.
///
/// Every field describes the sequence after the configured filter ran, so
/// `original_symbols` excludes dropped symbols.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompressionReport {
    pub original_symbols: usize,
    pub alphabet_size: usize,
    pub payload_bits: u64,
    pub artifact_bytes: usize,
    pub ratio: f64,
    pub entropy_bits: f64,
    pub avg_code_len: f64,
}

impl CompressionReport {
    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Config(e.to_string()))
    }
}

/// The codec engine. Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `symbols` into a self-describing artifact.
    pub fn compress<S: Symbol>(&self, symbols: &[S]) -> Result<Artifact<S>, CodecError> {
        if symbols.len() > self.config.max_input_size {
            return Err(CodecError::InputTooLarge {
                size: symbols.len(),
                limit: self.config.max_input_size,
            });
        }

        let symbols = frequency::filter_symbols(symbols, self.config.filter);
        if symbols.is_empty() && !self.config.allow_empty {
            return Err(CodecError::EmptyInput);
        }

        let freq = FrequencyMap::analyze(&symbols);
        let table = match HuffmanTree::build(&freq) {
            Some(tree) => CodeTable::generate(&tree),
            None => CodeTable::empty(),
        };
        let payload = encoder::encode(&symbols, &table)?;

        Ok(Artifact::new(freq, payload.bit_len, payload.bytes))
    }

    /// Recover the symbol sequence from serialized artifact bytes.
    pub fn decompress<S: Symbol>(&self, bytes: &[u8]) -> Result<Vec<S>, CodecError> {
        let artifact = Artifact::from_bytes(bytes)?;
        decoder::decode(&artifact)
    }

    /// Compress text, one symbol per `char`.
    pub fn compress_str(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        let symbols: Vec<char> = text.chars().collect();
        Ok(self.compress(&symbols)?.to_bytes())
    }

    pub fn decompress_str(&self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(self.decompress::<char>(bytes)?.into_iter().collect())
    }

    /// Describe how `symbols` compresses without keeping the artifact.
    pub fn report<S: Symbol>(&self, symbols: &[S]) -> Result<CompressionReport, CodecError> {
        let artifact = self.compress(symbols)?;
        let freq = artifact.frequencies();
        let total = freq.total();
        let artifact_bytes = artifact.encoded_len();
        let original_symbols = total as usize;
        let original_bytes = original_symbols * S::WIDTH as usize;

        Ok(CompressionReport {
            original_symbols,
            alphabet_size: freq.len(),
            payload_bits: artifact.bit_len(),
            artifact_bytes,
            ratio: if original_bytes == 0 {
                1.0
            } else {
                artifact_bytes as f64 / original_bytes as f64
            },
            entropy_bits: freq.entropy(),
            avg_code_len: if total == 0 {
                0.0
            } else {
                artifact.bit_len() as f64 / total as f64
            },
        })
    }
}

/// Compress with the default configuration.
pub fn compress<S: Symbol>(symbols: &[S]) -> Result<Artifact<S>, CodecError> {
    Codec::default().compress(symbols)
}

/// Decompress with the default configuration.
pub fn decompress<S: Symbol>(bytes: &[u8]) -> Result<Vec<S>, CodecError> {
    Codec::default().decompress(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let codec = Codec::default();
        let text = "the quick brown fox jumps over the lazy dog";
        let bytes = codec.compress_str(text).unwrap();
        assert_eq!(codec.decompress_str(&bytes).unwrap(), text);
    }

    #[test]
    fn test_empty_allowed_by_default() {
        let codec = Codec::default();
        let bytes = codec.compress_str("").unwrap();
        assert_eq!(bytes.len(), Artifact::<char>::header_len(0));
        assert_eq!(codec.decompress_str(&bytes).unwrap(), "");
    }

    #[test]
    fn test_empty_rejected_by_policy() {
        let codec = Codec::new(CodecConfig {
            allow_empty: false,
            ..CodecConfig::default()
        });
        assert!(matches!(codec.compress_str(""), Err(CodecError::EmptyInput)));
    }

    #[test]
    fn test_filtered_to_empty_is_empty_input() {
        let codec = Codec::new(CodecConfig {
            filter: SymbolFilter::SkipSpaces,
            allow_empty: false,
            ..CodecConfig::default()
        });
        assert!(matches!(codec.compress_str("   "), Err(CodecError::EmptyInput)));
    }

    #[test]
    fn test_skip_spaces_filter() {
        let codec = Codec::new(CodecConfig {
            filter: SymbolFilter::SkipSpaces,
            ..CodecConfig::default()
        });
        let bytes = codec.compress_str("a b  c").unwrap();
        assert_eq!(codec.decompress_str(&bytes).unwrap(), "abc");
    }

    #[test]
    fn test_input_limit() {
        let codec = Codec::new(CodecConfig {
            max_input_size: 3,
            ..CodecConfig::default()
        });
        let err = codec.compress(b"abcd").unwrap_err();
        assert!(matches!(err, CodecError::InputTooLarge { size: 4, limit: 3 }));
    }

    #[test]
    fn test_report() {
        let codec = Codec::default();
        let report = codec.report(b"aaab").unwrap();
        assert_eq!(report.original_symbols, 4);
        assert_eq!(report.alphabet_size, 2);
        assert_eq!(report.payload_bits, 4);
        assert_eq!(report.artifact_bytes, Artifact::<u8>::header_len(2) + 1);
        assert!((report.avg_code_len - 1.0).abs() < 1e-9);
        assert!(report.to_json().unwrap().contains("\"payload_bits\": 4"));
    }

    #[test]
    fn test_report_counts_filtered_symbols() {
        let codec = Codec::new(CodecConfig {
            filter: SymbolFilter::SkipSpaces,
            ..CodecConfig::default()
        });
        let report = codec.report(b"a a a b").unwrap();
        assert_eq!(report.original_symbols, 4);
        assert_eq!(report.payload_bits, 4);
        assert!((report.avg_code_len - 1.0).abs() < 1e-9);
        let expected = (Artifact::<u8>::header_len(2) + 1) as f64 / 4.0;
        assert!((report.ratio - expected).abs() < 1e-9);
    }

    #[test]
    fn test_compression_ratio() {
        let data = "aaaaaaaaab".repeat(500);
        let report = Codec::default().report(data.as_bytes()).unwrap();
        assert!(report.ratio < 0.2, "skewed data should compress well");
    }
}
