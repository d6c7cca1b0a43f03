//! Configuration for huffpress

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::symbol::Symbol;

/// Which symbols are dropped before counting and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolFilter {
    #[default]
    KeepAll,
    SkipSpaces,
    SkipWhitespace,
}

impl SymbolFilter {
    pub fn keeps<S: Symbol>(self, symbol: S) -> bool {
        match self {
            SymbolFilter::KeepAll => true,
            SymbolFilter::SkipSpaces => !symbol.is_space(),
            SymbolFilter::SkipWhitespace => !symbol.is_whitespace(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub filter: SymbolFilter,
    pub allow_empty: bool,
    pub max_input_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            filter: SymbolFilter::KeepAll,
            allow_empty: true,
            max_input_size: 100 * 1024 * 1024, // 100 Mi symbols
        }
    }
}

impl CodecConfig {
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CodecConfig::from_json(r#"{ "filter": "skip_spaces" }"#).unwrap();
        assert_eq!(config.filter, SymbolFilter::SkipSpaces);
        assert!(config.allow_empty);
        assert_eq!(config.max_input_size, CodecConfig::default().max_input_size);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = CodecConfig::from_json(r#"{ "filter": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, CodecError::Config(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CodecConfig {
            filter: SymbolFilter::SkipWhitespace,
            allow_empty: false,
            max_input_size: 10,
        };
        let parsed = CodecConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.filter, config.filter);
        assert_eq!(parsed.allow_empty, config.allow_empty);
        assert_eq!(parsed.max_input_size, 10);
    }

    #[test]
    fn test_filter_keeps() {
        assert!(SymbolFilter::KeepAll.keeps(' '));
        assert!(!SymbolFilter::SkipSpaces.keeps(' '));
        assert!(SymbolFilter::SkipSpaces.keeps('\n'));
        assert!(!SymbolFilter::SkipWhitespace.keeps('\n'));
    }
}
