//! Off-thread execution for callers that must stay responsive.
//!
//! The codec itself is blocking and pure; these helpers move one call onto
//! tokio's blocking pool. Aborting the spawned task's handle cancels the wait,
//! not the computation.

use crate::artifact::Artifact;
use crate::error::CodecError;
use crate::symbol::Symbol;
use crate::Codec;

pub async fn compress<S: Symbol>(codec: Codec, symbols: Vec<S>) -> Result<Artifact<S>, CodecError> {
    tokio::task::spawn_blocking(move || codec.compress(&symbols))
        .await
        .map_err(|e| CodecError::Background(e.to_string()))?
}

pub async fn decompress<S: Symbol>(codec: Codec, bytes: Vec<u8>) -> Result<Vec<S>, CodecError> {
    tokio::task::spawn_blocking(move || codec.decompress(&bytes))
        .await
        .map_err(|e| CodecError::Background(e.to_string()))?
}
