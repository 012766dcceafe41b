//! # metalign-core
//!
//! Core types for metalign: the per-token metadata records shared by the
//! tagger, the subword aligner and the record codec.
//!
//! This crate provides:
//! - **Metadata**: `TokenMetadata`, one record per linguistic token or subword piece
//! - **Tagger output**: `TaggedToken`, `TaggedDoc`, `EntitySpan`

pub mod error;
pub mod metadata;

pub use error::{Error, Result};
pub use metadata::{EntitySpan, TaggedDoc, TaggedToken, TokenMetadata};
