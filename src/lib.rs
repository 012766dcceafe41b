//! # metalign
//!
//! Carry word-level linguistic metadata onto subword tokens.
//!
//! A tagger sees `don't go.` as `do n't go .` with part of speech, dependency
//! label, normalized form and entity membership per word. A WordPiece model
//! sees `[CLS] do not go . [SEP]`. `metalign` lines the two up so every
//! subword carries the record of the word it came from.
//!
//! - **Tagging**: [`Tagger`] trait, heuristic English [`RuleTagger`]
//! - **Subwords**: [`SubwordTokenizer`] over HuggingFace `tokenizers`
//! - **Alignment**: [`expand_metadata`] + [`reconcile`], or [`TokenAligner`]
//! - **Records**: [`codec`] rows/columns with a JSON-lines store
//! - **Tensors**: [`tensor`] helpers for model hidden states (candle)
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use metalign::{HfSubwordTokenizer, RuleTagger, TokenAligner};
//!
//! let vocab = ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "do", "not", "go", "."];
//! let subword = HfSubwordTokenizer::from_vocab(vocab, true).unwrap();
//! let aligner = TokenAligner::new(Arc::new(subword), Arc::new(RuleTagger::new()));
//!
//! let bpe = aligner.to_wrapped_subwords("don't go.").unwrap();
//! assert_eq!(bpe, ["[CLS]", "do", "not", "go", ".", "[SEP]"]);
//!
//! let meta = aligner.subword_metadata_from_tokens("don't go.", &bpe).unwrap();
//! assert!(meta[0].is_filler() && meta[5].is_filler());
//! assert_eq!(meta[2].pos.as_deref(), Some("PART"));
//! ```
//!
//! ## Resource Loading
//!
//! ```rust,ignore
//! use metalign::{AlignerConfig, TokenAligner, TokenizerCache};
//!
//! let cache = TokenizerCache::new();
//! let config = AlignerConfig::from_env();
//! let aligner = TokenAligner::from_config(&config, &cache)?;
//! ```
//!
//! Tokenizers and taggers are loaded once per name and shared through
//! [`TokenizerCache`].
//!
//! ## Feature Flags
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `fast-lock` | `parking_lot` mutexes in the cache |

#![warn(missing_docs)]

pub mod align;
pub mod cache;
pub mod codec;
pub mod config;
mod error;
pub mod subword;
pub mod sync;
pub mod tagger;
pub mod tensor;

pub use metalign_core::{EntitySpan, TaggedDoc, TaggedToken, TokenMetadata};

pub use align::{expand_metadata, expand_token, reconcile, strip_special_tokens, TokenAligner};
pub use cache::{ResourceCache, TokenizerCache};
pub use codec::{Column, MetadataColumns, TabularRow, FIELD_NAMES};
pub use config::AlignerConfig;
pub use error::{Error, Result};
pub use subword::{HfSubwordTokenizer, SubwordTokenizer};
pub use tagger::{load_tagger, RuleTagger, Tagger};
