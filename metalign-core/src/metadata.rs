//! Token metadata records and tagger output types.
//!
//! # Two Tokenizations, One Record Type
//!
//! ```text
//! Sentence:   "don't go."
//!
//! Tagger:     do      n't     go      .
//!   pos       AUX     PART    VERB    PUNCT
//!   norm      do      not     go      .
//!
//! Subwords:   [CLS]   do      not     go      .       [SEP]
//!   meta      filler  do/AUX  n't/PART go/VERB ./PUNCT filler
//! ```
//!
//! Every subword piece carries a [`TokenMetadata`] copied from the linguistic
//! token it came from. Structural special tokens get a *filler* record whose
//! linguistic attributes are all `None`.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::{Error, Result};

// ============================================================================
// Token Metadata
// ============================================================================

/// Grammatical metadata for one linguistic token or one subword piece.
///
/// The four linguistic attributes are either all `Some` (the record came from
/// a tagger pass) or all `None` (a filler standing in for a special token).
/// Use [`TokenMetadata::tagged`] and [`TokenMetadata::filler`] to keep that
/// invariant; the fields are public for pattern matching and serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Surface text of this unit (the subword string after expansion)
    pub text: String,
    /// Coarse part-of-speech tag
    #[serde(default)]
    pub pos: Option<String>,
    /// Dependency relation label
    #[serde(default)]
    pub dep: Option<String>,
    /// Normalized surface form (lowercased, contractions expanded)
    #[serde(default)]
    pub norm: Option<String>,
    /// Whether the originating token fell inside a named-entity span
    #[serde(default)]
    pub is_ent: Option<bool>,
}

impl TokenMetadata {
    /// Create a fully tagged record.
    #[must_use]
    pub fn tagged(
        text: impl Into<String>,
        pos: impl Into<String>,
        dep: impl Into<String>,
        norm: impl Into<String>,
        is_ent: bool,
    ) -> Self {
        Self {
            text: text.into(),
            pos: Some(pos.into()),
            dep: Some(dep.into()),
            norm: Some(norm.into()),
            is_ent: Some(is_ent),
        }
    }

    /// Create a filler record for a special token.
    #[must_use]
    pub fn filler(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: None,
            dep: None,
            norm: None,
            is_ent: None,
        }
    }

    /// True if every linguistic attribute is absent.
    #[must_use]
    pub fn is_filler(&self) -> bool {
        self.pos.is_none() && self.dep.is_none() && self.norm.is_none() && self.is_ent.is_none()
    }

    /// True if the attributes are all present or all absent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let present = [
            self.pos.is_some(),
            self.dep.is_some(),
            self.norm.is_some(),
            self.is_ent.is_some(),
        ];
        present.iter().all(|p| *p) || present.iter().all(|p| !*p)
    }

    /// Copy this record with a different surface text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

// ============================================================================
// Entity Spans
// ============================================================================

/// A half-open range `[start, end)` of linguistic-token indices forming one
/// named entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    /// First token index (inclusive)
    pub start: usize,
    /// Last token index (exclusive)
    pub end: usize,
    /// Entity label, if the tagger assigns one (e.g. `PERSON`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EntitySpan {
    /// Create a span, rejecting `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_input(format!(
                "entity span start ({}) must be <= end ({})",
                start, end
            )));
        }
        Ok(Self {
            start,
            end,
            label: None,
        })
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True if token index `idx` falls inside the span.
    #[must_use]
    pub const fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx < self.end
    }

    /// Number of tokens covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Token index range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

// ============================================================================
// Tagger Output
// ============================================================================

/// One token as produced by a linguistic tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Raw surface text
    pub text: String,
    /// Normalized form
    pub norm: String,
    /// Coarse part-of-speech tag
    pub pos: String,
    /// Dependency relation label
    pub dep: String,
}

impl TaggedToken {
    /// Create a tagged token.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        norm: impl Into<String>,
        pos: impl Into<String>,
        dep: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            norm: norm.into(),
            pos: pos.into(),
            dep: dep.into(),
        }
    }
}

/// Tagger output for one sentence: tokens plus recognized entity spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDoc {
    /// Tokens in sentence order
    pub tokens: Vec<TaggedToken>,
    /// Entity spans over token indices
    #[serde(default)]
    pub entities: Vec<EntitySpan>,
}

impl TaggedDoc {
    /// Create a document from tokens and entity spans.
    #[must_use]
    pub fn new(tokens: Vec<TaggedToken>, entities: Vec<EntitySpan>) -> Self {
        Self { tokens, entities }
    }

    /// True if token `idx` falls inside any entity span.
    ///
    /// Linear scan: sentences carry a handful of spans at most.
    #[must_use]
    pub fn is_entity(&self, idx: usize) -> bool {
        self.entities.iter().any(|span| span.contains(idx))
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Convert into per-token metadata records (`text` = raw surface).
    #[must_use]
    pub fn to_metadata(&self) -> Vec<TokenMetadata> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                TokenMetadata::tagged(
                    t.text.clone(),
                    t.pos.clone(),
                    t.dep.clone(),
                    t.norm.clone(),
                    self.is_entity(i),
                )
            })
            .collect()
    }
}
