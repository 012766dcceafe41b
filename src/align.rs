//! Aligning linguistic-token metadata onto subword tokens.
//!
//! # Two Steps
//!
//! ```text
//! tagger:        do        n't        go        .
//!   norm         do        not        go        .
//!
//! Step A (expand: split each norm, copy its record per piece)
//!                do        not        go        .
//!
//! Step B (reconcile against the model's wrapped stream)
//!   bpe:   [CLS] do        not        go        .     [SEP]
//!   meta:  fill  do/AUX    not/PART   go/VERB   ./PUNCT fill
//! ```
//!
//! Step A splits the *normalized* form, never the raw text, so its output
//! lines up one-to-one with [`TokenAligner::to_subwords`].
//!
//! Step B trusts position: it walks a cursor over the expansion, emits a
//! filler for every structural special token, and copies the record under
//! the cursor for everything else. Subword text is not compared. What is
//! checked is that the cursor consumes the expansion exactly; a stream with
//! too many or too few content tokens is an [`Error::AlignmentContract`].

use std::fmt;
use std::sync::Arc;

use metalign_core::TokenMetadata;

use crate::cache::TokenizerCache;
use crate::codec::{self, MetadataColumns, TabularRow};
use crate::config::AlignerConfig;
use crate::subword::SubwordTokenizer;
use crate::tagger::Tagger;
use crate::{Error, Result};

// ============================================================================
// Step A: expansion
// ============================================================================

/// Split one record's `norm` into subwords, one record copy per piece.
///
/// Fillers (no `norm`) pass through unchanged.
pub fn expand_token(
    meta: &TokenMetadata,
    tokenizer: &dyn SubwordTokenizer,
) -> Result<Vec<TokenMetadata>> {
    match meta.norm.as_deref() {
        None => Ok(vec![meta.clone()]),
        Some(norm) => Ok(tokenizer
            .split(norm)?
            .into_iter()
            .map(|piece| meta.with_text(piece))
            .collect()),
    }
}

/// Expand a sentence's records in order.
pub fn expand_metadata(
    metas: &[TokenMetadata],
    tokenizer: &dyn SubwordTokenizer,
) -> Result<Vec<TokenMetadata>> {
    let mut out = Vec::with_capacity(metas.len());
    for meta in metas {
        out.extend(expand_token(meta, tokenizer)?);
    }
    Ok(out)
}

// ============================================================================
// Step B: reconciliation
// ============================================================================

/// Lay expanded records over a subword stream that may contain special tokens.
///
/// The output has one record per entry of `bpe_tokens`. Structural special
/// tokens get [`TokenMetadata::filler`]; the unknown token counts as content.
///
/// # Errors
///
/// [`Error::AlignmentContract`] if `bpe_tokens` holds more content tokens
/// than `expanded` has records, or fewer.
pub fn reconcile<S: AsRef<str>>(
    expanded: &[TokenMetadata],
    bpe_tokens: &[S],
    tokenizer: &dyn SubwordTokenizer,
) -> Result<Vec<TokenMetadata>> {
    let mut out = Vec::with_capacity(bpe_tokens.len());
    let mut cursor = 0;

    for (i, token) in bpe_tokens.iter().enumerate() {
        let token = token.as_ref();
        if tokenizer.is_structural(token) {
            out.push(TokenMetadata::filler(token));
            continue;
        }
        let meta = expanded.get(cursor).ok_or_else(|| {
            Error::alignment_contract(format!(
                "subword {} ({:?}) has no metadata: expansion has only {} records",
                i,
                token,
                expanded.len()
            ))
        })?;
        out.push(meta.clone());
        cursor += 1;
    }

    if cursor != expanded.len() {
        return Err(Error::alignment_contract(format!(
            "subword stream consumed {} of {} expanded records",
            cursor,
            expanded.len()
        )));
    }
    Ok(out)
}

/// Drop structural special tokens from a subword list.
///
/// Undoes [`SubwordTokenizer::split_with_special_tokens`]; unknown tokens stay.
pub fn strip_special_tokens<S: AsRef<str>>(
    tokens: &[S],
    tokenizer: &dyn SubwordTokenizer,
) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !tokenizer.is_structural(t))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// TokenAligner
// ============================================================================

/// Sentence-level facade over a tagger and a subword tokenizer.
///
/// # Example
///
/// ```rust,ignore
/// use metalign::TokenAligner;
///
/// let aligner = TokenAligner::from_pretrained("bert-base-uncased", "rule-en")?;
/// let bpe = aligner.to_wrapped_subwords("don't go.")?;
/// let meta = aligner.subword_metadata_from_tokens("don't go.", &bpe)?;
/// assert!(meta[0].is_filler());
/// ```
#[derive(Clone)]
pub struct TokenAligner {
    subword: Arc<dyn SubwordTokenizer>,
    tagger: Arc<dyn Tagger>,
}

impl fmt::Debug for TokenAligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAligner")
            .field("subword", &self.subword.name())
            .field("tagger", &self.tagger.name())
            .finish()
    }
}

impl TokenAligner {
    /// Build from already-loaded resources.
    pub fn new(subword: Arc<dyn SubwordTokenizer>, tagger: Arc<dyn Tagger>) -> Self {
        Self { subword, tagger }
    }

    /// Resolve the configured resources through `cache`.
    pub fn from_config(config: &AlignerConfig, cache: &TokenizerCache) -> Result<Self> {
        let subword = cache.subword_tokenizer(&config.subword_model)?;
        let tagger = cache.tagger(&config.tagger)?;
        Ok(Self::new(subword, tagger))
    }

    /// Resolve resources by name through the process-wide cache.
    pub fn from_pretrained(subword_model: &str, tagger: &str) -> Result<Self> {
        let config = AlignerConfig::default()
            .with_subword_model(subword_model)
            .with_tagger(tagger);
        Self::from_config(&config, TokenizerCache::global())
    }

    /// The subword tokenizer.
    pub fn subword_tokenizer(&self) -> &dyn SubwordTokenizer {
        self.subword.as_ref()
    }

    /// The linguistic tagger.
    pub fn tagger(&self) -> &dyn Tagger {
        self.tagger.as_ref()
    }

    // ------------------------------------------------------------------------
    // Linguistic tokens
    // ------------------------------------------------------------------------

    /// Normalized forms of the sentence's linguistic tokens.
    pub fn tokenize_normalized(&self, sentence: &str) -> Result<Vec<String>> {
        let doc = self.tagger.process(sentence)?;
        Ok(doc.tokens.into_iter().map(|t| t.norm).collect())
    }

    /// Raw surface texts of the sentence's linguistic tokens.
    pub fn tokenize_raw(&self, sentence: &str) -> Result<Vec<String>> {
        let doc = self.tagger.process(sentence)?;
        Ok(doc.tokens.into_iter().map(|t| t.text).collect())
    }

    /// One tagged record per linguistic token; `text` is the raw surface.
    pub fn tokenize_with_metadata(&self, sentence: &str) -> Result<Vec<TokenMetadata>> {
        Ok(self.tagger.process(sentence)?.to_metadata())
    }

    /// Normalized tokens joined by single spaces.
    pub fn normalize_sentence(&self, sentence: &str) -> Result<String> {
        Ok(self.tokenize_normalized(sentence)?.join(" "))
    }

    // ------------------------------------------------------------------------
    // Subwords
    // ------------------------------------------------------------------------

    /// Subwords of the normalized sentence, no special tokens.
    pub fn to_subwords(&self, sentence: &str) -> Result<Vec<String>> {
        self.subword.split(&self.normalize_sentence(sentence)?)
    }

    /// Subwords of the normalized sentence wrapped in the model's special tokens.
    pub fn to_wrapped_subwords(&self, sentence: &str) -> Result<Vec<String>> {
        self.subword
            .split_with_special_tokens(&self.normalize_sentence(sentence)?)
    }

    /// Subwords of `text` as given, no normalization.
    pub fn to_subwords_from_text(&self, text: &str) -> Result<Vec<String>> {
        self.subword.split(text)
    }

    // ------------------------------------------------------------------------
    // Alignment
    // ------------------------------------------------------------------------

    /// One record per subword of [`Self::to_subwords`].
    pub fn subword_metadata(&self, sentence: &str) -> Result<Vec<TokenMetadata>> {
        let tokens = self.tokenize_with_metadata(sentence)?;
        let expanded = expand_metadata(&tokens, self.subword.as_ref())?;
        log::debug!(
            "[align] {} linguistic tokens -> {} subwords",
            tokens.len(),
            expanded.len()
        );
        Ok(expanded)
    }

    /// One record per entry of `bpe_tokens`, fillers on special tokens.
    ///
    /// `bpe_tokens` must be this sentence's subwords, optionally with special
    /// tokens inserted anywhere.
    pub fn subword_metadata_from_tokens<S: AsRef<str>>(
        &self,
        sentence: &str,
        bpe_tokens: &[S],
    ) -> Result<Vec<TokenMetadata>> {
        let expanded = self.subword_metadata(sentence)?;
        let aligned = reconcile(&expanded, bpe_tokens, self.subword.as_ref())?;
        log::debug!(
            "[align] reconciled {} records onto {} subwords",
            expanded.len(),
            aligned.len()
        );
        Ok(aligned)
    }

    /// Drop structural special tokens using this aligner's tokenizer.
    pub fn strip_special_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        strip_special_tokens(tokens, self.subword.as_ref())
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    /// Linguistic-token records as tabular rows.
    pub fn token_rows(&self, sentence: &str) -> Result<Vec<TabularRow>> {
        Ok(codec::encode(&self.tokenize_with_metadata(sentence)?))
    }

    /// Linguistic-token records as columns.
    pub fn token_columns(&self, sentence: &str) -> Result<MetadataColumns> {
        codec::decode(&self.token_rows(sentence)?)
    }

    /// Subword records as tabular rows.
    pub fn subword_rows(&self, sentence: &str) -> Result<Vec<TabularRow>> {
        Ok(codec::encode(&self.subword_metadata(sentence)?))
    }

    /// Subword records as columns.
    pub fn subword_columns(&self, sentence: &str) -> Result<MetadataColumns> {
        codec::decode(&self.subword_rows(sentence)?)
    }
}
