//! Linguistic taggers.
//!
//! A [`Tagger`] turns a sentence into word-level tokens carrying surface
//! text, normalized form, coarse POS, dependency label, plus entity spans
//! over token indices. Statistical taggers plug in by implementing the trait
//! and registering an instance with [`crate::TokenizerCache::register_tagger`].
//!
//! # Built-in Taggers
//!
//! | Name | Type | Notes |
//! |------|------|-------|
//! | `rule-en` (alias `en`) | [`RuleTagger`] | Heuristic English, zero deps |

mod lexicon;
pub mod rule;

use std::sync::Arc;

use metalign_core::TaggedDoc;

use crate::{Error, Result};

pub use rule::RuleTagger;

/// Name of the built-in rule tagger.
pub const RULE_TAGGER: &str = "rule-en";

/// Names accepted by [`load_tagger`].
pub const BUILTIN_TAGGERS: &[&str] = &[RULE_TAGGER, "en"];

/// A linguistic tokenizer/tagger.
pub trait Tagger: Send + Sync {
    /// Tokenize and tag one sentence.
    fn process(&self, text: &str) -> Result<TaggedDoc>;

    /// Tagger name.
    fn name(&self) -> &str;
}

/// Construct a built-in tagger by name.
pub fn load_tagger(name: &str) -> Result<Arc<dyn Tagger>> {
    match name {
        RULE_TAGGER | "en" => Ok(Arc::new(RuleTagger::new())),
        other => Err(Error::resource_load(format!(
            "unknown tagger '{}' (built-in: {})",
            other,
            BUILTIN_TAGGERS.join(", ")
        ))),
    }
}
