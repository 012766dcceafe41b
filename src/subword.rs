//! Subword tokenization backed by HuggingFace `tokenizers`.
//!
//! # Plain vs. Wrapped Streams
//!
//! ```text
//! Text:     "do not go ."
//!
//! split():                        ["do", "not", "go", "."]
//! split_with_special_tokens():    ["[CLS]", "do", "not", "go", ".", "[SEP]"]
//! ```
//!
//! Metadata alignment works on the plain stream; the model consumes the
//! wrapped one. [`SubwordTokenizer::is_structural`] tells the two apart.
//!
//! # Loading
//!
//! [`HfSubwordTokenizer::from_pretrained`] accepts:
//! - a directory containing `tokenizer.json` or `vocab.txt`
//! - a path to either file
//! - a HuggingFace Hub model ID (e.g. `bert-base-uncased`)
//!
//! Older BERT checkpoints only ship `vocab.txt`; those get a BERT WordPiece
//! pipeline built in place.

use std::collections::HashSet;
use std::path::Path;

use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{AddedToken, Model, Tokenizer};

use crate::{Error, Result};

/// Special tokens of the BERT WordPiece vocabulary.
pub const BERT_SPECIAL_TOKENS: &[&str] = &["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"];

/// BERT unknown token.
pub const BERT_UNK: &str = "[UNK]";

/// A subword tokenizer: plain string in, subword strings out.
pub trait SubwordTokenizer: Send + Sync {
    /// Split text into subword strings without adding special tokens.
    fn split(&self, text: &str) -> Result<Vec<String>>;

    /// Split text and wrap the result with the model's special tokens.
    fn split_with_special_tokens(&self, text: &str) -> Result<Vec<String>>;

    /// The special-token vocabulary.
    fn special_tokens(&self) -> &HashSet<String>;

    /// The unknown token, if the vocabulary has one.
    fn unk_token(&self) -> Option<&str> {
        None
    }

    /// Tokenizer name or path it was loaded from.
    fn name(&self) -> &str;

    /// True if `token` is in the special-token vocabulary.
    fn is_special(&self, token: &str) -> bool {
        self.special_tokens().contains(token)
    }

    /// True if `token` marks structure rather than text.
    ///
    /// The unknown token is special but stands in for real text, so it is
    /// not structural: plain splitting emits it too.
    fn is_structural(&self, token: &str) -> bool {
        self.is_special(token) && self.unk_token() != Some(token)
    }
}

/// [`SubwordTokenizer`] wrapping a `tokenizers::Tokenizer`.
pub struct HfSubwordTokenizer {
    tokenizer: Tokenizer,
    special: HashSet<String>,
    unk: Option<String>,
    name: String,
}

impl std::fmt::Debug for HfSubwordTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfSubwordTokenizer")
            .field("name", &self.name)
            .field("special", &self.special)
            .field("unk", &self.unk)
            .finish()
    }
}

impl HfSubwordTokenizer {
    /// Wrap an already-built tokenizer.
    pub fn new(name: impl Into<String>, tokenizer: Tokenizer) -> Self {
        let special: HashSet<String> = tokenizer
            .get_added_tokens_decoder()
            .values()
            .filter(|t| t.special)
            .map(|t| t.content.clone())
            .collect();
        let unk = special
            .iter()
            .find(|t| t.to_ascii_lowercase().contains("unk"))
            .cloned();
        Self {
            tokenizer,
            special,
            unk,
            name: name.into(),
        }
    }

    /// Load from a local directory, a local file, or a HuggingFace Hub model ID.
    pub fn from_pretrained(name_or_path: &str) -> Result<Self> {
        let start = std::time::Instant::now();
        let path = Path::new(name_or_path);
        let lowercase = lowercases(name_or_path);

        let tokenizer = if path.is_dir() {
            let json = path.join("tokenizer.json");
            let vocab = path.join("vocab.txt");
            if json.is_file() {
                load_tokenizer_file(&json, lowercase)?
            } else if vocab.is_file() {
                load_tokenizer_file(&vocab, lowercase)?
            } else {
                return Err(Error::resource_load(format!(
                    "{}: directory has neither tokenizer.json nor vocab.txt",
                    name_or_path
                )));
            }
        } else if path.is_file() {
            load_tokenizer_file(path, lowercase)?
        } else {
            load_from_hub(name_or_path, lowercase)?
        };

        let loaded = Self::new(name_or_path, tokenizer);
        log::info!(
            "[subword] Loaded {} ({} special tokens) in {:?}",
            name_or_path,
            loaded.special.len(),
            start.elapsed()
        );
        Ok(loaded)
    }

    /// Build a BERT WordPiece tokenizer from an in-memory vocabulary.
    ///
    /// Token ids follow iteration order. The vocabulary should contain the
    /// BERT special tokens; they are registered as special either way.
    pub fn from_vocab<I, S>(tokens: I, lowercase: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let model = WordPiece::builder()
            .vocab(
                tokens
                    .into_iter()
                    .enumerate()
                    .map(|(id, t)| (t.into(), id as u32))
                    .collect::<tokenizers::models::bpe::Vocab>(),
            )
            .unk_token(BERT_UNK.to_string())
            .build()
            .map_err(|e| Error::resource_load(format!("WordPiece vocab: {}", e)))?;
        Ok(Self::new("in-memory", bert_pipeline(model, lowercase)))
    }

    /// The wrapped tokenizer.
    pub fn inner(&self) -> &Tokenizer {
        &self.tokenizer
    }

    fn encode(&self, text: &str, add_special_tokens: bool) -> Result<Vec<String>> {
        if text.trim().is_empty() && !add_special_tokens {
            return Ok(Vec::new());
        }
        let encoding = self
            .tokenizer
            .encode(text, add_special_tokens)
            .map_err(|e| Error::tokenization(format!("{}: {}", self.name, e)))?;
        Ok(encoding.get_tokens().to_vec())
    }
}

impl SubwordTokenizer for HfSubwordTokenizer {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        self.encode(text, false)
    }

    fn split_with_special_tokens(&self, text: &str) -> Result<Vec<String>> {
        self.encode(text, true)
    }

    fn special_tokens(&self) -> &HashSet<String> {
        &self.special
    }

    fn unk_token(&self) -> Option<&str> {
        self.unk.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cased checkpoints keep case; everything else is lowercased.
fn lowercases(name: &str) -> bool {
    let lower = name.to_lowercase();
    !(lower.contains("cased") && !lower.contains("uncased"))
}

fn load_tokenizer_file(path: &Path, lowercase: bool) -> Result<Tokenizer> {
    let is_vocab = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);
    if is_vocab {
        let vocab_str = path
            .to_str()
            .ok_or_else(|| Error::resource_load("Invalid vocab path".to_string()))?;
        let model = WordPiece::from_file(vocab_str)
            .unk_token(BERT_UNK.to_string())
            .build()
            .map_err(|e| {
                Error::resource_load(format!("Failed to create WordPiece from vocab.txt: {}", e))
            })?;
        Ok(bert_pipeline(model, lowercase))
    } else {
        Tokenizer::from_file(path)
            .map_err(|e| Error::resource_load(format!("{}: {}", path.display(), e)))
    }
}

fn load_from_hub(model_id: &str, lowercase: bool) -> Result<Tokenizer> {
    use hf_hub::api::sync::Api;

    let api = Api::new()
        .map_err(|e| Error::resource_load(format!("HuggingFace API init failed: {}", e)))?;
    let repo = api.model(model_id.to_string());

    match repo.get("tokenizer.json") {
        Ok(path) => load_tokenizer_file(&path, lowercase),
        Err(json_err) => {
            log::warn!(
                "[subword] {}: tokenizer.json unavailable ({}), trying vocab.txt",
                model_id,
                json_err
            );
            let vocab = repo.get("vocab.txt").map_err(|e| {
                Error::resource_load(format!(
                    "{}: neither tokenizer.json nor vocab.txt found: {}",
                    model_id, e
                ))
            })?;
            load_tokenizer_file(&vocab, lowercase)
        }
    }
}

fn bert_pipeline(model: WordPiece, lowercase: bool) -> Tokenizer {
    // Standard bert-base ids when the vocabulary lacks the markers.
    let sep_id = model.token_to_id("[SEP]").unwrap_or(102);
    let cls_id = model.token_to_id("[CLS]").unwrap_or(101);

    let mut tokenizer = Tokenizer::new(model);
    tokenizer.with_normalizer(Some(BertNormalizer::new(true, true, None, lowercase)));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
    tokenizer.with_post_processor(Some(BertProcessing::new(
        ("[SEP]".to_string(), sep_id),
        ("[CLS]".to_string(), cls_id),
    )));

    let special: Vec<AddedToken> = BERT_SPECIAL_TOKENS
        .iter()
        .map(|t| AddedToken::from(*t, true))
        .collect();
    tokenizer.add_special_tokens(&special);
    tokenizer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> HfSubwordTokenizer {
        HfSubwordTokenizer::from_vocab(
            [
                "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "play", "##ing", "the", "game", ".",
            ],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_split_has_no_special_tokens() {
        let tok = tiny();
        let pieces = tok.split("Playing the game.").unwrap();
        assert_eq!(pieces, vec!["play", "##ing", "the", "game", "."]);
    }

    #[test]
    fn test_wrapped_split_adds_cls_sep() {
        let tok = tiny();
        let pieces = tok.split_with_special_tokens("the game").unwrap();
        assert_eq!(pieces, vec!["[CLS]", "the", "game", "[SEP]"]);
    }

    #[test]
    fn test_special_vocabulary() {
        let tok = tiny();
        for t in BERT_SPECIAL_TOKENS {
            assert!(tok.is_special(t), "{} should be special", t);
        }
        assert_eq!(tok.unk_token(), Some("[UNK]"));
        assert!(!tok.is_structural("[UNK]"));
        assert!(tok.is_structural("[CLS]"));
        assert!(!tok.is_special("game"));
    }

    #[test]
    fn test_unknown_word_maps_to_unk() {
        let tok = tiny();
        assert_eq!(tok.split("zebra").unwrap(), vec!["[UNK]"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(tiny().split("   ").unwrap().is_empty());
    }

    #[test]
    fn test_cased_detection() {
        assert!(lowercases("bert-base-uncased"));
        assert!(!lowercases("bert-base-cased"));
        assert!(lowercases("/models/wordpiece"));
    }
}
