//! End-to-end alignment with a real WordPiece tokenizer and the rule tagger.
//!
//! The vocabulary is built in memory, so nothing touches the network.

use std::sync::Arc;

use metalign::{
    expand_metadata, reconcile, Error, HfSubwordTokenizer, RuleTagger, SubwordTokenizer,
    TokenAligner,
};
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", ".", ",", "!", "?", "'", "s", "do", "not",
    "go", "i", "can", "will", "am", "are", "we", "the", "a", "dog", "cat", "play", "##ing",
    "##ed", "bark", "game", "she", "works", "at", "bank", "of", "america", "paris", "visited",
    "today", "and", "run", "##s", "fast", "john",
];

fn aligner() -> TokenAligner {
    let subword = HfSubwordTokenizer::from_vocab(VOCAB.iter().copied(), true).unwrap();
    TokenAligner::new(Arc::new(subword), Arc::new(RuleTagger::new()))
}

#[test]
fn dont_go_example() {
    let aligner = aligner();
    let sentence = "don't go.";

    assert_eq!(aligner.tokenize_raw(sentence).unwrap(), ["do", "n't", "go", "."]);
    assert_eq!(
        aligner.tokenize_normalized(sentence).unwrap(),
        ["do", "not", "go", "."]
    );
    assert_eq!(aligner.to_subwords(sentence).unwrap(), ["do", "not", "go", "."]);

    let bpe = ["[CLS]", "do", "not", "go", ".", "[SEP]"];
    let meta = aligner.subword_metadata_from_tokens(sentence, &bpe).unwrap();
    assert_eq!(meta.len(), 6);
    assert!(meta[0].is_filler());
    assert!(meta[5].is_filler());

    let linguistic = aligner.tokenize_with_metadata(sentence).unwrap();
    for (sub, word) in meta[1..5].iter().zip(&linguistic) {
        assert_eq!(sub.pos, word.pos);
        assert_eq!(sub.dep, word.dep);
        assert_eq!(sub.norm, word.norm);
        assert_eq!(sub.is_ent, word.is_ent);
    }
}

#[test]
fn metadata_text_is_raw_surface() {
    let meta = aligner().tokenize_with_metadata("We're here").unwrap();
    assert_eq!(meta[1].text, "'re");
    assert_eq!(meta[1].norm.as_deref(), Some("are"));
}

#[test]
fn subword_pieces_inherit_word_record() {
    let aligner = aligner();
    let meta = aligner.subword_metadata("Playing").unwrap();
    let texts: Vec<_> = meta.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["play", "##ing"]);
    assert_eq!(meta[0].pos, meta[1].pos);
    assert_eq!(meta[0].norm.as_deref(), Some("playing"));
}

#[test]
fn unknown_words_consume_a_position() {
    let aligner = aligner();
    let bpe = aligner.to_wrapped_subwords("the zebra").unwrap();
    assert_eq!(bpe, ["[CLS]", "the", "[UNK]", "[SEP]"]);
    let meta = aligner.subword_metadata_from_tokens("the zebra", &bpe).unwrap();
    assert_eq!(meta[2].norm.as_deref(), Some("zebra"));
}

#[test]
fn from_text_skips_normalization() {
    let aligner = aligner();
    assert_eq!(aligner.to_subwords_from_text("can't").unwrap(), ["can", "'", "[UNK]"]);
    assert_eq!(aligner.to_subwords("can't").unwrap(), ["can", "not"]);
}

#[test]
fn strip_inverts_wrapping() {
    let aligner = aligner();
    let wrapped = aligner.to_wrapped_subwords("the dog barked.").unwrap();
    assert_eq!(
        aligner.strip_special_tokens(&wrapped),
        aligner.to_subwords("the dog barked.").unwrap()
    );
}

#[test]
fn short_stream_violates_contract() {
    let aligner = aligner();
    let err = aligner
        .subword_metadata_from_tokens("don't go.", &["[CLS]", "do", "not", "[SEP]"])
        .unwrap_err();
    assert!(matches!(err, Error::AlignmentContract(_)));
}

#[test]
fn long_stream_violates_contract() {
    let aligner = aligner();
    let err = aligner
        .subword_metadata_from_tokens("go", &["go", "go"])
        .unwrap_err();
    assert!(matches!(err, Error::AlignmentContract(_)));
}

#[test]
fn empty_sentence() {
    let aligner = aligner();
    assert!(aligner.subword_metadata("").unwrap().is_empty());
    let meta = aligner
        .subword_metadata_from_tokens("", &["[CLS]", "[SEP]"])
        .unwrap();
    assert!(meta.iter().all(|m| m.is_filler()));
}

#[test]
fn columns_match_records() {
    let aligner = aligner();
    let cols = aligner.subword_columns("the dog barked.").unwrap();
    let meta = aligner.subword_metadata("the dog barked.").unwrap();
    assert_eq!(cols.len(), meta.len());
    assert_eq!(cols.token[0], "the");

    let token_cols = aligner.token_columns("the dog barked.").unwrap();
    assert_eq!(token_cols.token, ["the", "dog", "barked", "."]);
    assert!(matches!(
        aligner.token_columns("   "),
        Err(Error::EmptyInput(_))
    ));
}

// =============================================================================
// Properties
// =============================================================================

fn sentence() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "the", "dog", "don't", "can't", "we're", "I'm", "John's", "Paris", "playing", "zebra",
        "Bank", "of", "America", "runs", "fast", "!", "...", "(hello)", "won't", "Mr.", "42",
        "café", "barked.", "visited",
    ]);
    prop::collection::vec(words, 0..14).prop_map(|ws| ws.join(" "))
}

proptest! {
    /// Expansion lines up one-to-one with the normalized subword split.
    #[test]
    fn expansion_matches_subword_split(s in sentence()) {
        let aligner = aligner();
        let expanded = aligner.subword_metadata(&s).unwrap();
        let subwords = aligner.to_subwords(&s).unwrap();
        prop_assert_eq!(expanded.len(), subwords.len());
        for (meta, piece) in expanded.iter().zip(&subwords) {
            prop_assert_eq!(&meta.text, piece);
        }
    }

    /// Wrapping adds exactly two fillers; the interior is the plain expansion.
    #[test]
    fn wrapped_reconciliation(s in sentence()) {
        let aligner = aligner();
        let mut bpe = vec!["[CLS]".to_string()];
        bpe.extend(aligner.to_subwords(&s).unwrap());
        bpe.push("[SEP]".to_string());

        let plain = aligner.subword_metadata(&s).unwrap();
        let meta = aligner.subword_metadata_from_tokens(&s, &bpe).unwrap();

        prop_assert_eq!(meta.len(), plain.len() + 2);
        prop_assert!(meta[0].is_filler());
        prop_assert!(meta[meta.len() - 1].is_filler());
        prop_assert_eq!(&meta[1..meta.len() - 1], &plain[..]);
    }

    /// Dropping any content subword is reported, never silently truncated.
    #[test]
    fn dropped_subword_is_contract_violation(s in sentence(), pick in any::<prop::sample::Index>()) {
        let aligner = aligner();
        let mut bpe = aligner.to_wrapped_subwords(&s).unwrap();
        prop_assume!(bpe.len() > 2);
        let victim = 1 + pick.index(bpe.len() - 2);
        bpe.remove(victim);
        let result = aligner.subword_metadata_from_tokens(&s, &bpe);
        prop_assert!(matches!(result, Err(Error::AlignmentContract(_))));
    }

    /// Every record stays all-present or all-absent through both steps.
    #[test]
    fn records_stay_consistent(s in sentence()) {
        let aligner = aligner();
        let tokenizer: &dyn SubwordTokenizer = aligner.subword_tokenizer();
        let words = aligner.tokenize_with_metadata(&s).unwrap();
        let expanded = expand_metadata(&words, tokenizer).unwrap();
        let wrapped = aligner.to_wrapped_subwords(&s).unwrap();
        let meta = reconcile(&expanded, &wrapped, tokenizer).unwrap();
        prop_assert!(meta.iter().all(|m| m.is_consistent()));
        prop_assert_eq!(meta.iter().filter(|m| m.is_filler()).count(), 2);
    }
}
