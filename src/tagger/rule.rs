//! Rule-based English tagger.
//!
//! A heuristic stand-in for a statistical tagger, good enough to drive the
//! alignment pipeline without model downloads:
//!
//! 1. Tokenize on whitespace, peel punctuation, split clitics (`do|n't`)
//! 2. Normalize: lowercase, expand contraction clitics (`n't` → `not`)
//! 3. Tag universal POS from closed-class lexicons, then suffix and context cues
//! 4. Label dependencies from POS and position relative to the root
//! 5. Mark entity spans: runs of proper nouns joined by `of`/`the`

use metalign_core::{EntitySpan, TaggedDoc, TaggedToken};

use super::lexicon::{self as lex, contains};
use super::Tagger;
use crate::Result;

/// Heuristic English tagger.
#[derive(Debug, Clone)]
pub struct RuleTagger {
    name: String,
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self {
            name: super::RULE_TAGGER.to_string(),
        }
    }
}

impl RuleTagger {
    /// Create a new rule tagger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tagger for RuleTagger {
    fn process(&self, text: &str) -> Result<TaggedDoc> {
        let pieces = split_pieces(text);
        if pieces.is_empty() {
            return Ok(TaggedDoc::default());
        }

        let tags = tag_pos(&pieces);
        let deps = assign_deps(&pieces, &tags);
        let entities = find_entities(&pieces, &tags);

        let tokens = pieces
            .into_iter()
            .zip(tags.iter().zip(deps.iter()))
            .map(|(p, (pos, dep))| TaggedToken::new(p.text, p.norm, *pos, *dep))
            .collect();

        Ok(TaggedDoc::new(tokens, entities))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// Tokenization
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Piece {
    text: String,
    /// Lowercase with straight apostrophes
    folded: String,
    norm: String,
    sentence_start: bool,
}

impl Piece {
    fn is_capitalized(&self) -> bool {
        self.text
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
    }

    fn is_alphabetic(&self) -> bool {
        self.text.chars().all(|c| c.is_alphabetic() || c == '.')
    }
}

fn fold(text: &str) -> String {
    text.replace('’', "'").to_lowercase()
}

fn is_punct(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| !c.is_alphanumeric())
}

fn is_terminal(text: &str) -> bool {
    matches!(text, "." | "!" | "?") || (text.len() > 1 && text.chars().all(|c| c == '.'))
}

fn norm_of(text: &str, neg_stem: bool) -> String {
    let folded = fold(text);
    if let Some((_, norm)) = lex::CLITIC_NORMS.iter().find(|(c, _)| *c == folded) {
        return (*norm).to_string();
    }
    if neg_stem {
        if let Some((_, norm)) = lex::NEG_STEM_NORMS.iter().find(|(s, _)| *s == folded) {
            return (*norm).to_string();
        }
    }
    folded
}

/// Split a trailing clitic off `word`, returning `(stem, clitic)`.
fn split_clitic(word: &str) -> Option<(&str, &str)> {
    for clitic in lex::CLITICS {
        let curly = clitic.replace('\'', "’");
        for variant in [*clitic, curly.as_str()] {
            if word.len() <= variant.len() {
                continue;
            }
            let cut = word.len() - variant.len();
            if word.is_char_boundary(cut) && word[cut..].eq_ignore_ascii_case(variant) {
                let stem = &word[..cut];
                if stem.chars().any(|c| c.is_alphanumeric()) {
                    return Some((stem, &word[cut..]));
                }
            }
        }
    }
    None
}

struct PieceBuilder {
    pieces: Vec<Piece>,
    sentence_start: bool,
}

impl PieceBuilder {
    fn push(&mut self, text: &str, neg_stem: bool) {
        let piece = Piece {
            text: text.to_string(),
            folded: fold(text),
            norm: norm_of(text, neg_stem),
            sentence_start: self.sentence_start,
        };
        if is_terminal(text) {
            self.sentence_start = true;
        } else if !is_punct(text) {
            self.sentence_start = false;
        }
        self.pieces.push(piece);
    }

    fn push_word(&mut self, word: &str) {
        if word.eq_ignore_ascii_case("cannot") {
            self.push(&word[..3], false);
            self.push(&word[3..], false);
            return;
        }
        match split_clitic(word) {
            Some((stem, clitic)) => {
                let neg = fold(clitic) == "n't";
                self.push(stem, neg);
                self.push(clitic, false);
            }
            None => self.push(word, false),
        }
    }
}

fn split_pieces(text: &str) -> Vec<Piece> {
    let mut builder = PieceBuilder {
        pieces: Vec::new(),
        sentence_start: true,
    };

    for chunk in text.split_whitespace() {
        // A bare clitic ("John 's") or punctuation run ("...") is already a token.
        if is_punct(chunk) || lex::CLITICS.contains(&fold(chunk).as_str()) {
            builder.push(chunk, false);
            continue;
        }

        let mut rest = chunk;

        while let Some(c) = rest.chars().next() {
            if c.is_alphanumeric() || rest.len() == c.len_utf8() {
                break;
            }
            builder.push(&rest[..c.len_utf8()], false);
            rest = &rest[c.len_utf8()..];
        }

        let mut trailing: Vec<&str> = Vec::new();
        while let Some(c) = rest.chars().next_back() {
            if c.is_alphanumeric()
                || rest.len() == c.len_utf8()
                || contains(lex::ABBREVIATIONS, &fold(rest))
            {
                break;
            }
            let dots = rest.len() - rest.trim_end_matches('.').len();
            let cut = if dots >= 2 {
                rest.len() - dots
            } else {
                rest.len() - c.len_utf8()
            };
            if cut == 0 {
                break;
            }
            trailing.push(&rest[cut..]);
            rest = &rest[..cut];
        }

        if !rest.is_empty() {
            if is_punct(rest) {
                builder.push(rest, false);
            } else {
                builder.push_word(rest);
            }
        }
        for t in trailing.into_iter().rev() {
            builder.push(t, false);
        }
    }

    builder.pieces
}

// =============================================================================
// Part of Speech
// =============================================================================

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '/'))
}

fn has_suffix(word: &str, suffixes: &[&str], min_len: usize) -> bool {
    word.len() >= min_len && suffixes.iter().any(|s| word.ends_with(s))
}

fn tag_pos(pieces: &[Piece]) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::with_capacity(pieces.len());
    for i in 0..pieces.len() {
        let tag = classify(pieces, i, &tags);
        tags.push(tag);
    }
    tags
}

fn classify(pieces: &[Piece], i: usize, prev_tags: &[&'static str]) -> &'static str {
    let piece = &pieces[i];
    let w = piece.folded.as_str();
    let prev_tag = prev_tags.last().copied();
    let prev_word = i.checked_sub(1).map(|j| pieces[j].folded.as_str());
    let next = pieces.get(i + 1);

    if is_punct(w) {
        return if contains(lex::SYMBOLS, w) { "SYM" } else { "PUNCT" };
    }
    if is_number(w) {
        return "NUM";
    }
    match w {
        "'s" => {
            return if matches!(prev_tag, Some("NOUN") | Some("PROPN")) {
                "PART"
            } else {
                "AUX"
            }
        }
        "to" => {
            let nominal_next = next
                .map(|n| {
                    n.is_capitalized()
                        || contains(lex::DETERMINERS, &n.folded)
                        || contains(lex::PRONOUNS, &n.folded)
                        || is_number(&n.folded)
                })
                .unwrap_or(true);
            return if nominal_next { "ADP" } else { "PART" };
        }
        _ => {}
    }
    if contains(lex::NEGATIONS, w) {
        return "PART";
    }

    let closed = [
        (lex::AUXILIARIES, "AUX"),
        (lex::DETERMINERS, "DET"),
        (lex::PRONOUNS, "PRON"),
        (lex::ADPOSITIONS, "ADP"),
        (lex::COORDINATORS, "CCONJ"),
        (lex::SUBORDINATORS, "SCONJ"),
        (lex::INTERJECTIONS, "INTJ"),
        (lex::ADVERBS, "ADV"),
        (lex::NUMBER_WORDS, "NUM"),
    ];
    // Closed class wins over capitalization ("I", "The").
    for (list, tag) in closed {
        if contains(list, w) {
            return tag;
        }
    }

    if piece.is_capitalized() && piece.is_alphabetic() {
        if !piece.sentence_start {
            return "PROPN";
        }
        let known = contains(lex::KNOWN_ORGS, w) || contains(lex::KNOWN_LOCS, w);
        let next_capitalized = next
            .map(|n| n.is_capitalized() && n.is_alphabetic())
            .unwrap_or(false);
        if known || next_capitalized || contains(lex::PERSON_PREFIX, w) {
            return "PROPN";
        }
    }
    if w.len() >= 2
        && piece.text.chars().all(|c| c.is_ascii_uppercase())
        && !piece.sentence_start
    {
        return "PROPN";
    }

    // Open class
    let after_possessive_marker = prev_word == Some("'s") && prev_tag == Some("PART");
    let after_modifier = matches!(prev_tag, Some("DET") | Some("ADJ") | Some("NUM"))
        || prev_word
            .map(|p| contains(lex::POSSESSIVES, p))
            .unwrap_or(false)
        || after_possessive_marker;
    if after_modifier {
        let next_nominal = next.map(|n| !is_punct(&n.folded)).unwrap_or(false);
        if (contains(lex::ADJECTIVES, w) || has_suffix(w, lex::ADJ_SUFFIXES, 5)) && next_nominal {
            return "ADJ";
        }
        return "NOUN";
    }
    if has_suffix(w, &["ly"], 5) {
        return "ADV";
    }
    let after_verbal = matches!(prev_tag, Some("AUX") | Some("PART"))
        || prev_word
            .map(|p| contains(lex::SUBJECT_PRONOUNS, p))
            .unwrap_or(false);
    if after_verbal {
        if contains(lex::ADJECTIVES, w) && matches!(prev_tag, Some("AUX")) {
            return "ADJ";
        }
        return "VERB";
    }
    if has_suffix(w, &["ing", "ed"], 5) {
        return "VERB";
    }
    if contains(lex::ADJECTIVES, w) || has_suffix(w, lex::ADJ_SUFFIXES, 6) {
        return "ADJ";
    }
    if has_suffix(w, lex::NOUN_SUFFIXES, 6) {
        return "NOUN";
    }
    if piece.sentence_start {
        // Imperative: "Go home."
        return "VERB";
    }
    "NOUN"
}

// =============================================================================
// Dependencies
// =============================================================================

fn find_root(tags: &[&str]) -> usize {
    let first = |wanted: &[&str]| tags.iter().position(|t| wanted.contains(t));
    first(&["VERB"])
        .or_else(|| first(&["AUX"]))
        .or_else(|| first(&["NOUN", "PROPN", "PRON"]))
        .or_else(|| tags.iter().position(|t| *t != "PUNCT"))
        .unwrap_or(0)
}

fn assign_deps(pieces: &[Piece], tags: &[&'static str]) -> Vec<&'static str> {
    let root = find_root(tags);
    let next_is_nominal = |i: usize| matches!(tags.get(i + 1), Some(&"NOUN") | Some(&"PROPN"));

    (0..tags.len())
        .map(|i| {
            if i == root {
                return "ROOT";
            }
            let w = pieces[i].folded.as_str();
            match tags[i] {
                "PUNCT" => "punct",
                "DET" => "det",
                "AUX" => "aux",
                "PART" if contains(lex::NEGATIONS, w) => "neg",
                "PART" if w == "'s" => "case",
                "PART" => "aux",
                "ADP" => "prep",
                "CCONJ" => "cc",
                "SCONJ" => "mark",
                "ADJ" if next_is_nominal(i) => "amod",
                "ADJ" => "acomp",
                "ADV" => "advmod",
                "NUM" => "nummod",
                "INTJ" => "intj",
                "VERB" => {
                    if i > 0 && pieces[i - 1].folded == "to" {
                        "xcomp"
                    } else if tags[root.min(i)..i.max(root)].contains(&"CCONJ") {
                        "conj"
                    } else {
                        "advcl"
                    }
                }
                "NOUN" | "PROPN" | "PRON" => nominal_dep(pieces, tags, i, root),
                _ => "dep",
            }
        })
        .collect()
}

fn nominal_dep(pieces: &[Piece], tags: &[&str], i: usize, root: usize) -> &'static str {
    if tags[i] == "PRON" && contains(lex::POSSESSIVES, &pieces[i].folded) {
        return "poss";
    }
    if tags[i] != "PRON" && matches!(tags.get(i + 1), Some(&"NOUN") | Some(&"PROPN")) {
        return "compound";
    }
    // Walk back over the noun phrase to see what governs it.
    let governor = tags[..i]
        .iter()
        .rev()
        .find(|t| !matches!(**t, "DET" | "ADJ" | "NUM" | "NOUN" | "PROPN" | "PART"));
    if governor == Some(&"ADP") {
        return "pobj";
    }
    if i < root {
        "nsubj"
    } else {
        "dobj"
    }
}

// =============================================================================
// Entities
// =============================================================================

fn find_entities(pieces: &[Piece], tags: &[&str]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < pieces.len() {
        if tags[i] != "PROPN" {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        loop {
            if i < pieces.len() && tags[i] == "PROPN" {
                i += 1;
            } else if i + 1 < pieces.len()
                && contains(lex::CONNECTORS, &pieces[i].folded)
                && tags[i + 1] == "PROPN"
            {
                i += 2;
            } else {
                break;
            }
        }

        let first = &pieces[start];
        if i - start == 1
            && first.sentence_start
            && contains(lex::SENTENCE_STARTERS, &first.folded)
        {
            continue;
        }

        let label = classify_span(pieces, start, i);
        spans.push(EntitySpan {
            start,
            end: i,
            label: Some(label.to_string()),
        });
    }
    spans
}

fn classify_span(pieces: &[Piece], start: usize, end: usize) -> &'static str {
    let words: Vec<&str> = pieces[start..end].iter().map(|p| p.folded.as_str()).collect();
    let prev = start.checked_sub(1).map(|j| pieces[j].folded.as_str());

    if words
        .iter()
        .any(|w| contains(lex::ORG_SUFFIX, w) || contains(lex::KNOWN_ORGS, w))
    {
        return "ORG";
    }
    if words.iter().any(|w| contains(lex::KNOWN_LOCS, w)) {
        return "GPE";
    }
    let after_prefix = prev
        .map(|p| contains(lex::PERSON_PREFIX, p))
        .unwrap_or(false);
    if contains(lex::PERSON_PREFIX, words[0]) || after_prefix {
        return "PERSON";
    }
    if prev.map(|p| contains(lex::LOC_PREPOSITION, p)).unwrap_or(false) {
        return "GPE";
    }
    match words.len() {
        1 | 2 => "PERSON",
        _ => "ORG",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &TaggedDoc) -> Vec<&str> {
        doc.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn norms(doc: &TaggedDoc) -> Vec<&str> {
        doc.tokens.iter().map(|t| t.norm.as_str()).collect()
    }

    #[test]
    fn test_contraction_split_and_norm() {
        let doc = RuleTagger::new().process("don't go.").unwrap();
        assert_eq!(texts(&doc), vec!["do", "n't", "go", "."]);
        assert_eq!(norms(&doc), vec!["do", "not", "go", "."]);
    }

    #[test]
    fn test_negative_stems() {
        let doc = RuleTagger::new().process("I can't and won't.").unwrap();
        assert_eq!(texts(&doc), vec!["I", "ca", "n't", "and", "wo", "n't", "."]);
        assert_eq!(norms(&doc), vec!["i", "can", "not", "and", "will", "not", "."]);
    }

    #[test]
    fn test_curly_apostrophe() {
        let doc = RuleTagger::new().process("We’re here").unwrap();
        assert_eq!(texts(&doc), vec!["We", "’re", "here"]);
        assert_eq!(norms(&doc), vec!["we", "are", "here"]);
    }

    #[test]
    fn test_punctuation_peeling() {
        let doc = RuleTagger::new().process("(Hello), $100 Mr. Smith...").unwrap();
        assert_eq!(
            texts(&doc),
            vec!["(", "Hello", ")", ",", "$", "100", "Mr.", "Smith", "..."]
        );
    }

    #[test]
    fn test_cannot() {
        let doc = RuleTagger::new().process("I cannot").unwrap();
        assert_eq!(norms(&doc), vec!["i", "can", "not"]);
    }

    #[test]
    fn test_pos_for_simple_sentence() {
        let doc = RuleTagger::new().process("don't go.").unwrap();
        let pos: Vec<&str> = doc.tokens.iter().map(|t| t.pos.as_str()).collect();
        assert_eq!(pos, vec!["AUX", "PART", "VERB", "PUNCT"]);
        let dep: Vec<&str> = doc.tokens.iter().map(|t| t.dep.as_str()).collect();
        assert_eq!(dep, vec!["aux", "neg", "ROOT", "punct"]);
    }

    #[test]
    fn test_single_entity_mid_sentence() {
        let doc = RuleTagger::new().process("I visited Paris yesterday.").unwrap();
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].range(), 2..3);
        assert_eq!(doc.entities[0].label.as_deref(), Some("GPE"));
    }

    #[test]
    fn test_connector_joins_span() {
        let doc = RuleTagger::new()
            .process("She works at Bank of America now")
            .unwrap();
        assert_eq!(doc.entities.len(), 1);
        assert_eq!(doc.entities[0].range(), 3..6);
        assert_eq!(doc.entities[0].label.as_deref(), Some("ORG"));
    }

    #[test]
    fn test_sentence_starter_is_not_entity() {
        let doc = RuleTagger::new().process("The dog barked.").unwrap();
        assert!(doc.entities.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let doc = RuleTagger::new().process("   ").unwrap();
        assert!(doc.is_empty());
    }
}
