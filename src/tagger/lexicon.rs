//! Closed-class word lists for the rule tagger.
//!
//! Entries are lowercase with straight apostrophes.

// Clitics split off the end of a word, longest first.
pub(crate) const CLITICS: &[&str] = &["n't", "'re", "'ve", "'ll", "'s", "'m", "'d"];

pub(crate) const CLITIC_NORMS: &[(&str, &str)] = &[
    ("n't", "not"),
    ("'m", "am"),
    ("'re", "are"),
    ("'ve", "have"),
    ("'ll", "will"),
];

// Stems left behind by "can't", "won't", "shan't", "ain't".
pub(crate) const NEG_STEM_NORMS: &[(&str, &str)] = &[
    ("ca", "can"),
    ("wo", "will"),
    ("sha", "shall"),
    ("ai", "am"),
];

// Words that keep their trailing period.
pub(crate) const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "st.", "jr.", "sr.", "inc.", "ltd.", "co.", "corp.",
    "vs.", "etc.", "e.g.", "i.e.", "u.s.", "u.k.", "a.m.", "p.m.", "no.", "jan.", "feb.", "aug.",
    "sept.", "oct.", "nov.", "dec.",
];

pub(crate) const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "these", "those", "every", "each", "some", "any", "no", "another",
    "either", "neither", "all", "both",
];

pub(crate) const POSSESSIVES: &[&str] = &["my", "your", "his", "its", "our", "their", "whose"];

pub(crate) const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "whose", "what", "which", "that", "something", "anything", "nothing", "everything",
    "someone", "anyone", "everyone", "nobody", "somebody", "everybody",
];

pub(crate) const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

pub(crate) const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "'m", "'re", "have", "has", "had",
    "'ve", "'d", "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must", "'ll", "ca", "wo", "sha", "ai",
];

pub(crate) const NEGATIONS: &[&str] = &["not", "n't", "never"];

pub(crate) const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "from", "of", "about", "into", "onto", "over",
    "under", "after", "before", "between", "through", "during", "without", "within", "against",
    "among", "across", "behind", "near", "since", "until", "upon", "toward", "towards", "via",
    "around", "along", "beside", "beyond", "per", "than",
];

pub(crate) const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "&"];

pub(crate) const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "if", "while", "unless", "whether", "whereas", "once",
];

pub(crate) const ADVERBS: &[&str] = &[
    "very", "too", "also", "just", "only", "really", "quite", "always", "often", "here",
    "there", "now", "then", "still", "already", "even", "again", "soon", "well", "almost",
    "perhaps", "so", "how", "when", "where", "why", "away", "back", "ever", "later",
];

pub(crate) const INTERJECTIONS: &[&str] = &[
    "oh", "hello", "hi", "hey", "yes", "wow", "ok", "okay", "please", "thanks", "yeah", "ah",
];

pub(crate) const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
    "billion",
];

pub(crate) const SYMBOLS: &[&str] = &["$", "%", "#", "@", "+", "=", "<", ">", "€", "£", "¥", "°"];

pub(crate) const ADJECTIVES: &[&str] = &[
    "good", "bad", "big", "small", "new", "old", "great", "little", "long", "high", "young",
    "large", "important", "different", "happy", "sad", "quick", "slow", "red", "blue", "green",
    "black", "white", "last", "first", "next", "hot", "cold", "nice", "fine", "free", "full",
    "hard", "easy", "early", "late", "best", "better", "same", "other", "true", "real",
];

pub(crate) const ADJ_SUFFIXES: &[&str] = &[
    "ful", "ous", "ive", "able", "ible", "less", "ish", "ical", "ic", "al", "est",
];

pub(crate) const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "hood", "ism", "ist",
];

// Capitalized words at sentence start that are not names.
pub(crate) const SENTENCE_STARTERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "he", "she", "we", "they", "in",
    "on", "at", "to", "for", "from", "by", "with", "and", "but", "or", "so", "if", "because",
    "today", "yesterday", "tomorrow", "now", "then", "what", "where", "when", "who", "why",
    "how", "is", "are", "was", "were", "please", "there", "here",
];

// Entity-span connectors between capitalized words ("Bank of America").
pub(crate) const CONNECTORS: &[&str] = &["of", "the"];

pub(crate) const ORG_SUFFIX: &[&str] = &[
    "inc", "inc.", "corp", "corp.", "ltd", "ltd.", "llc", "co.", "plc", "foundation",
    "institute", "university", "college", "bank", "group", "agency", "company", "corporation",
];

pub(crate) const PERSON_PREFIX: &[&str] = &[
    "mr.", "mr", "mrs.", "mrs", "ms.", "ms", "dr.", "dr", "prof.", "prof",
];

pub(crate) const LOC_PREPOSITION: &[&str] = &["in", "from", "at", "to", "near"];

pub(crate) const KNOWN_ORGS: &[&str] = &[
    "google", "apple", "microsoft", "amazon", "facebook", "meta", "tesla", "twitter", "ibm",
    "intel", "nvidia", "oracle", "samsung", "sony", "toyota", "nasa", "fbi", "nato", "un", "eu",
    "bbc", "cnn", "reuters", "netflix", "uber",
];

pub(crate) const KNOWN_LOCS: &[&str] = &[
    "paris", "london", "tokyo", "berlin", "rome", "madrid", "moscow", "beijing", "sydney",
    "toronto", "chicago", "boston", "california", "texas", "europe", "asia", "africa",
    "america", "china", "india", "japan", "germany", "france", "italy", "spain", "canada",
    "brazil", "mexico", "russia",
];

pub(crate) fn contains(list: &[&str], word: &str) -> bool {
    list.contains(&word)
}
