//! TF-IDF vector index over the composed feature blobs.
//!
//! Terms are maximal runs of word characters (two or more), lowercased, with the
//! classic English stop-word list removed. IDF is smoothed and every row is scaled
//! to unit length, so cosine similarity reduces to a dot product.

use std::collections::{BTreeMap, BTreeSet, HashMap};

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Sparse row: `(term index, weight)` pairs sorted by term index
pub type SparseVector = Vec<(usize, f64)>;

/// Vocabulary plus one unit-length TF-IDF row per document
#[derive(Debug, Clone)]
pub struct VectorIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl VectorIndex {
    /// Fits the vocabulary and IDF weights on `blobs` and transforms the same blobs
    pub fn build<S: AsRef<str>>(blobs: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = blobs.iter().map(|b| tokenize(b.as_ref())).collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // BTreeMap iteration is sorted, so indices follow term order
        let n = blobs.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let vectors = tokenized
            .iter()
            .map(|tokens| weigh(tokens, &vocabulary, &idf))
            .collect();

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[cfg(test)]
    pub(crate) fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    #[cfg(test)]
    pub(crate) fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

fn weigh(tokens: &[String], vocabulary: &HashMap<String, usize>, idf: &[f64]) -> SparseVector {
    let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
    for token in tokens {
        if let Some(&idx) = vocabulary.get(token) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }
    }

    let mut row: SparseVector = counts
        .into_iter()
        .map(|(idx, tf)| (idx, tf * idf[idx]))
        .collect();

    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }

    row
}

/// Lowercases and splits on non-word characters, dropping short tokens and stop words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() > 1)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &SparseVector) -> f64 {
        v.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_single_chars() {
        assert_eq!(
            tokenize("The Goblin and a Bride: 9.0 rating!"),
            vec!["goblin", "bride", "rating"]
        );
    }

    #[test]
    fn test_tokenize_keeps_underscores_and_unicode() {
        assert_eq!(tokenize("time_slip 도깨비"), vec!["time_slip", "도깨비"]);
    }

    #[test]
    fn test_vocabulary_excludes_stop_words() {
        let index = VectorIndex::build(&["romance with the ghost", "ghost thriller"]);
        assert_eq!(index.vocabulary_size(), 3);
        assert!(index.contains_term("ghost"));
        assert!(!index.contains_term("the"));
        assert!(!index.contains_term("with"));
    }

    #[test]
    fn test_smoothed_idf() {
        let index = VectorIndex::build(&["romance ghost", "ghost thriller", "ghost comedy"]);
        // shared by every document: ln(4/4) + 1
        assert!((index.idf("ghost").unwrap() - 1.0).abs() < 1e-12);
        let expected = (4.0f64 / 2.0).ln() + 1.0;
        assert!((index.idf("romance").unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let index = VectorIndex::build(&[
            "romance romance ghost",
            "ghost thriller detective",
            "comedy",
        ]);
        assert_eq!(index.len(), 3);
        for row in index.vectors() {
            assert!((norm(row) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_row_indices_are_sorted() {
        let index = VectorIndex::build(&["zebra apple mango apple"]);
        let row = &index.vectors()[0];
        assert!(row.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_stop_word_only_blob_is_zero_vector() {
        let index = VectorIndex::build(&["the and of", "ghost"]);
        assert!(index.vectors()[0].is_empty());
    }

    #[test]
    fn test_build_is_deterministic() {
        let blobs = ["romance ghost", "thriller ghost detective"];
        let a = VectorIndex::build(&blobs);
        let b = VectorIndex::build(&blobs);
        assert_eq!(a.vectors(), b.vectors());
    }

    #[test]
    fn test_empty_corpus() {
        let blobs: [&str; 0] = [];
        let index = VectorIndex::build(&blobs);
        assert!(index.is_empty());
        assert_eq!(index.vocabulary_size(), 0);
    }
}
