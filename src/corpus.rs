//! Bag-of-words dictionary over the scraped feature files.
//!
//! Every user is one document, every title (or author) one token. Tokens that are
//! too rare or too common across users are filtered out before the documents are
//! turned into `(token_id, count)` vectors.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::{info_time, Result};

/// Drop tokens found in fewer documents than this.
pub const NO_BELOW: usize = 3;
/// Drop tokens found in more than this fraction of documents.
pub const NO_ABOVE: f64 = 0.3;
/// Keep at most this many tokens, most frequent first.
pub const KEEP_N: usize = 100_000;

/// Sparse document: `(token_id, count)` pairs ordered by id.
pub type Bow = Vec<(usize, usize)>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    tokens: Vec<String>,
    token_ids: HashMap<String, usize>,
    doc_freqs: Vec<usize>,
    num_docs: usize,
}

impl Dictionary {
    /// Assigns ids in order of first appearance, new tokens of one document in sorted order.
    pub fn from_documents(documents: &[Vec<String>]) -> Self {
        let mut dictionary = Self::default();
        for document in documents {
            let unique: BTreeSet<&str> = document.iter().map(String::as_str).collect();
            for token in unique {
                let id = match dictionary.token_ids.get(token) {
                    Some(&id) => id,
                    None => dictionary.insert(token),
                };
                dictionary.doc_freqs[id] += 1;
            }
            dictionary.num_docs += 1;
        }
        dictionary
    }

    fn insert(&mut self, token: &str) -> usize {
        let id = self.tokens.len();
        self.tokens.push(token.to_string());
        self.token_ids.insert(token.to_string(), id);
        self.doc_freqs.push(0);
        id
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token_ids.get(token).copied()
    }

    pub fn doc_freq(&self, token: &str) -> Option<usize> {
        self.id(token).map(|id| self.doc_freqs[id])
    }

    /// Keeps tokens seen in at least `no_below` documents and in at most `no_above`
    /// of all documents, then the `keep_n` most frequent of those.
    /// Surviving tokens are renumbered without gaps, keeping their relative order.
    pub fn filter_extremes(&mut self, no_below: usize, no_above: f64, keep_n: usize) {
        let max_docs = no_above * self.num_docs as f64;
        let mut kept: Vec<usize> = (0..self.tokens.len())
            .filter(|&id| {
                let df = self.doc_freqs[id];
                df >= no_below && df as f64 <= max_docs
            })
            .collect();
        if kept.len() > keep_n {
            kept.sort_by(|&a, &b| self.doc_freqs[b].cmp(&self.doc_freqs[a]).then(a.cmp(&b)));
            kept.truncate(keep_n);
            kept.sort_unstable();
        }

        let tokens: Vec<String> = kept.iter().map(|&id| self.tokens[id].clone()).collect();
        self.doc_freqs = kept.iter().map(|&id| self.doc_freqs[id]).collect();
        self.token_ids = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id))
            .collect();
        self.tokens = tokens;
    }

    /// Counts the known tokens of a document, unknown ones are ignored.
    pub fn doc2bow(&self, document: &[String]) -> Bow {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for id in document.iter().filter_map(|token| self.id(token)) {
            *counts.entry(id).or_default() += 1;
        }
        let mut bow: Bow = counts.into_iter().collect();
        bow.sort_unstable();
        bow
    }

    /// Plain text dump: number of documents, then `id\ttoken\tdoc_freq` per token sorted by token.
    pub fn to_text(&self) -> String {
        let mut by_token: Vec<usize> = (0..self.tokens.len()).collect();
        by_token.sort_by(|&a, &b| self.tokens[a].cmp(&self.tokens[b]));

        let mut text = format!("{}\n", self.num_docs);
        for id in by_token {
            text.push_str(&format!("{id}\t{}\t{}\n", self.tokens[id], self.doc_freqs[id]));
        }
        text
    }

    pub async fn save_as_text(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.to_text()).await?;
        Ok(())
    }
}

/// Builds the filtered dictionary and the bag-of-words corpus, optionally saving the dictionary.
pub async fn compile_corpus_and_dictionary(
    documents: &[Vec<String>],
    no_below: usize,
    no_above: f64,
    save_to: Option<&Path>,
) -> Result<(Vec<Bow>, Dictionary)> {
    let mut dictionary = Dictionary::from_documents(documents);
    let before = dictionary.len();
    dictionary.filter_extremes(no_below, no_above, KEEP_N);
    info_time!(
        "Dictionary: {} of {before} tokens kept over {} documents",
        dictionary.len(),
        dictionary.num_docs()
    );

    if let Some(path) = save_to {
        dictionary.save_as_text(path).await?;
    }

    let corpus = documents.iter().map(|doc| dictionary.doc2bow(doc)).collect();
    Ok((corpus, dictionary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|doc| doc.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn doc_freq_counts_documents_not_occurrences() {
        let dictionary = Dictionary::from_documents(&docs(&[&["b", "a", "a"], &["a", "c"]]));
        assert_eq!(dictionary.num_docs(), 2);
        assert_eq!(dictionary.doc_freq("a"), Some(2));
        assert_eq!(dictionary.doc_freq("c"), Some(1));
        // New tokens of a document are numbered in sorted order.
        assert_eq!(dictionary.id("a"), Some(0));
        assert_eq!(dictionary.id("b"), Some(1));
        assert_eq!(dictionary.id("c"), Some(2));
    }

    #[test]
    fn rare_and_common_tokens_are_filtered() {
        // "common" is everywhere, "rare" in one doc, "mid" in 2 of 5.
        let documents = docs(&[
            &["common", "mid", "rare"],
            &["common", "mid"],
            &["common"],
            &["common"],
            &["common"],
        ]);
        let mut dictionary = Dictionary::from_documents(&documents);
        dictionary.filter_extremes(2, 0.5, KEEP_N);

        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.id("mid"), Some(0));
        assert_eq!(dictionary.id("common"), None);
        assert_eq!(dictionary.id("rare"), None);
    }

    #[test]
    fn keep_n_prefers_frequent_tokens_and_renumbers() {
        let documents = docs(&[&["x", "y", "z"], &["y", "z"], &["z"]]);
        let mut dictionary = Dictionary::from_documents(&documents);
        dictionary.filter_extremes(1, 1.0, 2);

        assert_eq!(dictionary.id("x"), None);
        assert_eq!(dictionary.id("y"), Some(0));
        assert_eq!(dictionary.id("z"), Some(1));
    }

    #[test]
    fn bow_ignores_unknown_tokens() {
        let dictionary = Dictionary::from_documents(&docs(&[&["a", "b"]]));
        let bow = dictionary.doc2bow(&docs(&[&["b", "zzz", "a", "b"]])[0]);
        assert_eq!(bow, [(0, 1), (1, 2)]);
    }

    #[test]
    fn text_dump_is_sorted_by_token() {
        let dictionary = Dictionary::from_documents(&docs(&[&["b"], &["a", "b"]]));
        assert_eq!(dictionary.to_text(), "2\n1\ta\t1\n0\tb\t2\n");
    }

    #[tokio::test]
    async fn corpus_uses_the_filtered_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let save_to = dir.path().join("dictionary.txt");
        let documents = docs(&[&["kokoro", "yukiguni"], &["kokoro"], &["kokoro", "sanshiro"], &["ningen"]]);

        let (corpus, dictionary) = compile_corpus_and_dictionary(&documents, 2, 0.75, Some(&save_to))
            .await
            .unwrap();

        assert_eq!(dictionary.len(), 1);
        assert_eq!(corpus, [vec![(0, 1)], vec![(0, 1)], vec![(0, 1)], vec![]]);
        assert_eq!(std::fs::read_to_string(save_to).unwrap(), "4\n0\tkokoro\t3\n");
    }
}
