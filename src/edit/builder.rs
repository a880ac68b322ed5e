// File: src/edit/builder.rs
use crate::config::BuildOptions;
use crate::core::graph::WordGraph;
use crate::core::types::{WordId, WordRecord};
use crate::core::vocabulary::Vocabulary;
use crate::edit::adjacency::{has_uppercase, is_single_replacement, Replacement};
use std::collections::HashMap;

/// Computes every word's legal single-letter edits without comparing words
/// pairwise. Three passes, each a set of hash lookups or bucket scans:
///
/// 1. delete/insert: each word with one letter removed is looked up directly.
/// 2. replace: words are bucketed by (position, word without that letter);
///    every pair sharing a bucket differs at exactly that position.
/// 3. case: words carrying uppercase are bucketed by their lowercase form and
///    linked to it and to each other where exactly one letter differs.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    options: BuildOptions,
}

/// Edge counts gathered during one build, each direction counted once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub deletions: usize,
    pub replace_buckets: usize,
    pub replacements: usize,
    pub case_links: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Builds the graph, taking ownership of the vocabulary snapshot.
    pub fn build(&self, vocab: Vocabulary) -> WordGraph {
        let (records, stats) = self.build_records(&vocab);
        tracing::info!(
            words = vocab.len(),
            deletions = stats.deletions,
            replace_buckets = stats.replace_buckets,
            replacements = stats.replacements,
            case_links = stats.case_links,
            "built word graph"
        );
        WordGraph::from_parts(vocab, records)
    }

    /// One record per vocabulary word, indexed by [`WordId`].
    pub fn build_records(&self, vocab: &Vocabulary) -> (Vec<WordRecord>, BuildStats) {
        let mut records: Vec<WordRecord> = vocab.iter().map(WordRecord::new).collect();
        let mut stats = BuildStats::default();

        self.delete_pass(vocab, &mut records, &mut stats);
        self.replace_pass(&mut records, &mut stats);
        self.case_pass(vocab, &mut records, &mut stats);

        if self.options.sort_candidates {
            for record in &mut records {
                record.sort_candidates();
            }
        }
        (records, stats)
    }

    fn delete_pass(&self, vocab: &Vocabulary, records: &mut [WordRecord], stats: &mut BuildStats) {
        for id in 0..records.len() {
            let letters: Vec<char> = records[id].letters().to_vec();
            for (i, &removed) in letters.iter().enumerate() {
                let shorter: String = letters[..i].iter().chain(&letters[i + 1..]).collect();
                if let Some(shorter_id) = vocab.id_of(&shorter) {
                    records[id].mark_deletable(i);
                    records[shorter_id].add_insertion(i, removed);
                    stats.deletions += 1;
                }
            }
        }
        tracing::debug!(deletions = stats.deletions, "delete/insert pass done");
    }

    fn replace_pass(&self, records: &mut [WordRecord], stats: &mut BuildStats) {
        // Keyed on the blanked position plus the remaining letters, so no
        // sentinel character has to be kept out of the vocabulary.
        let mut buckets: HashMap<(usize, String), Vec<WordId>> = HashMap::new();
        for (id, record) in records.iter().enumerate() {
            let letters = record.letters();
            for i in 0..letters.len() {
                let blanked: String = letters[..i].iter().chain(&letters[i + 1..]).collect();
                buckets.entry((i, blanked)).or_default().push(id);
            }
        }

        for ((position, _), members) in &buckets {
            if members.len() < 2 {
                continue;
            }
            stats.replace_buckets += 1;
            for (n, &a) in members.iter().enumerate() {
                for &b in &members[n + 1..] {
                    let from = records[a].letters()[*position];
                    let to = records[b].letters()[*position];
                    link_replacement(records, a, b, Replacement { position: *position, from, to });
                    stats.replacements += 1;
                }
            }
        }
        tracing::debug!(
            buckets = buckets.len(),
            shared = stats.replace_buckets,
            "replace pass done"
        );
    }

    fn case_pass(&self, vocab: &Vocabulary, records: &mut [WordRecord], stats: &mut BuildStats) {
        let mut variants: HashMap<String, Vec<WordId>> = HashMap::new();
        for (id, word) in vocab.iter().enumerate() {
            if has_uppercase(word) {
                variants.entry(word.to_lowercase()).or_default().push(id);
            }
        }

        for (lower, members) in &variants {
            if let Some(lower_id) = vocab.id_of(lower) {
                for &variant in members {
                    if let Some(r) = is_single_replacement(vocab.word(variant), lower) {
                        link_replacement(records, variant, lower_id, r);
                        stats.case_links += 1;
                    }
                }
            }
            for (n, &a) in members.iter().enumerate() {
                for &b in &members[n + 1..] {
                    if let Some(r) = is_single_replacement(vocab.word(a), vocab.word(b)) {
                        link_replacement(records, a, b, r);
                        stats.case_links += 1;
                    }
                }
            }
        }
        tracing::debug!(
            lowercase_buckets = variants.len(),
            case_links = stats.case_links,
            "case pass done"
        );
    }
}

/// Records `a -> b` and `b -> a` for a replacement read from `a` to `b`.
fn link_replacement(records: &mut [WordRecord], a: WordId, b: WordId, r: Replacement) {
    records[a].add_replacement(r.position, r.to);
    records[b].add_replacement(r.position, r.from);
}

/// Builds a graph with default options.
pub fn build_graph(vocab: Vocabulary) -> WordGraph {
    GraphBuilder::new().build(vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LetterSet;

    fn records_for(words: &[&str]) -> (Vocabulary, Vec<WordRecord>) {
        let vocab = Vocabulary::new(words.iter().copied()).unwrap();
        let (records, _) = GraphBuilder::new().build_records(&vocab);
        (vocab, records)
    }

    fn set(letters: &str) -> LetterSet {
        letters.chars().collect()
    }

    #[test]
    fn delete_and_insert_are_materialized_both_ways() {
        let (vocab, records) = records_for(&["cat", "at", "bat"]);
        let cat = &records[vocab.id_of("cat").unwrap()];
        let at = &records[vocab.id_of("at").unwrap()];
        let bat = &records[vocab.id_of("bat").unwrap()];

        assert_eq!(cat.deletable(), &[true, false, false]);
        assert_eq!(bat.deletable(), &[true, false, false]);
        assert_eq!(at.insertable()[0], set("cb"));
        assert!(at.insertable()[1].is_empty());
        assert!(at.insertable()[2].is_empty());

        assert_eq!(cat.replaceable()[0], set("b"));
        assert_eq!(bat.replaceable()[0], set("c"));
    }

    #[test]
    fn repeated_letters_delete_at_every_position() {
        let (vocab, records) = records_for(&["aa", "a"]);
        let aa = &records[vocab.id_of("aa").unwrap()];
        let a = &records[vocab.id_of("a").unwrap()];
        assert_eq!(aa.deletable(), &[true, true]);
        assert_eq!(a.insertable()[0], set("a"));
        assert_eq!(a.insertable()[1], set("a"));
    }

    #[test]
    fn replace_bucket_links_every_member() {
        let (vocab, records) = records_for(&["cat", "cot", "cut"]);
        let get = |w: &str| &records[vocab.id_of(w).unwrap()];
        assert_eq!(get("cat").replaceable()[1], set("ou"));
        assert_eq!(get("cot").replaceable()[1], set("au"));
        assert_eq!(get("cut").replaceable()[1], set("ao"));
        assert!(get("cat").replaceable()[0].is_empty());
        assert!(!get("cat").has_deletions());
    }

    #[test]
    fn discovery_order_follows_vocabulary_order() {
        let (vocab, records) = records_for(&["cut", "cot", "cat"]);
        let cat = &records[vocab.id_of("cat").unwrap()];
        assert_eq!(cat.replaceable()[1].as_slice(), &['u', 'o']);
    }

    #[test]
    fn sorted_candidates_option() {
        let vocab = Vocabulary::new(["cut", "cot", "cat"]).unwrap();
        let builder = GraphBuilder::with_options(BuildOptions { sort_candidates: true });
        let (records, _) = builder.build_records(&vocab);
        let cat = &records[vocab.id_of("cat").unwrap()];
        assert_eq!(cat.replaceable()[1].as_slice(), &['o', 'u']);
    }

    #[test]
    fn case_variant_links_to_lowercase_only() {
        let (vocab, records) = records_for(&["paris", "Paris", "dog"]);
        let paris = &records[vocab.id_of("paris").unwrap()];
        let upper = &records[vocab.id_of("Paris").unwrap()];
        let dog = &records[vocab.id_of("dog").unwrap()];
        assert_eq!(paris.replaceable()[0], set("P"));
        assert_eq!(upper.replaceable()[0], set("p"));
        assert_eq!(paris.edits().count(), 1);
        assert_eq!(upper.edits().count(), 1);
        assert_eq!(dog.edits().count(), 0);
    }

    #[test]
    fn case_variants_two_flips_apart_are_not_linked() {
        let (vocab, records) = records_for(&["PAris", "paRis"]);
        for word in ["PAris", "paRis"] {
            assert_eq!(records[vocab.id_of(word).unwrap()].edits().count(), 0, "{word}");
        }
    }

    #[test]
    fn sibling_case_variants_one_flip_apart_are_linked() {
        let (vocab, records) = records_for(&["PAris", "Paris", "PARIS"]);
        let get = |w: &str| &records[vocab.id_of(w).unwrap()];
        assert_eq!(get("PAris").replaceable()[1], set("a"));
        assert_eq!(get("Paris").replaceable()[1], set("A"));
        assert_eq!(get("PARIS").edits().count(), 0);
    }

    #[test]
    fn empty_word_gets_single_letter_insertions() {
        let (vocab, records) = records_for(&["", "a", "b"]);
        let empty = &records[vocab.id_of("").unwrap()];
        assert_eq!(empty.insertable().len(), 1);
        assert_eq!(empty.insertable()[0], set("ab"));
        assert!(empty.deletable().is_empty());
        assert!(empty.replaceable().is_empty());
        assert!(records[vocab.id_of("a").unwrap()].can_delete(0));
    }

    #[test]
    fn stats_count_each_edge_once() {
        let vocab = Vocabulary::new(["cat", "at", "bat", "Bat"]).unwrap();
        let (_, stats) = GraphBuilder::new().build_records(&vocab);
        assert_eq!(stats.deletions, 3);
        // cat/bat/Bat share (0, "at").
        assert_eq!(stats.replace_buckets, 1);
        assert_eq!(stats.replacements, 3);
        assert_eq!(stats.case_links, 1);
    }

    #[test]
    fn titlecase_letter_forms_a_case_link() {
        let vocab = Vocabulary::new(["ǆa", "ǅa"]).unwrap();
        let (records, stats) = GraphBuilder::new().build_records(&vocab);
        assert_eq!(stats.case_links, 1);
        assert!(records[0].replaceable()[0].contains('ǅ'));
        assert!(records[1].replaceable()[0].contains('ǆ'));
    }
}
