use proptest::prelude::*;
use std::collections::BTreeSet;
use word_graph::codec::{decode, encode};
use word_graph::edit::adjacency::{is_single_deletion, is_single_replacement};
use word_graph::{build_graph, ConnectivityAnalyzer, Vocabulary, WordGraph};

/// Small alphabet with both cases so every edit kind shows up often.
fn vocabulary() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abAB]{0,4}", 0..30)
}

fn build(words: &[String]) -> WordGraph {
    build_graph(Vocabulary::new(words.iter().cloned()).unwrap())
}

fn adjacent_by_brute_force(a: &str, b: &str) -> bool {
    is_single_deletion(a, b).is_some()
        || is_single_deletion(b, a).is_some()
        || is_single_replacement(a, b).is_some()
}

proptest! {
    #[test]
    fn every_edge_has_its_inverse(words in vocabulary()) {
        let g = build(&words);
        for a in g.vocabulary().iter() {
            let letters: Vec<char> = a.chars().collect();
            for (edit, b) in g.edges(a) {
                let inverse = edit.inverse(&letters).unwrap();
                prop_assert!(
                    g.edges(b).contains(&(inverse, a)),
                    "{a} -[{edit}]-> {b} has no {inverse} back"
                );
            }
        }
    }

    #[test]
    fn no_dangling_edges(words in vocabulary()) {
        let g = build(&words);
        for a in g.vocabulary().iter() {
            let record = g.require(a).unwrap();
            prop_assert_eq!(record.edits().count(), g.edges(a).len());
            for b in g.neighbors(a) {
                prop_assert!(g.contains(b));
            }
        }
    }

    #[test]
    fn neighbors_match_pairwise_comparison(words in vocabulary()) {
        let g = build(&words);
        for a in g.vocabulary().iter() {
            let expected: BTreeSet<&str> = g
                .vocabulary()
                .iter()
                .filter(|b| adjacent_by_brute_force(a, b))
                .collect();
            let actual: BTreeSet<&str> = g.neighbors(a).into_iter().collect();
            prop_assert_eq!(actual, expected, "neighbors of {:?}", a);
        }
    }

    #[test]
    fn encode_decode_round_trip(words in vocabulary()) {
        let g = build(&words);
        let decoded = decode(&encode(&g)).unwrap();
        prop_assert_eq!(decoded.vocabulary().words(), g.vocabulary().words());
        prop_assert_eq!(decoded.records(), g.records());
    }

    #[test]
    fn partition_is_complete_and_repeatable(words in vocabulary()) {
        let g = build(&words);
        let first = ConnectivityAnalyzer::new(&g).components();
        let second = ConnectivityAnalyzer::new(&g).components();
        prop_assert_eq!(&first, &second);

        let mut seen: Vec<usize> = first.iter().flat_map(|c| c.ids().to_vec()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..g.len()).collect::<Vec<_>>());

        for component in &first {
            prop_assert!(!component.is_empty());
            for &id in component.ids() {
                for n in g.neighbor_ids(id) {
                    prop_assert!(component.ids().contains(&n));
                }
            }
        }
    }
}
