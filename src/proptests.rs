use crate::autocomplete::{normalize, Trie};

use proptest::prelude::*;
use std::collections::HashMap;

fn word_strategy() -> impl Strategy<Value = String> + Clone {
    // Small alphabet with mixed case so paths collide and share branches often.
    "[aAbBcC]{0,6}"
}

fn vocabulary_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 0..=64)
}

/// Last-written original casing per normalized entry.
fn model(words: &[String]) -> HashMap<String, String> {
    let mut m = HashMap::new();
    for word in words {
        m.insert(normalize(word), word.clone());
    }
    m
}

/// Arena trie mirroring the index shape: children as `(letter, arena index)`
/// in first-seen order.
#[derive(Default)]
struct ModelNode {
    children: Vec<(char, usize)>,
    value: Option<String>,
}

fn model_tree(words: &[String]) -> Vec<ModelNode> {
    let mut arena = vec![ModelNode::default()];
    for word in words {
        let mut current = 0;
        for letter in normalize(word).chars() {
            let found = arena[current]
                .children
                .iter()
                .find(|(c, _)| *c == letter)
                .map(|&(_, idx)| idx);
            current = match found {
                Some(idx) => idx,
                None => {
                    arena.push(ModelNode::default());
                    let idx = arena.len() - 1;
                    arena[current].children.push((letter, idx));
                    idx
                }
            };
        }
        arena[current].value = Some(word.clone());
    }
    arena
}

fn model_anchor(arena: &[ModelNode], prefix: &str) -> Option<usize> {
    let mut current = 0;
    for letter in normalize(prefix).chars() {
        current = arena[current]
            .children
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|&(_, idx)| idx)?;
    }
    Some(current)
}

fn model_preorder(arena: &[ModelNode], idx: usize, out: &mut Vec<String>) {
    if let Some(value) = &arena[idx].value {
        out.push(value.clone());
    }
    for &(_, child) in &arena[idx].children {
        model_preorder(arena, child, out);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_result_never_exceeds_limit(
        words in vocabulary_strategy(),
        prefix in word_strategy(),
        limit in 0usize..=80,
    ) {
        let trie: Trie = words.iter().collect();
        prop_assert!(trie.search_prefix(&prefix, limit).len() <= limit);
    }

    #[test]
    fn prop_inserted_word_is_found_once(words in vocabulary_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!words.is_empty());
        let trie: Trie = words.iter().collect();
        let m = model(&words);

        let word = pick.get(&words);
        let key = normalize(word);
        let stored = &m[&key];
        let found = trie.search_prefix(&key, usize::MAX);
        prop_assert_eq!(found.iter().filter(|v| *v == stored).count(), 1);
        prop_assert_eq!(trie.get(word), Some(stored.as_str()));
    }

    #[test]
    fn prop_empty_prefix_lists_every_entry_once(words in vocabulary_strategy()) {
        let trie: Trie = words.iter().collect();
        let m = model(&words);

        let mut found = trie.search_prefix("", m.len());
        prop_assert_eq!(found.len(), m.len());
        prop_assert_eq!(trie.len(), m.len());

        let mut expected: Vec<String> = m.into_values().collect();
        found.sort();
        expected.sort();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_matches_agree_with_linear_scan(words in vocabulary_strategy(), prefix in word_strategy()) {
        let trie: Trie = words.iter().collect();
        let m = model(&words);
        let key = normalize(&prefix);

        let mut found = trie.search_prefix(&prefix, usize::MAX);
        let mut expected: Vec<String> = m
            .iter()
            .filter(|(k, _)| k.starts_with(&key))
            .map(|(_, v)| v.clone())
            .collect();
        found.sort();
        expected.sort();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_unmatched_prefix_is_empty(words in vocabulary_strategy(), limit in 0usize..=80) {
        let trie: Trie = words.iter().collect();
        // 'z' is outside the generated alphabet
        prop_assert!(trie.search_prefix("z", limit).is_empty());
        prop_assert!(trie.search_prefix("az", limit).is_empty());
    }

    #[test]
    fn prop_smaller_limit_is_a_prefix_of_larger(
        words in vocabulary_strategy(),
        prefix in word_strategy(),
        limit in 0usize..=80,
    ) {
        let trie: Trie = words.iter().collect();
        let all = trie.search_prefix(&prefix, usize::MAX);
        let bounded = trie.search_prefix(&prefix, limit);
        prop_assert_eq!(&all[..bounded.len()], &bounded[..]);
    }

    #[test]
    fn prop_negative_limit_is_always_rejected(prefix in word_strategy(), limit in i64::MIN..0) {
        let trie: Trie = ["a", "b"].into_iter().collect();
        prop_assert!(trie.try_search_prefix(&prefix, limit).is_err());
    }

    #[test]
    fn prop_whole_index_order_is_insertion_preorder(words in vocabulary_strategy()) {
        let trie: Trie = words.iter().collect();
        let arena = model_tree(&words);

        let mut expected = vec![];
        model_preorder(&arena, 0, &mut expected);
        prop_assert_eq!(trie.search_prefix("", usize::MAX), expected);
    }

    #[test]
    fn prop_prefix_order_is_insertion_preorder(
        words in vocabulary_strategy(),
        prefix in word_strategy(),
        limit in 0usize..=80,
    ) {
        let trie: Trie = words.iter().collect();
        let arena = model_tree(&words);

        let mut expected = vec![];
        if let Some(anchor) = model_anchor(&arena, &prefix) {
            model_preorder(&arena, anchor, &mut expected);
        }
        expected.truncate(limit);
        prop_assert_eq!(trie.search_prefix(&prefix, limit), expected);
    }
}
