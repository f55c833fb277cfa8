//! Hash Ring Tests
//!
//! ## Test Scopes
//! - **Placement**: Virtual points land where the hash function says, lookups wrap around.
//! - **Determinism**: The same key always maps to the same node.
//! - **Bounded remapping**: Adding a node moves only a minority of keys.
//! - **Duplicates**: Re-adding a node is a no-op.

#[cfg(test)]
mod tests {
    use crate::hashring::HashRing;
    use std::collections::HashMap;

    // Treats the input as a decimal number so point positions are easy to reason about.
    fn decimal_hash(data: &[u8]) -> u32 {
        std::str::from_utf8(data).unwrap().parse().unwrap()
    }

    #[test]
    fn test_custom_hash_placement() {
        let mut ring = HashRing::new(3, Some(decimal_hash));
        // Points: 20 21 22 40 41 42 60 61 62
        ring.add(["6", "4", "2"]);

        let cases = [("2", "2"), ("11", "2"), ("23", "4"), ("27", "4"), ("45", "6")];
        for (key, node) in cases {
            assert_eq!(ring.get(key), Some(node), "key {} should map to {}", key, node);
        }
    }

    #[test]
    fn test_lookup_wraps_around() {
        let mut ring = HashRing::new(3, Some(decimal_hash));
        ring.add(["6", "4", "2"]);

        // Past the largest point (62) the first point (20) wins.
        assert_eq!(ring.get("63"), Some("2"));
        assert_eq!(ring.get("4000"), Some("2"));
    }

    #[test]
    fn test_adding_node_takes_over_its_range() {
        let mut ring = HashRing::new(3, Some(decimal_hash));
        ring.add(["6", "4", "2"]);
        assert_eq!(ring.get("63"), Some("2"));

        // Points 80 81 82 now sit between 62 and the wrap-around.
        ring.add(["8"]);
        assert_eq!(ring.get("63"), Some("8"));
        assert_eq!(ring.get("85"), Some("2"));
        assert_eq!(ring.get("23"), Some("4"));
    }

    #[test]
    fn test_empty_ring_returns_none() {
        let ring = HashRing::default();
        assert!(ring.is_empty());
        assert_eq!(ring.get("anything"), None);
        assert_eq!(ring.get(""), None);
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let mut ring = HashRing::new(50, None);
        ring.add(["http://a:8001", "http://b:8002", "http://c:8003"]);

        for i in 0..500 {
            let key = format!("key_{}", i);
            assert_eq!(ring.get(&key), ring.get(&key));
        }

        let mut other = HashRing::new(50, None);
        other.add(["http://c:8003", "http://a:8001", "http://b:8002"]);
        for i in 0..500 {
            let key = format!("key_{}", i);
            assert_eq!(
                ring.get(&key),
                other.get(&key),
                "insertion order must not matter"
            );
        }
    }

    #[test]
    fn test_adding_node_remaps_minority_of_keys() {
        let nodes = ["node-a", "node-b", "node-c", "node-d"];
        let mut ring = HashRing::new(50, None);
        ring.add(nodes);

        let keys: Vec<String> = (0..10_000).map(|i| format!("book_{}", i)).collect();
        let before: HashMap<&str, String> = keys
            .iter()
            .map(|k| (k.as_str(), ring.get(k).unwrap().to_string()))
            .collect();

        ring.add(["node-e"]);

        let mut moved = 0;
        for key in &keys {
            let now = ring.get(key).unwrap();
            if now != before[key.as_str()] {
                // Keys only ever move to the new node.
                assert_eq!(now, "node-e");
                moved += 1;
            }
        }

        assert!(moved > 0, "the new node should own something");
        assert!(
            moved < keys.len() / 2,
            "moved {} of {} keys",
            moved,
            keys.len()
        );
    }

    #[test]
    fn test_distribution_uses_every_node() {
        let mut ring = HashRing::new(50, None);
        ring.add(["node-a", "node-b", "node-c"]);

        let mut counts: HashMap<String, usize> = HashMap::new();
        for i in 0..9000 {
            let owner = ring.get(&format!("key_{}", i)).unwrap().to_string();
            *counts.entry(owner).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 3);
        for (node, count) in counts {
            assert!(count > 1000, "{} only got {} keys", node, count);
        }
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let mut ring = HashRing::new(3, Some(decimal_hash));
        ring.add(["6", "4"]);
        ring.add(["6", "6"]);

        assert_eq!(ring.len(), 2);
        assert_eq!(ring.nodes(), vec!["4".to_string(), "6".to_string()]);
        assert_eq!(ring.get("50"), Some("6"));
    }

    #[test]
    #[should_panic(expected = "at least one replica")]
    fn test_zero_replicas_panics() {
        let _ = HashRing::new(0, None);
    }
}
