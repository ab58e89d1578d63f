use proptest::prelude::*;
use std::collections::BTreeMap;
use vessel::RbTreeMap;

#[derive(Debug, Clone)]
enum Operation {
    Insert(u8, u16),
    Get(u8),
    Remove(u8),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Operation::Insert(k, v)),
        any::<u8>().prop_map(Operation::Get),
        any::<u8>().prop_map(Operation::Remove),
    ]
}

proptest! {
    #[test]
    fn test_rb_tree_map_matches_std_map(ops in proptest::collection::vec(operation(), 1..300)) {
        let mut model = BTreeMap::new();
        let mut tree = RbTreeMap::new().unwrap();

        for op in ops {
            match op {
                Operation::Insert(k, v) => {
                    prop_assert_eq!(model.insert(k, v), tree.insert(k, v).unwrap(), "insert {}", k);
                }
                Operation::Get(k) => {
                    prop_assert_eq!(model.get(&k), tree.get(&k), "get {}", k);
                }
                Operation::Remove(k) => {
                    prop_assert_eq!(model.remove(&k), tree.remove(&k), "remove {}", k);
                }
            }
            if let Err(violation) = tree.check_invariants() {
                prop_assert!(false, "red-black violation: {}", violation);
            }
            prop_assert_eq!(model.len(), tree.len());
        }

        let expected: Vec<_> = model.iter().map(|(k, v)| (*k, *v)).collect();
        let actual: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&expected, &actual);

        let expected_rev: Vec<_> = expected.iter().rev().copied().collect();
        let actual_rev: Vec<_> = tree.iter().rev().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(expected_rev, actual_rev);

        prop_assert_eq!(model.first_key_value(), tree.first_key_value());
        prop_assert_eq!(model.last_key_value(), tree.last_key_value());
    }

    #[test]
    fn test_rb_tree_map_drains_in_any_order(keys in proptest::collection::vec(any::<u16>(), 1..200)) {
        let mut tree = RbTreeMap::new().unwrap();
        for &k in &keys {
            tree.insert(k, ()).unwrap();
        }
        for k in keys.iter().rev() {
            tree.remove(k);
            prop_assert!(tree.check_invariants().is_ok());
        }
        prop_assert!(tree.is_empty());
    }
}
