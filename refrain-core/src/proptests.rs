use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::{ChainedTable, IndexEngine, OrderedList, OrderedTree, Record};

#[derive(Debug, Clone)]
enum TableOp {
    Add(u16),
    Delete(u16),
}

fn table_op() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        (0u16..64).prop_map(TableOp::Add),
        (0u16..64).prop_map(TableOp::Delete),
    ]
}

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i32),
    Remove(i32),
}

fn tree_op() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        2 => (-50i32..50).prop_map(TreeOp::Insert),
        1 => (-50i32..50).prop_map(TreeOp::Remove),
    ]
}

fn asc(a: &i32, b: &i32) -> core::cmp::Ordering {
    a.cmp(b)
}

proptest! {
    #[test]
    fn table_len_matches_elements(
        capacity in 1usize..17,
        ops in prop::collection::vec(table_op(), 0..200),
    ) {
        let mut table = ChainedTable::new(capacity).unwrap();
        let mut model: Vec<u16> = Vec::new();

        for op in ops {
            match op {
                TableOp::Add(v) => {
                    table.add(v);
                    model.push(v);
                }
                TableOp::Delete(v) => {
                    let expected = model.iter().position(|&m| m == v).map(|i| model.remove(i));
                    prop_assert_eq!(table.delete(&v), expected.is_some());
                }
            }
        }

        prop_assert_eq!(table.len(), table.all_elements().len());
        prop_assert_eq!(table.len(), model.len());
        for v in &model {
            let bucket = table.find(v);
            prop_assert!(bucket.is_some());
            prop_assert!(bucket.unwrap() < capacity);
        }
    }

    #[test]
    fn tree_in_order_is_sorted(ops in prop::collection::vec(tree_op(), 0..200)) {
        let mut tree = OrderedTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                TreeOp::Insert(v) => prop_assert_eq!(tree.insert(v, asc), model.insert(v)),
                TreeOp::Remove(v) => {
                    prop_assert_eq!(tree.remove(&v, asc), model.take(&v));
                }
            }
        }

        let in_order: Vec<i32> = tree.in_order().into_iter().copied().collect();
        prop_assert!(in_order.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(in_order, model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.len(), model.len());
    }

    #[test]
    fn tree_insert_then_remove_restores(
        values in prop::collection::btree_set(-100i32..100, 0..40),
        extra in 100i32..200,
    ) {
        let mut tree = OrderedTree::new();
        for &v in &values {
            tree.insert(v, asc);
        }
        let before: Vec<i32> = tree.in_order().into_iter().copied().collect();

        prop_assert!(tree.insert(extra, asc));
        prop_assert!(!tree.insert(extra, asc));
        prop_assert_eq!(tree.remove(&extra, asc), Some(extra));

        let after: Vec<i32> = tree.in_order().into_iter().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(tree.len(), values.len());
    }

    #[test]
    fn from_sorted_has_minimal_height(values in prop::collection::btree_set(any::<i32>(), 1..300)) {
        let sorted: Vec<i32> = values.into_iter().collect();
        let n = sorted.len();
        let tree = OrderedTree::from_sorted(sorted.clone(), asc).unwrap();

        let minimal = (usize::BITS - n.leading_zeros()) as isize - 1;
        prop_assert_eq!(tree.height(), minimal);
        prop_assert_eq!(tree.into_sorted_vec(), sorted);
    }

    #[test]
    fn list_spin_is_rotation(values in prop::collection::vec(any::<u8>(), 1..30), moves in 0usize..100) {
        let mut list: OrderedList<u8> = values.iter().copied().collect();
        list.spin(moves);

        let mut expected = values.clone();
        expected.rotate_right(moves % values.len());
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn engine_search_tracks_deletes(
        keep in prop::collection::vec(any::<bool>(), 1..20),
    ) {
        let mut engine = IndexEngine::new();
        let records = keep
            .iter()
            .enumerate()
            .map(|(i, _)| Record::new(format!("Song {i:02}"), 2000, None, format!("chorus unique{i}")));
        prop_assert_eq!(engine.import_from_source(records), keep.len());

        for (i, &kept) in keep.iter().enumerate() {
            if !kept {
                let deleted = engine.delete_by_key(&format!("song {i:02}"));
                prop_assert!(deleted);
            }
        }

        let expected: Vec<String> = keep
            .iter()
            .enumerate()
            .filter(|(_, &kept)| kept)
            .map(|(i, _)| format!("Song {i:02}"))
            .collect();
        let found: Vec<String> = engine
            .keyword_search("chorus")
            .unwrap_or_default()
            .iter()
            .map(|r| r.title().to_owned())
            .collect();
        prop_assert_eq!(found, expected);

        for (i, &kept) in keep.iter().enumerate() {
            prop_assert_eq!(engine.keyword_search(&format!("unique{i}")).is_some(), kept);
        }
        prop_assert_eq!(engine.song_count(), engine.export().len());
    }
}
