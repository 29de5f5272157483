use fenris_bases::multi_index::MultiIndex;

#[test]
fn multi_index_basic_operations() {
    let mut index = MultiIndex::from([3]);
    assert_eq!(index.as_flat(), Some(3));

    index.push_front(1);
    assert_eq!(index.as_slice(), &[1, 3]);
    assert_eq!(index.as_flat(), None);

    index.push(7);
    index[1] += 10;
    assert_eq!(index, MultiIndex::from([1, 13, 7]));
    assert_eq!(index.len(), 3);

    index.set_flat(5);
    assert_eq!(index, MultiIndex::from_slice(&[5]));
    index.clear();
    assert!(index.is_empty());
}

#[test]
fn multi_index_ordering_is_lexicographic() {
    let mut indices = vec![
        MultiIndex::from([1, 0]),
        MultiIndex::from([0, 5]),
        MultiIndex::from([0, 2]),
        MultiIndex::from([0]),
    ];
    indices.sort();
    assert_eq!(
        indices,
        vec![
            MultiIndex::from([0]),
            MultiIndex::from([0, 2]),
            MultiIndex::from([0, 5]),
            MultiIndex::from([1, 0])
        ]
    );
}

#[test]
fn multi_index_formatting() {
    let index: MultiIndex = [0, 12].into_iter().collect();
    assert_eq!(index.to_string(), "(0, 12)");
    assert_eq!(format!("{:?}", index), "[0, 12]");
}

#[test]
fn multi_index_serde_roundtrip() {
    let index = MultiIndex::from([1, 2, 3, 4, 5]);
    let json = serde_json::to_string(&index).unwrap();
    assert_eq!(json, "[1,2,3,4,5]");
    let deserialized: MultiIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, index);
}
