//! End-to-end behaviour of ingestion and queries against the memory store

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use xmlrel_core::{
    CommitMode, Element, Ingestor, MemoryStore, QueryEngine, XmlError, XmlStore,
};
use xmlrel_config::IngestConfig;

fn setup(mode: CommitMode) -> (Arc<MemoryStore>, Ingestor, QueryEngine) {
    let store = Arc::new(MemoryStore::new());
    let config = IngestConfig {
        commit_mode: mode,
        ..Default::default()
    };
    let ingestor = Ingestor::with_config(store.clone(), &config);
    let engine = QueryEngine::new(store.clone());
    (store, ingestor, engine)
}

#[tokio::test]
async fn sibling_attributes_are_unioned() {
    let (_store, ingestor, engine) = setup(CommitMode::Incremental);
    ingestor
        .ingest("f.xml", br#"<root><a x="1"/><a y="2"/></root>"#)
        .await
        .unwrap();

    assert_eq!(engine.count_tags("f.xml", "a").await.unwrap(), 2);
    assert_eq!(
        engine.list_attribute_names("f.xml", "a").await.unwrap(),
        BTreeSet::from(["x".to_string(), "y".to_string()])
    );
}

#[tokio::test]
async fn unknown_tag_in_known_file() {
    let (_store, ingestor, engine) = setup(CommitMode::Incremental);
    ingestor.ingest("g.xml", b"<root><b/></root>").await.unwrap();

    let err = engine.count_tags("g.xml", "missing").await.unwrap_err();
    assert!(matches!(err, XmlError::TagNotFound { .. }));
}

#[tokio::test]
async fn never_ingested_file() {
    let (_store, _ingestor, engine) = setup(CommitMode::Incremental);
    let err = engine.count_tags("nope.xml", "a").await.unwrap_err();
    assert!(matches!(err, XmlError::FileNotFound(_)));
}

#[tokio::test]
async fn attributeless_tag_gives_empty_set() {
    let (_store, ingestor, engine) = setup(CommitMode::Transactional);
    ingestor.ingest("h.xml", b"<root><c/></root>").await.unwrap();

    let names = engine.list_attribute_names("h.xml", "c").await.unwrap();
    assert!(names.is_empty());
}

#[tokio::test]
async fn second_registration_adds_no_row() {
    let (store, ingestor, _engine) = setup(CommitMode::Incremental);
    ingestor.ingest("dup.xml", b"<r/>").await.unwrap();
    let before = store.stats().await.unwrap();

    let err = ingestor.ingest("dup.xml", b"<r/>").await.unwrap_err();

    assert!(matches!(err, XmlError::DuplicateFile(_)));
    assert_eq!(store.stats().await.unwrap(), before);
}

#[tokio::test]
async fn count_ignores_attribute_values() {
    let (_store, ingestor, engine) = setup(CommitMode::Incremental);
    ingestor
        .ingest("v1.xml", br#"<r><i n="1"/><i n="2"/></r>"#)
        .await
        .unwrap();
    ingestor
        .ingest("v2.xml", br#"<r><i n="zzz"/><i n=""/></r>"#)
        .await
        .unwrap();

    assert_eq!(
        engine.count_tags("v1.xml", "i").await.unwrap(),
        engine.count_tags("v2.xml", "i").await.unwrap()
    );
}

#[tokio::test]
async fn attribute_query_is_repeatable() {
    let (_store, ingestor, engine) = setup(CommitMode::Incremental);
    ingestor
        .ingest("r.xml", br#"<r><t b="1" a="2"/><t c="3"/></r>"#)
        .await
        .unwrap();

    let first = engine.list_attribute_names("r.xml", "t").await.unwrap();
    let second = engine.list_attribute_names("r.xml", "t").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn latin1_document_is_queryable() {
    let (_store, ingestor, engine) = setup(CommitMode::Incremental);
    ingestor
        .ingest(
            "latin1.xml",
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><r><p\xe9 n\xe9=\"1\"/></r>",
        )
        .await
        .unwrap();

    assert_eq!(engine.count_tags("latin1.xml", "p\u{e9}").await.unwrap(), 1);
    assert_eq!(
        engine.list_attribute_names("latin1.xml", "p\u{e9}").await.unwrap(),
        BTreeSet::from(["n\u{e9}".to_string()])
    );
}

#[tokio::test]
async fn wide_document_ingests_fully() {
    const CHILDREN: usize = 20_000;
    let doc = format!("<r>{}</r>", "<i k=\"v\"/>".repeat(CHILDREN));

    for mode in [CommitMode::Incremental, CommitMode::Transactional] {
        let (store, ingestor, engine) = setup(mode);
        ingestor.ingest("wide.xml", doc.as_bytes()).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.tags, CHILDREN as u64 + 1);
        assert_eq!(stats.attributes, CHILDREN as u64);
        assert_eq!(engine.count_tags("wide.xml", "i").await.unwrap(), CHILDREN);
    }
}

fn arb_element() -> impl Strategy<Value = Element> {
    let name = "[a-c]";
    let attrs = prop::collection::btree_map("[p-s]", "[0-9]{0,3}", 0..3);
    let leaf = (name, attrs.clone()).prop_map(|(name, attrs)| Element {
        name,
        attributes: attrs.into_iter().collect(),
        children: Vec::new(),
    });

    leaf.prop_recursive(4, 32, 4, move |inner| {
        (name, attrs.clone(), prop::collection::vec(inner, 0..4)).prop_map(
            |(name, attrs, children)| Element {
                name,
                attributes: attrs.into_iter().collect(),
                children,
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn stored_rows_match_tree(root in arb_element(), transactional in any::<bool>()) {
        let mode = if transactional { CommitMode::Transactional } else { CommitMode::Incremental };
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let stats = runtime.block_on(async {
            let (store, ingestor, _engine) = setup(mode);
            ingestor.ingest_element("p.xml", &root).await.unwrap();
            store.stats().await.unwrap()
        });

        prop_assert_eq!(stats.files, 1);
        prop_assert_eq!(stats.tags as usize, root.element_count());
        prop_assert_eq!(stats.attributes as usize, root.attribute_count());
    }

    #[test]
    fn count_matches_name_occurrences(root in arb_element()) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let expected = root.pre_order().filter(|e| e.name == "a").count();

        let result = runtime.block_on(async {
            let (_store, ingestor, engine) = setup(CommitMode::Incremental);
            ingestor.ingest_element("p.xml", &root).await.unwrap();
            engine.count_tags("p.xml", "a").await
        });

        match result {
            Ok(count) => prop_assert_eq!(count, expected),
            Err(e) => {
                prop_assert_eq!(expected, 0);
                prop_assert!(matches!(e, XmlError::TagNotFound { .. }), "unexpected error: {}", e);
            }
        }
    }
}
