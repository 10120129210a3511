use schemata_engine::editing::{
    Block, BlockKey, BlockType, Document, InsertionKind, Selection, SequentialKeys, insert_schema,
};

/// Three-block document with the cursor on the middle block, the setup every
/// snapshot below splices into.
fn fixture() -> (Document, Selection) {
    let doc = Document::new(vec![
        Block::new(BlockKey::from("a"), BlockType::Plain, "intro"),
        Block::new(BlockKey::from("b"), BlockType::Plain, "theme"),
        Block::new(BlockKey::from("c"), BlockType::Plain, "coda"),
    ])
    .unwrap();
    let sel = Selection::caret(BlockKey::from("b"), 0);
    (doc, sel)
}

fn spliced_rows(kind: InsertionKind) -> String {
    let (doc, sel) = fixture();
    let mut keys = SequentialKeys::new();
    let (new_doc, _) = insert_schema(&doc, &sel, kind, &mut keys).unwrap();

    new_doc
        .blocks()
        .iter()
        .map(|b| format!("{} {} {:?}", b.key(), b.block_type().as_str(), b.text()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn half_insertion_structure() {
    insta::assert_snapshot!(spliced_rows(InsertionKind::Half), @r#"
    a plain "intro"
    gen-0 plain ""
    b schema-entry "theme"
    gen-1 schema ""
    gen-2 schema-exit ""
    gen-3 plain ""
    c plain "coda"
    "#);
}

#[test]
fn main_insertion_structure() {
    insta::assert_snapshot!(spliced_rows(InsertionKind::Main), @r#"
    a plain "intro"
    gen-0 plain ""
    b schema-entry "theme"
    gen-1 schema ""
    gen-2 schema-exit ""
    gen-3 schema ""
    gen-4 schema ""
    gen-5 schema-exit ""
    gen-6 plain ""
    c plain "coda"
    "#);
}

#[test]
fn bar_insertion_structure() {
    insta::assert_snapshot!(spliced_rows(InsertionKind::Bar), @r#"
    a plain "intro"
    gen-0 plain ""
    b schema "theme"
    gen-1 plain ""
    c plain "coda"
    "#);
}

#[test]
fn inverse_insertion_structure() {
    insta::assert_snapshot!(spliced_rows(InsertionKind::Inverse), @r#"
    a plain "intro"
    gen-0 plain ""
    b schema "theme"
    gen-1 schema-exit ""
    gen-2 schema ""
    gen-3 plain ""
    c plain "coda"
    "#);
}

/// Host-side round trip: import JSON, splice, export, re-import.
#[test]
fn json_import_insert_export() {
    let json = r#"[
        {"key": "k1", "type": "plain", "text": "hello"}
    ]"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    let sel = Selection::caret(BlockKey::from("k1"), 0);
    let mut keys = SequentialKeys::new();

    let (new_doc, _) = insert_schema(&doc, &sel, InsertionKind::Bar, &mut keys).unwrap();

    let exported = serde_json::to_string(&new_doc).unwrap();
    let reimported: Document = serde_json::from_str(&exported).unwrap();
    assert_eq!(reimported, new_doc);
    assert_eq!(reimported.len(), 3);
    assert_eq!(
        reimported.get(&BlockKey::from("k1")).unwrap().block_type(),
        &BlockType::Schema
    );
}
