use studio_markdown::{assemble, extract, FrontMatter, Value};

#[test]
fn test_extract_typed_values() {
    let doc = r#"---
title: My Document
date: 2024-03-15
draft: false
weight: 42
tags: [rust, markdown]
---

# Content
"#;

    let (fm, body) = extract(doc);
    assert_eq!(body, "\n# Content\n");

    assert_eq!(fm.get("title"), Some(&Value::String("My Document".to_string())));
    assert!(matches!(fm.get("date"), Some(Value::Date(_))));
    assert_eq!(fm.get("draft"), Some(&Value::Bool(false)));
    assert_eq!(fm.get("weight"), Some(&Value::Number(42.0)));
    assert_eq!(
        fm.get("tags"),
        Some(&Value::Array(vec![
            Value::String("rust".to_string()),
            Value::String("markdown".to_string()),
        ]))
    );
}

#[test]
fn test_byte_exact_round_trip() {
    let doc = "---\ntitle: My Post\ndate: 2024-03-15\ndraft: false\ntags: [rust, markdown]\nweight: 42\n---\n\n# Heading\n\nBody text.\n";
    let (fm, body) = extract(doc);
    assert_eq!(assemble(&fm, body), doc);
}

#[test]
fn test_document_without_front_matter_is_untouched() {
    let doc = "# Just a Document\n\nNo metadata here.\n";
    let (fm, body) = extract(doc);
    assert!(fm.is_empty());
    assert_eq!(body, doc);
    assert_eq!(assemble(&fm, body), doc);
}

#[test]
fn test_unterminated_block_is_body() {
    let doc = "---\ntitle: Oops\n\nNever closed.\n";
    let (fm, body) = extract(doc);
    assert!(fm.is_empty());
    assert_eq!(body, doc);
}

#[test]
fn test_thematic_break_body_survives() {
    // "---" later in the document is a thematic break, not a delimiter
    let doc = "---\ntitle: T\n---\nAbove.\n\n---\n\nBelow.\n";
    let (fm, body) = extract(doc);
    assert_eq!(fm.len(), 1);
    assert_eq!(body, "Above.\n\n---\n\nBelow.\n");
    assert_eq!(assemble(&fm, body), doc);
}

#[test]
fn test_edit_preserves_key_order() {
    let doc = "---\ntitle: Old\nauthor: Me\ndraft: true\n---\nBody.\n";
    let (mut fm, body) = extract(doc);

    fm.set("title", Value::String("New".to_string()));

    let keys: Vec<&str> = fm.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["title", "author", "draft"]);
    assert_eq!(
        assemble(&fm, body),
        "---\ntitle: New\nauthor: Me\ndraft: true\n---\nBody.\n"
    );
}

#[test]
fn test_new_key_appends() {
    let (mut fm, body) = extract("---\na: 1\n---\nBody.\n");
    fm.set("b", Value::Bool(true));
    assert_eq!(assemble(&fm, body), "---\na: 1\nb: true\n---\nBody.\n");
}

#[test]
fn test_assemble_from_scratch() {
    let mut fm = FrontMatter::new();
    fm.set("title", Value::String("Fresh".to_string()));
    assert_eq!(assemble(&fm, "Hello.\n"), "---\ntitle: Fresh\n---\nHello.\n");
}

#[test]
fn test_empty_front_matter_assembles_to_bare_body() {
    let fm = FrontMatter::new();
    assert_eq!(assemble(&fm, "Hello.\n"), "Hello.\n");
}

#[test]
fn test_fenced_widget_block_preserved_verbatim() {
    // the codec must never rewrite body text, widget blocks included
    let doc = "---\ntitle: T\n---\n```card {\"title\": \"Info Card\", \"body\": \"text\", \"variant\": \"info\"}\n```\n";
    let (fm, body) = extract(doc);
    assert!(body.contains("card {\"title\": \"Info Card\""));
    assert_eq!(assemble(&fm, body), doc);
}

#[test]
fn test_gfm_table_preserved_verbatim() {
    let doc = "---\ntitle: T\n---\n| A | B |\n| --- | --- |\n| 1 | 2 |\n";
    let (fm, body) = extract(doc);
    assert_eq!(body, "| A | B |\n| --- | --- |\n| 1 | 2 |\n");
    assert_eq!(assemble(&fm, body), doc);
}

#[test]
fn test_value_needing_quoting_round_trips_as_value() {
    let mut fm = FrontMatter::new();
    fm.set("title", Value::String("a: colon".to_string()));
    let doc = assemble(&fm, "");
    let (reread, _) = extract(&doc);
    assert_eq!(reread.get("title"), Some(&Value::String("a: colon".to_string())));
}
