use proptest::prelude::*;
use studio_markdown::{assemble, extract};

proptest! {
    // Canonical documents (the serialized form of what we parse) must
    // reassemble byte for byte.
    #[test]
    fn prop_canonical_document_round_trips(
        keys in proptest::collection::vec("[a-z]{1,8}", 0..6),
        values in proptest::collection::vec("[a-z][a-z ]{0,10}[a-z]", 6),
        body in "[a-z A-Z.\n]{0,80}",
    ) {
        let mut doc = String::new();
        if !keys.is_empty() {
            doc.push_str("---\n");
            for (key, value) in keys.iter().zip(values.iter()) {
                doc.push_str(&format!("{key}: {value}\n"));
            }
            doc.push_str("---\n");
        }
        doc.push_str(&body);

        let (fm, rest) = extract(&doc);
        prop_assert_eq!(assemble(&fm, rest), doc);
    }

    // Documents that do not open with a delimiter pass through untouched.
    #[test]
    fn prop_plain_document_is_identity(body in "# [a-zA-Z0-9 \n]{0,120}") {
        let (fm, rest) = extract(&body);
        prop_assert!(fm.is_empty());
        prop_assert_eq!(rest, body.as_str());
        prop_assert_eq!(assemble(&fm, rest), body);
    }
}
