mod common;

use common::deterministic_pipeline;
use coursedoc::{BlockKind, DocumentRequest};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_input_yields_a_pdf(title in "\\PC{0,40}", label in "\\PC{0,20}", body in "\\PC{0,400}") {
        let bytes = coursedoc::render_unit_document(&title, &label, &body);
        prop_assert!(bytes.starts_with(b"%PDF-"));
        prop_assert!(lopdf::Document::load_mem(&bytes).is_ok());
    }

    #[test]
    fn paragraphs_keep_source_order(words in prop::collection::vec("[a-z]{1,12}", 1..40)) {
        let body = words.join("\n\n");
        let doc = deterministic_pipeline()
            .compose(&DocumentRequest::new("Course X", "Unit 1", body))
            .unwrap();
        let texts: Vec<&str> = doc.blocks.iter().map(|b| b.text()).collect();
        prop_assert_eq!(texts, words.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert!(doc.blocks.iter().all(|b| b.kind() == BlockKind::Paragraph));
    }

    #[test]
    fn rendering_is_repeatable(body in "[ -~\n]{0,300}") {
        let pipeline = deterministic_pipeline();
        let request = DocumentRequest::new("Course X", "Unit 1", body);
        prop_assert_eq!(pipeline.render(&request), pipeline.render(&request));
    }
}
