mod common;

use common::{GeneratedPdf, TestResult, deterministic_pipeline};
use coursedoc::{DocumentRequest, render_unit_documents};

#[test]
fn batch_output_matches_request_order() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let requests: Vec<DocumentRequest> = (1..=6)
        .map(|n| DocumentRequest::new(format!("Course {n}"), format!("Unit {n}"), format!("# Part {n}\n\nBody {n}.")))
        .collect();
    let rendered = render_unit_documents(&deterministic_pipeline(), &requests);
    assert_eq!(rendered.len(), requests.len());

    for (n, doc) in (1..=6).zip(rendered) {
        assert!(!doc.is_degraded());
        let pdf = GeneratedPdf::from_bytes(doc.into_bytes())?;
        assert!(pdf.page_text(1).contains(&format!("Course {n}")));
        assert!(pdf.page_text(2).contains(&format!("Body {n}.")));
    }
    Ok(())
}

#[test]
fn empty_batch_is_empty() {
    assert!(render_unit_documents(&deterministic_pipeline(), &[]).is_empty());
}
