mod common;

use common::{GeneratedPdf, TestResult};
use coursedoc::{DocumentRequest, PipelineBuilder, PipelineConfig, PipelineError};

fn render(builder: PipelineBuilder, body: &str) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let rendered = builder
        .with_timestamp(false)
        .build()
        .render(&DocumentRequest::new("Course X", "Unit 1", body));
    assert!(!rendered.is_degraded());
    GeneratedPdf::from_bytes(rendered.into_bytes())
}

fn media_box(pdf: &GeneratedPdf) -> Vec<f32> {
    let (_, page_id) = pdf.doc.get_pages().into_iter().next().unwrap();
    let page = pdf.doc.get_dictionary(page_id).unwrap();
    page.get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

#[test]
fn page_size_comes_from_json() -> TestResult {
    let builder = PipelineBuilder::new()
        .with_config_json(r#"{ "composer": { "page": { "size": "Letter", "margins": "54pt" } } }"#)?;
    let pdf = render(builder, "Body.")?;
    assert_eq!(media_box(&pdf), vec![0.0, 0.0, 612.0, 792.0]);
    Ok(())
}

#[test]
fn branding_and_page_numbers_are_configurable() -> TestResult {
    let builder = PipelineBuilder::new()
        .with_branding(vec!["Acme Learning".to_string()])
        .with_closing_disclaimer(vec!["Fin.".to_string()])
        .with_page_numbers(false);
    let pdf = render(builder, "# Part\n\nBody.")?;
    assert_pdf_page_count!(pdf, 2);
    assert!(pdf.page_text(1).contains("Acme Learning"));
    assert_pdf_not_contains_text!(pdf, "Course Catalog");
    assert_pdf_not_contains_text!(pdf, "Page 2 of 2");
    assert_pdf_contains_text!(pdf, "Fin.");
    Ok(())
}

#[test]
fn style_overrides_change_layout() -> TestResult {
    let body = (0..30).map(|i| format!("Paragraph {i}.")).collect::<Vec<_>>().join("\n\n");
    let default_pages = render(PipelineBuilder::new(), &body)?.page_count();
    let roomy = PipelineBuilder::new().with_style_json(
        r#"{ "styles": { "paragraph": { "fontSize": "20pt", "spacingAfter": "40pt" } } }"#,
    )?;
    assert!(render(roomy, &body)?.page_count() > default_pages);
    Ok(())
}

#[test]
fn bad_configuration_is_reported() {
    assert!(matches!(
        PipelineBuilder::new().with_config_json("{ not json"),
        Err(PipelineError::Config(_))
    ));
    assert!(matches!(
        PipelineBuilder::new().with_style_json(r#"{ "styles": { "paragraph": { "fontSize": "big" } } }"#),
        Err(PipelineError::Config(_))
    ));
}

#[test]
fn timestamp_is_embedded_by_default() -> TestResult {
    assert!(PipelineConfig::default().embed_timestamp);
    let rendered = PipelineBuilder::new()
        .build()
        .render(&DocumentRequest::new("Course X", "Unit 1", "Body."));
    let pdf = GeneratedPdf::from_bytes(rendered.into_bytes())?;
    let date = common::pdf_assertions::info_entry(&pdf.doc, b"CreationDate").unwrap_or_default();
    assert!(date.starts_with(b"D:"), "{:?}", String::from_utf8_lossy(&date));
    Ok(())
}

#[test]
fn filename_and_mime_type_helpers() {
    assert_eq!(coursedoc::download_filename("machine learning", 4), "MachineLearning_Unit_4.pdf");
    assert_eq!(coursedoc::PDF_MIME_TYPE, "application/pdf");
}
