//! End-to-end checks of the generated file layout.
//!
//! Each test builds a complete document and reads its cross-reference table,
//! stream lengths and trailer back from the raw bytes.

mod common;

use common::{as_text, object_text, parse_xref, stream_payload, trailer_size};
use pretty_assertions::assert_eq;
use summary_pdf::{
    export_summary, ExportRequest, LayoutConfig, OverflowPolicy, SummaryDocument,
};

fn methods_request() -> ExportRequest {
    ExportRequest::new("Result A. Result B.")
        .with_citations(["Paper One", "Paper Two"])
        .with_focus("methods")
}

#[test]
fn test_methods_example_layout() {
    let bytes = SummaryDocument::new(methods_request()).to_bytes().unwrap();
    let text = as_text(&bytes);

    assert!(text.starts_with("%PDF-1.4\n"));
    assert_eq!(text.matches(" 0 obj ").count(), 5);
    assert!(text.contains("(Summary - Focus: methods) Tj"));
    assert!(text.contains("(Result A. Result B.) Tj"));
    assert!(text.contains("(References:) Tj"));
    assert!(text.contains("(1. Paper One) Tj"));
    assert!(text.contains("(2. Paper Two) Tj"));
    assert_eq!(trailer_size(&bytes), 6);
    assert!(text.ends_with("%%EOF"));
}

#[test]
fn test_methods_example_line_positions() {
    let bytes = SummaryDocument::new(methods_request()).to_bytes().unwrap();
    let (_, payload) = stream_payload(&bytes, 5);

    assert_eq!(
        payload,
        "BT\n\
         /F1 12 Tf\n\
         1 0 0 1 50 760 Tm (Summary - Focus: methods) Tj\n\
         1 0 0 1 50 746 Tm () Tj\n\
         1 0 0 1 50 732 Tm (Result A. Result B.) Tj\n\
         1 0 0 1 50 718 Tm () Tj\n\
         1 0 0 1 50 704 Tm (References:) Tj\n\
         1 0 0 1 50 690 Tm (1. Paper One) Tj\n\
         1 0 0 1 50 676 Tm (2. Paper Two) Tj\n\
         ET\n"
    );
}

#[test]
fn test_empty_request_still_has_content() {
    let bytes = SummaryDocument::new(ExportRequest::default()).to_bytes().unwrap();
    let (declared, payload) = stream_payload(&bytes, 5);

    assert_eq!(
        payload,
        "BT\n/F1 12 Tf\n\
         1 0 0 1 50 760 Tm (Summary) Tj\n\
         1 0 0 1 50 746 Tm () Tj\n\
         1 0 0 1 50 732 Tm () Tj\n\
         ET\n"
    );
    assert_eq!(declared, payload.len());
    assert!(!as_text(&bytes).contains("References:"));
}

#[test]
fn test_xref_offsets_point_at_object_headers() {
    let bytes = SummaryDocument::new(methods_request()).to_bytes().unwrap();
    let xref = parse_xref(&bytes);

    assert_eq!(xref.size, 6);
    for (index, offset) in xref.offsets.iter().enumerate() {
        let header = format!("{} 0 obj ", index + 1);
        assert!(
            bytes[*offset..].starts_with(header.as_bytes()),
            "object {} not found at offset {}",
            index + 1,
            offset
        );
    }
}

#[test]
fn test_object_graph_references() {
    let bytes = SummaryDocument::new(methods_request()).to_bytes().unwrap();

    assert_eq!(
        object_text(&bytes, 1),
        "1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n"
    );
    assert_eq!(
        object_text(&bytes, 2),
        "2 0 obj << /Type /Pages /Count 1 /Kids [3 0 R] >> endobj\n"
    );
    assert_eq!(
        object_text(&bytes, 3),
        "3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >> endobj\n"
    );
    assert_eq!(
        object_text(&bytes, 4),
        "4 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n"
    );
}

#[test]
fn test_stream_length_matches_payload() {
    let request = ExportRequest::new("Escapes (like this) and \\ backslashes\nand a second line")
        .with_citations(["Smith (2020)"]);
    let bytes = SummaryDocument::new(request).to_bytes().unwrap();
    let (declared, payload) = stream_payload(&bytes, 5);

    assert_eq!(declared, payload.len());
    assert!(payload.contains(r"(Escapes \(like this\) and \\ backslashes) Tj"));
    assert!(payload.contains(r"(1. Smith \(2020\)) Tj"));
}

#[test]
fn test_text_mentioning_endstream_keeps_length_exact() {
    let request = ExportRequest::new("endstream endobj xref trailer %%EOF");
    let bytes = SummaryDocument::new(request).to_bytes().unwrap();
    let (declared, payload) = stream_payload(&bytes, 5);
    assert_eq!(declared, payload.len());
    assert_eq!(trailer_size(&bytes), 6);
}

#[test]
fn test_non_ascii_input_is_replaced() {
    let request = ExportRequest::new("Größe — 测试 🚀").with_focus("métodos");
    let bytes = SummaryDocument::new(request).to_bytes().unwrap();
    let text = as_text(&bytes);

    assert!(bytes.iter().all(u8::is_ascii));
    assert!(text.contains("(Summary - Focus: m?todos) Tj"));
    assert!(text.contains("(Gr??e ? ?? ?) Tj"));
}

#[test]
fn test_composition_is_idempotent() {
    let request = methods_request();
    let config = LayoutConfig::default();

    let first = export_summary(&request, &config).unwrap();
    let second = export_summary(&request, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_overwrite_policy_keeps_single_page_for_long_text() {
    let summary = "A sentence that repeats to fill the page. ".repeat(200);
    let bytes = SummaryDocument::new(ExportRequest::new(summary)).to_bytes().unwrap();

    assert_eq!(as_text(&bytes).matches(" 0 obj ").count(), 5);
    assert_eq!(trailer_size(&bytes), 6);
    let (declared, payload) = stream_payload(&bytes, 5);
    assert_eq!(declared, payload.len());
    // Lines past the bottom margin restart at the top of the same page.
    assert!(payload.matches(" 760 Tm ").count() > 1);
}

#[test]
fn test_new_page_policy_adds_page_objects() {
    let summary = (1..=130)
        .map(|n| format!("Line {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    let config = LayoutConfig::default().with_overflow(OverflowPolicy::NewPage);
    let bytes = export_summary(&ExportRequest::new(summary), &config).unwrap();
    let text = as_text(&bytes);

    // heading + blank + 130 lines = 132 lines over 51-line pages
    assert!(text.contains("/Count 3 /Kids [3 0 R 6 0 R 8 0 R]"));
    assert_eq!(trailer_size(&bytes), 10);

    let xref = parse_xref(&bytes);
    assert_eq!(xref.offsets.len(), 9);
    for (index, offset) in xref.offsets.iter().enumerate() {
        assert!(bytes[*offset..].starts_with(format!("{} 0 obj ", index + 1).as_bytes()));
    }

    for (page, content) in [(3, 5), (6, 7), (8, 9)] {
        assert!(object_text(&bytes, page).contains(&format!("/Contents {content} 0 R")));
        assert!(object_text(&bytes, page).contains("/Parent 2 0 R"));
        let (declared, payload) = stream_payload(&bytes, content);
        assert_eq!(declared, payload.len());
        assert!(payload.starts_with("BT\n/F1 12 Tf\n1 0 0 1 50 760 Tm "));
    }
    assert!(stream_payload(&bytes, 9).1.contains("(Line 130) Tj"));
}

#[test]
fn test_placeholder_export() {
    let request = ExportRequest::or_placeholder(Some(""), None);
    let bytes = SummaryDocument::new(request).to_bytes().unwrap();
    assert!(as_text(&bytes).contains("(No summary available.) Tj"));
}
