//! Export a summary with citations, once per overflow policy

use summary_pdf::{
    suggested_filename, ExportRequest, LayoutConfig, OverflowPolicy, Packager, PdfError,
    SummaryDocument,
};

fn main() -> Result<(), PdfError> {
    let body = (1..=80)
        .map(|n| format!("Finding {n}: the effect held across every cohort we examined."))
        .collect::<Vec<_>>()
        .join("\n");

    let request = ExportRequest::new(body)
        .with_citations(["Doe, J. (2021). Cohort studies.", "Roe, R. (2019). Methods."])
        .with_focus("cohort effects");

    let mut packager = Packager::new("summary_demo_output");

    for (label, overflow) in [
        ("single", OverflowPolicy::Overwrite),
        ("paged", OverflowPolicy::NewPage),
    ] {
        let config = LayoutConfig::default().with_overflow(overflow);
        let document = SummaryDocument::with_config(request.clone(), config);
        let filename = suggested_filename("demo", label, request.focus());

        let artifact = document.to_artifact(&filename)?;
        let path = packager.export(&artifact)?;
        println!("✓ Created {} ({} bytes)", path.display(), artifact.len());
    }

    Ok(())
}
