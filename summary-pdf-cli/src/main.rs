use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use summary_pdf::package::{normalize_filename, DEFAULT_OUTPUT_DIR};
use summary_pdf::{
    suggested_filename, ContentStreamBuilder, ExportRequest, Font, LayoutConfig, OverflowPolicy,
    Packager, SummaryDocument,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "summarypdf",
    about = "Export research summaries as minimal PDF files",
    version,
    author
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a PDF and deliver it to the output directory
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Session identifier used in the generated filename
        #[arg(long, default_value = "session")]
        session: String,

        /// Summary type used in the generated filename
        #[arg(long, default_value = "summary")]
        summary_type: String,

        /// Directory the PDF is delivered to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// File name to use instead of the generated one
        #[arg(short, long)]
        filename: Option<String>,
    },

    /// Print the lines that would be laid out, without writing a PDF
    Preview {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Prefix every line with its page number and baseline, then report
        /// the page count
        #[arg(long)]
        positions: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceInput {
    /// Summary text
    #[arg(short, long)]
    summary: Option<String>,

    /// Read the summary text from a file
    #[arg(long)]
    summary_file: Option<PathBuf>,

    /// Read a JSON export request (`summaryText`, `citations`,
    /// `focusAspect`) from a file, or from stdin with `-`
    #[arg(short, long)]
    request: Option<PathBuf>,
}

#[derive(Args)]
struct SourceArgs {
    #[command(flatten)]
    input: SourceInput,

    /// Text exported when the summary is blank
    #[arg(long)]
    fallback: Option<String>,

    /// Citation to list under "References:" (repeatable)
    #[arg(short, long = "citation")]
    citations: Vec<String>,

    /// Focus aspect shown in the heading
    #[arg(long)]
    focus: Option<String>,
}

#[derive(Args)]
struct LayoutArgs {
    /// Maximum characters per line
    #[arg(short, long, default_value_t = summary_pdf::text::DEFAULT_WRAP_WIDTH)]
    width: usize,

    /// Continue on new pages instead of restarting at the top of the page
    #[arg(long)]
    multi_page: bool,

    /// Standard font name
    #[arg(long, default_value_t = Font::Helvetica)]
    font: Font,

    /// Font size in points
    #[arg(long, default_value_t = 12)]
    font_size: i32,
}

impl LayoutArgs {
    fn to_config(&self) -> LayoutConfig {
        let overflow = if self.multi_page {
            OverflowPolicy::NewPage
        } else {
            OverflowPolicy::Overwrite
        };
        LayoutConfig::default()
            .with_wrap_width(self.width)
            .with_font(self.font, self.font_size)
            .with_overflow(overflow)
    }
}

impl SourceArgs {
    fn to_request(&self) -> Result<ExportRequest> {
        let mut request = if let Some(path) = &self.input.request {
            let request = read_request(path)?;
            if request.summary_text.trim().is_empty() {
                ExportRequest {
                    summary_text: self.summary_or_fallback(None)?,
                    ..request
                }
            } else {
                request
            }
        } else {
            let summary = match (&self.input.summary, &self.input.summary_file) {
                (Some(text), _) => Some(text.clone()),
                (None, Some(path)) => Some(
                    std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                (None, None) => None,
            };
            ExportRequest::new(self.summary_or_fallback(summary.as_deref())?)
        };

        request.citations.extend(self.citations.iter().cloned());
        if let Some(focus) = &self.focus {
            request.focus_aspect = Some(focus.clone());
        }
        Ok(request)
    }

    fn summary_or_fallback(&self, summary: Option<&str>) -> Result<String> {
        let request = ExportRequest::from_sources(summary, self.fallback.as_deref())
            .context("Nothing to export: the summary is empty and no fallback text was given")?;
        Ok(request.summary_text)
    }
}

fn read_request(path: &Path) -> Result<ExportRequest> {
    let json = if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read request from stdin")?;
        json
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&json).context("Invalid export request JSON")
}

fn init_logging(verbose: bool) {
    let default = if verbose { "summary_pdf=debug,summarypdf=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Export {
            source,
            layout,
            session,
            summary_type,
            output_dir,
            filename,
        } => {
            let request = source.to_request()?;
            let filename = match filename {
                Some(name) => normalize_filename(&name),
                None => suggested_filename(&session, &summary_type, request.focus()),
            };
            debug!(filename = %filename, "exporting summary");

            let document = SummaryDocument::with_config(request, layout.to_config());
            let artifact = document
                .to_artifact(&filename)
                .context("Failed to compose PDF")?;

            let mut packager = Packager::new(&output_dir);
            let path = packager
                .export(&artifact)
                .with_context(|| format!("Failed to deliver PDF to {}", output_dir.display()))?;

            info!(bytes = artifact.len(), "export finished");
            println!("PDF exported successfully!");
            println!("Saved to: {}", path.display());
        }

        Commands::Preview {
            source,
            layout,
            positions,
        } => {
            let config = layout.to_config();
            let document = SummaryDocument::with_config(source.to_request()?, config.clone());
            let lines = document.lines();

            if positions {
                let placed =
                    ContentStreamBuilder::new(&config).layout(lines.iter().map(String::as_str));
                let page_count = placed.last().map_or(1, |line| line.page + 1);
                for line in &placed {
                    println!("{:>3} {:>4}  {}", line.page + 1, line.y, line.text);
                }
                println!(
                    "{} lines on {} page(s), {} lines per page",
                    placed.len(),
                    page_count,
                    config.lines_per_page()
                );
            } else {
                for line in &lines {
                    println!("{line}");
                }
            }
        }
    }

    Ok(())
}
