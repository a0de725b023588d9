//! AI summary commands

use std::path::Path;

use colored::Colorize;
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::cli::handlers::run_list_command;
use crate::client::models::{Summary, UploadFile};
use crate::client::SummaryApi;
use crate::error::{Error, Result};
use crate::models::SummaryDisplay;
use crate::output::json;

/// Mime type assumed for images without a recognised extension
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Run the summary create command
pub async fn create(opts: &GlobalOptions, image: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let upload = load_image(Path::new(image))?;

    eprintln!(
        "{}",
        format!("Summarizing {}...", upload.file_name).cyan()
    );
    let summary = ctx.client.summarize(upload).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json_item(&summary)?),
        _ => println!("{}", render(&summary)),
    }
    Ok(())
}

/// Run the summary list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    run_list_command::<Summary, SummaryDisplay, _, _>(&ctx, "summaries", || {
        ctx.client.list_summaries()
    })
    .await
}

/// Read `path` as an image upload. PDFs are rejected; unknown extensions
/// are sent as JPEG.
fn load_image(path: &Path) -> Result<UploadFile> {
    let mut upload = UploadFile::from_path(path)?;
    if upload.is_pdf() {
        return Err(Error::Other(format!(
            "Summaries need a photo of the document (JPG or PNG), not a PDF: {}",
            path.display()
        )));
    }
    if !upload.is_image() {
        debug!(
            "Unknown image type for {}, sending as {}",
            upload.file_name, FALLBACK_IMAGE_MIME
        );
        upload.mime = FALLBACK_IMAGE_MIME.to_string();
    }
    Ok(upload)
}

fn render(summary: &Summary) -> String {
    let mut out = format!("{}\n\n{}\n", summary.filename.bold(), summary.summary);

    if !summary.key_points.is_empty() {
        out.push_str(&format!("\n{}\n", "Key points".bold()));
        for point in &summary.key_points {
            out.push_str(&format!("  • {}\n", point));
        }
    }
    if let Some(note) = summary.confidence_note.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("\n{} {}\n", "Note:".yellow(), note));
    }
    if summary.saved {
        out.push_str(&format!("\n{}", "✓ Saved".green()));
    }
    out.trim_end().to_string()
}
