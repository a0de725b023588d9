//! Document commands

use std::path::{Path, PathBuf};

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::cli::handlers::run_list_command;
use crate::client::models::{Document, UploadFile};
use crate::client::DocumentApi;
use crate::error::{Error, Result};
use crate::models::DocumentDisplay;
use crate::output::formatters::{format_bytes, sanitize_filename};

/// Run the docs list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    run_list_command::<Document, DocumentDisplay, _, _>(&ctx, "documents", || {
        ctx.client.list_my_documents()
    })
    .await
}

/// Print the public URL of a document
pub fn url(opts: &GlobalOptions, doc_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    println!("{}", ctx.client.public_document_url(doc_id));
    Ok(())
}

/// Download a document through its public URL.
///
/// Without `--output` the file is named after the listed document, which
/// needs a session; when no session exists it falls back to `<doc_id>.pdf`.
pub async fn download(opts: &GlobalOptions, doc_id: &str, output: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let target = match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(listed_filename(&ctx, doc_id).await),
    };

    eprintln!("{}", format!("Downloading {}...", doc_id).cyan());
    let bytes = ctx.client.download_document(doc_id).await?;
    std::fs::write(&target, &bytes)?;

    println!(
        "{} Saved {} ({})",
        "✓".green(),
        target.display().to_string().bold(),
        format_bytes(Some(bytes.len() as u64))
    );
    Ok(())
}

/// Upload a PDF to a case file
pub async fn upload(opts: &GlobalOptions, file: &str, case_id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let upload = load_pdf(Path::new(file))?;
    let name = upload.file_name.clone();
    let size = upload.bytes.len() as u64;

    eprintln!(
        "{}",
        format!("Uploading {} to case file #{}...", name, case_id).cyan()
    );
    ctx.client.upload_document(case_id, upload).await?;

    println!(
        "{} Uploaded {} ({}) to case file #{}",
        "✓".green(),
        name.bold(),
        format_bytes(Some(size)),
        case_id
    );
    Ok(())
}

/// Read `path`, accepting only PDF files
fn load_pdf(path: &Path) -> Result<UploadFile> {
    let upload = UploadFile::from_path(path)?;
    if !upload.is_pdf() {
        return Err(Error::Other(format!(
            "Only PDF files can be uploaded: {}",
            path.display()
        )));
    }
    Ok(upload)
}

/// File name for `doc_id` from the document list, sanitized for the local
/// filesystem
async fn listed_filename(ctx: &CommandContext, doc_id: &str) -> String {
    let fallback = fallback_filename(doc_id);
    if !ctx.session.is_authenticated().await {
        return fallback;
    }
    match ctx.client.list_my_documents().await {
        Ok(docs) => pick_filename(&docs, doc_id, &fallback),
        Err(e) => {
            debug!("Could not look up file name for {}: {}", doc_id, e);
            fallback
        }
    }
}

/// `<doc_id>.pdf`, safe to use as a local file name
fn fallback_filename(doc_id: &str) -> String {
    sanitize_filename(&format!("{}.pdf", doc_id), "document.pdf")
}

fn pick_filename(docs: &[Document], doc_id: &str, fallback: &str) -> String {
    docs.iter()
        .find(|d| d.doc_id == doc_id)
        .map(|d| sanitize_filename(&d.filename, fallback))
        .unwrap_or_else(|| fallback.to_string())
}
