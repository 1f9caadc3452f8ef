use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docweave_config::Config;
use docweave_engine::service::memory::InMemoryDocumentService;
use docweave_engine::{DocumentCursor, EditOperation, append_markup, build_batch, parse_markup};

#[derive(Parser)]
#[command(name = "docweave", about = "Compile markup into rich-text edit batches")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile markup files into JSON operation batches
    Compile {
        /// Markup files, compiled as successive appends
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Document length the first batch anchors to
        #[arg(long, default_value_t = 0)]
        cursor: usize,
    },
    /// Append markup files to an in-memory document and show the result
    Append {
        /// Markup files, appended in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Target document id (falls back to config, then "preview")
        #[arg(long)]
        document_id: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Compile { files, cursor } => compile(&files, cursor),
        Command::Append { files, document_id } => append(&files, document_id),
    }
}

fn compile(files: &[PathBuf], cursor: usize) -> Result<()> {
    let mut cursor = DocumentCursor::at(cursor);
    for file in files {
        let markup = read_markup(file)?;
        let parsed = parse_markup(&markup);
        let operations = build_batch(cursor, &parsed.buffer, &parsed.annotations);
        println!("{}", serde_json::to_string_pretty(&operations)?);
        // Later batches anchor past the content this one inserts.
        if let Some(EditOperation::InsertText { text, .. }) = operations.first() {
            cursor = cursor.advanced_by(text.len());
        }
    }
    Ok(())
}

fn append(files: &[PathBuf], document_id: Option<String>) -> Result<()> {
    let document_id = document_id
        .or_else(|| Config::load().ok().flatten().map(|c| c.document_id))
        .unwrap_or_else(|| "preview".to_string());

    let mut service = InMemoryDocumentService::new();
    service.create_document(&document_id);

    for file in files {
        let markup = read_markup(file)?;
        let outcome = append_markup(&mut service, &document_id, &markup);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    if let Some(doc) = service.document(&document_id) {
        println!("--- stored text ({} bytes) ---", doc.text.len());
        println!("{}", doc.text);
    }
    Ok(())
}

fn read_markup(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}
