//! A thin command-line wrapper over [`search_core::SearchEngine`]: load a
//! folder of `.txt` documents, then either run a single query or drop into
//! an interactive prompt.
//!
//! This binary is not part of the crate's published API surface — it
//! exists to make the core kickable from a terminal, the way any library
//! benefits from a small runnable example.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;

use search_core::{DocId, SearchEngine};

#[derive(ClapParser, Debug)]
#[command(author, version, about = "In-memory inverted-index search demo", long_about = None)]
struct Args {
    /// Folder containing .txt documents to index
    #[arg(long)]
    data: PathBuf,

    /// Search query. If omitted, starts an interactive prompt.
    #[arg(long)]
    query: Option<String>,

    /// Maximum number of results to return
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Result offset, for pagination
    #[arg(long, default_value_t = 0)]
    offset: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let documents = load_documents(&args.data)
        .with_context(|| format!("loading documents from {}", args.data.display()))?;
    let engine = SearchEngine::new(documents).context("building search engine")?;

    if let Some(query) = &args.query {
        run_query(&engine, query, args.limit, args.offset);
        return Ok(());
    }

    run_interactive(&engine, args.limit, args.offset)
}

fn load_documents(dir: &PathBuf) -> Result<BTreeMap<DocId, String>> {
    let mut documents = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            documents.insert(DocId::from(id), text);
        }
    }
    Ok(documents)
}

fn run_query(engine: &SearchEngine, query: &str, limit: usize, offset: usize) {
    match engine.search(query, limit, offset) {
        Ok(results) => print_results(&results),
        Err(err) => eprintln!("error: {err}"),
    }
}

fn run_interactive(engine: &SearchEngine, limit: usize, offset: usize) -> Result<()> {
    use std::io::Write;

    loop {
        print!("query> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, ":q" | ":quit" | "quit" | "exit") {
            return Ok(());
        }
        run_query(engine, query, limit, offset);
    }
}

fn print_results(results: &[(search_core::RankedResult, String)]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }
    for (i, (result, text)) in results.iter().enumerate() {
        println!("{}. {}  score={:.4}", i + 1, result.doc_id, result.score);
        println!("   {}", preview(text, 160));
    }
}

/// Collapses whitespace and truncates to `max_len` characters, appending an
/// ellipsis when truncated.
fn preview(text: &str, max_len: usize) -> String {
    let clean: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if clean.chars().count() <= max_len {
        clean
    } else {
        let truncated: String = clean.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
