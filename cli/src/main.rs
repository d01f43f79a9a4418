use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use textsearch_core::{DocId, DocumentStatus, ScoredDocument, SearchServer};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "textsearch")]
#[command(about = "Rank short documents against free-text queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    input: String,
    /// Whitespace-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// File with additional stop words
    #[arg(long)]
    stop_words_file: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query text; prefix a term with '-' to exclude documents containing it
        #[arg(long)]
        query: String,
        /// Only documents with this status (default: actual)
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Only documents with even ids, any status
        #[arg(long, default_value_t = false, conflicts_with = "status")]
        even_ids: bool,
        /// Emit results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show which query terms a document contains
    Match {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
    /// Run the built-in four-document walkthrough
    Demo,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, status, even_ids, json } => {
            let server = build_server(&corpus)?;
            let found = if even_ids {
                server.find_top_documents_with(&query, |id, _, _| id % 2 == 0)?
            } else {
                let status = status.map(DocumentStatus::from).unwrap_or_default();
                server.find_top_documents_by_status(&query, status)?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                print_documents(&found);
            }
        }
        Commands::Match { corpus, query, id } => {
            let server = build_server(&corpus)?;
            let (words, status) = server.match_document(&query, id)?;
            println!("{{ document_id = {id}, status = {status}, words = [{}] }}", words.join(" "));
        }
        Commands::Demo => run_demo()?,
    }
    Ok(())
}

fn build_server(corpus: &CorpusArgs) -> Result<SearchServer> {
    let mut server = SearchServer::with_stop_words(&corpus.stop_words).context("invalid --stop-words")?;
    if let Some(path) = &corpus.stop_words_file {
        let text = fs::read_to_string(path).with_context(|| format!("reading stop words from {path}"))?;
        server.add_stop_words(&text).with_context(|| format!("invalid stop word in {path}"))?;
    }
    let added = load_corpus(Path::new(&corpus.input), &mut server)?;
    tracing::info!(added, stop_words = server.stop_words().len(), "corpus loaded");
    Ok(server)
}

fn collect_files(input_path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
        files.sort();
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    files
}

/// Add every document found under `input_path`; stops at the first rejected one.
fn load_corpus(input_path: &Path, server: &mut SearchServer) -> Result<usize> {
    let mut added = 0;
    for file in collect_files(input_path) {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            server
                .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
                .with_context(|| format!("document {} in {}", doc.id, file.display()))?;
            added += 1;
        }
    }
    Ok(added)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line).with_context(|| format!("parsing {}", file.display()))?);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))?;
    let docs = match json {
        serde_json::Value::Array(arr) => {
            arr.into_iter().map(serde_json::from_value).collect::<Result<Vec<InputDoc>, _>>()?
        }
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

fn print_documents(docs: &[ScoredDocument]) {
    for doc in docs {
        println!("{doc}");
    }
}

fn run_demo() -> Result<()> {
    let mut server = SearchServer::with_stop_words("and in on")?;
    server.add_document(0, "white cat and fashion collar", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "groomed starling evgen", DocumentStatus::Banned, &[9])?;

    let query = "fluffy groomed cat";
    println!("ACTUAL by default:");
    print_documents(&server.find_top_documents(query)?);
    println!("BANNED:");
    print_documents(&server.find_top_documents_by_status(query, DocumentStatus::Banned)?);
    println!("Even ids:");
    print_documents(&server.find_top_documents_with(query, |id, _, _| id % 2 == 0)?);
    Ok(())
}
