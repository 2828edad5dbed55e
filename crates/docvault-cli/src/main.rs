//! DocVault — question answering over a folder of versioned documents.
//!
//! Thin composition root: builds the engine and the answer client, runs
//! one command, and exits. An API layer would own these values the same
//! way.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use docvault_chat::{classify_topic, AnswerClient, ChatConfig, Passage, SourceRef};
use docvault_core::DocVaultConfig;
use docvault_embed::HashingEmbedder;
use docvault_engine::DocumentEngine;

/// Retrieval fan-out for answers.
const ANSWER_TOP_K: usize = 5;

fn resolve_data_dir() -> PathBuf {
    std::env::var("DOCVAULT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_usage() {
    println!("DocVault — question answering over versioned documents");
    println!();
    println!("Usage: docvault <command>");
    println!();
    println!("Commands:");
    println!("  ask <question...>        Answer a question from the indexed documents");
    println!("  status                   Build or load the index and show its status");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  DOCVAULT_DATA_DIR        Data root (default: data/)");
    println!("  DOCVAULT_DOCUMENTS_DIR   Source document folder override");
    println!("  DOCVAULT_API_KEY         Chat API key (falls back to GROQ_API_KEY)");
}

fn build_engine() -> anyhow::Result<DocumentEngine> {
    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = DocVaultConfig::from_env(&data_dir)?;
    let embedder = Arc::new(HashingEmbedder::new(config.embedding_dim));
    let engine = DocumentEngine::new(config, embedder);
    engine
        .initialize()
        .map_err(|e| anyhow::anyhow!("Failed to initialize index: {}", e))?;
    Ok(engine)
}

async fn run_ask(question: &str) -> anyhow::Result<()> {
    let engine = build_engine()?;

    info!(
        "Answering a '{}' question over {} document(s)",
        classify_topic(question),
        engine.status().document_count
    );

    let hits = engine.search(question, ANSWER_TOP_K);

    let chat_config = ChatConfig::from_env();
    if chat_config.is_configured() {
        let passages: Vec<Passage> = hits
            .iter()
            .map(|h| {
                Passage::new(
                    h.text.clone(),
                    SourceRef {
                        document: h.source.clone(),
                        modified_at: h.modified_at,
                        is_most_recent: h.is_most_recent,
                    },
                )
            })
            .collect();
        let client = AnswerClient::new(chat_config);
        let answer = client
            .answer(question, &passages, &engine.version_context())
            .await;
        println!("{}", answer);
    } else {
        println!("No chat API key configured; showing retrieved passages instead.");
        println!();
        for hit in &hits {
            println!("[{}]\n{}\n", hit.source, hit.text);
        }
    }

    if !hits.is_empty() {
        println!();
        println!("Sources:");
        for hit in &hits {
            let marker = if hit.is_most_recent { " (most recent)" } else { "" };
            println!(
                "  - {}{} (similarity {:.3})",
                hit.source, marker, hit.similarity
            );
        }
    }
    Ok(())
}

fn run_status() -> anyhow::Result<()> {
    let engine = build_engine()?;
    let status = engine.status();
    println!("{}", serde_json::to_string_pretty(&status)?);
    println!();
    println!("{}", engine.version_context());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("ask") => {
            if args.len() < 3 {
                eprintln!("Usage: docvault ask <question...>");
                std::process::exit(1);
            }
            let question = args[2..].join(" ");
            run_ask(&question).await
        }
        Some("status") | None => run_status(),
        Some("--help") | Some("-h") | Some("help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'docvault help' for usage.", other);
            std::process::exit(1);
        }
    }
}
