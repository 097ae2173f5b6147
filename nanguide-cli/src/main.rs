//! NanGuide CLI - ask questions about places to visit in Nan province
//!
//! # Commands
//!
//! ```bash
//! # Interactive chat (type /load first, or pass --load)
//! GROQ_API_KEY=... nanguide chat --load
//!
//! # One question
//! GROQ_API_KEY=... nanguide ask "น้ำตกที่น่านมีที่ไหนบ้าง"
//!
//! # Retrieval only, no API key needed
//! nanguide search "น้ำตกที่น่านมีที่ไหนบ้าง" -k 5
//!
//! # Embed text and show vector stats
//! nanguide embed "ดอยภูแว"
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use nanguide_lib::{
    config::{self, Config},
    corpus,
    embed::{Embedder, MiniLmEmbedder},
    generate::{AnswerGenerator, GroqClient},
    retrieve::Retriever,
    session::{Reply, Session, LOADED_MESSAGE},
    store::MemoryStore,
};
use tracing_subscriber::EnvFilter;

type ChatSession = Session<MiniLmEmbedder, MemoryStore, GroqClient>;

#[derive(Parser)]
#[command(name = "nanguide")]
#[command(about = "RAG chatbot for places to visit in Nan province")]
#[command(version)]
struct Cli {
    /// Replace the built-in guide with documents from FILE (blank-line separated)
    #[arg(long, global = true, value_name = "FILE")]
    docs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat: /load loads documents, /quit exits
    Chat {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Load documents before the first prompt
        #[arg(long)]
        load: bool,
    },

    /// Load documents and answer one question
    Ask {
        /// The question
        query: String,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Load documents and show the ranked matches for a query
    Search {
        /// Query to search for
        query: String,

        /// Number of results to return
        #[arg(short, long, default_value_t = config::DEFAULT_TOP_K)]
        k: usize,
    },

    /// Embed text and show vector info
    Embed {
        /// Text to embed
        text: String,
    },
}

#[derive(Args)]
struct GenerationArgs {
    /// Completion service API key
    #[arg(long, env = config::API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model identifier
    #[arg(long, env = config::MODEL_ENV, default_value = config::DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible API base URL
    #[arg(long, env = config::BASE_URL_ENV, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Sampling temperature
    #[arg(long, default_value_t = config::DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Number of documents retrieved as context
    #[arg(long, default_value_t = config::DEFAULT_TOP_K)]
    top_k: usize,
}

impl GenerationArgs {
    fn into_config(self) -> Result<Config> {
        let config = Config::new(self.api_key.unwrap_or_default())?
            .with_model(self.model)?
            .with_base_url(&self.base_url)?
            .with_temperature(self.temperature)?
            .with_top_k(self.top_k)?;
        Ok(config)
    }
}

fn load_corpus(docs: Option<&PathBuf>) -> Result<Vec<String>> {
    let Some(path) = docs else {
        return Ok(corpus::nan_guide());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read documents from '{}'", path.display()))?;
    let documents = corpus::parse_documents(&text);
    if documents.is_empty() {
        bail!("no documents found in '{}'", path.display());
    }
    Ok(documents)
}

fn load_embedder() -> Result<MiniLmEmbedder> {
    println!("Loading MiniLM model (first run downloads ~90MB)...");
    Ok(MiniLmEmbedder::new()?)
}

fn build_session(config: &Config, documents: Vec<String>) -> Result<ChatSession> {
    let client = GroqClient::new(config)?;
    let retriever = Retriever::new(load_embedder()?, MemoryStore::new())
        .with_collection(config.collection());
    let generator = AnswerGenerator::new(retriever, client, config);
    Ok(Session::new(generator, documents))
}

fn load(session: &mut ChatSession) -> Result<()> {
    let count = session.load_documents()?;
    println!("{LOADED_MESSAGE} ({count} documents)");
    Ok(())
}

fn print_reply(reply: Reply) {
    match reply {
        Reply::Answer(text) => println!("Bot: {text}\n"),
        Reply::Warning(text) => println!("⚠ {text}\n"),
    }
}

async fn chat(session: &mut ChatSession) -> Result<()> {
    println!("สวัสดี! ฉันคือ Chatbot ที่ช่วยตอบคำถามเกี่ยวกับจังหวัดน่าน");
    println!("Type /load to load the documents, /quit to exit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("คุณ: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF (Ctrl+D)
        };
        let line = line?;

        match line.trim() {
            "/quit" | "/exit" => break,
            "/load" => {
                if let Err(e) = load(session) {
                    eprintln!("Error: {e}\n");
                }
            }
            query => match session.submit(query).await {
                Ok(reply) => print_reply(reply),
                Err(e) => eprintln!("Error: {e}\n"),
            },
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { generation, load: load_at_start } => {
            // validate configuration before loading any model
            let config = generation.into_config()?;
            let documents = load_corpus(cli.docs.as_ref())?;
            let mut session = build_session(&config, documents)?;

            if load_at_start {
                load(&mut session)?;
            }
            chat(&mut session).await?;
        }

        Commands::Ask { query, generation } => {
            let config = generation.into_config()?;
            let documents = load_corpus(cli.docs.as_ref())?;
            let mut session = build_session(&config, documents)?;

            load(&mut session)?;
            print_reply(session.submit(&query).await?);
        }

        Commands::Search { query, k } => {
            let documents = load_corpus(cli.docs.as_ref())?;
            let mut retriever = Retriever::new(load_embedder()?, MemoryStore::new());

            println!("Loading {} documents...", documents.len());
            retriever.load(&documents)?;

            println!("\nSearching: '{query}' (k={k})");
            let results = retriever.search(&query, k)?;

            println!("\n=== Results ===\n");
            for (i, result) in results.iter().enumerate() {
                println!("#{} (id: {}, score: {:.4})", i + 1, result.id, result.score);
                println!("---");
                let preview: String = result.payload.text.chars().take(300).collect();
                let ellipsis = if result.payload.text.chars().count() > 300 { "..." } else { "" };
                println!("{preview}{ellipsis}\n");
            }
        }

        Commands::Embed { text } => {
            let mut embedder = load_embedder()?;
            let embedding = embedder.encode_query(&text)?;

            println!("\nEmbedding stats ({}):", embedder.model_name());
            println!("  Dimensions: {}", embedding.len());
            println!("  First 5 values: {:?}", &embedding[..embedding.len().min(5)]);
            println!("  Min: {:.4}", embedding.iter().cloned().fold(f32::INFINITY, f32::min));
            println!("  Max: {:.4}", embedding.iter().cloned().fold(f32::NEG_INFINITY, f32::max));
        }
    }

    Ok(())
}
