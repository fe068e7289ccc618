use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use quill_core::archive::group_by_month;
use quill_core::html::{render_blocks, render_media_card};
use quill_core::markup::parse;
use quill_core::media::absolute_url;
use quill_core::model::Entry;
use quill_core::visibility::Scope;
use quill_store::{MemoryStore, PageSession, PaginationState, fetch_entry};

#[derive(Debug, Parser)]
#[command(name = "quill", about = "Render and browse journal entries.")]
struct Cli {
    /// Log filter, e.g. "info" or "quill_store=debug".
    #[arg(long, default_value = "warn", global = true)]
    log: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render a journal text file to HTML.")]
    Render { file: PathBuf },
    #[command(about = "Show one entry from a JSON store file.")]
    Show {
        id: String,
        #[arg(long)]
        store: PathBuf,
        /// Read as this signed-in owner instead of the public view.
        #[arg(long)]
        owner: Option<String>,
    },
    #[command(about = "List entries page by page with an archive summary.")]
    List {
        #[arg(long)]
        store: PathBuf,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, default_value_t = 5)]
        page_size: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log);
    match &cli.command {
        Command::Render { file } => run_render(file),
        Command::Show { id, store, owner } => run_show(id, store, owner.as_deref()).await,
        Command::List {
            store,
            owner,
            page_size,
        } => run_list(store, owner.as_deref(), *page_size).await,
    }
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_render(file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("reading journal text from {}", file.display()))?;
    let blocks = parse(&raw);
    println!("{}", render_blocks(&blocks));
    Ok(())
}

fn load_store(path: &Path, owner: Option<&str>) -> Result<(MemoryStore, Scope)> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading store file {}", path.display()))?;
    let mut store = MemoryStore::from_json(&json)
        .with_context(|| format!("loading store file {}", path.display()))?;
    let scope = match owner {
        Some(uid) => {
            store.sign_in(uid);
            Scope::Owner(uid.to_string())
        }
        None => Scope::Published,
    };
    Ok((store, scope))
}

async fn run_show(id: &str, store_path: &Path, owner: Option<&str>) -> Result<()> {
    let (store, scope) = load_store(store_path, owner)?;
    match fetch_entry(&store, id, &scope).await? {
        Some(entry) => print_entry(&entry),
        None => println!("Entry not found."),
    }
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("# {}", entry.title);
    let mut meta = vec![entry.date.format("%B %d, %Y").to_string()];
    if let Some(mood) = &entry.mood {
        meta.push(mood.clone());
    }
    if let Some(location) = &entry.location {
        meta.push(location.clone());
    }
    if !entry.tags.is_empty() {
        let tags: Vec<String> = entry.tags.iter().map(|tag| format!("#{tag}")).collect();
        meta.push(tags.join(" "));
    }
    println!("{}", meta.join(" | "));
    println!();
    if let Some(cover) = entry.cover_image() {
        println!("{}", render_media_card(&absolute_url(cover), None));
        println!();
    }
    println!("{}", render_blocks(&parse(&entry.content)));
}

async fn run_list(store_path: &Path, owner: Option<&str>, page_size: usize) -> Result<()> {
    if page_size == 0 {
        bail!("page size must be positive");
    }
    let (store, scope) = load_store(store_path, owner)?;
    let mut session = PageSession::new(&store, scope);
    let mut state = PaginationState::new();
    while state.has_more {
        let page = session.fetch_page(page_size, state.cursor.as_ref()).await?;
        state.absorb(page, page_size);
    }
    tracing::debug!(count = state.entries.len(), "accumulated all pages");

    for entry in &state.entries {
        println!(
            "{}  {}  {}",
            entry.date.format("%Y-%m-%d"),
            entry.id,
            entry.title
        );
    }

    let archive = group_by_month(&state.entries);
    if !archive.is_empty() {
        println!();
        println!("Archive");
        for year in &archive {
            println!("{}", year.year);
            for month in &year.months {
                println!("  {} ({})", month.label, month.entries.len());
            }
        }
    }
    Ok(())
}
