use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use wikidump::db::{self, ArticleDoc, IndexWriter};
use wikidump::dump::ReaderLines;
use wikidump::settings::Settings;
use wikidump::{export, ExtractedFields, Extractor, PageType};

const DEFAULT_DUMP: &str = "enwiki-latest-pages-articles.xml";
const DEFAULT_INDEX: &str = "enwiki-latest.sqlite";

#[derive(Parser)]
#[command(name = "wikidump", about = "Stream a Wikipedia XML dump and index its articles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every article into a SQLite index
    Index {
        /// Directory the dump and index paths are relative to
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,
        #[arg(long, default_value = DEFAULT_DUMP)]
        dump: PathBuf,
        #[arg(long, default_value = DEFAULT_INDEX)]
        index: PathBuf,
        /// Leave stub articles out of the index
        #[arg(long)]
        ignore_stubs: bool,
        /// Also write each abstract to a file in this directory
        #[arg(long)]
        text_dir: Option<PathBuf>,
    },
    /// Print extracted fields as one JSON object per line
    Dump {
        #[arg(long, default_value = DEFAULT_DUMP)]
        dump: PathBuf,
        /// Max pages to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Include redirects, templates and other non-article pages
        #[arg(long)]
        all_types: bool,
    },
    /// Count pages per type
    Stats {
        #[arg(long, default_value = DEFAULT_DUMP)]
        dump: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "settings loaded");

    let result = match cli.command {
        Commands::Index {
            base_dir,
            dump,
            index,
            ignore_stubs,
            text_dir,
        } => {
            let dump = base_dir.join(dump);
            let index = base_dir.join(index);
            let ignore_stubs = ignore_stubs || settings.index.ignore_stubs;
            println!("Work directory:     {}", base_dir.display());
            println!("Index:              {}", index.display());
            println!("Wikipedia dumpfile: {}", dump.display());
            println!("{}", if ignore_stubs { "Ignoring stubs" } else { "Including stubs" });
            let stats = build_index(&settings, &dump, &index, ignore_stubs, text_dir.as_deref())?;
            stats.print(t0.elapsed());
            Ok(())
        }
        Commands::Dump {
            dump,
            limit,
            all_types,
        } => print_pages(&settings, &dump, limit, all_types),
        Commands::Stats { dump } => print_stats(&settings, &dump),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

type DumpExtractor = Extractor<ReaderLines<BufReader<File>>>;

fn open_dump(settings: &Settings, path: &Path) -> Result<DumpExtractor> {
    let ex = Extractor::open(path)
        .with_context(|| format!("Failed to open dump {:?}", path))?
        .with_separators(settings.separators.clone());
    Ok(ex)
}

fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} pages ({per_sec}) {msg}")?,
    );
    Ok(pb)
}

// ── Index ──

#[derive(Default)]
struct RunStats {
    articles: u64,
    skipped: u64,
    stubs: u64,
}

impl RunStats {
    fn print(&self, elapsed: Duration) {
        println!(
            "Overall time {} minutes, collected {} articles, skipped {} nonarticle pages, skipped {} stubs.",
            elapsed.as_secs() / 60,
            self.articles,
            self.skipped,
            self.stubs
        );
    }
}

fn build_index(
    settings: &Settings,
    dump: &Path,
    index: &Path,
    ignore_stubs: bool,
    text_dir: Option<&Path>,
) -> Result<RunStats> {
    let mut ex = open_dump(settings, dump)?;
    let mut writer = IndexWriter::open(index)
        .with_context(|| format!("Failed to open index {:?}", index))?;

    let progress_every = settings.index.progress_every.max(1);
    let commit_every = settings.index.commit_every.max(1);

    let pb = spinner()?;
    let mut stats = RunStats::default();
    let t_start = Instant::now();
    let mut t_batch = Instant::now();

    while ex.advance() {
        pb.inc(1);

        if ex.page_type() != PageType::Article {
            stats.skipped += 1;
            continue;
        }
        if ignore_stubs && ex.is_stub() {
            stats.stubs += 1;
            continue;
        }

        let doc = ArticleDoc::from_extractor(&mut ex);
        writer.add_document(&doc)?;
        stats.articles += 1;

        if let Some(dir) = text_dir {
            export::write_text_file(dir, &doc.title, &doc.contents)
                .with_context(|| format!("Failed to write text for {}", doc.title))?;
        }

        if stats.articles % progress_every == 0 {
            info!(
                articles = stats.articles,
                batch_secs = t_batch.elapsed().as_secs(),
                "progress"
            );
            pb.set_message(format!("{} articles", stats.articles));
            t_batch = Instant::now();
        }
        if stats.articles % commit_every == 0 {
            writer.commit()?;
            info!(
                skipped = stats.skipped,
                stubs = stats.stubs,
                minutes = t_start.elapsed().as_secs() / 60,
                "commit"
            );
        }
    }
    pb.finish_and_clear();

    let t_close = Instant::now();
    let conn = writer.close()?;
    info!(
        rows = db::count(&conn)?,
        secs = t_close.elapsed().as_secs(),
        "index closed"
    );
    Ok(stats)
}

// ── Dump ──

#[derive(Serialize)]
struct PageLine<'a> {
    seq: usize,
    #[serde(flatten)]
    fields: &'a ExtractedFields,
}

fn print_pages(settings: &Settings, dump: &Path, limit: Option<usize>, all_types: bool) -> Result<()> {
    let mut ex = open_dump(settings, dump)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut seq = 0;

    while limit.map_or(true, |n| seq < n) && ex.advance() {
        if !all_types && ex.page_type() != PageType::Article {
            continue;
        }
        let fields = ex.fields();
        seq += 1;
        serde_json::to_writer(&mut out, &PageLine { seq, fields: &fields })?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

// ── Stats ──

fn print_stats(settings: &Settings, dump: &Path) -> Result<()> {
    let mut ex = open_dump(settings, dump)?;
    let pb = spinner()?;
    let mut counts: BTreeMap<PageType, usize> = BTreeMap::new();
    let mut stubs = 0usize;
    let mut total = 0usize;

    while ex.advance() {
        pb.inc(1);
        total += 1;
        *counts.entry(ex.page_type()).or_default() += 1;
        if ex.is_stub() {
            stubs += 1;
        }
    }
    pb.finish_and_clear();

    println!("{:<16} | {:>10}", "Type", "Pages");
    println!("{}", "-".repeat(29));
    for kind in PageType::ALL {
        println!("{:<16} | {:>10}", kind, counts.get(&kind).copied().unwrap_or(0));
    }
    println!("{}", "-".repeat(29));
    println!("{:<16} | {:>10}", "Total", total);
    println!("{:<16} | {:>10}", "Stubs", stubs);
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
