//! magnetar - Inspect magnet links and the BitTorrent info-hashes they carry
//!
//! This tool parses magnet URIs given on the command line or listed in a
//! file and prints what each of them contains.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use magnetar_core::{MagnetLink, ParseOptions, TorrentMagnetLink};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;

/// Inspect magnet links and the BitTorrent info-hashes they carry
#[derive(Parser, Debug)]
#[command(name = "magnetar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Magnet links to parse
    links: Vec<String>,

    /// File with one magnet link per line (blank lines and `#` comments are skipped)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Reject parameters outside the magnet grammar
    #[arg(long)]
    strict: bool,

    /// Require every link to carry a BitTorrent info-hash
    #[arg(long)]
    torrent: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Output format for parsed links
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Readable summary of every parameter
    Text,
    /// One `algorithm:hex` line per info-hash (for scripting)
    Hashes,
}

#[derive(Default)]
struct RunStats {
    parsed: usize,
    failed: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let mut links = cli.links.clone();
    if let Some(ref file) = cli.file {
        links.extend(read_links(file)?);
    }
    if links.is_empty() {
        bail!("No magnet links given (pass them as arguments or with --file)");
    }

    let options = ParseOptions::new().strict(cli.strict);
    let mut stats = RunStats::default();

    for link in &links {
        match render_link(&cli, &options, link) {
            Ok(output) => {
                print!("{}", output);
                stats.parsed += 1;
            }
            Err(e) => {
                // Log error but continue with other links
                warn!("Failed to parse {}: {:#}", link, e);
                stats.failed += 1;
            }
        }
    }

    info!("Summary: {} parsed, {} failed", stats.parsed, stats.failed);

    if stats.failed > 0 {
        bail!("{} of {} magnet links failed to parse", stats.failed, links.len());
    }
    Ok(())
}

/// Read magnet links from a file, one per line
fn read_links(path: &Path) -> Result<Vec<String>> {
    trace!("Reading {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read link file: {}", path.display()))?;

    let links: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("Read {} link(s) from {}", links.len(), path.display());
    Ok(links)
}

/// Parse one link and render it in the requested format
fn render_link(cli: &Cli, options: &ParseOptions, uri: &str) -> Result<String> {
    let link = Arc::new(MagnetLink::parse_with_options(uri, options)?);

    let torrent = if cli.torrent || cli.format == OutputFormat::Hashes {
        Some(link.as_torrent()?)
    } else {
        // Plain magnet links are fine here, a broken btih is not
        match link.as_torrent() {
            Ok(torrent) => Some(torrent),
            Err(e) if e.is_wrong_type() => None,
            Err(e) => return Err(e.into()),
        }
    };

    let output = match cli.format {
        OutputFormat::Hashes => torrent.as_ref().map(render_hashes).unwrap_or_default(),
        OutputFormat::Text => render_text(&link, torrent.as_ref())?,
    };
    Ok(output)
}

fn render_hashes(torrent: &TorrentMagnetLink) -> String {
    torrent
        .info_hashes()
        .iter()
        .map(|hash| format!("{}\n", hash))
        .collect()
}

fn render_text(link: &MagnetLink, torrent: Option<&TorrentMagnetLink>) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "magnet link")?;
    write_list(&mut out, "display name", &link.display_names)?;
    for topic in &link.exact_topics {
        writeln!(out, "  exact topic: {}", topic)?;
    }
    if let Some(torrent) = torrent {
        for hash in torrent.info_hashes() {
            writeln!(out, "  info-hash: {} ({} bytes)", hash, hash.as_bytes().len())?;
        }
    }
    for length in &link.exact_lengths {
        writeln!(out, "  exact length: {}", length)?;
    }
    write_list(&mut out, "acceptable source", &link.acceptable_sources)?;
    write_list(&mut out, "exact source", &link.exact_sources)?;
    write_list(&mut out, "keyword topic", &link.keyword_topics)?;
    write_list(&mut out, "manifest topic", &link.manifest_topics)?;
    write_list(&mut out, "tracker", &link.trackers)?;
    for range in &link.select_only {
        if range.is_single() {
            writeln!(out, "  select only: {}", range.start)?;
        } else {
            writeln!(out, "  select only: {}-{}", range.start, range.end)?;
        }
    }
    for (name, values) in &link.experimental {
        writeln!(out, "  x.{}: {}", name, values.join(", "))?;
    }
    for (name, values) in &link.unknown {
        writeln!(out, "  unknown {}: {}", name, values.join(", "))?;
    }

    Ok(out)
}

fn write_list(out: &mut String, label: &str, values: &[String]) -> std::fmt::Result {
    for value in values {
        writeln!(out, "  {}: {}", label, value)?;
    }
    Ok(())
}
