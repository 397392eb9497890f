// VaporLog - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. The collect pipeline: locate root -> catalog -> discover -> copy
// 4. Sentinel-to-exit-code mapping (everything user-actionable exits 1)
//
// Status output goes to stdout; diagnostics go to tracing on stderr.

use clap::Parser;
use std::path::PathBuf;
use vaporlog::core::{catalog, collect::CollectionSession, discovery};
use vaporlog::platform::{self, config::AppConfig, locator, paths::PlatformPaths};
use vaporlog::util::error::CollectorError;
use vaporlog::util::format::format_file_size;
use vaporlog::util::{constants, logging};

/// VaporLog - collect game log files from a Vapor installation.
///
/// Finds the local Vapor installation, looks up an installed title by
/// name, sweeps its data directories for log/diagnostic files, and copies
/// them into a timestamped folder under ~/game-logs together with a
/// plain-text summary.
#[derive(Parser, Debug)]
#[command(name = "vaporlog", version, about)]
struct Cli {
    /// Title to collect logs for (case-insensitive; substring match).
    query: Option<String>,

    /// Installation root to use instead of auto-detection.
    root: Option<PathBuf>,

    /// List installed titles and exit.
    #[arg(long = "list")]
    list: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let (config, config_warnings) =
        platform::config::load_config(platform::config::project_config_dir().as_deref());

    logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "VaporLog starting"
    );

    // `--list [root]` puts the optional root in the first positional slot.
    let (query, root_arg) = if cli.list {
        (None, cli.query.clone().map(PathBuf::from).or(cli.root.clone()))
    } else {
        (cli.query.clone(), cli.root.clone())
    };

    if !cli.list && query.is_none() {
        eprintln!("Usage: vaporlog <title-query> [installation-root]");
        eprintln!("       vaporlog --list [installation-root]");
        std::process::exit(1);
    }

    if let Err(e) = run(cli.list, query.as_deref(), root_arg.as_deref(), &config) {
        tracing::error!(error = %e, "Collection failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(
    list: bool,
    query: Option<&str>,
    root_arg: Option<&std::path::Path>,
    config: &AppConfig,
) -> Result<(), CollectorError> {
    let platform = platform::paths::native();
    tracing::info!(os = %platform.os(), "Platform detected");

    let root = resolve_root(platform.as_ref(), root_arg)?;
    let titles = catalog::list_titles(&root);

    if list {
        println!("Installation root: {}", root.display());
        println!("{} installed title(s):", titles.len());
        for title in &titles {
            println!("  [{}] {}", title.id, title.name);
        }
        return Ok(());
    }

    // Presence is guaranteed by the argument check in main.
    let Some(query) = query else {
        return Ok(());
    };

    let title = catalog::find_by_name(&titles, query)
        .ok_or_else(|| CollectorError::TitleNotFound {
            query: query.to_string(),
        })?
        .clone();
    println!("Selected title: {} (id {})", title.name, title.id);

    let files = discovery::find_logs(platform.as_ref(), &root, &title, config.search_depth);
    if files.is_empty() {
        println!("No log files found for '{}'.", title.name);
        return Ok(());
    }

    println!("Found {} log file(s):", files.len());
    for file in &files {
        println!(
            "  {:<10} {:>10}  {}  {}",
            file.kind.label(),
            format_file_size(file.size),
            file.modified,
            file.filename
        );
    }

    let session = CollectionSession::create(platform.as_ref(), &title.name).ok_or_else(
        || CollectorError::OutputDirFailed {
            title: title.name.clone(),
        },
    )?;
    let output_dir = session.output_dir.clone();

    let copied = session.copy_logs(&files, &title.name);
    println!(
        "Copied {copied}/{} file(s) to {}",
        files.len(),
        output_dir.display()
    );

    Ok(())
}

/// Use the supplied root after validating it, or fall back to
/// auto-detection. Both failures map to exit code 1 in `main`.
fn resolve_root(
    platform: &dyn PlatformPaths,
    root_arg: Option<&std::path::Path>,
) -> Result<PathBuf, CollectorError> {
    match root_arg {
        Some(root) => {
            if root.is_dir() && platform.is_install_root(root) {
                tracing::info!(root = %root.display(), "Using supplied installation root");
                Ok(root.to_path_buf())
            } else {
                Err(CollectorError::InvalidRoot {
                    path: root.to_path_buf(),
                })
            }
        }
        None => locator::find_installation_root(platform).ok_or(CollectorError::RootNotFound),
    }
}
