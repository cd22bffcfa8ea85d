use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use regex::RegexBuilder;
use tracing_subscriber::EnvFilter;

use sam_check::cli::{Cli, Commands};
use sam_check::config::SamCheckConfig;
use sam_check::query::output::{render_classifications, render_diagnostics, render_stats};
use sam_check::query::stats::snapshot_stats;
use sam_check::snapshot::{self, pack};
use sam_check::{FunctionalInterfaceClassifier, JavaVersion, SamAnnotatedCheck, TypeGraph};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(path: &Path) -> Result<TypeGraph> {
    let snapshot = snapshot::load(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    let graph = snapshot
        .build_graph()
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    Ok(graph)
}

fn config_dir(snapshot: &Path) -> &Path {
    match snapshot.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            snapshot,
            java_version,
            format,
        } => {
            let config = SamCheckConfig::load(config_dir(&snapshot));
            let graph = load_graph(&snapshot)?;
            let version = java_version
                .as_deref()
                .map_or_else(|| config.java_version(), JavaVersion::parse);
            let check = SamAnnotatedCheck::new(version).with_exclusions(config.exclude_patterns());
            let diagnostics = check.run(&graph);
            render_diagnostics(&mut io::stdout().lock(), &diagnostics, &format)?;
        }

        Commands::Classify {
            pattern,
            snapshot,
            case_insensitive,
            format,
        } => {
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(case_insensitive)
                .build()
                .with_context(|| format!("invalid pattern {pattern:?}"))?;
            let graph = load_graph(&snapshot)?;
            let classifier = FunctionalInterfaceClassifier::new(&graph);

            let mut results: Vec<_> = graph
                .interfaces()
                .into_iter()
                .filter(|&idx| re.is_match(graph.node(idx).name()))
                .map(|idx| classifier.explain(idx))
                .collect();
            results.sort_by(|a, b| a.interface.cmp(&b.interface));

            if results.is_empty() {
                anyhow::bail!("no interface matches {pattern:?}");
            }
            render_classifications(&mut io::stdout().lock(), &results, &format)?;
        }

        Commands::Stats { snapshot, format } => {
            let graph = load_graph(&snapshot)?;
            render_stats(&mut io::stdout().lock(), &snapshot_stats(&graph), &format)?;
        }

        Commands::Pack { input, output } => {
            let snapshot = snapshot::load(&input)
                .with_context(|| format!("failed to load snapshot {}", input.display()))?;
            snapshot
                .build_graph()
                .with_context(|| format!("invalid snapshot {}", input.display()))?;
            pack::save_packed(&output, &snapshot)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "Packed {} types into {}",
                snapshot.types.len(),
                output.display()
            );
        }
    }

    Ok(())
}
