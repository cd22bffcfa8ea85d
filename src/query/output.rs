use std::io::{self, IsTerminal, Write};

use crate::check::Diagnostic;
use crate::cli::OutputFormat;
use crate::query::functional::{AbstractMethod, Classification, ContributionReason};
use crate::query::stats::SnapshotStats;

fn bold(s: &str, use_color: bool) -> String {
    if use_color {
        format!("\x1b[1m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

fn location(d: &Diagnostic) -> String {
    match (&d.file, d.line) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.clone(),
        (None, _) => d.interface.clone(),
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Write diagnostics to `out` according to the selected output format.
pub fn render_diagnostics<W: Write>(
    out: &mut W,
    diagnostics: &[Diagnostic],
    format: &OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Compact => {
            for d in diagnostics {
                writeln!(out, "{} {} {}", d.rule, location(d), d.message)?;
            }
            writeln!(out, "{} issues found", diagnostics.len())?;
        }

        OutputFormat::Table => {
            let use_color = io::stdout().is_terminal();
            let loc_w = diagnostics
                .iter()
                .map(|d| location(d).len())
                .max()
                .unwrap_or(8)
                .max(8);
            let name_w = diagnostics
                .iter()
                .map(|d| d.interface.len())
                .max()
                .unwrap_or(9)
                .max(9);

            let header = format!(
                "{:<loc_w$}  {:<name_w$}  {}",
                "LOCATION", "INTERFACE", "MESSAGE"
            );
            writeln!(out, "{}", bold(&header, use_color))?;
            writeln!(out, "{}", "-".repeat(loc_w + name_w + 11))?;
            for d in diagnostics {
                writeln!(
                    out,
                    "{:<loc_w$}  {:<name_w$}  {}",
                    location(d),
                    d.interface,
                    d.message
                )?;
            }
        }

        OutputFormat::Json => write_json(out, diagnostics)?,
    }
    Ok(())
}

fn method_list(methods: &[AbstractMethod]) -> String {
    if methods.is_empty() {
        return String::new();
    }
    let names: Vec<String> = methods
        .iter()
        .map(|m| match m.line {
            Some(line) => format!("{}:{line}", m.name),
            None => m.name.clone(),
        })
        .collect();
    format!(" [{}]", names.join(", "))
}

fn describe(c: &Classification) -> String {
    let verdict = if c.is_candidate {
        "candidate"
    } else {
        "not a candidate"
    };
    let local = format!(
        "local abstract methods: {}{}",
        c.local_count,
        method_list(&c.abstract_methods)
    );
    match &c.contributor {
        None => format!("{verdict} ({local})"),
        Some(contributor) => {
            let why = match contributor.reason {
                ContributionReason::AbstractMethods { count } => {
                    format!("declares {count} abstract method(s)")
                }
                ContributionReason::Unresolved => "is unresolved".to_string(),
                ContributionReason::Cycle => "is part of a super-interface cycle".to_string(),
            };
            format!("{verdict} ({local}; ancestor {} {why})", contributor.ancestor)
        }
    }
}

/// Write classification explanations to `out` according to the selected output format.
pub fn render_classifications<W: Write>(
    out: &mut W,
    results: &[Classification],
    format: &OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Compact => {
            for c in results {
                writeln!(out, "{} {}", c.interface, describe(c))?;
            }
            writeln!(out, "{} interfaces classified", results.len())?;
        }

        OutputFormat::Table => {
            let use_color = io::stdout().is_terminal();
            let name_w = results
                .iter()
                .map(|c| c.interface.len())
                .max()
                .unwrap_or(9)
                .max(9);
            let header = format!(
                "{:<name_w$}  {:>9}  {:<9}  {}",
                "INTERFACE", "ABSTRACT", "SAM", "ANCESTOR"
            );
            writeln!(out, "{}", bold(&header, use_color))?;
            writeln!(out, "{}", "-".repeat(name_w + 32))?;
            for c in results {
                let ancestor = c
                    .contributor
                    .as_ref()
                    .map(|x| x.ancestor.as_str())
                    .unwrap_or("-");
                writeln!(
                    out,
                    "{:<name_w$}  {:>9}  {:<9}  {}",
                    c.interface,
                    c.local_count.to_string(),
                    if c.is_candidate { "yes" } else { "no" },
                    ancestor
                )?;
            }
        }

        OutputFormat::Json => write_json(out, results)?,
    }
    Ok(())
}

/// Write snapshot statistics to `out` according to the selected output format.
pub fn render_stats<W: Write>(
    out: &mut W,
    stats: &SnapshotStats,
    format: &OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Compact => {
            writeln!(out, "types {}", stats.type_count)?;
            writeln!(
                out,
                "interfaces {} classes {} enums {} annotations {} methods {}",
                stats.interfaces, stats.classes, stats.enums, stats.annotations, stats.methods,
            )?;
            writeln!(
                out,
                "super-interface edges {} with superclass {}",
                stats.super_interface_edges, stats.with_superclass
            )?;
            writeln!(out, "unresolved {}", stats.unresolved)?;
            writeln!(
                out,
                "candidates {} annotated {}",
                stats.candidates, stats.annotated
            )?;
        }

        OutputFormat::Table => {
            let use_color = io::stdout().is_terminal();
            writeln!(out, "{}", bold("=== Snapshot Overview ===", use_color))?;
            writeln!(out, "Types:       {}", stats.type_count)?;
            writeln!(out, "Unresolved:  {}", stats.unresolved)?;
            writeln!(out)?;
            writeln!(out, "{}", bold("--- Type Breakdown ---", use_color))?;
            writeln!(out, "  Interfaces:  {}", stats.interfaces)?;
            writeln!(out, "  Classes:     {}", stats.classes)?;
            writeln!(out, "  Enums:       {}", stats.enums)?;
            writeln!(out, "  Annotations: {}", stats.annotations)?;
            writeln!(out, "  Methods:     {}", stats.methods)?;
            writeln!(out)?;
            writeln!(out, "{}", bold("--- Hierarchy ---", use_color))?;
            writeln!(out, "  Super-interface edges: {}", stats.super_interface_edges)?;
            writeln!(out, "  With superclass:       {}", stats.with_superclass)?;
            writeln!(out)?;
            writeln!(out, "{}", bold("--- Functional Interfaces ---", use_color))?;
            writeln!(out, "  Candidates:  {}", stats.candidates)?;
            writeln!(out, "  Annotated:   {}", stats.annotated)?;
        }

        OutputFormat::Json => write_json(out, stats)?,
    }
    Ok(())
}
