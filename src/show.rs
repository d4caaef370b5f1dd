use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rift::git::GitWorkingTree;
use rift::model::ConflictRegion;
use rift::parse::{BASE_SEPARATOR, CONFLICT_END, CONFLICT_START, MIDDLE_SEPARATOR};
use rift::session::DocumentSession;

/// Show the conflict regions in one file
///
/// Lists each region with its stable id, line span, and a one-line preview
/// of both sides. `--annotate` prints the whole document with every line
/// labeled by its role inside (or outside) a conflict block.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// File to inspect, relative to the repository root
    pub file: PathBuf,

    /// Machine-readable JSON output
    #[arg(long, conflicts_with = "annotate")]
    pub json: bool,

    /// Print the document with role-labeled lines
    #[arg(long)]
    pub annotate: bool,
}

pub fn run(args: &ShowArgs) -> Result<()> {
    let tree = GitWorkingTree::discover(&std::env::current_dir()?)?;
    let text = tree.read_working(&args.file)?;
    let session = DocumentSession::load(&text);
    let regions = session.store().regions();

    if args.json {
        println!("{}", serde_json::to_string_pretty(regions)?);
        return Ok(());
    }

    if args.annotate {
        for line in annotate(session.document().lines(), regions) {
            println!("{line}");
        }
        return Ok(());
    }

    if regions.is_empty() {
        println!("{}: no conflict regions", args.file.display());
        return Ok(());
    }

    println!(
        "{}: {} conflict region(s)",
        args.file.display(),
        regions.len()
    );
    for region in regions {
        println!(
            "  #{}  lines {}..={}  {} vs {}",
            region.id,
            region.start,
            region.end,
            preview(&region.local_lines),
            preview(&region.remote_lines),
        );
    }
    Ok(())
}

/// First line of a candidate, clipped for one-line display.
fn preview(lines: &[String]) -> String {
    match lines.first() {
        None => "(empty)".to_owned(),
        Some(first) => {
            let mut p: String = first.chars().take(28).collect();
            if first.chars().count() > 28 || lines.len() > 1 {
                p.push('…');
            }
            format!("\"{p}\"")
        }
    }
}

/// Label every document line with its role inside a conflict block.
fn annotate(lines: &[String], regions: &[ConflictRegion]) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| format!("{} {line}", role_tag(index, line, regions)))
        .collect()
}

fn role_tag(index: usize, line: &str, regions: &[ConflictRegion]) -> &'static str {
    if line.starts_with(CONFLICT_START) {
        return "<<";
    }
    if line.starts_with(BASE_SEPARATOR) {
        return "||";
    }
    if line.starts_with(MIDDLE_SEPARATOR) {
        return "==";
    }
    if line.starts_with(CONFLICT_END) {
        return ">>";
    }
    for region in regions {
        if region.is_resolved() || index < region.start || index > region.end {
            continue;
        }
        if let Some(base) = region.separator_base
            && index > base
            && index < region.separator_middle
        {
            return " B";
        }
        if index < region.separator_middle {
            return " L";
        }
        return " R";
    }
    "  "
}
