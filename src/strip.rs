use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rift::document::Document;
use rift::git::GitWorkingTree;
use rift::parse;

/// Remove stray conflict marker lines from a file
///
/// Drops every line carrying one of the four marker prefixes and keeps all
/// content lines — the escape hatch for half-formed blocks the parser
/// cannot report as regions.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// File to clean up, relative to the repository root
    pub file: PathBuf,

    /// Report what would be removed without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &StripArgs) -> Result<()> {
    let tree = GitWorkingTree::discover(&std::env::current_dir()?)?;
    let text = tree.read_working(&args.file)?;

    let marker_lines = Document::from_text(&text)
        .lines()
        .iter()
        .filter(|line| parse::is_marker_line(line))
        .count();

    if marker_lines == 0 {
        println!("{}: no marker lines found", args.file.display());
        return Ok(());
    }

    if args.dry_run {
        println!(
            "dry run: would remove {} marker line(s) from {}",
            marker_lines,
            args.file.display()
        );
        return Ok(());
    }

    tree.write_working(&args.file, &parse::strip_marker_lines(&text))?;
    println!(
        "{}: removed {} marker line(s)",
        args.file.display(),
        marker_lines
    );
    Ok(())
}
