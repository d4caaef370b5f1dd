use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rift::config::RiftConfig;
use rift::document::Document;
use rift::error::RiftError;
use rift::git::GitWorkingTree;
use rift::parse;

/// Verify a file is conflict-free and mark it resolved
///
/// Refuses while any conflict marker line remains — including half-formed
/// blocks the parser cannot report as regions — then stages the file so git
/// considers the conflict resolved.
#[derive(Args, Debug)]
pub struct DoneArgs {
    /// File to mark resolved, relative to the repository root
    pub file: PathBuf,
}

pub fn run(args: &DoneArgs) -> Result<()> {
    let tree = GitWorkingTree::discover(&std::env::current_dir()?)?;
    let config = RiftConfig::load(tree.root())?;
    let text = tree.read_working(&args.file)?;

    let marker_lines = Document::from_text(&text)
        .lines()
        .iter()
        .filter(|line| parse::is_marker_line(line))
        .count();
    if marker_lines > 0 {
        return Err(RiftError::MarkersRemain {
            path: args.file.clone(),
            count: marker_lines,
        }
        .into());
    }

    if config.resolve.stage_on_done {
        tree.mark_resolved(&args.file, &text)?;
        println!("{}: marked resolved and staged", args.file.display());
    } else {
        tree.write_working(&args.file, &text)?;
        println!(
            "{}: clean; staging disabled by config, run `git add` to finish",
            args.file.display()
        );
    }
    Ok(())
}
