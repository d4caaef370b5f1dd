use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use rift::git::GitWorkingTree;
use rift::parse;

/// Restore a file's conflict markers from the index
///
/// Checks the unmerged file back out of the index with `--merge`, bringing
/// every conflict region back exactly as the merge left it. Any resolutions
/// written to the working tree for this file are discarded.
#[derive(Args, Debug)]
pub struct RevertArgs {
    /// File to revert, relative to the repository root
    pub file: PathBuf,
}

pub fn run(args: &RevertArgs) -> Result<()> {
    let tree = GitWorkingTree::discover(&std::env::current_dir()?)?;
    tree.restore_conflict(&args.file)?;

    let text = tree.read_working(&args.file)?;
    let regions = parse::parse(&text).len();
    println!(
        "{}: restored {} conflict region(s)",
        args.file.display(),
        regions
    );
    Ok(())
}
