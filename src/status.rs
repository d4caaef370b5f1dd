use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use rift::git::GitWorkingTree;
use rift::parse;

/// List files with unresolved conflicts
///
/// Enumerates the unmerged paths git reports and counts the conflict
/// regions each one still carries.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusEnvelope {
    files: Vec<FileStatus>,
}

#[derive(Serialize)]
struct FileStatus {
    path: PathBuf,
    regions: usize,
}

pub fn run(args: &StatusArgs) -> Result<()> {
    let tree = GitWorkingTree::discover(&std::env::current_dir()?)?;

    let mut files = Vec::new();
    for path in tree.conflicted_paths()? {
        let text = tree.read_working(&path)?;
        let regions = parse::parse(&text).len();
        files.push(FileStatus { path, regions });
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&StatusEnvelope { files })?
        );
        return Ok(());
    }

    if files.is_empty() {
        println!("No unresolved conflicts.");
    } else {
        println!("{} conflicted file(s):", files.len());
        for file in &files {
            println!("  {}: {} region(s)", file.path.display(), file.regions);
        }
    }
    Ok(())
}
