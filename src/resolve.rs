use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use rift::config::RiftConfig;
use rift::diff;
use rift::error::RiftError;
use rift::git::GitWorkingTree;
use rift::model::Choice;
use rift::session::{DocumentSession, ResolvedRegion};

/// Resolve conflict regions by taking one side
///
/// Loads the file, resolves the named regions (or every unresolved region
/// when none are named) with the chosen side, prints a rejection preview
/// for each decision, and writes the document back.
///
/// Examples:
///   rift resolve src/main.rs --take local
///   rift resolve src/main.rs --take remote --region 0 --region 2
///   rift resolve src/main.rs --take base --dry-run
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// File to resolve, relative to the repository root
    pub file: PathBuf,

    /// Which side to take
    #[arg(long, value_enum)]
    pub take: TakeSide,

    /// Region id(s) to resolve; omit to resolve all unresolved regions
    #[arg(long = "region")]
    pub regions: Vec<u64>,

    /// Skip the rejection preview
    #[arg(long)]
    pub no_preview: bool,

    /// Compute and report, but do not write the file
    #[arg(long)]
    pub dry_run: bool,
}

/// CLI spelling of the candidate side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TakeSide {
    Local,
    Remote,
    Base,
}

impl From<TakeSide> for Choice {
    fn from(side: TakeSide) -> Self {
        match side {
            TakeSide::Local => Self::Local,
            TakeSide::Remote => Self::Remote,
            TakeSide::Base => Self::Base,
        }
    }
}

pub fn run(args: &ResolveArgs) -> Result<()> {
    let tree = GitWorkingTree::discover(&std::env::current_dir()?)?;
    let config = RiftConfig::load(tree.root())?;

    let text = tree.read_working(&args.file)?;
    let mut session = DocumentSession::load(&text);
    let choice = Choice::from(args.take);

    let mut outcomes: Vec<ResolvedRegion> = Vec::new();
    if args.regions.is_empty() {
        outcomes = session.resolve_all(choice);
    } else {
        for &id in &args.regions {
            match session.resolve(id, choice) {
                Ok(outcome) => outcomes.push(outcome),
                // Unknown or stale ids are reported, never fatal.
                Err(err @ (RiftError::UnknownRegion { .. } | RiftError::AlreadyResolved { .. })) => {
                    eprintln!("warning: {err}");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    let show_preview = config.preview.enabled && !args.no_preview;
    for outcome in &outcomes {
        println!(
            "resolved #{} with {} ({} line(s) in, {} line(s) out)",
            outcome.id,
            outcome.choice,
            outcome.chosen.len(),
            outcome.rejected.len()
        );
        if show_preview {
            let preview = diff::render_rejection_preview_with_context(
                &outcome.chosen,
                &outcome.rejected,
                config.preview.context_lines,
            );
            println!("{preview}");
        }
    }

    if outcomes.is_empty() {
        println!("nothing to resolve in {}", args.file.display());
        return Ok(());
    }

    if args.dry_run {
        println!("dry run: {} not written", args.file.display());
    } else {
        tree.write_working(&args.file, &session.current_text())?;
    }

    let counts = session.counts();
    println!(
        "{}: {} of {} region(s) resolved, {} remaining",
        args.file.display(),
        counts.resolved,
        counts.total,
        counts.unresolved()
    );
    Ok(())
}
