use anyhow::Result;
use clap::{Parser, Subcommand};

mod done;
mod resolve;
mod revert;
mod show;
mod status;
mod strip;

/// Incremental merge-conflict resolution for git working trees
///
/// rift parses the conflict markers git leaves in your files into addressable
/// regions, lets you resolve them one at a time (or all at once) while showing
/// exactly what each decision rejects, and stages files once they are clean.
///
/// QUICK START:
///
///   # After a merge stops on conflicts:
///   rift status                      # which files, how many regions
///   rift show src/main.rs            # inspect the regions in one file
///   rift resolve src/main.rs --take local --region 0
///   rift resolve src/main.rs --take remote   # everything still unresolved
///   rift done src/main.rs            # verify clean, stage the file
///
/// CHANGING YOUR MIND:
///
///   rift revert src/main.rs          # bring the markers back from the index
///
/// Every resolution prints a rejection preview — the content you did NOT
/// take — so nothing disappears silently.
#[derive(Parser)]
#[command(name = "rift")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'rift <command> --help' for more information on a specific command.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files with unresolved conflicts
    Status(status::StatusArgs),

    /// Show the conflict regions in one file
    Show(show::ShowArgs),

    /// Resolve conflict regions by taking one side
    Resolve(resolve::ResolveArgs),

    /// Restore a file's conflict markers from the index
    Revert(revert::RevertArgs),

    /// Remove stray conflict marker lines from a file
    Strip(strip::StripArgs),

    /// Verify a file is conflict-free and mark it resolved
    Done(done::DoneArgs),
}

fn main() -> Result<()> {
    rift::telemetry::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Status(ref args) => status::run(args),
        Commands::Show(ref args) => show::run(args),
        Commands::Resolve(ref args) => resolve::run(args),
        Commands::Revert(ref args) => revert::run(args),
        Commands::Strip(ref args) => strip::run(args),
        Commands::Done(ref args) => done::run(args),
    }
}
