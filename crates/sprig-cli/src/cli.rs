use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sprig",
    about = "Sprig: a small local version control system",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working directory of the repository
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub directory: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new repository in the working directory
    Init,
    /// Stage a file for the next commit
    Add(FileArgs),
    /// Record the staged changes
    Commit(CommitArgs),
    /// Unstage a file, or mark a tracked file for removal
    Rm(FileArgs),
    /// Show the history of the current branch
    Log,
    /// Show every commit ever made
    GlobalLog,
    /// Print the ids of commits with the given message
    Find(FindArgs),
    /// Show branches, staged changes and working directory state
    Status,
    /// Switch branches or restore a file
    Checkout(CheckoutArgs),
    /// Create a branch at the current commit
    Branch(BranchArgs),
    /// Delete a branch
    RmBranch(BranchArgs),
    /// Move the current branch to a commit
    Reset(ResetArgs),
    /// Merge a branch into the current branch
    Merge(BranchArgs),
}

#[derive(Args)]
pub struct FileArgs {
    pub file: String,
}

#[derive(Args)]
pub struct CommitArgs {
    pub message: String,
}

#[derive(Args)]
pub struct FindArgs {
    pub message: String,
}

#[derive(Args)]
pub struct BranchArgs {
    pub name: String,
}

#[derive(Args)]
pub struct ResetArgs {
    pub commit: String,
}

/// `checkout <branch>`, `checkout -- <file>` or `checkout <commit> -- <file>`.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch to switch to, or the commit to restore from
    pub target: Option<String>,
    /// File to restore
    #[arg(last = true)]
    pub file: Option<String>,
}

/// A parsed checkout form.
#[derive(Debug, PartialEq, Eq)]
pub enum Checkout<'a> {
    Branch(&'a str),
    File(&'a str),
    FileFrom { commit: &'a str, file: &'a str },
}

impl CheckoutArgs {
    pub fn form(&self) -> Option<Checkout<'_>> {
        match (self.target.as_deref(), self.file.as_deref()) {
            (Some(branch), None) => Some(Checkout::Branch(branch)),
            (None, Some(file)) => Some(Checkout::File(file)),
            (Some(commit), Some(file)) => Some(Checkout::FileFrom { commit, file }),
            (None, None) => None,
        }
    }
}
