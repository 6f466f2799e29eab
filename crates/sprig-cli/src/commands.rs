use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use sprig_repo::{MergeOutcome, RepoConfig, Repository};

use crate::cli::*;
use crate::report;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let root = cli.directory.as_path();
    match cli.command {
        Command::Init => cmd_init(root),
        Command::Add(args) => with_repo(root, |repo| Ok(repo.add(&args.file)?)),
        Command::Commit(args) => cmd_commit(root, args),
        Command::Rm(args) => with_repo(root, |repo| Ok(repo.remove(&args.file)?)),
        Command::Log => cmd_log(root, false),
        Command::GlobalLog => cmd_log(root, true),
        Command::Find(args) => cmd_find(root, args),
        Command::Status => cmd_status(root),
        Command::Checkout(args) => cmd_checkout(root, args),
        Command::Branch(args) => with_repo(root, |repo| Ok(repo.branch(&args.name)?)),
        Command::RmBranch(args) => with_repo(root, |repo| Ok(repo.remove_branch(&args.name)?)),
        Command::Reset(args) => cmd_reset(root, args),
        Command::Merge(args) => cmd_merge(root, args),
    }
}

/// Open the repository, run `op`, and persist the state if it succeeded.
fn with_repo<T>(
    root: &Path,
    op: impl FnOnce(&mut Repository) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let mut repo = Repository::open(root)?;
    let out = op(&mut repo)?;
    repo.persist().context("failed to save repository state")?;
    Ok(out)
}

fn cmd_init(root: &Path) -> anyhow::Result<()> {
    let repo = Repository::init(root, RepoConfig::default())?;
    println!(
        "{} Initialized sprig repository in {}",
        "✓".green().bold(),
        root.display().to_string().bold()
    );
    println!("  Branch: {}", repo.current_branch().yellow());
    Ok(())
}

fn cmd_commit(root: &Path, args: CommitArgs) -> anyhow::Result<()> {
    let id = with_repo(root, |repo| Ok(repo.commit(&args.message)?))?;
    println!("[{}] {}", id.abbrev().yellow(), args.message);
    Ok(())
}

fn cmd_log(root: &Path, global: bool) -> anyhow::Result<()> {
    let repo = Repository::open(root)?;
    let entries = if global {
        repo.global_log()?
    } else {
        repo.log()?
    };
    print!("{}", report::log(&entries));
    Ok(())
}

fn cmd_find(root: &Path, args: FindArgs) -> anyhow::Result<()> {
    let repo = Repository::open(root)?;
    let ids = repo.find(&args.message)?;
    if ids.is_empty() {
        bail!("found no commit with that message");
    }
    for id in ids {
        println!("{}", id.to_hex());
    }
    Ok(())
}

fn cmd_status(root: &Path) -> anyhow::Result<()> {
    let repo = Repository::open(root)?;
    let status = repo.status()?;
    print!(
        "{}",
        report::status(repo.current_branch(), &repo.branches(), &status)
    );
    Ok(())
}

fn cmd_checkout(root: &Path, args: CheckoutArgs) -> anyhow::Result<()> {
    let Some(form) = args.form() else {
        bail!("usage: checkout <branch> | checkout -- <file> | checkout <commit> -- <file>");
    };
    with_repo(root, |repo| {
        match form {
            Checkout::Branch(name) => {
                repo.checkout_branch(name)?;
                println!("Switched to {}", name.yellow().bold());
            }
            Checkout::File(file) => repo.checkout_file(file)?,
            Checkout::FileFrom { commit, file } => repo.checkout_file_from(commit, file)?,
        }
        Ok(())
    })
}

fn cmd_reset(root: &Path, args: ResetArgs) -> anyhow::Result<()> {
    let head = with_repo(root, |repo| Ok(repo.reset(&args.commit)?))?;
    println!("HEAD is now at {}", head.abbrev().yellow());
    Ok(())
}

fn cmd_merge(root: &Path, args: BranchArgs) -> anyhow::Result<()> {
    let outcome = with_repo(root, |repo| Ok(repo.merge(&args.name)?))?;
    match outcome {
        MergeOutcome::GivenIsAncestor => {
            println!("Given branch is an ancestor of the current branch.");
        }
        MergeOutcome::FastForwarded { head } => {
            println!(
                "{} Current branch fast-forwarded to {}.",
                "✓".green(),
                head.abbrev().yellow()
            );
        }
        MergeOutcome::Merged { commit, conflicts } => {
            if conflicts.is_empty() {
                println!("{} Merged {} as {}.", "✓".green(), args.name.yellow(), commit.abbrev());
            } else {
                println!("{}", "Encountered a merge conflict.".red().bold());
                for file in &conflicts {
                    println!("  {} {}", "conflict:".red(), file);
                }
            }
        }
    }
    Ok(())
}
