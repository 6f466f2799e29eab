//! Plain-text reports printed by `log`, `global-log` and `status`.

use sprig_index::WorkdirStatus;
use sprig_repo::LogEntry;
use sprig_types::ObjectId;

pub fn log_entry(entry: &LogEntry) -> String {
    let commit = &entry.commit;
    let mut out = format!("===\ncommit {}\n", entry.id.to_hex());
    if let (Some(first), Some(second)) = (commit.parents.first(), commit.parents.second()) {
        out.push_str(&format!("Merge: {} {}\n", first.abbrev(), second.abbrev()));
    }
    out.push_str(&format!("Date: {}\n{}\n\n", commit.timestamp, commit.message));
    out
}

pub fn log(entries: &[LogEntry]) -> String {
    entries.iter().map(log_entry).collect()
}

/// The five status sections, in order, each followed by a blank line.
pub fn status(current: &str, branches: &[(String, ObjectId)], status: &WorkdirStatus) -> String {
    let mut out = String::new();

    section(&mut out, "Branches", branches.iter().map(|(name, _)| {
        if name == current {
            format!("*{name}")
        } else {
            name.clone()
        }
    }));
    section(&mut out, "Staged Files", status.staged.iter().cloned());
    section(&mut out, "Removed Files", status.removed.iter().cloned());
    section(
        &mut out,
        "Modifications Not Staged For Commit",
        status
            .unstaged
            .iter()
            .map(|entry| format!("{} ({})", entry.path, entry.status)),
    );
    section(&mut out, "Untracked Files", status.untracked.iter().cloned());
    out
}

fn section(out: &mut String, title: &str, lines: impl Iterator<Item = String>) {
    out.push_str(&format!("=== {title} ===\n"));
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
}
