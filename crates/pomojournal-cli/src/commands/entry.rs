//! Journal entry commands for CLI.

use std::io::Read;

use clap::Subcommand;
use pomojournal_core::journal::parse_tags;
use pomojournal_core::{EntryRepository, JournalEntry, SessionLog, Store};

use super::{local_time, report, CmdResult};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Save a new entry
    Add {
        /// Entry title
        #[arg(long, default_value = "")]
        title: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Entry body; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
        /// Save even if title and body are empty
        #[arg(long)]
        force: bool,
    },
    /// List entries, newest first
    List {
        /// Print the raw collection as JSON (creation order)
        #[arg(long)]
        json: bool,
    },
    /// Print one entry
    Show {
        /// Entry ID
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
    /// Delete every entry
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Save editor content as a note attached to the latest session
    Attach {
        /// Note title
        #[arg(long, default_value = "")]
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
    },
}

pub fn run(action: EntryAction) -> CmdResult {
    let store = Store::open_default()?;
    let mut repo = EntryRepository::open(store.clone());

    match action {
        EntryAction::Add {
            title,
            tags,
            content,
            force,
        } => {
            let title = title.trim().to_string();
            let content = match content {
                Some(c) => c,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            if title.is_empty() && content.trim().is_empty() && !force {
                return Err("entry appears empty; pass --force to save anyway".into());
            }
            let entry = report(repo.create(title, content, parse_tags(&tags)));
            println!("Entry saved: {}", entry.id);
        }
        EntryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(repo.list())?);
            } else if repo.is_empty() {
                println!("No saved entries yet");
            } else {
                for entry in repo.list().iter().rev() {
                    println!("{}", summary_line(entry));
                }
            }
        }
        EntryAction::Show { id } => match repo.get(&id) {
            Some(entry) => {
                println!("{}", summary_line(entry));
                println!();
                println!("{}", entry.content);
            }
            None => return Err(format!("Entry not found: {id}").into()),
        },
        EntryAction::Delete { id } => {
            if repo.get(&id).is_none() {
                println!("Entry not found: {id}");
            } else {
                report(repo.delete(&id));
                println!("Entry deleted: {id}");
            }
        }
        EntryAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear all entries without --yes".into());
            }
            let removed = report(repo.clear());
            println!("Cleared {removed} entries");
        }
        EntryAction::Attach { title, content } => {
            let sessions = SessionLog::open(store);
            let entry = report(repo.attach_to_session(&title, &content, sessions.latest())?);
            match &entry.attached_to_session {
                Some(session) => println!("Attached {} to session {session}", entry.id),
                None => println!("Saved {} (no session recorded yet)", entry.id),
            }
        }
    }
    Ok(())
}

fn summary_line(entry: &JournalEntry) -> String {
    let title = if entry.title.is_empty() {
        "(untitled)"
    } else {
        entry.title.as_str()
    };
    let mut line = format!("{}  {}  {}", entry.id, local_time(entry.created_at), title);
    if !entry.tags.is_empty() {
        line.push_str(&format!("  [{}]", entry.tags.join(", ")));
    }
    line
}
