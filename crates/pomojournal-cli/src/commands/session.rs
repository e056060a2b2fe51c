use clap::Subcommand;
use pomojournal_core::{SessionLog, Store};

use super::{local_time, CmdResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// List completed work sessions, newest first
    List {
        /// Print the raw collection as JSON (recording order)
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SessionAction) -> CmdResult {
    let log = SessionLog::open(Store::open_default()?);

    match action {
        SessionAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(log.list())?);
            } else if log.list().is_empty() {
                println!("No sessions yet");
            } else {
                for s in log.list().iter().rev() {
                    println!("{}  {} ({} min)  {}", local_time(s.when), s.mode, s.length_min, s.id);
                }
                println!("{} session(s), {} min total", log.list().len(), log.total_minutes());
            }
        }
    }
    Ok(())
}
