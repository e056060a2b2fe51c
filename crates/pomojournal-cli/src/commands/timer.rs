use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use pomojournal_core::timer::{format_clock, parse_minutes, run_foreground, DriveOptions};
use pomojournal_core::{
    Config, Event, PomodoroTimer, SessionCompleted, SessionLog, Store, TimerConfig,
};

use super::{report, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground until Ctrl-C
    Run {
        /// Work minutes (overrides config)
        #[arg(long)]
        work: Option<String>,
        /// Short break minutes (overrides config)
        #[arg(long)]
        short: Option<String>,
        /// Long break minutes (overrides config)
        #[arg(long)]
        long: Option<String>,
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
        /// Tick period in milliseconds
        #[arg(long, default_value = "1000", hide = true)]
        period_ms: u64,
    },
    /// Print the state a fresh timer starts in, as JSON
    Status,
}

/// Flag value if it parses as positive minutes, else the configured value.
fn override_minutes(flag: Option<&str>, configured: u32) -> u32 {
    flag.and_then(parse_minutes).unwrap_or(configured)
}

fn timer_config(config: &Config, work: Option<&str>, short: Option<&str>, long: Option<&str>) -> TimerConfig {
    TimerConfig::new(
        override_minutes(work, config.timer.work_min),
        override_minutes(short, config.timer.short_break_min),
        override_minutes(long, config.timer.long_break_min),
    )
}

pub fn run(action: TimerAction) -> CmdResult {
    let config = Config::load();

    match action {
        TimerAction::Run {
            work,
            short,
            long,
            ticks,
            period_ms,
        } => {
            let cfg = timer_config(&config, work.as_deref(), short.as_deref(), long.as_deref());
            let mut sessions = SessionLog::open(Store::open_default()?);
            let mut timer = PomodoroTimer::new(cfg);
            let options = DriveOptions {
                period: Duration::from_millis(period_ms.max(1)),
                max_ticks: ticks,
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .enable_io()
                .build()?;
            let summary = runtime.block_on(async {
                let stop = async {
                    if tokio::signal::ctrl_c().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                };
                run_foreground(&mut timer, options, stop, |timer, events| {
                    render(timer, events);
                    for event in events {
                        if let Event::SessionCompleted { mode, length_min, .. } = event {
                            let session = report(sessions.record(SessionCompleted {
                                mode: *mode,
                                length_min: *length_min,
                            }));
                            println!("\nSession recorded: {} ({} min)", session.id, session.length_min);
                        }
                    }
                })
                .await
            });

            println!(
                "\nPaused ({}) at {} after {} tick(s), {} session(s) completed",
                timer.mode(),
                format_clock(timer.remaining_seconds()),
                summary.ticks,
                summary.sessions_completed
            );
        }
        TimerAction::Status => {
            let cfg = timer_config(&config, None, None, None);
            let timer = PomodoroTimer::new(cfg);
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
    }
    Ok(())
}

fn render(timer: &PomodoroTimer, events: &[Event]) {
    for event in events {
        if let Event::ModeChanged { from, to, .. } = event {
            println!("\n{from} finished, starting {to}");
        }
    }
    print!(
        "\r{:<10} {}  cycles: {}",
        timer.mode().as_str().to_uppercase(),
        format_clock(timer.remaining_seconds()),
        timer.completed_work_cycles()
    );
    let _ = std::io::stdout().flush();
}
