//! Command-line surface

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::{ContextId, ContextLibrary};
use crate::config::Config;
use crate::engine::{Simulator, Submission};
use crate::exercises::{self, chart};
use crate::presenter::{self, SessionOutcome, TerminalPresenter};
use crate::progress::{CompletionOutcome, JsonFileStore, Progress, CHALLENGE_COUNT};

#[derive(Parser, Debug)]
#[command(
    name = "pipeline-sim",
    version,
    about = "Practice a build, publish and deploy pipeline in simulated consoles"
)]
pub struct Cli {
    /// Data directory (defaults to ~/.pipeline-sim)
    #[arg(long, global = true, env = "PIPELINE_SIM_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Print scripted output without delays
    #[arg(long, global = true)]
    pub instant: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open an interactive console
    Shell {
        #[arg(short, long, default_value_t = 2)]
        context: u32,
    },
    /// Run one command in a console and wait for its output
    Run {
        #[arg(short, long)]
        context: u32,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// List consoles and the commands they understand
    Commands {
        #[arg(short, long)]
        context: Option<u32>,
    },
    /// Show or change challenge progress
    Progress {
        #[command(subcommand)]
        action: Option<ProgressAction>,
    },
    /// Grade a step ordering, e.g. `check-order 1 3 2 4`
    CheckOrder {
        #[arg(required = true)]
        steps: Vec<u32>,
    },
    /// Grade fill-in-the-blank answers
    CheckBlanks {
        /// Expected answer, once per blank
        #[arg(long = "expected", required = true)]
        expected: Vec<String>,
        answers: Vec<String>,
    },
    /// Grade a multiple-choice pick, e.g. `check-answer 2 --correct 3`
    CheckAnswer {
        /// Option picked (1-based)
        chosen: usize,
        /// Option that is right (1-based)
        #[arg(long)]
        correct: usize,
    },
    /// Show the sample chart files
    Chart { file: Option<String> },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ProgressAction {
    Show,
    Complete { challenge: u8 },
    Reset,
}

impl Cli {
    /// Whether stdout should receive ANSI colours
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
    }
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let color = cli.use_color();
    match cli.command {
        None => shell(&config, ContextId(2), color).await,
        Some(Command::Shell { context }) => shell(&config, ContextId(context), color).await,
        Some(Command::Run { context, command }) => {
            run_once(&config, ContextId(context), &command.join(" "), color).await
        }
        Some(Command::Commands { context }) => {
            let library = load_library(&config)?;
            list_commands(&library, context.map(ContextId), &mut io::stdout().lock())?;
            Ok(())
        }
        Some(Command::Progress { action }) => {
            progress(&config, action.unwrap_or(ProgressAction::Show), &mut io::stdout().lock())
        }
        Some(Command::CheckOrder { steps }) => {
            let report = exercises::check_order(&steps);
            let mut out = io::stdout().lock();
            for item in &report.items {
                let mark = if item.correct { "ok " } else { "xx " };
                writeln!(out, "{mark}{}. step {}", item.position, item.step)?;
            }
            writeln!(out, "{}", report.feedback())?;
            Ok(())
        }
        Some(Command::CheckBlanks { expected, answers }) => {
            let report = exercises::check_blanks(&expected, &answers);
            writeln!(io::stdout().lock(), "{}", report.feedback())?;
            Ok(())
        }
        Some(Command::CheckAnswer { chosen, correct }) => {
            let verdict = exercises::check_answer(chosen, correct);
            let mut out = io::stdout().lock();
            if let Some(option) = verdict.highlight() {
                writeln!(out, "Correct answer: option {option}")?;
            }
            writeln!(out, "{}", verdict.feedback())?;
            Ok(())
        }
        Some(Command::Chart { file }) => {
            let mut out = io::stdout().lock();
            match file {
                Some(id) => {
                    let (title, body) = chart::view(&id);
                    writeln!(out, "# {title}\n{body}")?;
                }
                None => {
                    for file in chart::CHART_FILES {
                        writeln!(out, "{:<16} {}", file.id, file.path)?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn load_library(config: &Config) -> Result<ContextLibrary> {
    config.load_library().context("Failed to load command catalog")
}

async fn shell(config: &Config, context: ContextId, color: bool) -> Result<()> {
    let library = Arc::new(load_library(config)?);
    {
        let mut out = io::stdout().lock();
        match library.context(context) {
            Some(console) => {
                writeln!(out, "{} (console {})", console.title, console.id)?;
                writeln!(out, "Suggested commands:")?;
                for command in console.commands.commands() {
                    writeln!(out, "  {command}")?;
                }
            }
            None => writeln!(out, "Console {context} has no scripted commands")?,
        }
        writeln!(out, "Type a command and press Enter; `exit` quits.")?;
    }

    let (simulator, mut events) = Simulator::new(library, config.simulator_options());
    // The typed line is already on screen; don't echo it again
    let mut presenter = TerminalPresenter::stdout(color).with_echo(false);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { break };
                if matches!(line.trim(), "exit" | "quit") {
                    break;
                }
                simulator.submit_command(context, &line);
            }
            Some(event) = events.recv() => {
                presenter::present(&mut presenter, &event);
            }
        }
    }

    // Input is over; sessions already scheduled still play to the end
    while simulator.scheduler().total_active() > 0 || !events.is_empty() {
        let Some(event) = events.recv().await else {
            break;
        };
        presenter::present(&mut presenter, &event);
    }

    Ok(())
}

async fn run_once(config: &Config, context: ContextId, command: &str, color: bool) -> Result<()> {
    let library = Arc::new(load_library(config)?);
    let (simulator, mut events) = Simulator::new(library, config.simulator_options());
    let mut presenter = TerminalPresenter::stdout(color);

    let submission = simulator.submit_command(context, command);
    let Some(session) = submission.session() else {
        return Ok(());
    };
    if let Submission::Playing { command, rule, .. } = &submission {
        tracing::debug!(command = %command, rule = rule.as_str(), "Running scripted command");
    }

    match presenter::present_until_finished(&mut events, &mut presenter, session.id).await {
        SessionOutcome::Completed | SessionOutcome::Cancelled => Ok(()),
        SessionOutcome::Disconnected => anyhow::bail!("playback ended unexpectedly"),
    }
}

/// Print every context (or just `only`) with its commands
pub fn list_commands(
    library: &ContextLibrary,
    only: Option<ContextId>,
    out: &mut impl Write,
) -> io::Result<()> {
    if let Some(id) = only {
        if !library.contains(id) {
            writeln!(out, "Console {id} has no scripted commands")?;
            return Ok(());
        }
    }

    for console in library.contexts() {
        if only.is_some_and(|id| id != console.id) {
            continue;
        }
        writeln!(out, "[{}] {}", console.id, console.title)?;
        for command in console.commands.commands() {
            writeln!(out, "    {command}")?;
        }
    }
    Ok(())
}

fn progress(config: &Config, action: ProgressAction, out: &mut impl Write) -> Result<()> {
    let store = JsonFileStore::new(config.progress_path.clone());
    let mut progress = Progress::open(store).context("Failed to load progress")?;

    match action {
        ProgressAction::Show => {}
        ProgressAction::Complete { challenge } => match progress.complete(challenge)? {
            CompletionOutcome::AlreadyCompleted => {
                writeln!(out, "Challenge {challenge} was already completed")?;
            }
            CompletionOutcome::Completed {
                points,
                unlocked,
                finished,
            } => {
                writeln!(out, "✅ Challenge {challenge} completed (+{points})")?;
                if let Some(next) = unlocked {
                    writeln!(out, "🔓 Challenge {next} unlocked")?;
                }
                if finished {
                    writeln!(out, "🏁 Pipeline complete! Final score: {}", progress.score())?;
                }
            }
        },
        ProgressAction::Reset => {
            progress.reset()?;
            writeln!(out, "Progress reset")?;
        }
    }

    let rank = progress.rank();
    writeln!(
        out,
        "Score: {}  Completed: {}/{} ({}%)  Rank: {} {}",
        progress.score(),
        progress.completed_count(),
        CHALLENGE_COUNT,
        progress.percent(),
        rank.icon,
        rank.title
    )?;
    for challenge in 1..=CHALLENGE_COUNT {
        let status = if progress.is_completed(challenge) {
            "done"
        } else if progress.active_challenge() == Some(challenge) {
            "active"
        } else if progress.is_unlocked(challenge) {
            "open"
        } else {
            "locked"
        };
        writeln!(out, "  {challenge}. {status}")?;
    }
    Ok(())
}
