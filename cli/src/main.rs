use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tripwire_core::{
    Board, Clock, GameController, KeyValueStore, KeyedScoreStore, MinePlacer, Outcome,
    RevealOutcome, Session, Stopwatch,
};

mod args;
mod command;
mod store;
mod view;

use args::Args;
use command::{Command, Line};
use store::FileStore;

/// Game controller for the terminal: remembers how the current game ended.
#[derive(Debug, Default)]
struct Terminal {
    ended: Option<(Outcome, f64)>,
}

impl GameController for Terminal {
    fn is_accepting_input(&self) -> bool {
        self.ended.is_none()
    }

    fn outcome_changed(&mut self, outcome: Outcome, elapsed_secs: f64) {
        log::debug!("Outcome changed to {:?} after {:.3}s", outcome, elapsed_secs);
        self.ended = match outcome {
            Outcome::InProgress => None,
            Outcome::Won | Outcome::Lost => Some((outcome, elapsed_secs)),
        };
    }
}

type TerminalSession<C, K, P> = Session<C, KeyedScoreStore<K>, Terminal, P>;

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn print_scores<K: KeyValueStore>(
    out: &mut impl Write,
    scores: &KeyedScoreStore<K>,
    highlight: Option<usize>,
) -> io::Result<()> {
    let list = scores.load();
    if list.is_empty() {
        return writeln!(out, "No scores yet");
    }
    writeln!(out, "Best times:")?;
    for (rank, time) in list.times().iter().enumerate() {
        let marker = if highlight == Some(rank) { " <- new" } else { "" };
        writeln!(out, "{:>3}. {:.1}s{}", rank + 1, time, marker)?;
    }
    Ok(())
}

fn print_start<C, K, P>(session: &TerminalSession<C, K, P>, out: &mut impl Write) -> io::Result<()>
where
    C: Clock,
    K: KeyValueStore,
    P: MinePlacer,
{
    if let Some(seed) = session.board().placer().seed() {
        writeln!(out, "Seed: {seed}")?;
    }
    writeln!(out, "{}", view::render(&session.snapshot()))
}

/// Reads commands from `input` until the player quits or input runs out.
///
/// Finished games wait for a restart, which plays a board from `new_board` with the same score store.
fn run<C, K, P>(
    session: &mut TerminalSession<C, K, P>,
    mut new_board: impl FnMut() -> Board<P>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    C: Clock + Default,
    K: KeyValueStore,
    P: MinePlacer,
{
    print_start(session, out)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        let command = match Line::read(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                write!(out, "{err}")?;
                continue;
            }
        };

        let was_over = session.controller().ended.is_some();
        if was_over && matches!(command, Command::Reveal { .. } | Command::Flag { .. }) {
            writeln!(out, "Game over, \"restart\" for a new game")?;
            continue;
        }

        match command {
            Command::Reveal { x, y } => match session.reveal((x, y)) {
                Ok(RevealOutcome::NoChange) => writeln!(out, "Nothing to reveal")?,
                Ok(_) => writeln!(out, "{}", view::render(&session.snapshot()))?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Flag { x, y } => match session.toggle_flag((x, y)) {
                Ok(outcome) if outcome.has_update() => {
                    writeln!(out, "{}", view::render(&session.snapshot()))?
                }
                Ok(_) => writeln!(out, "Cannot flag that cell")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Pause => {
                let paused = !session.is_paused();
                session.set_paused(paused);
                if session.is_paused() {
                    writeln!(out, "Paused, \"p\" to resume")?;
                } else {
                    writeln!(out, "{}", view::render(&session.snapshot()))?;
                }
            }
            Command::Snapshot => {
                let json = serde_json::to_string(&session.snapshot())?;
                writeln!(out, "{json}")?;
            }
            Command::Scores => print_scores(out, session.scores(), None)?,
            Command::Restart => {
                session.restart(new_board(), C::default());
                print_start(session, out)?;
            }
            Command::Quit => break,
        }

        if let (false, Some((outcome, elapsed))) = (was_over, session.controller().ended) {
            writeln!(out, "Time: {elapsed:.1}s")?;
            if outcome == Outcome::Won {
                print_scores(out, session.scores(), session.last_rank())?;
            }
            writeln!(out, "\"restart\" for a new game, \"q\" to quit")?;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.game_config().context("invalid board settings")?;
    let mut forced_seed = args.seed;
    let mut new_board = move || {
        let seed = forced_seed.take().unwrap_or_else(rand::random);
        log::debug!("config: {:?}, seed: {}", config, seed);
        Board::new(config, seed)
    };

    let mut session = Session::new(
        new_board(),
        Stopwatch::new(),
        KeyedScoreStore::new(FileStore::new(&args.data_dir)),
        Terminal::default(),
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run(&mut session, new_board, stdin.lock(), &mut stdout)
}
