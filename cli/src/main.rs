use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweeper_core::{ChordPolicy, Difficulty, Session};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

mod app;
mod command;
mod render;
mod settings;
mod storage;

use storage::{DataDir, load_or_default};

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Force a seed for the first board instead of a random one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board preset (easy, medium or hard), remembered for next time
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Whether revealing around a number needs matching flags (unchecked or match-flags)
    #[arg(long)]
    chord: Option<ChordPolicy>,

    /// Where to keep settings and best times
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let data = match args.data_dir {
        Some(path) => DataDir::new(path),
        None => DataDir::platform()?,
    };

    let mut settings = load_or_default("settings", || data.load_settings());
    if settings.apply_overrides(args.difficulty, args.chord)
        && let Err(err) = data.save_settings(&settings)
    {
        log::warn!("could not save settings: {err:#}");
    }
    let scores = load_or_default("high scores", || data.load_scores());

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "{} board, seed {}, chord {}, data in {:?}",
        settings.difficulty,
        seed,
        settings.chord_policy,
        data.path()
    );
    let session = Session::new(settings.difficulty, seed, settings.chord_policy)
        .context("could not create the board")?;

    let (events, inbox) = mpsc::channel();
    app::spawn_stdin_reader(events);

    let terminal = app::Terminal::new(io::stdout(), data, scores);
    app::App::new(terminal, settings).run(session, inbox)?;
    Ok(())
}
