use anyhow::Result;
use chrono::Utc;
use minesweeper_core::*;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use web_time::{Duration, Instant};

use crate::command::{Command, CommandError, HELP};
use crate::render;
use crate::settings::Settings;
use crate::storage::DataDir;

const TICK: Duration = Duration::from_secs(1);

/// Everything the main loop waits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Line(String),
    Closed,
}

/// Forwards stdin lines to the main loop. The thread never touches the session.
pub fn spawn_stdin_reader(events: Sender<Event>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    log::warn!("could not read stdin: {err}");
                    break;
                }
            }
        }
        let _ = events.send(Event::Closed);
    })
}

/// Line based frontend: draws to `out` and keeps the best times on disk.
pub struct Terminal<W: Write> {
    out: W,
    data: DataDir,
    scores: HighScores,
    next_tick: Option<Instant>,
    pressing: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, data: DataDir, scores: HighScores) -> Self {
        Self {
            out,
            data,
            scores,
            next_tick: None,
            pressing: false,
        }
    }

    fn print(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            log::warn!("could not write output: {err}");
        }
    }

    fn print_scores(&mut self) {
        let mut lines = Vec::with_capacity(Difficulty::ALL.len());
        for difficulty in Difficulty::ALL {
            let line = match self.scores.best(difficulty) {
                Some(best) => format!(
                    "{:<7}{}  {}",
                    difficulty,
                    format_elapsed(best.time_in_seconds),
                    best.timestamp.format("%Y-%m-%d %H:%M")
                ),
                None => format!("{:<7}--:--", difficulty),
            };
            lines.push(line);
        }
        self.print(&lines.join("\n"));
    }
}

impl<W: Write> Frontend for Terminal<W> {
    fn render(&mut self, session: &Session) {
        let text = render::board(session, self.pressing);
        self.print(text.trim_end());
    }

    fn show_time(&mut self, elapsed_secs: u32) {
        let shown = write!(self.out, "\r{} ", format_elapsed(elapsed_secs))
            .and_then(|()| self.out.flush());
        if let Err(err) = shown {
            log::warn!("could not write output: {err}");
        }
    }

    fn set_ticking(&mut self, ticking: bool) {
        self.next_tick = ticking.then(|| Instant::now() + TICK);
    }

    fn persist_score(&mut self, difficulty: Difficulty, elapsed_secs: u32) {
        if !self.scores.record(difficulty, elapsed_secs, Utc::now()) {
            self.print(&format!("cleared in {}", format_elapsed(elapsed_secs)));
            return;
        }
        self.print(&format!(
            "new best time for {}: {}",
            difficulty,
            format_elapsed(elapsed_secs)
        ));
        if let Err(err) = self.data.save_scores(&self.scores) {
            log::warn!("could not save high scores: {err:#}");
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Owns the input side of a game: settings, touch state and the terminal.
pub struct App<W: Write> {
    terminal: Terminal<W>,
    settings: Settings,
    touch: TouchTracker,
    held: Option<Coord2>,
}

impl<W: Write> App<W> {
    pub fn new(terminal: Terminal<W>, settings: Settings) -> Self {
        Self {
            terminal,
            settings,
            touch: TouchTracker::default(),
            held: None,
        }
    }

    /// Runs until `q`, end of input or a closed channel, and returns the last session.
    pub fn run(&mut self, mut session: Session, events: Receiver<Event>) -> Result<Session> {
        self.terminal.render(&session);
        self.terminal.print("type h for help");

        loop {
            let event = match self.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match events.recv_timeout(wait) {
                        Ok(event) => event,
                        Err(RecvTimeoutError::Timeout) => {
                            session = self.on_deadline(session, Instant::now());
                            continue;
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match events.recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
            };

            match event {
                Event::Line(line) => {
                    let (next, flow) = self.handle_line(session, &line);
                    session = next;
                    if flow == Flow::Quit {
                        break;
                    }
                }
                Event::Closed => break,
            }
        }

        log::debug!("leaving with the game {:?}", session.engine().state());
        Ok(session)
    }

    fn next_deadline(&self) -> Option<Instant> {
        [self.terminal.next_tick, self.touch.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    fn on_deadline(&mut self, mut session: Session, now: Instant) -> Session {
        if let Some(action) = self.touch.poll(now) {
            // the finger lifts as soon as the hold fires
            if let Some(target) = self.held.take() {
                self.touch.touch_end(0, target, now);
            }
            self.terminal.pressing = self.touch.is_pressing();
            session = self.gesture(session, action);
        }

        if let Some(tick_at) = self.terminal.next_tick.filter(|&tick_at| now >= tick_at) {
            self.terminal.next_tick = Some(tick_at + TICK);
            session = session.dispatch(Msg::Tick, &mut self.terminal);
        }
        session
    }

    fn gesture(&mut self, mut session: Session, action: GestureAction) -> Session {
        log::debug!("gesture {:?}", action);
        for msg in action.messages() {
            session = session.dispatch(msg, &mut self.terminal);
        }
        session
    }

    fn handle_line(&mut self, session: Session, line: &str) -> (Session, Flow) {
        let command = match Command::parse(line, session.engine().size()) {
            Ok(command) => command,
            Err(CommandError::Empty) => return (session, Flow::Continue),
            Err(err) => {
                self.terminal.print(&err.to_string());
                return (session, Flow::Continue);
            }
        };

        let session = match command {
            Command::Reveal(coords) => session.dispatch(Msg::Reveal(coords), &mut self.terminal),
            Command::Flag(coords) => session.dispatch(Msg::ToggleFlag(coords), &mut self.terminal),
            Command::RevealNeighbors(coords) => {
                session.dispatch(Msg::RevealNeighbors(coords), &mut self.terminal)
            }
            Command::Tap(coords) => {
                let now = Instant::now();
                self.touch.touch_start(1, coords, now);
                match self.touch.touch_end(0, coords, now) {
                    Some(action) => self.gesture(session, action),
                    None => session,
                }
            }
            Command::Hold(coords) => {
                self.touch.touch_start(1, coords, Instant::now());
                self.held = Some(coords);
                self.terminal.pressing = self.touch.is_pressing();
                self.terminal.print(&render::status_line(&session, true));
                session
            }
            Command::NewGame => session.dispatch(
                Msg::Reset {
                    seed: rand::random(),
                },
                &mut self.terminal,
            ),
            Command::SetDifficulty(difficulty) => {
                self.remember_difficulty(difficulty);
                session.dispatch(
                    Msg::SetDifficulty {
                        difficulty,
                        seed: rand::random(),
                    },
                    &mut self.terminal,
                )
            }
            Command::Scores => {
                self.terminal.print_scores();
                session
            }
            Command::Help => {
                self.terminal.print(HELP);
                session
            }
            Command::Quit => return (session, Flow::Quit),
        };
        (session, Flow::Continue)
    }

    fn remember_difficulty(&mut self, difficulty: Difficulty) {
        if self.settings.apply_overrides(Some(difficulty), None)
            && let Err(err) = self.terminal.data.save_settings(&self.settings)
        {
            log::warn!("could not save settings: {err:#}");
        }
    }
}
