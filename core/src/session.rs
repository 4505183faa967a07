use serde::{Deserialize, Serialize};

use crate::*;

/// Player input and clock events a [`Session`] reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Msg {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    RevealNeighbors(Coord2),
    /// One second passed.
    Tick,
    Reset {
        seed: u64,
    },
    SetDifficulty {
        difficulty: Difficulty,
        seed: u64,
    },
}

/// Side effects requested by [`Session::update`], to be applied in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Render,
    ShowTime(u32),
    StartTicking,
    StopTicking,
    PersistScore {
        difficulty: Difficulty,
        elapsed_secs: u32,
    },
}

/// Whatever shows the game and keeps its records.
pub trait Frontend {
    fn render(&mut self, session: &Session);
    fn show_time(&mut self, elapsed_secs: u32);
    fn set_ticking(&mut self, ticking: bool);
    fn persist_score(&mut self, difficulty: Difficulty, elapsed_secs: u32);
}

impl Effect {
    pub fn apply<F: Frontend + ?Sized>(self, session: &Session, frontend: &mut F) {
        match self {
            Self::Render => frontend.render(session),
            Self::ShowTime(secs) => frontend.show_time(secs),
            Self::StartTicking => frontend.set_ticking(true),
            Self::StopTicking => frontend.set_ticking(false),
            Self::PersistScore {
                difficulty,
                elapsed_secs,
            } => frontend.persist_score(difficulty, elapsed_secs),
        }
    }
}

/// The reset button glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Smile,
    Surprised,
    Dead,
    Cool,
}

/// One game at a time: the engine, its clock and the difficulty it was generated for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    difficulty: Difficulty,
    engine: PlayEngine,
    timer: GameTimer,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64, chord_policy: ChordPolicy) -> Result<Self> {
        let mines = generate(difficulty, seed)?;
        Ok(Self::with_mine_grid(difficulty, mines, chord_policy))
    }

    /// Session on a known layout.
    pub fn with_mine_grid(
        difficulty: Difficulty,
        mines: MineGrid,
        chord_policy: ChordPolicy,
    ) -> Self {
        Self {
            difficulty,
            engine: PlayEngine::with_policy(mines, chord_policy),
            timer: GameTimer::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn face(&self, pressing: bool) -> Face {
        match self.engine.state() {
            EngineState::Lost => Face::Dead,
            EngineState::Won => Face::Cool,
            _ if pressing => Face::Surprised,
            _ => Face::Smile,
        }
    }

    pub fn update(mut self, msg: Msg) -> (Self, Vec<Effect>) {
        log::trace!("update {:?}", msg);
        let effects = match msg {
            Msg::Reveal(coords) => {
                let was_ready = self.engine.state().is_ready();
                let outcome = self.engine.reveal(coords);
                self.after_reveal(was_ready, outcome)
            }
            Msg::RevealNeighbors(coords) => {
                let was_ready = self.engine.state().is_ready();
                let outcome = self.engine.reveal_neighbors(coords);
                self.after_reveal(was_ready, outcome)
            }
            Msg::ToggleFlag(coords) => match self.engine.toggle_flag(coords) {
                Ok(outcome) if outcome.has_update() => vec![Effect::Render],
                Ok(_) => vec![],
                Err(err) => {
                    log::warn!("flag at {:?} dropped: {}", coords, err);
                    vec![]
                }
            },
            Msg::Tick => self.tick(),
            Msg::Reset { seed } => self.restart(self.difficulty, seed),
            Msg::SetDifficulty { difficulty, seed } => self.restart(difficulty, seed),
        };
        (self, effects)
    }

    /// Runs `update` and applies its effects to `frontend`.
    pub fn dispatch<F: Frontend + ?Sized>(self, msg: Msg, frontend: &mut F) -> Self {
        let (next, effects) = self.update(msg);
        for effect in effects {
            effect.apply(&next, frontend);
        }
        next
    }

    fn after_reveal(&mut self, was_ready: bool, outcome: Result<RevealOutcome>) -> Vec<Effect> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("reveal dropped: {}", err);
                return vec![];
            }
        };
        if !outcome.has_update() {
            return vec![];
        }

        let mut effects = Vec::with_capacity(4);
        if was_ready {
            self.timer.start();
            effects.push(Effect::StartTicking);
        }
        if self.engine.is_finished() {
            self.timer.stop();
            effects.push(Effect::StopTicking);
        }
        if outcome == RevealOutcome::Won {
            log::info!(
                "won {} in {}",
                self.difficulty,
                format_elapsed(self.timer.elapsed_secs())
            );
            effects.push(Effect::PersistScore {
                difficulty: self.difficulty,
                elapsed_secs: self.timer.elapsed_secs(),
            });
        }
        effects.push(Effect::Render);
        effects
    }

    fn tick(&mut self) -> Vec<Effect> {
        if self.engine.is_finished() || !self.timer.tick() {
            return vec![];
        }
        vec![Effect::ShowTime(self.timer.elapsed_secs())]
    }

    fn restart(&mut self, difficulty: Difficulty, seed: u64) -> Vec<Effect> {
        let mines = match generate(difficulty, seed) {
            Ok(mines) => mines,
            Err(err) => {
                log::warn!("could not start a {} game: {}", difficulty, err);
                return vec![];
            }
        };
        log::debug!("new {} game, seed {}", difficulty, seed);
        self.difficulty = difficulty;
        self.engine.reset(mines);
        self.timer.reset();
        vec![Effect::StopTicking, Effect::ShowTime(0), Effect::Render]
    }
}

fn generate(difficulty: Difficulty, seed: u64) -> Result<MineGrid> {
    RandomMineGridGenerator::new(seed).generate(difficulty.game_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        renders: u32,
        shown: Vec<u32>,
        ticking: Vec<bool>,
        scores: Vec<(Difficulty, u32)>,
    }

    impl Frontend for Recorder {
        fn render(&mut self, _session: &Session) {
            self.renders += 1;
        }

        fn show_time(&mut self, elapsed_secs: u32) {
            self.shown.push(elapsed_secs);
        }

        fn set_ticking(&mut self, ticking: bool) {
            self.ticking.push(ticking);
        }

        fn persist_score(&mut self, difficulty: Difficulty, elapsed_secs: u32) {
            self.scores.push((difficulty, elapsed_secs));
        }
    }

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        let mines = MineGrid::from_mine_coords(size, mines).unwrap();
        Session::with_mine_grid(Difficulty::Easy, mines, ChordPolicy::Unchecked)
    }

    #[test]
    fn first_reveal_starts_the_clock() {
        let session = session((3, 1), &[(0, 0)]);

        let (session, effects) = session.update(Msg::Reveal((1, 0)));

        assert_eq!(effects, vec![Effect::StartTicking, Effect::Render]);
        assert!(session.timer().is_active());

        let (_, effects) = session.update(Msg::Tick);
        assert_eq!(effects, vec![Effect::ShowTime(1)]);
    }

    #[test]
    fn flagging_does_not_start_the_clock() {
        let session = session((3, 1), &[(0, 0)]);

        let (session, effects) = session.update(Msg::ToggleFlag((0, 0)));
        assert_eq!(effects, vec![Effect::Render]);

        let (session, effects) = session.update(Msg::Tick);
        assert!(effects.is_empty());
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn no_op_actions_emit_nothing() {
        let session = session((3, 1), &[(0, 0)]);
        let (session, _) = session.update(Msg::Reveal((1, 0)));
        let before = session.clone();

        let (session, effects) = session.update(Msg::Reveal((1, 0)));
        assert!(effects.is_empty());
        let (session, effects) = session.update(Msg::Reveal((7, 0)));
        assert!(effects.is_empty());
        let (session, effects) = session.update(Msg::ToggleFlag((1, 0)));
        assert!(effects.is_empty());
        assert_eq!(session, before);
    }

    #[test]
    fn win_stops_clock_and_persists_score() {
        let session = session((3, 1), &[(0, 0)]);
        let (session, _) = session.update(Msg::Reveal((1, 0)));
        let (session, _) = session.update(Msg::Tick);
        let (session, _) = session.update(Msg::Tick);

        let (session, effects) = session.update(Msg::Reveal((2, 0)));

        assert_eq!(
            effects,
            vec![
                Effect::StopTicking,
                Effect::PersistScore {
                    difficulty: Difficulty::Easy,
                    elapsed_secs: 2
                },
                Effect::Render,
            ]
        );
        assert_eq!(session.face(false), Face::Cool);

        let (session, effects) = session.update(Msg::Tick);
        assert!(effects.is_empty());
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn loss_stops_clock_without_score() {
        let session = session((3, 1), &[(0, 0)]);
        let (session, _) = session.update(Msg::Reveal((1, 0)));

        let (session, effects) = session.update(Msg::Reveal((0, 0)));

        assert_eq!(effects, vec![Effect::StopTicking, Effect::Render]);
        assert_eq!(session.face(true), Face::Dead);
        assert!(!session.timer().is_active());
    }

    #[test]
    fn losing_on_the_first_move_starts_and_stops() {
        let session = session((3, 1), &[(0, 0)]);

        let (_, effects) = session.update(Msg::Reveal((0, 0)));

        assert_eq!(
            effects,
            vec![Effect::StartTicking, Effect::StopTicking, Effect::Render]
        );
    }

    #[test]
    fn reset_regenerates_from_seed() {
        let session = Session::new(Difficulty::Easy, 1, ChordPolicy::default()).unwrap();
        let (session, _) = session.update(Msg::ToggleFlag((0, 0)));

        let (session, effects) = session.update(Msg::Reset { seed: 5 });

        assert_eq!(
            effects,
            vec![Effect::StopTicking, Effect::ShowTime(0), Effect::Render]
        );
        assert_eq!(session.engine().state(), EngineState::Ready);
        assert_eq!(session.engine().flags_remaining(), 10);
        assert_eq!(
            session.engine().mine_grid(),
            Session::new(Difficulty::Easy, 5, ChordPolicy::default())
                .unwrap()
                .engine()
                .mine_grid()
        );
    }

    #[test]
    fn difficulty_change_resizes_the_board() {
        let session = Session::new(Difficulty::Easy, 1, ChordPolicy::MatchFlags).unwrap();

        let (session, effects) = session.update(Msg::SetDifficulty {
            difficulty: Difficulty::Hard,
            seed: 2,
        });

        assert_eq!(effects.last(), Some(&Effect::Render));
        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(session.engine().size(), (16, 30));
        assert_eq!(session.engine().total_mines(), 99);
        assert_eq!(session.engine().chord_policy(), ChordPolicy::MatchFlags);
    }

    #[test]
    fn dispatch_applies_effects_in_order() {
        let mut frontend = Recorder::default();
        let session = session((3, 1), &[(0, 0)]);

        let session = session.dispatch(Msg::Reveal((1, 0)), &mut frontend);
        let session = session.dispatch(Msg::Tick, &mut frontend);
        let session = session.dispatch(Msg::Reveal((2, 0)), &mut frontend);
        session.dispatch(Msg::Reset { seed: 3 }, &mut frontend);

        assert_eq!(
            frontend,
            Recorder {
                renders: 3,
                shown: vec![1, 0],
                ticking: vec![true, false, false],
                scores: vec![(Difficulty::Easy, 1)],
            }
        );
    }

    #[test]
    fn face_follows_press_state() {
        let session = session((3, 1), &[(0, 0)]);

        assert_eq!(session.face(false), Face::Smile);
        assert_eq!(session.face(true), Face::Surprised);
    }

    #[test]
    fn hold_gesture_on_a_hint_mass_reveals() {
        let session = session((3, 3), &[(0, 1), (2, 1)]);
        let (mut session, _) = session.update(Msg::Reveal((1, 1)));
        let (next, _) = session.update(Msg::ToggleFlag((0, 1)));
        session = next;
        let (next, _) = session.update(Msg::ToggleFlag((2, 1)));
        session = next;

        for msg in GestureAction::Hold((1, 1)).messages() {
            session = session.update(msg).0;
        }

        assert_eq!(session.engine().state(), EngineState::Won);
    }
}
