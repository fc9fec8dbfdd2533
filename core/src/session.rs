use crate::*;

/// Front-end that drives a [`Session`] and reacts when the game ends.
pub trait GameController {
    /// Whether reveal and flag requests should reach the board at all.
    fn is_accepting_input(&self) -> bool {
        true
    }

    /// Called once when the game is won or lost, and with [`Outcome::InProgress`] when the session restarts.
    fn outcome_changed(&mut self, outcome: Outcome, elapsed_secs: f64);
}

/// A board wired to its collaborators: the clock timing the game, the store ranking won times and the controller
/// told about the result.
#[derive(Debug)]
pub struct Session<C, S, G, P = RandomPlacer> {
    board: Board<P>,
    clock: C,
    scores: S,
    controller: G,
    paused: bool,
    last_rank: Option<usize>,
}

impl<C, S, G, P> Session<C, S, G, P>
where
    C: Clock,
    S: ScoreStore,
    G: GameController,
    P: MinePlacer,
{
    pub fn new(board: Board<P>, clock: C, scores: S, controller: G) -> Self {
        Self {
            board,
            clock,
            scores,
            controller,
            paused: false,
            last_rank: None,
        }
    }

    pub fn board(&self) -> &Board<P> {
        &self.board
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn controller(&self) -> &G {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut G {
        &mut self.controller
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rank of the time recorded by the last win, if it made the list.
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    /// Starts over on `board`, keeping the score store and the controller.
    pub fn restart(&mut self, board: Board<P>, clock: C) {
        self.board = board;
        self.clock = clock;
        self.paused = false;
        self.last_rank = None;
        log::debug!("Session restarted");
        self.controller.outcome_changed(Outcome::InProgress, 0.0);
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.board.is_finished() && self.controller.is_accepting_input()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        if !self.accepts_input() {
            return Ok(RevealOutcome::NoChange);
        }

        let first_reveal = !self.board.mines_placed();
        let outcome = self.board.reveal(coords)?;
        if first_reveal {
            self.clock.start();
        }

        match outcome {
            RevealOutcome::Won => self.on_won(),
            RevealOutcome::Lost(_) => self.on_lost(),
            RevealOutcome::NoChange | RevealOutcome::Revealed => {}
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        if !self.accepts_input() {
            return Ok(FlagOutcome::NoChange);
        }
        self.board.toggle_flag(coords)
    }

    /// Pauses or resumes play, the clock only runs while unpaused. Finished games cannot be paused.
    pub fn set_paused(&mut self, paused: bool) {
        if self.board.is_finished() || self.paused == paused {
            return;
        }
        self.paused = paused;
        // the clock only starts with the first reveal
        if self.board.mines_placed() {
            if paused {
                self.clock.stop();
            } else {
                self.clock.start();
            }
        }
        log::debug!("Paused: {}", paused);
    }

    fn on_won(&mut self) {
        self.clock.stop();
        let elapsed = self.clock.elapsed_secs();
        self.last_rank = match self.scores.append_and_rank(elapsed) {
            Ok(rank) => rank,
            Err(err) => {
                log::error!("Could not record score: {}", err);
                None
            }
        };
        log::info!("Won in {:.1}s, rank {:?}", elapsed, self.last_rank);
        self.controller.outcome_changed(Outcome::Won, elapsed);
    }

    fn on_lost(&mut self) {
        self.clock.stop();
        let elapsed = self.clock.elapsed_secs();
        log::info!("Lost after {:.1}s", elapsed);
        self.controller.outcome_changed(Outcome::Lost, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug, Default)]
    struct FakeClock {
        secs: f64,
        running: bool,
        starts: usize,
    }

    impl Clock for FakeClock {
        fn elapsed_secs(&self) -> f64 {
            self.secs
        }

        fn start(&mut self) {
            self.running = true;
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.running = false;
        }
    }

    #[derive(Debug, Default)]
    struct Recorder {
        frozen: bool,
        outcomes: Vec<(Outcome, f64)>,
    }

    impl GameController for Recorder {
        fn is_accepting_input(&self) -> bool {
            !self.frozen
        }

        fn outcome_changed(&mut self, outcome: Outcome, elapsed_secs: f64) {
            self.outcomes.push((outcome, elapsed_secs));
        }
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn append_and_rank(&mut self, _time: f64) -> core::result::Result<Option<usize>, ScoreError> {
            Err(ScoreError::Storage("disk full".into()))
        }
    }

    fn board(size: Coord2, mines: &[Coord2]) -> Board<FixedPlacer> {
        let config = GameConfig::new(size.0, size.1, mines.len() as CellCount).unwrap();
        Board::with_placer(config, FixedPlacer::new(mines.iter().copied()))
    }

    fn session(
        size: Coord2,
        mines: &[Coord2],
    ) -> Session<FakeClock, KeyedScoreStore<MemoryStore>, Recorder, FixedPlacer> {
        Session::new(
            board(size, mines),
            FakeClock::default(),
            KeyedScoreStore::new(MemoryStore::new()),
            Recorder::default(),
        )
    }

    #[test]
    fn first_reveal_starts_the_clock() {
        let mut session = session((5, 1), &[(2, 0), (4, 0)]);
        session.toggle_flag((4, 0)).unwrap();
        assert!(!session.clock().running);

        session.reveal((0, 0)).unwrap();

        assert!(session.clock().running);
        assert_eq!(session.clock().starts, 1);
    }

    #[test]
    fn win_records_score_and_notifies_controller() {
        let mut session = session((5, 1), &[(2, 0), (4, 0)]);
        session.reveal((0, 0)).unwrap();
        session.clock.secs = 12.5;

        assert_eq!(session.reveal((3, 0)).unwrap(), RevealOutcome::Won);

        assert!(!session.clock().running);
        assert_eq!(session.controller().outcomes, [(Outcome::Won, 12.5)]);
        assert_eq!(session.last_rank(), Some(0));
        assert_eq!(session.scores().load().times(), &[12.5]);
    }

    #[test]
    fn loss_notifies_controller_without_scoring() {
        let mut session = session((5, 1), &[(2, 0), (4, 0)]);
        session.reveal((0, 0)).unwrap();

        assert!(matches!(
            session.reveal((2, 0)).unwrap(),
            RevealOutcome::Lost(LossCause::Detonated((2, 0)))
        ));

        assert_eq!(session.controller().outcomes.len(), 1);
        assert_eq!(session.controller().outcomes[0].0, Outcome::Lost);
        assert!(session.scores().load().is_empty());
        assert_eq!(session.reveal((3, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.controller().outcomes.len(), 1);
    }

    #[test]
    fn paused_session_ignores_input_and_stops_the_clock() {
        let mut session = session((5, 1), &[(2, 0), (4, 0)]);
        session.reveal((0, 0)).unwrap();

        session.set_paused(true);

        assert!(session.is_paused());
        assert!(!session.clock().running);
        assert_eq!(session.reveal((3, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag((3, 0)).unwrap(), FlagOutcome::NoChange);

        session.set_paused(false);

        assert!(session.clock().running);
        assert_eq!(session.reveal((3, 0)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn pausing_before_first_reveal_does_not_start_the_clock() {
        let mut session = session((3, 3), &[(2, 2)]);

        session.set_paused(true);
        session.set_paused(false);

        assert_eq!(session.clock().starts, 0);
        assert!(!session.board().mines_placed());
    }

    #[test]
    fn frozen_controller_blocks_input() {
        let mut session = session((3, 3), &[(2, 2)]);
        session.controller_mut().frozen = true;

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert!(!session.board().mines_placed());
    }

    #[test]
    fn score_store_failure_does_not_change_the_outcome() {
        let mut session = Session::new(
            board((2, 1), &[(1, 0)]),
            FakeClock::default(),
            FailingStore,
            Recorder::default(),
        );

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.board().outcome(), Outcome::Won);
        assert_eq!(session.last_rank(), None);
        assert_eq!(session.controller().outcomes.len(), 1);
    }

    #[test]
    fn restart_keeps_scores_and_plays_a_new_board() {
        let mut session = session((5, 1), &[(2, 0), (4, 0)]);
        session.reveal((0, 0)).unwrap();
        session.clock.secs = 9.0;
        session.reveal((3, 0)).unwrap();
        session.set_paused(true);

        session.restart(board((5, 1), &[(2, 0), (4, 0)]), FakeClock::default());

        assert!(!session.is_paused());
        assert!(!session.board().mines_placed());
        assert_eq!(session.last_rank(), None);
        assert_eq!(session.clock().starts, 0);
        assert_eq!(session.scores().load().times(), &[9.0]);
        assert_eq!(
            session.controller().outcomes,
            [(Outcome::Won, 9.0), (Outcome::InProgress, 0.0)]
        );

        session.reveal((0, 0)).unwrap();
        session.clock.secs = 4.0;
        assert_eq!(session.reveal((3, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(session.last_rank(), Some(0));
        assert_eq!(session.scores().load().times(), &[4.0, 9.0]);
    }

    #[test]
    fn invalid_coordinates_are_reported() {
        let mut session = session((3, 3), &[(2, 2)]);

        assert_eq!(session.reveal((3, 3)), Err(GameError::InvalidCoords));
        assert_eq!(session.toggle_flag((0, 7)), Err(GameError::InvalidCoords));
    }
}
