use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// The elapsed-time counter freezes here.
pub const TIMER_CAP: u16 = 999;

/// Valid transitions:
/// - Idle -> Active, on the first reveal
/// - Active -> Won | Lost
/// - any -> Idle, through `initialize`/`reset`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the first reveal, no mines placed yet
    #[default]
    Idle,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether reveal and flag inputs are still accepted
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::Idle | Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Change events buffered for the presentation side, drained after each input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// Whole board replaced, every cell must be redrawn
    BoardReset { rows: Coord, cols: Coord },
    CellChanged(Pos),
    FlagsChanged(i32),
    TimerChanged(u16),
    StateChanged { state: SessionState, elapsed: u16 },
}

/// One game from first click to win or loss. Owned by whoever drives the input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session<G = RejectionSampler> {
    config: GameConfig,
    board: Board,
    generator: G,
    state: SessionState,
    flags_placed: CellCount,
    elapsed: u16,
    triggered_mine: Option<Pos>,
    #[serde(skip)]
    pending: Vec<Notification>,
}

impl Session<RejectionSampler> {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_generator(difficulty.config(), RejectionSampler::new(seed))
    }
}

impl<G: MineGenerator> Session<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        let mut session = Self {
            config,
            board: Board::new(config),
            generator,
            state: SessionState::Idle,
            flags_placed: 0,
            elapsed: 0,
            triggered_mine: None,
            pending: Vec::new(),
        };
        session.reset(config);
        session
    }

    pub fn initialize(&mut self, difficulty: Difficulty) {
        self.reset(difficulty.config());
    }

    /// Throws the current board away and starts over on a blank one. Mines wait for the next first reveal.
    pub fn reset(&mut self, config: GameConfig) {
        log::debug!(
            "New game: {}x{} with {} mines",
            config.rows,
            config.cols,
            config.mines
        );

        self.config = config;
        self.board = Board::new(config);
        self.state = SessionState::Idle;
        self.flags_placed = 0;
        self.elapsed = 0;
        self.triggered_mine = None;

        self.pending.clear();
        self.pending.extend([
            Notification::BoardReset {
                rows: config.rows,
                cols: config.cols,
            },
            Notification::FlagsChanged(self.flags_remaining()),
            Notification::TimerChanged(0),
            Notification::StateChanged {
                state: SessionState::Idle,
                elapsed: 0,
            },
        ]);
    }

    /// Opens a cell. The first call of a session places the mines around it, so it can never hit one.
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        let pos = self.board.validate(pos)?;

        if !self.state.is_playable() || !self.board[pos].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.state.is_idle() {
            self.start(pos)?;
        }

        if self.board[pos].is_mine() {
            self.lose(pos);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.board.flood_reveal(pos);
        log::debug!("Reveal at {} opened {} cells", pos, opened.len());
        self.pending
            .extend(opened.into_iter().map(Notification::CellChanged));

        if self.board.hidden_safe_count() == 0 {
            self.win();
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Flags or unflags a hidden cell. There is no cap, so the remaining count can go negative.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        let pos = self.board.validate(pos)?;

        if !self.state.is_playable() {
            return Ok(FlagOutcome::NoChange);
        }

        let Some(cover) = self.board.toggle_flag(pos) else {
            return Ok(FlagOutcome::NoChange);
        };

        if cover == Cover::Flagged {
            self.flags_placed += 1;
        } else {
            self.flags_placed -= 1;
        }
        log::trace!("Flag at {} now {:?}", pos, cover);

        self.pending.extend([
            Notification::CellChanged(pos),
            Notification::FlagsChanged(self.flags_remaining()),
        ]);
        Ok(FlagOutcome::Changed)
    }

    /// Advances the clock by one second. Only runs while active and stops at the cap.
    pub fn tick(&mut self) -> bool {
        if self.state != SessionState::Active || self.elapsed >= TIMER_CAP {
            return false;
        }
        self.elapsed += 1;
        self.pending.push(Notification::TimerChanged(self.elapsed));
        true
    }

    fn start(&mut self, safe: Pos) -> Result<()> {
        let layout = self.generator.generate(self.config, safe)?;
        if let Err(err) = layout.validate(self.config, safe) {
            log::warn!(
                "Discarding layout with {} mines for a board of {}, safe cell {}",
                layout.count(),
                self.config.mines,
                safe
            );
            return Err(err);
        }

        self.board.arm(&layout);
        self.set_state(SessionState::Active);
        self.pending.push(Notification::TimerChanged(self.elapsed));
        Ok(())
    }

    fn lose(&mut self, triggered: Pos) {
        self.triggered_mine = Some(triggered);

        // disclose every mine and every flag that was wrong
        let disclosed = self.board.positions().filter(|&pos| {
            let cell = &self.board[pos];
            cell.is_mine() || cell.is_flagged()
        });
        self.pending.extend(disclosed.map(Notification::CellChanged));

        self.set_state(SessionState::Lost);
    }

    fn win(&mut self) {
        let unflagged: Vec<_> = self
            .board
            .positions()
            .filter(|&pos| {
                let cell = &self.board[pos];
                cell.is_mine() && !cell.is_flagged()
            })
            .collect();

        for &pos in &unflagged {
            self.board.flag(pos);
            self.flags_placed += 1;
        }
        self.pending
            .extend(unflagged.into_iter().map(Notification::CellChanged));
        self.pending
            .push(Notification::FlagsChanged(self.flags_remaining()));

        self.set_state(SessionState::Won);
    }

    fn set_state(&mut self, state: SessionState) {
        log::debug!("Session {:?} -> {:?} at {}s", self.state, state, self.elapsed);
        self.state = state;
        self.pending.push(Notification::StateChanged {
            state,
            elapsed: self.elapsed,
        });
    }
}

impl<G> Session<G> {
    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> (Coord, Coord) {
        self.config.size()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Total mines minus flags placed, negative when over-flagged.
    pub fn flags_remaining(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flags_placed)
    }

    pub fn elapsed_secs(&self) -> u16 {
        self.elapsed
    }

    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// What the cell should look like right now, including the disclosure after a loss.
    ///
    /// Panics if `pos` is outside the board.
    pub fn cell_view(&self, pos: Pos) -> CellView {
        let cell = self.board[pos];

        if self.state == SessionState::Lost {
            if self.triggered_mine == Some(pos) {
                return CellView::TriggeredMine;
            }
            match (cell.is_mine(), cell.cover()) {
                (true, _) => return CellView::Mine,
                (false, Cover::Flagged) => return CellView::Misflagged,
                _ => {}
            }
        }

        match cell.cover() {
            Cover::Hidden => CellView::Hidden,
            Cover::Flagged => CellView::Flagged,
            Cover::Revealed => CellView::Revealed(cell.neighbor_mines()),
        }
    }

    pub fn has_notifications(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn drain_notifications(&mut self) -> impl Iterator<Item = Notification> + '_ {
        self.pending.drain(..)
    }
}
