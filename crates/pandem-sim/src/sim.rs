//! The simulation controller.
//!
//! One `Simulation` instance exclusively owns all state — piece arena,
//! board, clock, RNG, stats — and is handed to the embedding application by
//! explicit ownership, never stashed in ambient globals.  The application
//! drives `step()` from its own timer; `start()`/`stop()` only toggle the
//! scheduling flag and capture the start timestamp.

use std::time::Instant;

use pandem_board::{Board, BoardError};
use pandem_core::{Piece, PieceId, SimClock, SimConfig, SimRng, Status, StatusCounts, Tick};

use crate::stats::{StatsRecorder, SAMPLE_RATE_MS};
use crate::stepper;
use crate::{NoopObserver, SimObserver, SimResult};

/// Marker glyph for a scatter point.  Every piece renders as a square today;
/// the field exists so the wire shape matches what chart widgets consume.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    #[default]
    Square,
}

/// Marker size in pixels.
pub const SYMBOL_SIZE: u32 = 7;

/// One rendered point: everything the scatter layer needs for a piece.
#[derive(Copy, Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ScatterPoint {
    pub id: PieceId,
    pub x: f64,
    pub y: f64,
    pub status: Status,
    pub symbol: Symbol,
    pub size: u32,
}

/// Axis extents for chart scaling.
#[derive(Copy, Clone, PartialEq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// The simulation controller: configuration, lifecycle, and read-only views.
pub struct Simulation {
    config: SimConfig,
    board: Board,
    pieces: Vec<Piece>,
    rng: SimRng,
    clock: SimClock,
    stats: StatsRecorder,
    running: bool,
    frame: u64,
    started_at: Instant,
}

impl Simulation {
    /// Validate the config, seed the RNG, and build the initial population.
    ///
    /// This is the only place the RNG is seeded; `reset()` continues the
    /// stream, so the full run remains a pure function of seed and config.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut rng = SimRng::new(config.seed);
        let mut board = Board::new(config.board, config.size);
        let pieces = populate(&config, &mut board, &mut rng)?;
        Ok(Self {
            config,
            board,
            pieces,
            rng,
            clock: SimClock::new(),
            stats: StatsRecorder::new(SAMPLE_RATE_MS),
            running: false,
            frame: 0,
            started_at: Instant::now(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Discard the population and rebuild it from scratch.
    ///
    /// The new board and arena are built before anything is replaced, so a
    /// failed reset leaves the previous state fully observable.
    pub fn reset(&mut self) -> SimResult<()> {
        let mut board = Board::new(self.config.board, self.config.size);
        let pieces = populate(&self.config, &mut board, &mut self.rng)?;
        self.board = board;
        self.pieces = pieces;
        self.clock.reset();
        self.stats = StatsRecorder::new(SAMPLE_RATE_MS);
        self.frame = 0;
        self.started_at = Instant::now();
        Ok(())
    }

    /// Mark the simulation as scheduled and capture the timestamp that
    /// anchors FPS and sample-rate math.  The controller never self-ticks.
    pub fn start(&mut self) {
        self.running = true;
        self.started_at = Instant::now();
    }

    /// Coarse cancellation: the external driver stops calling `step()`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one tick without observer callbacks.
    pub fn step(&mut self) -> SimResult<()> {
        self.step_with(&mut NoopObserver)
    }

    /// Advance one tick and fire the observer hooks.
    ///
    /// Runs to completion before returning — there is no reentrancy and no
    /// internal suspension, so the external driver can call this once per
    /// frame without overlap concerns.
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        match &mut self.board {
            Board::Continuous(board) => stepper::step_continuous(
                &self.config,
                board,
                &mut self.pieces,
                &mut self.clock,
                &mut self.rng,
            )?,
            Board::Discrete(board) => stepper::step_discrete(
                &self.config,
                board,
                &mut self.pieces,
                &mut self.clock,
                &mut self.rng,
            )?,
        }
        self.frame += 1;

        let counts = self.counts();
        let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        if let Some(sample) = self.stats.record(elapsed_ms, self.clock.turn, counts) {
            observer.on_sample(sample);
        }
        observer.on_step_end(self.clock.turn, &counts);
        Ok(())
    }

    // ── Read-only views for the excluded rendering layer ──────────────────

    /// Scatter view of every piece, ordered by id for stable redraw.
    pub fn scatter(&self) -> Vec<ScatterPoint> {
        self.pieces
            .iter()
            .map(|p| ScatterPoint {
                id: p.id,
                x: p.x,
                y: p.y,
                status: p.status,
                symbol: Symbol::Square,
                size: SYMBOL_SIZE,
            })
            .collect()
    }

    /// Axis extents of the spatial domain.
    pub fn domain(&self) -> Domain {
        Domain {
            x: [0.0, self.board.width()],
            y: [0.0, self.board.height()],
        }
    }

    /// Per-status census of the current arena.
    pub fn counts(&self) -> StatusCounts {
        stepper::tally(&self.pieces)
    }

    #[inline]
    pub fn turn(&self) -> Tick {
        self.clock.turn
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Steps per second of wall-clock time since `start()`/`reset()`.
    pub fn fps(&self) -> f64 {
        let secs = self.started_at.elapsed().as_secs_f64();
        if secs > 0.0 { self.frame as f64 / secs } else { 0.0 }
    }

    pub fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

// ── Population construction ───────────────────────────────────────────────────

/// Place and seed a fresh population.
///
/// Draw order per piece is placement (heading, x, y on the continuous
/// board; cell and direction on the discrete board) followed by the shelter
/// draw — then the infection-seeding loop.  This order is part of the
/// reproducibility contract.
///
/// Recoverable exhaustion — a placement or seeding try budget running out —
/// is logged and absorbed: the run proceeds with fewer pieces or fewer
/// initial infections rather than failing.
fn populate(config: &SimConfig, board: &mut Board, rng: &mut SimRng) -> SimResult<Vec<Piece>> {
    let duration_ticks = config.duration_ticks();
    let mut pieces: Vec<Piece> = Vec::with_capacity(config.people);

    for _ in 0..config.people {
        let mut piece = Piece::new(PieceId(pieces.len() as u32));
        match board.place(&mut piece, rng) {
            Ok(()) => {}
            Err(BoardError::PlacementExhausted { tries }) => {
                log::warn!(
                    "no empty cell after {tries} tries; continuing with {} pieces",
                    pieces.len()
                );
                continue;
            }
            Err(fatal) => return Err(fatal.into()),
        }
        if rng.chance(config.shelter) {
            piece.shelter();
        }
        pieces.push(piece);
    }

    // Initial infections: uniform picks with a bounded try budget, skipping
    // anything that is not plain Healthy.
    if !pieces.is_empty() {
        let mut to_infect = config.infected;
        let mut tries = config.max_tries();
        while to_infect > 0 && tries > 0 {
            let index = rng.pick(pieces.len());
            let piece = &mut pieces[index];
            if piece.status == Status::Healthy {
                piece.infect(Tick::ZERO, duration_ticks, rng);
                to_infect -= 1;
            }
            tries -= 1;
        }
        if to_infect > 0 {
            log::warn!(
                "infection seeding exhausted its budget: {to_infect} of {} not placed",
                config.infected
            );
        }
    }

    Ok(pieces)
}
