//! The per-tick stepping algorithms for both board strategies.
//!
//! Everything here mutates pieces by index into the arena slice — collision
//! resolution takes a pair of indices and splits the borrow, never shared
//! references threaded through closures.

use pandem_board::{ContinuousBoard, DiscreteBoard, Shape};
use pandem_core::{Piece, SimClock, SimConfig, SimRng, Status, StatusCounts, Tick};

use crate::{SimError, SimResult};

/// Run the O(n²) collision sweep only every this many ticks.  Positions
/// still integrate every tick; the sweep and wall-bounce correction are
/// amortized across the stride.
pub const COLLISION_SKIP: u64 = 4;

/// Infected fraction of the live population above which the health system
/// is considered overloaded.
pub const SURGE_THRESHOLD: f64 = 0.2;

/// Lethality multiplier applied while overloaded.
pub const SURGE_MULTIPLIER: f64 = 10.0;

// ── Continuous variant ────────────────────────────────────────────────────────

/// Advance the continuous simulation by one tick.
pub fn step_continuous(
    config: &SimConfig,
    board: &ContinuousBoard,
    pieces: &mut [Piece],
    clock: &mut SimClock,
    rng: &mut SimRng,
) -> SimResult<()> {
    clock.advance();
    let turn = clock.turn;

    // Pure Euler integration, no damping.
    for piece in pieces.iter_mut() {
        if piece.is_mobile() {
            piece.x += piece.dx * config.radius * config.dt;
            piece.y += piece.dy * config.radius * config.dt;
        }
    }

    if turn.0 % COLLISION_SKIP == 0 {
        for piece in pieces.iter_mut() {
            board.bounds_check(piece);
        }

        let threshold = (2.0 * config.radius) * (2.0 * config.radius);
        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                let dx = pieces[j].x - pieces[i].x;
                let dy = pieces[j].y - pieces[i].y;
                if dx * dx + dy * dy < threshold {
                    collide(pieces, i, j, turn, config.duration_ticks(), config.radius, rng);
                }
            }
        }

        // Separation can shove a piece past a wall; bounce again so the
        // sweep tick ends with every piece inside the domain.
        for piece in pieces.iter_mut() {
            board.bounds_check(piece);
        }
        assert_in_bounds(board, pieces)?;
    }

    expire_infections(pieces, turn, config.lethality, rng)
}

/// Resolve one overlapping pair: separation, velocity response, transmission.
///
/// Separation moves both centers apart symmetrically along the line
/// connecting them until they sit exactly `2 * radius` apart.  The velocity
/// response is the standard equal-mass 2D elastic exchange of the
/// normal-velocity components — unless a participant is dead, in which case
/// both velocities are simply inverted (the dead still repel; they never
/// transmit, since transmission requires an `Infected` participant).
pub fn collide(
    pieces: &mut [Piece],
    i: usize,
    j: usize,
    turn: Tick,
    duration_ticks: u64,
    radius: f64,
    rng: &mut SimRng,
) {
    let (a, b) = pair_mut(pieces, i, j);

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dist = (dx * dx + dy * dy).sqrt();
    // Exactly coincident centers have no defined normal; push along +x.
    let (nx, ny) = if dist > 0.0 { (dx / dist, dy / dist) } else { (1.0, 0.0) };

    let half = (2.0 * radius - dist) / 2.0;
    a.x -= nx * half;
    a.y -= ny * half;
    b.x += nx * half;
    b.y += ny * half;

    if a.status == Status::Dead || b.status == Status::Dead {
        a.dx = -a.dx;
        a.dy = -a.dy;
        b.dx = -b.dx;
        b.dy = -b.dy;
    } else {
        // Equal masses: exchange the normal components, keep the tangential.
        let a_n = a.dx * nx + a.dy * ny;
        let b_n = b.dx * nx + b.dy * ny;
        let diff = b_n - a_n;
        a.dx += diff * nx;
        a.dy += diff * ny;
        b.dx -= diff * nx;
        b.dy -= diff * ny;
    }

    if a.status == Status::Infected && b.status.is_susceptible() {
        b.infect(turn, duration_ticks, rng);
    } else if b.status == Status::Infected && a.status.is_susceptible() {
        a.infect(turn, duration_ticks, rng);
    }
}

// ── Discrete variant ──────────────────────────────────────────────────────────

/// Advance the discrete simulation by one tick: single-cell moves, then
/// cellular-automaton spread over each infected piece's radius-1 square
/// neighborhood, then the shared expiry pass.
pub fn step_discrete(
    config: &SimConfig,
    board: &mut DiscreteBoard,
    pieces: &mut [Piece],
    clock: &mut SimClock,
    rng: &mut SimRng,
) -> SimResult<()> {
    clock.advance();
    let turn = clock.turn;

    for i in 0..pieces.len() {
        if pieces[i].is_mobile() {
            board.move_piece(&mut pieces[i])?;
        }
    }

    let duration_ticks = config.duration_ticks();
    for i in 0..pieces.len() {
        if pieces[i].status != Status::Infected {
            continue;
        }
        for id in board.neighbors_of(&pieces[i], Shape::Square, 1) {
            let neighbor = &mut pieces[id.index()];
            if neighbor.status.is_susceptible() {
                neighbor.infect(turn, duration_ticks, rng);
            }
        }
    }

    expire_infections(pieces, turn, config.lethality, rng)
}

// ── Shared passes ─────────────────────────────────────────────────────────────

/// Count pieces per status in arena order.
pub fn tally(pieces: &[Piece]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for piece in pieces {
        counts.bump(piece.status);
    }
    counts
}

/// Resolve every infection that has run past its expiry tick.
///
/// The effective lethality is computed once per tick: the configured value,
/// times [`SURGE_MULTIPLIER`] while the infected share of the live
/// population exceeds [`SURGE_THRESHOLD`], capped at 1.
fn expire_infections(
    pieces: &mut [Piece],
    turn: Tick,
    lethality: f64,
    rng: &mut SimRng,
) -> SimResult<()> {
    let counts = tally(pieces);
    if counts.infected == 0 {
        return Ok(());
    }
    let live = counts.live();
    let surge = live > 0 && counts.infected as f64 / live as f64 > SURGE_THRESHOLD;
    let effective = if surge {
        (lethality * SURGE_MULTIPLIER).min(1.0)
    } else {
        lethality
    };

    for piece in pieces.iter_mut() {
        if piece.status == Status::Infected && piece.infection_expired(turn) {
            let dies = rng.chance(effective);
            piece.resolve(dies)?;
        }
    }
    Ok(())
}

/// Bounds invariant: after the wall-bounce pass, every piece must sit inside
/// the domain.  A violation aborts the step.
fn assert_in_bounds(board: &ContinuousBoard, pieces: &[Piece]) -> SimResult<()> {
    let (w, h) = (board.width(), board.height());
    for piece in pieces {
        if !(0.0..=w).contains(&piece.x) || !(0.0..=h).contains(&piece.y) {
            return Err(SimError::OutOfBounds {
                id: piece.id,
                x:  piece.x,
                y:  piece.y,
            });
        }
    }
    Ok(())
}

/// Split the arena into disjoint mutable references to pieces `i < j`.
fn pair_mut(pieces: &mut [Piece], i: usize, j: usize) -> (&mut Piece, &mut Piece) {
    debug_assert!(i < j);
    let (low, high) = pieces.split_at_mut(j);
    (&mut low[i], &mut high[0])
}
