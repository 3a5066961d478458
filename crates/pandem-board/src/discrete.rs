//! Discrete board: integer grid cells with precomputed neighbor tables.
//!
//! # Geometry
//!
//! A cell is addressed by its flat index `x + y*W` in a `W × H` grid where
//! `W = H = size + wall_width`.  Index arithmetic wraps modulo the grid
//! length; the wall rows and columns laid down at construction block nearly
//! all wrap-around movement in practice.
//!
//! Direction is a signed delta-index (`dx + dy*W`).  Neighborhood lookups use
//! offset tables generated once at construction — one cumulative list of
//! delta-indices per shape and radius — so a query is O(k) in the
//! neighborhood size with no per-query allocation beyond the result.
//!
//! # Occupancy invariant
//!
//! At most one non-wall occupant per cell, ever.  [`DiscreteBoard::set`]
//! enforces it and reports a violation as the fatal
//! [`BoardError::PauliExclusion`].

use rustc_hash::FxHashMap;

use pandem_core::{Piece, PieceId, SimRng};

use crate::{BoardError, BoardResult};

/// Largest supported lookup radius for the precomputed tables.
pub const MAX_RANGE: usize = 8;

/// Try budget for rejection-sampling an empty cell.
pub const MAX_TRIES: u32 = 50;

const WALL_WIDTH: usize = 3;

/// The 8 unit directions, in table-build order.  Used for both random
/// headings and the radius-1 ring.
const DIRS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// What occupies a cell.  Walls are terrain, not pieces — they never appear
/// in the entity arena and have no status.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Piece(PieceId),
}

/// Neighborhood shape for offset-table lookups.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Shape {
    /// Orthogonal arms only.
    Cross,
    /// Diagonal arms only.
    Diagonal,
    /// Both — the union of `Cross` and `Diagonal`.
    Square,
}

// ── Offset tables ─────────────────────────────────────────────────────────────

/// Cumulative delta-index lists per shape, indexed by `radius - 1`.
struct NeighborTables {
    cross:    Vec<Vec<isize>>,
    diagonal: Vec<Vec<isize>>,
    square:   Vec<Vec<isize>>,
}

impl NeighborTables {
    fn build(w: usize) -> Self {
        let mut cross:    Vec<Vec<isize>> = Vec::with_capacity(MAX_RANGE);
        let mut diagonal: Vec<Vec<isize>> = Vec::with_capacity(MAX_RANGE);
        let mut square:   Vec<Vec<isize>> = Vec::with_capacity(MAX_RANGE);

        for r in 1..=MAX_RANGE as isize {
            // Start from the previous radius so each list is cumulative.
            let mut c = if r == 1 { vec![] } else { cross[r as usize - 2].clone() };
            let mut d = if r == 1 { vec![] } else { diagonal[r as usize - 2].clone() };
            let mut s = if r == 1 { vec![] } else { square[r as usize - 2].clone() };

            for (dx, dy) in DIRS {
                let dindex = r * dx + r * dy * w as isize;
                if dx == 0 || dy == 0 {
                    c.push(dindex);
                } else {
                    d.push(dindex);
                }
                s.push(dindex);
            }
            cross.push(c);
            diagonal.push(d);
            square.push(s);
        }
        Self { cross, diagonal, square }
    }

    fn offsets(&self, shape: Shape, radius: usize) -> &[isize] {
        let r = radius.clamp(1, MAX_RANGE) - 1;
        match shape {
            Shape::Cross    => &self.cross[r],
            Shape::Diagonal => &self.diagonal[r],
            Shape::Square   => &self.square[r],
        }
    }
}

// ── DiscreteBoard ─────────────────────────────────────────────────────────────

/// The discrete spatial domain: a sparse occupancy map over a square grid.
pub struct DiscreteBoard {
    w: usize,
    h: usize,
    len: usize,
    cells: FxHashMap<usize, Cell>,
    nearby: NeighborTables,
}

impl DiscreteBoard {
    pub fn new(size: u32) -> Self {
        let w = size as usize + WALL_WIDTH;
        let mut board = Self {
            w,
            h: w,
            len: w * w,
            cells: FxHashMap::default(),
            nearby: NeighborTables::build(w),
        };
        board.make_walls();
        board
    }

    /// Fill the first `WALL_WIDTH` rows and columns with wall cells.
    fn make_walls(&mut self) {
        for margin in 0..WALL_WIDTH {
            for x in 0..self.w {
                self.cells.insert(self.index_of(x, margin), Cell::Wall);
            }
            for y in 0..self.h {
                self.cells.insert(self.index_of(margin, y), Cell::Wall);
            }
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    // ── Index geometry ────────────────────────────────────────────────────

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        x + y * self.w
    }

    #[inline]
    pub fn xy_of(&self, index: usize) -> (usize, usize) {
        (index % self.w, index / self.w)
    }

    /// Wrap a signed index into `0..len`.
    #[inline]
    fn wrap(&self, i: isize) -> usize {
        i.rem_euclid(self.len as isize) as usize
    }

    #[inline]
    fn piece_index(&self, piece: &Piece) -> usize {
        self.index_of(piece.x as usize, piece.y as usize)
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    #[inline]
    pub fn occupant(&self, index: usize) -> Option<Cell> {
        self.cells.get(&self.wrap(index as isize)).copied()
    }

    #[inline]
    pub fn cell_is_empty(&self, index: usize) -> bool {
        self.occupant(index).is_none()
    }

    /// Claim a cell.  Re-setting the same occupant is a no-op; any other
    /// conflict violates the one-per-cell invariant and is fatal.
    pub fn set(&mut self, index: usize, cell: Cell) -> BoardResult<()> {
        let index = self.wrap(index as isize);
        match self.cells.get(&index) {
            Some(existing) if *existing != cell => Err(BoardError::PauliExclusion { index }),
            _ => {
                self.cells.insert(index, cell);
                Ok(())
            }
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Rejection-sample an empty cell: up to [`MAX_TRIES`] uniform draws.
    fn empty_index(&self, rng: &mut SimRng) -> BoardResult<usize> {
        for _ in 0..MAX_TRIES {
            let index = rng.pick(self.len);
            if self.cell_is_empty(index) {
                return Ok(index);
            }
        }
        Err(BoardError::PlacementExhausted { tries: MAX_TRIES })
    }

    /// Place `piece` on a random empty cell with a random unit heading.
    ///
    /// `Err(PlacementExhausted)` means the grid is too crowded for the try
    /// budget — the caller logs it and continues with fewer pieces.
    pub fn place(&mut self, piece: &mut Piece, rng: &mut SimRng) -> BoardResult<()> {
        let index = self.empty_index(rng)?;
        let (dx, dy) = DIRS[rng.pick(DIRS.len())];
        self.set(index, Cell::Piece(piece.id))?;
        let (x, y) = self.xy_of(index);
        piece.x = x as f64;
        piece.y = y as f64;
        piece.dx = dx as f64;
        piece.dy = dy as f64;
        Ok(())
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Step `piece` one cell along its heading.
    ///
    /// Blocked destination → reflect (negate the heading) and try once more;
    /// still blocked → stay in place this tick.  A successful move keeps the
    /// occupancy invariant by construction: the destination was checked empty
    /// immediately before the move.
    pub fn move_piece(&mut self, piece: &mut Piece) -> BoardResult<()> {
        let (dx, dy) = (piece.dx as isize, piece.dy as isize);
        if dx == 0 && dy == 0 {
            return Ok(()); // not currently moving
        }
        let index = self.piece_index(piece);
        let dindex = dx + dy * self.w as isize;

        let dest = self.wrap(index as isize + dindex);
        if self.cell_is_empty(dest) {
            return self.relocate(piece, index, dest);
        }

        // Reflect and retry once.
        piece.dx = -piece.dx;
        piece.dy = -piece.dy;
        let dest = self.wrap(index as isize - dindex);
        if self.cell_is_empty(dest) {
            return self.relocate(piece, index, dest);
        }
        Ok(())
    }

    fn relocate(&mut self, piece: &mut Piece, from: usize, to: usize) -> BoardResult<()> {
        self.cells.remove(&from);
        self.set(to, Cell::Piece(piece.id))?;
        let (x, y) = self.xy_of(to);
        piece.x = x as f64;
        piece.y = y as f64;
        Ok(())
    }

    // ── Neighborhood queries ──────────────────────────────────────────────

    /// Ids of all pieces within the precomputed neighborhood of `index`.
    /// Walls are terrain and never appear in the result.
    pub fn neighbors(&self, index: usize, shape: Shape, radius: usize) -> Vec<PieceId> {
        self.nearby
            .offsets(shape, radius)
            .iter()
            .filter_map(|&dindex| {
                match self.occupant(self.wrap(index as isize + dindex)) {
                    Some(Cell::Piece(id)) => Some(id),
                    _ => None,
                }
            })
            .collect()
    }

    /// Neighbor ids around a piece's current cell.
    pub fn neighbors_of(&self, piece: &Piece, shape: Shape, radius: usize) -> Vec<PieceId> {
        self.neighbors(self.piece_index(piece), shape, radius)
    }
}
