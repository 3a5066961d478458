//! Continuous board: real-valued positions in `[0, W] × [0, H]`.
//!
//! Carries no spatial index — neighborhood queries are brute-force pairwise
//! scans, which is intentional: populations are in the hundreds and the O(n²)
//! sweep is amortized by the stepper's collision stride.

use std::f64::consts::TAU;

use pandem_core::{Piece, PieceId, SimRng};

use crate::BoardResult;

/// The continuous spatial domain.  Square, `W = H = size`.
pub struct ContinuousBoard {
    w: f64,
    h: f64,
}

impl ContinuousBoard {
    pub fn new(size: u32) -> Self {
        Self {
            w: size as f64,
            h: size as f64,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.w
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.h
    }

    /// Draw a uniform position and heading for `piece`.
    ///
    /// Draw order is part of the reproducibility contract: heading angle
    /// first, then x, then y.  Initial overlaps are possible and resolved by
    /// the first collision pass; placement itself never fails here.
    pub fn place(&self, piece: &mut Piece, rng: &mut SimRng) -> BoardResult<()> {
        let theta = rng.next() * TAU;
        piece.x = rng.next() * self.w;
        piece.y = rng.next() * self.h;
        piece.dx = theta.cos();
        piece.dy = theta.sin();
        Ok(())
    }

    /// Mirror reflection off the domain walls: clamp the crossed coordinate
    /// and flip the outward velocity component.  Inward components are left
    /// untouched so grazing exits keep their tangential motion.
    pub fn bounds_check(&self, piece: &mut Piece) {
        if piece.x < 0.0 {
            piece.x = 0.0;
            piece.dx = piece.dx.abs();
        } else if piece.x > self.w {
            piece.x = self.w;
            piece.dx = -piece.dx.abs();
        }
        if piece.y < 0.0 {
            piece.y = 0.0;
            piece.dy = piece.dy.abs();
        } else if piece.y > self.h {
            piece.y = self.h;
            piece.dy = -piece.dy.abs();
        }
    }

    /// All pieces within `radius` of `id`, excluding `id` itself.
    ///
    /// O(n) per query by squared-distance comparison; no index is maintained.
    pub fn neighbors(&self, pieces: &[Piece], id: PieceId, radius: f64) -> Vec<PieceId> {
        let center = &pieces[id.index()];
        let r2 = radius * radius;
        pieces
            .iter()
            .filter(|p| p.id != id)
            .filter(|p| {
                let dx = p.x - center.x;
                let dy = p.y - center.y;
                dx * dx + dy * dy < r2
            })
            .map(|p| p.id)
            .collect()
    }
}
