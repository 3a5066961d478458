//! Integration tests for pandem-sim: golden snapshots, invariants, and the
//! collision properties from the reproducibility contract.

use pandem_core::{BoardKind, SimConfig, Status, Tick};

use crate::{Simulation, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tiny_config() -> SimConfig {
    SimConfig {
        people: 2,
        ..SimConfig::default()
    }
}

/// A short, lethal epidemic on a dense board — finishes within a few
/// hundred ticks so terminality and conservation get real transitions.
fn dense_config() -> SimConfig {
    SimConfig {
        people:    80,
        infected:  5,
        lethality: 0.5,
        duration:  1, // 10 ticks at dt = 0.1
        size:      120,
        shelter:   0.0,
        seed:      42,
        ..SimConfig::default()
    }
}

// ── Golden snapshots ──────────────────────────────────────────────────────────
//
// Recorded reference state for seed 12345, people 2, defaults otherwise.
// Positions at construction are exact IEEE products of the RNG stream;
// headings pass through libm trig, so those carry a 1e-9 tolerance.

#[cfg(test)]
mod golden {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn snapshot_after_construction() {
        let sim = Simulation::new(tiny_config()).unwrap();
        let pieces = sim.pieces();
        assert_eq!(pieces.len(), 2);

        let p0 = &pieces[0];
        assert_eq!(p0.status, Status::Healthy);
        assert!(!p0.sheltering);
        assert_eq!(p0.infected_until, None);
        assert!((p0.x - 153.37613224983215).abs() < EPS);
        assert!((p0.y - 242.1027107629925).abs() < EPS);
        assert!((p0.dx - 0.9918992684541018).abs() < EPS);
        assert!((p0.dy - -0.12702693116114272).abs() < EPS);

        let p1 = &pieces[1];
        assert_eq!(p1.status, Status::Infected);
        assert!(!p1.sheltering);
        assert_eq!(p1.infected_until, Some(Tick(674)));
        assert!((p1.x - 173.73593023512512).abs() < EPS);
        assert!((p1.y - 36.87877091579139).abs() < EPS);
        assert!((p1.dx - -0.998245812942689).abs() < EPS);
        assert!((p1.dy - -0.05920554823992397).abs() < EPS);
    }

    #[test]
    fn snapshot_after_two_steps() {
        let mut sim = Simulation::new(tiny_config()).unwrap();
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(sim.turn(), Tick(2));

        let pieces = sim.pieces();
        assert!((pieces[0].x - 154.36803151828627).abs() < EPS);
        assert!((pieces[0].y - 241.97568383183136).abs() < EPS);
        assert!((pieces[1].x - 172.73768442218244).abs() < EPS);
        assert!((pieces[1].y - 36.81956536755146).abs() < EPS);
        // No collision tick has run yet (stride 4) and no infection expired,
        // so statuses are untouched.
        assert_eq!(pieces[0].status, Status::Healthy);
        assert_eq!(pieces[1].status, Status::Infected);
        assert_eq!(pieces[1].infected_until, Some(Tick(674)));
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    #[test]
    fn same_seed_same_run() {
        let mut a = Simulation::new(SimConfig::default()).unwrap();
        let mut b = Simulation::new(SimConfig::default()).unwrap();
        assert_eq!(a.pieces(), b.pieces());

        for _ in 0..50 {
            a.step().unwrap();
            b.step().unwrap();
        }
        // Stats history depends on wall-clock time, so compare the
        // deterministic state only: arena, turn.
        assert_eq!(a.pieces(), b.pieces());
        assert_eq!(a.turn(), b.turn());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = Simulation::new(SimConfig::default()).unwrap();
        let b = Simulation::new(SimConfig { seed: 54321, ..SimConfig::default() }).unwrap();
        assert_ne!(a.pieces(), b.pieces());
    }

    #[test]
    fn reset_continues_the_stream() {
        // Reset does not reseed: a reset population differs from the
        // construction population, but two sims reset in lockstep agree.
        let mut a = Simulation::new(SimConfig::default()).unwrap();
        let mut b = Simulation::new(SimConfig::default()).unwrap();
        let initial = a.pieces().to_vec();

        a.reset().unwrap();
        b.reset().unwrap();
        assert_ne!(a.pieces(), &initial[..]);
        assert_eq!(a.pieces(), b.pieces());
        assert_eq!(a.turn(), Tick::ZERO);
    }
}

// ── Population invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn population_is_conserved() {
        let mut sim = Simulation::new(dense_config()).unwrap();
        assert_eq!(sim.counts().total(), 80);
        for _ in 0..200 {
            sim.step().unwrap();
            assert_eq!(sim.counts().total(), 80, "no piece created or destroyed");
        }
    }

    #[test]
    fn terminal_statuses_never_change() {
        let mut sim = Simulation::new(dense_config()).unwrap();
        let mut terminal: Vec<Option<Status>> = vec![None; sim.pieces().len()];

        for _ in 0..500 {
            sim.step().unwrap();
            for (i, piece) in sim.pieces().iter().enumerate() {
                if let Some(locked) = terminal[i] {
                    assert_eq!(piece.status, locked, "terminal piece changed status");
                } else if piece.status.is_terminal() {
                    terminal[i] = Some(piece.status);
                }
            }
        }
        assert!(
            terminal.iter().any(Option::is_some),
            "expected at least one death or recovery in a lethal dense run"
        );
    }

    #[test]
    fn positions_stay_in_domain_on_collision_ticks() {
        let mut sim = Simulation::new(dense_config()).unwrap();
        let domain = sim.domain();
        for _ in 0..400 {
            sim.step().unwrap();
            if sim.turn().0 % crate::COLLISION_SKIP == 0 {
                for p in sim.pieces() {
                    assert!((domain.x[0]..=domain.x[1]).contains(&p.x));
                    assert!((domain.y[0]..=domain.y[1]).contains(&p.y));
                }
            }
        }
    }

    #[test]
    fn under_seeded_run_is_accepted() {
        // Everyone shelters, so seeding finds no Healthy target and gives up
        // after its budget — logged, not an error.
        let config = SimConfig {
            people:  10,
            shelter: 1.0,
            ..SimConfig::default()
        };
        let sim = Simulation::new(config).unwrap();
        assert_eq!(sim.counts().infected, 0);
        assert_eq!(sim.counts().shelter, 10);
    }
}

// ── Collision properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod collision {
    use approx::assert_abs_diff_eq;
    use pandem_core::{Piece, PieceId, SimRng};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::stepper::collide;
    use super::*;

    fn piece_at(id: u32, x: f64, y: f64, dx: f64, dy: f64) -> Piece {
        let mut p = Piece::new(PieceId(id));
        p.x = x;
        p.y = y;
        p.dx = dx;
        p.dy = dy;
        p
    }

    #[test]
    fn separation_restores_exact_diameter() {
        // 100 randomized overlapping pairs at radius 30: post-separation
        // distance must be 60 within 0.01.
        let mut random = SmallRng::seed_from_u64(99);
        let mut rng = SimRng::new(7);

        for _ in 0..100 {
            let x = random.gen_range(100.0..400.0);
            let y = random.gen_range(100.0..400.0);
            let angle: f64 = random.gen_range(0.0..std::f64::consts::TAU);
            let overlap = random.gen_range(1.0..59.0);

            let mut pieces = vec![
                piece_at(0, x, y, 1.0, 0.0),
                piece_at(1, x + angle.cos() * overlap, y + angle.sin() * overlap, -1.0, 0.0),
            ];
            collide(&mut pieces, 0, 1, Tick(1), 1000, 30.0, &mut rng);

            let dx = pieces[1].x - pieces[0].x;
            let dy = pieces[1].y - pieces[0].y;
            let dist = (dx * dx + dy * dy).sqrt();
            assert_abs_diff_eq!(dist, 60.0, epsilon = 0.01);
        }
    }

    #[test]
    fn separation_at_the_wall_is_bounced_back_inside() {
        // An overlapping pair hugging the y = 0 wall: separation alone would
        // shove one piece to a negative y, so the sweep tick must finish with
        // a second wall bounce instead of an out-of-bounds position.
        use pandem_board::ContinuousBoard;
        use pandem_core::SimClock;

        use crate::stepper::step_continuous;

        let config = SimConfig::default();
        let board = ContinuousBoard::new(config.size);
        let mut rng = SimRng::new(1);
        let mut clock = SimClock::new();
        clock.turn = Tick(3); // the next advance lands on a sweep tick

        let mut pieces = vec![
            piece_at(0, 50.0, 0.4, 0.1, -0.3),
            piece_at(1, 50.0, 1.2, 0.2, 0.4),
        ];
        step_continuous(&config, &board, &mut pieces, &mut clock, &mut rng).unwrap();

        for p in &pieces {
            assert!((0.0..=500.0).contains(&p.x), "x out of bounds: {}", p.x);
            assert!((0.0..=500.0).contains(&p.y), "y out of bounds: {}", p.y);
        }
    }

    #[test]
    fn elastic_response_conserves_momentum_and_energy() {
        let mut rng = SimRng::new(7);
        let mut pieces = vec![
            piece_at(0, 0.0, 0.0, 0.8, 0.6),
            piece_at(1, 6.0, 2.0, -0.5, 0.5),
        ];
        let momentum_before = (
            pieces[0].dx + pieces[1].dx,
            pieces[0].dy + pieces[1].dy,
        );
        let energy_before = pieces[0].dx * pieces[0].dx
            + pieces[0].dy * pieces[0].dy
            + pieces[1].dx * pieces[1].dx
            + pieces[1].dy * pieces[1].dy;

        collide(&mut pieces, 0, 1, Tick(1), 1000, 5.0, &mut rng);

        let momentum_after = (
            pieces[0].dx + pieces[1].dx,
            pieces[0].dy + pieces[1].dy,
        );
        let energy_after = pieces[0].dx * pieces[0].dx
            + pieces[0].dy * pieces[0].dy
            + pieces[1].dx * pieces[1].dx
            + pieces[1].dy * pieces[1].dy;

        assert_abs_diff_eq!(momentum_before.0, momentum_after.0, epsilon = 1e-12);
        assert_abs_diff_eq!(momentum_before.1, momentum_after.1, epsilon = 1e-12);
        assert_abs_diff_eq!(energy_before, energy_after, epsilon = 1e-12);
    }

    #[test]
    fn head_on_collision_swaps_normal_velocities() {
        let mut rng = SimRng::new(7);
        // Moving straight at each other along x; normal is x.
        let mut pieces = vec![
            piece_at(0, 0.0, 0.0, 1.0, 0.0),
            piece_at(1, 8.0, 0.0, -1.0, 0.0),
        ];
        collide(&mut pieces, 0, 1, Tick(1), 1000, 5.0, &mut rng);
        assert_abs_diff_eq!(pieces[0].dx, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pieces[1].dx, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn dead_participant_inverts_both_velocities() {
        let mut rng = SimRng::new(7);
        let mut pieces = vec![
            piece_at(0, 0.0, 0.0, 0.3, 0.4),
            piece_at(1, 6.0, 0.0, -0.2, 0.9),
        ];
        pieces[1].status = Status::Dead;

        collide(&mut pieces, 0, 1, Tick(1), 1000, 5.0, &mut rng);
        assert_eq!((pieces[0].dx, pieces[0].dy), (-0.3, -0.4));
        assert_eq!((pieces[1].dx, pieces[1].dy), (0.2, -0.9));
    }

    #[test]
    fn transmission_infects_the_susceptible_side() {
        let mut rng = SimRng::new(7);
        for susceptible in [Status::Healthy, Status::Shelter] {
            let mut pieces = vec![
                piece_at(0, 0.0, 0.0, 1.0, 0.0),
                piece_at(1, 6.0, 0.0, -1.0, 0.0),
            ];
            pieces[0].status = Status::Infected;
            pieces[0].infected_until = Some(Tick(500));
            pieces[1].status = susceptible;

            collide(&mut pieces, 0, 1, Tick(3), 1000, 5.0, &mut rng);
            assert_eq!(pieces[1].status, Status::Infected);
            assert!(pieces[1].infected_until.is_some());
        }
    }

    #[test]
    fn reexposure_does_not_reset_expiry() {
        let mut rng = SimRng::new(7);
        let mut pieces = vec![
            piece_at(0, 0.0, 0.0, 1.0, 0.0),
            piece_at(1, 6.0, 0.0, -1.0, 0.0),
        ];
        pieces[0].status = Status::Infected;
        pieces[0].infected_until = Some(Tick(500));
        pieces[1].status = Status::Infected;
        pieces[1].infected_until = Some(Tick(700));

        collide(&mut pieces, 0, 1, Tick(3), 1000, 5.0, &mut rng);
        assert_eq!(pieces[0].infected_until, Some(Tick(500)));
        assert_eq!(pieces[1].infected_until, Some(Tick(700)));
    }

    #[test]
    fn dead_and_recovered_never_catch_it() {
        let mut rng = SimRng::new(7);
        for immune in [Status::Dead, Status::Recovered] {
            let mut pieces = vec![
                piece_at(0, 0.0, 0.0, 1.0, 0.0),
                piece_at(1, 6.0, 0.0, -1.0, 0.0),
            ];
            pieces[0].status = Status::Infected;
            pieces[0].infected_until = Some(Tick(500));
            pieces[1].status = immune;

            collide(&mut pieces, 0, 1, Tick(3), 1000, 5.0, &mut rng);
            assert_eq!(pieces[1].status, immune);
            assert_eq!(pieces[1].infected_until, None);
        }
    }
}

// ── Discrete variant ──────────────────────────────────────────────────────────

#[cfg(test)]
mod discrete {
    use std::collections::HashSet;

    use super::*;

    fn discrete_config() -> SimConfig {
        SimConfig {
            people:   100,
            infected: 3,
            size:     50,
            board:    BoardKind::Discrete,
            seed:     7,
            ..SimConfig::default()
        }
    }

    #[test]
    fn no_cell_ever_holds_two_pieces() {
        let mut sim = Simulation::new(discrete_config()).unwrap();
        for _ in 0..100 {
            sim.step().unwrap();
            let cells: HashSet<(u64, u64)> = sim
                .pieces()
                .iter()
                .map(|p| (p.x as u64, p.y as u64))
                .collect();
            assert_eq!(cells.len(), sim.pieces().len(), "two pieces share a cell");
        }
    }

    #[test]
    fn infection_spreads_through_neighborhoods() {
        let mut sim = Simulation::new(discrete_config()).unwrap();
        let initial = sim.counts().infected;
        for _ in 0..400 {
            sim.step().unwrap();
        }
        let counts = sim.counts();
        assert_eq!(counts.total(), sim.pieces().len() as u32);
        // On a 50×50 grid with 100 movers the infection has to reach someone.
        assert!(
            counts.infected + counts.recovered + counts.dead > initial,
            "expected the infection to spread: {counts:?}"
        );
    }

    #[test]
    fn discrete_run_is_deterministic() {
        let mut a = Simulation::new(discrete_config()).unwrap();
        let mut b = Simulation::new(discrete_config()).unwrap();
        for _ in 0..50 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.pieces(), b.pieces());
    }
}

// ── Stats recorder ────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use pandem_core::StatusCounts;

    use crate::StatsRecorder;
    use super::*;

    fn counts(infected: u32) -> StatusCounts {
        StatusCounts {
            healthy: 10,
            infected,
            ..StatusCounts::default()
        }
    }

    #[test]
    fn one_sample_per_interval() {
        let mut recorder = StatsRecorder::new(100);
        assert!(recorder.record(0, Tick(1), counts(1)).is_some());
        // Same interval: suppressed no matter how many ticks land in it.
        assert!(recorder.record(30, Tick(2), counts(1)).is_none());
        assert!(recorder.record(90, Tick(3), counts(1)).is_none());
        // Next interval opens.
        assert!(recorder.record(150, Tick(4), counts(1)).is_some());
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn length_bounded_by_elapsed_intervals() {
        let mut recorder = StatsRecorder::new(100);
        for ms in (0..5_000).step_by(10) {
            recorder.record(ms, Tick(ms), counts(1));
            assert!(recorder.len() as u64 <= ms / 100 + 1);
        }
    }

    #[test]
    fn suppressed_at_zero_infected() {
        let mut recorder = StatsRecorder::new(100);
        assert!(recorder.record(0, Tick(1), counts(0)).is_none());
        assert!(recorder.is_empty());
    }

    #[test]
    fn history_is_append_only() {
        let mut recorder = StatsRecorder::new(100);
        recorder.record(0, Tick(1), counts(5));
        let first = recorder.history()[0].clone();
        recorder.record(200, Tick(2), counts(3));
        recorder.record(400, Tick(3), counts(2));
        assert_eq!(recorder.history()[0], first, "old samples never rewritten");
        let turns: Vec<u64> = recorder.history().iter().map(|s| s.turn.0).collect();
        assert!(turns.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn no_backlog_after_pause() {
        let mut recorder = StatsRecorder::new(100);
        // Simulate a long pause: elapsed jumps far ahead, then many offers
        // arrive in one burst.  Only one sample per offer interval applies.
        recorder.record(0, Tick(1), counts(1));
        recorder.record(10_000, Tick(2), counts(1));
        recorder.record(10_001, Tick(3), counts(1));
        recorder.record(10_002, Tick(4), counts(1));
        // The recorder catches up one sample per offer, bounded by elapsed.
        assert!(recorder.len() as u64 <= 10_002 / 100 + 1);
    }
}

// ── Controller surface ────────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use pandem_core::StatusCounts;

    use crate::StatsSample;
    use super::*;

    #[test]
    fn scatter_is_ordered_by_id() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        let scatter = sim.scatter();
        assert_eq!(scatter.len(), 200);
        assert!(scatter.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn scatter_points_carry_marker_fields() {
        use crate::{Symbol, SYMBOL_SIZE};

        let sim = Simulation::new(tiny_config()).unwrap();
        for point in sim.scatter() {
            assert_eq!(point.symbol, Symbol::Square);
            assert_eq!(point.size, SYMBOL_SIZE);
        }
    }

    #[test]
    fn domain_matches_config_size() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        let domain = sim.domain();
        assert_eq!(domain.x, [0.0, 500.0]);
        assert_eq!(domain.y, [0.0, 500.0]);
    }

    #[test]
    fn start_stop_toggle_scheduling_flag() {
        let mut sim = Simulation::new(tiny_config()).unwrap();
        assert!(!sim.is_running());
        sim.start();
        assert!(sim.is_running());
        // stop() is coarse: it only clears the flag; stepping still works if
        // the driver chooses to keep calling.
        sim.stop();
        assert!(!sim.is_running());
        sim.step().unwrap();
        assert_eq!(sim.turn(), Tick(1));
    }

    #[test]
    fn reset_discards_prior_population() {
        let mut sim = Simulation::new(dense_config()).unwrap();
        for _ in 0..100 {
            sim.step().unwrap();
        }
        sim.reset().unwrap();
        assert_eq!(sim.turn(), Tick::ZERO);
        assert_eq!(sim.frame(), 0);
        assert!(sim.stats().is_empty());
        let counts = sim.counts();
        assert_eq!(counts.total(), 80);
        assert_eq!(counts.dead, 0);
        assert_eq!(counts.recovered, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimConfig { people: 0, ..SimConfig::default() };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn observer_hooks_fire() {
        struct Recorder {
            steps: usize,
            samples: usize,
        }
        impl SimObserver for Recorder {
            fn on_step_end(&mut self, _turn: Tick, counts: &StatusCounts) {
                self.steps += 1;
                assert_eq!(counts.total(), 2);
            }
            fn on_sample(&mut self, _sample: &StatsSample) {
                self.samples += 1;
            }
        }

        let mut sim = Simulation::new(tiny_config()).unwrap();
        sim.start();
        let mut obs = Recorder { steps: 0, samples: 0 };
        for _ in 0..10 {
            sim.step_with(&mut obs).unwrap();
        }
        assert_eq!(obs.steps, 10);
        assert!(obs.samples >= 1, "the first interval always yields a sample");
    }

    #[test]
    fn fps_is_finite() {
        let mut sim = Simulation::new(tiny_config()).unwrap();
        sim.start();
        sim.step().unwrap();
        assert!(sim.fps().is_finite());
        assert!(sim.fps() >= 0.0);
    }
}

// ── Performance smoke ─────────────────────────────────────────────────────────

#[cfg(test)]
mod perf {
    use pandem_core::SimRng;

    use crate::stepper::collide;
    use super::*;

    #[test]
    fn thousand_steps_complete() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        for _ in 0..1000 {
            sim.step().unwrap();
        }
        assert_eq!(sim.turn(), Tick(1000));
        assert_eq!(sim.counts().total(), 200);
    }

    #[test]
    fn thousand_collide_calls_complete() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        let mut pieces = sim.pieces().to_vec();
        let mut rng = SimRng::new(1);
        for _ in 0..1000 {
            collide(&mut pieces, 0, 1, Tick(1), 1000, 5.0, &mut rng);
        }
    }
}
