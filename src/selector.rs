//! One planning step: a randomized hill-climb over the movement heading.
//!
//! Headings are sampled from the current point until two consecutive collision-free samples
//! score within `margin` of each other. A fresh uniform heading is drawn whenever the latest
//! sample failed to improve on its predecessor; an improving heading is kept and perturbed by
//! at most `rate * π/2` either way.
use crate::error::{PlanningError, Result};
use crate::geometry::Point;
use crate::obstacles::ObstacleField;
use crate::planner::PlannerConfig;
use log::trace;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};

/// The last two heading scores seen during a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Convergence {
    Empty,
    One(f64),
    Two { previous: f64, last: f64 },
}

impl Convergence {
    pub fn record(self, score: f64) -> Convergence {
        match self {
            Convergence::Empty => Convergence::One(score),
            Convergence::One(previous) | Convergence::Two { last: previous, .. } => {
                Convergence::Two {
                    previous,
                    last: score,
                }
            }
        }
    }
    pub fn last(&self) -> Option<f64> {
        match *self {
            Convergence::Empty => None,
            Convergence::One(last) | Convergence::Two { last, .. } => Some(last),
        }
    }
    /// True if the latest sample strictly beats the one before it.
    pub fn improved(&self) -> bool {
        matches!(*self, Convergence::Two { previous, last } if last > previous)
    }
    /// Two samples exist, the latest did not collide and both are within `margin`.
    pub fn converged(&self, margin: f64) -> bool {
        match *self {
            Convergence::Two { previous, last } => last != 0.0 && (last - previous).abs() <= margin,
            _ => false,
        }
    }
}

/// An accepted waypoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub point: Point,
    pub score: f64,
    /// Number of headings tried before acceptance.
    pub samples: usize,
}

pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..TAU)
}

/// Heading for the next sample: `heading` shifted by at most `spread` after a strict
/// improvement, a fresh uniform heading otherwise. `spread` must be finite and non-negative.
pub fn next_heading<R: Rng + ?Sized>(
    state: &Convergence,
    heading: f64,
    spread: f64,
    rng: &mut R,
) -> f64 {
    if state.improved() {
        (heading + rng.gen_range(-spread..=spread)).rem_euclid(TAU)
    } else {
        random_heading(rng)
    }
}

#[derive(Clone, Debug)]
pub struct TargetSelector<'a> {
    field: &'a ObstacleField,
    end: Point,
    speed: u32,
    margin: f64,
    rate: f64,
    max_samples: usize,
}

impl<'a> TargetSelector<'a> {
    /// Takes speed, margin, rate and sample ceiling from `config` after validating it.
    pub fn new(
        field: &'a ObstacleField,
        end: Point,
        config: &PlannerConfig,
    ) -> Result<TargetSelector<'a>> {
        config.validate()?;
        Ok(TargetSelector {
            field,
            end,
            speed: config.speed,
            margin: config.margin,
            rate: config.rate,
            max_samples: config.max_samples,
        })
    }

    /// Searches headings from `from` until the score converges and returns the reached point.
    /// Fails with [PlanningError::SelectorStalled] once `max_samples` headings were tried.
    pub fn select<R: Rng + ?Sized>(&self, from: Point, rng: &mut R) -> Result<Selection> {
        let spread = self.rate * FRAC_PI_2;
        let mut heading = random_heading(rng);
        let mut state = Convergence::Empty;
        for samples in 1..=self.max_samples {
            let mv = self.field.move_along(from, heading, self.speed);
            let score = self.field.heading_score(&mv, &self.end);
            state = state.record(score);
            if state.converged(self.margin) {
                trace!(
                    "Accepted {} with score {:.5} after {} samples",
                    mv.point,
                    score,
                    samples
                );
                return Ok(Selection {
                    point: mv.point,
                    score,
                    samples,
                });
            }
            heading = next_heading(&state, heading, spread, rng);
        }
        Err(PlanningError::SelectorStalled {
            samples: self.max_samples,
        })
    }
}
