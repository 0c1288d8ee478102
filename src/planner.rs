//! Multi-attempt path search built on [TargetSelector] steps.
use crate::error::{PlanningError, Result};
use crate::geometry::Point;
use crate::obstacles::ObstacleField;
use crate::path::{Path, PlanResult};
use crate::selector::TargetSelector;
use log::{debug, info, warn};
use rand::Rng;
use std::time::Instant;

/// Tuning parameters of a planning call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlannerConfig {
    /// Largest score difference between two consecutive samples that still counts as converged.
    pub margin: f64,
    /// Fraction of π/2, in [0, 1], by which an improving heading may be perturbed.
    pub rate: f64,
    /// An attempt ends once a step scores at least this much.
    pub score_precision: f64,
    /// Number of independent attempts per call.
    pub tries: usize,
    /// Unit sub-steps per planning step; both travel distance and collision resolution.
    pub speed: u32,
    /// Accepted waypoints after which an attempt is given up.
    pub max_steps: usize,
    /// Heading samples after which a single step is given up.
    pub max_samples: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            margin: 1e-4,
            rate: 0.45,
            score_precision: 0.96,
            tries: 4,
            speed: 15,
            max_steps: 10_000,
            max_samples: 1_000_000,
        }
    }
}

impl PlannerConfig {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }
    pub fn with_score_precision(mut self, score_precision: f64) -> Self {
        self.score_precision = score_precision;
        self
    }
    pub fn with_tries(mut self, tries: usize) -> Self {
        self.tries = tries;
        self
    }
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(PlanningError::InvalidConfig(format!(
                "margin must be a non-negative number, got {}",
                self.margin
            )));
        }
        if !(0.0..=1.0).contains(&self.rate) {
            return Err(PlanningError::InvalidConfig(format!(
                "rate must lie in [0, 1], got {}",
                self.rate
            )));
        }
        if !(self.score_precision > 0.0 && self.score_precision <= 1.0) {
            return Err(PlanningError::InvalidConfig(format!(
                "score_precision must lie in (0, 1], got {}",
                self.score_precision
            )));
        }
        if self.max_steps == 0 || self.max_samples == 0 {
            return Err(PlanningError::InvalidConfig(
                "max_steps and max_samples must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Runs [PlannerConfig::tries] independent attempts from the same start to the same end. Each
/// attempt repeatedly asks a [TargetSelector] for the next waypoint until a waypoint scores at
/// least [PlannerConfig::score_precision].
#[derive(Clone, Debug, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Result<Planner> {
        config.validate()?;
        Ok(Planner { config })
    }
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }


    fn check_inputs(&self, field: &ObstacleField, start: &Point, end: &Point) -> Result<()> {
        if !(field.diagonal().is_finite() && field.diagonal() > 0.0) {
            return Err(PlanningError::InvalidConfig(format!(
                "plane must have a positive extent, got {}x{}",
                field.width(),
                field.height()
            )));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(PlanningError::InvalidConfig(format!(
                "start {} and end {} must be finite",
                start, end
            )));
        }
        Ok(())
    }

    /// Builds one path from `start`, failing once [PlannerConfig::max_steps] waypoints were
    /// accepted without reaching the score precision.
    pub fn attempt<R: Rng + ?Sized>(
        &self,
        selector: &TargetSelector,
        start: Point,
        rng: &mut R,
    ) -> Result<Path> {
        let mut path = Path::new();
        let mut current = start;
        let mut samples = 0;
        for _ in 0..self.config.max_steps {
            let selection = selector.select(current, rng)?;
            path.push(selection.point, selection.score);
            current = selection.point;
            samples += selection.samples;
            if selection.score >= self.config.score_precision {
                let steps = path.steps();
                debug!("Reached {} in {} steps, {} headings tried", current, steps, samples);
                return path
                    .finalize()
                    .ok_or(PlanningError::AttemptTimedOut { steps });
            }
        }
        Err(PlanningError::AttemptTimedOut {
            steps: self.config.max_steps,
        })
    }

    /// Plans [PlannerConfig::tries] paths one after another. Attempts that hit a ceiling are
    /// logged and counted in [PlanResult::timed_out]; the call only fails when every attempt did.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        field: &ObstacleField,
        start: Point,
        end: Point,
        rng: &mut R,
    ) -> Result<PlanResult> {
        self.check_inputs(field, &start, &end)?;
        info!(
            "Planning {} paths from {} to {}",
            self.config.tries, start, end
        );
        let before = Instant::now();
        let selector = TargetSelector::new(field, end, &self.config)?;
        let outcomes = (0..self.config.tries).map(|_| self.attempt(&selector, start, rng));
        self.finish(outcomes, before)
    }

    /// Parallel variant of [plan](Self::plan). One seed per attempt is drawn from `rng` up
    /// front, so the result only depends on the state of `rng`.
    #[cfg(feature = "parallel")]
    pub fn plan_parallel<R: Rng + ?Sized>(
        &self,
        field: &ObstacleField,
        start: Point,
        end: Point,
        rng: &mut R,
    ) -> Result<PlanResult> {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use rayon::prelude::*;

        self.check_inputs(field, &start, &end)?;
        info!(
            "Planning {} paths in parallel from {} to {}",
            self.config.tries, start, end
        );
        let before = Instant::now();
        let selector = TargetSelector::new(field, end, &self.config)?;
        let seeds: Vec<u64> = (0..self.config.tries).map(|_| rng.gen()).collect();
        let outcomes: Vec<Result<Path>> = seeds
            .par_iter()
            .map(|&seed| self.attempt(&selector, start, &mut StdRng::seed_from_u64(seed)))
            .collect();
        self.finish(outcomes, before)
    }

    fn finish<I>(&self, outcomes: I, before: Instant) -> Result<PlanResult>
    where
        I: IntoIterator<Item = Result<Path>>,
    {
        let mut result = PlanResult::default();
        for (attempt, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(path) => {
                    debug!(
                        "Attempt {}: {} steps, quality {:.6}",
                        attempt,
                        path.steps(),
                        path.quality()
                    );
                    result.paths.push(path);
                }
                Err(err) => {
                    warn!("Attempt {} dropped: {}", attempt, err);
                    result.timed_out += 1;
                }
            }
        }
        result.elapsed = before.elapsed();
        if result.paths.is_empty() && result.timed_out > 0 {
            return Err(PlanningError::AllAttemptsTimedOut {
                tries: result.timed_out,
            });
        }
        info!(
            "Found {} paths ({} timed out) in {:.2?}",
            result.paths.len(),
            result.timed_out,
            result.elapsed
        );
        Ok(result)
    }
}
