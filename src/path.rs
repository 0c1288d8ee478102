use crate::geometry::Point;
use core::fmt;
use itertools::Itertools;
use std::time::Duration;

/// Ordered waypoints of one planning attempt together with its scores. While an attempt runs
/// the path accumulates the sum of step scores; [finalize](Path::finalize) turns it into the
/// average.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Point>,
    score: f64,
    finalized: bool,
}

impl Path {
    pub fn new() -> Path {
        Path::default()
    }
    /// Builds a finalized path directly from its waypoints and average score. Returns [None]
    /// without waypoints.
    pub fn from_parts(waypoints: Vec<Point>, avg_score: f64) -> Option<Path> {
        if waypoints.is_empty() {
            return None;
        }
        Some(Path {
            waypoints,
            score: avg_score,
            finalized: true,
        })
    }
    pub fn push(&mut self, waypoint: Point, score: f64) {
        debug_assert!(!self.finalized, "waypoint added to a finalized path");
        self.waypoints.push(waypoint);
        self.score += score;
    }
    /// Divides the summed score by the step count. Returns [None] for a path without steps.
    pub fn finalize(mut self) -> Option<Path> {
        if self.waypoints.is_empty() {
            return None;
        }
        if !self.finalized {
            self.score /= self.steps() as f64;
            self.finalized = true;
        }
        Some(self)
    }
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }
    pub fn last(&self) -> Option<&Point> {
        self.waypoints.last()
    }
    pub fn steps(&self) -> usize {
        self.waypoints.len()
    }
    /// Average step score once finalized, the running sum before that.
    pub fn avg_score(&self) -> f64 {
        self.score
    }
    /// `avg_score / steps²`: fewer steps matter more than ending slightly closer to the target.
    pub fn quality(&self) -> f64 {
        let steps = self.steps() as f64;
        self.score / (steps * steps)
    }
    /// Travelled distance along the waypoints, optionally starting from `start`.
    pub fn length(&self, start: Option<Point>) -> f64 {
        start
            .iter()
            .chain(self.waypoints.iter())
            .tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum()
    }
}

/// All paths produced by one planning call, in attempt order, with the wall-clock time spent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanResult {
    pub paths: Vec<Path>,
    /// Attempts dropped because they exceeded a step or sample ceiling.
    pub timed_out: usize,
    pub elapsed: Duration,
}

impl PlanResult {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
    /// The path with the highest [quality](Path::quality). Ties go to the earliest attempt.
    pub fn best_path(&self) -> Option<&Path> {
        self.paths.iter().fold(None, |best: Option<&Path>, path| match best {
            Some(b) if b.quality() >= path.quality() => Some(b),
            _ => Some(path),
        })
    }
    /// Elapsed seconds rounded to two decimals.
    pub fn seconds(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 100.0).round() / 100.0
    }
}

/// Status line describing the best path of a result.
impl fmt::Display for PlanResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.best_path() {
            Some(best) => write!(
                f,
                "Best path: {} steps, quality = average_score / steps^2 = {:.6}, total time = {}s",
                best.steps(),
                best.quality(),
                self.seconds()
            ),
            None => write!(f, "Waiting for a Pathfinder to start..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_with(avg_score: f64, steps: usize) -> Path {
        Path::from_parts(vec![Point::default(); steps], avg_score).unwrap()
    }

    #[test]
    fn quality_prefers_fewer_steps() {
        assert!(path_with(0.9, 3).quality() < path_with(0.9, 2).quality());
        assert!(path_with(0.8, 2).quality() < path_with(0.9, 2).quality());
        assert!((path_with(0.9, 3).quality() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn finalize_averages_scores() {
        let mut path = Path::new();
        path.push(Point::new(1.0, 0.0), 0.5);
        path.push(Point::new(2.0, 0.0), 0.7);
        assert!((path.avg_score() - 1.2).abs() < 1e-12);
        let path = path.finalize().unwrap();
        assert!(path.is_finalized());
        assert_eq!(path.steps(), 2);
        assert!((path.avg_score() - 0.6).abs() < 1e-12);
        assert_eq!(path.last(), Some(&Point::new(2.0, 0.0)));
    }

    #[test]
    fn empty_path_cannot_be_finalized() {
        assert!(Path::new().finalize().is_none());
        assert!(Path::from_parts(Vec::new(), 0.5).is_none());
    }

    #[test]
    fn length_includes_start() {
        let path = Path::from_parts(vec![Point::new(3.0, 4.0), Point::new(3.0, 10.0)], 0.9).unwrap();
        assert!((path.length(None) - 6.0).abs() < 1e-12);
        assert!((path.length(Some(Point::new(0.0, 0.0))) - 11.0).abs() < 1e-12);
    }

    /// Qualities [0.10, 0.25, 0.07] select the second path.
    #[test]
    fn best_path_is_highest_quality() {
        let result = PlanResult {
            paths: vec![path_with(0.10, 1), path_with(0.25, 1), path_with(0.07, 1)],
            ..PlanResult::default()
        };
        let best = result.best_path().unwrap();
        assert!((best.quality() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn best_path_ties_keep_first() {
        let first = Path::from_parts(vec![Point::new(1.0, 1.0)], 0.5).unwrap();
        let second = Path::from_parts(vec![Point::new(2.0, 2.0)], 0.5).unwrap();
        let result = PlanResult {
            paths: vec![first.clone(), second],
            ..PlanResult::default()
        };
        assert_eq!(result.best_path(), Some(&first));
    }

    #[test]
    fn empty_result_has_no_best_path() {
        let result = PlanResult::default();
        assert!(result.is_empty());
        assert!(result.best_path().is_none());
        assert_eq!(result.to_string(), "Waiting for a Pathfinder to start...");
    }

    #[test]
    fn status_line() {
        let result = PlanResult {
            paths: vec![path_with(0.9, 3)],
            timed_out: 0,
            elapsed: Duration::from_millis(1234),
        };
        assert_eq!(
            result.to_string(),
            "Best path: 3 steps, quality = average_score / steps^2 = 0.100000, total time = 1.23s"
        );
    }
}
