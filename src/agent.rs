use crate::geometry::Point;
use crate::path::{Path, PlanResult};

/// A moving agent that follows planned paths. The planner never refers to an agent; the
/// caller hands the best path over with [apply_best_path](Agent::apply_best_path).
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub position: Point,
    /// Unit sub-steps per planning step.
    pub speed: u32,
    best_path: Option<Path>,
}

impl Agent {
    pub fn new(position: Point, speed: u32) -> Agent {
        Agent {
            position,
            speed,
            best_path: None,
        }
    }
    /// Moves the agent without planning. Any path held so far no longer starts here and is dropped.
    pub fn relocate(&mut self, position: Point) {
        self.position = position;
        self.best_path = None;
    }
    /// Copies the best path of `result`, or clears the held path if the result is empty.
    pub fn apply_best_path(&mut self, result: &PlanResult) {
        self.best_path = result.best_path().cloned();
    }
    pub fn best_path(&self) -> Option<&Path> {
        self.best_path.as_ref()
    }
    pub fn is_following_path(&self) -> bool {
        self.best_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_relocate() {
        let mut agent = Agent::new(Point::new(450.0, 450.0), 15);
        assert!(!agent.is_following_path());
        let result = PlanResult {
            paths: vec![Path::from_parts(vec![Point::new(300.0, 50.0)], 0.97).unwrap()],
            ..PlanResult::default()
        };
        agent.apply_best_path(&result);
        assert_eq!(agent.best_path().map(Path::steps), Some(1));
        agent.apply_best_path(&PlanResult::default());
        assert!(agent.best_path().is_none());
        agent.apply_best_path(&result);
        agent.relocate(Point::new(10.0, 10.0));
        assert!(!agent.is_following_path());
        assert_eq!(agent.position, Point::new(10.0, 10.0));
    }
}
