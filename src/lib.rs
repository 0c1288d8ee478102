//! # heading_pathfinding
//!
//! Plans paths across a continuous plane blocked by axis-aligned rectangles without building
//! a grid or a graph. Each step is a randomized
//! [hill climb](https://en.wikipedia.org/wiki/Hill_climbing) over the movement heading: headings
//! are sampled, scored by how much closer they bring the agent to the target (0 on a
//! collision) and refined while they keep improving. Several independent attempts are made
//! per call and the one with the best `average_score / steps²` is used.
pub mod agent;
pub mod error;
pub mod geometry;
pub mod obstacles;
pub mod path;
pub mod planner;
pub mod selector;

pub use agent::Agent;
pub use error::{PlanningError, Result};
pub use geometry::{Point, Rect};
pub use obstacles::{Move, ObstacleField};
pub use path::{Path, PlanResult};
pub use planner::{Planner, PlannerConfig};
pub use selector::{Convergence, Selection, TargetSelector};

use log::info;
use rand::Rng;

/// Width of the demo plane.
pub const DEMO_WIDTH: f64 = 700.0;
/// Height of the demo plane.
pub const DEMO_HEIGHT: f64 = 600.0;

/// [Pathfinder] keeps the obstacles, the current start and end and the result of the most
/// recent planning call. A new call replaces the previous result entirely.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub field: ObstacleField,
    planner: Planner,
    start: Point,
    end: Option<Point>,
    result: PlanResult,
}

impl Pathfinder {
    pub fn new(field: ObstacleField, planner: Planner, start: Point) -> Pathfinder {
        Pathfinder {
            field,
            planner,
            start,
            end: None,
            result: PlanResult::default(),
        }
    }
    pub fn planner(&self) -> &Planner {
        &self.planner
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    pub fn set_start(&mut self, start: Point) {
        self.start = start;
    }
    pub fn set_end(&mut self, end: Point) {
        self.end = Some(end);
    }

    /// Plans from the current start to the current end. The previous result is discarded even
    /// if planning fails.
    pub fn find_path<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&PlanResult> {
        self.result = PlanResult::default();
        let end = self
            .end
            .ok_or_else(|| PlanningError::InvalidConfig("no end target set".to_owned()))?;
        self.result = self.planner.plan(&self.field, self.start, end, rng)?;
        Ok(&self.result)
    }
    /// [find_path](Self::find_path) with the thread-local random generator.
    pub fn find_path_default(&mut self) -> Result<&PlanResult> {
        self.find_path(&mut rand::thread_rng())
    }
    pub fn last_result(&self) -> &PlanResult {
        &self.result
    }
    /// Best path of the last call, [None] before any planning succeeded.
    pub fn best_path(&self) -> Option<&Path> {
        self.result.best_path()
    }
    pub fn give_best_path_to(&self, agent: &mut Agent) {
        agent.apply_best_path(&self.result);
    }
}

/// The walled demo level: a [Pathfinder] starting at the agent and a coin to collect.
#[derive(Clone, Debug)]
pub struct DemoScene {
    pub pathfinder: Pathfinder,
    pub agent: Agent,
    pub coin: Point,
}

impl DemoScene {
    pub fn new() -> DemoScene {
        let field = ObstacleField::with_obstacles(
            DEMO_WIDTH,
            DEMO_HEIGHT,
            [
                Rect::new(100.0, 400.0, 350.0, 5.0),
                Rect::new(250.0, 275.0, 300.0, 5.0),
                Rect::new(200.0, 50.0, 5.0, 100.0),
                Rect::new(450.0, 100.0, 5.0, 100.0),
                Rect::new(350.0, 50.0, 5.0, 75.0),
            ],
        );
        let planner = Planner::default();
        let agent = Agent::new(Point::new(450.0, 450.0), planner.config().speed);
        info!("Demo scene with {} walls", field.obstacles().len());
        DemoScene {
            pathfinder: Pathfinder::new(field, planner, agent.position),
            agent,
            coin: Point::new(300.0, 50.0),
        }
    }

    /// Moves the coin, plans towards it and hands the best path to the agent.
    pub fn relocate_coin<R: Rng + ?Sized>(&mut self, coin: Point, rng: &mut R) -> Result<()> {
        self.coin = coin;
        self.pathfinder.set_end(coin);
        let planned = self.pathfinder.find_path(rng).map(|_| ());
        self.pathfinder.give_best_path_to(&mut self.agent);
        planned
    }

    /// Moves the agent; the next plan starts from here.
    pub fn relocate_agent(&mut self, position: Point) {
        self.agent.relocate(position);
        self.pathfinder.set_start(position);
    }
}

impl Default for DemoScene {
    fn default() -> Self {
        DemoScene::new()
    }
}
