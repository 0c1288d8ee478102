use heading_pathfinding::{ObstacleField, Planner, PlannerConfig, PlanningError, Point, Rect};

// The end lies deep inside a large block, so no waypoint ever scores 0.96. The step ceiling
// turns what would be an endless search into an error.
fn main() -> Result<(), PlanningError> {
    let field = ObstacleField::with_obstacles(700.0, 600.0, [Rect::new(100.0, 100.0, 500.0, 400.0)]);
    let planner = Planner::new(PlannerConfig::default().with_max_steps(200))?;
    let start = Point::new(20.0, 20.0);
    let end = Point::new(350.0, 300.0);
    match planner.plan(&field, start, end, &mut rand::thread_rng()) {
        Ok(result) => println!("{}", result),
        Err(err) => println!("Planning failed: {}", err),
    }
    Ok(())
}
