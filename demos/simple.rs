use heading_pathfinding::{ObstacleField, Planner, Point, Rect};

// In this example a path is found on a 200x100 plane with a single wall
//  ____________
// |     #      |
// | S   #    E |
// |     #      |
// |            |
//  ____________
// S marks the start
// E marks the end
fn main() {
    let field = ObstacleField::with_obstacles(200.0, 100.0, [Rect::new(95.0, 0.0, 10.0, 60.0)]);
    println!("{}", field);
    let start = Point::new(20.0, 30.0);
    let end = Point::new(180.0, 30.0);
    match Planner::default().plan(&field, start, end, &mut rand::thread_rng()) {
        Ok(result) => {
            println!("{}", result);
            if let Some(path) = result.best_path() {
                println!("A path has been found:");
                for p in path.waypoints() {
                    println!("{}", p);
                }
                print!("{}", field.render_with_path(10.0, path.waypoints()));
            }
        }
        Err(err) => println!("No path: {}", err),
    }
}
