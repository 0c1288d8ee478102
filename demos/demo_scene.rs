use heading_pathfinding::{DemoScene, Point};
use std::time::{Duration, Instant};

/// Replays a series of coin relocations on the walled demo level, printing the status line
/// after every plan.
fn main() {
    let mut scene = DemoScene::new();
    println!("{}", scene.pathfinder.last_result());
    let coins = [
        Point::new(300.0, 50.0),
        Point::new(600.0, 550.0),
        Point::new(50.0, 300.0),
    ];
    let mut total_time = Duration::ZERO;
    let mut rng = rand::thread_rng();
    for coin in coins {
        let before = Instant::now();
        match scene.relocate_coin(coin, &mut rng) {
            Ok(()) => println!("Coin at {}: {}", coin, scene.pathfinder.last_result()),
            Err(err) => println!("Coin at {}: {}", coin, err),
        }
        total_time += before.elapsed();
        if let Some(path) = scene.agent.best_path() {
            if let Some(last) = path.last() {
                scene.relocate_agent(*last);
            }
        }
    }
    println!("\tTotal planning time: {:.2?}", total_time);
}
