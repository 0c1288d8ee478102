use crate::geometry::{Point, Rect};
use core::fmt;
use log::trace;

/// Cell size used by the [fmt::Display] rendering of an [ObstacleField].
const DISPLAY_CELL: f64 = 25.0;

/// Outcome of moving along a heading with [ObstacleField::move_along].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Move {
    pub point: Point,
    pub collided: bool,
}

/// [ObstacleField] holds the bounding plane and the rectangles that block movement in it. The
/// plane diagonal is computed once on construction and normalizes every heading score.
/// Obstacles are not mutated while planning, so a field can be shared by all attempts.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    width: f64,
    height: f64,
    diagonal: f64,
    obstacles: Vec<Rect>,
}

impl ObstacleField {
    pub fn new(width: f64, height: f64) -> ObstacleField {
        ObstacleField {
            width,
            height,
            diagonal: width.hypot(height),
            obstacles: Vec::new(),
        }
    }
    pub fn with_obstacles<I>(width: f64, height: f64, obstacles: I) -> ObstacleField
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut field = ObstacleField::new(width, height);
        field.obstacles.extend(obstacles);
        field
    }
    pub fn add_obstacle(&mut self, rect: Rect) {
        self.obstacles.push(rect);
    }
    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn height(&self) -> f64 {
        self.height
    }
    /// Length of the plane diagonal, the normalization constant of [heading_score](Self::heading_score).
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }
    /// Checks whether the point lies inside any obstacle.
    pub fn collides(&self, p: &Point) -> bool {
        self.obstacles.iter().any(|rect| rect.contains(p))
    }

    /// Advances `start` by `speed` unit sub-steps along `angle`, checking for obstacles after
    /// every sub-step. The move is all-or-nothing: on a collision the start point is returned
    /// unchanged and the partial progress is dropped.
    pub fn move_along(&self, start: Point, angle: f64, speed: u32) -> Move {
        let mut current = start;
        for sub_step in 0..speed {
            current = current.unit_step(angle);
            if self.collides(&current) {
                trace!("Heading {:.3} from {} collides at sub-step {}", angle, start, sub_step);
                return Move {
                    point: start,
                    collided: true,
                };
            }
        }
        Move {
            point: current,
            collided: false,
        }
    }

    /// Scores a move by its proximity to `end`: 0 if it collided, otherwise
    /// `1 - distance / diagonal`, clamped to [0, 1] for points beyond the plane.
    pub fn heading_score(&self, mv: &Move, end: &Point) -> f64 {
        if mv.collided {
            0.0
        } else {
            (1.0 - mv.point.distance(end) / self.diagonal).clamp(0.0, 1.0)
        }
    }

    /// Renders the plane as text with one character per `cell` units: `#` for cells whose
    /// center is blocked, `.` for free cells and `o` for cells containing a waypoint.
    pub fn render_with_path(&self, cell: f64, waypoints: &[Point]) -> String {
        let columns = (self.width / cell).ceil().max(0.0) as usize;
        let rows = (self.height / cell).ceil().max(0.0) as usize;
        let mut out = String::with_capacity((columns + 1) * rows);
        for row in 0..rows {
            let y0 = row as f64 * cell;
            for column in 0..columns {
                let x0 = column as f64 * cell;
                let area = Rect::new(x0, y0, cell, cell);
                if waypoints.iter().any(|w| area.contains(w)) {
                    out.push('o');
                } else if self.collides(&area.center()) {
                    out.push('#');
                } else {
                    out.push('.');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ObstacleField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Plane {}x{} with {} obstacles:",
            self.width,
            self.height,
            self.obstacles.len()
        )?;
        write!(f, "{}", self.render_with_path(DISPLAY_CELL, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn wall_field() -> ObstacleField {
        // A vertical wall at x in [10, 15) spanning the whole height
        //  ______
        // |S  # |
        // |   # |
        //  ______
        ObstacleField::with_obstacles(40.0, 20.0, [Rect::new(10.0, 0.0, 5.0, 20.0)])
    }

    #[test]
    fn diagonal_is_computed_from_bounds() {
        let field = ObstacleField::new(700.0, 600.0);
        assert!((field.diagonal() - (700.0f64 * 700.0 + 600.0 * 600.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn free_move_covers_speed_units() {
        let field = ObstacleField::new(100.0, 100.0);
        let mv = field.move_along(Point::new(10.0, 10.0), 0.0, 15);
        assert!(!mv.collided);
        assert!((mv.point.x - 25.0).abs() < 1e-9);
        assert!((mv.point.y - 10.0).abs() < 1e-9);
    }

    /// A move that would end behind the wall collides and keeps the start point.
    #[test]
    fn collision_discards_partial_progress() {
        let field = wall_field();
        let start = Point::new(5.0, 5.0);
        let mv = field.move_along(start, 0.0, 15);
        assert!(mv.collided);
        assert_eq!(mv.point, start);
        assert_eq!(field.heading_score(&mv, &Point::new(30.0, 5.0)), 0.0);
    }

    /// Moving away from the wall never reports a collision.
    #[test]
    fn no_collision_away_from_obstacle() {
        let field = wall_field();
        let start = Point::new(9.0, 5.0);
        for angle in [FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            assert!(!field.move_along(start, angle, 4).collided);
        }
    }

    #[test]
    fn zero_speed_never_moves() {
        let field = wall_field();
        let start = Point::new(9.5, 5.0);
        let mv = field.move_along(start, 0.0, 0);
        assert_eq!(mv, Move { point: start, collided: false });
    }

    #[test]
    fn score_increases_towards_end() {
        let field = ObstacleField::new(700.0, 600.0);
        let end = Point::new(100.0, 0.0);
        let near = field.heading_score(&field.move_along(Point::new(50.0, 0.0), 0.0, 10), &end);
        let far = field.heading_score(&field.move_along(Point::new(50.0, 0.0), PI, 10), &end);
        assert!(near > far);
        assert!((0.0..=1.0).contains(&near));
        assert!((0.0..=1.0).contains(&far));
    }

    #[test]
    fn render_marks_obstacles_and_waypoints() {
        let field = wall_field();
        let text = field.render_with_path(5.0, &[Point::new(1.0, 1.0)]);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "o.#.....");
        assert_eq!(rows[3], "..#.....");
    }
}
