use crate::types::Point;

/// Bends the path from `last_point` to `current_point` into a right angle.
///
/// Used when no segment exists yet, so no geodesic direction can be derived. The corner keeps
/// one component of each point depending on the diagonal the cursor lies in:
///
/// | cursor vs last        | corner                |
/// |-----------------------|-----------------------|
/// | x greater, y smaller  | `(last.x, current.y)` |
/// | x greater, y greater  | `(current.x, last.y)` |
/// | x smaller, y greater  | `(last.x, current.y)` |
/// | x smaller, y smaller  | `(current.x, last.y)` |
///
/// So `(0, 0) -> (1, -1)` bends at `(0, -1)`. When the points share an x or y value no bend is
/// applied and the cursor is returned as-is.
pub fn estimate_fallback_path(last_point: Point, current_point: Point) -> [Point; 2] {
    let (last, current) = (last_point, current_point);

    let corner = if current.x > last.x && current.y < last.y {
        Point::new(last.x, current.y)
    } else if current.x > last.x && current.y > last.y {
        Point::new(current.x, last.y)
    } else if current.x < last.x && current.y > last.y {
        Point::new(last.x, current.y)
    } else if current.x < last.x && current.y < last.y {
        Point::new(current.x, last.y)
    } else {
        current
    };

    [last, corner]
}
