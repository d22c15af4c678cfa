use crate::point::Point;

/// Exact squared distance between two points; wide enough for any pair of `i32` points
pub fn sqr_euclidean_distance(a: &Point, b: &Point) -> i128 {
    let dx = i128::from(a.x) - i128::from(b.x);
    let dy = i128::from(a.y) - i128::from(b.y);
    dx * dx + dy * dy
}

/// Euclidean distance between two points
pub fn euclidean_distance(a: &Point, b: &Point) -> f64 {
    (sqr_euclidean_distance(a, b) as f64).sqrt()
}

/// Midpoint of the segment (a, b), each coordinate rounded half away from zero
pub fn midpoint(a: &Point, b: &Point) -> Point {
    let half = |u: i32, v: i32| ((f64::from(u) + f64::from(v)) / 2.0).round() as i32;
    Point::new(half(a.x, b.x), half(a.y, b.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(sqr_euclidean_distance(&a, &b), 25);
        assert_eq!(euclidean_distance(&a, &b), 5.0);
        assert_eq!(euclidean_distance(&b, &a), 5.0);
    }

    #[test]
    fn distances_across_the_full_coordinate_range() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        let span = i128::from(u32::MAX);
        assert_eq!(sqr_euclidean_distance(&a, &b), 2 * span * span);
        let d = euclidean_distance(&a, &b);
        assert!((d - (u32::MAX as f64) * 2f64.sqrt()).abs() < 1.0);
    }

    #[test]
    fn midpoint_rounds_half_away_from_zero() {
        assert_eq!(midpoint(&Point::new(0, 0), &Point::new(3, 1)), Point::new(2, 1));
        assert_eq!(midpoint(&Point::new(-3, 0), &Point::new(0, 0)), Point::new(-2, 0));
        assert_eq!(midpoint(&Point::new(5, 5), &Point::new(5, 5)), Point::new(5, 5));
    }
}
