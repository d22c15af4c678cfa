use crate::{
    error::RecognizerError, geometry, point::Point, stroke::Stroke, ElasticParameters,
};
use tracing::{debug, trace, warn};

/// Brings a user stroke into the same frame as the prototypes.
/// Strokes are translated to the origin, scaled uniformly so the longer axis spans the canvas,
/// and densified to exactly `stroke_capacity` points.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    params: ElasticParameters,
}

impl Normalizer {
    pub fn new(params: ElasticParameters) -> Result<Self, RecognizerError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &ElasticParameters {
        &self.params
    }

    /// Runs translate, scale and densify on the stroke in place.
    /// A stroke that was already prepared is left as is.
    pub fn prepare(&self, stroke: &mut Stroke) -> Result<(), RecognizerError> {
        if stroke.is_empty() {
            return Err(RecognizerError::EmptyStroke);
        }
        if stroke.is_normalized() {
            return Ok(());
        }
        if stroke.capacity() != self.params.stroke_capacity {
            return Err(RecognizerError::InvalidParameters(format!(
                "stroke holds up to {} points but the normalizer targets {}",
                stroke.capacity(),
                self.params.stroke_capacity
            )));
        }

        let raw_len = stroke.len();
        let mut points = Self::translate(stroke.points())?;
        if points.len() >= 2 {
            points = Self::scale(&points, self.params.canvas_target);
        }
        points = Self::densify(&points, self.params.stroke_capacity);
        debug!(raw_len, len = points.len(), "stroke normalized");

        stroke.replace_points(points);
        stroke.mark_normalized();
        Ok(())
    }

    /// Slides the points as far to the upper left as possible so that min(x) and min(y) are 0.
    /// Fails if the stroke is wider or taller than `i32::MAX`.
    pub fn translate(points: &[Point]) -> Result<Vec<Point>, RecognizerError> {
        let Some(min_x) = points.iter().map(|p| p.x).min() else {
            return Ok(Vec::new());
        };
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let (dx, dy) = (-i64::from(min_x), -i64::from(min_y));
        points
            .iter()
            .map(|p| {
                p.checked_translated(dx, dy)
                    .ok_or(RecognizerError::CoordinateOverflow {
                        x: i64::from(p.x) + dx,
                        y: i64::from(p.y) + dy,
                    })
            })
            .collect()
    }

    /// Stretches the points so the longer axis spans `canvas_target`, keeping the aspect ratio.
    /// Expects translated input; if every point sits at the origin the points are returned unchanged.
    pub fn scale(points: &[Point], canvas_target: f64) -> Vec<Point> {
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
        let max = max_x.max(max_y);
        if max <= 0 {
            warn!(len = points.len(), "degenerate stroke, all points coincide; scale skipped");
            return points.to_vec();
        }

        let scale_factor = canvas_target / f64::from(max);
        points
            .iter()
            .map(|p| {
                Point::new(
                    (f64::from(p.x) * scale_factor).round() as i32,
                    (f64::from(p.y) * scale_factor).round() as i32,
                )
            })
            .collect()
    }

    /// Inserts midpoints into the widest gaps until there are exactly `n` points.
    /// A single point is repeated, since there is no gap to split.
    pub fn densify(points: &[Point], n: usize) -> Vec<Point> {
        let mut new_points = Vec::with_capacity(n.max(points.len()));
        new_points.extend_from_slice(points);

        if new_points.len() == 1 {
            warn!(target_len = n, "single point stroke, padding with copies");
            new_points.resize(n, points[0]);
            return new_points;
        }

        while new_points.len() >= 2 && new_points.len() < n {
            Self::insert_one_point(&mut new_points);
        }
        new_points
    }

    /// Inserts the midpoint of the two consecutive points that are farthest apart.
    /// On ties the first pair wins. Requires at least two points.
    fn insert_one_point(points: &mut Vec<Point>) {
        let mut max_position = 0;
        let mut max_distance = geometry::sqr_euclidean_distance(&points[0], &points[1]);
        for (i, pair) in points.windows(2).enumerate().skip(1) {
            let distance = geometry::sqr_euclidean_distance(&pair[0], &pair[1]);
            if distance > max_distance {
                max_distance = distance;
                max_position = i;
            }
        }

        let mid = geometry::midpoint(&points[max_position], &points[max_position + 1]);
        trace!(at = max_position + 1, x = mid.x, y = mid.y, "inserting midpoint");
        points.insert(max_position + 1, mid);
    }
}
