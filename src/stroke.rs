use crate::{error::RecognizerError, point::Point};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::warn;

/// An ordered sequence of points with a fixed maximum length.
/// User strokes grow point by point while drawing; prototype strokes are built full.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StrokeData"))]
pub struct Stroke {
    points: Vec<Point>,
    capacity: usize,
    /// Set once the normalizer has run; cleared by any append or reset
    #[cfg_attr(feature = "serde", serde(skip))]
    normalized: bool,
}

/// Deserialized form of a stroke; rejected if it holds more points than its capacity
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StrokeData {
    points: Vec<Point>,
    capacity: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<StrokeData> for Stroke {
    type Error = RecognizerError;

    fn try_from(data: StrokeData) -> Result<Self, Self::Error> {
        Stroke::from_points(data.points, data.capacity)
    }
}

impl Stroke {
    /// Creates an empty stroke that holds at most `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            normalized: false,
        }
    }

    /// Builds a stroke from already captured points
    pub fn from_points(points: Vec<Point>, capacity: usize) -> Result<Self, RecognizerError> {
        if points.len() > capacity {
            return Err(RecognizerError::CapacityExceeded { capacity });
        }
        Ok(Self {
            points,
            capacity,
            normalized: false,
        })
    }

    /// Empties the stroke and forgets any normalization
    pub fn reset(&mut self) {
        self.points.clear();
        self.normalized = false;
    }

    /// Adds a point at the end; a full stroke is left untouched.
    pub fn append(&mut self, point: Point) -> Result<(), RecognizerError> {
        if self.points.len() >= self.capacity {
            warn!(capacity = self.capacity, "stroke full, point dropped");
            return Err(RecognizerError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.points.push(point);
        self.normalized = false;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    pub fn point_at(&self, index: usize) -> Result<Point, RecognizerError> {
        self.points
            .get(index)
            .copied()
            .ok_or(RecognizerError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Swaps in the output of a normalization pass and clears the normalized flag.
    /// Only the normalizer writes through here, and never beyond capacity.
    pub(crate) fn replace_points(&mut self, points: Vec<Point>) {
        debug_assert!(points.len() <= self.capacity);
        self.points = points;
        self.normalized = false;
    }

    pub(crate) fn mark_normalized(&mut self) {
        self.normalized = true;
    }
}
