//! Elastic matching recognizer for single handwritten strokes.
//!
//! A user stroke is translated to the origin, scaled to fit the canvas and
//! densified to a fixed number of points. It is then compared index by index
//! against one prototype stroke per digit; the digit with the lowest summed
//! point distance wins.

pub mod error;
pub mod geometry;
pub mod matcher;
pub mod normalizer;
pub mod point;
pub mod prototype;
pub mod recognizer;
pub mod stroke;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

pub use error::{IngestionError, RecognizerError};
pub use matcher::Match;
pub use point::Point;
pub use prototype::PrototypeSet;
pub use recognizer::Recognizer;
pub use stroke::Stroke;

/// Number of points in every normalized stroke and every prototype
pub const STROKE_CAPACITY: usize = 150;
/// Number of prototype strokes in the base set (digits 0 through 9)
pub const NUM_LABELS: usize = 10;
/// Length of the longer axis of a stroke after scaling
pub const CANVAS_TARGET: f64 = 250.0;

/// Tunables shared by the normalizer, the matcher and the prototype set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElasticParameters {
    /// Maximum number of captured points, and exact number after densification
    pub stroke_capacity: usize,
    /// Target extent of the longer axis after scaling
    pub canvas_target: f64,
}

impl Default for ElasticParameters {
    fn default() -> Self {
        ElasticParameters {
            stroke_capacity: STROKE_CAPACITY,
            canvas_target: CANVAS_TARGET,
        }
    }
}

impl ElasticParameters {
    /// Rejects parameters the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), RecognizerError> {
        if self.stroke_capacity < 2 {
            return Err(RecognizerError::InvalidParameters(format!(
                "stroke capacity must be at least 2, got {}",
                self.stroke_capacity
            )));
        }
        if !self.canvas_target.is_finite() || self.canvas_target <= 0.0 {
            return Err(RecognizerError::InvalidParameters(format!(
                "canvas target must be a positive finite number, got {}",
                self.canvas_target
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_the_reference_values() {
        let params = ElasticParameters::default();
        assert_eq!(params.stroke_capacity, 150);
        assert_eq!(params.canvas_target, 250.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_tiny_capacity_and_bad_canvas() {
        let tiny = ElasticParameters { stroke_capacity: 1, ..Default::default() };
        assert!(matches!(tiny.validate(), Err(RecognizerError::InvalidParameters(_))));

        let flat = ElasticParameters { canvas_target: 0.0, ..Default::default() };
        assert!(matches!(flat.validate(), Err(RecognizerError::InvalidParameters(_))));

        let nan = ElasticParameters { canvas_target: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
    }
}
