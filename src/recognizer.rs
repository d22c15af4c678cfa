use std::sync::Arc;

use crate::{
    error::RecognizerError,
    matcher::{self, Match},
    normalizer::Normalizer,
    point::Point,
    prototype::PrototypeSet,
    stroke::Stroke,
    ElasticParameters, NUM_LABELS,
};
use tracing::debug;

/// A classification session: one user stroke, captured point by point, matched against a
/// shared prototype set.
///
/// Sessions never mutate the prototypes, so any number of them can run in parallel
/// over the same `Arc<PrototypeSet>`.
#[derive(Debug, Clone)]
pub struct Recognizer {
    prototypes: Arc<PrototypeSet>,
    normalizer: Normalizer,
    user_stroke: Stroke,
}

impl Recognizer {
    /// Creates a session with the reference parameters
    pub fn new(prototypes: Arc<PrototypeSet>) -> Result<Self, RecognizerError> {
        Self::with_parameters(prototypes, ElasticParameters::default())
    }

    pub fn with_parameters(
        prototypes: Arc<PrototypeSet>,
        params: ElasticParameters,
    ) -> Result<Self, RecognizerError> {
        let normalizer = Normalizer::new(params)?;
        if prototypes.len() != NUM_LABELS {
            return Err(RecognizerError::InvalidPrototypeSet(format!(
                "expected {NUM_LABELS} prototypes, got {}",
                prototypes.len()
            )));
        }
        for (label, template) in prototypes.iter().enumerate() {
            if template.len() != params.stroke_capacity {
                return Err(RecognizerError::InvalidPrototypeSet(format!(
                    "prototype {label} has {} points but strokes are normalized to {}",
                    template.len(),
                    params.stroke_capacity
                )));
            }
        }
        Ok(Self {
            prototypes,
            normalizer,
            user_stroke: Stroke::with_capacity(params.stroke_capacity),
        })
    }

    pub fn prototypes(&self) -> &Arc<PrototypeSet> {
        &self.prototypes
    }

    pub fn user_stroke(&self) -> &Stroke {
        &self.user_stroke
    }

    /// Starts a new gesture; following points are captured from index 0
    pub fn reset_user_stroke(&mut self) {
        self.user_stroke.reset();
    }

    /// Captures a point. Once the stroke is full further points are rejected with
    /// `CapacityExceeded` and the stroke is unchanged.
    pub fn add_user_point(&mut self, point: Point) -> Result<(), RecognizerError> {
        self.user_stroke.append(point)
    }

    pub fn num_user_points(&self) -> usize {
        self.user_stroke.len()
    }

    pub fn user_point(&self, index: usize) -> Result<Point, RecognizerError> {
        self.user_stroke.point_at(index)
    }

    /// Slides the user stroke to the origin.
    ///
    /// This and the other single passes clear the stroke's normalized flag, so a later
    /// `find_match` or `compute_score` runs the full pipeline again.
    pub fn translate(&mut self) -> Result<(), RecognizerError> {
        let points = Normalizer::translate(self.user_stroke.points())?;
        self.user_stroke.replace_points(points);
        Ok(())
    }

    /// Scales the user stroke to the canvas. Strokes with fewer than two points are left alone.
    pub fn scale(&mut self) {
        if self.user_stroke.len() < 2 {
            return;
        }
        let canvas_target = self.normalizer.parameters().canvas_target;
        let points = Normalizer::scale(self.user_stroke.points(), canvas_target);
        self.user_stroke.replace_points(points);
    }

    /// Densifies the user stroke to full capacity
    pub fn normalize_num_points(&mut self) -> Result<(), RecognizerError> {
        if self.user_stroke.is_empty() {
            return Err(RecognizerError::EmptyStroke);
        }
        let points = Normalizer::densify(self.user_stroke.points(), self.user_stroke.capacity());
        self.user_stroke.replace_points(points);
        Ok(())
    }

    /// Score of the normalized user stroke against the prototype for `label`
    pub fn compute_score(&mut self, label: usize) -> Result<f64, RecognizerError> {
        let template = self.prototypes.get(label)?;
        self.normalizer.prepare(&mut self.user_stroke)?;
        matcher::score(self.user_stroke.points(), template.points())
    }

    /// Normalizes the user stroke and returns the closest prototype
    pub fn find_match(&mut self) -> Result<Match, RecognizerError> {
        let found = matcher::classify(&mut self.user_stroke, &self.prototypes, &self.normalizer)?;
        debug!(label = found.label, score = found.score, "match found");
        Ok(found)
    }
}
