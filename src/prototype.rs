//! The base set of prototype strokes, one per digit, and the reader for its text format.
//!
//! The text format holds one integer per line. Prototypes follow each other in label order;
//! within a prototype every point is written as its x line followed by its y line.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{IngestionError, RecognizerError},
    point::Point,
    stroke::Stroke,
    ElasticParameters, NUM_LABELS,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, info};

/// Immutable reference strokes indexed by label.
/// Every stroke has exactly `stroke_capacity` points so it can be compared index by index
/// against a normalized user stroke.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PrototypeSetData"))]
pub struct PrototypeSet {
    strokes: Vec<Stroke>,
}

/// Deserialized form of a prototype set, checked before it becomes a `PrototypeSet`
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PrototypeSetData {
    strokes: Vec<Stroke>,
}

#[cfg(feature = "serde")]
impl TryFrom<PrototypeSetData> for PrototypeSet {
    type Error = RecognizerError;

    fn try_from(data: PrototypeSetData) -> Result<Self, Self::Error> {
        let capacity = data.strokes.first().map_or(0, Stroke::capacity);
        let params = ElasticParameters {
            stroke_capacity: capacity,
            ..Default::default()
        };
        Self::new(data.strokes, &params)
    }
}

impl PrototypeSet {
    /// Validates and wraps one stroke per label, in label order
    pub fn new(strokes: Vec<Stroke>, params: &ElasticParameters) -> Result<Self, RecognizerError> {
        params.validate()?;
        if strokes.len() != NUM_LABELS {
            return Err(RecognizerError::InvalidPrototypeSet(format!(
                "expected {NUM_LABELS} prototypes, got {}",
                strokes.len()
            )));
        }
        for (label, stroke) in strokes.iter().enumerate() {
            if stroke.len() != params.stroke_capacity || stroke.capacity() != params.stroke_capacity {
                return Err(RecognizerError::InvalidPrototypeSet(format!(
                    "prototype {label} has {} of {} points, expected {}",
                    stroke.len(),
                    stroke.capacity(),
                    params.stroke_capacity
                )));
            }
        }
        Ok(Self { strokes })
    }

    /// Wraps strokes without any shape check, to exercise the checks downstream
    #[cfg(test)]
    pub(crate) fn unchecked(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// Builds the set from a flat x, y, x, y, ... sequence grouped by label.
    /// Values past the last expected coordinate are ignored.
    pub fn from_coordinates(coords: &[i32], params: &ElasticParameters) -> Result<Self, IngestionError> {
        params.validate()?;
        let per_stroke = params.stroke_capacity * 2;
        let expected = NUM_LABELS * per_stroke;
        if coords.len() < expected {
            return Err(IngestionError::ShortInput {
                expected,
                found: coords.len(),
            });
        }

        let strokes = coords[..expected]
            .chunks_exact(per_stroke)
            .map(|chunk| {
                let points = chunk
                    .chunks_exact(2)
                    .map(|xy| Point::new(xy[0], xy[1]))
                    .collect();
                Stroke::from_points(points, params.stroke_capacity)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(strokes, params)?)
    }

    /// Prototype for `label`
    pub fn get(&self, label: usize) -> Result<&Stroke, RecognizerError> {
        self.strokes
            .get(label)
            .ok_or(RecognizerError::UnknownLabel { label })
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Prototypes in ascending label order
    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter()
    }
}

/// Reads prototypes in the one-integer-per-line format.
/// Blank lines are skipped and reading stops once every coordinate has been read.
pub fn read_prototypes<R: BufRead>(
    reader: R,
    params: &ElasticParameters,
) -> Result<PrototypeSet, IngestionError> {
    params.validate()?;
    let expected = NUM_LABELS * params.stroke_capacity * 2;
    let mut coords = Vec::with_capacity(expected);

    for (i, line) in reader.lines().enumerate() {
        if coords.len() == expected {
            break;
        }
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let coord = value.parse::<i32>().map_err(|source| IngestionError::Parse {
            line: i + 1,
            value: value.to_string(),
            source,
        })?;
        coords.push(coord);
    }

    debug!(coordinates = coords.len(), "prototype data read");
    PrototypeSet::from_coordinates(&coords, params)
}

/// Opens `path` and reads the prototypes from it
pub fn load_prototypes<P: AsRef<Path>>(
    path: P,
    params: &ElasticParameters,
) -> Result<PrototypeSet, IngestionError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let prototypes = read_prototypes(BufReader::new(file), params)?;
    info!(path = %path.display(), labels = prototypes.len(), "prototypes loaded");
    Ok(prototypes)
}
