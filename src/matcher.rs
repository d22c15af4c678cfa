use crate::{
    error::RecognizerError, geometry, normalizer::Normalizer, point::Point,
    prototype::PrototypeSet, stroke::Stroke, NUM_LABELS,
};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Outcome of a classification
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    /// Label of the closest prototype
    pub label: usize,
    /// Summed point distance to that prototype; lower is closer
    pub score: f64,
}

/// Main function of the elastic matcher.
/// Normalizes the candidate stroke in place (unless it already is) and compares it against every prototype.
/// Returns the label with the lowest score; on ties the lowest label wins.
pub fn classify(
    candidate: &mut Stroke,
    prototypes: &PrototypeSet,
    normalizer: &Normalizer,
) -> Result<Match, RecognizerError> {
    if candidate.is_empty() {
        return Err(RecognizerError::EmptyStroke);
    }
    normalizer.prepare(candidate)?;
    best_match(candidate.points(), prototypes)
}

/// Picks the prototype closest to an already normalized stroke.
/// The set must hold one prototype per label, each as long as the stroke.
pub fn best_match(points: &[Point], prototypes: &PrototypeSet) -> Result<Match, RecognizerError> {
    if prototypes.len() != NUM_LABELS {
        return Err(RecognizerError::InvalidPrototypeSet(format!(
            "expected {NUM_LABELS} prototypes, got {}",
            prototypes.len()
        )));
    }
    let mut best: Option<Match> = None;
    for (label, template) in prototypes.iter().enumerate() {
        if template.len() != points.len() {
            return Err(RecognizerError::InvalidPrototypeSet(format!(
                "prototype {label} has {} points, stroke has {}",
                template.len(),
                points.len()
            )));
        }
        let score = score(points, template.points())?;
        trace!(label, score, "prototype scored");
        if best.map_or(true, |b| score < b.score) {
            best = Some(Match { label, score });
        }
    }
    let best = best.ok_or_else(|| {
        RecognizerError::InvalidPrototypeSet("prototype set is empty".into())
    })?;
    debug!(label = best.label, score = best.score, "stroke classified");
    Ok(best)
}

/// Sum of the distances between points at matching indexes of two equally long strokes
pub fn score(points1: &[Point], points2: &[Point]) -> Result<f64, RecognizerError> {
    if points1.len() != points2.len() {
        return Err(RecognizerError::LengthMismatch {
            left: points1.len(),
            right: points2.len(),
        });
    }
    Ok(points1
        .iter()
        .zip(points2)
        .map(|(a, b)| geometry::euclidean_distance(a, b))
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElasticParameters;

    fn line(n: usize, dy: i32) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as i32, dy)).collect()
    }

    fn params(n: usize) -> ElasticParameters {
        ElasticParameters { stroke_capacity: n, ..Default::default() }
    }

    /// Prototype `label` is a horizontal line at height `label * 10`
    fn stacked_lines(n: usize) -> PrototypeSet {
        let strokes = (0..NUM_LABELS)
            .map(|label| Stroke::from_points(line(n, label as i32 * 10), n).unwrap())
            .collect();
        PrototypeSet::new(strokes, &params(n)).unwrap()
    }

    #[test]
    fn score_sums_pointwise_distances() {
        let a = vec![Point::new(0, 0), Point::new(0, 0)];
        let b = vec![Point::new(3, 4), Point::new(0, 2)];
        assert_eq!(score(&a, &b).unwrap(), 7.0);
        assert_eq!(score(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn score_is_symmetric() {
        let a = vec![Point::new(1, 8), Point::new(-4, 2), Point::new(9, 9)];
        let b = vec![Point::new(0, 0), Point::new(6, 3), Point::new(2, 11)];
        assert_eq!(score(&a, &b).unwrap(), score(&b, &a).unwrap());
    }

    #[test]
    fn score_rejects_length_mismatch() {
        let a = line(3, 0);
        let b = line(4, 0);
        assert_eq!(
            score(&a, &b),
            Err(RecognizerError::LengthMismatch { left: 3, right: 4 })
        );
    }

    #[test]
    fn best_match_picks_lowest_score() {
        let prototypes = stacked_lines(8);
        let m = best_match(&line(8, 31), &prototypes).unwrap();
        assert_eq!(m.label, 3);
        assert_eq!(m.score, 8.0);
    }

    #[test]
    fn best_match_ties_go_to_lowest_label() {
        let prototypes = stacked_lines(8);
        // equally far from the lines at 20 and 30
        let m = best_match(&line(8, 25), &prototypes).unwrap();
        assert_eq!(m.label, 2);
    }

    #[test]
    fn classify_normalizes_then_matches() {
        let n = 8;
        let normalizer = Normalizer::new(params(n)).unwrap();
        let mut strokes: Vec<Stroke> = (0..NUM_LABELS)
            .map(|_| Stroke::from_points(vec![Point::new(0, 250); n], n).unwrap())
            .collect();
        strokes[6] = Stroke::from_points(
            (0..n).map(|i| Point::new(0, (i * 250 / (n - 1)) as i32)).collect(),
            n,
        )
        .unwrap();
        let prototypes = PrototypeSet::new(strokes, &params(n)).unwrap();

        let mut candidate = Stroke::from_points(vec![Point::new(40, 10), Point::new(40, 60)], n).unwrap();
        let m = classify(&mut candidate, &prototypes, &normalizer).unwrap();
        assert_eq!(m.label, 6);
        assert!(candidate.is_normalized());
        assert_eq!(candidate.len(), n);
    }

    #[test]
    fn best_match_rejects_missing_labels() {
        let three: Vec<Stroke> = stacked_lines(8).iter().take(3).cloned().collect();
        let prototypes = PrototypeSet::unchecked(three);
        assert!(matches!(
            best_match(&line(8, 0), &prototypes),
            Err(RecognizerError::InvalidPrototypeSet(_))
        ));
    }

    #[test]
    fn classify_rejects_short_prototypes() {
        let n = 8;
        let normalizer = Normalizer::new(params(n)).unwrap();
        let mut strokes: Vec<Stroke> = stacked_lines(n).iter().cloned().collect();
        strokes[9] = Stroke::from_points(line(5, 90), n).unwrap();
        let prototypes = PrototypeSet::unchecked(strokes);

        let mut candidate = Stroke::from_points(vec![Point::new(0, 0), Point::new(7, 0)], n).unwrap();
        assert!(matches!(
            classify(&mut candidate, &prototypes, &normalizer),
            Err(RecognizerError::InvalidPrototypeSet(_))
        ));
    }

    #[test]
    fn classify_empty_stroke_fails() {
        let prototypes = stacked_lines(8);
        let normalizer = Normalizer::new(params(8)).unwrap();
        let mut candidate = Stroke::with_capacity(8);
        assert_eq!(
            classify(&mut candidate, &prototypes, &normalizer),
            Err(RecognizerError::EmptyStroke)
        );
    }
}
