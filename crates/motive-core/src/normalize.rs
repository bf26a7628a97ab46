//! Score selection and percentage normalization for hosted classifiers.

use crate::model::{LabelScore, Motive, MotiveScores};

/// Score of the highest-confidence label, or 0.0 when nothing was returned.
pub fn top_score(records: &[LabelScore]) -> f64 {
    records
        .iter()
        .map(|r| r.score)
        .filter(|s| !s.is_nan())
        .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))
        .unwrap_or(0.0)
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rescale raw probabilities so the three motives sum to 100.
///
/// Each raw score is first taken as a percentage, then divided by the total.
/// A zero total yields all zeros. Terms are rounded independently, so the
/// visible sum may drift from 100 by a few hundredths.
pub fn normalize(raw: MotiveScores) -> MotiveScores {
    let scaled = MotiveScores::from_fn(|m| raw.get(m) * 100.0);
    let total = scaled.total();

    if total > 0.0 {
        MotiveScores::from_fn(|m| round2(scaled.get(m) / total * 100.0))
    } else {
        MotiveScores::default()
    }
}

/// Pick the top label per motive and normalize the result.
pub fn normalize_labels(
    achievement: &[LabelScore],
    affiliation: &[LabelScore],
    power: &[LabelScore],
) -> MotiveScores {
    normalize(MotiveScores::from_fn(|m| match m {
        Motive::Achievement => top_score(achievement),
        Motive::Affiliation => top_score(affiliation),
        Motive::Power => top_score(power),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    fn scores(achievement: f64, affiliation: f64, power: f64) -> MotiveScores {
        MotiveScores {
            achievement,
            affiliation,
            power,
        }
    }

    #[test]
    fn test_top_score_picks_highest_confidence() {
        let records = vec![label("low", 0.12), label("high", 0.81), label("mid", 0.07)];
        assert_eq!(top_score(&records), 0.81);
    }

    #[test]
    fn test_top_score_empty() {
        assert_eq!(top_score(&[]), 0.0);
    }

    #[test]
    fn test_normalize_sums_to_hundred() {
        let cases = [
            scores(0.9, 0.6, 0.3),
            scores(0.333, 0.333, 0.334),
            scores(0.01, 0.99, 0.5),
            scores(1.0, 0.0, 0.0),
            scores(0.71, 0.13, 0.97),
        ];
        for raw in cases {
            let out = normalize(raw);
            assert!(
                (out.total() - 100.0).abs() <= 0.02,
                "{:?} summed to {}",
                out,
                out.total()
            );
        }
    }

    #[test]
    fn test_normalize_sums_to_hundred_across_grid() {
        let grid = [
            0.0, 1e-9, 1e-6, 0.0001, 0.001, 0.005, 0.01, 0.05, 0.1, 0.123, 0.2, 0.25, 0.333,
            0.5, 0.6667, 0.75, 0.9, 0.999, 1.0,
        ];
        for &a in &grid {
            for &b in &grid {
                for &c in &grid {
                    let out = normalize(scores(a, b, c));
                    if a + b + c == 0.0 {
                        assert_eq!(out, scores(0.0, 0.0, 0.0));
                        continue;
                    }
                    assert!(
                        (out.total() - 100.0).abs() <= 0.02,
                        "({}, {}, {}) -> {:?} summed to {}",
                        a,
                        b,
                        c,
                        out,
                        out.total()
                    );
                    for motive in Motive::ALL {
                        let v = out.get(motive);
                        assert!((0.0..=100.0).contains(&v), "{} out of range: {}", motive, v);
                    }
                }
            }
        }
    }

    #[test]
    fn test_normalize_all_zero() {
        assert_eq!(normalize(scores(0.0, 0.0, 0.0)), scores(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_rounds_to_two_decimals() {
        let out = normalize(scores(1.0, 1.0, 1.0));
        assert_eq!(out, scores(33.33, 33.33, 33.33));
    }

    #[test]
    fn test_normalize_keeps_proportions() {
        let out = normalize(scores(0.5, 0.25, 0.25));
        assert_eq!(out, scores(50.0, 25.0, 25.0));
    }

    #[test]
    fn test_normalize_labels_uses_top_label() {
        let out = normalize_labels(
            &[label("yes", 0.6), label("no", 0.4)],
            &[label("yes", 0.2), label("no", 0.2)],
            &[label("yes", 0.2)],
        );
        assert_eq!(out, scores(60.0, 20.0, 20.0));
    }
}
