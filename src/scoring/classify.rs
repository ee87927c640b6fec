use super::bands::Band;
use crate::error::{EngineError, EngineResult};

/// Ordered band table. The first band containing the score wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRule {
    pub name: String,
    pub bands: Vec<Band>,
}

impl ClassificationRule {
    pub fn new(name: &str, bands: Vec<Band>) -> Self {
        Self {
            name: name.to_string(),
            bands,
        }
    }

    /// Build from `(range, label)` pairs.
    pub fn parse(name: &str, rows: &[(&str, &str)]) -> EngineResult<Self> {
        let bands = rows
            .iter()
            .map(|(range, label)| Band::parse(range, label))
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self::new(name, bands))
    }
}

/// Map a score to its band label.
///
/// `subject` names the dimension or group for the error message.
pub fn classify<'a>(
    subject: &str,
    score: f64,
    rule: &'a ClassificationRule,
) -> EngineResult<&'a str> {
    rule.bands
        .iter()
        .find(|band| band.range.matches(score))
        .map(|band| band.label.as_str())
        .ok_or_else(|| EngineError::UnclassifiedScore {
            subject: subject.to_string(),
            score,
        })
}

const MAX_COVERAGE_POINTS: f64 = 1_000_000.0;

/// 2^53: past this not every whole number is an exact f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Check that a rule covers every integer point of `[min, max]` exactly once.
///
/// Scales are integer-stepped (slider inputs), so gaps such as `<=40` /
/// `41-59` are only reported when an integer falls through.
pub fn check_coverage(rule: &ClassificationRule, min: f64, max: f64) -> Result<(), Vec<String>> {
    check_coverage_steps(rule, min, max, 1)
}

/// Like [`check_coverage`], on a grid of `steps` points per unit.
///
/// The mean of n whole numbers always lands on a multiple of 1/n.
pub fn check_coverage_steps(
    rule: &ClassificationRule,
    min: f64,
    max: f64,
    steps: u32,
) -> Result<(), Vec<String>> {
    let steps = f64::from(steps.max(1));
    let first = (min * steps).ceil();
    let last = (max * steps).floor();

    if !first.is_finite()
        || !last.is_finite()
        || first.abs() >= MAX_EXACT_INTEGER
        || last.abs() >= MAX_EXACT_INTEGER
    {
        return Err(vec![format!(
            "rule '{}': range [{}, {}] is too large to check",
            rule.name, min, max
        )]);
    }
    if last - first > MAX_COVERAGE_POINTS {
        return Err(vec![format!(
            "rule '{}': range [{}, {}] is too wide to check",
            rule.name, min, max
        )]);
    }
    if first > last {
        return Ok(());
    }

    let mut errors = Vec::new();

    for k in 0..=(last - first) as u64 {
        let point = (first + k as f64) / steps;
        let hits: Vec<&str> = rule
            .bands
            .iter()
            .filter(|band| band.range.matches(point))
            .map(|band| band.label.as_str())
            .collect();
        match hits.len() {
            0 => errors.push(format!("rule '{}': no band covers {}", rule.name, point)),
            1 => {}
            _ => errors.push(format!(
                "rule '{}': bands {} overlap at {}",
                rule.name,
                hits.iter()
                    .map(|l| format!("'{}'", l))
                    .collect::<Vec<_>>()
                    .join(", "),
                point
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
