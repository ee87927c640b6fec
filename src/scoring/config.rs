use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::coder::PolarAxis;
use super::normalize::RangePolicy;
use crate::model::AggregateMode;

/// Scoring profile: the dimensions a panel collects and how to read them.
///
/// Example YAML:
/// ```yaml
/// name: holland
/// title: Holland RIASEC
/// code_length: 3
/// rules:
///   level:
///     - { range: "<=40", label: "Low" }
///     - { range: "41-59", label: "Mid" }
///     - { range: ">=60", label: "High" }
/// dimensions:
///   - { id: R, label: Realistic, min: 0, max: 100, rule: level }
///   - { id: I, label: Investigative, min: 0, max: 100, rule: level }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub name: String,

    /// Human readable title used in reports (defaults to `name`)
    #[serde(default)]
    pub title: Option<String>,

    /// Out-of-range input handling (default: reject)
    #[serde(default)]
    pub range_policy: RangePolicy,

    /// Number of top-ranked dimension ids joined into a type code
    /// Example: 3 turns a RIASEC ranking into "ISE"
    #[serde(default)]
    pub code_length: Option<usize>,

    /// Named band tables referenced by dimensions and groups
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<BandConfig>>,

    pub dimensions: Vec<DimensionConfig>,

    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl ProfileConfig {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Band table row.
/// Range format: "<N", "<=N", ">N", ">=N", "N", "N..M" or "N-M" (inclusive)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    pub range: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DimensionConfig {
    pub id: String,

    /// Display label (defaults to `id`)
    #[serde(default)]
    pub label: Option<String>,

    pub min: f64,
    pub max: f64,

    /// Initial value when the sheet does not set one
    /// (defaults to the midpoint of the range, rounded down on whole-number scales)
    #[serde(default)]
    pub default: Option<f64>,

    /// Name of a band table in `rules`
    #[serde(default)]
    pub rule: Option<String>,

    /// Sign coder for symmetric axes
    #[serde(default)]
    pub axis: Option<PolarAxis>,
}

impl DimensionConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn default_value(&self) -> f64 {
        self.default.unwrap_or_else(|| {
            let mid = (self.min + self.max) / 2.0;
            // Whole-number scales only take whole values
            if self.min.fract() == 0.0 && self.max.fract() == 0.0 {
                mid.floor()
            } else {
                mid
            }
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub id: String,

    #[serde(default)]
    pub label: Option<String>,

    /// Member dimension ids
    pub members: Vec<String>,

    /// "sum" (default) or "mean"
    #[serde(default)]
    pub mode: AggregateMode,

    #[serde(default)]
    pub rule: Option<String>,
}

impl GroupConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}
