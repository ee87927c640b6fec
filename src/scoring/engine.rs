use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregate::aggregate;
use super::bands::Band;
use super::classify::{classify, ClassificationRule};
use super::coder::{code, style_code, PolarAxis};
use super::config::ProfileConfig;
use super::normalize::{normalize, RangePolicy};
use super::rank::{rank, top_code, RankedEntry, Scored};
use super::validation::validate_profile;
use crate::error::{EngineError, EngineResult};
use crate::model::{Dimension, Group};

/// A validated profile with its band tables resolved.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub range_policy: RangePolicy,
    pub code_length: Option<usize>,
    pub dimensions: Vec<DimensionSpec>,
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone)]
pub struct DimensionSpec {
    pub template: Dimension, // value holds the default
    pub rule: Option<ClassificationRule>,
    pub axis: Option<PolarAxis>,
}

#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub group: Group,
    pub rule: Option<ClassificationRule>,
}

impl Profile {
    pub fn from_config(config: &ProfileConfig) -> EngineResult<Self> {
        validate_profile(config).map_err(EngineError::Profile)?;

        let resolve = |name: &Option<String>| -> EngineResult<Option<ClassificationRule>> {
            let Some(name) = name else { return Ok(None) };
            let rows = config
                .rules
                .get(name)
                .ok_or_else(|| EngineError::UnknownRule(name.clone()))?;
            let bands = rows
                .iter()
                .map(|row| Band::parse(&row.range, &row.label))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(Some(ClassificationRule::new(name, bands)))
        };

        let dimensions = config
            .dimensions
            .iter()
            .map(|d| {
                Ok(DimensionSpec {
                    template: Dimension::new(&d.id, d.label(), d.min, d.max, d.default_value()),
                    rule: resolve(&d.rule)?,
                    axis: d.axis.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let groups = config
            .groups
            .iter()
            .map(|g| {
                let members: Vec<&str> = g.members.iter().map(String::as_str).collect();
                Ok(GroupSpec {
                    group: Group::new(&g.id, g.label(), &members, g.mode),
                    rule: resolve(&g.rule)?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            name: config.name.clone(),
            title: config.title().to_string(),
            range_policy: config.range_policy,
            code_length: config.code_length,
            dimensions,
            groups,
        })
    }

    /// Dimensions at their default values
    pub fn default_dimensions(&self) -> Vec<Dimension> {
        self.dimensions.iter().map(|d| d.template.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionResult {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub class: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupResult {
    pub id: String,
    pub label: String,
    pub score: f64,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub profile: String,
    pub title: String,
    pub dimensions: Vec<DimensionResult>,
    pub groups: Vec<GroupResult>,
    pub ranking: Vec<RankedEntry>,
    pub group_ranking: Vec<RankedEntry>,
    /// Top-n ranking code (Holland style), when the profile asks for one
    pub top_code: Option<String>,
    /// Concatenated polar-axis codes, when any dimension has an axis
    pub style_code: Option<String>,
    pub interpretation: String,
}

impl Report {
    pub fn dimension(&self, id: &str) -> Option<&DimensionResult> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&GroupResult> {
        self.groups.iter().find(|g| g.id == id)
    }
}

/// Run normalize -> classify/code -> aggregate -> rank over one set of values.
///
/// Values not present in `values` fall back to the dimension default. Every key
/// in `values` must name a dimension of the profile.
pub fn evaluate(profile: &Profile, values: &BTreeMap<String, f64>) -> EngineResult<Report> {
    if let Some(unknown) = values
        .keys()
        .find(|id| !profile.dimensions.iter().any(|d| &d.template.id == *id))
    {
        return Err(EngineError::UnknownDimension(unknown.clone()));
    }

    let mut current = Vec::with_capacity(profile.dimensions.len());
    let mut dimensions = Vec::with_capacity(profile.dimensions.len());

    for spec in &profile.dimensions {
        let raw = match values.get(&spec.template.id) {
            Some(v) => spec.template.with_value(*v),
            None => spec.template.clone(),
        };
        let value = normalize(&raw, profile.range_policy)?;
        let dim = raw.with_value(value);

        let class = match spec.rule {
            Some(ref rule) => Some(classify(&dim.id, value, rule)?.to_string()),
            None => None,
        };
        let code = spec.axis.as_ref().map(|axis| code(value, axis).to_string());

        tracing::debug!(dimension = %dim.id, value, ?class, ?code, "scored dimension");
        dimensions.push(DimensionResult {
            id: dim.id.clone(),
            label: dim.label.clone(),
            value,
            class,
            code,
        });
        current.push(dim);
    }

    let mut groups = Vec::with_capacity(profile.groups.len());
    for spec in &profile.groups {
        let score = aggregate(&spec.group, &current)?;
        let class = match spec.rule {
            Some(ref rule) => Some(classify(&spec.group.id, score, rule)?.to_string()),
            None => None,
        };
        tracing::debug!(group = %spec.group.id, score, ?class, "aggregated group");
        groups.push(GroupResult {
            id: spec.group.id.clone(),
            label: spec.group.label.clone(),
            score,
            class,
        });
    }

    let ranking = rank(
        &dimensions
            .iter()
            .map(|d| Scored::new(&d.id, &d.label, d.value))
            .collect::<Vec<_>>(),
    );
    let group_ranking = rank(
        &groups
            .iter()
            .map(|g| Scored::new(&g.id, &g.label, g.score))
            .collect::<Vec<_>>(),
    );

    let top_code = profile.code_length.map(|n| top_code(&ranking, n));
    let style_code = dimensions
        .iter()
        .any(|d| d.code.is_some())
        .then(|| style_code(dimensions.iter().filter_map(|d| d.code.as_deref())));

    let mut report = Report {
        profile: profile.name.clone(),
        title: profile.title.clone(),
        dimensions,
        groups,
        ranking,
        group_ranking,
        top_code,
        style_code,
        interpretation: String::new(),
    };
    report.interpretation = interpret(&report);
    Ok(report)
}

fn describe(label: &str, score: f64, class: Option<&str>) -> String {
    match class {
        Some(class) => format!("{} {} ({})", label, score, class),
        None => format!("{} {}", label, score),
    }
}

/// Plain-text summary handed to the prompt template.
pub fn interpret(report: &Report) -> String {
    let mut lines = vec![format!("{} results", report.title)];

    let order = report
        .ranking
        .iter()
        .map(|entry| {
            let class = report.dimension(&entry.id).and_then(|d| d.class.as_deref());
            format!("{}. {}", entry.rank, describe(&entry.label, entry.score, class))
        })
        .collect::<Vec<_>>();
    if !order.is_empty() {
        lines.push(format!("Ranking: {}", order.join(", ")));
    }

    if !report.group_ranking.is_empty() {
        let order = report
            .group_ranking
            .iter()
            .map(|entry| {
                let class = report.group(&entry.id).and_then(|g| g.class.as_deref());
                format!("{}. {}", entry.rank, describe(&entry.label, entry.score, class))
            })
            .collect::<Vec<_>>();
        lines.push(format!("Groups: {}", order.join(", ")));
    }

    let axes = report
        .dimensions
        .iter()
        .filter_map(|d| d.code.as_ref().map(|c| format!("{} {} -> {}", d.label, d.value, c)))
        .collect::<Vec<_>>();
    if !axes.is_empty() {
        lines.push(format!("Axes: {}", axes.join(", ")));
    }

    if let Some(ref code) = report.top_code {
        lines.push(format!("Top code: {}", code));
    }
    if let Some(ref code) = report.style_code {
        lines.push(format!("Style code: {}", code));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holland() -> Profile {
        let yaml = r#"
name: holland
title: Holland RIASEC
code_length: 3
rules:
  level:
    - { range: "<=40", label: Low }
    - { range: "41-59", label: Mid }
    - { range: ">=60", label: High }
dimensions:
  - { id: R, label: Realistic, min: 0, max: 100, rule: level }
  - { id: I, label: Investigative, min: 0, max: 100, rule: level }
  - { id: A, label: Artistic, min: 0, max: 100, rule: level }
  - { id: S, label: Social, min: 0, max: 100, rule: level }
  - { id: E, label: Enterprising, min: 0, max: 100, rule: level }
  - { id: C, label: Conventional, min: 0, max: 100, rule: level }
"#;
        let config: ProfileConfig = serde_saphyr::from_str(yaml).unwrap();
        Profile::from_config(&config).unwrap()
    }

    fn values(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_riasec_report() {
        let report = evaluate(
            &holland(),
            &values(&[("R", 45.0), ("I", 72.0), ("A", 30.0), ("S", 68.0), ("E", 50.0), ("C", 20.0)]),
        )
        .unwrap();

        let order: Vec<(&str, f64)> = report
            .ranking
            .iter()
            .map(|e| (e.id.as_str(), e.score))
            .collect();
        assert_eq!(
            order,
            vec![("I", 72.0), ("S", 68.0), ("E", 50.0), ("R", 45.0), ("A", 30.0), ("C", 20.0)]
        );

        let class = |id: &str| report.dimension(id).unwrap().class.clone().unwrap();
        assert_eq!(class("I"), "High");
        assert_eq!(class("S"), "High");
        assert_eq!(class("E"), "Mid");
        assert_eq!(class("R"), "Mid");
        assert_eq!(class("A"), "Low");
        assert_eq!(class("C"), "Low");

        assert_eq!(report.top_code.as_deref(), Some("ISE"));
        assert!(report.style_code.is_none());
        assert!(report
            .interpretation
            .contains("Ranking: 1. Investigative 72 (High), 2. Social 68 (High)"));
        assert!(report.interpretation.ends_with("Top code: ISE"));
    }

    #[test]
    fn test_defaults_fill_missing_values() {
        let report = evaluate(&holland(), &BTreeMap::new()).unwrap();
        assert!(report.dimensions.iter().all(|d| d.value == 50.0));
        // All tied: input order preserved
        assert_eq!(report.top_code.as_deref(), Some("RIA"));
    }

    #[test]
    fn test_out_of_range_rejected_before_computation() {
        let err = evaluate(&holland(), &values(&[("I", 101.0)])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { ref id, .. } if id == "I"));
    }

    #[test]
    fn test_unknown_value_key() {
        let err = evaluate(&holland(), &values(&[("Q", 10.0)])).unwrap_err();
        assert_eq!(err, EngineError::UnknownDimension("Q".to_string()));
    }

    #[test]
    fn test_fraction_on_whole_scale_rejected_before_classify() {
        let err = evaluate(&holland(), &values(&[("R", 40.5)])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { ref id, .. } if id == "R"));
    }

    #[test]
    fn test_mean_group_classifies_half_points() {
        let yaml = r#"
name: halves
rules:
  level:
    - { range: "<5", label: Low }
    - { range: "5..10", label: High }
dimensions:
  - { id: a, min: 0, max: 10 }
  - { id: b, min: 0, max: 10 }
groups:
  - { id: g, members: [a, b], mode: mean, rule: level }
"#;
        let config: ProfileConfig = serde_saphyr::from_str(yaml).unwrap();
        let profile = Profile::from_config(&config).unwrap();
        let report = evaluate(&profile, &values(&[("a", 4.0), ("b", 5.0)])).unwrap();
        assert_eq!(report.group("g").unwrap().score, 4.5);
        assert_eq!(report.group("g").unwrap().class.as_deref(), Some("Low"));
    }

    #[test]
    fn test_negative_zero_ties_with_zero() {
        let config = crate::presets::load_preset("life-curve").unwrap();
        let profile = Profile::from_config(&config).unwrap();
        let report = evaluate(
            &profile,
            &values(&[
                ("childhood", 0.0),
                ("teens", -0.0),
                ("twenties", 0.0),
                ("thirties", 0.0),
                ("forties", 0.0),
                ("now", 0.0),
            ]),
        )
        .unwrap();
        let ids: Vec<&str> = report.ranking.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["childhood", "teens", "twenties", "thirties", "forties", "now"]);
    }

    #[test]
    fn test_groups_axes_and_clamp() {
        let yaml = r#"
name: mixed
range_policy: clamp
rules:
  track:
    - { range: "<=10", label: Low }
    - { range: ">10", label: High }
  office:
    - { range: "<=-4", label: back }
    - { range: "-3..3", label: half }
    - { range: ">=4", label: front }
dimensions:
  - { id: a1, min: 1, max: 10 }
  - { id: a2, min: 1, max: 10 }
  - { id: b1, min: 1, max: 10 }
  - id: office
    min: -5
    max: 5
    rule: office
    axis: { left: B, right: F, zero: left }
groups:
  - { id: A, label: Track A, members: [a1, a2], rule: track }
  - { id: B, label: Track B, members: [b1], rule: track }
"#;
        let config: ProfileConfig = serde_saphyr::from_str(yaml).unwrap();
        let profile = Profile::from_config(&config).unwrap();

        let report = evaluate(
            &profile,
            &values(&[("a1", 3.0), ("a2", 4.0), ("b1", 14.0), ("office", 0.0)]),
        )
        .unwrap();

        // b1 clamped to 10
        assert_eq!(report.dimension("b1").unwrap().value, 10.0);
        assert_eq!(report.group("A").unwrap().score, 7.0);
        assert_eq!(report.group("A").unwrap().class.as_deref(), Some("Low"));
        assert_eq!(report.group("B").unwrap().score, 10.0);

        let office = report.dimension("office").unwrap();
        assert_eq!(office.class.as_deref(), Some("half"));
        assert_eq!(office.code.as_deref(), Some("B"));
        assert_eq!(report.style_code.as_deref(), Some("B"));

        let groups: Vec<&str> = report.group_ranking.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(groups, vec!["B", "A"]);
        assert!(report.interpretation.contains("Groups: 1. Track B 10 (Low), 2. Track A 7 (Low)"));
        assert!(report.interpretation.contains("Axes: office 0 -> B"));
    }

    #[test]
    fn test_evaluate_is_pure() {
        let profile = holland();
        let input = values(&[("R", 45.0), ("I", 72.0)]);
        let first = evaluate(&profile, &input).unwrap();
        let second = evaluate(&profile, &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(profile.default_dimensions()[0].value, 50.0);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let yaml = r#"
name: broken
dimensions:
  - { id: a, min: 0, max: 10, rule: nope }
"#;
        let config: ProfileConfig = serde_saphyr::from_str(yaml).unwrap();
        let err = Profile::from_config(&config).unwrap_err();
        assert!(matches!(err, EngineError::Profile(ref errors) if errors.len() == 1));
    }
}
