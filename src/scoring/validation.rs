use std::collections::HashSet;

use super::aggregate::aggregate_range;
use super::bands::Band;
use super::classify::{check_coverage, check_coverage_steps, ClassificationRule};
use super::config::{BandConfig, GroupConfig, ProfileConfig};
use crate::model::{AggregateMode, Dimension, Group};

fn parse_rule(name: &str, rows: &[BandConfig], errors: &mut Vec<String>) -> Option<ClassificationRule> {
    let mut bands = Vec::with_capacity(rows.len());
    let mut ok = true;
    for (i, row) in rows.iter().enumerate() {
        match Band::parse(&row.range, &row.label) {
            Ok(band) => bands.push(band),
            Err(e) => {
                ok = false;
                errors.push(format!("rules.{}[{}].range: {}", name, i, e));
            }
        }
    }
    if rows.is_empty() {
        errors.push(format!("rules.{}: must have at least one band", name));
        ok = false;
    }
    ok.then(|| ClassificationRule::new(name, bands))
}

/// Validate a scoring profile.
/// Returns all validation errors at once (not just the first).
pub fn validate_profile(config: &ProfileConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.name.trim().is_empty() {
        errors.push("name: must not be empty".to_string());
    }
    if config.dimensions.is_empty() {
        errors.push("dimensions: at least one dimension is required".to_string());
    }
    if config.code_length == Some(0) {
        errors.push("code_length: must be at least 1".to_string());
    }

    // Band tables parse independently of who uses them
    let rules: Vec<(String, Option<ClassificationRule>)> = config
        .rules
        .iter()
        .map(|(name, rows)| (name.clone(), parse_rule(name, rows, &mut errors)))
        .collect();
    let find_rule = |name: &str| rules.iter().find(|(n, _)| n == name);

    let mut seen = HashSet::new();
    for (i, dim) in config.dimensions.iter().enumerate() {
        let at = format!("dimensions[{}]", i);

        if dim.id.trim().is_empty() {
            errors.push(format!("{}.id: must not be empty", at));
        } else if !seen.insert(dim.id.as_str()) {
            errors.push(format!("{}.id: duplicate id '{}'", at, dim.id));
        }

        if !dim.min.is_finite() || !dim.max.is_finite() {
            errors.push(format!("{}: min and max must be finite", at));
            continue;
        }
        if dim.min > dim.max {
            errors.push(format!("{}: min {} exceeds max {}", at, dim.min, dim.max));
            continue;
        }

        let whole = dim.min.fract() == 0.0 && dim.max.fract() == 0.0;

        if let Some(default) = dim.default {
            if !(dim.min..=dim.max).contains(&default) {
                errors.push(format!(
                    "{}.default: {} is outside [{}, {}]",
                    at, default, dim.min, dim.max
                ));
            } else if whole && default.fract() != 0.0 {
                errors.push(format!(
                    "{}.default: {} is not a whole number on a whole-number scale",
                    at, default
                ));
            }
        }

        if let Some(ref rule_name) = dim.rule {
            match find_rule(rule_name) {
                None => errors.push(format!("{}.rule: unknown rule '{}'", at, rule_name)),
                Some(_) if !whole => errors.push(format!(
                    "{}.rule: band rules need whole-number bounds, got [{}, {}]",
                    at, dim.min, dim.max
                )),
                Some((_, Some(rule))) => {
                    if let Err(gaps) = check_coverage(rule, dim.min, dim.max) {
                        errors.extend(gaps.into_iter().map(|g| format!("{}: {}", at, g)));
                    }
                }
                Some((_, None)) => {} // already reported
            }
        }

        if let Some(ref axis) = dim.axis {
            if !(dim.min < 0.0 && dim.min == -dim.max) {
                errors.push(format!(
                    "{}.axis: polar axes need a symmetric range, got [{}, {}]",
                    at, dim.min, dim.max
                ));
            }
            if axis.left.is_empty() || axis.right.is_empty() {
                errors.push(format!("{}.axis: left and right codes must not be empty", at));
            }
        }
    }

    for (i, group) in config.groups.iter().enumerate() {
        let at = format!("groups[{}]", i);

        if group.id.trim().is_empty() {
            errors.push(format!("{}.id: must not be empty", at));
        } else if !seen.insert(group.id.as_str()) {
            errors.push(format!("{}.id: duplicate id '{}'", at, group.id));
        }
        if group.members.is_empty() {
            errors.push(format!("{}.members: must not be empty", at));
        }

        let mut unknown = false;
        for member in &group.members {
            if !config.dimensions.iter().any(|d| &d.id == member) {
                unknown = true;
                errors.push(format!("{}.members: unknown dimension '{}'", at, member));
            }
        }

        if let Some(ref rule_name) = group.rule {
            match find_rule(rule_name) {
                None => errors.push(format!("{}.rule: unknown rule '{}'", at, rule_name)),
                Some((_, Some(rule))) if !unknown && !group.members.is_empty() => {
                    let fractional = config
                        .dimensions
                        .iter()
                        .filter(|d| group.members.contains(&d.id))
                        .any(|d| d.min.fract() != 0.0 || d.max.fract() != 0.0);
                    if fractional {
                        errors.push(format!(
                            "{}.rule: band rules need members with whole-number bounds",
                            at
                        ));
                    } else if let Some((lo, hi)) = group_bounds(config, group) {
                        // A mean of n whole values moves in steps of 1/n
                        let steps = match group.mode {
                            AggregateMode::Sum => 1,
                            AggregateMode::Mean => {
                                u32::try_from(group.members.len()).unwrap_or(u32::MAX)
                            }
                        };
                        if let Err(gaps) = check_coverage_steps(rule, lo, hi, steps) {
                            errors.extend(gaps.into_iter().map(|g| format!("{}: {}", at, g)));
                        }
                    }
                }
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Range a group's aggregate can take, from its members' declared ranges.
fn group_bounds(config: &ProfileConfig, group: &GroupConfig) -> Option<(f64, f64)> {
    let dimensions: Vec<Dimension> = config
        .dimensions
        .iter()
        .map(|d| Dimension::new(&d.id, d.label(), d.min, d.max, d.min))
        .collect();
    let members: Vec<&str> = group.members.iter().map(String::as_str).collect();
    aggregate_range(&Group::new(&group.id, group.label(), &members, group.mode), &dimensions).ok()
}
