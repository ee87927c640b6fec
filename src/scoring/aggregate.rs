use crate::error::{EngineError, EngineResult};
use crate::model::{AggregateMode, Dimension, Group};

/// Sum or average the current values of a group's members.
///
/// Recomputed from `dimensions` on every call; an empty group is 0.
pub fn aggregate(group: &Group, dimensions: &[Dimension]) -> EngineResult<f64> {
    let mut total = 0.0;
    for member in &group.members {
        let dim = dimensions
            .iter()
            .find(|d| &d.id == member)
            .ok_or_else(|| EngineError::UnknownMember {
                group: group.id.clone(),
                member: member.clone(),
            })?;
        total += dim.value;
    }

    Ok(match group.mode {
        AggregateMode::Sum => total,
        AggregateMode::Mean if group.members.is_empty() => 0.0,
        AggregateMode::Mean => total / group.members.len() as f64,
    })
}

/// Inclusive range an aggregate can take, derived from member ranges.
pub fn aggregate_range(group: &Group, dimensions: &[Dimension]) -> EngineResult<(f64, f64)> {
    let mins: Vec<Dimension> = dimensions.iter().map(|d| d.with_value(d.min)).collect();
    let maxs: Vec<Dimension> = dimensions.iter().map(|d| d.with_value(d.max)).collect();
    Ok((aggregate(group, &mins)?, aggregate(group, &maxs)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trips() -> Vec<Dimension> {
        vec![
            Dimension::new("a1", "Trip A1", 1.0, 10.0, 7.0),
            Dimension::new("a2", "Trip A2", 1.0, 10.0, 4.0),
            Dimension::new("a3", "Trip A3", 1.0, 10.0, 9.0),
            Dimension::new("b1", "Trip B1", 1.0, 10.0, 2.0),
        ]
    }

    #[test]
    fn test_sum() {
        let group = Group::new("A", "Track A", &["a1", "a2", "a3"], AggregateMode::Sum);
        assert_eq!(aggregate(&group, &trips()).unwrap(), 20.0);
    }

    #[test]
    fn test_mean() {
        let group = Group::new("A", "Track A", &["a1", "a2", "a3"], AggregateMode::Mean);
        let mean = aggregate(&group, &trips()).unwrap();
        assert!((mean - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_recomputes_after_member_change() {
        let group = Group::new("A", "Track A", &["a1", "a2", "a3"], AggregateMode::Sum);
        let mut dims = trips();
        assert_eq!(aggregate(&group, &dims).unwrap(), 20.0);

        dims[1] = dims[1].with_value(10.0);
        assert_eq!(aggregate(&group, &dims).unwrap(), 26.0);
        // Idempotent for unchanged state
        assert_eq!(aggregate(&group, &dims).unwrap(), 26.0);
    }

    #[test]
    fn test_unknown_member() {
        let group = Group::new("A", "Track A", &["a1", "zz"], AggregateMode::Sum);
        let err = aggregate(&group, &trips()).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownMember {
                group: "A".to_string(),
                member: "zz".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_group() {
        let sum = Group::new("E", "Empty", &[], AggregateMode::Sum);
        let mean = Group::new("E", "Empty", &[], AggregateMode::Mean);
        assert_eq!(aggregate(&sum, &trips()).unwrap(), 0.0);
        assert_eq!(aggregate(&mean, &trips()).unwrap(), 0.0);
    }

    #[test]
    fn test_aggregate_range() {
        let sum = Group::new("A", "Track A", &["a1", "a2", "a3"], AggregateMode::Sum);
        assert_eq!(aggregate_range(&sum, &trips()).unwrap(), (3.0, 30.0));
        let mean = Group::new("A", "Track A", &["a1", "a2", "a3"], AggregateMode::Mean);
        assert_eq!(aggregate_range(&mean, &trips()).unwrap(), (1.0, 10.0));
    }
}
