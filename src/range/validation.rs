//! Checking a parsed range against a variable's real shape.

use super::RangeSpec;
use crate::error::{Result, SdsError};
use thiserror::Error;

/// One way a range fails to fit a variable. Dimension numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeViolation {
    /// The expression names a different number of dimensions.
    #[error("Variable {variable} has {actual} dimensions, but got {given} in the range")]
    DimensionCount {
        /// Variable checked.
        variable: String,
        /// Dimensions the variable has.
        actual: usize,
        /// Dimensions the range names.
        given: usize,
    },

    /// A start index lies beyond the dimension.
    #[error("Variable {variable} dimension {dimension} range starts too high ({start} > {size})")]
    StartTooHigh {
        /// Variable checked.
        variable: String,
        /// 1-based dimension number.
        dimension: usize,
        /// Requested start.
        start: usize,
        /// Length of the dimension.
        size: usize,
    },

    /// An end index lies beyond the dimension.
    #[error("Variable {variable} dimension {dimension} range ends past actual end ({end} > {size})")]
    EndTooHigh {
        /// Variable checked.
        variable: String,
        /// 1-based dimension number.
        dimension: usize,
        /// Requested end.
        end: usize,
        /// Length of the dimension.
        size: usize,
    },
}

impl RangeSpec {
    /// Check this spec against a variable of `shape`.
    ///
    /// Every violation is collected before failing. A spec with no
    /// dimensions stands for the whole variable and always passes.
    pub fn validate(&self, variable: &str, shape: &[usize]) -> Result<()> {
        if self.is_entire() {
            return Ok(());
        }

        let violations = self.violations(variable, shape);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SdsError::InvalidRange {
                variable: variable.to_string(),
                violations,
            })
        }
    }

    fn violations(&self, variable: &str, shape: &[usize]) -> Vec<RangeViolation> {
        let mut found = Vec::new();

        if self.len() != shape.len() {
            found.push(RangeViolation::DimensionCount {
                variable: variable.to_string(),
                actual: shape.len(),
                given: self.len(),
            });
        }

        for (i, (bound, &size)) in self.dims().iter().zip(shape).enumerate() {
            if let Some(start) = bound.start.filter(|&s| s > size) {
                found.push(RangeViolation::StartTooHigh {
                    variable: variable.to_string(),
                    dimension: i + 1,
                    start,
                    size,
                });
            }
            if let Some(end) = bound.end.filter(|&e| e > size) {
                found.push(RangeViolation::EndTooHigh {
                    variable: variable.to_string(),
                    dimension: i + 1,
                    end,
                    size,
                });
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{RangeSpec, VariableSelection};

    fn spec(text: &str) -> RangeSpec {
        VariableSelection::parse(text).unwrap().range
    }

    fn violations(text: &str, shape: &[usize]) -> Vec<RangeViolation> {
        match spec(text).validate("v", shape) {
            Err(SdsError::InvalidRange { violations, .. }) => violations,
            Ok(()) => Vec::new(),
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn accepts_ranges_inside_the_shape() {
        assert!(spec("v[0:9][:]").validate("v", &[10, 5]).is_ok());
        assert!(spec("v(5,10)").validate("v", &[10, 5]).is_ok());
    }

    #[test]
    fn end_past_dimension_names_dimension_and_size() {
        let found = violations("v[0:12][:]", &[10, 5]);
        assert_eq!(
            found,
            vec![RangeViolation::EndTooHigh {
                variable: "v".into(),
                dimension: 1,
                end: 12,
                size: 10,
            }]
        );
        assert_eq!(
            found[0].to_string(),
            "Variable v dimension 1 range ends past actual end (12 > 10)"
        );
    }

    #[test]
    fn dimension_count_mismatch() {
        let found = violations("v[1]", &[10, 5]);
        assert_eq!(
            found[0].to_string(),
            "Variable v has 2 dimensions, but got 1 in the range"
        );
    }

    #[test]
    fn reports_every_violation() {
        let found = violations("v[11:12][6][0]", &[10, 5]);
        assert_eq!(found.len(), 5);
        assert!(matches!(found[0], RangeViolation::DimensionCount { .. }));
        assert!(matches!(
            found[1],
            RangeViolation::StartTooHigh { dimension: 1, .. }
        ));
        assert!(matches!(
            found[4],
            RangeViolation::EndTooHigh { dimension: 2, .. }
        ));
    }

    #[test]
    fn entire_variable_skips_checks() {
        assert!(RangeSpec::entire().validate("v", &[10, 5]).is_ok());
        let full = RangeSpec::entire().resolve(&[10, 5]);
        assert!(full.validate("v", &[10, 5]).is_ok());
    }
}
