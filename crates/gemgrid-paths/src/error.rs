use std::fmt;

/// Reasons a path plan can fail. All of them are recoverable: the caller
/// reports the failure and may try again with other inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// The target item count is negative or larger than the item total.
    InvalidTarget { target: i64, available: usize },
    /// No start-to-finish path satisfies the objective.
    NoPath,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget { target, available } => write!(
                f,
                "invalid target item count {target}: expected 0..={available}"
            ),
            Self::NoPath => write!(f, "no path to the finish satisfies the objective"),
        }
    }
}

impl std::error::Error for PlanError {}

/// Check a caller-supplied target count against the number of items.
pub fn check_target(target: i64, available: usize) -> Result<usize, PlanError> {
    match usize::try_from(target) {
        Ok(t) if t <= available => Ok(t),
        _ => Err(PlanError::InvalidTarget { target, available }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_bounds() {
        assert_eq!(check_target(0, 0), Ok(0));
        assert_eq!(check_target(3, 3), Ok(3));
        assert_eq!(
            check_target(-1, 3),
            Err(PlanError::InvalidTarget {
                target: -1,
                available: 3
            })
        );
        assert!(check_target(4, 3).is_err());
        assert_eq!(
            check_target(4, 3).unwrap_err().to_string(),
            "invalid target item count 4: expected 0..=3"
        );
    }
}
