// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Numeric exploration bounds and their validation.
//!
//! Every search and builder validates its bounds before doing any work, so a
//! bad bound never yields a partial result.
use thiserror::Error;

/// Invalid bound supplied to a search, builder or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// BFS layer width must be at least one.
    #[error("width must be positive")]
    ZeroWidth,
    /// Exhaustive enumeration needs a positive length bound.
    #[error("max_length must be positive")]
    ZeroMaxLength,
    /// Trajectory following needs at least one step.
    #[error("max_steps must be positive")]
    ZeroMaxSteps,
    /// Fork-join expansion needs at least one worker.
    #[error("workers must be positive")]
    ZeroWorkers,
}

/// Checks a BFS layer width.
pub const fn check_width(width: usize) -> Result<usize, BoundsError> {
    if width == 0 {
        Err(BoundsError::ZeroWidth)
    } else {
        Ok(width)
    }
}

/// Checks an exhaustive enumeration length bound.
pub const fn check_max_length(max_length: usize) -> Result<usize, BoundsError> {
    if max_length == 0 {
        Err(BoundsError::ZeroMaxLength)
    } else {
        Ok(max_length)
    }
}

/// Checks a trajectory step budget.
pub const fn check_max_steps(max_steps: usize) -> Result<usize, BoundsError> {
    if max_steps == 0 {
        Err(BoundsError::ZeroMaxSteps)
    } else {
        Ok(max_steps)
    }
}

/// Checks a worker count.
pub const fn check_workers(workers: usize) -> Result<usize, BoundsError> {
    if workers == 0 {
        Err(BoundsError::ZeroWorkers)
    } else {
        Ok(workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected_everywhere() {
        assert_eq!(check_width(0), Err(BoundsError::ZeroWidth));
        assert_eq!(check_max_length(0), Err(BoundsError::ZeroMaxLength));
        assert_eq!(check_max_steps(0), Err(BoundsError::ZeroMaxSteps));
        assert_eq!(check_workers(0), Err(BoundsError::ZeroWorkers));
        assert_eq!(check_width(3), Ok(3));
    }
}
