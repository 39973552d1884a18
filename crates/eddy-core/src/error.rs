//! Runtime error types for the Eddy solver.
//!
//! Construction errors live next to the configuration that produces them
//! (`eddy-space`, `eddy-engine`). This module holds the error a grid can
//! report after it is running.

use std::error::Error;
use std::fmt;

use crate::field::FieldKind;

/// Errors detected while checking a running grid.
///
/// The stepper itself never fails: a step is a fixed sequence of
/// deterministic passes. These errors come from explicit health checks
/// over the field buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A buffer holds NaN or an infinity.
    NonFinite {
        /// The field pair containing the bad value.
        field: FieldKind,
        /// Flat buffer index of the first bad element.
        cell_index: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, cell_index } => {
                write!(f, "non-finite value in field {field} at cell {cell_index}")
            }
        }
    }
}

impl Error for StepError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field_and_cell() {
        let e = StepError::NonFinite {
            field: FieldKind::Density,
            cell_index: 42,
        };
        assert_eq!(e.to_string(), "non-finite value in field density at cell 42");
    }
}
