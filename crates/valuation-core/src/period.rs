//! Statement period selectors.
//!
//! This module defines [`PeriodType`] for choosing annual or quarterly
//! statements and [`Period`] for addressing a column of a statement table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Period type for statement data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Annual reporting period.
    #[default]
    Annual,
    /// Quarterly reporting period.
    Quarterly,
}

/// Which reported period of a line item to read.
///
/// Statement tables are ordered most recent first, so the current period
/// is column 0 and the prior period is column 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Most recent reported period.
    Current,
    /// The period before the most recent one.
    Prior,
}

impl Period {
    /// Returns the column index of this period in a statement table.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Current => 0,
            Self::Prior => 1,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Prior => write!(f, "prior"),
        }
    }
}
