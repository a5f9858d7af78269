//! Host action surface: the buttons a page wires to the table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::store::RowStore;
use crate::types::RowRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Cancel,
    AddRow,
    ClearRates,
    ClearThreshold,
    ClearAll,
    Save,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Cancel,
        Action::AddRow,
        Action::ClearRates,
        Action::ClearThreshold,
        Action::ClearAll,
        Action::Save,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Cancel => "cancel",
            Action::AddRow => "addRow",
            Action::ClearRates => "clearRates",
            Action::ClearThreshold => "clearThreshold",
            Action::ClearAll => "clearAll",
            Action::Save => "save",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| GridError::UnknownAction(s.to_string()))
    }
}

/// Host-supplied behaviour for the actions the core leaves open.
///
/// Every hook defaults to doing nothing.
pub trait TableActions {
    fn clear_rates(&mut self, _store: &mut RowStore) {}

    fn clear_threshold(&mut self, _store: &mut RowStore) {}

    fn clear_all(&mut self, _store: &mut RowStore) {}

    fn save(&mut self, _rows: &[RowRecord]) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActions;

impl TableActions for NoActions {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("explode".parse::<Action>().is_err());
    }

    #[test]
    fn test_serde_names_match() {
        let json = serde_json::to_string(&Action::ClearThreshold).unwrap();
        assert_eq!(json, r#""clearThreshold""#);
    }
}
