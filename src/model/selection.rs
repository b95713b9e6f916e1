//! Table selection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which resolved entities take part in the graph diagram and the payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl TableSelection {
    /// Select the given names only
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableSelection::Only(names.into_iter().map(Into::into).collect())
    }

    /// `None` means all tables
    pub fn from_option(names: Option<Vec<String>>) -> Self {
        names.map(Self::only).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            TableSelection::All => true,
            TableSelection::Only(names) => names.contains(name),
        }
    }
}
