//! Search state and the filter engine.

use serde::{Deserialize, Serialize};

use crate::installers::Installer;

/// Locality shown when the location search box is empty.
pub const DEFAULT_LOCALITY: &str = "paris";

/// Term the search box starts with.
pub const DEFAULT_TERM: &str = "Paris";

/// Which installer field a search term is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Location,
    Name,
}

impl SearchField {
    fn value_of(self, installer: &Installer) -> &str {
        match self {
            SearchField::Location => &installer.localisation,
            SearchField::Name => &installer.nom,
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchField::Location => write!(f, "location"),
            SearchField::Name => write!(f, "name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search field '{0}'; expected location or name")]
pub struct ParseSearchFieldError(String);

impl std::str::FromStr for SearchField {
    type Err = ParseSearchFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "location" | "localisation" | "loc" => Ok(SearchField::Location),
            "name" | "nom" => Ok(SearchField::Name),
            _ => Err(ParseSearchFieldError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub term: String,
    pub field: SearchField,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            term: DEFAULT_TERM.to_string(),
            field: SearchField::Location,
        }
    }
}

/// Select the installers matching `term` on `field`, in store order.
///
/// An empty term on the location field is not "match everything": it shows
/// the installers whose locality is exactly [`DEFAULT_LOCALITY`], ignoring
/// case. Every other case is a lower-cased substring match, so an empty term
/// on the name field matches every installer.
#[must_use]
pub fn filter<'a>(
    records: &'a [Installer],
    term: &str,
    field: SearchField,
) -> Vec<&'a Installer> {
    if term.is_empty() && field == SearchField::Location {
        return records
            .iter()
            .filter(|r| r.localisation.to_lowercase() == DEFAULT_LOCALITY)
            .collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| field.value_of(r).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
