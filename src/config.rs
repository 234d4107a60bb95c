use serde::Deserialize;

use crate::wire::SearchType;

/// Request defaults a host application can load from its own configuration.
///
/// Only unset request values are filled in; anything set explicitly on a
/// [`SearchRequest`](crate::SearchRequest) wins.
///
/// ```
/// use clove_search::SearchDefaults;
///
/// let defaults: SearchDefaults =
///     serde_json::from_str(r#"{"size": 25, "search_type": "dfs_query_then_fetch"}"#).unwrap();
/// assert_eq!(defaults.size, Some(25));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchDefaults {
    pub size: Option<u64>,
    pub track_total_hits: Option<bool>,
    pub search_type: Option<SearchType>,
    /// Engine-side time budget, e.g. `"2s"`
    pub timeout: Option<String>,
    pub preference: Option<String>,
}
