//! Query-string parsing into a `QueryMap`.
//!
//! # Design
//! `parse_query` keeps the exact behavior page scripts relied on: keys are
//! taken verbatim, values go through `decodeURI`, a segment without `=`
//! becomes a value under the empty key, and empty input yields `{"": ""}`.
//! `parse_query_strict` is the same parser but refuses segments without `=`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::percent::{decode_uri, encode_uri};

/// Decoded query parameters, keyed by the raw parameter name.
///
/// Ordered by key so iteration and `to_query_string` are deterministic.
/// Inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap(BTreeMap<String, String>);

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Encode as `key=value&...`. Keys are written raw and values with the
    /// `encodeURI` set, which is what `parse_query` undoes.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={}", encode_uri(value))?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Parse `&`-delimited `key=value` pairs.
///
/// A segment without `=` is stored under the empty key with the whole
/// segment as its value.
pub fn parse_query(query: &str) -> Result<QueryMap, QueryError> {
    parse(query, false)
}

/// Like `parse_query`, but a segment without `=` is an error.
pub fn parse_query_strict(query: &str) -> Result<QueryMap, QueryError> {
    parse(query, true)
}

/// Parse the `search` part of a location (`?a=1&b=2`), dropping one
/// leading `?` if present.
pub fn parse_search(search: &str) -> Result<QueryMap, QueryError> {
    parse_query(search.strip_prefix('?').unwrap_or(search))
}

fn parse(query: &str, strict: bool) -> Result<QueryMap, QueryError> {
    let mut map = QueryMap::new();
    for segment in query.split('&') {
        let (key, raw_value) = match segment.split_once('=') {
            Some(pair) => pair,
            None if strict => {
                return Err(QueryError::MissingSeparator {
                    segment: segment.to_string(),
                })
            }
            None => ("", segment),
        };
        map.insert(key, decode_uri(raw_value)?);
    }
    tracing::debug!(pairs = map.len(), "parsed query string");
    Ok(map)
}
