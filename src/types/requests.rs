//! Lookup input types.

use serde::{Deserialize, Serialize};

/// Ordered commands handed to a lookup.
///
/// Hosts may pass either a single command or a list of them; both forms
/// normalize to the same ordered sequence before anything runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTerms", into = "Vec<String>")]
pub struct LookupTerms(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTerms {
    One(String),
    Many(Vec<String>),
}

impl From<RawTerms> for LookupTerms {
    fn from(raw: RawTerms) -> Self {
        match raw {
            RawTerms::One(term) => Self(vec![term]),
            RawTerms::Many(terms) => Self(terms),
        }
    }
}

impl LookupTerms {
    /// Parses a JSON string or array of strings.
    pub fn from_json(input: &str) -> crate::PipeOnceResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there is nothing to run.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates terms in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<LookupTerms> for Vec<String> {
    fn from(terms: LookupTerms) -> Self {
        terms.0
    }
}

impl From<String> for LookupTerms {
    fn from(term: String) -> Self {
        Self(vec![term])
    }
}

impl From<&str> for LookupTerms {
    fn from(term: &str) -> Self {
        Self(vec![term.to_string()])
    }
}

impl From<Vec<String>> for LookupTerms {
    fn from(terms: Vec<String>) -> Self {
        Self(terms)
    }
}

impl From<Vec<&str>> for LookupTerms {
    fn from(terms: Vec<&str>) -> Self {
        Self(terms.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LookupTerms {
    fn from(terms: [&str; N]) -> Self {
        Self(terms.iter().map(|t| t.to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a LookupTerms {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
