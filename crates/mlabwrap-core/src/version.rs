//! MATLAB numeric version tuples
//!
//! MATLAB reports versions such as `8.1.0.604` or `7.14.0.739`. These are not
//! semver: the number of components varies and minor components run past 9,
//! so versions are kept as integer tuples and compared component-wise with
//! missing trailing components treated as zero.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Ordered tuple of numeric version components
#[derive(Debug, Clone)]
pub struct ProductVersion {
    components: Vec<u32>,
}

impl ProductVersion {
    /// Build a version from its components. An empty slice is version 0.
    pub fn new(components: impl Into<Vec<u32>>) -> Self {
        Self {
            components: components.into(),
        }
    }

    /// Parse a dotted version string such as `8.1.0.604`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::parse("empty version string", s));
        }

        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u32>().map_err(|_| {
                    Error::parse(format!("invalid version component '{}'", part), s)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components })
    }

    /// The components as reported, without padding
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Major component (0 when absent)
    pub fn major(&self) -> u32 {
        self.component(0)
    }

    /// Minor component (0 when absent)
    pub fn minor(&self) -> u32 {
        self.component(1)
    }

    fn component(&self, index: usize) -> u32 {
        self.components.get(index).copied().unwrap_or(0)
    }

    /// Whether this version is at least `threshold`
    pub fn at_least(&self, threshold: &ProductVersion) -> bool {
        self >= threshold
    }
}

impl Ord for ProductVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ProductVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the padded ordering so that 7.0 == 7.0.0.0
impl PartialEq for ProductVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ProductVersion {}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for ProductVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ProductVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProductVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
