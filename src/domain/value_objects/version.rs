//! Version value object - orders contract versions
//!
//! Versions are dotted numeric identifiers (`1`, `1.2`, `1.2.3`) with an
//! optional pre-release suffix (`2.0.0-beta.1`). Missing numeric components
//! compare as zero, so `1.2` and `1.2.0` are the same version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ContractorError;

/// A parsed contract version
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    numbers: Vec<u64>,
    pre: Option<String>,
}

impl Version {
    /// Parse a version string
    pub fn parse(s: &str) -> Result<Self, ContractorError> {
        let raw = s.trim();
        let invalid = || ContractorError::InvalidVersion(s.to_string());
        if raw.is_empty() {
            return Err(invalid());
        }

        let raw_without_v = raw.strip_prefix('v').unwrap_or(raw);
        let (core, pre) = match raw_without_v.split_once('-') {
            Some((core, pre)) if !pre.is_empty() => (core, Some(pre.to_string())),
            Some(_) => return Err(invalid()),
            None => (raw_without_v, None),
        };

        let numbers = core
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            numbers,
            pre,
        })
    }

    /// The version exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this is a pre-release (has a `-suffix`)
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    fn number(&self, idx: usize) -> u64 {
        self.numbers.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.numbers.len().max(other.numbers.len());
        for idx in 0..width {
            match self.number(idx).cmp(&other.number(idx)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        // A release sorts after any of its pre-releases
        match (&self.pre, &other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = ContractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn parses_dotted_numbers() {
        assert_eq!(v("1.2.3").as_str(), "1.2.3");
        assert!(!v("1.2.3").is_prerelease());
        assert!(v("2.0.0-rc.1").is_prerelease());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("one.two").is_err());
        assert!(Version::parse("1..2").is_err());
        assert!(Version::parse("1.0-").is_err());
    }

    #[test]
    fn orders_numerically_not_lexically() {
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("10.0.0") > v("9.9.9"));
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(v("1.2"), v("1.2.0"));
        assert!(v("1.2") < v("1.2.1"));
    }

    #[test]
    fn prerelease_sorts_before_release() {
        assert!(v("2.0.0-beta") < v("2.0.0"));
        assert!(v("2.0.0-alpha") < v("2.0.0-beta"));
        assert!(v("1.9.9") < v("2.0.0-alpha"));
    }

    #[test]
    fn accepts_leading_v() {
        assert_eq!(v("v1.0.0"), v("1.0.0"));
    }

    #[test]
    fn serde_round_trips_raw_string() {
        let json = serde_json::to_string(&v("1.4.0")).unwrap();
        assert_eq!(json, "\"1.4.0\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "1.4.0");
    }
}
