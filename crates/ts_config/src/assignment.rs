//! Dotted `KEY=VALUE` assignments, as given on the command line.

use std::{fmt::Display, str::FromStr};

use crate::error::{Error, Result};

/// A configuration section that can be assigned to by key.
pub trait AssignKeyValue {
    /// Assign a value to a key in a configuration.
    fn assign(&mut self, kv: KvAssignment) -> Result<()>;
}

/// A single `KEY=VALUE` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvAssignment {
    key: KvKey,
    value: String,
}

impl KvAssignment {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            key: KvKey {
                path: key.clone(),
                full_path: key,
            },
            value: value.into(),
        }
    }

    /// The full key, as it was given.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key.full_path
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The remaining key, after any trimmed prefixes.
    pub(crate) fn key_string(&self) -> &str {
        &self.key.path
    }

    /// Trim `segment` off the start of the key, if the key starts with it.
    pub(crate) fn p(&mut self, segment: &str) -> bool {
        self.key.trim_prefix(segment)
    }

    pub(crate) fn into_string(self) -> String {
        self.value
    }

    pub(crate) fn try_bool(self) -> Result<bool> {
        self.try_parse()
    }

    pub(crate) fn try_parse<T>(self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.value
            .trim()
            .parse()
            .map_err(|error: T::Err| Error::InvalidConfigValue {
                key: self.key.full_path,
                value: self.value.clone(),
                reason: error.to_string(),
            })
    }
}

impl FromStr for KvAssignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidAssignment(s.to_owned()))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidAssignment(s.to_owned()));
        }

        Ok(Self::new(key, value))
    }
}

/// A dot-delimited key in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct KvKey {
    /// The (possibly trimmed) path of the key.
    path: String,

    /// The full path, unchanged even after calling `trim_prefix`.
    full_path: String,
}

impl KvKey {
    /// Trim the first segment of the key, if it matches `segment`.
    ///
    /// For example, given the key `foo.bar.baz`, calling `trim_prefix("foo")`
    /// will result in `bar.baz`.
    fn trim_prefix(&mut self, segment: &str) -> bool {
        let mut segments = self.path.splitn(2, '.');
        if segments.next() != Some(segment) {
            return false;
        }

        self.path = segments.next().unwrap_or_default().to_owned();
        true
    }
}

/// The error for a key that does not exist in a section.
pub(crate) fn missing_key<T>(kv: &KvAssignment, available: &[&str]) -> Result<T> {
    Err(Error::UnknownConfigKey {
        key: kv.key().to_owned(),
        available_keys: available.iter().map(ToString::to_string).collect(),
    })
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod tests;
