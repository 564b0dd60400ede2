/*!
 * Process Name
 * Bounded owner label for occupied blocks
 */

use crate::core::limits::MAX_PROCESS_NAME;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Owner label carried by an occupied block
///
/// Names are trimmed of surrounding whitespace and truncated to
/// [`MAX_PROCESS_NAME`] characters at a character boundary. Lookups apply the
/// same normalization, so loading and freeing stay symmetric for over-long
/// names.
///
/// # Examples
///
/// ```
/// use partition_sim::core::ProcessName;
///
/// let name = ProcessName::new("  editor  ");
/// assert_eq!(name.as_str(), "editor");
///
/// let long = ProcessName::new("a-very-long-process-name");
/// assert_eq!(long.len(), 19);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(from = "String", into = "String")]
pub struct ProcessName {
    inner: SmartString,
}

impl ProcessName {
    /// Normalize a raw label into a process name
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let inner = match trimmed.char_indices().nth(MAX_PROCESS_NAME) {
            Some((cut, _)) => SmartString::from(&trimmed[..cut]),
            None => SmartString::from(trimmed),
        };
        Self { inner }
    }

    /// Whether `raw` would lose characters when normalized
    pub fn would_truncate(raw: &str) -> bool {
        raw.trim().chars().count() > MAX_PROCESS_NAME
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Length in characters
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for ProcessName {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ProcessName {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<ProcessName> for String {
    #[inline]
    fn from(name: ProcessName) -> Self {
        name.inner.into()
    }
}

impl AsRef<str> for ProcessName {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ProcessName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ProcessName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
