use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// A release version with major, minor, and patch components.
///
/// Tags in this repository are plain dotted triples ("1.4.2"), so parsing is
/// strict: no prefix, no pre-release or build suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version from a tag string.
    ///
    /// The tag must split on '.' into exactly three components, each a
    /// non-empty run of ASCII digits that fits in a `u32`.
    ///
    /// # Example
    /// ```
    /// use create_release::version::Version;
    ///
    /// assert_eq!(Version::parse("1.4.2").unwrap(), Version::new(1, 4, 2));
    /// assert!(Version::parse("1.4").is_err());
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        let parts: Vec<&str> = tag.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::parse(format!(
                "Invalid version format: '{}' - expected MAJOR.MINOR.PATCH",
                tag
            )));
        }

        let major = parse_component(tag, "major", parts[0])?;
        let minor = parse_component(tag, "minor", parts[1])?;
        let patch = parse_component(tag, "patch", parts[2])?;

        Ok(Version::new(major, minor, patch))
    }

    /// Returns the next minor release: minor + 1, patch reset, major unchanged.
    ///
    /// This is the only bump the release tool performs.
    pub fn bump_minor(&self) -> Result<Self> {
        let minor = self.minor.checked_add(1).ok_or_else(|| {
            ReleaseError::parse(format!("Minor version of '{}' cannot be incremented", self))
        })?;

        Ok(Version::new(self.major, minor, 0))
    }
}

// `u32::from_str` accepts a leading '+', so digits are checked explicitly.
fn parse_component(tag: &str, name: &str, raw: &str) -> Result<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReleaseError::parse(format!(
            "Invalid {} version '{}' in tag '{}'",
            name, raw, tag
        )));
    }

    raw.parse::<u32>().map_err(|_| {
        ReleaseError::parse(format!(
            "{} version '{}' in tag '{}' is out of range",
            name, raw, tag
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Computes the version that follows `latest_tag`.
///
/// Always bumps the minor component and resets patch to zero:
/// "1.4.2" becomes "1.5.0". Malformed tags fail with a parse error.
pub fn calculate_new_version(latest_tag: &str) -> Result<String> {
    let current = Version::parse(latest_tag)?;
    Ok(current.bump_minor()?.to_string())
}
