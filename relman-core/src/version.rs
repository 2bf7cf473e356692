//! Tag-name rules: release numbers, `<major>.<minor>` parsing and the two tag rewrites
//! (legacy artifact naming, stable channel).

use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// Highest major version whose `.0` artifacts are published under the bare major number.
pub const LEGACY_MAJOR_MAX: u32 = 12;

/// A tag name read as a floating-point number. Non-finite values are rejected since
/// they cannot be ordered.
pub fn release_number(name: &str) -> Option<f64> {
    name.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A tag name of the form `<major>.<minor>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseVersion {
    pub major: u32,
    pub minor: u32,
}

impl ReleaseVersion {
    /// The tag the stable channel publishes under: `<major>.0`.
    pub fn stable_tag(&self) -> String {
        format!("{}.0", self.major)
    }
}

impl FromStr for ReleaseVersion {
    type Err = VersionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed { tag: tag.to_string() };
        let (major, minor) = tag.split_once('.').ok_or_else(malformed)?;
        if minor.contains('.') {
            return Err(malformed());
        }
        Ok(Self {
            major: major.parse().map_err(|_| malformed())?,
            minor: minor.parse().map_err(|_| malformed())?,
        })
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Tag used to locate an artifact at its source.
///
/// Artifacts for `<major>.0` releases up to [`LEGACY_MAJOR_MAX`] were published under the bare
/// major number; every other tag is returned unchanged.
pub fn resolve_version_for_url(tag: &str) -> Result<String, VersionError> {
    let version: ReleaseVersion = tag.parse()?;
    if version.major <= LEGACY_MAJOR_MAX && version.minor == 0 {
        Ok(version.major.to_string())
    } else {
        Ok(tag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12.0", "12")]
    #[case("9.0", "9")]
    #[case("12.1", "12.1")]
    #[case("13.0", "13.0")]
    #[case("20.3", "20.3")]
    fn resolve_version_for_url_cases(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(resolve_version_for_url(tag).unwrap(), expected);
    }

    #[rstest]
    #[case("12")]
    #[case("12.0.1")]
    #[case("v12.0")]
    #[case("12.x")]
    #[case("")]
    fn malformed_tags_are_rejected(#[case] tag: &str) {
        let err = tag.parse::<ReleaseVersion>().unwrap_err();
        assert_eq!(err, VersionError::Malformed { tag: tag.to_string() });
        assert!(resolve_version_for_url(tag).is_err());
    }

    #[test]
    fn stable_tag_zeroes_minor() {
        let v: ReleaseVersion = "20.1".parse().unwrap();
        assert_eq!(v, ReleaseVersion { major: 20, minor: 1 });
        assert_eq!(v.stable_tag(), "20.0");
    }

    #[test]
    fn release_number_accepts_floats_only() {
        assert_eq!(release_number("12.5"), Some(12.5));
        assert_eq!(release_number("13"), Some(13.0));
        assert_eq!(release_number("v13"), None);
        assert_eq!(release_number("inf"), None);
        assert_eq!(release_number("NaN"), None);
    }
}
