use std::fmt::{Display, Formatter};
use anyhow::{anyhow, bail, Context, Error};

/// A `group`, `artifact` and `version`, borrowed from a `group:artifact:version` string.
///
/// This is the shape the search service uses for its ids (together with the latest version appended), and the
/// shape that gets colored when printing.
///
/// [ArtifactCoord] implements [TryFrom<&str>]. Format is exactly `group:artifact:version`, any other number of
/// colons is an error.
/// ```
/// # use pretty_assertions::assert_eq;
/// use solr_search::coord::ArtifactCoord;
/// let a = ArtifactCoord::try_from("com.google.guava:guava:33.0.0-jre").unwrap();
/// let b = ArtifactCoord {
///     group: "com.google.guava",
///     artifact: "guava",
///     version: "33.0.0-jre",
/// };
///
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "com.google.guava:guava:33.0.0-jre");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtifactCoord<'a> {
	pub group: &'a str,
	pub artifact: &'a str,
	pub version: &'a str,
}

impl Display for ArtifactCoord<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
	}
}

impl<'a> TryFrom<&'a str> for ArtifactCoord<'a> {
	type Error = Error;

	fn try_from(s: &'a str) -> Result<Self, Self::Error> {
		let mut iter = s.split(':');
		let group = iter.next().with_context(|| anyhow!("no group specified: {s:?}"))?;
		let artifact = iter.next().with_context(|| anyhow!("no artifact specified: {s:?}"))?;
		let version = iter.next().with_context(|| anyhow!("no version specified: {s:?}"))?;

		if iter.next().is_some() {
			bail!("there may not be more than 2 colons: {s:?}");
		}

		Ok(ArtifactCoord { group, artifact, version })
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::coord::ArtifactCoord;

	#[test]
	fn exactly_three_parts() {
		let coord = ArtifactCoord::try_from("org.example:foo:1.0").unwrap();
		assert_eq!(coord, ArtifactCoord { group: "org.example", artifact: "foo", version: "1.0" });

		// empty parts are still parts
		let coord = ArtifactCoord::try_from("::").unwrap();
		assert_eq!(coord, ArtifactCoord { group: "", artifact: "", version: "" });
	}

	#[test]
	fn wrong_number_of_colons() {
		assert!(ArtifactCoord::try_from("org.example").is_err());
		assert!(ArtifactCoord::try_from("org.example:foo").is_err());
		assert!(ArtifactCoord::try_from("org.example:foo:jar:1.0").is_err());
		assert!(ArtifactCoord::try_from("org.example:foo:jar:sources:1.0").is_err());
	}
}
