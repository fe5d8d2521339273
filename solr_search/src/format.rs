//! Printing of the search results as aligned lines like
//! ```text
//! compile 'com.google.guava:guava:33.0.0-jre'      2023-12-16
//! ```
//! where the `group:artifact:version` part is colored.
//!
//! Lengths are counted in bytes.

use std::fmt::Display;
use std::io::Write;
use chrono::TimeZone;
use colored::Colorize;
use colored::control::SHOULD_COLORIZE;
use log::debug;
use crate::coord::ArtifactCoord;
use crate::response::SearchResult;

/// The number of columns added to the longest `id` plus `latest_version`.
///
/// Three of them are taken up by the colon and quotes, at least one is a real space.
pub const PADDING: usize = 4;

/// The column at which dates are printed: the maximum of `4 + len(id) + len(latest_version)`.
///
/// Returns `0` for no results.
pub fn column_width(results: &[SearchResult]) -> usize {
	results.iter()
		.map(|result| PADDING + result.id.len() + result.latest_version.len())
		.max()
		.unwrap_or(0)
}

/// The `id`, with `:latest_version` appended if there is one.
pub fn content(result: &SearchResult) -> String {
	if result.latest_version.is_empty() {
		result.id.clone()
	} else {
		format!("{}:{}", result.id, result.latest_version)
	}
}

/// The escape sequence for bold, put inside of the blue of the version.
const BOLD: &str = "\x1b[1m";

/// Colors the group green, the artifact magenta and the version bold blue, each followed by a reset.
///
/// The version is written as `ESC[34m ESC[1m version ESC[0m`, not with the combined `ESC[1;34m`.
///
/// Anything that isn't exactly `group:artifact:version` is returned as is.
pub fn colorize(content: &str) -> String {
	match ArtifactCoord::try_from(content) {
		Ok(coord) => {
			let version = if SHOULD_COLORIZE.should_colorize() {
				format!("{BOLD}{}", coord.version)
			} else {
				coord.version.to_owned()
			};

			format!("{}:{}:{}",
				coord.group.green(),
				coord.artifact.magenta(),
				version.as_str().blue(),
			)
		},
		Err(e) => {
			debug!("printing {content:?} without color: {e}");
			content.to_owned()
		},
	}
}

/// Formats the milliseconds since the epoch as `YYYY-MM-DD` in the given time zone.
///
/// Gives an empty string for timestamps that are out of range.
pub fn format_date<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
	Tz::Offset: Display,
{
	tz.timestamp_millis_opt(millis)
		.single()
		.map(|date_time| date_time.format("%Y-%m-%d").to_string())
		.unwrap_or_default()
}

/// One line, without the line break. `width` is the result of [column_width].
pub fn render_line<Tz: TimeZone>(result: &SearchResult, width: usize, tz: &Tz) -> String
where
	Tz::Offset: Display,
{
	let content = content(result);
	let fill = width.saturating_sub(content.len());

	format!("compile '{colored}'{empty:fill$}{date:>6}",
		colored = colorize(&content),
		empty = "",
		date = format_date(result.timestamp, tz),
	)
}

/// Writes all the results, one per line, followed by an empty line.
pub fn render_listing<Tz: TimeZone>(results: &[SearchResult], out: &mut impl Write, tz: &Tz) -> std::io::Result<()>
where
	Tz::Offset: Display,
{
	let width = column_width(results);

	for result in results {
		writeln!(out, "{}", render_line(result, width, tz))?;
	}
	writeln!(out)
}
