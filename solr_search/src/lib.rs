//! Searching a maven central like solr index, and printing the results.
//!
//! The transport is abstracted by [Downloader], so that the whole pipeline from [SearchFilters] to the printed
//! listing can be run without network access.
pub mod coord;
pub mod format;
pub mod query;
pub mod response;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::io::Write;
use chrono::TimeZone;
use log::{debug, trace};
use url::Url;
use crate::query::SearchFilters;
use crate::response::{DecodeError, ResponseEnvelope, SearchResult};

/// The status code and body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
	pub status: u16,
	/// Only required to be filled for status `200`.
	pub body: String,
}

/// Makes the GET requests for a search.
///
/// Implementations make exactly one attempt, errors are reported as [SearchError::Transport].
pub trait Downloader {
	// note: can't rewrite with async, bc of `+ Send`
	#[allow(clippy::manual_async_fn)]
	fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, SearchError>> + Send;
}

/// Everything that can go wrong with a search request.
#[derive(Debug)]
pub enum SearchError {
	/// The request couldn't be made, or the body couldn't be read.
	Transport(Box<dyn std::error::Error + Send + Sync>),
	/// A status code other than `200`.
	Status(u16),
	/// The body isn't the expected json. Anything that could still be decoded is kept in `partial`.
	Decode {
		error: DecodeError,
		partial: ResponseEnvelope,
	},
}

impl SearchError {
	pub fn transport(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> SearchError {
		SearchError::Transport(error.into())
	}

	pub fn decode(error: DecodeError, partial: ResponseEnvelope) -> SearchError {
		SearchError::Decode { error, partial }
	}

	/// The results that were decoded despite the error, empty for anything but [SearchError::Decode].
	pub fn into_partial_results(self) -> Vec<SearchResult> {
		match self {
			SearchError::Decode { partial, .. } => partial.into_results(),
			_ => Vec::new(),
		}
	}

	/// The line shown to the user instead of the results.
	pub fn warning(&self) -> String {
		let detail = match self {
			SearchError::Transport(e) => e.to_string(),
			SearchError::Status(status) => status.to_string(),
			SearchError::Decode { error, .. } => error.to_string(),
		};
		format!("Returns status code {detail}. Please try it again.")
	}
}

impl Display for SearchError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SearchError::Transport(e) => write!(f, "request failed: {e}"),
			SearchError::Status(status) => write!(f, "got status code {status}"),
			SearchError::Decode { error, .. } => write!(f, "failed to decode response: {error}"),
		}
	}
}

impl std::error::Error for SearchError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			SearchError::Transport(e) => Some(e.as_ref()),
			SearchError::Status(_) => None,
			SearchError::Decode { error, .. } => Some(error),
		}
	}
}

/// Makes the request, and decodes the body if the status is `200`.
pub async fn fetch(downloader: &impl Downloader, url: &Url) -> Result<ResponseEnvelope, SearchError> {
	trace!("requesting {url}");
	let response = downloader.get(url).await?;

	if response.status != 200 {
		return Err(SearchError::Status(response.status));
	}

	let envelope = response::decode(&response.body)?;
	trace!("got {} results", envelope.response.docs.len());
	Ok(envelope)
}

/// Searches and prints the listing to `out`.
///
/// A failed request doesn't make this fail: a warning is printed instead, followed by the listing of whatever
/// could be decoded (usually nothing). Only errors writing to `out` are returned.
pub async fn run<Tz: TimeZone>(
	downloader: &impl Downloader,
	endpoint: &Url,
	filters: &SearchFilters,
	text: Option<&str>,
	out: &mut impl Write,
	tz: &Tz,
) -> std::io::Result<()>
where
	Tz::Offset: Display,
{
	let url = filters.url(endpoint, text);

	let results = match fetch(downloader, &url).await {
		Ok(envelope) => envelope.into_results(),
		Err(e) => {
			debug!("search at {url} failed: {e:?}");
			writeln!(out, "{}", e.warning())?;
			e.into_partial_results()
		},
	};

	format::render_listing(&results, out, tz)
}
