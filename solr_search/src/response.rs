//! Decoding of the json returned by the solr endpoint.
//!
//! Decoding is lenient: only the first json value of the body is looked at, keys are matched case-insensitively
//! if there's no exact match, `null`s leave the field empty and unknown fields are ignored. A value of the wrong
//! type leaves its field empty as well, but makes the decoding fail, with everything that could be decoded
//! available through [SearchError::Decode].

use std::fmt::{Display, Formatter};
use serde_json::{Deserializer, Map, Value};
use crate::SearchError;

/// The json returned by the solr endpoint, only the parts that are used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
	pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseBody {
	pub docs: Vec<SearchResult>,
}

/// One found artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
	/// Either `group:artifact` or, for the `gav` core, `group:artifact:version`.
	pub id: String,
	/// Empty for the `gav` core.
	pub latest_version: String,
	/// Milliseconds since the epoch.
	pub timestamp: i64,
}

impl ResponseEnvelope {
	pub fn into_results(self) -> Vec<SearchResult> {
		self.response.docs
	}
}

#[derive(Debug)]
pub enum DecodeError {
	/// The body is empty, or only whitespace.
	Empty,
	/// The body doesn't start with valid json.
	Syntax(serde_json::Error),
	/// A value has the wrong type. Only the first one is reported.
	Type {
		path: String,
		expected: &'static str,
		found: &'static str,
	},
}

impl Display for DecodeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			DecodeError::Empty => write!(f, "empty body"),
			DecodeError::Syntax(e) => write!(f, "{e}"),
			DecodeError::Type { path, expected, found } => write!(f, "expected {expected} at {path}, got {found}"),
		}
	}
}

impl std::error::Error for DecodeError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			DecodeError::Syntax(e) => Some(e),
			_ => None,
		}
	}
}

pub fn decode(body: &str) -> Result<ResponseEnvelope, SearchError> {
	// anything after the first value is ignored
	let value = match Deserializer::from_str(body).into_iter::<Value>().next() {
		Some(Ok(value)) => value,
		Some(Err(e)) => return Err(SearchError::decode(DecodeError::Syntax(e), ResponseEnvelope::default())),
		None => return Err(SearchError::decode(DecodeError::Empty, ResponseEnvelope::default())),
	};

	let mut decoder = Decoder::default();
	let envelope = decoder.envelope(&value);

	match decoder.first_error {
		None => Ok(envelope),
		Some(error) => Err(SearchError::decode(error, envelope)),
	}
}

#[derive(Default)]
struct Decoder {
	first_error: Option<DecodeError>,
}

impl Decoder {
	fn mismatch(&mut self, path: &str, expected: &'static str, found: &Value) {
		if self.first_error.is_none() {
			self.first_error = Some(DecodeError::Type { path: path.to_owned(), expected, found: kind(found) });
		}
	}

	/// `None` for `null`, and for anything that isn't an object.
	fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
		match value {
			Value::Object(object) => Some(object),
			Value::Null => None,
			other => {
				self.mismatch(path, "an object", other);
				None
			},
		}
	}

	fn string(&mut self, value: &Value, path: &str) -> Option<String> {
		match value {
			Value::String(string) => Some(string.clone()),
			Value::Null => None,
			other => {
				self.mismatch(path, "a string", other);
				None
			},
		}
	}

	fn int(&mut self, value: &Value, path: &str) -> Option<i64> {
		match value {
			Value::Null => None,
			other => {
				let int = other.as_i64();
				if int.is_none() {
					self.mismatch(path, "a 64 bit integer", other);
				}
				int
			},
		}
	}

	fn envelope(&mut self, value: &Value) -> ResponseEnvelope {
		let response = self.object(value, "body")
			.and_then(|object| field(object, "response"))
			.map(|response| self.body(response))
			.unwrap_or_default();

		ResponseEnvelope { response }
	}

	fn body(&mut self, value: &Value) -> ResponseBody {
		let docs = match self.object(value, "response").and_then(|object| field(object, "docs")) {
			Some(Value::Array(docs)) => docs.iter()
				.enumerate()
				// a doc of the wrong type still takes up a (then empty) row
				.map(|(index, doc)| self.doc(doc, &format!("response.docs[{index}]")))
				.collect(),
			Some(Value::Null) | None => Vec::new(),
			Some(other) => {
				self.mismatch("response.docs", "an array", other);
				Vec::new()
			},
		};

		ResponseBody { docs }
	}

	fn doc(&mut self, value: &Value, path: &str) -> SearchResult {
		let mut result = SearchResult::default();

		if let Some(object) = self.object(value, path) {
			if let Some(id) = field(object, "id").and_then(|id| self.string(id, &format!("{path}.id"))) {
				result.id = id;
			}
			if let Some(latest_version) = field(object, "latestVersion")
					.and_then(|latest_version| self.string(latest_version, &format!("{path}.latestVersion"))) {
				result.latest_version = latest_version;
			}
			if let Some(timestamp) = field(object, "timestamp").and_then(|timestamp| self.int(timestamp, &format!("{path}.timestamp"))) {
				result.timestamp = timestamp;
			}
		}

		result
	}
}

/// Prefers the exact key, but falls back to a key differing only in case.
fn field<'v>(object: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
	object.get(name)
		.or_else(|| {
			object.iter()
				.find(|(key, _)| key.eq_ignore_ascii_case(name))
				.map(|(_, value)| value)
		})
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a bool",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
