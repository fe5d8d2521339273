use url::Url;

/// The url of the search endpoint of maven central.
pub const DEFAULT_ENDPOINT: &str = "https://search.maven.org/solrsearch/select";

/// How many rows are requested if nothing else is specified.
pub const DEFAULT_MAX_RESULTS: i64 = 20;

/// The structured part of a search.
///
/// Empty strings are treated the same as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
	pub group_id: Option<String>,
	pub artifact_id: Option<String>,
	pub version: Option<String>,
	/// Search the `gav` core, listing every version instead of only the latest one per artifact.
	pub all_versions: bool,
	/// Passed as is, the service decides what to do with zero or negative values.
	pub max_results: i64,
}

impl Default for SearchFilters {
	fn default() -> Self {
		SearchFilters {
			group_id: None,
			artifact_id: None,
			version: None,
			all_versions: false,
			max_results: DEFAULT_MAX_RESULTS,
		}
	}
}

impl SearchFilters {
	/// Whether there's a filter that makes a search without free text meaningful.
	pub fn has_coordinate_filter(&self) -> bool {
		non_empty(&self.group_id).is_some() || non_empty(&self.artifact_id).is_some()
	}

	/// Builds the solr query, in the order free text, `g`, `a`, `v`.
	///
	/// ```
	/// use solr_search::query::SearchFilters;
	/// let filters = SearchFilters {
	///     group_id: Some("com.google.guava".to_owned()),
	///     version: Some("33.0.0-jre".to_owned()),
	///     ..SearchFilters::default()
	/// };
	/// assert_eq!(filters.query(Some("guava")), r#"guava AND g:"com.google.guava" AND v:"33.0.0-jre""#);
	/// assert_eq!(filters.query(None), r#"g:"com.google.guava" AND v:"33.0.0-jre""#);
	/// ```
	pub fn query(&self, text: Option<&str>) -> String {
		let terms = [
			("g", &self.group_id),
			("a", &self.artifact_id),
			("v", &self.version),
		];

		let mut query = text.filter(|text| !text.is_empty())
			.map(ToOwned::to_owned)
			.unwrap_or_default();

		for (key, value) in terms {
			if let Some(value) = non_empty(value) {
				if !query.is_empty() {
					query.push_str(" AND ");
				}
				query.push_str(&format!("{key}:\"{value}\""));
			}
		}

		query
	}

	/// The parameters of the request, sorted by key.
	pub fn params(&self, text: Option<&str>) -> Vec<(&'static str, String)> {
		let mut params = Vec::with_capacity(4);
		if self.all_versions {
			params.push(("core", "gav".to_owned()));
		}
		params.push(("q", self.query(text)));
		params.push(("rows", self.max_results.to_string()));
		params.push(("wt", "json".to_owned()));
		params
	}

	/// Appends the (form url encoded) parameters to the query of `endpoint`.
	pub fn url(&self, endpoint: &Url, text: Option<&str>) -> Url {
		let mut url = endpoint.clone();
		url.query_pairs_mut()
			.extend_pairs(self.params(text));
		url
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|value| !value.is_empty())
}
