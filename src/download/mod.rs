use std::future::Future;
use log::trace;
use reqwest::{Client, StatusCode};
use solr_search::{Downloader, RawResponse, SearchError};
use url::Url;

/// Downloads with a [reqwest::Client]. A single attempt, without timeout.
#[derive(Debug)]
pub(crate) struct HttpDownloader {
	client: Client,
}

impl HttpDownloader {
	pub(crate) fn new() -> HttpDownloader {
		HttpDownloader {
			client: Client::new(),
		}
	}
}

impl Downloader for HttpDownloader {
	// note: can't rewrite with async, bc of `+ Send`
	#[allow(clippy::manual_async_fn)]
	fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, SearchError>> + Send {
		async move {
			let response = self.client.get(url.clone())
				.send().await
				.map_err(SearchError::transport)?;

			let status = response.status();
			trace!("got a {status:?} for {url}");

			// the body of anything else isn't looked at, dropping the response releases the connection
			let body = if status == StatusCode::OK {
				response.text().await
					.map_err(SearchError::transport)?
			} else {
				String::new()
			};

			Ok(RawResponse { status: status.as_u16(), body })
		}
	}
}
