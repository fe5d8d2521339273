use std::ffi::OsString;
use std::io::Write;
use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, CommandFactory, Parser};
use clap::error::ErrorKind;
use log::{debug, LevelFilter};
use solr_search::query::{DEFAULT_ENDPOINT, DEFAULT_MAX_RESULTS, SearchFilters};
use url::Url;
use crate::download::HttpDownloader;

mod download;

/// CLI tool to search artifacts in maven central repository
#[derive(Debug, Parser)]
#[command(version, override_usage = "mvnsearch [options] [query]")]
struct Cli {
	/// specify groupId
	#[arg(short = 'g', value_name = "groupId")]
	group_id: Option<String>,

	/// specify artifactId
	#[arg(short = 'a', value_name = "artifactId")]
	artifact_id: Option<String>,

	/// specify version
	// `version` is the id of `--version`
	#[arg(id = "version_filter", short = 'v', value_name = "version")]
	version: Option<String>,

	/// show all versions
	#[arg(short = 'A')]
	all_versions: bool,

	/// limit number of result
	#[arg(short = 'm', value_name = "max", default_value_t = DEFAULT_MAX_RESULTS, allow_negative_numbers = true)]
	max_results: i64,

	/// The solr select endpoint to query.
	#[arg(long, value_name = "url", default_value = DEFAULT_ENDPOINT)]
	endpoint: Url,

	/// Log more to stderr, can be repeated.
	#[arg(long, action = ArgAction::Count)]
	verbose: u8,

	/// free text to search for, may only be left out if `-g` or `-a` is given
	query: Option<String>,
}

/// Parses the arguments, requiring the query if there's neither a non-empty `-g` nor `-a`.
fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
{
	let cli = Cli::try_parse_from(args)?;

	if cli.query.is_none() && !cli.filters().has_coordinate_filter() {
		return Err(Cli::command().error(
			ErrorKind::MissingRequiredArgument,
			"a query is required, unless -g or -a is given",
		));
	}

	Ok(cli)
}

/// Usage errors exit with `1`, `--help` and `--version` with `0`.
fn exit_code(error: &clap::Error) -> i32 {
	if error.use_stderr() { 1 } else { 0 }
}

impl Cli {
	fn filters(&self) -> SearchFilters {
		SearchFilters {
			group_id: self.group_id.clone(),
			artifact_id: self.artifact_id.clone(),
			version: self.version.clone(),
			all_versions: self.all_versions,
			max_results: self.max_results,
		}
	}
}

fn setup_logger(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(level)
		// the http stack is very chatty on trace
		.level_for("hyper", level.min(LevelFilter::Debug))
		.level_for("reqwest", level.min(LevelFilter::Debug))
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let cli = match parse_args(std::env::args_os()) {
		Ok(cli) => cli,
		Err(e) => {
			e.print().context("failed to print usage")?;
			std::process::exit(exit_code(&e));
		},
	};

	setup_logger(cli.verbose)?;
	debug!("{cli:?}");

	// the listing is always colored, like it's meant to be pasted into a colored terminal
	colored::control::set_override(true);

	let mut stdout = std::io::stdout().lock();
	solr_search::run(&HttpDownloader::new(), &cli.endpoint, &cli.filters(), cli.query.as_deref(), &mut stdout, &Local).await
		.context("failed to write the results")?;
	stdout.flush()
		.context("failed to write the results")?;

	Ok(())
}

#[cfg(test)]
mod testing {
	use clap::CommandFactory;
	use clap::error::ErrorKind;
	use pretty_assertions::assert_eq;
	use solr_search::query::SearchFilters;
	use crate::{Cli, exit_code, parse_args};

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn query_only() {
		let cli = parse_args(["mvnsearch", "guava"]).unwrap();
		assert_eq!(cli.query.as_deref(), Some("guava"));
		assert_eq!(cli.filters(), SearchFilters::default());
		assert_eq!(cli.endpoint.as_str(), "https://search.maven.org/solrsearch/select");
	}

	#[test]
	fn all_flags() {
		let cli = parse_args([
			"mvnsearch", "-g", "org.ow2.asm", "-a", "asm", "-v", "9.7", "-A", "-m", "5", "bytecode",
		]).unwrap();
		assert_eq!(cli.query.as_deref(), Some("bytecode"));
		assert_eq!(cli.filters(), SearchFilters {
			group_id: Some("org.ow2.asm".to_owned()),
			artifact_id: Some("asm".to_owned()),
			version: Some("9.7".to_owned()),
			all_versions: true,
			max_results: 5,
		});
	}

	#[test]
	fn filters_without_query() {
		let cli = parse_args(["mvnsearch", "-g", "org.ow2.asm"]).unwrap();
		assert_eq!(cli.query, None);

		let cli = parse_args(["mvnsearch", "-a", "asm"]).unwrap();
		assert_eq!(cli.query, None);
	}

	#[test]
	fn no_query_and_no_coordinate_filter() {
		let e = parse_args(["mvnsearch"]).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
		assert_eq!(exit_code(&e), 1);

		// a version alone isn't enough
		let e = parse_args(["mvnsearch", "-v", "1.0"]).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
		assert_eq!(exit_code(&e), 1);

		// neither are empty ones
		let e = parse_args(["mvnsearch", "-g", "", "-a", ""]).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
		assert_eq!(exit_code(&e), 1);
	}

	#[test]
	fn empty_filters_are_ignored() {
		let cli = parse_args(["mvnsearch", "-g", "", "guava"]).unwrap();
		assert_eq!(cli.query.as_deref(), Some("guava"));
		assert_eq!(cli.filters().query(cli.query.as_deref()), "guava");
	}

	#[test]
	fn two_queries() {
		let e = parse_args(["mvnsearch", "guava", "guice"]).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::UnknownArgument);
		assert_eq!(exit_code(&e), 1);
	}

	#[test]
	fn max_results_is_passed_as_is() {
		let cli = parse_args(["mvnsearch", "-m", "-1", "guava"]).unwrap();
		assert_eq!(cli.filters().max_results, -1);
		assert_eq!(cli.query.as_deref(), Some("guava"));
	}

	#[test]
	fn bad_values() {
		for args in [
			&["mvnsearch", "-m", "many", "guava"][..],
			&["mvnsearch", "--endpoint", "not a url", "guava"],
			&["mvnsearch", "-x", "guava"],
		] {
			let e = parse_args(args).unwrap_err();
			assert_eq!(exit_code(&e), 1, "{args:?}");
		}
	}

	#[test]
	fn help_and_version_are_not_usage_errors() {
		let e = parse_args(["mvnsearch", "--help"]).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::DisplayHelp);
		assert_eq!(exit_code(&e), 0);

		let e = parse_args(["mvnsearch", "-V"]).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::DisplayVersion);
		assert_eq!(exit_code(&e), 0);
	}
}
