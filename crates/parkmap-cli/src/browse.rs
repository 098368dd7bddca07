//! Interactive browse loop.
//!
//! Each input line is either a query, `:<n>` to open result `n` from the last
//! query, or `:q` to quit.

use std::io::Write;
use std::sync::Arc;

use parkmap_core::RendererConfig;
use parkmap_engine::{ConsoleRenderer, RankedRecord, SessionState, StaticGeolocator};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::feeds::FeedChoice;
use crate::search::{format_hit, header};
use crate::session::open_session;

/// Results listed per query.
const PAGE_SIZE: usize = 15;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BrowseInput {
    Quit,
    /// 1-based position in the last result list.
    Select(usize),
    Query(String),
    Blank,
    Invalid(String),
}

pub(crate) fn parse_input(line: &str) -> BrowseInput {
    let line = line.trim();
    if line.is_empty() {
        return BrowseInput::Blank;
    }
    let Some(command) = line.strip_prefix(':') else {
        return BrowseInput::Query(line.to_string());
    };
    match command.trim() {
        "q" | "quit" => BrowseInput::Quit,
        n => match n.parse::<usize>() {
            Ok(n) if n > 0 => BrowseInput::Select(n),
            _ => BrowseInput::Invalid(format!("unknown command ':{n}'")),
        },
    }
}

/// Runs the browse loop on stdin until `:q` or end of input.
///
/// # Errors
///
/// Returns an error if the session cannot start or stdin cannot be read.
pub(crate) async fn run_browse(
    feeds: Arc<FeedChoice>,
    geolocator: Arc<StaticGeolocator>,
    config: &RendererConfig,
) -> anyhow::Result<()> {
    let renderer = ConsoleRenderer::new(std::io::stdout(), config, false);
    let mut session = open_session(renderer, feeds, geolocator, config).await?;
    if session.state() == SessionState::Failed {
        eprintln!("warning: no parking data loaded; searches will find nothing");
    }
    println!("type a search, ':<n>' to open a result, ':q' to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut results: Vec<RankedRecord> = Vec::new();

    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_input(&line) {
            BrowseInput::Quit => break,
            BrowseInput::Blank => {}
            BrowseInput::Invalid(message) => eprintln!("{message}"),
            BrowseInput::Query(query) => {
                results = session.search(&query);
                print_results(&query, &results);
            }
            BrowseInput::Select(n) => match results.get(n - 1) {
                Some(hit) => {
                    if session.select(&hit.record).is_none() {
                        eprintln!("'{}' has no map position", hit.record.label());
                    }
                }
                None => eprintln!("no result {n}; the last search listed {}", results.len()),
            },
        }
    }

    session.teardown();
    Ok(())
}

fn print_results(query: &str, results: &[RankedRecord]) {
    if results.is_empty() {
        println!("no parking matches '{query}'");
        return;
    }
    println!("{}", header());
    for (n, hit) in results.iter().take(PAGE_SIZE).enumerate() {
        println!("{}", format_hit(n + 1, hit));
    }
    if results.len() > PAGE_SIZE {
        println!("... {} more; refine the search", results.len() - PAGE_SIZE);
    }
}

fn prompt() {
    let mut out = std::io::stdout();
    if write!(out, "parkmap> ").and_then(|()| out.flush()).is_err() {
        tracing::debug!("prompt write failed");
    }
}
