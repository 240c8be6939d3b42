// src/cli/browse.rs
use crate::application::{
    ApplyOutcome, Debouncer, Fetched, ListStart, NotesBrowser, NotesService, QueryCoordinator,
};
use crate::domain::{DomainError, NotesPage, TagFilter};
use crate::ports::TerminalPresenter;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, info};

pub const HELP: &str = "Type to search. Commands: :tag <All|Todo|Work|Personal|Meeting|Shopping>, \
:page <n>, :next, :prev, :help, :quit";

/// One line of input in the interactive list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    /// Current content of the search box
    Search(String),
    Tag(TagFilter),
    Page(u32),
    Next,
    Previous,
    Help,
    Quit,
    Invalid(String),
}

impl BrowseInput {
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return BrowseInput::Search(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("q" | "quit"), None) => BrowseInput::Quit,
            (Some("h" | "help"), None) => BrowseInput::Help,
            (Some("n" | "next"), None) => BrowseInput::Next,
            (Some("p" | "prev"), None) => BrowseInput::Previous,
            (Some("tag"), Some(segment)) => match segment.parse() {
                Ok(filter) => BrowseInput::Tag(filter),
                Err(e) => BrowseInput::Invalid(e.to_string()),
            },
            (Some("page"), Some(n)) => match n.parse() {
                Ok(n) => BrowseInput::Page(n),
                Err(_) => BrowseInput::Invalid(format!("not a page number: {n}")),
            },
            _ => BrowseInput::Invalid(format!("unknown command :{command}")),
        }
    }
}

/// Interactive session on stdin and stdout.
pub async fn run_browse<S: NotesService + 'static>(
    coordinator: &mut QueryCoordinator<S>,
    presenter: &TerminalPresenter,
    tag: TagFilter,
    debounce: Duration,
) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    browse_session(coordinator, presenter, tag, debounce, input, std::io::stdout()).await
}

/// Input lines feed the debouncer, committed terms and commands drive the
/// filter context, and list fetches run in the background while input keeps
/// flowing. Only the latest query's answer is rendered; until it arrives the
/// previous page stays on screen. Remote errors are shown as notices and the
/// session keeps running.
pub async fn browse_session<S, R, W>(
    coordinator: &mut QueryCoordinator<S>,
    presenter: &TerminalPresenter,
    tag: TagFilter,
    debounce: Duration,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: NotesService + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut browser = NotesBrowser::new(tag);
    let (keys, mut commits) = Debouncer::new(debounce).spawn();
    let mut lines = input.lines();
    let mut in_flight: JoinSet<Fetched> = JoinSet::new();

    info!(%tag, "Starting browse session");
    writeln!(out, "{HELP}")?;
    refresh(coordinator, &mut browser, &mut in_flight, presenter, &mut out)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let changed = match BrowseInput::parse(&line) {
                    BrowseInput::Quit => break,
                    BrowseInput::Help => {
                        writeln!(out, "{HELP}")?;
                        Ok(false)
                    }
                    BrowseInput::Search(text) => {
                        keys.input(text);
                        Ok(false)
                    }
                    BrowseInput::Tag(filter) => Ok(browser.set_tag(filter)),
                    BrowseInput::Page(n) => browser.set_page(n).map(|()| true),
                    BrowseInput::Next => browser.next_page().map(|()| true),
                    BrowseInput::Previous => browser.previous_page().map(|()| true),
                    BrowseInput::Invalid(msg) => {
                        writeln!(out, "{msg}. {HELP}")?;
                        Ok(false)
                    }
                };
                match changed {
                    Ok(true) => refresh(coordinator, &mut browser, &mut in_flight, presenter, &mut out)?,
                    Ok(false) => {}
                    Err(e) => report(presenter, &e, &mut out)?,
                }
            }
            Some(text) = commits.recv() => {
                if browser.commit_search(text) {
                    refresh(coordinator, &mut browser, &mut in_flight, presenter, &mut out)?;
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                let (request, result) = joined.context("List fetch task failed")?;
                match coordinator.apply(request, result) {
                    Ok(ApplyOutcome::Applied) => {
                        if let Some(page) = coordinator.visible() {
                            show(&mut browser, page, presenter, &mut out)?;
                        }
                    }
                    Ok(ApplyOutcome::Superseded) => {}
                    Err(e) => report(presenter, &e, &mut out)?,
                }
            }
        }
    }

    debug!(abandoned = in_flight.len(), "Browse session ended");
    Ok(())
}

/// Serve the current query from cache or start fetching it in the background.
fn refresh<S: NotesService + 'static, W: Write>(
    coordinator: &mut QueryCoordinator<S>,
    browser: &mut NotesBrowser,
    in_flight: &mut JoinSet<Fetched>,
    presenter: &TerminalPresenter,
    out: &mut W,
) -> io::Result<()> {
    match coordinator.start(browser.query()) {
        ListStart::Cached(page) => show(browser, &page, presenter, out),
        ListStart::Fetch(fetch) => {
            in_flight.spawn(fetch);
            writeln!(out, "Searching…")
        }
    }
}

fn show<W: Write>(
    browser: &mut NotesBrowser,
    page: &NotesPage,
    presenter: &TerminalPresenter,
    out: &mut W,
) -> io::Result<()> {
    browser.observe(page);
    write!(out, "{}", presenter.render_page(page, browser.text(), browser.tag()))
}

fn report<W: Write>(presenter: &TerminalPresenter, err: &DomainError, out: &mut W) -> io::Result<()> {
    debug!(error = %err, "Showing error notice");
    writeln!(out, "{}", presenter.render_notice(&err.notice()))
}
