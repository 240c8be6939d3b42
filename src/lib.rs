// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{NotesService, QueryCoordinator};
use cli::args::{Args, Command};
use domain::{Draft, DomainError, Notice, SearchQuery};
use infrastructure::{renderer::ContentRenderer, Config, HttpNotesService};
use ports::{HtmlPresenter, TerminalPresenter};
use std::path::PathBuf;
use tracing::{debug, info};

pub async fn run(args: Args) -> Result<()> {
    debug!(command = ?args.command, "Starting notehub");
    let presenter = TerminalPresenter::new();
    let settings = Settings {
        config: args.config,
        base_url: args.base_url,
        token: args.token,
    };

    // Execute use case
    match args.command {
        Command::List {
            search,
            tag,
            page,
            json,
        } => {
            let (mut coordinator, _) = settings.connect(&presenter)?;
            let query = SearchQuery::new(search, page, tag);
            list_notes(&mut coordinator, &presenter, query, json).await
        }
        Command::View { note_id, json } => {
            let (mut coordinator, _) = settings.connect(&presenter)?;
            view_note(&mut coordinator, &presenter, &note_id, json).await
        }
        Command::Create {
            title,
            content,
            tag,
        } => {
            let (mut coordinator, _) = settings.connect(&presenter)?;
            create_note(&mut coordinator, &presenter, Draft::new(title, content, tag)).await
        }
        Command::Delete { note_id } => {
            let (mut coordinator, _) = settings.connect(&presenter)?;
            delete_note(&mut coordinator, &presenter, &note_id).await
        }
        Command::Browse { tag } => {
            let (mut coordinator, config) = settings.connect(&presenter)?;
            cli::browse::run_browse(
                &mut coordinator,
                &presenter,
                tag,
                config.search.debounce_delay(),
            )
            .await
        }
        Command::InitConfig { force } => init_config(settings.config, force),
    }
}

/// Connection inputs taken from global flags and the environment.
struct Settings {
    config: Option<PathBuf>,
    base_url: Option<String>,
    token: Option<String>,
}

impl Settings {
    fn connect(
        self,
        presenter: &TerminalPresenter,
    ) -> Result<(QueryCoordinator<HttpNotesService>, Config)> {
        // Initialize infrastructure
        let mut config = Config::resolve(self.config.as_deref())?;
        if let Some(base_url) = self.base_url {
            debug!(%base_url, "Overriding base URL");
            config.api.base_url = base_url;
        }
        debug!(?config, "Resolved configuration");

        let service = HttpNotesService::from_config(&config.api, self.token.unwrap_or_default())
            .map_err(|e| notify(presenter, e))?;

        // Initialize application
        Ok((QueryCoordinator::new(service), config))
    }
}

/// Show the user-facing notice for `err` and hand it on for the exit status.
fn notify(presenter: &TerminalPresenter, err: DomainError) -> anyhow::Error {
    eprintln!("{}", presenter.render_error(&err));
    anyhow::Error::new(err)
}

async fn list_notes<S: NotesService>(
    coordinator: &mut QueryCoordinator<S>,
    presenter: &TerminalPresenter,
    query: SearchQuery,
    json: bool,
) -> Result<()> {
    info!(?query, "Listing notes");
    let text = query.text.clone();
    let tag = query.tag;
    let page = coordinator
        .list(query)
        .await
        .map_err(|e| notify(presenter, e))?;

    if json {
        let out = serde_json::to_string_pretty(&page).context("Failed to serialize notes page")?;
        println!("{out}");
    } else {
        print!("{}", presenter.render_page(&page, &text, tag));
    }
    Ok(())
}

async fn view_note<S: NotesService>(
    coordinator: &mut QueryCoordinator<S>,
    presenter: &TerminalPresenter,
    note_id: &str,
    json: bool,
) -> Result<()> {
    info!(note_id, "Viewing note");
    let note = coordinator
        .get(note_id)
        .await
        .map_err(|e| notify(presenter, e))?;
    debug!(?note, "Retrieved note");

    if json {
        let out = serde_json::to_string_pretty(&note).context("Failed to serialize note")?;
        println!("{out}");
        return Ok(());
    }

    let html = HtmlPresenter::new().render(&note);
    let mut renderer = ContentRenderer::new();
    let temp_path = renderer.create_temp_file("note.html", &html)?;
    renderer.open_in_browser(&temp_path)?;
    Ok(())
}

async fn create_note<S: NotesService>(
    coordinator: &mut QueryCoordinator<S>,
    presenter: &TerminalPresenter,
    draft: Draft,
) -> Result<()> {
    let mut store = application::DraftStore::new();
    store.update(|d| *d = draft);

    let note = coordinator
        .submit(&mut store)
        .await
        .map_err(|e| notify(presenter, e))
        .context("Failed to create note")?;
    println!("{}", presenter.render_notice(&Notice::success("Note created successfully")));
    println!("{}", presenter.render_note_line(&note));
    Ok(())
}

async fn delete_note<S: NotesService>(
    coordinator: &mut QueryCoordinator<S>,
    presenter: &TerminalPresenter,
    note_id: &str,
) -> Result<()> {
    let deleted = coordinator
        .remove(note_id)
        .await
        .map_err(|e| notify(presenter, e))?;
    println!(
        "{}",
        presenter.render_notice(&Notice::success(format!("Deleted note \"{}\"", deleted.title)))
    );
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_path().context("Could not find config directory")?,
    };
    if path.exists() && !force {
        bail!("Config file already exists: {} (use --force to overwrite)", path.display());
    }
    Config::create_default(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
