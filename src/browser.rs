/// Browser Module
///
/// A browsing session: resolves locations into routes, drives the matching
/// view and renders the result. Interactive mode reads one location per line
/// and fetches in the background; only the newest navigation is rendered.
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::api::IndexerApi;
use crate::config::ChainSetting;
use crate::error::ApiError;
use crate::models::{Envelope, Event, ListResult};
use crate::render::{detail_json, events_json, render_detail, render_events};
use crate::route::Route;
use crate::views::events::{fetch_page, EventsView, ListState};
use crate::views::field::RenderContext;
use crate::views::{load_detail, DetailPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

/// Result of a background fetch, tagged with the navigation that issued it
enum Loaded {
    Events { nav: u64, seq: u64, response: Result<Envelope<ListResult<Event>>, ApiError> },
    Detail { nav: u64, route: Route, result: Result<DetailPage, ApiError> },
}

impl Loaded {
    fn nav(&self) -> u64 {
        match self {
            Loaded::Events { nav, .. } | Loaded::Detail { nav, .. } => *nav,
        }
    }
}

pub struct Browser {
    api: Arc<dyn IndexerApi>,
    chain: ChainSetting,
    output: OutputMode,
    events: EventsView,
    nav: u64,
}

impl Browser {
    pub fn new(api: Arc<dyn IndexerApi>, chain: ChainSetting, output: OutputMode) -> Self {
        Self { api, chain, output, events: EventsView::new(), nav: 0 }
    }

    /// Open `location`, wait for its data and return the rendered page
    pub async fn open(&mut self, location: &str) -> Result<String> {
        let route = Route::parse(location)?;
        self.nav += 1;

        match route {
            Route::Events { .. } => {
                self.events.load(self.api.as_ref(), location).await;
                if let ListState::Failed(message) = self.events.state() {
                    anyhow::bail!("Failed to load {}: {}", location, message);
                }
                self.render_events()
            }
            route => {
                let page = load_detail(self.api.as_ref(), &route, &self.chain)
                    .await
                    .with_context(|| format!("Failed to load {}", route))?;
                self.render_detail(&page)
            }
        }
    }

    /// Read locations from `input` until EOF or `quit`, writing pages to `out`
    pub async fn browse<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Loaded>();
        let mut lines = input.lines();
        let mut input_open = true;
        let mut pending = false;

        loop {
            if !input_open && !pending {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line.context("Failed to read location")? else {
                        input_open = false;
                        continue;
                    };
                    let location = line.trim();
                    if location.is_empty() {
                        continue;
                    }
                    if matches!(location, "q" | "quit" | "exit") {
                        input_open = false;
                        continue;
                    }
                    match self.start(location, &tx) {
                        Ok(()) => pending = true,
                        Err(e) => writeln!(out, "⚠️  {}", e)?,
                    }
                }
                Some(loaded) = rx.recv() => {
                    if let Some(text) = self.finish(loaded)? {
                        writeln!(out, "{}", text)?;
                        pending = false;
                    }
                }
            }
        }

        Ok(())
    }

    /// Begin a navigation in the background
    fn start(&mut self, location: &str, tx: &mpsc::UnboundedSender<Loaded>) -> Result<()> {
        let route = Route::parse(location)?;
        self.nav += 1;
        let nav = self.nav;
        let api = Arc::clone(&self.api);
        let tx = tx.clone();

        tracing::debug!("Navigation {} to {}", nav, route);

        match route {
            Route::Events { .. } => {
                let request = self.events.navigate(location);
                tokio::spawn(async move {
                    let response = fetch_page(api.as_ref(), &request).await;
                    let _ = tx.send(Loaded::Events { nav, seq: request.seq, response });
                });
            }
            route => {
                let chain = self.chain.clone();
                tokio::spawn(async move {
                    let result = load_detail(api.as_ref(), &route, &chain).await;
                    let _ = tx.send(Loaded::Detail { nav, route, result });
                });
            }
        }

        Ok(())
    }

    /// Apply a finished fetch; `None` when it was superseded by a later navigation
    fn finish(&mut self, loaded: Loaded) -> Result<Option<String>> {
        if loaded.nav() != self.nav {
            tracing::debug!("Ignoring response for navigation {} (current {})", loaded.nav(), self.nav);
            return Ok(None);
        }

        match loaded {
            Loaded::Events { seq, response, .. } => {
                if !self.events.apply(seq, response) {
                    return Ok(None);
                }
                self.render_events().map(Some)
            }
            Loaded::Detail { result: Ok(page), .. } => self.render_detail(&page).map(Some),
            Loaded::Detail { route, result: Err(e), .. } => Ok(Some(format!("❌ Failed to load {}: {}", route, e))),
        }
    }

    fn render_events(&self) -> Result<String> {
        match self.output {
            OutputMode::Table => Ok(render_events(&self.events, &RenderContext::new(Utc::now()))),
            OutputMode::Json => events_json(&self.events).context("Failed to serialize events"),
        }
    }

    fn render_detail(&self, page: &DetailPage) -> Result<String> {
        match self.output {
            OutputMode::Table => Ok(render_detail(page, &RenderContext::new(Utc::now()))),
            OutputMode::Json => detail_json(page).context("Failed to serialize detail page"),
        }
    }
}
