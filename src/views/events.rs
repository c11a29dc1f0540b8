/// Events Module
///
/// The paginated events list: page resolution, fetching, and row mapping.
///
/// Every navigation is numbered. A response is only applied when it belongs
/// to the newest navigation, so a slow response for an earlier page can never
/// overwrite a later one.
use crate::api::{fetch, IndexerApi, QueryPair};
use crate::config::PAGE_SIZE;
use crate::error::ApiError;
use crate::models::{Envelope, Event, ListResult};
use crate::query::page_from_query;
use crate::route::{block_href, event_href, extrinsic_href};
use crate::views::detail::{composite_label, height_label};
use crate::views::field::{Field, Link};
use crate::views::pagination::Pagination;

pub const EVENTS_PATH: &str = "/events";

pub const EVENTS_HEAD: [&str; 6] = ["Event ID", "Block", "Time", "Extrinsic ID", "Action", "Data"];

/// Presentational cells of one events table row
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub event_id: Field,
    pub block: Field,
    pub time: Field,
    pub extrinsic_id: Field,
    pub action: Field,
    pub data: Field,
}

impl EventRow {
    pub fn cells(&self) -> [&Field; 6] {
        [&self.event_id, &self.block, &self.time, &self.extrinsic_id, &self.action, &self.data]
    }
}

pub fn to_event_row(event: &Event) -> EventRow {
    let indexer = event.indexer();
    let height = indexer.block_height;

    EventRow {
        event_id: Field::Link(Link::new(
            event_href(height, indexer.event_index),
            composite_label(height, indexer.event_index),
        )),
        block: Field::Link(Link::new(block_href(height), height_label(height))),
        // Raw block time, as the indexer sent it
        time: Field::Text(indexer.block_time.map(|ts| ts.to_string())),
        extrinsic_id: Field::Link(Link::new(
            extrinsic_href(height, indexer.extrinsic_index),
            composite_label(height, indexer.extrinsic_index),
        )),
        action: Field::text(format!(
            "{}({})",
            event.section.as_deref().unwrap_or_default(),
            event.method.as_deref().unwrap_or_default()
        )),
        data: Field::Json(event.args.clone()),
    }
}

/// A page fetch issued by one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    /// 1-based page shown to the user
    pub page: u32,
}

impl PageRequest {
    /// Query sent to the indexer, whose pages are 0-based
    pub fn query(&self) -> Vec<QueryPair> {
        vec![("page", self.page.saturating_sub(1).to_string())]
    }
}

pub async fn fetch_page<A>(api: &A, request: &PageRequest) -> Result<Envelope<ListResult<Event>>, ApiError>
where
    A: IndexerApi + ?Sized,
{
    fetch(api, EVENTS_PATH, &request.query()).await
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
pub struct EventsView {
    page: u32,
    seq: u64,
    events: Option<Vec<Event>>,
    total: u64,
    state: ListState,
}

impl Default for EventsView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventsView {
    pub fn new() -> Self {
        Self { page: 1, seq: 0, events: None, total: 0, state: ListState::Loading }
    }

    /// Start a navigation to `location`: clear the rows and issue a page request
    pub fn navigate(&mut self, location: &str) -> PageRequest {
        self.seq += 1;
        self.page = page_from_query(location);
        self.events = None;
        self.state = ListState::Loading;

        PageRequest { seq: self.seq, page: self.page }
    }

    /// Apply a response; returns false when it belongs to a superseded navigation
    pub fn apply(&mut self, seq: u64, response: Result<Envelope<ListResult<Event>>, ApiError>) -> bool {
        if seq != self.seq {
            tracing::warn!("Dropping stale events response (request {}, current {})", seq, self.seq);
            return false;
        }

        match response {
            Ok(envelope) => {
                let result = envelope.result.unwrap_or_default();
                self.events = Some(result.items.unwrap_or_default());
                self.total = result.total.unwrap_or(0);
                self.state = ListState::Loaded;
                tracing::info!(
                    "Loaded events page {} ({} rows, {} total)",
                    self.page,
                    self.events.as_ref().map_or(0, Vec::len),
                    self.total
                );
            }
            Err(e) => {
                tracing::warn!("Failed to load events page {}: {}", self.page, e);
                self.state = ListState::Failed(e.to_string());
            }
        }
        true
    }

    /// Navigate to `location` and wait for its page
    pub async fn load<A>(&mut self, api: &A, location: &str)
    where
        A: IndexerApi + ?Sized,
    {
        let request = self.navigate(location);
        let response = fetch_page(api, &request).await;
        self.apply(request.seq, response);
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn events(&self) -> Option<&[Event]> {
        self.events.as_deref()
    }

    /// Table rows, `None` while loading
    pub fn rows(&self) -> Option<Vec<EventRow>> {
        self.events.as_ref().map(|events| events.iter().map(to_event_row).collect())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, PAGE_SIZE, self.total)
    }
}
