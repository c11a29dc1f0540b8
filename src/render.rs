/// Render Module
///
/// Writes views to the terminal as psql-style tables, or as JSON.
use std::borrow::Cow;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::views::events::{EventRow, EventsView, ListState, EVENTS_HEAD, EVENTS_PATH};
use crate::views::field::{Field, RenderContext};
use crate::views::DetailPage;

/// Longest cell text before it is cut with an ellipsis
const MAX_CELL_WIDTH: usize = 60;

struct EventTableRow<'a> {
    row: &'a EventRow,
    ctx: &'a RenderContext,
}

impl Tabled for EventTableRow<'_> {
    const LENGTH: usize = 6;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        self.row.cells().iter().map(|field| Cow::from(truncate(field.plain(self.ctx)))).collect()
    }

    fn headers() -> Vec<Cow<'static, str>> {
        EVENTS_HEAD.iter().map(|head| Cow::Borrowed(*head)).collect()
    }
}

struct DetailTableRow<'a> {
    label: &'static str,
    field: &'a Field,
    ctx: &'a RenderContext,
}

impl Tabled for DetailTableRow<'_> {
    const LENGTH: usize = 2;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.label), Cow::from(self.field.plain(self.ctx))]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        vec![Cow::Borrowed("field"), Cow::Borrowed("value")]
    }
}

fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

/// Events page as text: breadcrumb, table (or state notice) and pagination footer
pub fn render_events(view: &EventsView, ctx: &RenderContext) -> String {
    let mut out = String::from("Events\n");

    match (view.state(), view.rows()) {
        (ListState::Failed(message), _) => out.push_str(&format!("❌ Failed to load events: {}\n", message)),
        (_, None) => out.push_str("Loading...\n"),
        (_, Some(rows)) if rows.is_empty() => out.push_str("No data\n"),
        (_, Some(rows)) => {
            let mut table = Table::new(rows.iter().map(|row| EventTableRow { row, ctx }));
            table.with(Style::psql());
            out.push_str(&table.to_string());
            out.push('\n');
        }
    }

    out.push_str(&view.pagination().footer(EVENTS_PATH));
    out
}

/// Detail page as text: title followed by a two-column table
pub fn render_detail(page: &DetailPage, ctx: &RenderContext) -> String {
    let ctx = ctx.with_links();
    let mut out = format!("{}\n", page.title);

    match &page.items {
        Some(items) => {
            let mut table = Table::new(items.iter().map(|(label, field)| DetailTableRow { label, field, ctx: &ctx }));
            table.with(Style::psql());
            out.push_str(&table.to_string());
        }
        None => out.push_str(&format!("🔍 No record found for {}", page.route)),
    }

    out
}

#[derive(Serialize)]
struct EventsJson<'a> {
    page: u32,
    total: u64,
    items: &'a [crate::models::Event],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct DetailJson<'a> {
    route: String,
    title: &'a str,
    items: Option<&'a crate::views::field::DetailItems>,
}

pub fn events_json(view: &EventsView) -> serde_json::Result<String> {
    let error = match view.state() {
        ListState::Failed(message) => Some(message.as_str()),
        _ => None,
    };
    serde_json::to_string_pretty(&EventsJson {
        page: view.page(),
        total: view.total(),
        items: view.events().unwrap_or_default(),
        error,
    })
}

pub fn detail_json(page: &DetailPage) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DetailJson {
        route: page.route.to_string(),
        title: &page.title,
        items: page.items.as_ref(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Envelope, Event, ListResult};
    use crate::route::Route;
    use crate::views::field::DetailItems;
    use chrono::{DateTime, Utc};

    fn ctx() -> RenderContext {
        RenderContext::new(DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap())
    }

    fn loaded_view(items: Vec<Event>, total: u64) -> EventsView {
        let mut view = EventsView::new();
        let request = view.navigate("/events?page=2");
        view.apply(request.seq, Ok(Envelope { result: Some(ListResult { items: Some(items), total: Some(total) }) }));
        view
    }

    #[test]
    fn test_render_events_table() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "indexer": { "blockHeight": 1234, "eventIndex": 2, "extrinsicIndex": 1, "blockTime": 5 },
            "section": "system",
            "method": "Remarked"
        }))
        .unwrap();

        let text = render_events(&loaded_view(vec![event], 42), &ctx());
        assert!(text.starts_with("Events\n"));
        assert!(text.contains("Event ID"));
        assert!(text.contains("1,234-2"));
        assert!(text.contains("system(Remarked)"));
        assert!(text.ends_with("Page 2 of 5 (42 total) | prev: /events | next: /events?page=3"));
    }

    #[test]
    fn test_render_events_states() {
        assert!(render_events(&loaded_view(vec![], 0), &ctx()).contains("No data"));

        let mut loading = EventsView::new();
        loading.navigate("/events");
        assert!(render_events(&loading, &ctx()).contains("Loading..."));
    }

    #[test]
    fn test_render_detail() {
        let page = DetailPage {
            title: "Block #5".to_string(),
            route: Route::Block(5),
            items: Some(DetailItems::new().with("Hash", Field::text("0x05")).with_optional("Tip", None)),
        };

        let text = render_detail(&page, &ctx());
        assert!(text.contains("Block #5"));
        assert!(text.contains("0x05"));
        assert!(!text.contains("Tip"));

        let missing = DetailPage { items: None, ..page };
        assert!(render_detail(&missing, &ctx()).contains("No record found for /block/5"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short".to_string()), "short");
        let long = "x".repeat(100);
        assert_eq!(truncate(long).chars().count(), MAX_CELL_WIDTH);
    }

    #[test]
    fn test_events_json() {
        let json = events_json(&loaded_view(vec![Event::default()], 7)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["page"], 2);
        assert_eq!(value["total"], 7);
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
        assert!(value.get("error").is_none());
    }
}
