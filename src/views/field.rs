/// Field Module
///
/// Renderable values produced by the views and the ordered detail items
/// that hold them.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::{format_age, format_time};

/// Navigation link to another explorer route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub to: String,
    pub label: String,
}

impl Link {
    pub fn new(to: impl Into<String>, label: impl Into<String>) -> Self {
        Self { to: to.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Field {
    Text(Option<String>),
    /// Milliseconds since the Unix epoch
    Time(Option<i64>),
    Link(Link),
    /// Two block links shown as `from ~ to`
    LinkRange(Link, Link),
    /// Copyable value, optionally linking somewhere
    Copyable { text: Option<String>, to: Option<String> },
    Tag(Option<String>),
    HighContrastTag(Option<String>),
    /// Full, non-ellipsized account address
    Address(Option<String>),
    Finalized(Option<bool>),
    /// Balance with a full precision tooltip and an abbreviated display value
    Balance { tooltip: Option<String>, display: Option<String> },
    /// Finalized check or pending timer
    ResultIcon(Option<bool>),
    Json(Option<serde_json::Value>),
}

/// How fields are turned into terminal text
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub now: DateTime<Utc>,
    /// Append link targets after link labels
    pub show_links: bool,
}

impl RenderContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now, show_links: false }
    }

    pub fn with_links(mut self) -> Self {
        self.show_links = true;
        self
    }
}

impl Field {
    pub fn text(value: impl Into<String>) -> Self {
        Field::Text(Some(value.into()))
    }

    /// Plain terminal text for this field; absent values render empty
    pub fn plain(&self, ctx: &RenderContext) -> String {
        match self {
            Field::Text(text) | Field::Tag(text) | Field::HighContrastTag(text) | Field::Address(text) => {
                text.clone().unwrap_or_default()
            }
            Field::Time(ts) => ts
                .and_then(|ts| {
                    let time = format_time(ts)?;
                    Some(match format_age(ts, ctx.now) {
                        Some(age) => format!("{} ({})", time, age),
                        None => time,
                    })
                })
                .unwrap_or_default(),
            Field::Link(link) => link_text(link, ctx),
            Field::LinkRange(from, to) => format!("{} ~ {}", link_text(from, ctx), link_text(to, ctx)),
            Field::Copyable { text, to } => {
                let text = text.clone().unwrap_or_default();
                match to {
                    Some(to) if ctx.show_links => format!("{} -> {}", text, to),
                    _ => text,
                }
            }
            Field::Finalized(state) => match state {
                Some(true) => "Finalized".to_string(),
                Some(false) => "Unfinalized".to_string(),
                None => String::new(),
            },
            Field::Balance { tooltip, display } => {
                let display = display.clone().unwrap_or_default();
                match tooltip {
                    Some(tooltip) if *tooltip != display => format!("{} ({})", display, tooltip),
                    _ => display,
                }
            }
            Field::ResultIcon(finalized) => {
                if finalized.unwrap_or(false) {
                    "✓ Finalized".to_string()
                } else {
                    "⏱ Pending".to_string()
                }
            }
            Field::Json(value) => match value {
                Some(serde_json::Value::Null) | None => String::new(),
                Some(value) => value.to_string(),
            },
        }
    }
}

fn link_text(link: &Link, ctx: &RenderContext) -> String {
    if ctx.show_links {
        format!("{} -> {}", link.label, link.to)
    } else {
        link.label.clone()
    }
}

/// One labelled slot of a detail panel; `None` means the slot is omitted
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEntry {
    pub label: &'static str,
    pub value: Option<Field>,
}

/// Ordered detail panel content whose key set depends on the record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailItems {
    entries: Vec<DetailEntry>,
}

impl DetailItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: &'static str, value: Field) -> Self {
        self.entries.push(DetailEntry { label, value: Some(value) });
        self
    }

    /// Add a slot that is only shown when `value` is present
    pub fn with_optional(mut self, label: &'static str, value: Option<Field>) -> Self {
        self.entries.push(DetailEntry { label, value });
        self
    }

    pub fn entries(&self) -> &[DetailEntry] {
        &self.entries
    }

    /// Present entries in display order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Field)> + '_ {
        self.entries.iter().filter_map(|entry| entry.value.as_ref().map(|value| (entry.label, value)))
    }

    pub fn get(&self, label: &str) -> Option<&Field> {
        self.iter().find(|(l, _)| *l == label).map(|(_, value)| value)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(|(label, _)| label).collect()
    }
}

impl Serialize for DetailItems {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            label: &'static str,
            field: &'a Field,
        }

        serializer.collect_seq(self.iter().map(|(label, field)| Entry { label, field }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RenderContext {
        RenderContext::new(DateTime::<Utc>::from_timestamp(1_700_000_060, 0).unwrap())
    }

    #[test]
    fn test_optional_entries_are_skipped() {
        let items = DetailItems::new()
            .with("A", Field::text("a"))
            .with_optional("B", None)
            .with("C", Field::Text(None));

        assert_eq!(items.entries().len(), 3);
        assert_eq!(items.labels(), vec!["A", "C"]);
        assert!(items.get("B").is_none());
    }

    #[test]
    fn test_plain_rendering() {
        let ctx = ctx();
        assert_eq!(Field::Text(None).plain(&ctx), "");
        assert_eq!(Field::Time(Some(1_700_000_000_000)).plain(&ctx), "2023-11-14 22:13:20 UTC (1 min ago)");
        assert_eq!(Field::Finalized(Some(true)).plain(&ctx), "Finalized");
        assert_eq!(Field::ResultIcon(None).plain(&ctx), "⏱ Pending");
        assert_eq!(Field::Json(Some(serde_json::json!([1, "a"]))).plain(&ctx), "[1,\"a\"]");
    }

    #[test]
    fn test_links_only_show_targets_when_asked() {
        let link = Field::Link(Link::new("/block/5", "5"));
        assert_eq!(link.plain(&ctx()), "5");
        assert_eq!(link.plain(&ctx().with_links()), "5 -> /block/5");
    }

    #[test]
    fn test_balance_shows_tooltip_when_it_differs() {
        let balance =
            Field::Balance { tooltip: Some("1.23456 DOT".to_string()), display: Some("1.2345 DOT".to_string()) };
        assert_eq!(balance.plain(&ctx()), "1.2345 DOT (1.23456 DOT)");

        let same = Field::Balance { tooltip: Some("1 DOT".to_string()), display: Some("1 DOT".to_string()) };
        assert_eq!(same.plain(&ctx()), "1 DOT");
    }

    #[test]
    fn test_serialize_keeps_order() {
        let items = DetailItems::new().with("Z", Field::text("z")).with("A", Field::Tag(Some("t".to_string())));
        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(json[0]["label"], "Z");
        assert_eq!(json[1]["field"]["kind"], "tag");
        assert_eq!(json[1]["field"]["value"], "t");
    }
}
