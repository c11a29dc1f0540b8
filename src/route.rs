/// Route Module
///
/// Client-side navigation targets. Views produce these as link targets and
/// the CLI consumes them through `open` and `browse`.
use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;
use crate::query::{page_from_query, parse_location};

/// A `(blockHeight, localIndex)` pair addressing an event, call or extrinsic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeId {
    pub height: u64,
    pub index: u32,
}

impl CompositeId {
    pub fn new(height: u64, index: u32) -> Self {
        Self { height, index }
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.height, self.index)
    }
}

impl FromStr for CompositeId {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RouteError::MalformedId(s.to_string());
        let (height, index) = s.split_once('-').ok_or_else(malformed)?;
        let height = height.replace(',', "").parse().map_err(|_| malformed())?;
        let index = index.parse().map_err(|_| malformed())?;
        Ok(Self::new(height, index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// 1-based page of the events list
    Events { page: u32 },
    Event(CompositeId),
    Block(u64),
    Extrinsic(CompositeId),
    Call(CompositeId),
    Account(String),
}

impl Route {
    /// Resolve a location such as `/events?page=2` or `/block/100`
    pub fn parse(location: &str) -> Result<Self, RouteError> {
        let unknown = || RouteError::Unknown(location.to_string());
        let url = parse_location(location).ok_or_else(unknown)?;
        let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["events"] => Ok(Route::Events { page: page_from_query(location) }),
            ["event", id] => Ok(Route::Event(id.parse()?)),
            ["extrinsic", id] => Ok(Route::Extrinsic(id.parse()?)),
            ["call", id] => Ok(Route::Call(id.parse()?)),
            ["block", height] => height
                .replace(',', "")
                .parse()
                .map(Route::Block)
                .map_err(|_| RouteError::MalformedHeight(height.to_string())),
            ["account", address] => Ok(Route::Account(address.to_string())),
            _ => Err(unknown()),
        }
    }

    /// Path of the indexer endpoint backing this route
    pub fn api_path(&self) -> String {
        match self {
            Route::Events { .. } => "/events".to_string(),
            Route::Event(id) => format!("/events/{}", id),
            Route::Block(height) => format!("/blocks/{}", height),
            Route::Extrinsic(id) => format!("/extrinsics/{}", id),
            Route::Call(id) => format!("/calls/{}", id),
            Route::Account(address) => format!("/accounts/{}", address),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Events { page } if *page > 1 => write!(f, "/events?page={}", page),
            Route::Events { .. } => f.write_str("/events"),
            Route::Event(id) => write!(f, "/event/{}", id),
            Route::Block(height) => write!(f, "/block/{}", height),
            Route::Extrinsic(id) => write!(f, "/extrinsic/{}", id),
            Route::Call(id) => write!(f, "/call/{}", id),
            Route::Account(address) => write!(f, "/account/{}", address),
        }
    }
}

/// Link target for an event, rendering absent parts as empty like the web UI did
pub fn event_href(height: Option<u64>, index: Option<u32>) -> String {
    format!("/event/{}-{}", opt(height), opt(index))
}

pub fn block_href(height: Option<u64>) -> String {
    format!("/block/{}", opt(height))
}

pub fn extrinsic_href(height: Option<u64>, index: Option<u32>) -> String {
    format!("/extrinsic/{}-{}", opt(height), opt(index))
}

pub fn call_href(height: Option<u64>, index: Option<u32>) -> String {
    format!("/call/{}-{}", opt(height), opt(index))
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/events").unwrap(), Route::Events { page: 1 });
        assert_eq!(Route::parse("/events?page=3").unwrap(), Route::Events { page: 3 });
        assert_eq!(Route::parse("/events?page=oops").unwrap(), Route::Events { page: 1 });
        assert_eq!(Route::parse("/block/100").unwrap(), Route::Block(100));
        assert_eq!(Route::parse("/event/100-2").unwrap(), Route::Event(CompositeId::new(100, 2)));
        assert_eq!(Route::parse("/extrinsic/7-0").unwrap(), Route::Extrinsic(CompositeId::new(7, 0)));
        assert_eq!(Route::parse("/call/7-1").unwrap(), Route::Call(CompositeId::new(7, 1)));
        assert_eq!(
            Route::parse("https://scan.example.org/account/15oF4uVJ").unwrap(),
            Route::Account("15oF4uVJ".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Route::parse("/nowhere"), Err(RouteError::Unknown("/nowhere".to_string())));
        assert_eq!(Route::parse("/event/100"), Err(RouteError::MalformedId("100".to_string())));
        assert_eq!(Route::parse("/block/tip"), Err(RouteError::MalformedHeight("tip".to_string())));
    }

    #[test]
    fn test_display_matches_parse() {
        let routes = [
            Route::Events { page: 1 },
            Route::Events { page: 5 },
            Route::Event(CompositeId::new(12, 3)),
            Route::Block(99),
            Route::Account("5Grw".to_string()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
        }
    }

    #[test]
    fn test_api_paths() {
        assert_eq!(Route::Block(5).api_path(), "/blocks/5");
        assert_eq!(Route::Event(CompositeId::new(5, 1)).api_path(), "/events/5-1");
        assert_eq!(Route::Events { page: 4 }.api_path(), "/events");
    }

    #[test]
    fn test_hrefs_with_missing_parts() {
        assert_eq!(event_href(Some(10), Some(2)), "/event/10-2");
        assert_eq!(block_href(None), "/block/");
        assert_eq!(extrinsic_href(Some(10), None), "/extrinsic/10-");
    }

    #[test]
    fn test_composite_id_accepts_grouped_height() {
        assert_eq!("1,234-5".parse::<CompositeId>().unwrap(), CompositeId::new(1234, 5));
    }
}
