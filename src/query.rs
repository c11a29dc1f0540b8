/// Query Module
///
/// Resolves the current page from an explorer location's query string.
use url::Url;

/// Base used to resolve relative locations such as `/events?page=2`
const LOCATION_BASE: &str = "http://explorer.local/";

/// Split a location into a full URL, accepting absolute URLs, paths and bare queries
pub fn parse_location(location: &str) -> Option<Url> {
    let location = location.trim();
    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(LOCATION_BASE).ok().and_then(|base| base.join(location).ok())
        }
        Err(_) => None,
    }
}

/// Get the 1-based page number encoded in `location`
///
/// Missing, non-numeric, zero or negative `page` values resolve to 1.
pub fn page_from_query(location: &str) -> u32 {
    parse_location(location)
        .and_then(|url| url.query_pairs().find(|(key, _)| key == "page").map(|(_, value)| value.into_owned()))
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .and_then(|page| u32::try_from(page).ok())
        .unwrap_or(1)
}

/// Build the location of `page` for a list route
pub fn location_with_page(path: &str, page: u32) -> String {
    if page <= 1 {
        path.to_string()
    } else {
        format!("{}?page={}", path, page)
    }
}
