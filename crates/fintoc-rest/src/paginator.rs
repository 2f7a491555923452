//! Lazy pagination over `Link`-header collections
//!
//! Collection endpoints return one page per request and advertise the next
//! page through an RFC 5988 `Link` header. [`paginate`] turns that into a
//! pull-driven [`Stream`] of raw JSON elements: a page is fetched only when
//! a consumer has drained the previous one, so `take(n)` over a stream
//! issues exactly as many requests as it needs.

use std::collections::{HashMap, VecDeque};

use futures::stream::{self, Stream};
use serde_json::Value;

use crate::error::{FintocError, RestResult};
use crate::transport::Transport;

/// One page of a collection
#[derive(Debug)]
pub struct Page {
    pub elements: Vec<Value>,
    /// Absolute URL of the next page, from `Link: <...>; rel="next"`
    pub next: Option<String>,
}

/// What to fetch next: the first page by path, or a follow-up absolute URL
#[derive(Debug, Clone)]
pub enum PageTarget {
    Path {
        path: String,
        params: HashMap<String, String>,
    },
    Url(String),
}

/// Parse an RFC 5988 `Link` header into `(rel, url)` pairs
///
/// Accepts the shape the API emits: comma-separated entries of
/// `<url>; rel="name"`.
pub fn parse_link_header(header: &str) -> RestResult<Vec<(String, String)>> {
    let mut links = Vec::new();
    for entry in header.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (url_part, rel_part) = entry
            .split_once(';')
            .ok_or_else(|| FintocError::LinkHeader(header.to_string()))?;
        let url = url_part
            .trim()
            .strip_prefix('<')
            .and_then(|u| u.strip_suffix('>'))
            .ok_or_else(|| FintocError::LinkHeader(header.to_string()))?;
        let rel = rel_part
            .trim()
            .strip_prefix("rel=\"")
            .and_then(|r| r.strip_suffix('"'))
            .ok_or_else(|| FintocError::LinkHeader(header.to_string()))?;
        links.push((rel.to_string(), url.to_string()));
    }
    Ok(links)
}

struct PageState {
    transport: Transport,
    pending: VecDeque<Value>,
    next: Option<PageTarget>,
}

/// Stream every element of a paginated collection, in server order
///
/// Errors terminate the stream after being yielded.
pub fn paginate(
    transport: Transport,
    path: String,
    params: HashMap<String, String>,
) -> impl Stream<Item = RestResult<Value>> + Send {
    let state = PageState {
        transport,
        pending: VecDeque::new(),
        next: Some(PageTarget::Path { path, params }),
    };

    stream::try_unfold(state, |mut state| async move {
        loop {
            if let Some(element) = state.pending.pop_front() {
                return Ok(Some((element, state)));
            }
            let Some(target) = state.next.take() else {
                return Ok(None);
            };
            let page = state.transport.get_page(target).await?;
            state.pending = page.elements.into();
            state.next = page.next.map(PageTarget::Url);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_link() {
        let links =
            parse_link_header(r#"<https://api.test.com/v1/links?page=2>; rel="next""#).unwrap();
        assert_eq!(
            links,
            vec![(
                "next".to_string(),
                "https://api.test.com/v1/links?page=2".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_multiple_links() {
        let header = r#"<https://t.com/a?page=2>; rel="next", <https://t.com/a?page=9>; rel="last""#;
        let links = parse_link_header(header).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].0, "next");
        assert_eq!(links[1], ("last".to_string(), "https://t.com/a?page=9".to_string()));
    }

    #[test]
    fn test_parse_rejects_missing_rel() {
        assert!(parse_link_header("<https://t.com/a?page=2>").is_err());
    }

    #[test]
    fn test_parse_rejects_unbracketed_url() {
        assert!(parse_link_header(r#"https://t.com/a; rel="next""#).is_err());
    }

    #[test]
    fn test_parse_empty_header() {
        assert_eq!(parse_link_header("").unwrap(), vec![]);
    }
}
