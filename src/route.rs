//! Location state for the console.
//!
//! The app navigates by location strings of the form `articles?page=3&tag=ai`,
//! the terminal counterpart of a routed URL. The only parameter the app
//! interprets is `page`; everything else is carried along untouched so that
//! deep links survive page changes.

use std::fmt;

use url::form_urlencoded;

/// Route path for the article table. Locations with other paths still parse;
/// the path is display-only.
pub const ARTICLES_PATH: &str = "articles";

/// A parsed location: a path plus ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    params: Vec<(String, String)>,
}

impl Location {
    /// Parse a location string. Never fails: a missing or malformed query
    /// simply yields fewer parameters.
    pub fn parse(input: &str) -> Self {
        let (path, query) = match input.split_once('?') {
            Some((p, q)) => (p, q),
            None => (input, ""),
        };
        let path = if path.is_empty() { ARTICLES_PATH } else { path };

        let params = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self {
            path: path.to_string(),
            params,
        }
    }

    /// Resolve the current page number.
    ///
    /// Any failure (missing key, non-numeric value, zero, negative, out of
    /// range) resolves to 1. No error is surfaced; a bad deep link lands on
    /// the first page.
    pub fn page(&self) -> u32 {
        self.params
            .iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.trim().parse::<i64>().ok())
            .filter(|p| (1..=i64::from(u32::MAX)).contains(p))
            .map(|p| p as u32)
            .unwrap_or(1)
    }

    /// Return a location with `page` set, merging into the existing query.
    ///
    /// Unrelated parameters keep their values and relative order. An existing
    /// `page` parameter is replaced in place; otherwise one is appended.
    pub fn with_page(&self, page: u32) -> Self {
        let mut params = self.params.clone();
        match params.iter_mut().find(|(k, _)| k == "page") {
            Some((_, v)) => *v = page.to_string(),
            None => params.push(("page".to_string(), page.to_string())),
        }
        Self {
            path: self.path.clone(),
            params,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::parse(ARTICLES_PATH)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return write!(f, "{}", self.path);
        }
        let query: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        write!(f, "{}?{}", self.path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_page_defaults_to_one() {
        assert_eq!(Location::parse("articles").page(), 1);
        assert_eq!(Location::parse("articles?").page(), 1);
        assert_eq!(Location::parse("").page(), 1);
    }

    #[test]
    fn malformed_page_defaults_to_one() {
        for input in [
            "articles?page=",
            "articles?page=abc",
            "articles?page=0",
            "articles?page=-3",
            "articles?page=1.5",
            "articles?page=99999999999999999999",
        ] {
            assert_eq!(Location::parse(input).page(), 1, "input: {input}");
        }
    }

    #[test]
    fn valid_page_parses() {
        assert_eq!(Location::parse("articles?page=7").page(), 7);
        assert_eq!(Location::parse("articles?tag=ai&page=2").page(), 2);
    }

    #[test]
    fn with_page_replaces_in_place() {
        let loc = Location::parse("articles?page=1&tag=ai");
        let next = loc.with_page(3);
        assert_eq!(next.page(), 3);
        assert_eq!(next.to_string(), "articles?page=3&tag=ai");
    }

    #[test]
    fn with_page_preserves_other_params() {
        let loc = Location::parse("articles?tag=ai&owner=sam");
        let next = loc.with_page(2);
        assert_eq!(next.page(), 2);
        assert_eq!(next.to_string(), "articles?tag=ai&owner=sam&page=2");
    }

    #[test]
    fn display_round_trips_encoding() {
        let loc = Location::parse("articles?q=a%20b");
        assert_eq!(loc.to_string(), "articles?q=a+b");
        assert_eq!(Location::parse(&loc.to_string()), loc);
    }

    proptest! {
        // Whatever the deep link looks like, the resolved page is usable.
        #[test]
        fn any_input_resolves_to_valid_page(input in ".{0,80}") {
            let page = Location::parse(&input).page();
            prop_assert!(page >= 1);
        }

        #[test]
        fn with_page_round_trips(page in 1u32..10_000, tag in "[a-z]{0,8}") {
            let loc = Location::parse(&format!("articles?tag={tag}"));
            prop_assert_eq!(loc.with_page(page).page(), page);
        }
    }
}
