//! `Link` header parsing.
//!
//! The header is a comma-separated list of `<url>; rel="tag"` entries.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

static LINK_ENTRY: OnceLock<Regex> = OnceLock::new();

fn link_entry() -> &'static Regex {
    LINK_ENTRY.get_or_init(|| {
        Regex::new(r#"^\s*<(?P<url>[^>]+)>\s*;\s*rel="(?P<tag>\w+)"\s*$"#)
            .expect("Invalid link header pattern")
    })
}

/// Map of `rel` tag to URL. Entries that do not match the format are ignored.
pub fn parse_links(header: &str) -> HashMap<String, String> {
    header
        .split(',')
        .filter_map(|entry| link_entry().captures(entry))
        .map(|caps| (caps["tag"].to_owned(), caps["url"].to_owned()))
        .collect()
}

/// The `rel="next"` URL, if any.
pub fn next_link(header: &str) -> Option<String> {
    parse_links(header).remove("next")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GITHUB: &str = r#"<https://api.github.com/organizations/1/repos?page=2>; rel="next", <https://api.github.com/organizations/1/repos?page=5>; rel="last""#;

    #[test]
    fn parses_every_entry() {
        let links = parse_links(GITHUB);
        assert_eq!(links.len(), 2);
        assert_eq!(links["last"], "https://api.github.com/organizations/1/repos?page=5");
    }

    #[rstest]
    #[case(GITHUB, Some("https://api.github.com/organizations/1/repos?page=2"))]
    #[case(r#"<https://x/?page=1>; rel="prev", <https://x/?page=1>; rel="first""#, None)]
    #[case("", None)]
    #[case("garbage", None)]
    fn next_link_cases(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(next_link(header).as_deref(), expected);
    }
}
