// src/sitemap/parse.rs
// =============================================================================
// This module extracts URL entries from sitemap XML.
//
// Accepted shapes (namespace prefixes are ignored):
//   <urlset><url><loc>..</loc><lastmod>..</lastmod></url></urlset>
//   <UrlSet><Url><Loc>..</Loc><LastMod>..</LastMod></Url></UrlSet>
//
// We stream through the document with quick-xml and keep a stack of the
// open element names, so a <loc> only counts when it sits directly under
// <url> under the root.
// =============================================================================

use super::SitemapError;
use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

// One <url> entry from the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
}

// Which of the two casing conventions a name follows, if any
fn is_root(name: &str) -> bool {
    name == "urlset" || name == "UrlSet"
}

fn is_url(name: &str) -> bool {
    name == "url" || name == "Url"
}

fn is_loc(name: &str) -> bool {
    name == "loc" || name == "Loc"
}

fn is_lastmod(name: &str) -> bool {
    name == "lastmod" || name == "LastMod" || name == "Lastmod"
}

// Parses a sitemap document into entries, in document order
//
// Entries without a <loc> (or with an empty one) are skipped.
pub fn parse_sitemap(xml: &str) -> Result<Vec<SitemapEntry>, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut root: Option<String> = None;
    let mut entries = Vec::new();

    let mut loc = String::new();
    let mut lastmod = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if root.is_none() {
                    root = Some(name.clone());
                }
                if stack.len() == 1 && is_url(&name) {
                    loc.clear();
                    lastmod.clear();
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                // <urlset/> is a valid, empty sitemap
                if root.is_none() {
                    root = Some(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| SitemapError::Xml(err.to_string()))?;
                push_text(&stack, &text, &mut loc, &mut lastmod);
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                push_text(&stack, &text, &mut loc, &mut lastmod);
            }
            Ok(Event::End(_)) => {
                if let Some(name) = stack.pop() {
                    if stack.len() == 1 && is_url(&name) {
                        let url = loc.trim();
                        if !url.is_empty() {
                            entries.push(SitemapEntry {
                                loc: url.to_string(),
                                lastmod: parse_lastmod(lastmod.trim()),
                            });
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
            _ => {}
        }
    }

    match root {
        Some(name) if is_root(&name) => Ok(entries),
        other => Err(SitemapError::NotAUrlset(other)),
    }
}

// Appends text to the field of the element currently open, when that
// element is a <loc>/<lastmod> inside <url> inside the root
fn push_text(stack: &[String], text: &str, loc: &mut String, lastmod: &mut String) {
    if stack.len() != 3 || !is_root(&stack[0]) || !is_url(&stack[1]) {
        return;
    }
    if is_loc(&stack[2]) {
        loc.push_str(text);
    } else if is_lastmod(&stack[2]) {
        lastmod.push_str(text);
    }
}

// <lastmod> is W3C datetime: either a full timestamp or just a date
fn parse_lastmod(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_lowercase_sitemap() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc> https://shop.example/a </loc>
    <lastmod>2025-03-09</lastmod>
  </url>
  <url><loc>https://shop.example/b?x=1&amp;y=2</loc></url>
</urlset>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].loc, "https://shop.example/a");
        assert_eq!(
            entries[0].lastmod,
            Some(Utc.with_ymd_and_hms(2025, 3, 9, 0, 0, 0).unwrap())
        );
        assert_eq!(entries[1].loc, "https://shop.example/b?x=1&y=2");
        assert_eq!(entries[1].lastmod, None);
    }

    #[test]
    fn test_parse_pascal_case_sitemap() {
        let xml = r#"<UrlSet><Url><Loc>https://shop.example/a</Loc><LastMod>2025-03-09T10:00:00+02:00</LastMod></Url></UrlSet>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc, "https://shop.example/a");
        assert_eq!(
            entries[0].lastmod,
            Some(Utc.with_ymd_and_hms(2025, 3, 9, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_prefixed_elements() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"><sm:url><sm:loc>https://shop.example/a</sm:loc></sm:url></sm:urlset>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries[0].loc, "https://shop.example/a");
    }

    #[test]
    fn test_parse_ignores_nested_loc_elsewhere() {
        let xml = r#"<urlset><url><loc>https://shop.example/a</loc><image><loc>https://cdn.example/a.jpg</loc></image></url></urlset>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc, "https://shop.example/a");
    }

    #[test]
    fn test_empty_urlset_is_ok() {
        assert!(parse_sitemap("<urlset/>").unwrap().is_empty());
        assert!(parse_sitemap("<urlset></urlset>").unwrap().is_empty());
    }

    #[test]
    fn test_sitemap_index_is_rejected() {
        let xml = r#"<sitemapindex><sitemap><loc>https://shop.example/s1.xml</loc></sitemap></sitemapindex>"#;
        assert!(matches!(
            parse_sitemap(xml),
            Err(SitemapError::NotAUrlset(Some(name))) if name == "sitemapindex"
        ));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = "<urlset><url><loc>https://shop.example/a</url></urlset>";
        assert!(matches!(parse_sitemap(xml), Err(SitemapError::Xml(_))));
    }

    #[test]
    fn test_not_xml_at_all() {
        assert!(matches!(
            parse_sitemap("just some text"),
            Err(SitemapError::NotAUrlset(None))
        ));
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why stream events instead of building a DOM?
//    - quick-xml hands us one event at a time (Start, Text, End, ...)
//    - Nothing but the current <url> entry is kept in memory, so a sitemap
//      with 50,000 URLs costs about the same as one with 5
//
// 2. What is the `stack` for?
//    - Every Start pushes the element name, every End pops it
//    - stack == ["urlset", "url", "loc"] means "we are inside a loc that
//      belongs to a url of the root", which is the only place text counts
//    - A <loc> nested anywhere else (an image extension, say) is ignored
//
// 3. Why local_name() instead of name()?
//    - name() is "sm:loc" for a prefixed document, local_name() is "loc"
//    - Stripping the prefix lets both forms match the same checks
//
// 4. What does trim_text(true) do?
//    - It drops the whitespace-only text between tags (newlines, indents)
//    - We still trim <loc> ourselves since text inside it is kept as-is
// -----------------------------------------------------------------------------
