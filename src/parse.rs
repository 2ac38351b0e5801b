use scraper::{ElementRef, Html, Selector};

use crate::model::{FieldBucket, FieldKey};
use crate::{Error, Result};

const PAGINATION_LINK: &str = r#"[class="bm-pagination__link"]"#;
const MEMBER_LINK: &str = r#"[class="item__username"] > a"#;
const COMMUNITY_LINK: &str = r#"[class="communities list"] > * > a"#;
/// Joins the links of an entry with several of them, e.g. co-authors.
pub const VALUE_SEPARATOR: &str = ",";

/// Appends every field value found on the page to the bucket, in document order.
pub fn extract_fields(doc: &Html, bucket: &mut FieldBucket) -> Result<()> {
    for key in FieldKey::ALL {
        let selector = create_selector(&key.selector())?;
        for el in doc.select(&selector) {
            let text = element_text(el)?;
            bucket.get_mut(key).push(text);
        }
    }
    Ok(())
}

/// Reads the page number off the last pagination link.
/// A listing without pagination controls has a single page.
pub fn resolve_max_page(doc: &Html) -> Result<u32> {
    let selector = create_selector(PAGINATION_LINK)?;
    let Some(last_link) = doc.select(&selector).last() else {
        return Ok(1);
    };
    let href = last_link.value().attr("href").unwrap_or_default();
    page_param(href).ok_or_else(|| Error::MalformedPaginationLink(href.to_string()))
}

/// Collects user ids from a community members listing, e.g. `/users/116513`.
pub fn extract_member_ids(doc: &Html) -> Result<Vec<String>> {
    let selector = create_selector(MEMBER_LINK)?;
    doc.select(&selector)
        .map(|a| {
            let href = a.value().attr("href").unwrap_or_default();
            user_id_from_href(href).ok_or_else(|| Error::MalformedUserLink(href.to_string()))
        })
        .collect()
}

/// Collects community ids from the rendered communities listing, e.g. `/communities/331614`.
pub fn extract_community_ids(doc: &Html) -> Result<Vec<u64>> {
    let selector = create_selector(COMMUNITY_LINK)?;
    doc.select(&selector)
        .map(|a| {
            let href = a.value().attr("href").unwrap_or_default();
            href.rsplit('/')
                .next()
                .and_then(|id| id.parse().ok())
                .ok_or_else(|| Error::MalformedCommunityLink(href.to_string()))
        })
        .collect()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

/// Text of an entry on a single line: the texts of its links joined by `VALUE_SEPARATOR`,
/// or its whole text when it has no links. Runs of whitespace (tabs and newlines too)
/// collapse into a single space.
fn element_text(el: ElementRef) -> Result<String> {
    let link_selector = create_selector("a")?;
    let links: Vec<String> = el
        .select(&link_selector)
        .map(|a| collapse_whitespace(a.text()))
        .filter(|text| !text.is_empty())
        .collect();
    if links.is_empty() {
        Ok(collapse_whitespace(el.text()))
    } else {
        Ok(links.join(VALUE_SEPARATOR))
    }
}

fn collapse_whitespace<'a>(chunks: impl Iterator<Item = &'a str>) -> String {
    chunks
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Value of the `page=` query pair, must be at least 1.
fn page_param(href: &str) -> Option<u32> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix("page="))
        .last()
        .and_then(|n| n.parse().ok())
        .filter(|&n| n >= 1)
}

fn user_id_from_href(href: &str) -> Option<String> {
    href.split('/')
        .skip_while(|segment| *segment != "users")
        .nth(1)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
