//! Rendering pages in a real browser.
//!
//! The communities listing is filled in by javascript, a plain GET only sees
//! the page skeleton. Only used to find community ids, reading logs go through
//! [`Fetcher`](crate::request::Fetcher).

use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use scraper::Html;

use crate::config::Config;
use crate::parse::extract_community_ids;
use crate::{info_time, Error, Result};

/// Launches a headless browser, renders every url in turn and returns their HTML in the same order.
/// The browser is closed before returning, also when rendering failed.
pub async fn fetch_html_by_browser(urls: &[String], delay: Duration) -> Result<Vec<String>> {
    let browser_config = BrowserConfig::builder().build().map_err(Error::Browser)?;
    let (mut browser, mut handler) = Browser::launch(browser_config).await?;

    // The handler drives the CDP connection and has to be polled for the whole session.
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let rendered = render_all(&browser, urls, delay).await;

    browser.close().await?;
    browser.wait().await?;
    handler_task.await?;

    rendered
}

async fn render_all(browser: &Browser, urls: &[String], delay: Duration) -> Result<Vec<String>> {
    let mut pages = Vec::with_capacity(urls.len());
    for url in urls {
        info_time!("Rendering {url} in browser");
        let page = browser.new_page(url.as_str()).await?;
        page.wait_for_navigation().await?;
        pages.push(page.content().await?);
        page.close().await?;
        tokio::time::sleep(delay).await;
    }
    Ok(pages)
}

/// Ids of the communities on the configured communities listing pages, largest first.
pub async fn discover_community_ids(config: &Config) -> Result<Vec<u64>> {
    let urls: Vec<String> = config
        .community_page_range()
        .map(|page| config.communities_url(page))
        .collect();

    let mut ids = Vec::new();
    for html in fetch_html_by_browser(&urls, config.page_delay).await? {
        ids.extend(extract_community_ids(&Html::parse_document(&html))?);
    }
    info_time!("Found {} communities on {} page(s)", ids.len(), urls.len());
    Ok(ids)
}
