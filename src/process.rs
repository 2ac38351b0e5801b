use chrono::Local;
use scraper::Html;

use crate::config::Config;
use crate::model::FieldBucket;
use crate::parse::{extract_fields, extract_member_ids, resolve_max_page};
use crate::request::Fetcher;
use crate::store::{completed_user_ids, read_users, write_bucket};
use crate::{info_time, warn_time, Result};

/// Where a paginated walk currently is.
/// `max_page` is only learned from page 1 and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub max_page: u32,
}

impl PaginationState {
    fn starting_at(page: u32) -> Self {
        Self {
            current_page: page.max(1),
            max_page: 1,
        }
    }

    fn is_last_page(&self) -> bool {
        self.current_page >= self.max_page
    }
}

/// Users handled by one driver run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Scrapes every listing page of a user's reading log into a single bucket.
/// Any failed page aborts the whole user, nothing partial is returned.
pub async fn aggregate(
    fetcher: &Fetcher,
    config: &Config,
    user_id: &str,
    start_page: u32,
) -> Result<FieldBucket> {
    let mut bucket = FieldBucket::default();
    let state = walk_pages(
        fetcher,
        start_page,
        |page| config.reading_url(user_id, page),
        |doc| extract_fields(doc, &mut bucket),
    )
    .await?;
    info_time!(
        "user {user_id}: {} books over {} page(s)",
        bucket.title.len(),
        state.max_page
    );
    Ok(bucket)
}

/// All member ids of a community, page by page.
pub async fn fetch_member_ids(
    fetcher: &Fetcher,
    config: &Config,
    community_id: u64,
) -> Result<Vec<String>> {
    let mut user_ids = Vec::new();
    walk_pages(
        fetcher,
        1,
        |page| config.members_url(community_id, page),
        |doc| {
            user_ids.extend(extract_member_ids(doc)?);
            Ok(())
        },
    )
    .await?;
    Ok(user_ids)
}

/// Member ids of every community in order, duplicates kept.
pub async fn collect_member_ids(
    fetcher: &Fetcher,
    config: &Config,
    community_ids: &[u64],
) -> Result<Vec<String>> {
    let mut user_ids = Vec::new();
    for (n, &community_id) in community_ids.iter().enumerate() {
        info_time!(
            "Fetching members of community {community_id} ({}/{})",
            n + 1,
            community_ids.len()
        );
        user_ids.extend(fetch_member_ids(fetcher, config, community_id).await?);
    }
    Ok(user_ids)
}

/// Reads the input table, skips users that already have output and scrapes the rest.
/// Users are visited from the bottom of the table up.
pub async fn process_users(config: &Config) -> Result<RunSummary> {
    let start_time = Local::now();
    let fetcher = Fetcher::new(config.page_delay);

    tokio::fs::create_dir_all(&config.output_dir).await?;
    let users = read_users(&config.input_path)?;
    let mut done = completed_user_ids(&config.output_dir).await?;
    info_time!(
        "Started scraping: {} users in table, {} already done",
        users.len(),
        done.len()
    );

    let mut summary = RunSummary::default();
    for user in users.iter().rev() {
        let user_id = user.user_id.as_str();
        if user_id.is_empty() {
            warn_time!("row without a user id: {:?}", user.raw_row);
            continue;
        }
        if done.contains(user_id) {
            info_time!("user {user_id} already exists.");
            summary.skipped.push(user_id.to_string());
            continue;
        }

        let user_start = Local::now();
        info_time!("Start fetching user {user_id}");
        let bucket = aggregate(&fetcher, config, user_id, 1).await?;
        write_bucket(&config.output_dir, user_id, &bucket).await?;
        info_time!(user_start, "Wrote user {user_id}");

        done.insert(user_id.to_string());
        summary.written.push(user_id.to_string());
    }

    info_time!(
        start_time,
        "Finished: {} users written, {} skipped",
        summary.written.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

/// Fetches pages sequentially from `start_page`, handing each parsed page to `on_page`.
/// The last page is read off page 1's pagination, so starting later than 1 fetches a single page.
async fn walk_pages<U, F>(
    fetcher: &Fetcher,
    start_page: u32,
    page_url: U,
    mut on_page: F,
) -> Result<PaginationState>
where
    U: Fn(u32) -> String,
    F: FnMut(&Html) -> Result<()>,
{
    let mut state = PaginationState::starting_at(start_page);
    loop {
        let html = fetcher.request_page_html(&page_url(state.current_page)).await?;
        // Html isn't Send, keep it out of the await points.
        let max_page = {
            let doc = Html::parse_document(&html);
            on_page(&doc)?;
            match state.current_page {
                1 => Some(resolve_max_page(&doc)?),
                _ => None,
            }
        };
        if let Some(max_page) = max_page {
            state.max_page = max_page;
        }
        info_time!("page {}/{}", state.current_page, state.max_page);

        if state.is_last_page() {
            return Ok(state);
        }
        state.current_page += 1;
    }
}
