//! Collects the member ids of the largest communities into a raw dump.
//! The input table for the main scraper is prepared from that dump.

use bookscrap::browser::discover_community_ids;
use bookscrap::config::Config;
use bookscrap::process::collect_member_ids;
use bookscrap::request::Fetcher;
use bookscrap::store::write_member_ids;
use bookscrap::{info_time, Result};
use chrono::Local;

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = Config::default();
    let fetcher = Fetcher::new(config.page_delay);

    let community_ids = discover_community_ids(&config).await?;
    let user_ids = collect_member_ids(&fetcher, &config, &community_ids).await?;
    write_member_ids(&config.members_path, &user_ids).await?;
    info_time!(
        start_time,
        "Wrote {} member ids to {}",
        user_ids.len(),
        config.members_path.display()
    );

    Ok(())
}
