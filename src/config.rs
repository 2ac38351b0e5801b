use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL: &str = "https://bookmeter.com";
pub const COMMUNITIES_PATH: &str = "/communities?filter=none&sort=member_count";
/// Table of users to scrape, must have a `user_id` column.
pub const INPUT_PATH: &str = "data/user_id.csv";
pub const OUTPUT_DIR: &str = "data";
pub const OUTPUT_EXT: &str = "txt";
/// Raw dump of every member id found by the `members` binary.
pub const MEMBERS_PATH: &str = "data/user_id_raw.txt";
/// Token dictionary written by the `corpus` binary.
pub const DICTIONARY_PATH: &str = "data/dictionary.txt";
/// Communities listing pages to walk for member discovery, sorted by member count.
pub const COMMUNITY_START_PAGE: u32 = 1;
pub const COMMUNITY_PAGES: u32 = 1;
pub const USER_ID_COLUMN: &str = "user_id";
/// Sleep after every page fetch so we don't hammer the site.
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Everything the pipeline needs to know about where to read, fetch and write.
/// Built once in `main` and passed around by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub members_path: PathBuf,
    pub dictionary_path: PathBuf,
    pub community_start_page: u32,
    pub community_pages: u32,
    pub page_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            input_path: INPUT_PATH.into(),
            output_dir: OUTPUT_DIR.into(),
            members_path: MEMBERS_PATH.into(),
            dictionary_path: DICTIONARY_PATH.into(),
            community_start_page: COMMUNITY_START_PAGE,
            community_pages: COMMUNITY_PAGES,
            page_delay: PAGE_DELAY,
        }
    }
}

impl Config {
    /// Listing of the books a user has read.
    pub fn reading_url(&self, user_id: &str, page: u32) -> String {
        format!("{}/users/{user_id}/books/read?page={page}", self.base_url)
    }

    pub fn members_url(&self, community_id: u64, page: u32) -> String {
        format!("{}/communities/{community_id}/members?page={page}", self.base_url)
    }

    pub fn communities_url(&self, page: u32) -> String {
        format!("{}{COMMUNITIES_PATH}&page={page}", self.base_url)
    }

    /// Communities listing pages to discover members from.
    pub fn community_page_range(&self) -> std::ops::Range<u32> {
        let start = self.community_start_page.max(1);
        start..start + self.community_pages
    }
}
