use bookscrap::{config::Config, info_time, process::process_users, Result};
use chrono::Local;

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = Config::default();
    process_users(&config).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
