use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("Pagination link doesn't carry a page number: {0}")]
    MalformedPaginationLink(String),
    #[error("User link doesn't carry a user id: {0}")]
    MalformedUserLink(String),
    #[error("Community link doesn't carry a community id: {0}")]
    MalformedCommunityLink(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Input table is missing the column: {0}")]
    MissingColumn(String),

    #[cfg(feature = "browser")]
    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[cfg(feature = "browser")]
    #[error("Browser Error: {0}")]
    Browser(String),
}

#[cfg(feature = "browser")]
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(value: chromiumoxide::error::CdpError) -> Self {
        Error::Browser(value.to_string())
    }
}
