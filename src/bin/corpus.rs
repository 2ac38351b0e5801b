//! Builds the title dictionary and bag-of-words corpus from the scraped feature files.

use bookscrap::config::Config;
use bookscrap::corpus::{compile_corpus_and_dictionary, NO_ABOVE, NO_BELOW};
use bookscrap::model::FieldKey;
use bookscrap::store::load_feature;
use bookscrap::{info_time, Result};
use chrono::Local;

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = Config::default();

    let documents = load_feature(&config.output_dir, FieldKey::Title).await?;
    let (corpus, dictionary) = compile_corpus_and_dictionary(
        &documents,
        NO_BELOW,
        NO_ABOVE,
        Some(&config.dictionary_path),
    )
    .await?;
    let tokens: usize = corpus.iter().flatten().map(|(_, count)| count).sum();
    info_time!(
        start_time,
        "{} documents, {} tokens kept, {tokens} token occurrences. Dictionary at {}",
        corpus.len(),
        dictionary.len(),
        config.dictionary_path.display()
    );

    Ok(())
}
