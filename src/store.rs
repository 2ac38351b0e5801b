use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{OUTPUT_EXT, USER_ID_COLUMN};
use crate::model::{FieldBucket, FieldKey, UserRecord};
use crate::{info_time, Error, Result};

/// Reads the input table. The `user_id` column is looked up by header name.
pub fn read_users(path: &Path) -> Result<Vec<UserRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == USER_ID_COLUMN)
        .ok_or_else(|| Error::MissingColumn(USER_ID_COLUMN.into()))?;

    reader
        .records()
        .map(|row| -> Result<UserRecord> {
            let raw_row = row?;
            let user_id = raw_row.get(column).unwrap_or_default().trim().to_string();
            Ok(UserRecord { user_id, raw_row })
        })
        .collect()
}

/// Users that already have an `authors_<user_id>.*` file in the output directory.
pub async fn completed_user_ids(output_dir: &Path) -> Result<HashSet<String>> {
    let prefix = format!("{}_", FieldKey::Authors.as_str());
    let mut done = HashSet::new();

    let mut entries = tokio::fs::read_dir(output_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let Some(user_id) = name
            .to_str()
            .and_then(|n| n.strip_prefix(&prefix))
            .and_then(|rest| rest.split_once('.'))
            .map(|(user_id, _ext)| user_id)
        else {
            continue;
        };
        if !user_id.is_empty() {
            done.insert(user_id.to_string());
        }
    }
    Ok(done)
}

pub fn field_path(output_dir: &Path, key: FieldKey, user_id: &str) -> PathBuf {
    output_dir.join(format!("{}_{user_id}.{OUTPUT_EXT}", key.as_str()))
}

/// Writes one file per field, values tab separated on a single line.
/// Existing files are overwritten. `authors` is written last, see `FieldKey::ALL`.
pub async fn write_bucket(output_dir: &Path, user_id: &str, bucket: &FieldBucket) -> Result<()> {
    for key in FieldKey::ALL {
        let path = field_path(output_dir, key, user_id);
        tokio::fs::write(&path, tab_line(bucket.get(key))).await?;
    }
    Ok(())
}

/// Dumps discovered member ids on a single tab separated line.
pub async fn write_member_ids(path: &Path, user_ids: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, tab_line(user_ids)).await?;
    Ok(())
}

/// Reads every `<key>_<user_id>.*` file back as one document per user, files in name order.
/// Tokens are split on tabs and commas, with ideographic spaces, spaces and newlines
/// removed and empty tokens dropped.
pub async fn load_feature(output_dir: &Path, key: FieldKey) -> Result<Vec<Vec<String>>> {
    let prefix = format!("{}_", key.as_str());
    let mut paths = Vec::new();

    let mut entries = tokio::fs::read_dir(output_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(&prefix));
        if matches {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read_to_string(&path).await?;
        documents.push(feature_tokens(&content));
    }
    info_time!("Loaded {} {} documents", documents.len(), key.as_str());
    Ok(documents)
}

fn feature_tokens(content: &str) -> Vec<String> {
    content
        .split(['\t', ','])
        .map(|token| token.replace(['\u{3000}', '\n', ' '], ""))
        .filter(|token| !token.is_empty())
        .collect()
}

fn tab_line(values: &[String]) -> String {
    let mut line = values.join("\t");
    line.push('\n');
    line
}
