use csv::StringRecord;

/// One row of the input table.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: String,
    pub raw_row: StringRecord,
}

/// The attributes scraped for every book entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Title,
    Authors,
}

impl FieldKey {
    /// Order matters for the writer: `authors` goes last since its file marks a user as done.
    pub const ALL: [FieldKey; 2] = [FieldKey::Title, FieldKey::Authors];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Authors => "authors",
        }
    }

    /// Matches elements whose class attribute is exactly `detail__<key>`.
    pub fn selector(self) -> String {
        format!(r#"[class="detail__{}"]"#, self.as_str())
    }
}

/// Per-user accumulation of the scraped fields across all listing pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBucket {
    pub title: Vec<String>,
    pub authors: Vec<String>,
}

impl FieldBucket {
    pub fn get(&self, key: FieldKey) -> &[String] {
        match key {
            FieldKey::Title => &self.title,
            FieldKey::Authors => &self.authors,
        }
    }

    pub fn get_mut(&mut self, key: FieldKey) -> &mut Vec<String> {
        match key {
            FieldKey::Title => &mut self.title,
            FieldKey::Authors => &mut self.authors,
        }
    }
}
