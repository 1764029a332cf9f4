use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// 本の追加リクエスト。Libraryに入る前にvalidateする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: u32,
    pub genre: String,
    pub read: bool,
}

impl NewBook {
    /// Title / Author / Genre は必須。最初に見つかった空フィールドを返す。
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_empty() {
            return Err(DomainError::MissingField("title"));
        }
        if self.author.is_empty() {
            return Err(DomainError::MissingField("author"));
        }
        if self.genre.is_empty() {
            return Err(DomainError::MissingField("genre"));
        }
        Ok(())
    }
}

/// Library上の1冊。識別はTitle（大文字小文字を区別しない）で、重複は許容する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    title: String,
    author: String,
    year: u32,
    genre: String,
    read: bool,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: u32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// Titleの完全一致（case-insensitive）
    pub fn title_is(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// TitleまたはAuthorに部分一致するか。
    /// `needle` は小文字化済みであること。
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl From<NewBook> for BookRecord {
    fn from(req: NewBook) -> Self {
        Self::new(req.title, req.author, req.year, req.genre, req.read)
    }
}
