use serde::{Deserialize, Serialize};

use super::book::BookRecord;

/// Library: 集約ルート。挿入順を保持するBookRecordの列。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<BookRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// 末尾に追加する。重複Titleも拒否しない。
    pub fn add(&mut self, book: BookRecord) -> &BookRecord {
        self.books.push(book);
        &self.books[self.books.len() - 1]
    }

    /// 先頭len件だけ残す（保存失敗時の巻き戻し用）。
    pub(crate) fn truncate(&mut self, len: usize) {
        self.books.truncate(len);
    }

    /// Titleがcase-insensitiveで完全一致する全レコードを削除し、削除数を返す。
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|book| !book.title_is(title));
        before - self.books.len()
    }

    /// TitleまたはAuthorにkeywordを含むレコード（case-insensitive）。
    /// 空のkeywordは全件にマッチする。
    pub fn search(&self, keyword: &str) -> Vec<&BookRecord> {
        let needle = keyword.to_lowercase();
        self.books.iter().filter(|b| b.mentions(&needle)).collect()
    }

    pub fn list_all(&self) -> &[BookRecord] {
        &self.books
    }
}

impl FromIterator<BookRecord> for Library {
    fn from_iter<I: IntoIterator<Item = BookRecord>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}
