use serde::{Deserialize, Serialize};

use crate::domain::model::book::BookRecord;
use crate::domain::stats::LibraryStats;

use super::error::AppError;
use super::service::RemovalOutcome;

/// 一覧の出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Table,
    Json,
}

/// 表示用の1行。Readは "Yes" / "No" に変換する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    pub title: String,
    pub author: String,
    pub year: u32,
    pub genre: String,
    pub read: String,
}

impl From<&BookRecord> for BookRow {
    fn from(book: &BookRecord) -> Self {
        Self {
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year(),
            genre: book.genre().to_string(),
            read: yes_no(book.is_read()).to_string(),
        }
    }
}

const EMPTY_MESSAGE: &str = "No books to display.";

/// レコード一覧 → Markdownテーブル。
pub fn render_table(books: &[&BookRecord]) -> String {
    if books.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let mut buf = String::from("| Title | Author | Year | Genre | Read |\n");
    buf.push_str("|---|---|---|---|---|\n");
    for book in books {
        buf.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape_cell(book.title()),
            escape_cell(book.author()),
            book.year(),
            escape_cell(book.genre()),
            yes_no(book.is_read()),
        ));
    }
    buf
}

/// レコード一覧 → JSON配列（BookRow）。
pub fn render_json(books: &[&BookRecord]) -> Result<String, AppError> {
    let rows: Vec<BookRow> = books.iter().map(|b| BookRow::from(*b)).collect();
    serde_json::to_string_pretty(&rows).map_err(AppError::Render)
}

pub fn render_books(books: &[&BookRecord], format: RenderFormat) -> Result<String, AppError> {
    match format {
        RenderFormat::Table => Ok(render_table(books)),
        RenderFormat::Json => render_json(books),
    }
}

/// 検索結果。件数の見出しを付ける。
pub fn render_search(books: &[&BookRecord], format: RenderFormat) -> Result<String, AppError> {
    let body = render_books(books, format)?;
    Ok(format!("Found {} result(s):\n\n{}", books.len(), body))
}

pub fn render_stats(stats: &LibraryStats) -> String {
    format!(
        "Library Statistics\n\
         Total Books: {}\n\
         Books Read: {}\n\
         Books Unread: {}\n\
         Percentage Read: {:.2}%\n",
        stats.total,
        stats.read,
        stats.unread(),
        stats.percent_read
    )
}

pub fn added_message(book: &BookRecord) -> String {
    format!("Book '{}' added successfully!", book.title())
}

pub fn removal_message(title: &str, outcome: RemovalOutcome) -> String {
    match outcome {
        RemovalOutcome::Removed { count: 1 } => format!("Book '{title}' removed successfully!"),
        RemovalOutcome::Removed { count } => {
            format!("Book '{title}' removed successfully! ({count} copies)")
        }
        RemovalOutcome::NotFound => format!("No book found with title '{title}'."),
    }
}

fn yes_no(read: bool) -> &'static str {
    if read {
        "Yes"
    } else {
        "No"
    }
}

/// テーブルを壊す `|` と改行をエスケープする。
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
