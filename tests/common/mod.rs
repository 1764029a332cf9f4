//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bookshelf_mcp::application::service::LibraryService;
use bookshelf_mcp::domain::model::book::NewBook;
use bookshelf_mcp::domain::model::library::Library;
use bookshelf_mcp::domain::repository::LibraryRepository;

// =============================================================================
// InMemoryRepo: テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error: disk full")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。
/// `fail_saves` を立てるとsaveが失敗する。
pub struct InMemoryRepo {
    store: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            store: RefCell::new(None),
            saves: Cell::new(0),
            fail_saves: Cell::new(false),
        }
    }

    /// 保存済みのLibraryを持つリポジトリ。
    pub fn with_library(library: &Library) -> Self {
        let repo = Self::new();
        *repo.store.borrow_mut() = Some(serde_json::to_string(library).unwrap());
        repo
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// 永続化されている内容を読み直す（プロセス再起動相当）。
    pub fn persisted(&self) -> Library {
        self.load().unwrap()
    }
}

impl LibraryRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Library, Self::Error> {
        match self.store.borrow().as_deref() {
            Some(json) => Ok(serde_json::from_str(json).unwrap()),
            None => Ok(Library::new()),
        }
    }

    fn save(&self, library: &Library) -> Result<(), Self::Error> {
        if self.fail_saves.get() {
            return Err(InMemoryError);
        }
        let json = serde_json::to_string(library).unwrap();
        *self.store.borrow_mut() = Some(json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

// =============================================================================
// TestLibrary: テスト用データ
// =============================================================================

pub fn new_book(title: &str, author: &str, year: u32, genre: &str, read: bool) -> NewBook {
    NewBook {
        title: title.into(),
        author: author.into(),
        year,
        genre: genre.into(),
        read,
    }
}

pub struct TestLibrary;

impl TestLibrary {
    /// 標準的なテスト用Library:
    /// ```text
    /// Dune           Frank Herbert    1965  Sci-Fi     read
    /// 1984           George Orwell    1949  Dystopian  unread
    /// Animal Farm    George Orwell    1945  Satire     read
    /// ```
    pub fn standard() -> Vec<NewBook> {
        vec![
            new_book("Dune", "Frank Herbert", 1965, "Sci-Fi", true),
            new_book("1984", "George Orwell", 1949, "Dystopian", false),
            new_book("Animal Farm", "George Orwell", 1945, "Satire", true),
        ]
    }

    /// 空のInMemoryRepoでセッションを開始する。
    pub fn empty_service() -> LibraryService<InMemoryRepo> {
        LibraryService::open(InMemoryRepo::new()).unwrap()
    }

    /// standard() を追加済みのセッション。
    pub fn standard_service() -> LibraryService<InMemoryRepo> {
        let mut svc = Self::empty_service();
        for book in Self::standard() {
            svc.add_book(book).unwrap();
        }
        svc
    }
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
