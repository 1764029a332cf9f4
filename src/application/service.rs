use tracing::{debug, info, warn};

use crate::domain::error::DomainError;
use crate::domain::model::book::{BookRecord, NewBook};
use crate::domain::model::library::Library;
use crate::domain::repository::LibraryRepository;
use crate::domain::stats::LibraryStats;

use super::error::AppError;

/// remove_bookの結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed { count: usize },
    NotFound,
}

/// 1セッション分のユースケース。
/// 起動時に一度だけloadし、以降はメモリ上のLibraryを正とする。
/// 保存に失敗した変更はメモリ上でも巻き戻す（メモリと保存先は常に一致）。
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
    library: Library,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// 保存先からLibraryを読み込んでセッションを開始する。
    pub fn open(repo: R) -> Result<Self, AppError> {
        let library = repo.load().map_err(|e| AppError::Storage(Box::new(e)))?;
        info!(books = library.len(), "library loaded");
        Ok(Self { repo, library })
    }

    /// 本を追加して永続化する。
    pub fn add_book(&mut self, req: NewBook) -> Result<BookRecord, AppError> {
        req.validate()?;
        let before = self.library.len();
        let added = self.library.add(BookRecord::from(req)).clone();
        if let Err(e) = self.repo.save(&self.library) {
            self.library.truncate(before);
            return Err(Self::save_failed(e));
        }
        info!(title = added.title(), total = self.library.len(), "book added");
        Ok(added)
    }

    /// Titleが一致する本を全て削除する。一致なしなら保存もしない。
    pub fn remove_book(&mut self, title: &str) -> Result<RemovalOutcome, AppError> {
        if title.is_empty() {
            return Err(DomainError::MissingField("title").into());
        }
        let mut candidate = self.library.clone();
        let count = candidate.remove(title);
        if count == 0 {
            debug!(title, "no book to remove");
            return Ok(RemovalOutcome::NotFound);
        }
        self.commit(candidate)?;
        info!(title, count, total = self.library.len(), "book removed");
        Ok(RemovalOutcome::Removed { count })
    }

    pub fn search(&self, keyword: &str) -> Vec<&BookRecord> {
        self.library.search(keyword)
    }

    pub fn list_all(&self) -> &[BookRecord] {
        self.library.list_all()
    }

    pub fn statistics(&self) -> LibraryStats {
        LibraryStats::compute(&self.library)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    // --- private ---

    /// 削除後の候補を保存し、成功したときだけ差し替える。
    fn commit(&mut self, candidate: Library) -> Result<(), AppError> {
        self.repo.save(&candidate).map_err(Self::save_failed)?;
        self.library = candidate;
        Ok(())
    }

    fn save_failed(e: R::Error) -> AppError {
        warn!(error = %e, "save failed; in-memory library left unchanged");
        AppError::Storage(Box::new(e))
    }
}
