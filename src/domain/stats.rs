use serde::{Deserialize, Serialize};

use super::model::library::Library;

/// Libraryの集計値。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    /// 既読率（%）。小数第2位で丸める。空のLibraryでは0.0。
    pub percent_read: f64,
}

impl LibraryStats {
    pub fn compute(library: &Library) -> Self {
        let total = library.len();
        let read = library.list_all().iter().filter(|b| b.is_read()).count();
        let percent_read = if total == 0 {
            0.0
        } else {
            round2(read as f64 / total as f64 * 100.0)
        };
        Self {
            total,
            read,
            percent_read,
        }
    }

    /// 未読冊数
    pub fn unread(&self) -> usize {
        self.total - self.read
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::book::BookRecord;

    #[test]
    fn empty_library_has_zero_percent() {
        let stats = LibraryStats::compute(&Library::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.read, 0);
        assert_eq!(stats.percent_read, 0.0);
    }

    #[test]
    fn counts_read_books() {
        let library: Library = [
            BookRecord::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true),
            BookRecord::new("1984", "George Orwell", 1949, "Dystopian", false),
        ]
        .into_iter()
        .collect();

        let stats = LibraryStats::compute(&library);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.read, 1);
        assert_eq!(stats.unread(), 1);
        assert_eq!(stats.percent_read, 50.0);
    }

    #[test]
    fn percent_is_rounded_to_two_places() {
        let library: Library = [
            BookRecord::new("A", "X", 2000, "G", true),
            BookRecord::new("B", "X", 2000, "G", false),
            BookRecord::new("C", "X", 2000, "G", false),
        ]
        .into_iter()
        .collect();

        let stats = LibraryStats::compute(&library);
        assert_eq!(stats.percent_read, 33.33);
    }
}
