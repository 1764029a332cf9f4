pub mod book;
pub mod library;
