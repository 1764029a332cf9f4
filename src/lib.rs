//! bookshelf-mcp: 個人用の読書リスト。
//!
//! domain (Record Store / Statistics) ← application (Session) ← interface (MCP)
//! infra は domain::repository を実装する。

pub mod application;
pub mod domain;
pub mod infra;
pub mod interface;
