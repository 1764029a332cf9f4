//! MCP Server for bookshelf-mcp
//!
//! MCP Protocol (stdio) <-> application::LibraryService
//!
//! 5 tools: add_book, remove_book, search_books, list_books, library_stats

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::render::{self, RenderFormat};
use crate::application::service::LibraryService;
use crate::domain::model::book::NewBook;
use crate::infra::json_store::JsonLibraryRepository;

// =============================================================================
// Public entry point
// =============================================================================

/// Libraryを読み込んでMCP Serverを起動する。読み込み失敗は起動エラー。
pub async fn run(library_path: PathBuf) -> anyhow::Result<()> {
    let repo = JsonLibraryRepository::new(&library_path);
    let session = LibraryService::open(repo)
        .with_context(|| format!("failed to load library {}", library_path.display()))?;
    tracing::info!(path = %library_path.display(), "serving library over stdio");

    let server = BookshelfMcpServer::new(session);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct BookshelfMcpServer {
    session: Arc<Mutex<LibraryService<JsonLibraryRepository>>>,
    tool_router: ToolRouter<Self>,
}

impl BookshelfMcpServer {
    fn new(session: LibraryService<JsonLibraryRepository>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }

    fn session(&self) -> Result<MutexGuard<'_, LibraryService<JsonLibraryRepository>>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    fn to_mcp_error(e: AppError) -> McpError {
        match e {
            AppError::Validation(inner) => McpError::invalid_params(
                format!("Please fill in all required fields ({inner})."),
                None,
            ),
            other => McpError::internal_error(format!("{other}"), None),
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for BookshelfMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bookshelf-mcp".to_string(),
                title: Some("Bookshelf MCP: Personal Library Manager".to_string()),
                description: Some(
                    "Personal reading list: add, remove, search, list, and read/unread statistics."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Track the books you own and whether you have read them.\n\
                 \n\
                 Tools: `add_book`, `remove_book` (by exact title, case-insensitive), \
                 `search_books` (title or author substring), `list_books`, `library_stats`."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

fn parse_format(s: Option<&str>) -> Result<RenderFormat, McpError> {
    match s {
        None | Some("table") => Ok(RenderFormat::Table),
        Some("json") => Ok(RenderFormat::Json),
        Some(other) => Err(McpError::invalid_params(
            format!("Unknown format: '{other}'. Use: table, json"),
            None,
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (required)")]
    pub title: String,
    #[schemars(description = "Author (required)")]
    pub author: String,
    #[schemars(description = "Publication year (default: 0)")]
    #[serde(default)]
    pub year: u32,
    #[schemars(description = "Genre (required)")]
    pub genre: String,
    #[schemars(description = "Already read (default: false)")]
    #[serde(default)]
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRemoveBookRequest {
    #[schemars(description = "Exact title to remove (case-insensitive). Removes every match.")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchRequest {
    #[schemars(
        description = "Keyword matched against title or author (case-insensitive substring). Empty matches all."
    )]
    pub keyword: String,
    #[schemars(description = "Output format: 'table' (default) or 'json'")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpListRequest {
    #[schemars(description = "Output format: 'table' (default) or 'json'")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpStatsRequest {}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl BookshelfMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a book to the library. Title, author and genre are required.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut session = self.session()?;
        let added = session
            .add_book(NewBook {
                title: req.title,
                author: req.author,
                year: req.year,
                genre: req.genre,
                read: req.read,
            })
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::added_message(&added),
        )]))
    }

    #[tool(
        name = "remove_book",
        description = "Remove every book whose title matches exactly (case-insensitive).",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn remove_book(
        &self,
        Parameters(req): Parameters<McpRemoveBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        if req.title.is_empty() {
            return Err(McpError::invalid_params("Please enter a book title.", None));
        }
        let mut session = self.session()?;
        let outcome = session
            .remove_book(&req.title)
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::removal_message(&req.title, outcome),
        )]))
    }

    #[tool(
        name = "search_books",
        description = "Find books whose title or author contains the keyword (case-insensitive).",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let format = parse_format(req.format.as_deref())?;
        let session = self.session()?;
        let results = session.search(&req.keyword);
        let text = render::render_search(&results, format).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "list_books",
        description = "Display every book in insertion order.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        Parameters(req): Parameters<McpListRequest>,
    ) -> Result<CallToolResult, McpError> {
        let format = parse_format(req.format.as_deref())?;
        let session = self.session()?;
        let books: Vec<_> = session.list_all().iter().collect();
        let text = render::render_books(&books, format).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "library_stats",
        description = "Total books, books read, and percentage read.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn library_stats(
        &self,
        Parameters(_req): Parameters<McpStatsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let stats = self.session()?.statistics();

        Ok(CallToolResult::success(vec![Content::text(
            render::render_stats(&stats),
        )]))
    }
}
