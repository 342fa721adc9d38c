//! Session Persistence
//!
//! Persists wizard sessions to SQLite and supports resume after restart.
//! The core never touches this store; the caller saves a navigator snapshot
//! here and rebuilds the navigator from it on resume.

use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CatalogMode, Language, SessionSnapshot};
use crate::utils::{AppError, AppResult};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Open a pooled connection to a database file.
pub fn open_pool(path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(path);
    Pool::builder()
        .build(manager)
        .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))
}

/// In-memory pool for tests and ephemeral sessions.
pub fn memory_pool() -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::memory();
    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))
}

/// A wizard session row as stored in SQLite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Unique session ID
    pub id: String,
    /// Status: "in_progress", "completed"
    pub status: String,
    /// Catalog language the session committed to
    pub language: Language,
    /// Catalog mode the session committed to
    pub mode: CatalogMode,
    /// Current block index
    pub block_index: usize,
    /// Current question index within the block's visible list
    pub question_index: usize,
    /// JSON-serialized profile field map
    pub profile: String,
    /// Created timestamp (ISO-8601)
    pub created_at: String,
    /// Last updated timestamp (ISO-8601)
    pub updated_at: String,
}

impl PersistedSession {
    /// Start a fresh in-progress session record.
    pub fn start(language: Language, mode: CatalogMode) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            status: "in_progress".to_string(),
            language,
            mode,
            block_index: 0,
            question_index: 0,
            profile: "{}".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Fold a navigator snapshot into this record and refresh the timestamp.
    pub fn apply_snapshot(&mut self, snapshot: &SessionSnapshot) -> AppResult<()> {
        self.block_index = snapshot.block_index;
        self.question_index = snapshot.question_index;
        self.profile = serde_json::to_string(&snapshot.profile)?;
        self.updated_at = Utc::now().to_rfc3339();
        Ok(())
    }

    /// Rebuild the navigator snapshot persisted in this record.
    pub fn snapshot(&self) -> AppResult<SessionSnapshot> {
        Ok(SessionSnapshot {
            block_index: self.block_index,
            question_index: self.question_index,
            profile: serde_json::from_str(&self.profile)?,
        })
    }

    /// Mark the session completed and refresh the timestamp.
    pub fn complete(&mut self) {
        self.status = "completed".to_string();
        self.updated_at = Utc::now().to_rfc3339();
    }
}

fn language_tag(language: Language) -> &'static str {
    match language {
        Language::En => "en",
        Language::Es => "es",
    }
}

fn parse_language(tag: &str) -> AppResult<Language> {
    match tag {
        "en" => Ok(Language::En),
        "es" => Ok(Language::Es),
        other => Err(AppError::catalog(format!("unknown language '{}'", other))),
    }
}

fn mode_tag(mode: CatalogMode) -> &'static str {
    match mode {
        CatalogMode::Fused => "fused",
        CatalogMode::Wizard => "wizard",
    }
}

fn parse_mode(tag: &str) -> AppResult<CatalogMode> {
    match tag {
        "fused" => Ok(CatalogMode::Fused),
        "wizard" => Ok(CatalogMode::Wizard),
        other => Err(AppError::catalog(format!("unknown mode '{}'", other))),
    }
}

/// Manages wizard session persistence in SQLite
#[derive(Clone)]
pub struct SessionStore {
    pool: DbPool,
}

impl SessionStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Initialize the session table (called during database setup)
    pub fn init_schema(&self) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS wizard_sessions (
                id TEXT PRIMARY KEY,
                status TEXT NOT NULL DEFAULT 'in_progress',
                language TEXT NOT NULL DEFAULT 'en',
                mode TEXT NOT NULL DEFAULT 'fused',
                block_index INTEGER NOT NULL DEFAULT 0,
                question_index INTEGER NOT NULL DEFAULT 0,
                profile TEXT NOT NULL DEFAULT '{}',
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_wizard_sessions_status
             ON wizard_sessions(status)",
            [],
        )?;

        Ok(())
    }

    /// Insert a new session record
    pub fn create(&self, session: &PersistedSession) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        conn.execute(
            "INSERT INTO wizard_sessions (id, status, language, mode, block_index,
             question_index, profile, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                session.id,
                session.status,
                language_tag(session.language),
                mode_tag(session.mode),
                session.block_index as i64,
                session.question_index as i64,
                session.profile,
                session.created_at,
                session.updated_at,
            ],
        )?;

        Ok(())
    }

    /// Update an existing session
    pub fn update(&self, session: &PersistedSession) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        conn.execute(
            "UPDATE wizard_sessions SET status = ?2, language = ?3, mode = ?4,
             block_index = ?5, question_index = ?6, profile = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                session.id,
                session.status,
                language_tag(session.language),
                mode_tag(session.mode),
                session.block_index as i64,
                session.question_index as i64,
                session.profile,
                session.updated_at,
            ],
        )?;

        Ok(())
    }

    /// Get a session by ID
    pub fn get(&self, id: &str) -> AppResult<Option<PersistedSession>> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        let result = conn.query_row(
            "SELECT id, status, language, mode, block_index, question_index,
             profile, created_at, updated_at
             FROM wizard_sessions WHERE id = ?1",
            params![id],
            Self::read_row,
        );

        match result {
            Ok(row) => Ok(Some(Self::finish_row(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// List sessions, optionally filtered by status, newest first
    pub fn list(&self, status_filter: Option<&str>) -> AppResult<Vec<PersistedSession>> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        let rows: Vec<RawSessionRow> = if let Some(status) = status_filter {
            let mut stmt = conn.prepare(
                "SELECT id, status, language, mode, block_index, question_index,
                 profile, created_at, updated_at
                 FROM wizard_sessions WHERE status = ?1 ORDER BY updated_at DESC",
            )?;
            let mapped = stmt.query_map(params![status], Self::read_row)?;
            mapped.filter_map(|r| r.ok()).collect()
        } else {
            let mut stmt = conn.prepare(
                "SELECT id, status, language, mode, block_index, question_index,
                 profile, created_at, updated_at
                 FROM wizard_sessions ORDER BY updated_at DESC",
            )?;
            let mapped = stmt.query_map([], Self::read_row)?;
            mapped.filter_map(|r| r.ok()).collect()
        };

        rows.into_iter().map(Self::finish_row).collect()
    }

    /// Delete a session
    pub fn delete(&self, id: &str) -> AppResult<()> {
        let conn = self
            .pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))?;

        conn.execute("DELETE FROM wizard_sessions WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSessionRow> {
        Ok(RawSessionRow {
            id: row.get(0)?,
            status: row.get(1)?,
            language: row.get(2)?,
            mode: row.get(3)?,
            block_index: row.get(4)?,
            question_index: row.get(5)?,
            profile: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn finish_row(raw: RawSessionRow) -> AppResult<PersistedSession> {
        Ok(PersistedSession {
            id: raw.id,
            status: raw.status,
            language: parse_language(&raw.language)?,
            mode: parse_mode(&raw.mode)?,
            block_index: raw.block_index as usize,
            question_index: raw.question_index as usize,
            profile: raw.profile,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

/// Untyped row as read from SQLite, before tag parsing
struct RawSessionRow {
    id: String,
    status: String,
    language: String,
    mode: String,
    block_index: i64,
    question_index: i64,
    profile: String,
    created_at: String,
    updated_at: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish()
    }
}
