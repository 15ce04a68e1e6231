//! SQLite storage backend

use super::traits::{OpenStore, ResourceService, StorageError, StorageResult};
use crate::graph::{Dataset, Iri, Quad};
use crate::resource::{Binary, InteractionModel, Resource, ResourceState, Session};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// SQLite-backed resource store
///
/// One database file with tables for resources, their quads, and the audit
/// log. The connection sits behind a mutex; every call runs on the blocking
/// pool so async callers are never stalled on disk IO.
pub struct SqliteResourceService {
    conn: Arc<Mutex<Connection>>,
    interaction_models: Vec<InteractionModel>,
}

/// Columns of one `resources` row
struct ResourceRow {
    interaction_model: String,
    modified: String,
    container: Option<String>,
    binary_json: Option<String>,
    deleted: bool,
}

impl SqliteResourceService {
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                identifier TEXT PRIMARY KEY,
                interaction_model TEXT NOT NULL,
                modified TEXT NOT NULL,
                container TEXT,
                binary_json TEXT,
                deleted INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS quads (
                identifier TEXT NOT NULL,
                graph TEXT NOT NULL,
                quad_json TEXT NOT NULL,
                FOREIGN KEY (identifier) REFERENCES resources(identifier) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_quads_identifier
                ON quads(identifier, graph);

            -- Append-only: rows are never updated or deleted
            CREATE TABLE IF NOT EXISTS audit (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                identifier TEXT NOT NULL,
                session TEXT NOT NULL,
                quad_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_audit_identifier
                ON audit(identifier, seq);

            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            interaction_models: InteractionModel::ALL.to_vec(),
        }
    }

    pub fn with_interaction_models(mut self, interaction_models: Vec<InteractionModel>) -> Self {
        self.interaction_models = interaction_models;
        self
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StorageResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|e| StorageError::Internal(format!("lock poisoned: {}", e)))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| StorageError::Internal(format!("storage task failed: {}", e)))?
    }

    /// Mark `identifier` deleted, keeping its audit history
    pub async fn tombstone(&self, identifier: &Iri) -> StorageResult<bool> {
        let identifier = identifier.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM quads WHERE identifier = ?1", params![identifier])?;
            let changed = tx.execute(
                "UPDATE resources SET deleted = 1, binary_json = NULL WHERE identifier = ?1",
                params![identifier],
            )?;
            tx.commit()?;
            Ok(changed > 0)
        })
        .await
    }

    fn load_row(conn: &Connection, identifier: &str) -> StorageResult<Option<ResourceRow>> {
        let row = conn
            .query_row(
                "SELECT interaction_model, modified, container, binary_json, deleted
                 FROM resources WHERE identifier = ?1",
                params![identifier],
                |row| {
                    Ok(ResourceRow {
                        interaction_model: row.get(0)?,
                        modified: row.get(1)?,
                        container: row.get(2)?,
                        binary_json: row.get(3)?,
                        deleted: row.get::<_, i64>(4)? != 0,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn row_to_resource(conn: &Connection, identifier: &str, row: ResourceRow) -> StorageResult<Resource> {
        let interaction_model = InteractionModel::from_iri(&row.interaction_model).ok_or_else(|| {
            StorageError::Corrupt {
                identifier: identifier.to_string(),
                message: format!("unknown interaction model {}", row.interaction_model),
            }
        })?;
        let modified = DateTime::parse_from_rfc3339(&row.modified)
            .map_err(|e| StorageError::DateParse(e.to_string()))?
            .with_timezone(&Utc);
        let binary: Option<Binary> = row
            .binary_json
            .map(|json| serde_json::from_str(&json))
            .transpose()?;

        let mut stmt = conn.prepare("SELECT quad_json FROM quads WHERE identifier = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![identifier], |row| row.get::<_, String>(0))?;
        let mut quads = Vec::new();
        for json in rows {
            quads.push(serde_json::from_str::<Quad>(&json?)?);
        }

        Ok(Resource {
            identifier: Iri::new(identifier),
            interaction_model,
            modified,
            container: row.container.map(Iri::new),
            binary,
            quads,
        })
    }

    /// Write the resource row and swap its quads, inside `tx`
    fn write_resource(
        tx: &Transaction<'_>,
        identifier: &str,
        record: &ResourceRecord,
    ) -> StorageResult<()> {
        tx.execute(
            r#"
            INSERT INTO resources (identifier, interaction_model, modified, container, binary_json, deleted)
            VALUES (?1, ?2, ?3, ?4, ?5, 0)
            ON CONFLICT(identifier) DO UPDATE SET
                interaction_model = excluded.interaction_model,
                modified = excluded.modified,
                container = excluded.container,
                binary_json = excluded.binary_json,
                deleted = 0
            "#,
            params![
                identifier,
                record.interaction_model,
                record.modified,
                record.container,
                record.binary_json,
            ],
        )?;
        tx.execute("DELETE FROM quads WHERE identifier = ?1", params![identifier])?;
        let mut stmt =
            tx.prepare("INSERT INTO quads (identifier, graph, quad_json) VALUES (?1, ?2, ?3)")?;
        for (graph, json) in &record.quads {
            stmt.execute(params![identifier, graph, json])?;
        }
        Ok(())
    }
}

/// A resource serialized to column values, ready to move onto the blocking pool
struct ResourceRecord {
    interaction_model: &'static str,
    modified: String,
    container: Option<String>,
    binary_json: Option<String>,
    quads: Vec<(String, String)>,
}

impl ResourceRecord {
    fn new(
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<Self> {
        let quads = dataset
            .iter()
            .map(|q| Ok((q.graph.to_string(), serde_json::to_string(q)?)))
            .collect::<StorageResult<Vec<_>>>()?;
        Ok(Self {
            interaction_model: interaction_model.as_str(),
            modified: session.created.to_rfc3339_opts(SecondsFormat::Nanos, true),
            container: container.map(Iri::to_string),
            binary_json: binary.map(serde_json::to_string).transpose()?,
            quads,
        })
    }
}

impl OpenStore for SqliteResourceService {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }
}

#[async_trait]
impl ResourceService for SqliteResourceService {
    async fn get(&self, identifier: &Iri) -> StorageResult<ResourceState> {
        let identifier = identifier.to_string();
        self.with_conn(move |conn| {
            let Some(row) = Self::load_row(conn, &identifier)? else {
                return Ok(ResourceState::Missing);
            };
            if row.deleted {
                return Ok(ResourceState::Deleted);
            }
            Ok(ResourceState::Present(Self::row_to_resource(conn, &identifier, row)?))
        })
        .await
    }

    async fn create(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<bool> {
        let record = ResourceRecord::new(session, interaction_model, dataset, container, binary)?;
        let identifier = identifier.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let live: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM resources WHERE identifier = ?1 AND deleted = 0",
                    params![identifier],
                    |row| row.get(0),
                )
                .optional()?;
            if live.is_some() {
                return Ok(false);
            }
            Self::write_resource(&tx, &identifier, &record)?;
            tx.commit()?;
            Ok(true)
        })
        .await
    }

    async fn replace(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<bool> {
        let record = ResourceRecord::new(session, interaction_model, dataset, container, binary)?;
        let identifier = identifier.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            Self::write_resource(&tx, &identifier, &record)?;
            tx.commit()?;
            Ok(true)
        })
        .await
    }

    async fn add(
        &self,
        identifier: &Iri,
        session: &Session,
        dataset: &Dataset,
    ) -> StorageResult<bool> {
        let rows = dataset
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let identifier = identifier.to_string();
        let session = session.identifier.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO audit (identifier, session, quad_json) VALUES (?1, ?2, ?3)",
                )?;
                for json in &rows {
                    stmt.execute(params![identifier, session, json])?;
                }
            }
            tx.commit()?;
            Ok(true)
        })
        .await
    }

    async fn audit(&self, identifier: &Iri) -> StorageResult<Vec<Quad>> {
        let identifier = identifier.to_string();
        self.with_conn(move |conn| {
            let mut stmt =
                conn.prepare("SELECT quad_json FROM audit WHERE identifier = ?1 ORDER BY seq")?;
            let rows = stmt.query_map(params![identifier], |row| row.get::<_, String>(0))?;
            let mut quads = Vec::new();
            for json in rows {
                quads.push(serde_json::from_str(&json?)?);
            }
            Ok(quads)
        })
        .await
    }

    fn supported_interaction_models(&self) -> &[InteractionModel] {
        &self.interaction_models
    }
}
