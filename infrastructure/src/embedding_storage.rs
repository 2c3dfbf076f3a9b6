use anyhow::anyhow;
use domain::models::{Embedding, TextChunk};
use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use shared::types::Result;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite store of chunk embeddings keyed by a document content digest.
pub struct EmbeddingStorage {
    conn: Mutex<Connection>,
}

impl EmbeddingStorage {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Self::setup_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::setup_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn setup_db(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "
            PRAGMA synchronous=NORMAL;
            CREATE TABLE IF NOT EXISTS documents (
                digest TEXT PRIMARY KEY,
                chunk_count INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS embeddings (
                digest TEXT NOT NULL,
                chunk_index INTEGER NOT NULL,
                chunk_id TEXT NOT NULL,
                document_id TEXT NOT NULL,
                start INTEGER NOT NULL,
                text TEXT NOT NULL,
                vector BLOB NOT NULL,
                PRIMARY KEY (digest, chunk_index)
            );
        ",
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("embedding cache lock poisoned"))
    }

    /// Cache key for a document's chunk vectors under the given settings.
    pub fn digest(model: &str, chunk_size: usize, chunk_overlap: usize, text: &str) -> String {
        let key = format!("{model}\u{0}{chunk_size}\u{0}{chunk_overlap}\u{0}{text}");
        format!("{:x}", md5::compute(key.as_bytes()))
    }

    /// Replace everything stored under `digest` with `embeddings`.
    pub fn insert_embeddings(&self, digest: &str, embeddings: &[Embedding]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM embeddings WHERE digest = ?1", params![digest])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO embeddings
                     (digest, chunk_index, chunk_id, document_id, start, text, vector)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for embedding in embeddings {
                let chunk = &embedding.chunk;
                let vector_bytes = serde_json::to_vec(&embedding.vector)?;
                stmt.execute(params![
                    digest,
                    chunk.index as i64,
                    chunk.id,
                    chunk.document_id,
                    chunk.start as i64,
                    chunk.text,
                    vector_bytes
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO documents (digest, chunk_count) VALUES (?1, ?2)",
            params![digest, embeddings.len() as i64],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Stored embeddings in chunk order, or `None` if the digest is unknown
    /// or its rows are incomplete.
    pub fn get_embeddings(&self, digest: &str) -> Result<Option<Vec<Embedding>>> {
        let conn = self.lock()?;
        let expected: Option<i64> = conn
            .query_row(
                "SELECT chunk_count FROM documents WHERE digest = ?1",
                [digest],
                |row| row.get(0),
            )
            .optional()?;
        let Some(expected) = expected else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT chunk_index, chunk_id, document_id, start, text, vector
             FROM embeddings WHERE digest = ?1 ORDER BY chunk_index",
        )?;
        let mut rows = stmt.query([digest])?;
        let mut embeddings = Vec::new();
        while let Some(row) = rows.next()? {
            let index: i64 = row.get(0)?;
            let start: i64 = row.get(3)?;
            let vector_bytes: Vec<u8> = row.get(5)?;
            embeddings.push(Embedding {
                chunk: TextChunk {
                    index: index as usize,
                    id: row.get(1)?,
                    document_id: row.get(2)?,
                    start: start as usize,
                    text: row.get(4)?,
                },
                vector: serde_json::from_slice(&vector_bytes)?,
            });
        }
        if embeddings.len() as i64 != expected {
            return Ok(None);
        }
        Ok(Some(embeddings))
    }
}
