//! XmlStore implementation for SQLite

use crate::connection::SqlitePool;
use crate::error::{is_unique_violation, SqliteError, SqliteResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use xmlrel_core::{
    AttributeId, AttributeRecord, FileId, FileRecord, PendingTag, RecordSink, StoreStats, TagId,
    TagRecord, XmlError, XmlResult, XmlStore,
};

/// SQLite implementation of [`XmlStore`]
#[derive(Clone)]
pub struct SqliteXmlStore {
    pool: SqlitePool,
}

impl SqliteXmlStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run `f` against the connection on the blocking thread pool
    async fn blocking<F, T>(&self, f: F) -> XmlResult<T>
    where
        F: FnOnce(&mut Connection) -> SqliteResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || pool.with_connection_mut(f))
            .await
            .map_err(|e| XmlError::Storage(e.to_string()))?
            .map_err(Into::into)
    }
}

fn insert_file(conn: &Connection, name: &str) -> SqliteResult<FileRecord> {
    conn.execute("INSERT INTO files (name) VALUES (?1)", [name])
        .map_err(|e| {
            if is_unique_violation(&e) {
                SqliteError::DuplicateFile(name.to_string())
            } else {
                e.into()
            }
        })?;

    Ok(FileRecord {
        id: FileId(conn.last_insert_rowid()),
        name: name.to_string(),
    })
}

fn insert_tag(conn: &Connection, file_id: FileId, name: &str) -> SqliteResult<TagId> {
    conn.prepare_cached("INSERT INTO tags (name, file_id) VALUES (?1, ?2)")?
        .execute(params![name, file_id.0])?;
    Ok(TagId(conn.last_insert_rowid()))
}

fn insert_attribute(
    conn: &Connection,
    tag_id: TagId,
    name: &str,
    value: &str,
) -> SqliteResult<AttributeId> {
    conn.prepare_cached("INSERT INTO attributes (name, value, tag_id) VALUES (?1, ?2, ?3)")?
        .execute(params![name, value, tag_id.0])?;
    Ok(AttributeId(conn.last_insert_rowid()))
}

#[async_trait]
impl RecordSink for SqliteXmlStore {
    async fn insert_tag(&self, file_id: FileId, name: &str) -> XmlResult<TagId> {
        let name = name.to_string();
        self.blocking(move |conn| insert_tag(conn, file_id, &name))
            .await
    }

    async fn insert_attribute(
        &self,
        tag_id: TagId,
        name: &str,
        value: &str,
    ) -> XmlResult<AttributeId> {
        let name = name.to_string();
        let value = value.to_string();
        self.blocking(move |conn| insert_attribute(conn, tag_id, &name, &value))
            .await
    }
}

#[async_trait]
impl XmlStore for SqliteXmlStore {
    async fn insert_file(&self, name: &str) -> XmlResult<FileRecord> {
        let name = name.to_string();
        self.blocking(move |conn| insert_file(conn, &name)).await
    }

    async fn find_file(&self, name: &str) -> XmlResult<Option<FileRecord>> {
        let name = name.to_string();

        self.blocking(move |conn| {
            let file = conn
                .query_row(
                    "SELECT id, name FROM files WHERE name = ?1",
                    [&name],
                    |row| {
                        Ok(FileRecord {
                            id: FileId(row.get(0)?),
                            name: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(file)
        })
        .await
    }

    async fn find_tags(&self, file_id: FileId, name: &str) -> XmlResult<Vec<TagRecord>> {
        let name = name.to_string();

        self.blocking(move |conn| {
            let mut stmt = conn.prepare_cached(
                r#"
                SELECT id, name, file_id
                FROM tags
                WHERE file_id = ?1 AND name = ?2
                ORDER BY id
                "#,
            )?;

            let tags = stmt
                .query_map(params![file_id.0, name], |row| {
                    Ok(TagRecord {
                        id: TagId(row.get(0)?),
                        name: row.get(1)?,
                        file_id: FileId(row.get(2)?),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(tags)
        })
        .await
    }

    async fn find_attributes(&self, tag_id: TagId) -> XmlResult<Vec<AttributeRecord>> {
        self.blocking(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, name, value, tag_id FROM attributes WHERE tag_id = ?1 ORDER BY id",
            )?;

            let attributes = stmt
                .query_map([tag_id.0], |row| {
                    Ok(AttributeRecord {
                        id: AttributeId(row.get(0)?),
                        name: row.get(1)?,
                        value: row.get(2)?,
                        tag_id: TagId(row.get(3)?),
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(attributes)
        })
        .await
    }

    async fn commit_document(
        &self,
        file_name: &str,
        tags: Vec<PendingTag>,
    ) -> XmlResult<FileRecord> {
        let file_name = file_name.to_string();

        self.blocking(move |conn| {
            // Dropping the transaction without commit rolls everything back
            let tx = conn.transaction()?;
            let file = insert_file(&tx, &file_name)?;

            for tag in &tags {
                let tag_id = insert_tag(&tx, file.id, &tag.name)?;
                for (name, value) in &tag.attributes {
                    insert_attribute(&tx, tag_id, name, value)?;
                }
            }

            tx.commit()?;
            debug!(file = %file.name, tags = tags.len(), "Committed document");
            Ok(file)
        })
        .await
    }

    async fn stats(&self) -> XmlResult<StoreStats> {
        self.blocking(|conn| {
            let stats = conn.query_row(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM files),
                    (SELECT COUNT(*) FROM tags),
                    (SELECT COUNT(*) FROM attributes)
                "#,
                [],
                |row| {
                    Ok(StoreStats {
                        files: row.get::<_, i64>(0)? as u64,
                        tags: row.get::<_, i64>(1)? as u64,
                        attributes: row.get::<_, i64>(2)? as u64,
                    })
                },
            )?;
            Ok(stats)
        })
        .await
    }
}
