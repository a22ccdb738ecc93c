//! Implements a SQLite backed document store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};

use crate::{
    Error,
    store::{Document, DocumentStore, ScanPage, TableName, document_key},
};

/// Stores documents as JSON text in a SQLite table, one table per collection.
///
/// Several stores may share one connection, each with its own table.
#[derive(Debug, Clone)]
pub struct SQLiteStore {
    connection: Arc<Mutex<Connection>>,
    table: TableName,
}

impl SQLiteStore {
    /// Create a store for `table` on `connection`, creating the table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(connection: Arc<Mutex<Connection>>, table: TableName) -> Result<Self, Error> {
        {
            let connection = lock(&connection)?;
            create_document_table(&connection, &table)?;
        }

        Ok(Self { connection, table })
    }
}

fn lock(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}

/// Create the table that holds the documents for `table`.
///
/// # Errors
/// Returns an error if there is an SQL error.
fn create_document_table(
    connection: &Connection,
    table: &TableName,
) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS \"{table}\" (
                id TEXT PRIMARY KEY NOT NULL,
                document TEXT NOT NULL
            )"
        ),
        (),
    )?;

    Ok(())
}

fn parse_document(text: &str) -> Result<Document, Error> {
    serde_json::from_str(text).map_err(|error| Error::CorruptDocument(error.to_string()))
}

impl DocumentStore for SQLiteStore {
    fn put(&self, document: Document) -> Result<(), Error> {
        let key = document_key(&document)?.to_owned();
        let text = serde_json::to_string(&document)?;
        let connection = lock(&self.connection)?;

        connection.execute(
            &format!(
                "INSERT INTO \"{}\" (id, document) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET document = excluded.document",
                self.table
            ),
            params![key, text],
        )?;

        Ok(())
    }

    fn scan_page(
        &self,
        exclusive_start_key: Option<&str>,
        limit: usize,
    ) -> Result<ScanPage, Error> {
        let limit = limit.max(1);
        // Fetch one extra row to learn whether another page follows.
        let fetch_limit = i64::try_from(limit + 1).unwrap_or(i64::MAX);
        let connection = lock(&self.connection)?;

        let rows: Vec<(String, String)> = connection
            .prepare(&format!(
                "SELECT id, document FROM \"{}\"
                 WHERE (?1 IS NULL OR id > ?1)
                 ORDER BY id
                 LIMIT ?2",
                self.table
            ))?
            .query_map(params![exclusive_start_key, fetch_limit], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<_, _>>()?;

        let has_more = rows.len() > limit;
        let mut documents = Vec::with_capacity(limit.min(rows.len()));
        let mut last_key = None;

        for (key, text) in rows.into_iter().take(limit) {
            documents.push(parse_document(&text)?);
            last_key = Some(key);
        }

        Ok(ScanPage {
            documents,
            last_evaluated_key: if has_more { last_key } else { None },
        })
    }

    fn delete(&self, key: &str) -> Result<Option<Document>, Error> {
        let connection = lock(&self.connection)?;

        let deleted: Option<String> = connection
            .prepare(&format!(
                "DELETE FROM \"{}\" WHERE id = ?1 RETURNING document",
                self.table
            ))?
            .query_row(params![key], |row| row.get(0))
            .optional()?;

        deleted.as_deref().map(parse_document).transpose()
    }
}
