use std::{
    path::Path,
    sync::{Arc, RwLock},
};

use anyhow::Result;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;

/// Key-value core: one JSON-encoded array per key, whole-value replace on
/// every write. Collections are small and callers treat loads as snapshots,
/// so there is no indexing and no delta format.
#[derive(Clone)]
pub struct Kv {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Sqlite(Arc<RwLock<Connection>>),
    /// No storage medium (pre-render, tooling). Loads fall back to seed
    /// data and writes are dropped instead of raising.
    Detached,
}

impl Kv {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    pub fn detached() -> Self {
        Kv {
            backend: Backend::Detached,
        }
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::migrations().to_latest(&mut conn)?;
        Ok(Kv {
            backend: Backend::Sqlite(Arc::new(RwLock::new(conn))),
        })
    }

    fn migrations() -> Migrations<'static> {
        Migrations::new(vec![M::up(
            "CREATE TABLE collection (
                key     TEXT NOT NULL PRIMARY KEY,
                value   TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 1
            );",
        )])
    }

    /// Returns the array stored at `key`. An absent key is seeded with the
    /// supplied list and that list is returned; this is the only moment
    /// seed data is ever written, so an intentionally emptied collection
    /// stays empty. An undecodable value is treated as absent and reseeded
    /// rather than raised.
    pub fn load<T, F>(&self, key: &str, seed: F) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => {
                debug!("KV LOAD: key='{}' detached, returning seed", key);
                return Ok(seed());
            }
        };

        let stored: Option<String> = {
            let conn = conn
                .read()
                .map_err(|_| anyhow::anyhow!("Failed to acquire read lock"))?;
            conn.query_row(
                "SELECT value FROM collection WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?
        };

        match stored {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(items) => {
                    debug!("KV LOAD: key='{}', {} bytes", key, raw.len());
                    Ok(items)
                }
                Err(e) => {
                    warn!("KV LOAD: key='{}' held undecodable JSON ({}), reseeding", key, e);
                    let items = seed();
                    self.save(key, &items)?;
                    Ok(items)
                }
            },
            None => {
                debug!("KV LOAD: key='{}' absent, seeding", key);
                let items = seed();
                self.save(key, &items)?;
                Ok(items)
            }
        }
    }

    /// Replaces the whole array stored at `key` and bumps its version.
    /// Last write wins; see [`Kv::save_if`] for the compare-and-swap
    /// variant.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => {
                debug!("KV SAVE: key='{}' dropped, detached", key);
                return Ok(());
            }
        };

        let raw = serde_json::to_string(items)?;
        let conn = conn
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire write lock"))?;
        conn.execute(
            "INSERT INTO collection (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, version = version + 1",
            params![key, raw],
        )?;
        debug!("KV SAVE: key='{}', {} bytes", key, raw.len());
        Ok(())
    }

    /// Compare-and-swap replace: succeeds only while the stored version
    /// still equals `expected`, otherwise fails with
    /// [`StoreError::Conflict`] carrying the version actually found.
    pub fn save_if<T: Serialize>(&self, key: &str, items: &[T], expected: i64) -> Result<()> {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => return Ok(()),
        };

        let raw = serde_json::to_string(items)?;
        let conn = conn
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire write lock"))?;
        let updated = conn.execute(
            "UPDATE collection SET value = ?1, version = version + 1
             WHERE key = ?2 AND version = ?3",
            params![raw, key, expected],
        )?;
        if updated == 1 {
            debug!("KV SAVE: key='{}' at version {}", key, expected + 1);
            return Ok(());
        }

        let found: i64 = conn
            .query_row(
                "SELECT version FROM collection WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(0);
        Err(StoreError::Conflict {
            key: key.to_string(),
            expected,
            found,
        }
        .into())
    }

    /// Current version of `key`, or None while the key has never been
    /// written (a load will seed it).
    pub fn version(&self, key: &str) -> Result<Option<i64>> {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => return Ok(None),
        };

        let conn = conn
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire read lock"))?;
        Ok(conn
            .query_row(
                "SELECT version FROM collection WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Drops `key` entirely so the next load reseeds it. Returns whether a
    /// row was actually removed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => return Ok(false),
        };

        let conn = conn
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire write lock"))?;
        let removed = conn.execute("DELETE FROM collection WHERE key = ?", [key])?;
        debug!("KV REMOVE: key='{}', removed={}", key, removed > 0);
        Ok(removed > 0)
    }

    /// Single JSON object stored under `key` (the session row). A missing
    /// or undecodable value reads as None.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => return Ok(None),
        };

        let stored: Option<String> = {
            let conn = conn
                .read()
                .map_err(|_| anyhow::anyhow!("Failed to acquire read lock"))?;
            conn.query_row(
                "SELECT value FROM collection WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?
        };

        match stored {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("KV GET: key='{}' held undecodable JSON ({})", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub fn put_object<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let conn = match &self.backend {
            Backend::Sqlite(conn) => conn,
            Backend::Detached => return Ok(()),
        };

        let raw = serde_json::to_string(value)?;
        let conn = conn
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire write lock"))?;
        conn.execute(
            "INSERT INTO collection (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, version = version + 1",
            params![key, raw],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        label: String,
    }

    fn sample() -> Vec<Row> {
        vec![
            Row {
                id: "row-1".to_string(),
                label: "first".to_string(),
            },
            Row {
                id: "row-2".to_string(),
                label: "second".to_string(),
            },
        ]
    }

    #[test]
    fn seeds_once_and_only_once() -> Result<()> {
        let kv = Kv::open_memory()?;

        let first = kv.load("rows", sample)?;
        assert_eq!(first.len(), 2);

        // Second load returns the stored copy, not a second seed.
        let second = kv.load("rows", Vec::<Row>::new)?;
        assert_eq!(second, first);

        // An emptied collection stays empty.
        kv.save::<Row>("rows", &[])?;
        let emptied = kv.load("rows", sample)?;
        assert!(emptied.is_empty());
        Ok(())
    }

    #[test]
    fn undecodable_value_reseeds() -> Result<()> {
        let kv = Kv::open_memory()?;

        // An object where an array is expected fails to decode.
        kv.put_object("rows", &serde_json::json!({"not": "an array"}))?;
        let rows = kv.load("rows", sample)?;
        assert_eq!(rows, sample());

        // And the reseed was persisted.
        let again = kv.load("rows", Vec::<Row>::new)?;
        assert_eq!(again, sample());
        Ok(())
    }

    #[test]
    fn detached_load_returns_seed_without_persisting() -> Result<()> {
        let kv = Kv::detached();

        let rows = kv.load("rows", sample)?;
        assert_eq!(rows.len(), 2);
        kv.save("rows", &rows)?;
        assert_eq!(kv.version("rows")?, None);
        assert!(!kv.remove("rows")?);
        Ok(())
    }

    #[test]
    fn save_bumps_version() -> Result<()> {
        let kv = Kv::open_memory()?;

        kv.load("rows", sample)?;
        assert_eq!(kv.version("rows")?, Some(1));
        kv.save("rows", &sample())?;
        assert_eq!(kv.version("rows")?, Some(2));
        Ok(())
    }

    #[test]
    fn save_if_detects_conflicts() -> Result<()> {
        let kv = Kv::open_memory()?;

        kv.load("rows", sample)?;
        let version = kv.version("rows")?.unwrap();

        // A concurrent writer sneaks in.
        kv.save("rows", &sample())?;

        let err = kv.save_if("rows", &sample(), version).unwrap_err();
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::Conflict { expected, found, .. }) => {
                assert_eq!(*expected, version);
                assert_eq!(*found, version + 1);
            }
            other => panic!("expected Conflict, got {:?}", other),
        }

        // Retrying against the fresh version succeeds.
        let fresh = kv.version("rows")?.unwrap();
        kv.save_if("rows", &sample(), fresh)?;
        Ok(())
    }

    #[test]
    fn opens_on_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("padel.db");

        let kv = Kv::open(&path)?;
        kv.load("rows", sample)?;
        drop(kv);

        let reopened = Kv::open(&path)?;
        let rows: Vec<Row> = reopened.load("rows", Vec::new)?;
        assert_eq!(rows, sample());
        Ok(())
    }
}
