//! The database factory: an owned registry of named databases.
//!
//! Replaces the ambient global handle pattern: callers hold a `Factory`,
//! open databases through it, and reach stored state via scoped closures.

use hashbrown::HashMap;
use std::sync::Arc;
use timber_common::OptionExt;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::migrate::Migrator;

/// Lifecycle events emitted while opening and deleting databases.
#[derive(Debug, Clone)]
pub enum DbEvent {
    /// The stored version was below the requested one; migrations ran.
    UpgradeNeeded {
        name: String,
        old_version: u64,
        new_version: u64,
    },
    /// The database is open at the requested version.
    Opened { name: String, version: u64 },
    /// Opening failed.
    Error { name: String, error: Error },
    /// The database was deleted.
    Deleted { name: String },
}

/// Name and version of a registered database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub name: String,
    pub version: u64,
}

/// Registry of databases, shared behind an async lock.
pub struct Factory {
    databases: Arc<RwLock<HashMap<String, Database>>>,
    event_tx: mpsc::UnboundedSender<DbEvent>,
}

impl Factory {
    /// Create a factory and the receiver for its lifecycle events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DbEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            Self {
                databases: Arc::new(RwLock::new(HashMap::new())),
                event_tx,
            },
            event_rx,
        )
    }

    /// Open (creating if absent) a database at `migrator.target()`.
    ///
    /// Runs pending migration steps from the stored version. Opening a
    /// database whose stored version is above the target fails with
    /// [`Error::Version`].
    pub async fn open(&self, name: &str, migrator: &Migrator) -> Result<u64> {
        let mut databases = self.databases.write().await;
        let db = databases
            .entry(name.to_string())
            .or_insert_with(|| Database::new(name));

        let old_version = db.version;
        let new_version = migrator.target();

        if old_version < new_version {
            let _ = self.event_tx.send(DbEvent::UpgradeNeeded {
                name: name.to_string(),
                old_version,
                new_version,
            });
        }

        match migrator.run(db) {
            Ok(_) => {
                info!(db = name, version = new_version, "database open");
                let _ = self.event_tx.send(DbEvent::Opened {
                    name: name.to_string(),
                    version: new_version,
                });
                Ok(new_version)
            }
            Err(error) => {
                warn!(db = name, %error, "open failed");
                let _ = self.event_tx.send(DbEvent::Error {
                    name: name.to_string(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Remove a database and all its stores.
    pub async fn delete_database(&self, name: &str) {
        let mut databases = self.databases.write().await;
        if databases.remove(name).is_some() {
            let _ = self.event_tx.send(DbEvent::Deleted {
                name: name.to_string(),
            });
        }
    }

    /// Names and versions of every registered database.
    pub async fn databases(&self) -> Vec<DatabaseInfo> {
        let databases = self.databases.read().await;
        let mut infos: Vec<_> = databases
            .values()
            .map(|db| DatabaseInfo {
                name: db.name.clone(),
                version: db.version,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Run `f` with exclusive access to the named database.
    pub async fn with_database<F, R>(&self, name: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut Database) -> Result<R>,
    {
        let mut databases = self.databases.write().await;
        let db = databases
            .get_mut(name)
            .ok_or_missing(format!("Database {}", name), Error::NotFound)?;
        f(db)
    }
}
