//! Linear schema migrations.
//!
//! Schema evolution is an ordered chain of steps, each tagged with the
//! version it introduces. Opening a database runs the chain from the
//! stored version up to the target version; steps at or below the stored
//! version are skipped, so re-running the chain is idempotent.

use std::fmt;

use tracing::info;

use crate::database::Database;
use crate::error::{Error, Result};

type StepFn = Box<dyn Fn(&mut Database) -> Result<()> + Send + Sync>;

/// One schema change, applied when upgrading past `version - 1`.
pub struct Migration {
    /// Version this step introduces.
    pub version: u64,
    /// Human-readable label, used in logs.
    pub name: &'static str,
    apply: StepFn,
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("version", &self.version)
            .field("name", &self.name)
            .finish()
    }
}

/// An ordered migration chain with a target version.
#[derive(Debug)]
pub struct Migrator {
    target: u64,
    steps: Vec<Migration>,
}

impl Migrator {
    /// Chain targeting `target`; steps above it never run.
    pub fn new(target: u64) -> Self {
        Self {
            target,
            steps: Vec::new(),
        }
    }

    /// Append a step. Steps may be added out of order; they run sorted by
    /// version.
    pub fn step(
        mut self,
        version: u64,
        name: &'static str,
        apply: impl Fn(&mut Database) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.steps.push(Migration {
            version,
            name,
            apply: Box::new(apply),
        });
        self.steps.sort_by_key(|s| s.version);
        self
    }

    /// Version the chain upgrades to.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Apply pending steps to `db`, returning the version it started at.
    ///
    /// Leaves `db.version` at the partially-migrated step on failure, so a
    /// fixed chain can resume from there.
    pub fn run(&self, db: &mut Database) -> Result<u64> {
        let from = db.version;
        if from > self.target {
            return Err(Error::Version(format!(
                "Database {} is at version {}, above target {}",
                db.name, from, self.target
            )));
        }

        for step in &self.steps {
            if step.version <= from || step.version > self.target {
                continue;
            }
            info!(db = %db.name, version = step.version, step = step.name, "applying migration");
            (step.apply)(db)?;
            db.version = step.version;
        }
        db.version = self.target;
        Ok(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyPath;

    fn chain() -> Migrator {
        Migrator::new(3)
            .step(2, "create items", |db| {
                db.create_object_store("items", KeyPath::single("id"), false)
            })
            .step(3, "index items by name", |db| {
                db.object_store_mut("items")?
                    .create_index("name", KeyPath::single("name"), true)
            })
    }

    #[test]
    fn test_runs_from_zero() {
        let mut db = Database::new("test");
        let from = chain().run(&mut db).unwrap();

        assert_eq!(from, 0);
        assert_eq!(db.version, 3);
        assert!(db.has_object_store("items"));
        assert!(db.object_store("items").unwrap().index("name").is_ok());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut db = Database::new("test");
        let migrator = chain();
        migrator.run(&mut db).unwrap();
        let before = db.object_store_names().len();

        // All steps are at or below the stored version now.
        migrator.run(&mut db).unwrap();
        assert_eq!(db.version, 3);
        assert_eq!(db.object_store_names().len(), before);
        assert_eq!(db.object_store("items").unwrap().index_names().len(), 1);
    }

    #[test]
    fn test_partial_upgrade() {
        let mut db = Database::new("test");
        Migrator::new(2)
            .step(2, "create items", |db| {
                db.create_object_store("items", KeyPath::single("id"), false)
            })
            .run(&mut db)
            .unwrap();
        assert_eq!(db.version, 2);

        // Later the chain grows; only the new step runs.
        chain().run(&mut db).unwrap();
        assert_eq!(db.version, 3);
        assert!(db.object_store("items").unwrap().index("name").is_ok());
    }

    #[test]
    fn test_downgrade_is_version_error() {
        let mut db = Database::new("test");
        chain().run(&mut db).unwrap();

        let err = Migrator::new(1).run(&mut db);
        assert!(matches!(err, Err(Error::Version(_))));
    }

    #[test]
    fn test_placeholder_versions_skipped() {
        // A target above the last step still lands on the target version.
        let mut db = Database::new("test");
        Migrator::new(5)
            .step(2, "create items", |db| {
                db.create_object_store("items", KeyPath::single("id"), false)
            })
            .run(&mut db)
            .unwrap();
        assert_eq!(db.version, 5);
    }
}
