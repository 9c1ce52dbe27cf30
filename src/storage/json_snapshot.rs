use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::TableSource;
use crate::errors::{TrackerError, TrackerResult};
use crate::ledger::MonthlyTable;

/// Tables keyed by owning user id, as exported from the data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: BTreeMap<String, Vec<MonthlyTable>>,
}

impl Snapshot {
    /// Reads a snapshot and rejects negative or non-finite budgets and amounts.
    pub fn load(path: &Path) -> TrackerResult<Self> {
        let data = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        snapshot.validate()?;
        info!(
            path = %path.display(),
            users = snapshot.users.len(),
            "loaded table snapshot"
        );
        Ok(snapshot)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        self.users
            .values()
            .flatten()
            .try_for_each(MonthlyTable::validate)
    }

    pub fn save(&self, path: &Path) -> TrackerResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    pub fn insert(&mut self, user_id: impl Into<String>, table: MonthlyTable) {
        self.users.entry(user_id.into()).or_default().push(table);
    }
}

impl TableSource for Snapshot {
    fn list_tables_for_user(&self, user_id: &str) -> TrackerResult<Vec<MonthlyTable>> {
        if user_id.trim().is_empty() {
            return Err(TrackerError::Source("user id must not be empty".into()));
        }
        let tables = self.users.get(user_id).cloned().unwrap_or_default();
        debug!(user_id, tables = tables.len(), "listed tables");
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn unknown_user_has_no_tables() {
        let snapshot = Snapshot::default();
        let tables = snapshot.list_tables_for_user("nobody").unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn empty_user_id_is_a_source_error() {
        let err = Snapshot::default()
            .list_tables_for_user(" ")
            .expect_err("empty id");
        assert!(matches!(err, TrackerError::Source(_)));
    }

    #[test]
    fn load_rejects_negative_amounts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.json");
        let json = r#"{
            "users": {
                "ana": [{
                    "id": "6f1c1f5e-8a43-4a4a-9d7e-1d2b3c4d5e6f",
                    "name": "Enero 2026",
                    "budget": 1000,
                    "createdAt": "2026-01-01T00:00:00Z",
                    "expenses": [{
                        "id": "0e0c6c1e-2b6f-4d3d-8a7c-9f1e2d3c4b5a",
                        "name": "Refund",
                        "amount": -250,
                        "createdAt": "2026-01-02T15:30:00Z"
                    }]
                }]
            }
        }"#;
        fs::write(&path, json).expect("write snapshot");

        let err = Snapshot::load(&path).expect_err("negative amount");
        assert!(matches!(err, TrackerError::Validation(_)));
    }

    #[test]
    fn load_rejects_negative_budget() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.json");
        let json = r#"{ "users": { "ana": [{
            "id": "6f1c1f5e-8a43-4a4a-9d7e-1d2b3c4d5e6f",
            "name": "Enero 2026",
            "budget": -50,
            "created_at": "2026-01-01T00:00:00Z"
        }] } }"#;
        fs::write(&path, json).expect("write snapshot");

        assert!(matches!(
            Snapshot::load(&path),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn insert_groups_tables_by_user() {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.insert("ana", MonthlyTable::new("Enero 2026", created));
        snapshot.insert("ana", MonthlyTable::new("Febrero 2026", created));
        snapshot.insert("leo", MonthlyTable::new("January 2026", created));
        assert_eq!(snapshot.list_tables_for_user("ana").unwrap().len(), 2);
        assert_eq!(snapshot.list_tables_for_user("leo").unwrap().len(), 1);
    }
}
