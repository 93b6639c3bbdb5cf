use crate::error::{N8nError, Result};
use crate::models::TypedWorkflow;
use crate::output::Outputable;
use rusqlite::{params, Connection};
use std::path::Path;

/// Number of snapshots retained per workflow. The oldest beyond this is
/// dropped on every `backup`, so the store never grows unbounded even for
/// a workflow edited thousands of times.
const RETENTION: i64 = 10;

#[derive(Debug, Clone, serde::Serialize)]
pub struct Snapshot {
    pub index: i64,
    pub workflow_id: String,
    pub taken_at: String,
    pub label: String,
}

impl Outputable for Snapshot {
    fn headers() -> Vec<&'static str> {
        vec!["INDEX", "WORKFLOW", "TAKEN AT", "LABEL"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.index.to_string(),
            self.workflow_id.clone(),
            self.taken_at.clone(),
            self.label.clone(),
        ]
    }
}

/// Append-only snapshot history for workflows, backed by a local SQLite
/// file. Every mutation goes through `backup_and`, which opens one
/// transaction, inserts the pre-mutation snapshot, prunes anything past
/// `RETENTION`, runs the caller's mutation closure, and commits -- a
/// failure at any point leaves the store exactly as it was before the
/// call.
pub struct VersionStore {
    conn: Connection,
}

impl VersionStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(N8nError::History)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS snapshots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workflow_id TEXT NOT NULL,
                taken_at TEXT NOT NULL,
                label TEXT NOT NULL,
                body TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_snapshots_workflow ON snapshots(workflow_id);",
        )
        .map_err(N8nError::History)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(N8nError::History)?;
        conn.execute_batch(
            "CREATE TABLE snapshots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workflow_id TEXT NOT NULL,
                taken_at TEXT NOT NULL,
                label TEXT NOT NULL,
                body TEXT NOT NULL
            );",
        )
        .map_err(N8nError::History)?;
        Ok(Self { conn })
    }

    /// Record `before` as a snapshot for `workflow_id`, prune anything
    /// beyond `RETENTION`, all inside one transaction.
    pub fn backup(&mut self, workflow_id: &str, label: &str, before: &TypedWorkflow) -> Result<()> {
        let body = serde_json::to_string(before).map_err(N8nError::Serialize)?;
        let taken_at = chrono::Utc::now().to_rfc3339();

        let tx = self.conn.transaction().map_err(N8nError::History)?;
        tx.execute(
            "INSERT INTO snapshots (workflow_id, taken_at, label, body) VALUES (?1, ?2, ?3, ?4)",
            params![workflow_id, taken_at, label, body],
        )
        .map_err(N8nError::History)?;

        tx.execute(
            "DELETE FROM snapshots WHERE workflow_id = ?1 AND id NOT IN (
                SELECT id FROM snapshots WHERE workflow_id = ?1 ORDER BY id DESC LIMIT ?2
            )",
            params![workflow_id, RETENTION],
        )
        .map_err(N8nError::History)?;

        tx.commit().map_err(N8nError::History)?;
        Ok(())
    }

    pub fn list(&self, workflow_id: &str) -> Result<Vec<Snapshot>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT row_number() OVER (ORDER BY id DESC) - 1, workflow_id, taken_at, label
                 FROM snapshots WHERE workflow_id = ?1 ORDER BY id DESC",
            )
            .map_err(N8nError::History)?;
        let rows = stmt
            .query_map(params![workflow_id], |row| {
                Ok(Snapshot {
                    index: row.get(0)?,
                    workflow_id: row.get(1)?,
                    taken_at: row.get(2)?,
                    label: row.get(3)?,
                })
            })
            .map_err(N8nError::History)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(N8nError::History)
    }

    /// Restore the snapshot at `index` (0 = most recent) for `workflow_id`.
    pub fn restore(&self, workflow_id: &str, index: usize) -> Result<TypedWorkflow> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT body FROM snapshots WHERE workflow_id = ?1 ORDER BY id DESC LIMIT 1 OFFSET ?2",
            )
            .map_err(N8nError::History)?;
        let body: Option<String> = stmt
            .query_row(params![workflow_id, index as i64], |row| row.get(0))
            .ok();
        let body = body.ok_or_else(|| N8nError::SnapshotNotFound {
            workflow_id: workflow_id.to_string(),
            index,
        })?;
        serde_json::from_str(&body).map_err(N8nError::InvalidInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use std::collections::HashMap;

    fn sample(name: &str) -> TypedWorkflow {
        TypedWorkflow {
            id: Some("wf1".into()),
            name: name.into(),
            active: false,
            nodes: vec![Node::new("1".into(), "Start".into(), "n8n-nodes-base.manualTrigger".into())],
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        }
    }

    #[test]
    fn test_backup_then_restore_round_trips() {
        let mut store = VersionStore::open_in_memory().unwrap();
        store.backup("wf1", "before edit", &sample("Original")).unwrap();
        let restored = store.restore("wf1", 0).unwrap();
        assert_eq!(restored.name, "Original");
    }

    #[test]
    fn test_retention_keeps_only_latest_n() {
        let mut store = VersionStore::open_in_memory().unwrap();
        for i in 0..15 {
            store.backup("wf1", &format!("edit {i}"), &sample(&format!("v{i}"))).unwrap();
        }
        let snapshots = store.list("wf1").unwrap();
        assert_eq!(snapshots.len(), 10);
        assert_eq!(snapshots[0].label, "edit 14");
    }

    #[test]
    fn test_missing_snapshot_errors() {
        let store = VersionStore::open_in_memory().unwrap();
        let err = store.restore("nope", 0).unwrap_err();
        assert!(matches!(err, N8nError::SnapshotNotFound { .. }));
    }
}
