//! Board history repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist named board snapshots with their boxes as a JSON payload.
//!
//! # Invariants
//! - Snapshots list newest-first by first insertion; overwriting a snapshot
//!   keeps its position.
//! - Payloads are decoded and validated on read-back.
//! - Archiving a board is all-or-nothing: snapshot write, board clear and
//!   pointer reset commit together.

use super::preference_repo::CURRENT_SNAPSHOT_KEY;
use super::{parse_uuid, RepoError, RepoResult};
use crate::model::board::BoardBox;
use crate::model::snapshot::{Snapshot, SnapshotId};
use rusqlite::{params, Connection, Row};

const SNAPSHOT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    saved_at,
    boxes_json
FROM snapshots";

/// Repository interface for board history snapshots.
pub trait SnapshotRepository {
    fn insert_snapshot(&self, snapshot: &Snapshot) -> RepoResult<SnapshotId>;
    /// Overwrites name, timestamp and boxes of an existing snapshot.
    fn update_snapshot(&self, snapshot: &Snapshot) -> RepoResult<()>;
    fn get_snapshot(&self, id: SnapshotId) -> RepoResult<Option<Snapshot>>;
    fn list_snapshots(&self) -> RepoResult<Vec<Snapshot>>;
    fn delete_snapshot(&self, id: SnapshotId) -> RepoResult<()>;
    /// Stores `snapshot` (overwriting it when `overwrite`), empties the live
    /// board and drops the current-snapshot pointer in one transaction.
    ///
    /// Returns how many board boxes were removed.
    fn archive_board(&self, snapshot: &Snapshot, overwrite: bool) -> RepoResult<usize>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn insert_snapshot(&self, snapshot: &Snapshot) -> RepoResult<SnapshotId> {
        insert_snapshot_row(self.conn, snapshot)?;
        Ok(snapshot.id)
    }

    fn update_snapshot(&self, snapshot: &Snapshot) -> RepoResult<()> {
        update_snapshot_row(self.conn, snapshot)
    }

    fn get_snapshot(&self, id: SnapshotId) -> RepoResult<Option<Snapshot>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SNAPSHOT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_snapshot_row(row)?));
        }

        Ok(None)
    }

    fn list_snapshots(&self) -> RepoResult<Vec<Snapshot>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SNAPSHOT_SELECT_SQL} ORDER BY seq DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut snapshots = Vec::new();
        while let Some(row) = rows.next()? {
            snapshots.push(parse_snapshot_row(row)?);
        }

        Ok(snapshots)
    }

    fn delete_snapshot(&self, id: SnapshotId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM snapshots WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn archive_board(&self, snapshot: &Snapshot, overwrite: bool) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        if overwrite {
            update_snapshot_row(&tx, snapshot)?;
        } else {
            insert_snapshot_row(&tx, snapshot)?;
        }
        let cleared = tx.execute("DELETE FROM board_boxes;", [])?;
        tx.execute(
            "DELETE FROM preferences WHERE key = ?1;",
            [CURRENT_SNAPSHOT_KEY],
        )?;
        tx.commit()?;
        Ok(cleared)
    }
}

fn insert_snapshot_row(conn: &Connection, snapshot: &Snapshot) -> RepoResult<()> {
    let payload = encode_boxes(&snapshot.boxes)?;
    conn.execute(
        "INSERT INTO snapshots (uuid, name, saved_at, boxes_json)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            snapshot.id.to_string(),
            snapshot.name.as_str(),
            snapshot.saved_at,
            payload,
        ],
    )?;
    Ok(())
}

fn update_snapshot_row(conn: &Connection, snapshot: &Snapshot) -> RepoResult<()> {
    let payload = encode_boxes(&snapshot.boxes)?;
    let changed = conn.execute(
        "UPDATE snapshots
         SET
            name = ?1,
            saved_at = ?2,
            boxes_json = ?3
         WHERE uuid = ?4;",
        params![
            snapshot.name.as_str(),
            snapshot.saved_at,
            payload,
            snapshot.id.to_string(),
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound(snapshot.id));
    }

    Ok(())
}

fn encode_boxes(boxes: &[BoardBox]) -> RepoResult<String> {
    for item in boxes {
        item.validate()?;
    }
    serde_json::to_string(boxes)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode snapshot boxes: {err}")))
}

fn parse_snapshot_row(row: &Row<'_>) -> RepoResult<Snapshot> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "snapshots.uuid")?;

    let payload: String = row.get("boxes_json")?;
    let boxes: Vec<BoardBox> = serde_json::from_str(&payload).map_err(|err| {
        RepoError::InvalidData(format!("invalid boxes payload in snapshots.boxes_json: {err}"))
    })?;
    for item in &boxes {
        item.validate()?;
    }

    Ok(Snapshot {
        id,
        name: row.get("name")?,
        saved_at: row.get("saved_at")?,
        boxes,
    })
}
