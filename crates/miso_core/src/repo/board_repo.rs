//! Board box repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the live notes board in insertion (z-) order.
//! - Replace the whole board atomically when a snapshot is loaded.
//!
//! # Invariants
//! - `list_boxes` returns boxes ordered by insertion, oldest first.
//! - Updating a box never changes its z-order.
//! - Write paths call `BoardBox::validate()` before SQL mutations.

use super::{bool_to_int, int_to_bool, parse_uuid, RepoError, RepoResult};
use crate::model::board::{BoardBox, BoxId, BoxKind};
use rusqlite::{params, Connection, Row};

const BOX_SELECT_SQL: &str = "SELECT
    uuid,
    kind,
    content,
    color,
    x,
    y,
    width,
    height,
    expanded,
    expanded_width,
    expanded_height,
    topic_name,
    updated_at
FROM board_boxes";

const BOX_INSERT_SQL: &str = "INSERT INTO board_boxes (
    uuid,
    kind,
    content,
    color,
    x,
    y,
    width,
    height,
    expanded,
    expanded_width,
    expanded_height,
    topic_name,
    updated_at
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);";

/// Repository interface for the live notes board.
pub trait BoardRepository {
    /// Appends a box on top of the current z-order.
    fn insert_box(&self, item: &BoardBox) -> RepoResult<BoxId>;
    fn update_box(&self, item: &BoardBox) -> RepoResult<()>;
    fn get_box(&self, id: BoxId) -> RepoResult<Option<BoardBox>>;
    fn list_boxes(&self) -> RepoResult<Vec<BoardBox>>;
    fn delete_box(&self, id: BoxId) -> RepoResult<()>;
    /// Removes every box and returns how many were deleted.
    fn clear_boxes(&self) -> RepoResult<usize>;
    /// Replaces the full board with `items`, preserving their order.
    fn replace_boxes(&self, items: &[BoardBox]) -> RepoResult<()>;
    fn count_boxes(&self) -> RepoResult<u64>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn insert_box(&self, item: &BoardBox) -> RepoResult<BoxId> {
        insert_box_row(self.conn, item)?;
        Ok(item.id)
    }

    fn update_box(&self, item: &BoardBox) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE board_boxes
             SET
                kind = ?1,
                content = ?2,
                color = ?3,
                x = ?4,
                y = ?5,
                width = ?6,
                height = ?7,
                expanded = ?8,
                expanded_width = ?9,
                expanded_height = ?10,
                topic_name = ?11,
                updated_at = ?12
             WHERE uuid = ?13;",
            params![
                item.kind.as_str(),
                item.content.as_str(),
                item.color.as_str(),
                item.x,
                item.y,
                item.width,
                item.height,
                bool_to_int(item.expanded),
                item.expanded_width,
                item.expanded_height,
                item.topic_name.as_str(),
                item.updated_at,
                item.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }

        Ok(())
    }

    fn get_box(&self, id: BoxId) -> RepoResult<Option<BoardBox>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOX_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_box_row(row)?));
        }

        Ok(None)
    }

    fn list_boxes(&self) -> RepoResult<Vec<BoardBox>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOX_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut boxes = Vec::new();
        while let Some(row) = rows.next()? {
            boxes.push(parse_box_row(row)?);
        }

        Ok(boxes)
    }

    fn delete_box(&self, id: BoxId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM board_boxes WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn clear_boxes(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM board_boxes;", [])?;
        Ok(removed)
    }

    fn replace_boxes(&self, items: &[BoardBox]) -> RepoResult<()> {
        for item in items {
            item.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM board_boxes;", [])?;
        for item in items {
            insert_box_row(&tx, item)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn count_boxes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM board_boxes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative box count `{count}`")))
    }
}

fn insert_box_row(conn: &Connection, item: &BoardBox) -> RepoResult<()> {
    item.validate()?;

    conn.execute(
        BOX_INSERT_SQL,
        params![
            item.id.to_string(),
            item.kind.as_str(),
            item.content.as_str(),
            item.color.as_str(),
            item.x,
            item.y,
            item.width,
            item.height,
            bool_to_int(item.expanded),
            item.expanded_width,
            item.expanded_height,
            item.topic_name.as_str(),
            item.updated_at,
        ],
    )?;
    Ok(())
}

fn parse_box_row(row: &Row<'_>) -> RepoResult<BoardBox> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "board_boxes.uuid")?;

    let kind_text: String = row.get("kind")?;
    let kind = BoxKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid box kind `{kind_text}` in board_boxes.kind"))
    })?;

    let item = BoardBox {
        id,
        kind,
        content: row.get("content")?,
        color: row.get("color")?,
        x: row.get("x")?,
        y: row.get("y")?,
        width: row.get("width")?,
        height: row.get("height")?,
        expanded: int_to_bool(row.get("expanded")?, "board_boxes.expanded")?,
        expanded_width: row.get("expanded_width")?,
        expanded_height: row.get("expanded_height")?,
        topic_name: row.get("topic_name")?,
        updated_at: row.get("updated_at")?,
    };
    item.validate()?;
    Ok(item)
}
