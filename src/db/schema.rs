//! Database schema
//!
//! One untyped key-value table with no version field. A
//! change of encoding needs a new table or database file.

use rusqlite::Connection;

use crate::Result;

/// Initialize the database schema
///
/// # Errors
///
/// Returns error if the table cannot be created
pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS static_audio (
            key TEXT PRIMARY KEY,
            data BLOB NOT NULL
        );
        ",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        init(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM static_audio", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
