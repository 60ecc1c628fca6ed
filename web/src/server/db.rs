//! SQLite persistence for reservations.
//!
//! One row per reservation. Dates are stored as `YYYY-MM-DD` text and the
//! categorical fields as their canonical strings, so the file stays readable
//! with the `sqlite3` shell.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use cabana_common::Reservation;

const COLUMNS: &str = "id, guest_name, check_in, check_out, cabin_type, status, \
                       adults, children, infants, season, flight_in, flight_out, \
                       deposit_kind, deposit_amount, total_price";

/// Open a connection with a busy timeout.
fn open(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Cannot open database: {}", db_path.display()))?;
    conn.execute_batch("PRAGMA busy_timeout=3000;")?;
    Ok(conn)
}

/// Create the `reservations` table if it doesn't exist.
pub fn initialize(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = open(db_path)?;
    conn.execute_batch(
        "
        PRAGMA journal_mode=WAL;
        CREATE TABLE IF NOT EXISTS reservations (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            guest_name     TEXT    NOT NULL,
            check_in       DATE    NOT NULL,
            check_out      DATE    NOT NULL,
            cabin_type     TEXT    NOT NULL DEFAULT 'unassigned',
            status         TEXT    NOT NULL DEFAULT 'Pendiente',
            adults         INTEGER NOT NULL DEFAULT 1,
            children       INTEGER NOT NULL DEFAULT 0,
            infants        INTEGER NOT NULL DEFAULT 0,
            season         TEXT    NOT NULL DEFAULT 'Baja',
            flight_in      TEXT    NOT NULL DEFAULT '',
            flight_out     TEXT    NOT NULL DEFAULT '',
            deposit_kind   TEXT    NOT NULL DEFAULT 'percentage',
            deposit_amount INTEGER NOT NULL DEFAULT 0,
            total_price    INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS reservations_check_in ON reservations (check_in);
    ",
    )
    .context("Failed to create reservations table")?;

    info!("Database schema verified");
    Ok(())
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let mut r = Reservation::new(&id.to_string(), &row.get::<_, String>(1)?, row.get(2)?, row.get(3)?);
    r.cabin_type = row.get::<_, String>(4)?.parse().unwrap_or_default();
    r.status = row.get::<_, String>(5)?.parse().unwrap_or_default();
    r.adults = row.get(6)?;
    r.children = row.get(7)?;
    r.infants = row.get(8)?;
    r.season = row.get::<_, String>(9)?.parse().unwrap_or_default();
    r.flight_in = row.get(10)?;
    r.flight_out = row.get(11)?;
    r.deposit_kind = row.get::<_, String>(12)?.parse().unwrap_or_default();
    r.deposit_amount = row.get::<_, i64>(13)?.max(0) as u64;
    r.total_price = row.get::<_, i64>(14)?.max(0) as u64;
    Ok(r)
}

fn row_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

/// Every stored reservation, ordered by check-in then id.
pub fn list(db_path: &Path) -> Result<Vec<Reservation>> {
    let conn = open(db_path)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM reservations ORDER BY check_in, id"
    ))?;
    let rows = stmt.query_map([], from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read reservations")
}

pub fn get(db_path: &Path, id: &str) -> Result<Option<Reservation>> {
    let Some(rowid) = row_id(id) else {
        return Ok(None);
    };
    let conn = open(db_path)?;
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM reservations WHERE id = ?1"),
        params![rowid],
        from_row,
    )
    .optional()
    .context("Failed to read reservation")
}

/// Insert `r` (its `id` is ignored) and return the assigned id.
pub fn insert(db_path: &Path, r: &Reservation) -> Result<String> {
    let conn = open(db_path)?;
    conn.execute(
        "INSERT INTO reservations (guest_name, check_in, check_out, cabin_type, status, \
         adults, children, infants, season, flight_in, flight_out, deposit_kind, \
         deposit_amount, total_price) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            r.guest_name,
            r.check_in,
            r.check_out,
            r.cabin_type.as_str(),
            r.status.as_str(),
            r.adults,
            r.children,
            r.infants,
            r.season.as_str(),
            r.flight_in,
            r.flight_out,
            r.deposit_kind.as_str(),
            r.deposit_amount as i64,
            r.total_price as i64,
        ],
    )
    .context("Failed to insert reservation")?;
    Ok(conn.last_insert_rowid().to_string())
}

/// Overwrite the row with `r.id`. Returns `false` when no such row exists.
pub fn update(db_path: &Path, r: &Reservation) -> Result<bool> {
    let Some(rowid) = row_id(&r.id) else {
        return Ok(false);
    };
    let conn = open(db_path)?;
    let changed = conn
        .execute(
            "UPDATE reservations SET guest_name = ?2, check_in = ?3, check_out = ?4, \
             cabin_type = ?5, status = ?6, adults = ?7, children = ?8, infants = ?9, \
             season = ?10, flight_in = ?11, flight_out = ?12, deposit_kind = ?13, \
             deposit_amount = ?14, total_price = ?15 WHERE id = ?1",
            params![
                rowid,
                r.guest_name,
                r.check_in,
                r.check_out,
                r.cabin_type.as_str(),
                r.status.as_str(),
                r.adults,
                r.children,
                r.infants,
                r.season.as_str(),
                r.flight_in,
                r.flight_out,
                r.deposit_kind.as_str(),
                r.deposit_amount as i64,
                r.total_price as i64,
            ],
        )
        .context("Failed to update reservation")?;
    Ok(changed > 0)
}

/// Returns `false` when no such row exists.
pub fn delete(db_path: &Path, id: &str) -> Result<bool> {
    let Some(rowid) = row_id(id) else {
        return Ok(false);
    };
    let conn = open(db_path)?;
    let changed = conn
        .execute("DELETE FROM reservations WHERE id = ?1", params![rowid])
        .context("Failed to delete reservation")?;
    Ok(changed > 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cabana_common::{CabinType, ReservationStatus};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A fresh database path under the system temp dir.
    pub(crate) fn temp_db(tag: &str) -> PathBuf {
        static SEQ: AtomicU32 = AtomicU32::new(0);
        let dir = std::env::temp_dir().join(format!(
            "cabana_test_{}_{}_{}",
            tag,
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("reservations.db")
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_insert_and_read_back() {
        let path = temp_db("insert");
        initialize(&path).unwrap();

        let mut r = Reservation::new("", "Ana Gómez", d(1), d(4));
        r.cabin_type = CabinType::Premium;
        r.status = ReservationStatus::Confirmed;
        r.flight_in = "LA841".into();
        r.total_price = 75_000;
        r.deposit_amount = 37_500;

        let id = insert(&path, &r).unwrap();
        let back = get(&path, &id).unwrap().unwrap();
        r.id = id;
        assert_eq!(back, r);
    }

    #[test]
    fn test_list_orders_by_check_in() {
        let path = temp_db("list");
        initialize(&path).unwrap();
        insert(&path, &Reservation::new("", "B", d(10), d(12))).unwrap();
        insert(&path, &Reservation::new("", "A", d(2), d(5))).unwrap();

        let names: Vec<_> = list(&path).unwrap().into_iter().map(|r| r.guest_name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_update_and_delete_missing_rows() {
        let path = temp_db("missing");
        initialize(&path).unwrap();

        let ghost = Reservation::new("999", "Nadie", d(1), d(2));
        assert!(!update(&path, &ghost).unwrap());
        assert!(!delete(&path, "999").unwrap());
        assert!(!delete(&path, "not-a-number").unwrap());
        assert!(get(&path, "abc").unwrap().is_none());

        let id = insert(&path, &ghost).unwrap();
        let mut edited = get(&path, &id).unwrap().unwrap();
        edited.guest_name = "Alguien".into();
        assert!(update(&path, &edited).unwrap());
        assert_eq!(get(&path, &id).unwrap().unwrap().guest_name, "Alguien");
        assert!(delete(&path, &id).unwrap());
        assert!(list(&path).unwrap().is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let path = temp_db("init");
        initialize(&path).unwrap();
        insert(&path, &Reservation::new("", "A", d(2), d(5))).unwrap();
        initialize(&path).unwrap();
        assert_eq!(list(&path).unwrap().len(), 1);
    }
}
