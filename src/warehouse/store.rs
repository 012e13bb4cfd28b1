//! SQLite-backed warehouse store.
//!
//! Owns the single connection used by a run. Creates the schema on a brand
//! new database and validates it on an existing one.

use super::models::TableCounts;
use super::schema::WAREHOUSE_SCHEMA;
use crate::error::{EtlError, EtlResult};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::Path;
use tracing::info;

pub struct WarehouseStore {
    conn: Connection,
}

fn init_schema(conn: &Connection) -> EtlResult<()> {
    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!(
            "Creating warehouse schema at version {}",
            WAREHOUSE_SCHEMA.version
        );
        WAREHOUSE_SCHEMA.create(conn)?;
        return Ok(());
    }

    WAREHOUSE_SCHEMA.validate(conn)
}

fn connect(db_path: &Path) -> EtlResult<Connection> {
    Ok(Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?)
}

impl WarehouseStore {
    /// Open (or create) the warehouse database at `db_path`.
    pub fn open<P: AsRef<Path>>(db_path: P) -> EtlResult<Self> {
        let conn = connect(db_path.as_ref())?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open (or create) the database at `db_path` and rebuild the warehouse
    /// tables from scratch. The existing schema is not validated, so this
    /// also repairs a database left behind by another schema.
    pub fn open_fresh<P: AsRef<Path>>(db_path: P) -> EtlResult<Self> {
        let mut store = Self {
            conn: connect(db_path.as_ref())?,
        };
        store.recreate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> EtlResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Drop every warehouse table and create the schema from scratch.
    pub fn recreate(&mut self) -> EtlResult<()> {
        let tx = self.conn.transaction()?;
        WAREHOUSE_SCHEMA.drop(&tx)?;
        WAREHOUSE_SCHEMA.create(&tx)?;
        tx.commit()?;
        info!("Recreated warehouse tables");
        Ok(())
    }

    /// Start the transaction that holds one data file's rows.
    ///
    /// Dropping the transaction without committing rolls the file back.
    pub fn begin_file(&mut self) -> EtlResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn counts(&self) -> EtlResult<TableCounts> {
        let count = |table: &str| -> EtlResult<usize> {
            let n: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
            Ok(n as usize)
        };
        Ok(TableCounts {
            songs: count("songs")?,
            artists: count("artists")?,
            time: count("time")?,
            users: count("users")?,
            songplays: count("songplays")?,
        })
    }

    pub fn close(self) -> EtlResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| EtlError::Store(e))
    }
}
