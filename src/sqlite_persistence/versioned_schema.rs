use crate::error::{EtlError, EtlResult};
use rusqlite::{params, Connection, OptionalExtension};

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            #[allow(unused_mut)]
            let mut column = Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
        }
    }

    fn from_sql(s: &str) -> Option<&'static SqlType> {
        match s {
            "TEXT" => Some(&SqlType::Text),
            "INTEGER" => Some(&SqlType::Integer),
            "REAL" => Some(&SqlType::Real),
            _ => None,
        }
    }
}

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
}

pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub indices: &'static [(&'static str, &'static str)],
}

impl Table {
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let mut def = format!("{} {}", column.name, column.sql_type.as_sql());
                if column.is_primary_key {
                    def.push_str(" PRIMARY KEY");
                }
                if column.non_null {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({});", self.name, columns)
    }

    pub fn create(&self, conn: &Connection) -> EtlResult<()> {
        conn.execute(&self.create_sql(), params![])?;
        for (index_name, column_name) in self.indices {
            conn.execute(
                &format!(
                    "CREATE INDEX {} ON {}({});",
                    index_name, self.name, column_name
                ),
                params![],
            )?;
        }
        Ok(())
    }

    pub fn drop(&self, conn: &Connection) -> EtlResult<()> {
        conn.execute(&format!("DROP TABLE IF EXISTS {};", self.name), params![])?;
        Ok(())
    }

    fn validate(&self, conn: &Connection) -> EtlResult<()> {
        struct ActualColumn {
            name: String,
            sql_type: String,
            non_null: bool,
            is_primary_key: bool,
        }

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let actual: Vec<ActualColumn> = stmt
            .query_map(params![], |row| {
                Ok(ActualColumn {
                    name: row.get(1)?,
                    sql_type: row.get(2)?,
                    non_null: row.get::<_, i32>(3)? == 1,
                    is_primary_key: row.get::<_, i32>(5)? > 0,
                })
            })?
            .collect::<Result<_, _>>()?;

        if actual.is_empty() {
            return Err(EtlError::Schema(format!("table {} is missing", self.name)));
        }
        if actual.len() != self.columns.len() {
            return Err(EtlError::Schema(format!(
                "table {} has {} columns, expected {}. Found: {}, expected: {}",
                self.name,
                actual.len(),
                self.columns.len(),
                actual
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                self.columns
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        for (actual_column, expected) in actual.iter().zip(self.columns.iter()) {
            if actual_column.name != expected.name {
                return Err(EtlError::Schema(format!(
                    "table {} column name mismatch: expected {}, got {}",
                    self.name, expected.name, actual_column.name
                )));
            }
            if SqlType::from_sql(&actual_column.sql_type) != Some(expected.sql_type) {
                return Err(EtlError::Schema(format!(
                    "table {} column {} type mismatch: expected {:?}, got {}",
                    self.name, expected.name, expected.sql_type, actual_column.sql_type
                )));
            }
            if actual_column.non_null != expected.non_null {
                return Err(EtlError::Schema(format!(
                    "table {} column {} non-null mismatch: expected {}, got {}",
                    self.name, expected.name, expected.non_null, actual_column.non_null
                )));
            }
            if actual_column.is_primary_key != expected.is_primary_key {
                return Err(EtlError::Schema(format!(
                    "table {} column {} primary key mismatch: expected {}, got {}",
                    self.name, expected.name, expected.is_primary_key, actual_column.is_primary_key
                )));
            }
        }

        for (index_name, _) in self.indices {
            let index_exists = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1 AND tbl_name=?2",
                    params![index_name, self.name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !index_exists {
                return Err(EtlError::Schema(format!(
                    "table {} is missing index '{}'",
                    self.name, index_name
                )));
            }
        }
        Ok(())
    }
}

pub struct VersionedSchema {
    pub version: usize,
    pub tables: &'static [Table],
}

impl VersionedSchema {
    pub fn create(&self, conn: &Connection) -> EtlResult<()> {
        for table in self.tables {
            table.create(conn)?;
        }
        conn.pragma_update(None, "user_version", BASE_DB_VERSION + self.version)?;
        Ok(())
    }

    /// Drops every table of this schema, in reverse declaration order.
    pub fn drop(&self, conn: &Connection) -> EtlResult<()> {
        for table in self.tables.iter().rev() {
            table.drop(conn)?;
        }
        conn.pragma_update(None, "user_version", 0)?;
        Ok(())
    }

    pub fn validate(&self, conn: &Connection) -> EtlResult<()> {
        let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        let expected = (BASE_DB_VERSION + self.version) as i64;
        if db_version != expected {
            return Err(EtlError::Schema(format!(
                "database version is {}, expected {}",
                db_version, expected
            )));
        }
        for table in self.tables {
            table.validate(conn)?;
        }
        Ok(())
    }
}

pub const BASE_DB_VERSION: usize = 77000;

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS_TABLE: Table = Table {
        name: "events",
        columns: &[
            sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
            sqlite_column!("name", &SqlType::Text, non_null = true),
            sqlite_column!("score", &SqlType::Real),
        ],
        indices: &[("idx_events_name", "name")],
    };

    const SCHEMA: VersionedSchema = VersionedSchema {
        version: 3,
        tables: &[EVENTS_TABLE],
    };

    #[test]
    fn test_create_sql() {
        assert_eq!(
            EVENTS_TABLE.create_sql(),
            "CREATE TABLE events (id INTEGER PRIMARY KEY, name TEXT NOT NULL, score REAL);"
        );
    }

    #[test]
    fn test_created_schema_validates() {
        let conn = Connection::open_in_memory().unwrap();
        SCHEMA.create(&conn).unwrap();
        SCHEMA.validate(&conn).unwrap();

        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, (BASE_DB_VERSION + 3) as i64);
    }

    #[test]
    fn test_validate_detects_missing_index() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE events (id INTEGER PRIMARY KEY, name TEXT NOT NULL, score REAL)",
            [],
        )
        .unwrap();
        conn.pragma_update(None, "user_version", BASE_DB_VERSION + 3)
            .unwrap();

        let err = SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err.contains("missing index"));
        assert!(err.contains("idx_events_name"));
    }

    #[test]
    fn test_validate_detects_type_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE events (id INTEGER PRIMARY KEY, name TEXT NOT NULL, score TEXT)",
            [],
        )
        .unwrap();
        conn.execute("CREATE INDEX idx_events_name ON events(name)", [])
            .unwrap();
        conn.pragma_update(None, "user_version", BASE_DB_VERSION + 3)
            .unwrap();

        let err = SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err.contains("type mismatch"));
        assert!(err.contains("score"));
    }

    #[test]
    fn test_validate_detects_foreign_database() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE other (id INTEGER PRIMARY KEY)", [])
            .unwrap();

        let err = SCHEMA.validate(&conn).unwrap_err().to_string();
        assert!(err.contains("database version"));
    }

    #[test]
    fn test_drop_removes_tables() {
        let conn = Connection::open_in_memory().unwrap();
        SCHEMA.create(&conn).unwrap();
        SCHEMA.drop(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='events'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
        SCHEMA.create(&conn).unwrap();
        SCHEMA.validate(&conn).unwrap();
    }
}
