use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::PersistenceGateway;
use crate::core::metrics::{MetricSample, TIME_FORMAT};
use crate::core::types::{HardwareProfile, Setting};
use crate::error::{Error, Result};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS system_usage (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        time TEXT NOT NULL,
        cpu REAL NOT NULL,
        memory REAL NOT NULL,
        gpu REAL NOT NULL,
        network_kb REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS user_settings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        setting_name TEXT UNIQUE NOT NULL,
        setting_value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hardware_info (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cpu_name TEXT NOT NULL,
        gpu_name TEXT NOT NULL,
        ram_size_gb REAL NOT NULL,
        os_name TEXT NOT NULL
    );
"#;

const INSERT_USAGE: &str = "INSERT INTO system_usage (time, cpu, memory, gpu, network_kb) VALUES (?1, ?2, ?3, ?4, ?5)";

/// SQLite-backed store
///
/// Tables: `system_usage`, `user_settings` (unique names, upsert) and
/// `hardware_info`.
pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").field("path", &self.conn.path()).finish()
    }
}

impl SqliteStore {
    /// Opens or creates the database file at `path` and ensures the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get::<_, String>(0))?;

        let store = Self { conn };
        store.init()?;
        info!(path = %path.as_ref().display(), "opened usage store");
        Ok(store)
    }

    /// Opens a private in-memory database with the schema in place
    pub fn open_in_memory() -> Result<Self> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.init()?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

const VALUE_COLUMNS: [&str; 4] = ["cpu", "memory", "gpu", "network_kb"];

/// Converts one `system_usage` row; values of the wrong type are malformed records
fn sample_from_row(id: i64, time: &Value, values: &[Value; 4]) -> Result<MetricSample> {
    let row = usize::try_from(id).unwrap_or(0);

    let timestamp = match time {
        Value::Text(text) => NaiveDateTime::parse_from_str(text.trim(), TIME_FORMAT)
            .map_err(|e| Error::malformed_record(row, format!("invalid time {text:?}: {e}")))?,
        other => return Err(Error::malformed_record(row, format!("invalid time {other:?}"))),
    };

    let mut numbers = [0.0; 4];
    for ((number, value), column) in numbers.iter_mut().zip(values).zip(VALUE_COLUMNS) {
        *number = match value {
            Value::Real(real) => *real,
            Value::Integer(int) => *int as f64,
            other => return Err(Error::malformed_record(row, format!("invalid {column} {other:?}"))),
        };
    }

    let [cpu, memory, gpu, network_kb] = numbers;
    Ok(MetricSample::new(timestamp, cpu, memory, gpu, network_kb))
}

impl PersistenceGateway for SqliteStore {
    fn init(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn insert_usage(&self, sample: &MetricSample) -> Result<()> {
        self.conn.execute(
            INSERT_USAGE,
            params![
                sample.time_string(),
                sample.cpu_percent(),
                sample.memory_percent(),
                sample.gpu_percent(),
                sample.network_rate_kb_per_s()
            ],
        )?;
        Ok(())
    }

    /// Inserts all samples in a single transaction
    fn insert_usage_batch(&self, samples: &[MetricSample]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_USAGE)?;
            for sample in samples {
                stmt.execute(params![
                    sample.time_string(),
                    sample.cpu_percent(),
                    sample.memory_percent(),
                    sample.gpu_percent(),
                    sample.network_rate_kb_per_s()
                ])?;
            }
        }
        tx.commit()?;
        debug!(count = samples.len(), "stored usage samples");
        Ok(())
    }

    fn fetch_all_usage(&self) -> Result<Vec<MetricSample>> {
        let mut stmt = self.conn.prepare("SELECT id, time, cpu, memory, gpu, network_kb FROM system_usage ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Value>(1)?,
                    [row.get::<_, Value>(2)?, row.get::<_, Value>(3)?, row.get::<_, Value>(4)?, row.get::<_, Value>(5)?],
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.iter().map(|(id, time, values)| sample_from_row(*id, time, values)).collect()
    }

    fn upsert_setting(&self, setting: &Setting) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_settings (setting_name, setting_value) VALUES (?1, ?2)
             ON CONFLICT(setting_name) DO UPDATE SET setting_value = excluded.setting_value",
            params![setting.name, setting.value],
        )?;
        Ok(())
    }

    fn fetch_settings(&self) -> Result<Vec<Setting>> {
        let mut stmt = self.conn.prepare("SELECT setting_name, setting_value FROM user_settings ORDER BY id")?;
        let settings = stmt
            .query_map([], |row| Ok(Setting { name: row.get(0)?, value: row.get(1)? }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(settings)
    }

    fn insert_hardware(&self, profile: &HardwareProfile) -> Result<()> {
        self.conn.execute(
            "INSERT INTO hardware_info (cpu_name, gpu_name, ram_size_gb, os_name) VALUES (?1, ?2, ?3, ?4)",
            params![profile.cpu_name, profile.gpu_name, profile.ram_size_gb, profile.os_name],
        )?;
        Ok(())
    }

    fn fetch_hardware(&self) -> Result<Vec<HardwareProfile>> {
        let mut stmt =
            self.conn.prepare("SELECT cpu_name, gpu_name, ram_size_gb, os_name FROM hardware_info ORDER BY id")?;
        let profiles = stmt
            .query_map([], |row| {
                Ok(HardwareProfile {
                    cpu_name: row.get(0)?,
                    gpu_name: row.get(1)?,
                    ram_size_gb: row.get(2)?,
                    os_name: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(profiles)
    }

    fn latest_hardware(&self) -> Result<Option<HardwareProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT cpu_name, gpu_name, ram_size_gb, os_name FROM hardware_info ORDER BY id DESC LIMIT 1",
        )?;
        let mut rows = stmt.query_map([], |row| {
            Ok(HardwareProfile {
                cpu_name: row.get(0)?,
                gpu_name: row.get(1)?,
                ram_size_gb: row.get(2)?,
                os_name: row.get(3)?,
            })
        })?;
        Ok(rows.next().transpose()?)
    }
}
