//! Persistence sink contract and CSV directory sink.
//!
//! The engine emits whole tables; a sink replaces each named table
//! wholesale. There are no partial upserts. Each table is an independent
//! unit of work: one rejected table must not abort the others.

use std::fs;
use std::path::PathBuf;

use crate::error::{Result, StarforgeError};
use crate::schema::MaterializedTable;

/// Accepts named tables and persists them, replacing any previous content.
pub trait TableSink {
    /// Replace the named table with the given content.
    fn replace(&mut self, table: &MaterializedTable) -> Result<()>;
}

/// Outcome of exporting a batch of tables.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Names of tables persisted successfully.
    pub written: Vec<String>,
    /// Per-table failures. Fatal for that table only.
    pub failures: Vec<StarforgeError>,
}

impl ExportReport {
    /// True when every table was persisted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Export tables one by one, continuing past individual failures.
pub fn export_tables(sink: &mut dyn TableSink, tables: &[MaterializedTable]) -> ExportReport {
    let mut report = ExportReport::default();
    for table in tables {
        match sink.replace(table) {
            Ok(()) => report.written.push(table.name.clone()),
            Err(e) => report.failures.push(StarforgeError::Sink {
                table: table.name.clone(),
                message: e.to_string(),
            }),
        }
    }
    report
}

/// Sink writing one `<name>.csv` file per table into a directory.
pub struct CsvDirSink {
    dir: PathBuf,
}

impl CsvDirSink {
    /// Create a sink rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StarforgeError::Io {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }
}

impl TableSink for CsvDirSink {
    fn replace(&mut self, table: &MaterializedTable) -> Result<()> {
        let path = self.dir.join(format!("{}.csv", table.name));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| StarforgeError::Io {
            path,
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> MaterializedTable {
        MaterializedTable::new(
            name,
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "x".into()], vec!["2".into(), "y".into()]],
        )
        .unwrap()
    }

    struct FailingSink {
        reject: String,
        written: Vec<String>,
    }

    impl TableSink for FailingSink {
        fn replace(&mut self, table: &MaterializedTable) -> Result<()> {
            if table.name == self.reject {
                return Err(StarforgeError::Sink {
                    table: table.name.clone(),
                    message: "disk full".into(),
                });
            }
            self.written.push(table.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_export_continues_past_failures() {
        let tables = vec![table("dim_cliente"), table("fato_vendas"), table("dim_calendario")];
        let mut sink = FailingSink {
            reject: "fato_vendas".into(),
            written: Vec::new(),
        };

        let report = export_tables(&mut sink, &tables);

        assert!(!report.is_complete());
        assert_eq!(report.failures.len(), 1);
        // The failing fact table did not stop the calendar write.
        assert_eq!(sink.written, vec!["dim_cliente", "dim_calendario"]);
    }

    #[test]
    fn test_csv_dir_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvDirSink::new(dir.path()).unwrap();

        let report = export_tables(&mut sink, &[table("dim_cliente")]);
        assert!(report.is_complete());

        let content = fs::read_to_string(dir.path().join("dim_cliente.csv")).unwrap();
        assert!(content.starts_with("a,b\n"));
        assert!(content.contains("1,x"));
    }
}
