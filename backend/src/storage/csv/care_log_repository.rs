use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::SubsecRound;
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use shared::LogType;
use tracing::{debug, info, warn};

use super::connection::{CsvConnection, LOGS_CSV_HEADER};
use crate::domain::models::care_log::{
    format_timestamp, parse_timestamp, CareLog as DomainCareLog, NewCareLog,
};
use crate::storage::traits::CareLogStorage;

/// One row of `logs.csv`
#[derive(Debug, Clone, Deserialize)]
struct LogRecord {
    id: String,
    cat_id: String,
    #[serde(rename = "type")]
    log_type: String,
    timestamp: String,
    notes: String,
    value: Option<String>,
}

impl LogRecord {
    fn from_domain(log: &DomainCareLog) -> Self {
        Self {
            id: log.id.clone(),
            cat_id: log.cat_id.clone(),
            log_type: log.log_type.literal().to_string(),
            timestamp: format_timestamp(&log.timestamp),
            notes: log.notes.clone(),
            value: log.value.clone(),
        }
    }

    /// Lay the record out in the column order of an existing file
    fn to_row(&self, headers: &ByteRecord) -> ByteRecord {
        headers
            .iter()
            .map(|column| match column {
                b"id" => self.id.as_str(),
                b"cat_id" => self.cat_id.as_str(),
                b"type" => self.log_type.as_str(),
                b"timestamp" => self.timestamp.as_str(),
                b"notes" => self.notes.as_str(),
                b"value" => self.value.as_deref().unwrap_or(""),
                _ => "",
            })
            .collect()
    }

    fn into_domain(self) -> Result<DomainCareLog> {
        let timestamp = parse_timestamp(&self.timestamp)
            .with_context(|| format!("Invalid timestamp '{}' in log {}", self.timestamp, self.id))?;

        let log_type = self.log_type.parse::<LogType>().unwrap_or_else(|_| {
            warn!("Log {} has unknown type '{}', reading it as {}", self.id, self.log_type, LogType::Other);
            LogType::Other
        });

        Ok(DomainCareLog {
            id: self.id,
            cat_id: self.cat_id,
            log_type,
            timestamp,
            notes: self.notes,
            value: self.value.filter(|v| !v.is_empty()),
        })
    }
}

/// Raw contents of a `logs.csv`. Rows are kept exactly as stored, so
/// rewriting the file never drops or alters rows the reader cannot interpret.
struct LogFile {
    headers: ByteRecord,
    rows: Vec<ByteRecord>,
}

impl LogFile {
    fn empty() -> Self {
        Self {
            headers: ByteRecord::from(&LOGS_CSV_HEADER[..]),
            rows: Vec::new(),
        }
    }

    fn id_column(&self) -> usize {
        self.headers.iter().position(|column| column == b"id").unwrap_or(0)
    }
}

/// Care log repository: one append-ordered `logs.csv` per cat directory
#[derive(Clone)]
pub struct CareLogRepository {
    connection: CsvConnection,
}

impl CareLogRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_file(&self, cat_id: &str) -> Result<LogFile> {
        if !CsvConnection::is_valid_id(cat_id) {
            return Ok(LogFile::empty());
        }

        let file_path = self.connection.logs_file_path(cat_id);
        if !file_path.exists() {
            return Ok(LogFile::empty());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;

        let headers = reader
            .byte_headers()
            .with_context(|| format!("Failed to read header of {}", file_path.display()))?
            .clone();
        let rows = reader
            .byte_records()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        if headers.is_empty() {
            return Ok(LogFile { rows, ..LogFile::empty() });
        }
        Ok(LogFile { headers, rows })
    }

    /// Read every log of a cat in insertion order, skipping rows that do not parse
    fn read_logs(&self, cat_id: &str) -> Result<Vec<DomainCareLog>> {
        let file = self.read_file(cat_id)?;

        let mut logs = Vec::with_capacity(file.rows.len());
        for (row, raw) in file.rows.iter().enumerate() {
            let record = match raw.deserialize::<LogRecord>(Some(&file.headers)) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping malformed row {} of cat {}: {}", row + 1, cat_id, e);
                    continue;
                }
            };

            match record.into_domain() {
                Ok(log) => logs.push(log),
                Err(e) => warn!("Skipping row {} of cat {}: {:#}", row + 1, cat_id, e),
            }
        }

        Ok(logs)
    }

    fn write_file(&self, cat_id: &str, file: &LogFile) -> Result<()> {
        if !CsvConnection::is_valid_id(cat_id) {
            anyhow::bail!("Invalid cat id: {:?}", cat_id);
        }

        let file_path = self.connection.ensure_logs_file_exists(cat_id)?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());
        writer.write_byte_record(&file.headers)?;
        for row in &file.rows {
            writer.write_byte_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e.error()))?;

        CsvConnection::write_atomically(&file_path, &bytes)
    }
}

#[async_trait]
impl CareLogStorage for CareLogRepository {
    async fn insert_log(&self, log: &NewCareLog) -> Result<DomainCareLog> {
        let _guard = self.connection.lock_for_write().await;

        let mut log = log.clone().into_log(DomainCareLog::generate_id());
        // Stored with millisecond precision; hand back what a re-read returns
        log.timestamp = log.timestamp.trunc_subsecs(3);

        let mut file = self.read_file(&log.cat_id)?;
        let row = LogRecord::from_domain(&log).to_row(&file.headers);
        file.rows.push(row);
        self.write_file(&log.cat_id, &file)?;

        debug!("Stored {} log {} for cat {}", log.log_type, log.id, log.cat_id);
        Ok(log)
    }

    async fn list_logs_by_cat(&self, cat_id: &str, limit: Option<usize>) -> Result<Vec<DomainCareLog>> {
        let mut indexed: Vec<(usize, DomainCareLog)> =
            self.read_logs(cat_id)?.into_iter().enumerate().collect();

        // Newest first; for equal timestamps the later insert counts as newer
        indexed.sort_by(|(ia, a), (ib, b)| b.timestamp.cmp(&a.timestamp).then_with(|| ib.cmp(ia)));

        let limit = limit.unwrap_or(usize::MAX);
        Ok(indexed
            .into_iter()
            .map(|(_, log)| log)
            .filter(|log| log.cat_id == cat_id)
            .take(limit)
            .collect())
    }

    async fn delete_log(&self, cat_id: &str, log_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;

        let mut file = self.read_file(cat_id)?;
        let id_column = file.id_column();
        let before = file.rows.len();
        file.rows.retain(|row| row.get(id_column) != Some(log_id.as_bytes()));

        if file.rows.len() == before {
            return Ok(false);
        }

        self.write_file(cat_id, &file)?;
        info!("Deleted log {} of cat {}", log_id, cat_id);
        Ok(true)
    }
}
