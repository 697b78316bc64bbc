use super::{InterchangeCodec, COLUMNS};
use crate::core::metrics::MetricSample;
use crate::error::{Error, Result};

/// CSV codec with a header row
#[derive(Debug, Clone)]
pub struct CsvCodec {
    delimiter: u8,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvCodec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

fn csv_error(row: usize, e: csv::Error) -> Error {
    if e.is_io_error() {
        Error::interchange(e.to_string())
    } else {
        Error::malformed_record(row, e.to_string())
    }
}

impl InterchangeCodec for CsvCodec {
    fn export(&self, records: &[MetricSample]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new().delimiter(self.delimiter).has_headers(false).from_writer(Vec::new());

        writer.write_record(COLUMNS).map_err(|e| Error::interchange(e.to_string()))?;
        for record in records {
            writer.serialize(record).map_err(|e| Error::interchange(e.to_string()))?;
        }

        writer.into_inner().map_err(|e| Error::interchange(e.to_string()))
    }

    fn import(&self, bytes: &[u8]) -> Result<Vec<MetricSample>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let mut reader =
            csv::ReaderBuilder::new().delimiter(self.delimiter).has_headers(true).trim(csv::Trim::All).from_reader(bytes);

        let headers = reader.headers().map_err(|e| csv_error(0, e))?;
        if !headers.iter().eq(COLUMNS) {
            let found: Vec<&str> = headers.iter().collect();
            return Err(Error::malformed_record(0, format!("expected header {COLUMNS:?}, found {found:?}")));
        }

        reader
            .deserialize::<MetricSample>()
            .enumerate()
            .map(|(index, record)| record.map_err(|e| csv_error(index + 1, e)))
            .collect()
    }
}
