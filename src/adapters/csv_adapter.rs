//! CSV file adapter: reads and writes [`Table`]s.
//!
//! Column typing on read:
//! - `time`, `open_time`, `close_time` hold timestamps
//! - a column whose every cell is an integer becomes an integer column
//! - anything else is float, with empty cells read as NaN

use std::fs::File;
use std::io::{Read, Write};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::error::TradekitError;
use crate::domain::table::{Column, Table};
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const TIME_COLUMNS: [&str; 3] = ["time", "open_time", "close_time"];
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvAdapter;

impl CsvAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn read_table<R: Read>(&self, reader: R) -> Result<Table, TradekitError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            return Err(TradekitError::DataFormat {
                reason: "missing header row".into(),
            });
        }
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(TradekitError::DataFormat {
                    reason: format!("duplicate column '{}'", name),
                });
            }
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            for (col, value) in cells.iter_mut().zip(record.iter()) {
                col.push(value.trim().to_string());
            }
        }

        let mut table = Table::new();
        for (name, raw) in headers.iter().zip(cells) {
            let column = parse_column(name, &raw)?;
            table.push_column(name.as_str(), column)?;
        }
        debug!(rows = table.len(), columns = table.width(), "read csv");
        Ok(table)
    }

    pub fn write_table<W: Write>(&self, table: &Table, writer: W) -> Result<(), TradekitError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(table.column_names()).map_err(csv_error)?;

        let columns: Vec<&Column> = table.columns().map(|(_, c)| c).collect();
        for row in 0..table.len() {
            let record: Vec<String> = columns.iter().map(|c| format_cell(c, row)).collect();
            wtr.write_record(&record).map_err(csv_error)?;
        }
        wtr.flush()?;
        debug!(rows = table.len(), columns = table.width(), "wrote csv");
        Ok(())
    }
}

impl DataPort for CsvAdapter {
    fn load_table(&self, source: &str) -> Result<Table, TradekitError> {
        let file = File::open(source)?;
        self.read_table(file)
    }
}

impl ReportPort for CsvAdapter {
    fn write(&self, table: &Table, output_path: &str) -> Result<(), TradekitError> {
        let file = File::create(output_path)?;
        self.write_table(table, file)
    }
}

fn csv_error(e: csv::Error) -> TradekitError {
    if e.is_io_error() {
        TradekitError::Io(e.into())
    } else {
        TradekitError::DataFormat {
            reason: format!("CSV parse error: {}", e),
        }
    }
}

fn parse_column(name: &str, raw: &[String]) -> Result<Column, TradekitError> {
    if TIME_COLUMNS.contains(&name) {
        let times = raw
            .iter()
            .enumerate()
            .map(|(row, s)| {
                parse_timestamp(s).ok_or_else(|| TradekitError::DataFormat {
                    reason: format!("invalid timestamp '{}' in column '{}' at row {}", s, name, row),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Column::Time(times));
    }

    if !raw.is_empty() {
        if let Ok(ints) = raw.iter().map(|s| s.parse::<i64>()).collect::<Result<Vec<_>, _>>() {
            return Ok(Column::Int(ints));
        }
    }

    let floats = raw
        .iter()
        .enumerate()
        .map(|(row, s)| {
            if s.is_empty() {
                return Ok(f64::NAN);
            }
            s.parse::<f64>().map_err(|_| TradekitError::DataFormat {
                reason: format!("invalid number '{}' in column '{}' at row {}", s, name, row),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Column::Float(floats))
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn format_cell(column: &Column, row: usize) -> String {
    match column {
        Column::Float(v) if v[row].is_nan() => String::new(),
        Column::Float(v) => v[row].to_string(),
        Column::Int(v) => v[row].to_string(),
        Column::Time(v) => v[row].format(TIME_FORMAT).to_string(),
    }
}
