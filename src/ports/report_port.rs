//! Output port trait.

use crate::domain::error::TradekitError;
use crate::domain::table::Table;

/// Port for writing result tables (augmented data, resampled bars, ledgers).
pub trait ReportPort {
    fn write(&self, table: &Table, output_path: &str) -> Result<(), TradekitError>;
}
