//! Data access port trait.

use crate::domain::error::TradekitError;
use crate::domain::table::Table;

pub trait DataPort {
    /// Load a whole table from `source` (a path for file-backed adapters).
    fn load_table(&self, source: &str) -> Result<Table, TradekitError>;
}
