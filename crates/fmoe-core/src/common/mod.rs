pub mod columns;
pub mod lines;

pub use columns::{ColumnError, ColumnResult, Columns};
pub use lines::{LineCursor, LineError};
