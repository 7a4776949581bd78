pub mod columns;

pub use columns::{ColumnMap, summarize};
