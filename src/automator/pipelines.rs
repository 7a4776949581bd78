pub mod analysis;
pub mod probe;

pub use probe::probe_fiji;
