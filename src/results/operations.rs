pub mod read;
pub mod verify;

pub use read::read_localizations;
pub use verify::verify_outputs;
