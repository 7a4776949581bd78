pub mod release;

pub use release::{is_up_to_date, pick_thunderstorm_asset};
