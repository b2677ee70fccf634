pub use grout_core::*;
pub use grout_macros::Fetch;
