mod as_value;
mod assemble;
mod condition;
mod fill;
mod null_policy;
mod registry;
mod repair;
mod resolve;
mod segment;
mod source;
mod template;
mod util;
mod value;
mod values;
mod verb;

pub use ::anyhow::Context;
pub use as_value::*;
pub use condition::*;
pub use fill::*;
pub use registry::*;
pub use segment::*;
pub use source::*;
pub use template::*;
pub use util::*;
pub use value::*;
pub use values::*;
pub use verb::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
