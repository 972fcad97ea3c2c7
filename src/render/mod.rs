//! Chart output.

mod describe;
mod dot;

pub use describe::describe_relationship;
pub use dot::{escape_id, DotRenderer};
