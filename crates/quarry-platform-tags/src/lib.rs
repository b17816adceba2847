pub use crate::platform::expand_platforms;
pub use crate::tags::{Environment, Tag, TargetPython};

mod platform;
mod tags;
