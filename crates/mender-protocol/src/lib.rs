pub mod command;
pub mod handoff;
pub mod repair;

pub use command::*;
pub use handoff::*;
pub use repair::*;
