mod core;
mod option;
mod subcommand;

pub use self::core::*;
pub use option::*;
pub use subcommand::*;
