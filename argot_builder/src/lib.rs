//! Builder module for `argot`.
//! See [documentation root](https://docs.rs/argot/latest/argot/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod files;
mod matcher;
mod model;
mod parser;
mod registry;
mod view;

pub use api::*;
pub use model::*;
pub use parser::{DeclarationError, ParseError};
pub use view::{Resolution, Values};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
