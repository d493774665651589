mod key;
mod option;
mod value;

pub use key::*;
pub use option::*;
pub use value::*;
