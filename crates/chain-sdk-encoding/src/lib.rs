mod error;
mod varint;
mod varstr;

pub use error::*;
pub use varint::*;
pub use varstr::*;
