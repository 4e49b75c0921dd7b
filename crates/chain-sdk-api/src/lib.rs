mod api_error;
mod batch;
mod json;
mod request;
mod response;

pub use api_error::*;
pub use batch::*;
pub use json::*;
pub use request::*;
pub use response::*;
