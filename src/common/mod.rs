pub mod response;

pub use response::{DeleteResponse, ErrorResponse};
