pub mod file;
pub mod form;
pub mod response;

pub use file::*;
pub use form::*;
pub use response::*;
