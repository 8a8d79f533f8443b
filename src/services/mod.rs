pub mod sessions;
pub mod transport;
pub mod upload_form;

pub use sessions::*;
pub use transport::*;
pub use upload_form::*;
