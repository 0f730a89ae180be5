pub mod http;
pub mod local;

pub use http::ContactsHttpClient;
pub use local::ContactsLocalClient;
