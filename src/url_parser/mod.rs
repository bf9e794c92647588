pub mod encoding;
pub mod query;
pub mod url_model;


pub use encoding::{urldecode, urlencode};
pub use query::{QueryString, QueryValue};
pub use url_model::UrlModel;
