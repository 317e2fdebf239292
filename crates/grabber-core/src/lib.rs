pub mod config;
pub mod logging;

pub mod dispatcher;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod filter;
pub mod http;
pub mod links;
pub mod model;
pub mod source;
pub mod url_model;

pub use error::{FetchError, SourceError};
pub use model::LinkDescriptor;
