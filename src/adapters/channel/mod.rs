pub mod http;
pub mod log;

pub use http::HttpChannel;
pub use log::LogChannel;
