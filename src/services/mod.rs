pub mod http;
pub mod location;
