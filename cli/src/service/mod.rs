pub mod http;

pub use http::HttpInferenceService;
