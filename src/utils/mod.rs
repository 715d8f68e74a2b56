//! Utility functions and helpers.

pub mod http;
pub mod text;
pub mod url;

pub use http::{HttpClient, HttpResponse, ReqwestClient};
