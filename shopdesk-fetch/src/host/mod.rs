//! Host APIs for fetch strategies.
//!
//! - [`http`] - HTTP transport trait and the reqwest-backed client
//! - `scripted` - Recording transport for tests (`testing` feature)

pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod scripted;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedTransport;
