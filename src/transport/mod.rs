//! HTTP plumbing between the client and the Coda API.

pub mod http;

pub use http::{query_pairs, HttpTransport, PendingRequest, TransportError};
