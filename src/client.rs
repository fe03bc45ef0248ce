//! Coda API client.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod error_classification;
pub mod response;

pub use builder::CodaClientBuilder;
pub use core::CodaClient;
pub use response::ApiPayload;
