//! Outgoing HTTP
//!
//! One reqwest-backed client per tool instance, configured from settings.
//! Every request is raced against a derived cancellation token.

mod client;

pub use client::{FetchResponse, HttpClient, HttpError, RpcResponse};
