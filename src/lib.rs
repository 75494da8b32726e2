//! Polling client core for a chat playground's streaming text-generation
//! endpoint.
//!
//! The backend exposes `POST {base_url}/streaming_generate` and returns the
//! cumulative answer built so far on every call. [`stream::StreamingResponseAccumulator`]
//! turns that into an approximation of token streaming: it re-issues the
//! request in a tight loop, forwards each non-empty answer to a caller
//! callback, and wraps the loop in timeout and give-up policy.

pub mod config;
pub mod error;
pub mod prompt;
pub mod protocol;
pub mod stream;
