//! Scrappey Application - client core
//!
//! This crate carries the client logic between the domain types and the
//! HTTP stack: the [`ports::Transport`] boundary, the config mapper, the
//! response normalizer, and the [`client::ScrappeyClient`] operations.

pub mod client;
pub mod error;
pub mod mapper;
pub mod normalizer;
pub mod ports;

pub use client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ScrappeyClient};
pub use error::{ClientError, ClientResult};
pub use mapper::{MappedRequest, map_config};
pub use normalizer::normalize;
pub use ports::{Transport, TransportError, TransportReply, TransportRequest};
