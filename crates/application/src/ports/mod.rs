//! Port definitions (interfaces)
//!
//! Ports define the boundary between the client core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod transport;

pub use transport::{Transport, TransportError, TransportReply, TransportRequest};
