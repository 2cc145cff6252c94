//! Scrappey Infrastructure - adapters
//!
//! Concrete implementations of the application-layer ports. The only
//! port this client needs is the HTTP transport.

pub mod adapters;

pub use adapters::ReqwestTransport;
