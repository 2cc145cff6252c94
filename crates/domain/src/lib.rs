//! Scrappey Domain - Core wire and configuration types
//!
//! This crate defines the domain model for the Scrappey API client:
//! request configuration, the vendor option bag, the reply envelope, and
//! the normalized response. All types here are pure Rust with no I/O
//! dependencies.

pub mod browser;
pub mod command;
pub mod cookie;
pub mod envelope;
pub mod error;
pub mod options;
pub mod proxy;
pub mod request;
pub mod response;
pub mod session;

pub use browser::{ActionPhase, BrowserAction, BrowserActionKind, CaptchaKind};
pub use command::Command;
pub use cookie::{Cookie, CookieInput};
pub use envelope::{Envelope, EnvelopeStatus, Solution};
pub use error::{DomainError, DomainResult};
pub use options::{VendorExtensions, VendorOptions};
pub use proxy::{Proxy, ProxyServer};
pub use request::{
    Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody, RequestConfig, ResponseKind,
};
pub use response::{NormalizedResponse, ResponseError, VendorMeta, status_text};
pub use session::{
    SessionCreated, SessionList, SessionOptions, SessionStatus, WebSocketOptions,
    generate_session_id,
};
