//! Vendor command enumeration
//!
//! Every call to the vendor carries exactly one `cmd` value. The set of
//! recognized commands is closed, so a call can never be built without one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// The `cmd` values accepted by the vendor endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Scrape with a GET request.
    #[serde(rename = "request.get")]
    RequestGet,
    /// Scrape with a POST request.
    #[serde(rename = "request.post")]
    RequestPost,
    /// Scrape with a PUT request.
    #[serde(rename = "request.put")]
    RequestPut,
    /// Scrape with a DELETE request.
    #[serde(rename = "request.delete")]
    RequestDelete,
    /// Scrape with a PATCH request.
    #[serde(rename = "request.patch")]
    RequestPatch,
    /// Create a persistent browser session.
    #[serde(rename = "sessions.create")]
    SessionCreate,
    /// Destroy a browser session.
    #[serde(rename = "sessions.destroy")]
    SessionDestroy,
    /// List the sessions open for a user.
    #[serde(rename = "sessions.list")]
    SessionList,
    /// Check whether a session is still alive.
    #[serde(rename = "sessions.active")]
    SessionActive,
    /// Open a WebSocket-backed browser connection.
    #[serde(rename = "websocket.create")]
    WebsocketCreate,
}

impl Command {
    /// Returns the wire representation of the command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequestGet => "request.get",
            Self::RequestPost => "request.post",
            Self::RequestPut => "request.put",
            Self::RequestDelete => "request.delete",
            Self::RequestPatch => "request.patch",
            Self::SessionCreate => "sessions.create",
            Self::SessionDestroy => "sessions.destroy",
            Self::SessionList => "sessions.list",
            Self::SessionActive => "sessions.active",
            Self::WebsocketCreate => "websocket.create",
        }
    }

    /// Returns true for the `request.*` family of commands.
    #[must_use]
    pub const fn is_request(self) -> bool {
        matches!(
            self,
            Self::RequestGet
                | Self::RequestPost
                | Self::RequestPut
                | Self::RequestDelete
                | Self::RequestPatch
        )
    }

    /// Returns true for the `sessions.*` family of commands.
    #[must_use]
    pub const fn is_session(self) -> bool {
        matches!(
            self,
            Self::SessionCreate | Self::SessionDestroy | Self::SessionList | Self::SessionActive
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Command {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "request.get" => Ok(Self::RequestGet),
            "request.post" => Ok(Self::RequestPost),
            "request.put" => Ok(Self::RequestPut),
            "request.delete" => Ok(Self::RequestDelete),
            "request.patch" => Ok(Self::RequestPatch),
            "sessions.create" => Ok(Self::SessionCreate),
            "sessions.destroy" => Ok(Self::SessionDestroy),
            "sessions.list" => Ok(Self::SessionList),
            "sessions.active" => Ok(Self::SessionActive),
            "websocket.create" => Ok(Self::WebsocketCreate),
            other => Err(DomainError::UnknownCommand(other.to_string())),
        }
    }
}
