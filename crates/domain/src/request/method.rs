//! HTTP method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::command::Command;
use crate::error::{DomainError, DomainResult};

/// HTTP methods a caller may put on a request configuration.
///
/// Only the five verbs with a `request.*` command are dispatchable; HEAD
/// and OPTIONS are representable so a caller gets a typed
/// [`DomainError::UnsupportedMethod`] instead of a silent remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method (not dispatchable to the vendor)
    Head,
    /// HTTP OPTIONS method (not dispatchable to the vendor)
    Options,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Returns whether this method typically carries a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Maps the method to its vendor command.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedMethod`] for verbs the vendor has
    /// no command for (HEAD, OPTIONS).
    pub fn command(self) -> DomainResult<Command> {
        match self {
            Self::Get => Ok(Command::RequestGet),
            Self::Post => Ok(Command::RequestPost),
            Self::Put => Ok(Command::RequestPut),
            Self::Patch => Ok(Command::RequestPatch),
            Self::Delete => Ok(Command::RequestDelete),
            Self::Head | Self::Options => {
                Err(DomainError::UnsupportedMethod(self.as_str().to_string()))
            }
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(DomainError::UnsupportedMethod(other.to_string())),
        }
    }
}
