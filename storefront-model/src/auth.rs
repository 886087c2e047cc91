//! Bearer-token shapes exchanged with the authentication collaborator.
//!
//! Issuing and verifying tokens happens elsewhere; these types only describe
//! what crosses the boundary.

use crate::error::{ModelError, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpirableToken {
    pub token: String,
    pub expires: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BearerToken {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BearerKind,
    pub access: ExpirableToken,
    pub refresh: ExpirableToken,
}

impl BearerToken {
    pub fn new(access: ExpirableToken, refresh: ExpirableToken) -> Self {
        Self {
            kind: BearerKind::Bearer,
            access,
            refresh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BearerKind {
    #[default]
    Bearer,
}

/// Parsed `Authorization: Bearer <token>` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedHeader {
    token: String,
}

impl AuthorizedHeader {
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for AuthorizedHeader {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        let (scheme, token) = value
            .trim()
            .split_once(' ')
            .ok_or_else(|| ModelError::InvalidHeader("missing scheme".into()))?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(ModelError::InvalidHeader(format!(
                "unsupported scheme '{scheme}'"
            )));
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(ModelError::InvalidHeader("empty token".into()));
        }

        Ok(Self {
            token: token.to_string(),
        })
    }
}

impl fmt::Display for AuthorizedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bearer {}", self.token)
    }
}
