//! Token claims and the identity projection they carry

use serde::{Deserialize, Serialize};

/// Which half of a token pair a claim set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims embedded in both access and refresh tokens.
///
/// The two halves of a pair share this shape and differ only in `exp`
/// and `typ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (decimal user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Display label, "first last"
    pub name: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    /// Unique token ID
    pub jti: String,
    pub typ: TokenType,
}

impl Claims {
    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Minimal identity projection carried in tokens.
///
/// Never holds the email address or any credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Rebuild the projection from verified claims without a store lookup.
    ///
    /// Tokens without `given_name`/`family_name` fall back to splitting the
    /// display label on its first space, which is lossy for multi-word first
    /// names.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        let id = claims.user_id()?;
        let (first_name, last_name) =
            if claims.given_name.is_empty() && claims.family_name.is_empty() {
                claims
                    .name
                    .split_once(' ')
                    .map(|(first, last)| (first.to_string(), last.to_string()))
                    .unwrap_or_else(|| (claims.name.clone(), String::new()))
            } else {
                (claims.given_name.clone(), claims.family_name.clone())
            };

        Some(Self {
            id,
            first_name,
            last_name,
        })
    }
}
