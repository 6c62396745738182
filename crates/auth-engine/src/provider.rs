//! OAuth identity providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Apple,
    Google,
    Kakao,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 3] = [OAuthProvider::Apple, OAuthProvider::Google, OAuthProvider::Kakao];

    /// Value of the `provider` query parameter.
    pub fn provider_key(&self) -> &'static str {
        match self {
            OAuthProvider::Apple => "apple",
            OAuthProvider::Google => "google",
            OAuthProvider::Kakao => "kakao",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_key())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|provider| provider.provider_key() == wanted)
            .ok_or_else(|| format!("unknown OAuth provider: {}", s))
    }
}
