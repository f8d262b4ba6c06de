use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};
use subtrack_models::UserId;

/// The subset of the API's JWT claims the client looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub exp: i64,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Reads the claims without verifying the signature. The server remains the
/// authority; this only lets the client notice an expiry early.
pub fn decode_claims(token: &str) -> Option<Claims> {
    insecure_decode::<Claims>(token).ok().map(|data| data.claims)
}

/// `true` only for a decodable token whose `exp` lies before `now` (unix
/// seconds). Opaque tokens are left for the server to judge.
pub fn is_expired(token: &str, now: i64) -> bool {
    decode_claims(token).is_some_and(|claims| claims.exp < now)
}
