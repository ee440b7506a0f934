use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Access token as returned by the Threads token endpoints.
///
/// The provider's JSON object is kept as-is; the getters read from it.
/// Short-lived tokens usually carry only `access_token` (and sometimes
/// `user_id`); long-lived and refreshed tokens add `token_type` and
/// `expires_in`. The only requirement is a string `access_token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Token {
    raw: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Token {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        match raw.get("access_token") {
            Some(Value::String(_)) => Ok(Self { raw }),
            _ => Err("token response has no string `access_token`".to_string()),
        }
    }
}

impl From<Token> for Map<String, Value> {
    fn from(token: Token) -> Self {
        token.raw
    }
}

impl Token {
    pub fn access_token(&self) -> &str {
        self.raw
            .get("access_token")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn token_type(&self) -> Option<&str> {
        self.raw.get("token_type").and_then(Value::as_str)
    }

    /// Lifetime in seconds, when the provider reports one.
    pub fn expires_in(&self) -> Option<i64> {
        self.raw.get("expires_in").and_then(Value::as_i64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Absolute expiry, counting `expires_in` from `issued_at`.
    ///
    /// `None` when there is no lifetime or it does not fit in a timestamp.
    pub fn expires_at(
        &self,
        issued_at: chrono::DateTime<chrono::Utc>,
    ) -> Option<chrono::DateTime<chrono::Utc>> {
        let secs = self.expires_in()?;
        chrono::TimeDelta::try_seconds(secs).and_then(|d| issued_at.checked_add_signed(d))
    }
}

/// Profile of the token owner, from `GET /v1.0/me`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    raw: Map<String, Value>,
}

impl Profile {
    /// User id; numeric ids are rendered as decimal strings.
    pub fn id(&self) -> Option<String> {
        match self.raw.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        self.str_field("threads_profile_picture_url")
    }

    pub fn biography(&self) -> Option<&str> {
        self.str_field("threads_biography")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }
}
