//! Wire DTOs for the auth endpoints and the role model.
//!
//! DESIGN
//! ======
//! The backend owns every record; the client only reads the identity and
//! authorization fields it needs for routing. Role strings are kept raw as
//! sent and compared through `normalize_role`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Platform roles recognized by the route guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Organizer,
    ClubManager,
    Player,
    Fan,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Admin, Role::Organizer, Role::ClubManager, Role::Player, Role::Fan];

    /// Parse a backend role string, ignoring case and whitespace layout.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_role(raw);
        Self::ALL.into_iter().find(|role| role.as_str() == normalized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Organizer => "organizer",
            Role::ClubManager => "club_manager",
            Role::Player => "player",
            Role::Fan => "fan",
        }
    }

    /// Landing route for a signed-in user with this role.
    pub fn home_route(self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Organizer => "/organizer",
            Role::ClubManager => "/club-manager",
            Role::Player => "/player",
            Role::Fan => "/fan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Organizer => "Organizer",
            Role::ClubManager => "Club Manager",
            Role::Player => "Player",
            Role::Fan => "Fan",
        }
    }
}

/// Lower-case and collapse each whitespace run into a single `_`.
///
/// `"Club Manager"`, `"club_manager"` and `" CLUB   MANAGER "` all map to
/// `"club_manager"`.
pub fn normalize_role(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// A signed-in user as returned by the sign-in endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier; numeric ids are kept as their decimal string.
    /// Empty when the response omits it.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default, alias = "full_name", alias = "username")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Role exactly as the backend spelled it.
    #[serde(default)]
    pub role: String,
    /// Grants admin-equivalent access regardless of `role`.
    #[serde(default)]
    pub is_superadmin: bool,
    /// `false` only when the account was administratively deactivated.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn role_kind(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        normalize_role(&self.role) == role.as_str()
    }

    pub fn is_deactivated(&self) -> bool {
        !self.is_active
    }

    /// Route the user lands on after sign-in.
    pub fn home_route(&self) -> &'static str {
        if self.is_superadmin {
            return Role::Admin.home_route();
        }
        self.role_kind().map_or("/", Role::home_route)
    }
}

/// `POST /api/auth/signin` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/signin` response body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape shared by all endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "deserialize_detail")]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(D::Error::custom("expected string or numeric id")),
    }
}

/// Validation errors carry a structured `detail`; keep its JSON text.
fn deserialize_detail<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(detail)) => Some(detail),
        Some(other) => Some(other.to_string()),
    })
}
