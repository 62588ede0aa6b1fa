//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification consumed by Swagger UI in debug
//! builds. It registers every HTTP endpoint, the shared error schema, and
//! the session cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{LoginRequest, ProfileResponse, RegisterRequest};
use crate::inbound::http::friends::{AddFriendRequest, FriendEntry};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /v1/auth/register or /v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Friendnet backend API",
        description = "Session-authenticated accounts, friendships, and bounded friend-network exploration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::profile,
        crate::inbound::http::friends::add_friend,
        crate::inbound::http::friends::friends,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        ProfileResponse,
        AddFriendRequest,
        FriendEntry,
    )),
    tags(
        (name = "auth", description = "Registration, login, and profile access"),
        (name = "friends", description = "Friendship edges and network traversal"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/v1/auth/register",
            "/v1/auth/login",
            "/v1/auth/logout",
            "/v1/profile",
            "/v1/friends/add",
            "/v1/friends",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }

    #[test]
    fn document_registers_session_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
