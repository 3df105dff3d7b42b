//! OpenAPI document aggregation.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api::models::livestreams::{LivestreamResponse, ReserveLivestreamRequest};
use crate::api::models::tags::Tag;
use crate::api::models::users::{Theme, UserResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::livestreams::reserve_livestream,
        crate::api::handlers::livestreams::search_livestreams,
        crate::api::handlers::livestreams::get_my_livestreams,
        crate::api::handlers::livestreams::get_user_livestreams,
        crate::api::handlers::livestreams::get_livestream,
    ),
    components(schemas(ReserveLivestreamRequest, LivestreamResponse, UserResponse, Theme, Tag)),
    modifiers(&SecurityAddon),
    tags(
        (name = "livestreams", description = "Livestream reservation and retrieval")
    )
)]
pub struct ApiDoc;

/// Security scheme for session-verified routes (Bearer token).
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "session_token".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token issued by the external session service"))
                        .build(),
                ),
            );
        }
    }
}
