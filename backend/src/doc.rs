//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers the shop and health endpoints, the error schema
//! mirrors from [`crate::inbound::http::schemas`] and the bearer security
//! scheme. Swagger UI serves it in debug builds; `openapi-dump` prints it.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::shop::{
    AuthRequest, AuthResponse, CoinHistoryResponse, InfoResponse, InventoryEntry, ReceivedEntry,
    SendCoinRequest, SentEntry,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Adds the JWT bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the coin shop API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Coin shop API",
        description = "Coin ledger with peer-to-peer transfers and a merch shop."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::shop::auth,
        crate::inbound::http::shop::info,
        crate::inbound::http::shop::send_coin,
        crate::inbound::http::shop::buy,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AuthRequest,
        AuthResponse,
        SendCoinRequest,
        InfoResponse,
        InventoryEntry,
        CoinHistoryResponse,
        ReceivedEntry,
        SentEntry
    )),
    tags(
        (name = "shop", description = "Authentication, wallet, transfers and purchases"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/auth")]
    #[case("/api/info")]
    #[case("/api/sendCoin")]
    #[case("/api/buy/{item}")]
    #[case("/health/ready")]
    fn documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn info_response_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let info = schemas.get("InfoResponse").expect("InfoResponse schema");

        assert_object_schema_has_field(info, "coins");
        assert_object_schema_has_field(info, "coinHistory");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
