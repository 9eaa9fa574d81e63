use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme referenced by protected operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token returned by register and login"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::MessageResponse, axum_helpers::Pagination)
    ),
    info(
        title = "Marketplace API",
        version = "0.1.0",
        description = "Users, seller bank accounts, product catalogue and purchases"
    ),
    nest(
        (path = "/v1/user", api = domain_users::ApiDoc),
        (path = "/v1/bank/account", api = domain_bank_accounts::ApiDoc),
        (path = "/v1/product", api = domain_products::ApiDoc)
    )
)]
pub struct ApiDoc;
