//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diner API",
        version = "0.1.0",
        description = "Restaurant menu, ordering accounts and admin item management",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/items", api = domain_items::ApiDoc),
        (path = "/api/users", api = domain_users::ApiDoc),
        (path = "/api/auth", api = domain_users::AuthApiDoc)
    )
)]
pub struct ApiDoc;
