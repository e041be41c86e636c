//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Product inventory queries, stock metrics and stock transitions",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_inventory::ApiDoc)
    ),
    tags(
        (name = "Inventory", description = "Product inventory endpoints")
    )
)]
pub struct ApiDoc;
