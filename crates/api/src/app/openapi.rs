//! Generated OpenAPI document and the Swagger UI page that renders it.

use axum::{response::Html, routing::get, Json, Router};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use duenos_core::{Owner, OwnerFields};

use super::dto::{CreatedResponse, ErrorBody, LoginRequest, MessageResponse, OwnerPage, TokenResponse};
use super::routes;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API de Comida y Descuentos",
        version = "1.0.0",
        description = "API REST para gestionar los dueños de mascotas, su comida favorita y su descuento navideño."
    ),
    paths(
        routes::owners::list_owners,
        routes::owners::get_owner,
        routes::owners::create_owner,
        routes::owners::update_owner,
        routes::owners::delete_owner,
        routes::auth::login,
        routes::system::health,
        routes::system::readiness,
    ),
    components(schemas(
        Owner,
        OwnerFields,
        OwnerPage,
        LoginRequest,
        TokenResponse,
        MessageResponse,
        CreatedResponse,
        ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Dueños", description = "Operaciones CRUD para dueños de mascota"),
        (name = "Auth", description = "Emisión de tokens"),
        (name = "System", description = "Sondas de salud")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

const SWAGGER_UI_HTML: &str = r##"<!doctype html>
<html lang="es">
  <head>
    <meta charset="utf-8" />
    <title>API de Comida y Descuentos</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({ url: "/api-docs/openapi.json", dom_id: "#swagger-ui" });
      };
    </script>
  </body>
</html>
"##;

/// Unauthenticated documentation routes.
pub fn router() -> Router {
    Router::new()
        .route("/api-docs", get(swagger_ui))
        .route(OPENAPI_JSON_PATH, get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for path in ["/api/duenos", "/api/duenos/{id}", "/login", "/health", "/health/readiness"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert_eq!(doc["info"]["title"], "API de Comida y Descuentos");
        assert_eq!(doc["info"]["version"], "1.0.0");
    }

    #[test]
    fn owner_routes_require_bearer_auth() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
        assert!(doc["paths"]["/api/duenos"]["get"]["security"].is_array());
        assert!(doc["paths"]["/login"]["post"]["security"].is_null());
    }

    #[test]
    fn ui_page_loads_the_json_document() {
        assert!(SWAGGER_UI_HTML.contains(OPENAPI_JSON_PATH));
    }
}
