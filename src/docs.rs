//! OpenAPI document and Swagger UI, mounted outside production.

use axum::Router;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::database::{Flight, FlightStatus};
use crate::handlers::protected::flights::create::{CreateFlightRequest, CreateFlightResponse};
use crate::handlers::protected::flights::update::UpdateFlightRequest;
use crate::handlers::public::auth::login::{LoginRequest, LoginResponse};
use crate::handlers::public::users::register::{RegisterRequest, RegisterResponse};
use crate::middleware::AuthUser;
use crate::state::AppState;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Flights API", description = "Flight records with JWT authentication and role-based access"),
    paths(
        crate::handlers::public::auth::login::login_post,
        crate::handlers::public::users::register::register_post,
        crate::handlers::protected::auth::whoami::whoami_get,
        crate::handlers::protected::flights::list::flights_get,
        crate::handlers::protected::flights::create::flights_post,
        crate::handlers::protected::flights::update::flights_put,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        RegisterResponse,
        AuthUser,
        Flight,
        FlightStatus,
        CreateFlightRequest,
        CreateFlightResponse,
        UpdateFlightRequest,
    )),
    tags(
        (name = "auth", description = "Token issuance and inspection"),
        (name = "users", description = "Self-service registration"),
        (name = "flights", description = "Flight search and maintenance")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn docs_router() -> Router<AppState> {
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::{schema::Schema, RefOr};

    #[test]
    fn every_endpoint_is_documented() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        for path in ["/auth/login", "/users/register", "/auth/whoami", "/flights"] {
            assert!(paths.contains_key(path), "missing {}", path);
        }

        let flights = paths.get("/flights").expect("/flights path");
        assert!(flights.get.is_some());
        assert!(flights.post.is_some());
        assert!(flights.put.is_some());
    }

    #[test]
    fn update_request_uses_wire_names() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().expect("components").schemas;

        let object = match schemas.get("UpdateFlightRequest").expect("UpdateFlightRequest schema") {
            RefOr::T(Schema::Object(obj)) => obj,
            _ => panic!("expected inline object schema"),
        };
        assert!(object.properties.contains_key("flightId"));
        assert!(!object.properties.contains_key("flight_id"));
        assert!(object.required.contains(&"status".to_string()));
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
        assert!(components.schemas.contains_key("Flight"));
        assert!(components.schemas.contains_key("FlightStatus"));
    }
}
