//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:5000/docs`
//! - OpenAPI JSON: `http://localhost:5000/api-docs/openapi.json`

use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::ErrorBody;
use crate::models::{Dish, LineItem, Order, OrderStatus};

/// Dish request fields (documentation only; requests are validated by guards)
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
pub struct DishInput {
    /// Ignored on create; must equal the route id on update when present
    pub id: Option<String>,
    #[schema(example = "Taco")]
    pub name: String,
    #[schema(example = "Spicy")]
    pub description: String,
    /// Integer greater than 0
    #[schema(example = 5)]
    pub price: u64,
    #[schema(example = "http://x")]
    pub image_url: String,
}

/// Order request fields (documentation only; requests are validated by guards)
#[allow(dead_code)]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    /// Ignored on create; must equal the route id on update when present
    pub id: Option<String>,
    #[schema(example = "308 Negra Arroyo Lane, Albuquerque, NM")]
    pub deliver_to: String,
    #[schema(example = "(505) 143-3369")]
    pub mobile_number: String,
    /// Required on update, ignored on create
    pub status: Option<OrderStatus>,
    /// At least one item, each with quantity > 0
    pub dishes: Vec<LineItem>,
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GrubDash API",
        version = "1.0.0",
        description = "Dishes and delivery orders. Every request body nests its fields under `data`; every success body is `{ data }`, every error is `{ message }`.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::dish::list_dishes,
        crate::gateway::handlers::dish::create_dish,
        crate::gateway::handlers::dish::read_dish,
        crate::gateway::handlers::dish::update_dish,
        crate::gateway::handlers::order::list_orders,
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::order::read_order,
        crate::gateway::handlers::order::update_order,
        crate::gateway::handlers::order::delete_order,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            Dish,
            DishInput,
            Order,
            OrderInput,
            OrderStatus,
            LineItem,
        )
    ),
    tags(
        (name = "Dishes", description = "Menu dishes"),
        (name = "Orders", description = "Delivery orders and their status lifecycle"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "GrubDash API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let json = ApiDoc::openapi().to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("GrubDash API"));
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths;
        for path in [
            "/health",
            "/dishes",
            "/dishes/{dishId}",
            "/orders",
            "/orders/{orderId}",
        ] {
            assert!(paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_schemas_registered() {
        let components = ApiDoc::openapi()
            .components
            .expect("should have components");
        for name in ["Dish", "Order", "OrderStatus", "LineItem", "ErrorBody"] {
            assert!(components.schemas.contains_key(name), "missing {name}");
        }
    }
}
