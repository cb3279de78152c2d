// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const ITEMS: &str = "/item";
pub const ITEM: &str = "/item/{id}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Value of the Location header for a newly created item
pub fn item_location(id: i32) -> String {
    format!("item/{}", id)
}
