pub const STATE_ROUTE: &str = "/api/state";
pub const HEALTH_ROUTE: &str = "/healthz";
pub const JSON_CONTENT_TYPE: &str = "application/json";
