#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{schema::Schema, RefOr};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            other => panic!("{name} should be an object schema, got {other:?}"),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        let components = openapi.components.as_ref().unwrap();
        for name in ["ErrorResponse", "HealthResponse", "DashboardResponse", "ProductsResponse", "DashboardView"] {
            assert!(components.schemas.contains_key(name), "missing schema {name}");
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_paths_are_documented() {
        let openapi = ApiDoc::openapi();
        for path in ["/health", "/api/v1/products", "/api/v1/dashboard"] {
            assert!(openapi.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_dashboard_view_schema_structure() {
        let properties = object_properties("DashboardView");
        for field in ["product_id", "products", "chart", "forecast_table", "accuracy"] {
            assert!(properties.iter().any(|p| p == field), "missing field {field}");
        }
    }

    #[test]
    fn test_dashboard_query_parameters() {
        let openapi = ApiDoc::openapi();
        let item = openapi.paths.paths.get("/api/v1/dashboard").unwrap();
        let json = serde_json::to_value(item).unwrap();
        let params: Vec<&str> = json["get"]["parameters"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(params, vec!["product_id", "start_date", "end_date"]);
    }
}
