//! Built-in dataset catalogue
//!
//! Per SCHEMAS.md §5, these eight retail datasets are always available
//! without a schema directory. Field lists are load-bearing: header
//! validation matches against them exactly.

use super::types::{DatasetSchema, FieldSpec};

/// Returns the built-in dataset schemas in catalogue order.
pub fn builtin_schemas() -> Vec<DatasetSchema> {
    vec![
        DatasetSchema::new(
            "users",
            "Users Data",
            "Customer information, preferences, and green points",
            vec![
                FieldSpec::string("user_id", "U500"),
                FieldSpec::string("name", "Jason"),
                FieldSpec::string("city", "Jaipur"),
                FieldSpec::string("green_points", "461"),
                FieldSpec::string("preferred_slot", "Afternoon"),
            ],
        ),
        DatasetSchema::new(
            "product_catalog",
            "Product Catalog",
            "Product information, categories, prices, and eco scores",
            vec![
                FieldSpec::string("product_id", "P005"),
                FieldSpec::string("name", "Handwash 250ml"),
                FieldSpec::string("category", "Personal Care"),
                FieldSpec::number("price", "888"),
                FieldSpec::number("eco_score", "4"),
            ],
        ),
        DatasetSchema::new(
            "external_events",
            "External Events",
            "Weather data, city events, and external factors",
            vec![
                FieldSpec::date("date", "2024-06-28"),
                FieldSpec::string("city", "Delhi"),
                FieldSpec::string("weather", "Stormy"),
                FieldSpec::string("event", "Monsoon Alert"),
            ],
        ),
        DatasetSchema::new(
            "smart_whispers",
            "Smart Whispers",
            "AI-generated suggestions and recommendations",
            vec![
                FieldSpec::string("id", "W499"),
                FieldSpec::string("suggestion_text", "Move 71 Kurta Set from Mumbai to Mumbai."),
                FieldSpec::date("triggered_on", "2025-06-29 08:46 AM"),
                FieldSpec::string("status", "In Review"),
            ],
        ),
        DatasetSchema::new(
            "delivery_data",
            "Delivery Data",
            "Delivery information, routes, and carbon savings",
            vec![
                FieldSpec::string("delivery_id", "D999"),
                FieldSpec::string("user_id", "U193"),
                FieldSpec::string("store_id", "S001"),
                FieldSpec::string("distance_km", "13.3"),
                FieldSpec::string("delivery_mode", "Grouped"),
                FieldSpec::date("delivery_time", "2025-06-30 01:36 PM"),
                FieldSpec::number("carbon_saved_g", "394"),
            ],
        ),
        DatasetSchema::new(
            "store_locations",
            "Store Locations",
            "Store information and geographical coordinates",
            vec![
                FieldSpec::string("store_id", "S005"),
                FieldSpec::string("store_name", "Surat Store"),
                FieldSpec::string("city", "Surat"),
                FieldSpec::number("latitude", "-15.7225"),
                FieldSpec::number("longitude", "-136.1711"),
            ],
        ),
        DatasetSchema::new(
            "sales_data",
            "Sales Data",
            "Historical sales information and trends",
            vec![
                FieldSpec::date("date", "2024-03-07"),
                FieldSpec::string("product_id", "P004"),
                FieldSpec::string("product_name", "LED Bulb"),
                FieldSpec::string("store_id", "S002"),
                FieldSpec::string("store_city", "Mumbai"),
                FieldSpec::string("units_sold", "66"),
            ],
        ),
        DatasetSchema::new(
            "inventory_data",
            "Inventory Data",
            "Current stock levels and inventory tracking",
            vec![
                FieldSpec::string("store_id", "S001"),
                FieldSpec::string("product_id", "P005"),
                FieldSpec::string("product_name", "Handwash 250ml"),
                FieldSpec::number("quantity", "137"),
                FieldSpec::date("last_updated", "2025-06-27 02:51 PM"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_has_eight_datasets() {
        assert_eq!(builtin_schemas().len(), 8);
    }

    #[test]
    fn test_catalogue_ids() {
        let ids: Vec<String> = builtin_schemas()
            .into_iter()
            .map(|s| s.dataset_id)
            .collect();
        assert_eq!(
            ids,
            [
                "users",
                "product_catalog",
                "external_events",
                "smart_whispers",
                "delivery_data",
                "store_locations",
                "sales_data",
                "inventory_data",
            ]
        );
    }

    #[test]
    fn test_all_builtin_schemas_structurally_valid() {
        for schema in builtin_schemas() {
            assert!(
                schema.validate_structure().is_ok(),
                "schema '{}' failed structural validation",
                schema.dataset_id
            );
        }
    }

    #[test]
    fn test_inventory_data_columns() {
        let schemas = builtin_schemas();
        let inventory = schemas
            .iter()
            .find(|s| s.dataset_id == "inventory_data")
            .unwrap();
        assert_eq!(
            inventory.column_names(),
            ["store_id", "product_id", "product_name", "quantity", "last_updated"]
        );
    }

    #[test]
    fn test_delivery_data_field_count() {
        let schemas = builtin_schemas();
        let delivery = schemas
            .iter()
            .find(|s| s.dataset_id == "delivery_data")
            .unwrap();
        assert_eq!(delivery.field_count(), 7);
    }
}
