//! Shared helpers and fixtures for the integration tests.

use ordered_record::{OrderedMap, ToOrdered};

pub mod fixtures {
    //! Records shared by several test suites.

    use std::collections::HashMap;

    use ordered_record::ToOrdered;

    /// A record with a string and an integer field.
    #[derive(Debug, Clone, Default, ToOrdered)]
    pub struct Sample {
        pub foo: String,
        pub bar: i64,
    }

    /// Settings whose serde encoding drops zero values.
    #[derive(Debug, Clone, Default, serde::Serialize, ToOrdered)]
    pub struct Settings {
        #[serde(rename = "foo", skip_serializing_if = "String::is_empty")]
        pub foo: String,
        #[serde(rename = "bar", skip_serializing_if = "is_zero")]
        pub bar: i64,
    }

    fn is_zero(value: &i64) -> bool {
        *value == 0
    }

    /// A record whose fields hold nothing yet.
    #[derive(Debug, Default, ToOrdered)]
    pub struct Unset {
        pub ptr: Option<Box<String>>,
        pub interface: Option<serde_json::Value>,
        pub slice: Option<Vec<i64>>,
        pub map: Option<HashMap<String, String>>,
    }
}

/// Convert a value that is known to be a record, panicking otherwise.
pub fn convert_record<T: ToOrdered + ?Sized>(value: &T, public_only: bool) -> OrderedMap {
    ordered_record::convert(value, public_only)
        .expect("conversion should succeed")
        .expect("value should not be null")
}

/// Encode a converted map as compact JSON.
pub fn encode(map: &OrderedMap) -> String {
    map.to_json_string().expect("encoding should succeed")
}

/// The top-level keys of a JSON object, in the order they appear in the text.
pub fn keys_in_order(json: &str) -> Vec<String> {
    let map: OrderedMap = serde_json::from_str(json).expect("input should be a JSON object");
    map.keys().map(str::to_owned).collect()
}
