//! E2E tests for the ToOrdered derive macro.
//!
//! This test suite validates key resolution (`#[ordered]` and serde naming attributes),
//! field visibility, skipped and function-typed fields, and generic records.

#![allow(dead_code)]

use std::{collections::BTreeMap, rc::Rc};

use ordered_record::{Reflect, ToOrdered};
use testlib::{convert_record, encode, keys_in_order};

/// Collect `(name, key, exported)` for every field the derive reflects.
fn reflected_fields<T: ToOrdered>(value: &T) -> Vec<(&'static str, &'static str, bool)> {
    let Reflect::Struct(fields) = value.reflect() else {
        panic!("Expected a struct reflection");
    };
    fields
        .iter()
        .map(|field| (field.name(), field.key(), field.is_exported()))
        .collect()
}

#[test]
fn derive_to_ordered_reflects_fields_in_declaration_order() {
    //* Given
    #[derive(Default, ToOrdered)]
    struct Unsorted {
        pub zulu: u8,
        pub alpha: u8,
        pub mike: u8,
    }

    //* When
    let fields = reflected_fields(&Unsorted::default());

    //* Then
    assert_eq!(
        fields,
        [
            ("zulu", "zulu", true),
            ("alpha", "alpha", true),
            ("mike", "mike", true),
        ]
    );
}

#[test]
fn derive_to_ordered_with_ordered_rename_overrides_serde_rename() {
    //* Given
    #[derive(Default, serde::Serialize, ToOrdered)]
    struct Account {
        #[ordered(rename = "id")]
        #[serde(rename = "accountId")]
        pub account_id: u64,
        #[serde(rename = "name")]
        pub display_name: String,
    }

    //* When
    let map = convert_record(&Account::default(), false);

    //* Then
    assert_eq!(encode(&map), r#"{"id":0,"name":""}"#);
}

#[test]
fn derive_to_ordered_with_serde_rename_all_applies_rule_to_unrenamed_fields() {
    //* Given
    #[derive(Default, serde::Serialize, ToOrdered)]
    #[serde(rename_all = "camelCase")]
    struct Profile {
        pub first_name: String,
        #[serde(rename = "surname")]
        pub last_name: String,
        pub created_at: u64,
    }

    //* When
    let map = convert_record(&Profile::default(), false);

    //* Then
    assert_eq!(
        keys_in_order(&encode(&map)),
        ["firstName", "surname", "createdAt"]
    );
}

#[test]
fn derive_to_ordered_with_rename_all_on_non_snake_case_fields_matches_serde_keys() {
    //* Given
    #[derive(Default, serde::Serialize, ToOrdered)]
    #[serde(rename_all = "kebab-case")]
    #[allow(non_snake_case)]
    struct Legacy {
        pub userID: u32,
        pub HTTPStatus: u16,
        pub retry_after: u32,
    }

    #[derive(Default, serde::Serialize, ToOrdered)]
    #[serde(rename_all = "snake_case")]
    #[allow(non_snake_case)]
    struct Mixed {
        pub requestId: String,
        pub body_size: u64,
    }

    //* When
    let legacy = encode(&convert_record(&Legacy::default(), false));
    let mixed = encode(&convert_record(&Mixed::default(), false));

    //* Then
    assert_eq!(keys_in_order(&legacy), ["userID", "HTTPStatus", "retry-after"]);
    assert_eq!(
        legacy,
        serde_json::to_string(&Legacy::default()).expect("encoding should succeed")
    );
    assert_eq!(keys_in_order(&mixed), ["requestId", "body_size"]);
    assert_eq!(
        mixed,
        serde_json::to_string(&Mixed::default()).expect("encoding should succeed")
    );
}

#[test]
fn derive_to_ordered_with_ordered_rename_all_wins_over_serde_rename_all() {
    //* Given
    #[derive(Default, serde::Serialize, ToOrdered)]
    #[serde(rename_all = "camelCase")]
    #[ordered(rename_all = "SCREAMING_SNAKE_CASE")]
    struct Env {
        pub database_url: String,
        pub log_level: String,
    }

    //* When
    let map = convert_record(&Env::default(), false);

    //* Then
    assert_eq!(
        keys_in_order(&encode(&map)),
        ["DATABASE_URL", "LOG_LEVEL"]
    );
}

#[test]
fn derive_to_ordered_with_split_serde_rename_uses_serialize_name() {
    //* Given
    #[derive(Default, serde::Serialize, serde::Deserialize, ToOrdered)]
    struct Message {
        #[serde(rename(serialize = "out", deserialize = "in"))]
        pub body: String,
    }

    //* When
    let map = convert_record(&Message::default(), false);

    //* Then
    assert_eq!(encode(&map), r#"{"out":""}"#);
}

#[test]
fn derive_to_ordered_with_empty_rename_falls_back_to_field_name() {
    //* Given
    #[derive(Default, ToOrdered)]
    struct Blank {
        #[ordered(rename = "")]
        pub value: i32,
    }

    //* When
    let fields = reflected_fields(&Blank::default());

    //* Then
    assert_eq!(fields, [("value", "value", true)]);
}

#[test]
fn derive_to_ordered_with_raw_identifier_uses_unraw_name() {
    //* Given
    #[derive(Default, ToOrdered)]
    struct Token {
        pub r#type: String,
        pub r#match: bool,
    }

    //* When
    let map = convert_record(&Token::default(), false);

    //* Then
    assert_eq!(encode(&map), r#"{"type":"","match":false}"#);
}

#[test]
fn derive_to_ordered_marks_only_pub_fields_as_exported() {
    //* Given
    #[derive(Default, ToOrdered)]
    struct Visibility {
        pub open: u8,
        pub(crate) crate_only: u8,
        closed: u8,
    }

    //* When
    let fields = reflected_fields(&Visibility::default());
    let public = convert_record(&Visibility::default(), true);

    //* Then
    assert_eq!(
        fields,
        [
            ("open", "open", true),
            ("crate_only", "crate_only", false),
            ("closed", "closed", false),
        ]
    );
    assert_eq!(encode(&public), r#"{"open":0}"#);
}

#[test]
fn derive_to_ordered_with_skip_excludes_field_without_to_ordered_impl() {
    //* Given
    struct NotReflectable;

    #[derive(ToOrdered)]
    struct Cache {
        pub name: String,
        #[ordered(skip)]
        handle: NotReflectable,
        pub size: usize,
    }

    let value = Cache {
        name: "lru".to_owned(),
        handle: NotReflectable,
        size: 16,
    };

    //* When
    let map = convert_record(&value, false);

    //* Then
    assert_eq!(encode(&map), r#"{"name":"lru","size":16}"#);
}

#[test]
fn derive_to_ordered_drops_function_fields() {
    //* Given
    #[derive(ToOrdered)]
    struct Hooks {
        pub name: String,
        pub on_start: fn() -> bool,
        pub on_stop: Option<Box<dyn Fn(&str)>>,
        pub on_error: Rc<dyn FnMut(u32) -> u32>,
        pub retries: u8,
    }

    let value = Hooks {
        name: "worker".to_owned(),
        on_start: || true,
        on_stop: None,
        on_error: Rc::new(|code| code),
        retries: 3,
    };

    //* When
    let map = convert_record(&value, false);

    //* Then
    assert_eq!(encode(&map), r#"{"name":"worker","retries":3}"#);
}

#[test]
fn derive_to_ordered_with_generic_field_converts_type_argument() {
    //* Given
    #[derive(ToOrdered)]
    struct Page<T> {
        pub items: Vec<T>,
        pub total: usize,
    }

    #[derive(ToOrdered)]
    struct Item {
        pub sku: String,
    }

    let page = Page {
        items: vec![
            Item {
                sku: "b-2".to_owned(),
            },
            Item {
                sku: "a-1".to_owned(),
            },
        ],
        total: 2,
    };

    //* When
    let map = convert_record(&page, false);

    //* Then
    assert_eq!(
        encode(&map),
        r#"{"items":[{"sku":"b-2"},{"sku":"a-1"}],"total":2}"#
    );
}

#[test]
fn derive_to_ordered_with_custom_bound_replaces_default_bound() {
    //* Given
    #[derive(ToOrdered)]
    #[ordered(bound = "K: AsRef<str> + Ord")]
    struct Index<K> {
        pub entries: BTreeMap<K, u32>,
        #[ordered(skip)]
        pub last: Option<K>,
    }

    #[derive(PartialEq, Eq, PartialOrd, Ord)]
    struct Name(String);

    impl AsRef<str> for Name {
        fn as_ref(&self) -> &str {
            &self.0
        }
    }

    let index = Index {
        entries: BTreeMap::from([
            (Name("beta".to_owned()), 2),
            (Name("alpha".to_owned()), 1),
        ]),
        last: None,
    };

    //* When
    let map = convert_record(&index, false);

    //* Then
    assert_eq!(encode(&map), r#"{"entries":{"alpha":1,"beta":2}}"#);
}

#[test]
fn derive_to_ordered_with_lifetime_parameter_borrows_fields() {
    //* Given
    #[derive(ToOrdered)]
    struct View<'a> {
        pub title: &'a str,
        pub tags: &'a [String],
    }

    let tags = vec!["x".to_owned(), "y".to_owned()];
    let view = View {
        title: "draft",
        tags: &tags,
    };

    //* When
    let map = convert_record(&view, false);

    //* Then
    assert_eq!(encode(&map), r#"{"title":"draft","tags":["x","y"]}"#);
}

#[test]
fn derive_to_ordered_with_empty_record_produces_empty_map() {
    //* Given
    #[derive(ToOrdered)]
    struct Empty {}

    //* When
    let map = convert_record(&Empty {}, false);

    //* Then
    assert!(map.is_empty());
    assert_eq!(encode(&map), "{}");
}
