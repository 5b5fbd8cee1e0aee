//! Integration tests for the schema model and row store
//!
//! Exercises the full contract of the built-in social schema: reference
//! resolution, enum membership, composite-key uniqueness, and the
//! serialize-reload round trip.

use schemagram::schema::Schema;
use schemagram::social::social_schema;
use schemagram::store::{row, Dataset, Row, Value};

fn user(id: i64, username: &str) -> Row {
    row(&[
        ("id", Value::Int(id)),
        ("username", Value::Text(username.to_string())),
        ("email", Value::Text(format!("{username}@example.com"))),
        ("firstname", Value::Text("Test".to_string())),
        ("lastname", Value::Text("User".to_string())),
        ("password", Value::Text("secret".to_string())),
    ])
}

#[test]
fn test_every_foreign_key_resolves_to_a_key_column() {
    let schema = social_schema();

    assert!(schema.validate_relations().is_ok());

    for relation in schema.relations() {
        let target = schema
            .get_entity(&relation.to_entity)
            .expect("target entity exists");
        let column = target
            .column(&relation.to_column)
            .expect("target column exists");
        assert!(
            column.primary_key || column.unique,
            "{relation} must point at a key column"
        );
    }
}

#[test]
fn test_media_type_accepts_exactly_image_and_video() {
    let schema = social_schema();
    let mut data = Dataset::new();

    data.insert(&schema, "user", user(1, "ada")).expect("user");
    data.insert(
        &schema,
        "post",
        row(&[("id", Value::Int(1)), ("user_id", Value::Int(1))]),
    )
    .expect("post");

    let media = |id: i64, kind: &str| {
        row(&[
            ("id", Value::Int(id)),
            ("post_id", Value::Int(1)),
            ("type", Value::Text(kind.to_string())),
            ("url", Value::Text("https://cdn.example.com/x".to_string())),
        ])
    };

    assert!(data.insert(&schema, "media", media(1, "image")).is_ok());
    assert!(data.insert(&schema, "media", media(2, "video")).is_ok());

    for bad in ["gif", "audio", "IMAGE", ""] {
        let errors = data
            .insert(&schema, "media", media(99, bad))
            .expect_err("non-member value must be rejected");
        assert!(
            errors.iter().any(|e| e.contains("media_type")),
            "error should name the enum for value {bad:?}: {errors:?}"
        );
    }

    assert_eq!(data.row_count("media"), 2);
}

#[test]
fn test_follower_rejects_duplicate_ordered_pair() {
    let schema = social_schema();
    let mut data = Dataset::new();

    data.insert(&schema, "user", user(1, "ada")).expect("user 1");
    data.insert(&schema, "user", user(2, "grace")).expect("user 2");

    let edge = row(&[("user_from_id", Value::Int(1)), ("user_to_id", Value::Int(2))]);
    data.insert(&schema, "follower", edge.clone()).expect("first edge");

    let errors = data
        .insert(&schema, "follower", edge)
        .expect_err("duplicate pair must be rejected");
    assert!(errors.iter().any(|e| e.contains("duplicate primary key")));

    // Reversed pair is a distinct key
    data.insert(
        &schema,
        "follower",
        row(&[("user_from_id", Value::Int(2)), ("user_to_id", Value::Int(1))]),
    )
    .expect("reverse edge is distinct");
}

#[test]
fn test_end_to_end_round_trip_preserves_references() {
    let schema = social_schema();
    let mut data = Dataset::new();

    data.insert(&schema, "user", user(1, "ada")).expect("user");
    data.insert(
        &schema,
        "post",
        row(&[
            ("id", Value::Int(100)),
            ("user_id", Value::Int(1)),
            ("caption", Value::Text("sunset".to_string())),
        ]),
    )
    .expect("post");
    data.insert(
        &schema,
        "media",
        row(&[
            ("id", Value::Int(200)),
            ("post_id", Value::Int(100)),
            ("type", Value::Text("image".to_string())),
            ("url", Value::Text("https://cdn.example.com/sunset.png".to_string())),
        ]),
    )
    .expect("media");
    data.insert(
        &schema,
        "comment",
        row(&[
            ("id", Value::Int(300)),
            ("post_id", Value::Int(100)),
            ("author_id", Value::Int(1)),
            ("comment_text", Value::Text("lovely".to_string())),
        ]),
    )
    .expect("comment");

    let json = data.to_json().expect("serialize");
    let reloaded = Dataset::from_json(&json).expect("reload");

    assert_eq!(reloaded, data);
    reloaded.validate(&schema).expect("all references intact");

    assert_eq!(reloaded.rows("post")[0].get("user_id"), Some(&Value::Int(1)));
    assert_eq!(reloaded.rows("media")[0].get("post_id"), Some(&Value::Int(100)));
    assert_eq!(reloaded.rows("comment")[0].get("post_id"), Some(&Value::Int(100)));
    assert_eq!(reloaded.rows("comment")[0].get("author_id"), Some(&Value::Int(1)));
}

#[test]
fn test_dangling_reference_detected_after_reload() {
    // A dataset edited outside the insert path must not validate
    let schema = social_schema();
    let json = r#"{
        "tables": {
            "post": [
                { "id": 1, "user_id": 42, "caption": null, "created_at": 0 }
            ]
        }
    }"#;

    let data = Dataset::from_json(json).expect("parse");
    let errors = data.validate(&schema).expect_err("dangling user_id");
    assert!(errors.iter().any(|e| e.contains("user_id")));
}

#[test]
fn test_schema_toml_file_round_trip() {
    let schema = social_schema();
    let toml_str = schema.to_toml().expect("serialize");

    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("social.toml");
    std::fs::write(&path, &toml_str).expect("write schema file");

    let reloaded = Schema::from_toml_file(&path).expect("load schema file");
    assert_eq!(reloaded, schema);
    assert!(reloaded.validate_relations().is_ok());
}

#[test]
fn test_schema_file_errors_are_reported() {
    let dir = tempfile::TempDir::new().expect("temp dir");

    let missing = dir.path().join("absent.toml");
    let err = Schema::from_toml_file(&missing).expect_err("missing file");
    assert!(err.contains("Failed to read"));

    let invalid = dir.path().join("broken.toml");
    std::fs::write(&invalid, "entities = 5").expect("write invalid file");
    let err = Schema::from_toml_file(&invalid).expect_err("invalid shape");
    assert!(err.contains("Failed to parse"));
}
