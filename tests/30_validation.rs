mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use student_api::serializers::SchemaKind;

use common::{create_student, send, test_app};

async fn post_invalid(schema: SchemaKind, payload: Value) -> Value {
    let app = test_app(schema);
    let (status, body) = send(&app, Method::POST, "/api/students", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected body {body}");
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, list) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(list["data"], json!([]), "invalid input must not be stored");
    body["field_errors"].clone()
}

#[tokio::test]
async fn reserved_names_are_rejected() {
    let errors = post_invalid(SchemaKind::Model, json!({"name": "oldboy", "age": 20})).await;
    assert_eq!(errors["name"], json!(["用户名不能为oldboy！"]));

    let errors = post_invalid(SchemaKind::Model, json!({"name": "root", "age": 20})).await;
    assert_eq!(errors["name"], json!(["用户名不能为root！"]));
}

#[tokio::test]
async fn minors_are_rejected() {
    let errors = post_invalid(SchemaKind::Model, json!({"name": "xiaoming", "age": 17})).await;
    assert_eq!(errors["age"], json!(["年龄不能小于18"]));
}

#[tokio::test]
async fn object_check_reports_non_field_errors() {
    let errors = post_invalid(SchemaKind::Model, json!({"name": "alex", "age": 22})).await;
    assert_eq!(errors["non_field_errors"], json!(["alex在22时的故事。。。"]));
}

#[tokio::test]
async fn field_errors_are_collected_together() {
    let errors = post_invalid(SchemaKind::Model, json!({"name": "ab", "age": 200})).await;
    assert_eq!(errors["name"], json!(["Ensure this field has at least 4 characters."]));
    assert_eq!(errors["age"], json!(["Ensure this value is less than or equal to 150."]));
    assert!(errors.get("non_field_errors").is_none());
}

#[tokio::test]
async fn type_errors_use_builtin_messages() {
    let errors = post_invalid(
        SchemaKind::Model,
        json!({"name": "xiaoming", "age": "old", "sex": "maybe"}),
    )
    .await;
    assert_eq!(errors["age"], json!(["A valid integer is required."]));
    assert_eq!(errors["sex"], json!(["Must be a valid boolean."]));
}

#[tokio::test]
async fn missing_fields_are_required() {
    let errors = post_invalid(SchemaKind::Model, json!({})).await;
    assert_eq!(errors["name"], json!(["This field is required."]));
    assert_eq!(errors["age"], json!(["This field is required."]));
    assert!(errors.get("sex").is_none());
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let errors = post_invalid(SchemaKind::Model, json!(["xiaoming", 20])).await;
    assert_eq!(
        errors["non_field_errors"],
        json!(["Invalid data. Expected a dictionary, but got list."])
    );
}

#[tokio::test]
async fn class_null_is_nullable_but_bounded() {
    let app = test_app(SchemaKind::Model);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/students",
        Some(json!({"name": "xiaoming", "age": 20, "class_null": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let errors = post_invalid(
        SchemaKind::Model,
        json!({"name": "xiaoming", "age": 20, "class_null": "too-long"}),
    )
    .await;
    assert_eq!(errors["class_null"], json!(["Ensure this field has no more than 5 characters."]));
}

#[tokio::test]
async fn failed_update_leaves_record_untouched() {
    let app = test_app(SchemaKind::Model);
    let id = create_student(&app, json!({"name": "xiaoming", "age": 20})).await;
    let uri = format!("/api/students/{id}");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"name": "root"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["name"], json!(["用户名不能为root！"]));

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["name"], "xiaoming");
}

#[tokio::test]
async fn oversized_age_reports_the_upper_bound() {
    let payload: Value = serde_json::from_str(r#"{"name": "xiaoming", "age": 99999999999999999999}"#).unwrap();
    let errors = post_invalid(SchemaKind::Model, payload).await;
    assert_eq!(errors["age"], json!(["Ensure this value is less than or equal to 150."]));
}

// Partial updates validate only the supplied attributes, so the object check
// never sees the stored age.
#[tokio::test]
async fn partial_update_checks_only_supplied_attributes() {
    let app = test_app(SchemaKind::Model);
    let id = create_student(&app, json!({"name": "xiaoming", "age": 22})).await;
    let uri = format!("/api/students/{id}");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"name": "alex"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "alex");
    assert_eq!(body["data"]["age"], 22);

    // Supplying both attributes runs the object check again
    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"name": "alex", "age": 22}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["non_field_errors"], json!(["alex在22时的故事。。。"]));
}
