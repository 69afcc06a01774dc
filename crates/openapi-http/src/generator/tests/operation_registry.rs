use http::Method;
use serde_json::json;

use super::support::api;
use crate::generator::{
  document::ApiDocument,
  operation_registry::{OperationFilter, OperationRegistry, declared_operations},
};

fn document() -> ApiDocument {
  api(
    json!({
      "/users/{id}": {
        "parameters": [{"name": "id", "in": "path", "required": true}],
        "options": {"operationId": "userOptions"},
        "delete": {"operationId": "deleteUser", "tags": ["users", "admin"]},
        "get": {"operationId": "getUser", "tags": ["users"], "summary": "Fetch"},
        "trace": {"operationId": "traceUser"}
      },
      "/admin": {
        "patch": {"operationId": "patchAdmin", "tags": ["admin"]}
      },
      "/users": {
        "put": {"tags": ["users"]},
        "post": {"operationId": "createUser", "tags": ["users"]},
        "head": {"operationId": "headUsers"}
      }
    }),
    json!({}),
  )
}

fn labels(filter: &OperationFilter) -> Vec<String> {
  let document = document();
  let registry = OperationRegistry::new(&document);
  registry.find(filter).iter().map(ToString::to_string).collect()
}

#[test]
fn test_registry_order() {
  assert_eq!(
    labels(&OperationFilter::default()),
    [
      "PATCH /admin (patchAdmin)",
      "POST /users (createUser)",
      "PUT /users",
      "HEAD /users (headUsers)",
      "GET /users/{id} (getUser)",
      "DELETE /users/{id} (deleteUser)",
      "OPTIONS /users/{id} (userOptions)",
    ]
  );
}

#[test]
fn test_trace_is_skipped() {
  let document = document();
  let registry = OperationRegistry::new(&document);

  let operations = registry.find(&OperationFilter::default());

  assert_eq!(operations.len(), 7);
  assert!(!registry.is_empty());
  assert_eq!(registry.skipped(), [("/users/{id}", Method::TRACE)]);
  assert!(operations.iter().all(|op| op.method != Method::TRACE));
}

#[test]
fn test_declared_operations_are_unique() {
  let document = document();
  let item = &document.spec().paths.as_ref().unwrap()["/users/{id}"];

  let methods = declared_operations(item).map(|(method, _)| method).collect::<Vec<_>>();

  assert_eq!(methods.len(), 4);
  assert_eq!(methods.iter().filter(|m| **m == Method::TRACE).count(), 1);
}

#[test]
fn test_single_trace_warning_per_path() {
  let document = api(json!({"/echo": {"trace": {}, "get": {}}}), json!({}));
  let registry = OperationRegistry::new(&document);

  assert_eq!(registry.skipped(), [("/echo", Method::TRACE)]);
}

#[test]
fn test_filter_by_operation_id() {
  let filter = OperationFilter {
    operation_id: Some("deleteUser".to_string()),
    ..Default::default()
  };
  assert_eq!(labels(&filter), ["DELETE /users/{id} (deleteUser)"]);
}

#[test]
fn test_filter_by_path_is_exact() {
  let filter = OperationFilter {
    path: Some("/users".to_string()),
    ..Default::default()
  };
  assert_eq!(
    labels(&filter),
    ["POST /users (createUser)", "PUT /users", "HEAD /users (headUsers)"]
  );
}

#[test]
fn test_filter_by_tag() {
  let filter = OperationFilter {
    tag: Some("admin".to_string()),
    ..Default::default()
  };
  assert_eq!(
    labels(&filter),
    ["PATCH /admin (patchAdmin)", "DELETE /users/{id} (deleteUser)"]
  );
}

#[test]
fn test_filters_combine() {
  let filter = OperationFilter {
    path: Some("/users/{id}".to_string()),
    tag: Some("users".to_string()),
    ..Default::default()
  };
  assert_eq!(
    labels(&filter),
    ["GET /users/{id} (getUser)", "DELETE /users/{id} (deleteUser)"]
  );

  let filter = OperationFilter {
    operation_id: Some("getUser".to_string()),
    tag: Some("admin".to_string()),
    ..Default::default()
  };
  assert!(labels(&filter).is_empty());
}

#[test]
fn test_filter_display() {
  assert!(OperationFilter::default().is_empty());
  assert_eq!(OperationFilter::default().to_string(), "any operation");

  let filter = OperationFilter {
    operation_id: Some("getUser".to_string()),
    path: None,
    tag: Some("users".to_string()),
  };
  assert!(!filter.is_empty());
  assert_eq!(filter.to_string(), "operation id 'getUser', tag 'users'");
}

#[test]
fn test_empty_document() {
  let document = api(json!({}), json!({}));
  let registry = OperationRegistry::new(&document);

  assert!(registry.is_empty());
  assert!(registry.find(&OperationFilter::default()).is_empty());
}
