use http::Method;
use serde_json::json;

use super::support::{api, document, header_lines, render, request_line};
use crate::generator::{
  operation_registry::{OperationFilter, OperationRegistry},
  renderer::RequestRenderer,
};

#[test]
fn test_path_parameter_example() {
  let document = api(
    json!({
      "/users/{userId}": {
        "get": {
          "operationId": "getUser",
          "summary": "Get a user",
          "parameters": [
            {"name": "userId", "in": "path", "required": true, "schema": {"type": "string"}, "example": "12345"}
          ]
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/users/{userId}", &Method::GET);
  assert_eq!(
    rendered,
    "###\n# @name getUser\n# Get a user\n\nGET https://api.example.com/users/12345\n"
  );
}

#[test]
fn test_two_path_parameters_are_replaced() {
  let document = api(
    json!({
      "/orgs/{orgId}/members/{memberId}": {
        "get": {
          "parameters": [
            {"name": "orgId", "in": "path", "required": true, "schema": {"type": "string"}, "example": "acme"},
            {"name": "memberId", "in": "path", "required": true, "schema": {"type": "integer"}, "example": 7}
          ]
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/orgs/{orgId}/members/{memberId}", &Method::GET);
  let line = request_line(&rendered);
  assert_eq!(line, "GET https://api.example.com/orgs/acme/members/7");
  assert!(!line.contains('{') && !line.contains('}'));
}

#[test]
fn test_path_parameter_fallbacks() {
  let document = api(
    json!({
      "/items/{itemId}/{slot}/{label}": {
        "parameters": [
          {"name": "itemId", "in": "path", "required": true, "schema": {"type": "integer", "minimum": 100}}
        ],
        "put": {
          "parameters": [
            {"name": "slot", "in": "path", "required": true},
            {"name": "label", "in": "path", "required": true, "schema": {"type": "array", "items": {"type": "string", "enum": ["a", "b"]}}}
          ]
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/items/{itemId}/{slot}/{label}", &Method::PUT);
  assert_eq!(request_line(&rendered), "PUT https://api.example.com/items/100/{{slot}}/a");
}

#[test]
fn test_operation_parameter_after_path_level_parameter() {
  let document = api(
    json!({
      "/files/{name}": {
        "parameters": [
          {"name": "name", "in": "path", "required": true, "schema": {"type": "string"}, "example": "from-path-item"}
        ],
        "get": {
          "parameters": [
            {"name": "name", "in": "path", "required": true, "schema": {"type": "string"}, "example": "from-operation"}
          ]
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/files/{name}", &Method::GET);
  assert_eq!(request_line(&rendered), "GET https://api.example.com/files/from-path-item");
}

#[test]
fn test_query_string() {
  let document = api(
    json!({
      "/search": {
        "get": {
          "parameters": [
            {"name": "q", "in": "query", "example": "cats"},
            {"name": "page", "in": "query", "schema": {"type": "integer", "minimum": 1}},
            {"name": "sort", "in": "query", "schema": {"type": "array", "items": {"type": "string", "default": "asc"}}},
            {"name": "cursor", "in": "query"},
            {"name": "ids", "in": "query", "example": [9, 8]}
          ]
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/search", &Method::GET);
  assert_eq!(
    request_line(&rendered),
    "GET https://api.example.com/search?q=cats&page=1&sort=asc&cursor={{cursor}}&ids=9"
  );
}

#[test]
fn test_no_query_parameters_omits_question_mark() {
  let document = api(json!({"/ping": {"get": {}}}), json!({}));

  let rendered = render(&document, "/ping", &Method::GET);
  assert_eq!(request_line(&rendered), "GET https://api.example.com/ping");
}

#[test]
fn test_no_servers_uses_hostname_placeholder() {
  let document = document(json!({
    "openapi": "3.0.3",
    "info": {"title": "No servers", "version": "1.0.0"},
    "paths": {"/ping": {"head": {}}}
  }));

  let rendered = render(&document, "/ping", &Method::HEAD);
  assert_eq!(request_line(&rendered), "HEAD {{hostname}}/ping");
}

#[test]
fn test_header_parameters_do_not_synthesize() {
  let document = api(
    json!({
      "/reports": {
        "get": {
          "parameters": [
            {"name": "X-Tenant", "in": "header", "example": "acme"},
            {"name": "X-Limit", "in": "header", "schema": {"type": "integer", "minimum": 5}},
            {"name": "session", "in": "cookie", "example": "abc"}
          ]
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/reports", &Method::GET);
  assert_eq!(header_lines(&rendered), ["X-Tenant: acme", "X-Limit: {{X-Limit}}"]);
  assert!(!rendered.contains("session"));
}

#[test]
fn test_json_content_type_preferred() {
  let document = api(
    json!({
      "/pets": {
        "post": {
          "requestBody": {
            "content": {
              "application/xml": {"example": {"xml": true}},
              "application/json": {"example": {"name": "Rex"}}
            }
          }
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/pets", &Method::POST);
  assert_eq!(header_lines(&rendered), ["Content-Type: application/json"]);
  assert!(rendered.ends_with("\n\n{\n  \"name\": \"Rex\"\n}\n"));
}

#[test]
fn test_first_content_type_without_json() {
  let document = api(
    json!({
      "/upload": {
        "post": {
          "requestBody": {
            "content": {
              "text/plain": {"schema": {"type": "string"}},
              "application/xml": {"schema": {"type": "object"}}
            }
          }
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/upload", &Method::POST);
  assert_eq!(header_lines(&rendered), ["Content-Type: application/xml"]);
  assert!(rendered.ends_with("\n\n{}\n"));
}

#[test]
fn test_body_from_synthesized_schema() {
  let document = api(
    json!({
      "/users": {
        "post": {
          "requestBody": {
            "content": {
              "application/json": {"schema": {"$ref": "#/components/schemas/NewUser"}}
            }
          }
        }
      }
    }),
    json!({
      "schemas": {
        "NewUser": {
          "type": "object",
          "properties": {
            "email": {"type": "string", "format": "email"},
            "roles": {"type": "array", "items": {"type": "string", "enum": ["admin", "member"]}}
          }
        }
      }
    }),
  );

  let rendered = render(&document, "/users", &Method::POST);
  let expected = "###\n\nPOST https://api.example.com/users\nContent-Type: application/json\n\n{\n  \"email\": \"user@example.com\",\n  \"roles\": [\n    \"admin\"\n  ]\n}\n";
  assert_eq!(rendered, expected);
}

#[test]
fn test_body_from_named_example() {
  let document = api(
    json!({
      "/users": {
        "post": {
          "requestBody": {
            "content": {
              "application/json": {
                "schema": {"type": "object", "properties": {"name": {"type": "string"}}},
                "examples": {
                  "empty": {"summary": "No value"},
                  "full": {"value": {"name": "Grace"}}
                }
              }
            }
          }
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/users", &Method::POST);
  assert!(rendered.ends_with("\n\n{\n  \"name\": \"Grace\"\n}\n"));
}

#[test]
fn test_body_without_value_is_empty_object() {
  let document = api(
    json!({
      "/blobs": {
        "put": {
          "requestBody": {"content": {"application/octet-stream": {}}}
        }
      }
    }),
    json!({}),
  );

  let rendered = render(&document, "/blobs", &Method::PUT);
  assert_eq!(
    rendered,
    "###\n\nPUT https://api.example.com/blobs\nContent-Type: application/octet-stream\n\n{}\n"
  );
}

#[test]
fn test_request_body_reference() {
  let document = api(
    json!({
      "/notes": {
        "post": {"requestBody": {"$ref": "#/components/requestBodies/Note"}}
      }
    }),
    json!({
      "requestBodies": {
        "Note": {"content": {"application/json": {"schema": {"type": "object", "additionalProperties": true}}}}
      }
    }),
  );

  let rendered = render(&document, "/notes", &Method::POST);
  assert!(rendered.ends_with("\n\n{\n  \"key\": \"value\"\n}\n"));
}

#[test]
fn test_header_order_and_overwrite() {
  let document = api(
    json!({
      "/secure": {
        "post": {
          "security": [{"bearerAuth": []}],
          "parameters": [
            {"name": "Authorization", "in": "header", "example": "overwritten"},
            {"name": "X-Request-Id", "in": "header", "example": "req-1"}
          ],
          "requestBody": {"content": {"application/json": {"example": {}}}}
        }
      }
    }),
    json!({
      "securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}}
    }),
  );

  let rendered = render(&document, "/secure", &Method::POST);
  assert_eq!(
    header_lines(&rendered),
    [
      "Content-Type: application/json",
      "Authorization: Bearer {{token}}",
      "X-Request-Id: req-1",
    ]
  );
}

#[test]
fn test_empty_operation_id_and_summary_are_omitted() {
  let document = api(
    json!({"/ping": {"get": {"operationId": "", "summary": ""}}}),
    json!({}),
  );

  let rendered = render(&document, "/ping", &Method::GET);
  assert_eq!(rendered, "###\n\nGET https://api.example.com/ping\n");
}

#[test]
fn test_build_request_fields() {
  let document = api(
    json!({
      "/pets/{petId}": {
        "patch": {
          "operationId": "updatePet",
          "parameters": [
            {"name": "petId", "in": "path", "required": true, "example": 3},
            {"name": "dryRun", "in": "query", "schema": {"type": "boolean"}}
          ],
          "requestBody": {"content": {"application/json": {"example": {"name": "Rex"}}}}
        }
      }
    }),
    json!({}),
  );
  let registry = OperationRegistry::new(&document);
  let operation = registry.find(&OperationFilter::default()).remove(0);

  let request = RequestRenderer::new(&document).build_request(&operation).unwrap();
  assert_eq!(request.name.as_deref(), Some("updatePet"));
  assert_eq!(request.method, Method::PATCH);
  assert_eq!(request.url, "https://api.example.com/pets/3");
  assert_eq!(request.query, [("dryRun".to_string(), "false".to_string())]);
  assert_eq!(request.body.as_deref(), Some("{\n  \"name\": \"Rex\"\n}"));
}

#[test]
fn test_rendering_is_idempotent() {
  let document = api(
    json!({
      "/orders/{orderId}": {
        "post": {
          "operationId": "amendOrder",
          "parameters": [
            {"name": "orderId", "in": "path", "required": true, "example": "o-1"},
            {"name": "notify", "in": "query", "example": true},
            {"name": "X-Client", "in": "header", "example": "cli"}
          ],
          "requestBody": {"content": {"application/json": {"example": {"items": [1, 2], "note": "rush"}}}}
        }
      }
    }),
    json!({}),
  );

  let first = render(&document, "/orders/{orderId}", &Method::POST);
  let second = render(&document, "/orders/{orderId}", &Method::POST);
  assert_eq!(first, second);
}
