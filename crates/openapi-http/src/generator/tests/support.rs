use http::Method;
use serde_json::{Value, json};

use crate::generator::{
  document::ApiDocument,
  operation_registry::{OperationFilter, OperationRegistry},
  renderer::RequestRenderer,
};

pub(super) fn document(raw: Value) -> ApiDocument {
  ApiDocument::from_value(raw).expect("failed to build test document")
}

/// A minimal document around the given `paths` and `components`.
pub(super) fn api(paths: Value, components: Value) -> ApiDocument {
  document(json!({
    "openapi": "3.0.3",
    "info": { "title": "Test API", "version": "1.0.0" },
    "servers": [{ "url": "https://api.example.com" }],
    "paths": paths,
    "components": components
  }))
}

pub(super) fn render(document: &ApiDocument, path: &str, method: &Method) -> String {
  let registry = OperationRegistry::new(document);
  let filter = OperationFilter {
    path: Some(path.to_string()),
    ..Default::default()
  };
  let operation = registry
    .find(&filter)
    .into_iter()
    .find(|op| op.method == *method)
    .unwrap_or_else(|| panic!("no operation {method} {path}"));

  RequestRenderer::new(document)
    .render(&operation)
    .expect("failed to render request")
}

/// Returns the request line of a rendered block.
pub(super) fn request_line(rendered: &str) -> &str {
  rendered
    .lines()
    .skip_while(|line| line.starts_with('#'))
    .find(|line| !line.is_empty())
    .expect("rendered block has no request line")
}

/// Returns the header lines of a rendered block, in order.
pub(super) fn header_lines(rendered: &str) -> Vec<&str> {
  rendered
    .lines()
    .skip_while(|line| line.starts_with('#'))
    .skip_while(|line| line.is_empty())
    .skip(1)
    .take_while(|line| !line.is_empty())
    .collect()
}
