use indexmap::IndexMap;
use oas3::spec::{Example, MediaType, MediaTypeExamples, ObjectOrReference, Parameter, ParameterIn, RequestBody};
use serde_json::Value;

use crate::generator::{
  document::ApiDocument,
  examples::ExampleSynthesizer,
  operation_registry::OperationRef,
  request::{CONTENT_TYPE_HEADER, HttpRequest, format_parameter_value, format_query_value, placeholder},
};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const EMPTY_BODY: &str = "{}";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("failed to serialize request body for {operation}")]
  BodySerialization {
    operation: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Parameters of one operation grouped by location.
///
/// Path-level parameters come first, then operation-level ones. Cookie parameters are dropped.
#[derive(Debug, Default)]
struct ParameterSet {
  path: Vec<Parameter>,
  query: Vec<Parameter>,
  header: Vec<Parameter>,
}

impl ParameterSet {
  fn collect(document: &ApiDocument, operation: &OperationRef<'_>) -> Self {
    let mut set = Self::default();
    let resolved = operation
      .path_item
      .parameters
      .iter()
      .chain(&operation.operation.parameters)
      .filter_map(|param_ref| param_ref.resolve(document.spec()).ok());

    for param in resolved {
      match param.location {
        ParameterIn::Path => set.path.push(param),
        ParameterIn::Query => set.query.push(param),
        ParameterIn::Header => set.header.push(param),
        ParameterIn::Cookie => {}
      }
    }
    set
  }
}

/// Turns one operation into one `.http` request block.
#[derive(Debug, Clone, Copy)]
pub struct RequestRenderer<'a> {
  document: &'a ApiDocument,
  synthesizer: ExampleSynthesizer<'a>,
}

impl<'a> RequestRenderer<'a> {
  #[must_use]
  pub fn new(document: &'a ApiDocument) -> Self {
    Self {
      document,
      synthesizer: ExampleSynthesizer::new(document.spec()),
    }
  }

  pub fn render(&self, operation: &OperationRef<'_>) -> Result<String, RenderError> {
    Ok(self.build_request(operation)?.to_string())
  }

  pub fn build_request(&self, operation: &OperationRef<'_>) -> Result<HttpRequest, RenderError> {
    let parameters = ParameterSet::collect(self.document, operation);
    let request_body = self.request_body(operation);
    let media_type = request_body.as_ref().and_then(select_media_type);

    let body = media_type
      .map(|(_, media_type)| self.body_text(operation, media_type))
      .transpose()?;

    Ok(
      HttpRequest::builder()
        .maybe_name(operation.operation_id().filter(|id| !id.is_empty()).map(String::from))
        .maybe_summary(operation.operation.summary.clone().filter(|s| !s.is_empty()))
        .method(operation.method.clone())
        .url(format!("{}{}", self.document.base_url(), self.path(operation.path, &parameters.path)))
        .query(self.query(&parameters.query))
        .headers(self.headers(operation, media_type.map(|(content_type, _)| content_type), &parameters.header))
        .maybe_body(body)
        .build(),
    )
  }

  /// Value for a path or query parameter: its example, then a synthesized one.
  fn parameter_value(&self, param: &Parameter) -> Option<Value> {
    param
      .example
      .clone()
      .or_else(|| param.schema.as_ref().and_then(|schema| self.synthesizer.synthesize_ref(schema)))
  }

  fn path(&self, template: &str, parameters: &[Parameter]) -> String {
    let mut path = template.to_string();
    for param in parameters {
      let value = self
        .parameter_value(param)
        .map_or_else(|| placeholder(&param.name), |value| format_parameter_value(&value));
      path = path.replace(&format!("{{{}}}", param.name), &value);
    }
    path
  }

  fn query(&self, parameters: &[Parameter]) -> Vec<(String, String)> {
    parameters
      .iter()
      .map(|param| {
        let value = self
          .parameter_value(param)
          .map_or_else(|| placeholder(&param.name), |value| format_query_value(&value));
        (param.name.clone(), value)
      })
      .collect()
  }

  fn headers(
    &self,
    operation: &OperationRef<'_>,
    content_type: Option<&str>,
    parameters: &[Parameter],
  ) -> IndexMap<String, String> {
    let mut headers = IndexMap::new();

    if let Some(content_type) = content_type {
      headers.insert(CONTENT_TYPE_HEADER.to_string(), content_type.to_string());
    }

    for param in parameters {
      let value = param
        .example
        .as_ref()
        .map_or_else(|| placeholder(&param.name), format_parameter_value);
      headers.insert(param.name.clone(), value);
    }

    if let Some((name, value)) = self.document.security().header_for(operation.path, &operation.method) {
      headers.insert(name, value);
    }

    headers
  }

  fn request_body(&self, operation: &OperationRef<'_>) -> Option<RequestBody> {
    operation
      .operation
      .request_body
      .as_ref()
      .and_then(|body_ref| body_ref.resolve(self.document.spec()).ok())
  }

  fn body_text(&self, operation: &OperationRef<'_>, media_type: &MediaType) -> Result<String, RenderError> {
    let Some(value) = self.body_value(media_type) else {
      return Ok(EMPTY_BODY.to_string());
    };
    serde_json::to_string_pretty(&value).map_err(|source| RenderError::BodySerialization {
      operation: operation.to_string(),
      source,
    })
  }

  /// Explicit example, then the first named example with a value, then a synthesized one.
  fn body_value(&self, media_type: &MediaType) -> Option<Value> {
    let example = match &media_type.examples {
      Some(MediaTypeExamples::Example { example }) => Some(example.clone()),
      Some(MediaTypeExamples::Examples { examples }) => examples
        .values()
        .find_map(|example_ref| self.named_example_value(example_ref)),
      None => None,
    };

    example.or_else(|| {
      media_type
        .schema
        .as_ref()
        .and_then(|schema| self.synthesizer.synthesize_ref(schema))
    })
  }

  fn named_example_value(&self, example_ref: &ObjectOrReference<Example>) -> Option<Value> {
    example_ref.resolve(self.document.spec()).ok()?.value
  }
}

/// Picks `application/json` when declared, otherwise the first content entry.
fn select_media_type(body: &RequestBody) -> Option<(&str, &MediaType)> {
  body
    .content
    .get_key_value(JSON_CONTENT_TYPE)
    .or_else(|| body.content.iter().next())
    .map(|(content_type, media_type)| (content_type.as_str(), media_type))
}
