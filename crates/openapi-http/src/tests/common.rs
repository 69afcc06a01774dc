use crate::{
  generator::{
    document::ApiDocument,
    operation_registry::OperationFilter,
    orchestrator::{Orchestrator, RenderOutput},
  },
  utils::spec::{SpecFormat, SpecLoader},
};

pub(crate) const PETSTORE_JSON: &str = include_str!("../../fixtures/petstore.json");
pub(crate) const PETSTORE_HTTP: &str = include_str!("../../fixtures/petstore.http");
pub(crate) const SECURED_API_YAML: &str = include_str!("../../fixtures/secured_api.yaml");
pub(crate) const SECURED_API_HTTP: &str = include_str!("../../fixtures/secured_api.http");

pub(crate) fn load_fixture(content: &str, format: SpecFormat) -> ApiDocument {
  SpecLoader::from_bytes(content, format)
    .load()
    .expect("fixture should load and validate")
}

pub(crate) fn render_fixture(content: &str, format: SpecFormat, filter: OperationFilter) -> RenderOutput {
  Orchestrator::new(load_fixture(content, format), filter)
    .render_requests()
    .expect("filter should match at least one operation")
}

pub(crate) fn operation_id(id: &str) -> OperationFilter {
  OperationFilter {
    operation_id: Some(id.to_string()),
    ..Default::default()
  }
}
