//! Batch rendering of the operations selected by an [`OperationFilter`].
//!
//! ```no_run
//! use openapi_http::{
//!   generator::{operation_registry::OperationFilter, orchestrator::Orchestrator},
//!   utils::spec::{SpecLoader, SpecSource},
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let source: SpecSource = "openapi.yaml".parse()?;
//! let document = SpecLoader::open(&source).await?.load()?;
//!
//! let filter = OperationFilter {
//!   tag: Some("pets".to_string()),
//!   ..Default::default()
//! };
//! let output = Orchestrator::new(document, filter).render_requests()?;
//! std::fs::write("pets.http", output.text)?;
//! # Ok(())
//! # }
//! ```

use crate::generator::{
  document::ApiDocument,
  metrics::{RenderStats, RenderWarning},
  operation_registry::{OperationFilter, OperationRegistry},
  renderer::RequestRenderer,
};

/// Raised when a filter selects zero operations. Not a crash: callers report it and exit cleanly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no operations match {filter}")]
pub struct NoMatchingOperations {
  pub filter: OperationFilter,
}

#[derive(Debug, Clone)]
pub struct RenderOutput {
  /// Rendered requests, separated by one blank line.
  pub text: String,
  /// `METHOD path (id)` of every rendered request, in output order.
  pub rendered: Vec<String>,
  pub stats: RenderStats,
}

pub struct Orchestrator {
  document: ApiDocument,
  filter: OperationFilter,
}

impl Orchestrator {
  #[must_use]
  pub fn new(document: ApiDocument, filter: OperationFilter) -> Self {
    Self { document, filter }
  }

  /// Renders every selected operation in path-then-method order.
  ///
  /// A failed operation becomes a [`RenderWarning`] and the rest of the batch still renders.
  pub fn render_requests(&self) -> Result<RenderOutput, NoMatchingOperations> {
    let registry = OperationRegistry::new(&self.document);
    let selected = registry.find(&self.filter);
    if selected.is_empty() {
      return Err(NoMatchingOperations {
        filter: self.filter.clone(),
      });
    }

    let mut stats = RenderStats::default();
    stats.record_matches(selected.len());
    stats.record_warnings(
      registry
        .skipped()
        .iter()
        .filter(|(path, _)| self.reports_skipped(path))
        .map(|(path, method)| RenderWarning::UnsupportedMethod {
          method: method.clone(),
          path: (*path).to_string(),
        }),
    );

    let renderer = RequestRenderer::new(&self.document);
    let security = self.document.security();
    let mut blocks = Vec::with_capacity(selected.len());
    let mut rendered = Vec::with_capacity(selected.len());

    for operation in &selected {
      match renderer.build_request(operation) {
        Ok(request) => {
          let authenticated = security.header_for(operation.path, &operation.method).is_some();
          stats.record_request(&request, authenticated);
          blocks.push(request.to_string());
          rendered.push(operation.to_string());
        }
        Err(e) => stats.record_warning(RenderWarning::RenderFailed {
          method: operation.method.clone(),
          path: operation.path.to_string(),
          error: e.to_string(),
        }),
      }
    }

    Ok(RenderOutput {
      text: blocks.join("\n"),
      rendered,
      stats,
    })
  }

  fn reports_skipped(&self, path: &str) -> bool {
    self.filter.operation_id.is_none() && self.filter.path.as_deref().is_none_or(|p| p == path)
  }
}
