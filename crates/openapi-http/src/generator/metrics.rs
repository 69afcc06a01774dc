use http::Method;
use strum::Display;

use crate::generator::request::HttpRequest;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderStats {
  pub operations_matched: usize,
  pub requests_rendered: usize,
  pub bodies_rendered: usize,
  pub authenticated_requests: usize,
  pub warnings: Vec<RenderWarning>,
}

impl RenderStats {
  pub fn record_matches(&mut self, count: usize) {
    self.operations_matched += count;
  }

  pub fn record_request(&mut self, request: &HttpRequest, authenticated: bool) {
    self.requests_rendered += 1;
    if request.body.is_some() {
      self.bodies_rendered += 1;
    }
    if authenticated {
      self.authenticated_requests += 1;
    }
  }

  pub fn record_warning(&mut self, warning: RenderWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = RenderWarning>) {
    self.warnings.extend(warnings);
  }

  #[must_use]
  pub fn failures(&self) -> usize {
    self.warnings.iter().filter(|w| w.is_failure()).count()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RenderWarning {
  #[strum(to_string = "Failed to render '{method} {path}': {error}")]
  RenderFailed { method: Method, path: String, error: String },
  #[strum(to_string = "Skipped '{method} {path}': method is not rendered")]
  UnsupportedMethod { method: Method, path: String },
}

impl RenderWarning {
  pub fn is_failure(&self) -> bool {
    matches!(self, Self::RenderFailed { .. })
  }
}
