pub mod document;
pub(crate) mod examples;
pub mod metrics;
pub mod operation_registry;
pub mod orchestrator;
pub mod renderer;
pub mod request;
pub mod security;

#[cfg(test)]
mod tests;
