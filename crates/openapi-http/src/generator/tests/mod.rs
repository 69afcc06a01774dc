mod operation_registry;
mod renderer;
mod support;
