use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{
    document::ApiDocument,
    operation_registry::{OperationFilter, OperationRegistry},
  },
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::{SpecLoader, SpecSource},
};

const MISSING_ID: &str = "(no id)";
const MISSING_SUMMARY: &str = "(no summary)";

pub async fn list_operations(input: &SpecSource, tag: Option<String>, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.load()?;
  if OperationRegistry::new(&document).is_empty() {
    println!("No operations defined in '{}'", document.title());
    return Ok(());
  }

  let filter = OperationFilter {
    tag,
    ..Default::default()
  };
  println!("{}", operations_table(&document, &filter, colors, term_width()));
  Ok(())
}

fn operations_table(document: &ApiDocument, filter: &OperationFilter, colors: &Colors, width: u16) -> Table {
  let registry = OperationRegistry::new(document);

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(width);

  let mut row = Row::new();
  for header in ["METHOD", "PATH", "OPERATION ID", "SUMMARY"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for operation in registry.find(filter) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation.method.as_str())
        .fg(IntoComfyColor::into(colors.method(&operation.method)))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(operation.path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(operation.operation_id().unwrap_or(MISSING_ID)).fg(IntoComfyColor::into(colors.value())));
    row.add_cell(
      Cell::new(
        operation
          .operation
          .summary
          .as_deref()
          .filter(|s| !s.is_empty())
          .unwrap_or(MISSING_SUMMARY),
      )
      .fg(IntoComfyColor::into(colors.info())),
    );
    table.add_row(row);
  }

  table
}
