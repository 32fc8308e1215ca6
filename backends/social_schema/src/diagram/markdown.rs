use std::fmt::Write;

use super::{relations, DiagramRenderer};
use crate::catalog::Catalog;

/// The `.er` markdown format: `[table]` blocks with `*`-prefixed primary keys,
/// followed by `left card--card right` relation lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl DiagramRenderer for MarkdownRenderer {
    fn render(&self, catalog: &Catalog) -> String {
        let mut out = String::new();

        for table in &catalog.tables {
            let _ = writeln!(out, "[{}]", table.name);
            for column in &table.columns {
                let _ = writeln!(
                    out,
                    "    {}{} {{label:\"{}\"}}",
                    if column.primary_key { "*" } else { "" },
                    column.name,
                    column.sql_type,
                );
            }
            out.push('\n');
        }

        for relation in relations(catalog) {
            let _ = writeln!(
                out,
                "{} {}--{} {}",
                relation.from,
                relation.from_cardinality.marker(),
                relation.to_cardinality.marker(),
                relation.to,
            );
        }

        out
    }
}
