use std::fmt::Write;

use super::{relations, Cardinality, DiagramRenderer};
use crate::catalog::{Catalog, ColumnDef};

/// Mermaid `erDiagram` source.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer;

impl DiagramRenderer for MermaidRenderer {
    fn render(&self, catalog: &Catalog) -> String {
        let mut out = String::from("erDiagram\n");

        for table in &catalog.tables {
            let _ = writeln!(out, "    {} {{", table.name);
            for column in &table.columns {
                let _ = write!(out, "        {} {}", column.sql_type, column.name);
                let keys = keys(column);
                if !keys.is_empty() {
                    let _ = write!(out, " {}", keys.join(", "));
                }
                out.push('\n');
            }
            out.push_str("    }\n");
        }

        // Referenced table on the left, so the markers read "one user has many posts".
        for relation in relations(catalog) {
            let left = match relation.to_cardinality {
                Cardinality::One => "||",
                Cardinality::Optional => "|o",
                Cardinality::Many => "}o",
            };
            let right = match relation.from_cardinality {
                Cardinality::One => "||",
                Cardinality::Optional => "o|",
                Cardinality::Many => "o{",
            };
            let _ = writeln!(
                out,
                "    {} {}--{} {} : \"{}\"",
                relation.to, left, right, relation.from, relation.column
            );
        }

        out
    }
}

fn keys(column: &ColumnDef) -> Vec<&'static str> {
    let mut keys = Vec::new();
    if column.primary_key {
        keys.push("PK");
    }
    if column.references.is_some() {
        keys.push("FK");
    }
    if column.unique {
        keys.push("UK");
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_entities_and_relationships() {
        let mmd = MermaidRenderer.render(&Catalog::social());

        assert!(mmd.starts_with("erDiagram\n    followers {\n"));
        assert!(mmd.contains("        INTEGER user_from_id PK, FK\n"));
        assert!(mmd.contains("        VARCHAR(50) username UK\n"));
        assert!(mmd.contains("        VARCHAR(250) url\n"));
        assert!(mmd.contains("    users |o--o{ posts : \"user_id\"\n"));
        assert!(mmd.contains("    users ||--o{ followers : \"user_from_id\"\n"));
        assert!(mmd.contains("    posts |o--o{ media : \"post_id\"\n"));
    }
}
