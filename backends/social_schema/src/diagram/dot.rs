use std::fmt::Write;

use super::{relations, DiagramRenderer};
use crate::catalog::{Catalog, ColumnDef, TableDef};

const HEADER_COLOR: &str = "#C4D7E0";
const TYPE_COLOR: &str = "#555555";

/// Graphviz `graph` source: one HTML-label node per table, one undirected edge
/// per foreign key with cardinalities on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotRenderer;

impl DiagramRenderer for DotRenderer {
    fn render(&self, catalog: &Catalog) -> String {
        let mut out = String::new();
        out.push_str("graph {\n");
        out.push_str("    graph [pad=\"0.5\", nodesep=\"0.5\", ranksep=\"1.2\"];\n");
        out.push_str("    node [shape=plaintext, fontname=\"Helvetica\"];\n");
        out.push_str("    edge [fontname=\"Helvetica\", fontsize=\"10\"];\n");

        for table in &catalog.tables {
            out.push('\n');
            write_table(&mut out, table);
        }

        let relations = relations(catalog);
        if !relations.is_empty() {
            out.push('\n');
        }
        for relation in relations {
            let _ = writeln!(
                out,
                "    \"{}\" -- \"{}\" [taillabel=\"{}\", headlabel=\"{}\", tooltip=\"{}.{}\"];",
                relation.from,
                relation.to,
                relation.from_cardinality.label(),
                relation.to_cardinality.label(),
                relation.from,
                relation.column,
            );
        }

        out.push_str("}\n");
        out
    }
}

fn write_table(out: &mut String, table: &TableDef) {
    let _ = writeln!(out, "    \"{}\" [label=<", table.name);
    out.push_str(
        "        <TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">\n",
    );
    let _ = writeln!(
        out,
        "        <TR><TD COLSPAN=\"2\" BGCOLOR=\"{}\"><B>{}</B></TD></TR>",
        HEADER_COLOR,
        escape(table.name)
    );
    for column in &table.columns {
        let _ = writeln!(
            out,
            "        <TR><TD ALIGN=\"LEFT\">{}</TD><TD ALIGN=\"LEFT\"><FONT COLOR=\"{}\">{}</FONT></TD></TR>",
            column_name(column),
            TYPE_COLOR,
            escape(&column_type(column)),
        );
    }
    out.push_str("        </TABLE>>];\n");
}

// Primary keys are underlined, foreign keys italic.
fn column_name(column: &ColumnDef) -> String {
    let mut name = escape(column.name);
    if column.references.is_some() {
        name = format!("<I>{}</I>", name);
    }
    if column.primary_key {
        name = format!("<U>{}</U>", name);
    }
    name
}

fn column_type(column: &ColumnDef) -> String {
    let mut ty = column.sql_type.to_string();
    if column.unique {
        ty.push_str(" UNIQUE");
    }
    if !column.nullable && !column.primary_key {
        ty.push_str(" NOT NULL");
    }
    ty
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_table_and_foreign_key() {
        let dot = DotRenderer.render(&Catalog::social());

        assert!(dot.starts_with("graph {\n"));
        assert!(dot.ends_with("}\n"));
        for table in ["users", "posts", "media", "comments", "followers"] {
            assert!(dot.contains(&format!("    \"{}\" [label=<", table)), "{table}");
        }
        assert_eq!(dot.matches(" -- ").count(), 6);
        assert!(dot.contains(
            r#""posts" -- "users" [taillabel="0..N", headlabel="{0,1}", tooltip="posts.user_id"];"#
        ));
        assert!(dot.contains(
            r#""followers" -- "users" [taillabel="0..N", headlabel="1", tooltip="followers.user_to_id"];"#
        ));
    }

    #[test]
    fn marks_keys_and_constraints() {
        let dot = DotRenderer.render(&Catalog::social());

        assert!(dot.contains("<U>id</U>"));
        assert!(dot.contains("<U><I>user_from_id</I></U>"));
        assert!(dot.contains("<I>author_id</I>"));
        assert!(dot.contains("VARCHAR(50) UNIQUE NOT NULL"));
        assert!(dot.contains("VARCHAR(100) UNIQUE<"));
    }

    #[test]
    fn escapes_html_in_labels() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
