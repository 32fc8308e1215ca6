mod dot;
mod graphviz;
mod markdown;
mod mermaid;

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};

pub use dot::DotRenderer;
pub use graphviz::run_dot;
pub use markdown::MarkdownRenderer;
pub use mermaid::MermaidRenderer;

use crate::catalog::Catalog;
use crate::config::DiagramConfig;
use crate::error::{AppError, AppResult};

/// Turns a catalog into the source text of some diagram language.
pub trait DiagramRenderer {
    fn render(&self, catalog: &Catalog) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Graphviz source, written as is.
    Dot,
    /// The `.er` markdown intermediate format.
    Markdown,
    Mermaid,
    /// The catalog itself, serialized.
    Json,
    /// Rendered by Graphviz; holds the `-T` argument.
    Image(&'static str),
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let format = match extension.as_str() {
            "dot" | "gv" => OutputFormat::Dot,
            "er" => OutputFormat::Markdown,
            "mmd" => OutputFormat::Mermaid,
            "json" => OutputFormat::Json,
            "png" => OutputFormat::Image("png"),
            "svg" => OutputFormat::Image("svg"),
            "pdf" => OutputFormat::Image("pdf"),
            "jpg" | "jpeg" => OutputFormat::Image("jpg"),
            _ => return Err(AppError::UnsupportedFormat(path.display().to_string())),
        };

        Ok(format)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Many,
    Optional,
    One,
}

impl Cardinality {
    pub fn marker(self) -> char {
        match self {
            Cardinality::Many => '*',
            Cardinality::Optional => '?',
            Cardinality::One => '1',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cardinality::Many => "0..N",
            Cardinality::Optional => "{0,1}",
            Cardinality::One => "1",
        }
    }
}

/// One edge of the diagram, drawn from a single foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Table holding the foreign key.
    pub from: &'static str,
    pub column: &'static str,
    /// Referenced table.
    pub to: &'static str,
    pub from_cardinality: Cardinality,
    pub to_cardinality: Cardinality,
}

pub fn relations(catalog: &Catalog) -> Vec<Relation> {
    catalog
        .tables
        .iter()
        .flat_map(|table| {
            table.foreign_keys().map(move |(column, fk)| Relation {
                from: table.name,
                column: column.name,
                to: fk.table,
                from_cardinality: Cardinality::Many,
                to_cardinality: if column.nullable {
                    Cardinality::Optional
                } else {
                    Cardinality::One
                },
            })
        })
        .collect()
}

/// Validates `catalog` and writes it to `config.output` in the format named by
/// the file extension.
pub fn render_er(catalog: &Catalog, config: &DiagramConfig) -> AppResult<()> {
    catalog.validate()?;

    let output = config.output.as_path();
    let format = OutputFormat::from_path(output)?;
    debug!("rendering {} tables to {} as {:?}", catalog.tables.len(), output.display(), format);

    match format {
        OutputFormat::Dot => fs::write(output, DotRenderer.render(catalog))?,
        OutputFormat::Markdown => fs::write(output, MarkdownRenderer.render(catalog))?,
        OutputFormat::Mermaid => fs::write(output, MermaidRenderer.render(catalog))?,
        OutputFormat::Json => fs::write(output, serde_json::to_vec_pretty(catalog)?)?,
        OutputFormat::Image(kind) => {
            run_dot(&config.dot_binary, kind, &DotRenderer.render(catalog), output)?
        }
    }

    // A renderer that exits cleanly without creating the file produced nothing.
    let written = match fs::metadata(output) {
        Ok(metadata) => metadata.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
        Err(err) => return Err(err.into()),
    };
    if written == 0 {
        return Err(AppError::EmptyOutput(output.to_path_buf()));
    }

    info!("wrote {} ({} bytes)", output.display(), written);
    Ok(())
}
