//! Runtime description of the tables declared in [`crate::schema`].
//!
//! Diesel's `table!` output is type-level only, so the renderer reads this
//! catalog instead. Column names come from the diesel column types.

mod social;

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "length", rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Varchar(u32),
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "INTEGER"),
            ColumnType::Varchar(len) => write!(f, "VARCHAR({})", len),
            ColumnType::Text => write!(f, "TEXT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub references: Option<ForeignKey>,
}

impl ColumnDef {
    /// A nullable, non-unique column.
    pub fn new(name: &'static str, sql_type: ColumnType) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            unique: false,
            primary_key: false,
            references: None,
        }
    }

    /// Primary key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey { table, column });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The foreign key lives on the owning table.
    ManyToOne,
    /// The foreign key lives on the target table.
    OneToMany,
}

/// A navigation attribute between two tables, carried over a single foreign
/// key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub name: &'static str,
    pub target: &'static str,
    pub direction: Direction,
    pub via: &'static str,
    pub back_populates: &'static str,
}

impl Relationship {
    pub fn many_to_one(
        name: &'static str,
        target: &'static str,
        via: &'static str,
        back_populates: &'static str,
    ) -> Self {
        Self {
            name,
            target,
            direction: Direction::ManyToOne,
            via,
            back_populates,
        }
    }

    pub fn one_to_many(
        name: &'static str,
        target: &'static str,
        via: &'static str,
        back_populates: &'static str,
    ) -> Self {
        Self {
            name,
            target,
            direction: Direction::OneToMany,
            via,
            back_populates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub relationships: Vec<Relationship>,
}

impl TableDef {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            columns: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get_relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&ColumnDef, &ForeignKey)> {
        self.columns
            .iter()
            .filter_map(|c| c.references.as_ref().map(|fk| (c, fk)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub tables: Vec<TableDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: TableDef) -> Self {
        self.tables.push(table);
        self
    }

    pub fn get_table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Checks that every table has a primary key, that every foreign key lands
    /// on a primary key column of an existing table, and that every
    /// relationship is backed by such a foreign key on the right side.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for table in &self.tables {
            if !seen.insert(table.name) {
                problems.push(SchemaProblem::DuplicateTable(table.name));
            }

            let mut columns = HashSet::new();
            for column in &table.columns {
                if !columns.insert(column.name) {
                    problems.push(SchemaProblem::DuplicateColumn {
                        table: table.name,
                        column: column.name,
                    });
                }
            }

            if table.primary_key().next().is_none() {
                problems.push(SchemaProblem::MissingPrimaryKey(table.name));
            }

            for (column, fk) in table.foreign_keys() {
                self.check_foreign_key(table, column, fk, &mut problems);
            }

            for relationship in &table.relationships {
                self.check_relationship(table, relationship, &mut problems);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SchemaError { problems })
        }
    }

    fn check_foreign_key(
        &self,
        table: &TableDef,
        column: &ColumnDef,
        fk: &ForeignKey,
        problems: &mut Vec<SchemaProblem>,
    ) {
        let Some(target) = self.get_table(fk.table) else {
            problems.push(SchemaProblem::UnknownTable {
                table: table.name,
                column: column.name,
                target: fk.clone(),
            });
            return;
        };

        match target.get_column(fk.column) {
            None => problems.push(SchemaProblem::UnknownColumn {
                table: table.name,
                column: column.name,
                target: fk.clone(),
            }),
            Some(referenced) if !referenced.primary_key => {
                problems.push(SchemaProblem::NotPrimaryKey {
                    table: table.name,
                    column: column.name,
                    target: fk.clone(),
                })
            }
            Some(referenced) if referenced.sql_type != column.sql_type => {
                problems.push(SchemaProblem::TypeMismatch {
                    table: table.name,
                    column: column.name,
                    target: fk.clone(),
                })
            }
            Some(_) => {}
        }
    }

    fn check_relationship(
        &self,
        table: &TableDef,
        relationship: &Relationship,
        problems: &mut Vec<SchemaProblem>,
    ) {
        let Some(target) = self.get_table(relationship.target) else {
            problems.push(SchemaProblem::UnknownRelationshipTarget {
                table: table.name,
                relationship: relationship.name,
                target: relationship.target,
            });
            return;
        };

        let (fk_side, other_side) = match relationship.direction {
            Direction::ManyToOne => (table, target),
            Direction::OneToMany => (target, table),
        };
        let backed = fk_side
            .get_column(relationship.via)
            .and_then(|c| c.references.as_ref())
            .is_some_and(|fk| fk.table == other_side.name);
        if !backed {
            problems.push(SchemaProblem::UnbackedRelationship {
                table: table.name,
                relationship: relationship.name,
                via: relationship.via,
            });
        }

        let mirrored = target
            .get_relationship(relationship.back_populates)
            .is_some_and(|back| {
                back.target == table.name
                    && back.via == relationship.via
                    && back.direction != relationship.direction
            });
        if !mirrored {
            problems.push(SchemaProblem::MissingBackPopulates {
                table: table.name,
                relationship: relationship.name,
                back_populates: relationship.back_populates,
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaProblem {
    #[error("table `{0}` is declared more than once")]
    DuplicateTable(&'static str),

    #[error("column `{table}.{column}` is declared more than once")]
    DuplicateColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("table `{0}` has no primary key")]
    MissingPrimaryKey(&'static str),

    #[error("`{table}.{column}` references unknown table `{target}`")]
    UnknownTable {
        table: &'static str,
        column: &'static str,
        target: ForeignKey,
    },

    #[error("`{table}.{column}` references unknown column `{target}`")]
    UnknownColumn {
        table: &'static str,
        column: &'static str,
        target: ForeignKey,
    },

    #[error("`{table}.{column}` references `{target}`, which is not a primary key")]
    NotPrimaryKey {
        table: &'static str,
        column: &'static str,
        target: ForeignKey,
    },

    #[error("`{table}.{column}` does not have the type of `{target}`")]
    TypeMismatch {
        table: &'static str,
        column: &'static str,
        target: ForeignKey,
    },

    #[error("relationship `{table}.{relationship}` targets unknown table `{target}`")]
    UnknownRelationshipTarget {
        table: &'static str,
        relationship: &'static str,
        target: &'static str,
    },

    #[error("relationship `{table}.{relationship}` is not backed by a foreign key on `{via}`")]
    UnbackedRelationship {
        table: &'static str,
        relationship: &'static str,
        via: &'static str,
    },

    #[error("relationship `{table}.{relationship}` has no matching `{back_populates}` on its target")]
    MissingBackPopulates {
        table: &'static str,
        relationship: &'static str,
        back_populates: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid schema: {}", join_problems(.problems))]
pub struct SchemaError {
    pub problems: Vec<SchemaProblem>,
}

fn join_problems(problems: &[SchemaProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
