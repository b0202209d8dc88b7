//! Sorting a program's statements into the lists the emitter consumes.
//!
//! A module contributes three ordered lists: imports, free-standing
//! interfaces, and exports. Exports are the outermost `export` statements
//! and top-level classes; anything nested inside one of those is emitted
//! through its parent and never listed on its own.

use thiserror::Error;
use tracing::trace;

use crate::decl::{Program, Statement};

/// Traversal bookkeeping went out of balance. This is a bug in whoever
/// drives the collector, never a property of the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectError {
    #[error("scope stack out of balance: expected to leave {expected}, found {found}")]
    StructuralImbalance { expected: String, found: String },
    #[error("scope stack out of balance: left {found} without entering it")]
    EmptyScopeStack { found: String },
}

/// The per-module statement lists, borrowed from the program.
#[derive(Debug, Default)]
pub struct CollectedModule<'a> {
    pub imports: Vec<&'a Statement>,
    pub interfaces: Vec<&'a Statement>,
    pub exports: Vec<&'a Statement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bucket {
    Import,
    Interface,
    Export,
}

/// Where a statement goes, given whether it sits inside an export or class.
fn bucket(statement: &Statement, nested: bool) -> Option<Bucket> {
    match statement {
        Statement::Import(_) => Some(Bucket::Import),
        Statement::ExportAll(_) => Some(Bucket::Export),
        Statement::Interface(_) if !nested => Some(Bucket::Interface),
        Statement::ExportNamed(_) | Statement::ExportDefault(_) | Statement::Class(_)
            if !nested =>
        {
            Some(Bucket::Export)
        }
        _ => None,
    }
}

/// Statements that hide their nested declarations from the lists.
fn opens_scope(statement: &Statement) -> bool {
    matches!(
        statement,
        Statement::ExportNamed(_) | Statement::ExportDefault(_) | Statement::Class(_)
    )
}

fn describe(statement: &Statement) -> String {
    let meta = statement.meta();
    format!("{}@{}..{}", statement.kind(), meta.start, meta.end)
}

impl<'a> CollectedModule<'a> {
    fn push(&mut self, bucket: Bucket, statement: &'a Statement) {
        match bucket {
            Bucket::Import => self.imports.push(statement),
            Bucket::Interface => self.interfaces.push(statement),
            Bucket::Export => self.exports.push(statement),
        }
    }
}

/// Collect a whole program.
pub fn collect_module(program: &Program) -> CollectedModule<'_> {
    let mut module = CollectedModule::default();
    for statement in &program.body {
        collect_statement(statement, false, &mut module);
    }
    module
}

fn collect_statement<'a>(statement: &'a Statement, nested: bool, module: &mut CollectedModule<'a>) {
    if let Some(bucket) = bucket(statement, nested) {
        trace!(kind = statement.kind(), ?bucket, "collected statement");
        module.push(bucket, statement);
    }
    let nested = nested || opens_scope(statement);
    for child in statement.nested() {
        collect_statement(child, nested, module);
    }
}

/// Streaming form of [`collect_module`] for callers that drive their own
/// traversal. Every `enter` of an export or class must be matched by an
/// `exit` of the same node, innermost first.
#[derive(Debug, Default)]
pub struct ScopeCollector<'a> {
    module: CollectedModule<'a>,
    scopes: Vec<&'a Statement>,
}

impl<'a> ScopeCollector<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter(&mut self, statement: &'a Statement) {
        if let Some(bucket) = bucket(statement, !self.scopes.is_empty()) {
            self.module.push(bucket, statement);
        }
        if opens_scope(statement) {
            self.scopes.push(statement);
        }
    }

    pub fn exit(&mut self, statement: &'a Statement) -> Result<(), CollectError> {
        if !opens_scope(statement) {
            return Ok(());
        }
        match self.scopes.pop() {
            Some(open) if std::ptr::eq(open, statement) => Ok(()),
            Some(open) => Err(CollectError::StructuralImbalance {
                expected: describe(open),
                found: describe(statement),
            }),
            None => Err(CollectError::EmptyScopeStack {
                found: describe(statement),
            }),
        }
    }

    /// Close the collector. Fails if any scope is still open.
    pub fn finish(self) -> Result<CollectedModule<'a>, CollectError> {
        match self.scopes.last() {
            Some(open) => Err(CollectError::StructuralImbalance {
                expected: describe(open),
                found: "end of module".to_string(),
            }),
            None => Ok(self.module),
        }
    }
}
