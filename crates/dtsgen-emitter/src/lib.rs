//! Declaration (.d.ts) emitter for Babel/Flow module ASTs.
//!
//! The pipeline for one module:
//! - `declaration_emitter` maps collected statements to the declaration IR,
//!   applying the member filter and translating type annotations
//! - `printer` renders the IR tree as text
//!
//! [`generate`] runs both for a [`ModuleInput`].

pub mod declaration_emitter;
pub mod error;
pub mod filter;
pub mod ir;
pub mod options;
pub mod printer;
pub mod type_printer;

pub use declaration_emitter::DeclarationEmitter;
pub use error::{EmitError, FilterError};
pub use filter::{DEFAULT_IGNORE_MEMBERS, MemberFilter};
pub use ir::{DeclKind, DeclNode};
pub use options::EmitOptions;
pub use printer::{Printer, PrinterOptions, RenderContext};

use dtsgen_ast::{CollectedModule, Statement};
use tracing::debug;

/// Everything the emitter needs to know about one module.
#[derive(Debug, Clone, Default)]
pub struct ModuleInput<'a> {
    /// `{package}/{path without extension}`
    pub module_id: &'a str,
    /// Package root name.
    pub root: &'a str,
    pub imports: Vec<&'a Statement>,
    pub interfaces: Vec<&'a Statement>,
    pub exports: Vec<&'a Statement>,
}

impl<'a> ModuleInput<'a> {
    pub fn new(module_id: &'a str, root: &'a str, collected: CollectedModule<'a>) -> Self {
        Self {
            module_id,
            root,
            imports: collected.imports,
            interfaces: collected.interfaces,
            exports: collected.exports,
        }
    }
}

/// Generate the declaration document for one module.
///
/// Fails only when a type annotation cannot be translated; in that case no
/// partial output is produced.
pub fn generate(input: &ModuleInput<'_>, options: &EmitOptions) -> Result<String, EmitError> {
    let name = if options.suppress_module_path {
        input.root
    } else {
        input.module_id
    };
    debug!(module = name, "generating declarations");

    let emitter = DeclarationEmitter::new(input.root, options);
    let module = emitter.emit_module(name, &input.imports, &input.interfaces, &input.exports)?;
    Ok(Printer::new(options.printer_options()).print_module(&module))
}
