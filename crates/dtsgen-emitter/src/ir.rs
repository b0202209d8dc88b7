//! Declaration IR
//!
//! The mapper turns Babel declaration nodes into a tree of [`DeclNode`]s
//! and the [`Printer`](crate::printer::Printer) turns that tree into
//! declaration text. Type positions are already translated to strings by
//! the time they reach the IR.
//!
//! Every node owns the leading comments captured from its source node.
//! Nodes are built bottom-up once per module and never mutated.

use dtsgen_ast::{Comment, Decorator, NodeMeta};

/// A declaration node with its leading comments.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclNode {
    pub comments: Vec<Comment>,
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    // =========================================================================
    // Module
    // =========================================================================
    /// `declare module 'name' { ... }`
    Module { name: String, children: Vec<DeclNode> },

    // =========================================================================
    // Imports
    // =========================================================================
    /// Side-effect import: `import 'source';`
    ImportDeclaration { source: String },

    /// `import d, {a, b as c} from 'source';`. `enclosed` is set when at
    /// least one named specifier is present.
    Import {
        enclosed: bool,
        specifiers: Vec<DeclNode>,
        source: String,
    },

    /// `imported` or `imported as local`
    ImportSpecifier { imported: String, local: String },

    /// `local`
    ImportDefaultSpecifier { local: String },

    /// `* as local`
    ImportNamespaceSpecifier { local: String },

    // =========================================================================
    // Exports
    // =========================================================================
    /// `export * from 'source';`
    ExportAllFrom { source: String },

    /// `export <declaration>`
    ExportNamedDeclaration { declaration: Box<DeclNode> },

    /// `export { a, b as c } from 'source';` or `export { a };`
    Export {
        specifiers: Vec<DeclNode>,
        source: Option<String>,
    },

    /// `exported` or `local as exported`
    ExportSpecifier {
        exported: String,
        local: Option<String>,
    },

    // =========================================================================
    // Variables
    // =========================================================================
    /// `const a: A, b: B`
    VariableDeclaration {
        kind: String,
        declarators: Vec<DeclNode>,
    },

    /// `name: type`
    VariableDeclarator { name: String, ty: String },

    // =========================================================================
    // Functions and methods
    // =========================================================================
    /// `function name<T>(params): type`
    Function(Signature),

    /// Interface member with a function type. Optional ones render as an
    /// arrow-typed property: `name?: (params) => type;`
    InterfaceMethod {
        signature: Signature,
        is_static: bool,
        is_optional: bool,
    },

    /// Call signature: `(params): type;`
    InterfaceCall(Signature),

    /// `static name<T>(params): type;`
    ClassMethod { signature: Signature, is_static: bool },

    /// `constructor(params);`
    ClassConstructor { params: Vec<Param> },

    // =========================================================================
    // Interfaces
    // =========================================================================
    /// `export interface Name<T> extends A, B { ... }`
    Interface(InterfaceDecl),

    /// `static name?: type;`
    InterfaceProperty {
        name: String,
        ty: String,
        is_static: bool,
        is_optional: bool,
    },

    /// `static [name: key]: value;`
    InterfaceIndexer {
        name: String,
        key_type: String,
        value_type: String,
        is_static: bool,
    },

    // =========================================================================
    // Classes
    // =========================================================================
    /// `class Name<T> extends Super<A> implements I { ... }`
    Class(ClassDecl),

    /// `Name<A>` in an implements list
    Implements {
        name: String,
        type_parameters: Vec<String>,
    },

    /// `static name: type;`
    ClassProperty {
        name: String,
        ty: String,
        is_static: bool,
    },
}

/// Shared shape of functions, methods and call signatures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub name: Option<String>,
    pub params: Vec<Param>,
    /// `None` omits the `: type` suffix.
    pub return_type: Option<String>,
    /// Rendered declarations, e.g. `T extends Base = Default`.
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub members: Vec<DeclNode>,
    /// Rendered base references including type arguments.
    pub bases: Vec<String>,
    pub type_parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub super_name: Option<String>,
    pub members: Vec<DeclNode>,
    pub type_parameters: Vec<String>,
    pub super_type_parameters: Vec<String>,
    /// [`DeclKind::Implements`] nodes.
    pub implements: Vec<DeclNode>,
}

/// Entry of a parameter list.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Simple(Parameter),
    Object(ObjectParameter),
}

impl Param {
    /// Whether the source gave this parameter an explicit type.
    pub fn is_typed(&self) -> bool {
        match self {
            Self::Simple(param) => param.ty.is_some(),
            Self::Object(param) => param.ty.is_some(),
        }
    }
}

/// `...name?: type`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<String>,
    pub is_rest: bool,
    pub is_optional: bool,
}

/// Destructured parameter: `{ a, b }: { a: any; b: any; }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectParameter {
    pub properties: Vec<ObjectParameterProperty>,
    /// Explicit annotation on the whole pattern.
    pub ty: Option<String>,
    pub is_optional: bool,
}

/// `key` or `key: { nested }` inside a destructured parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectParameterProperty {
    pub key: String,
    pub value: Option<ObjectParameter>,
    /// Set when the property has a default value.
    pub is_optional: bool,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl DeclNode {
    pub fn new(kind: DeclKind) -> Self {
        Self {
            comments: Vec::new(),
            kind,
        }
    }

    /// Attach the leading comments captured from the source node.
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn module(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::new(DeclKind::Module {
            name: name.into(),
            children,
        })
    }

    pub fn export_all(source: impl Into<String>) -> Self {
        Self::new(DeclKind::ExportAllFrom {
            source: source.into(),
        })
    }

    pub fn export_declaration(declaration: Self) -> Self {
        Self::new(DeclKind::ExportNamedDeclaration {
            declaration: Box::new(declaration),
        })
    }

    pub fn export(specifiers: Vec<Self>, source: Option<String>) -> Self {
        Self::new(DeclKind::Export { specifiers, source })
    }

    pub fn export_specifier(exported: impl Into<String>, local: Option<String>) -> Self {
        Self::new(DeclKind::ExportSpecifier {
            exported: exported.into(),
            local,
        })
    }

    pub fn import_side_effect(source: impl Into<String>) -> Self {
        Self::new(DeclKind::ImportDeclaration {
            source: source.into(),
        })
    }

    pub fn import(enclosed: bool, specifiers: Vec<Self>, source: impl Into<String>) -> Self {
        Self::new(DeclKind::Import {
            enclosed,
            specifiers,
            source: source.into(),
        })
    }

    pub fn import_specifier(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Self::new(DeclKind::ImportSpecifier {
            imported: imported.into(),
            local: local.into(),
        })
    }

    pub fn variable(kind: impl Into<String>, declarators: Vec<Self>) -> Self {
        Self::new(DeclKind::VariableDeclaration {
            kind: kind.into(),
            declarators,
        })
    }

    pub fn declarator(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(DeclKind::VariableDeclarator {
            name: name.into(),
            ty: ty.into(),
        })
    }

    pub fn function(signature: Signature) -> Self {
        Self::new(DeclKind::Function(signature))
    }

    pub fn class_method(signature: Signature, is_static: bool) -> Self {
        Self::new(DeclKind::ClassMethod {
            signature,
            is_static,
        })
    }

    pub fn constructor(params: Vec<Param>) -> Self {
        Self::new(DeclKind::ClassConstructor { params })
    }

    pub fn class_property(name: impl Into<String>, ty: impl Into<String>, is_static: bool) -> Self {
        Self::new(DeclKind::ClassProperty {
            name: name.into(),
            ty: ty.into(),
            is_static,
        })
    }

    pub fn interface_property(
        name: impl Into<String>,
        ty: impl Into<String>,
        is_static: bool,
        is_optional: bool,
    ) -> Self {
        Self::new(DeclKind::InterfaceProperty {
            name: name.into(),
            ty: ty.into(),
            is_static,
            is_optional,
        })
    }

    /// Whether `export` wrapping must not append a statement terminator.
    pub fn prevents_semicolon(&self) -> bool {
        matches!(self.kind, DeclKind::Class(_) | DeclKind::Interface(_))
    }
}

impl Signature {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: Some(name.into()),
            params,
            ..Self::default()
        }
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn with_type_parameters(mut self, type_parameters: Vec<String>) -> Self {
        self.type_parameters = type_parameters;
        self
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Option<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn rest(mut self) -> Self {
        self.is_rest = true;
        self
    }
}

impl From<Parameter> for Param {
    fn from(param: Parameter) -> Self {
        Self::Simple(param)
    }
}

impl From<ObjectParameter> for Param {
    fn from(param: ObjectParameter) -> Self {
        Self::Object(param)
    }
}

/// Leading comments of a source node. Decorable nodes without comments of
/// their own fall back to those of their first decorator.
pub fn capture_comments(meta: &NodeMeta, decorators: &[Decorator]) -> Vec<Comment> {
    if !meta.leading_comments.is_empty() {
        return meta.leading_comments.clone();
    }
    decorators
        .first()
        .map(|decorator| decorator.meta.leading_comments.clone())
        .unwrap_or_default()
}
