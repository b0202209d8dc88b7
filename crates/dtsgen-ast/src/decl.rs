//! Statement-level nodes: imports, exports, variables, functions, classes
//! and interfaces, plus the parameter patterns and class members they own.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::node::{Decorator, Identifier, NodeMeta, StringLiteral, node_kind, nullable, payload};
use crate::types::{
    ObjectType, TypeAnnotation, TypeName, TypeParameterDeclaration, TypeParameterInstantiation,
};

/// Tagged-dispatch `Deserialize` for enums whose unknown tags become
/// `Unsupported(kind)`.
macro_rules! tagged_enum {
    ($ty:ident { $($tag:literal => $variant:ident),+ $(,)? }) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Value::deserialize(deserializer)?;
                let kind = node_kind(&value)?;
                Ok(match kind.as_str() {
                    $($tag => Self::$variant(payload(value)?),)+
                    _ => Self::Unsupported(kind),
                })
            }
        }
    };
}

// =========================================================================
// Statements
// =========================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Import(ImportDeclaration),
    ExportAll(ExportAllDeclaration),
    ExportNamed(ExportNamedDeclaration),
    ExportDefault(ExportDefaultDeclaration),
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    /// Any statement kind not modelled above, with its span and comments.
    Unsupported(UnsupportedNode),
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = node_kind(&value)?;
        Ok(match kind.as_str() {
            "ImportDeclaration" => Self::Import(payload(value)?),
            "ExportAllDeclaration" => Self::ExportAll(payload(value)?),
            "ExportNamedDeclaration" => Self::ExportNamed(payload(value)?),
            "ExportDefaultDeclaration" => Self::ExportDefault(payload(value)?),
            "VariableDeclaration" => Self::Variable(payload(value)?),
            "FunctionDeclaration" => Self::Function(payload(value)?),
            "ClassDeclaration" => Self::Class(payload(value)?),
            "InterfaceDeclaration" => Self::Interface(payload(value)?),
            _ => Self::Unsupported(UnsupportedNode {
                meta: payload(value)?,
                kind,
            }),
        })
    }
}

impl Statement {
    /// The Babel node type this statement was read from.
    pub fn kind(&self) -> &str {
        match self {
            Self::Import(_) => "ImportDeclaration",
            Self::ExportAll(_) => "ExportAllDeclaration",
            Self::ExportNamed(_) => "ExportNamedDeclaration",
            Self::ExportDefault(_) => "ExportDefaultDeclaration",
            Self::Variable(_) => "VariableDeclaration",
            Self::Function(_) => "FunctionDeclaration",
            Self::Class(_) => "ClassDeclaration",
            Self::Interface(_) => "InterfaceDeclaration",
            Self::Unsupported(node) => &node.kind,
        }
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            Self::Import(node) => &node.meta,
            Self::ExportAll(node) => &node.meta,
            Self::ExportNamed(node) => &node.meta,
            Self::ExportDefault(node) => &node.meta,
            Self::Variable(node) => &node.meta,
            Self::Function(node) => &node.meta,
            Self::Class(node) => &node.meta,
            Self::Interface(node) => &node.meta,
            Self::Unsupported(node) => &node.meta,
        }
    }

    /// Statements directly nested in this one, in source order.
    pub fn nested(&self) -> Vec<&Statement> {
        match self {
            Self::ExportNamed(node) => node.declaration.iter().map(Box::as_ref).collect(),
            Self::ExportDefault(node) => node.declaration.iter().map(Box::as_ref).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnsupportedNode {
    pub kind: String,
    pub meta: NodeMeta,
}

/// `import ... from 'source';`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub specifiers: Vec<ImportSpecifierNode>,
    pub source: StringLiteral,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImportSpecifierNode {
    /// `{ imported as local }`
    Named(ImportSpecifier),
    /// `local`
    Default(ImportDefaultSpecifier),
    /// `* as local`
    Namespace(ImportDefaultSpecifier),
    Unsupported(String),
}

tagged_enum!(ImportSpecifierNode {
    "ImportSpecifier" => Named,
    "ImportDefaultSpecifier" => Default,
    "ImportNamespaceSpecifier" => Namespace,
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ImportSpecifier {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub imported: Identifier,
    pub local: Identifier,
}

/// Shared shape of default and namespace specifiers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ImportDefaultSpecifier {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub local: Identifier,
}

/// `export * from 'source';`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExportAllDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub source: StringLiteral,
}

/// `export <declaration>`, `export { a } from 'source'`, or `export { a }`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExportNamedDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub declaration: Option<Box<Statement>>,
    #[serde(default, deserialize_with = "nullable")]
    pub specifiers: Vec<ExportSpecifierNode>,
    #[serde(default)]
    pub source: Option<StringLiteral>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExportSpecifierNode {
    Named(ExportSpecifier),
    Unsupported(String),
}

tagged_enum!(ExportSpecifierNode {
    "ExportSpecifier" => Named,
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExportSpecifier {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub local: Identifier,
    pub exported: Identifier,
}

/// `export default ...`. The declaration may be any expression, which
/// reads as [`Statement::Unsupported`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ExportDefaultDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub declaration: Option<Box<Statement>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct VariableDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    /// `var`, `let` or `const`.
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct VariableDeclarator {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: Pattern,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default, deserialize_with = "nullable")]
    pub params: Vec<Pattern>,
    #[serde(default)]
    pub return_type: Option<TypeAnnotation>,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterDeclaration>,
    #[serde(default, deserialize_with = "nullable")]
    pub decorators: Vec<Decorator>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default)]
    pub id: Option<Identifier>,
    #[serde(default)]
    pub super_class: Option<Expression>,
    #[serde(default)]
    pub super_type_parameters: Option<TypeParameterInstantiation>,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterDeclaration>,
    #[serde(default, deserialize_with = "nullable")]
    pub implements: Vec<ClassImplements>,
    pub body: ClassBody,
    #[serde(default, deserialize_with = "nullable")]
    pub decorators: Vec<Decorator>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClassBody {
    #[serde(default, deserialize_with = "nullable")]
    pub body: Vec<ClassMember>,
}

/// `implements Name<Args>`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassImplements {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: Identifier,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterInstantiation>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDeclaration {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: Identifier,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterDeclaration>,
    #[serde(default, deserialize_with = "nullable")]
    pub extends: Vec<InterfaceExtends>,
    pub body: ObjectType,
}

/// `extends Base<Args>` on an interface.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceExtends {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub id: TypeName,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterInstantiation>,
}

// =========================================================================
// Patterns
// =========================================================================

/// Binding pattern in a parameter list or variable declarator.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    /// `left = default`
    Assignment(AssignmentPattern),
    /// `...argument`
    Rest(RestElement),
    Object(ObjectPattern),
    Unsupported(String),
}

tagged_enum!(Pattern {
    "Identifier" => Identifier,
    "AssignmentPattern" => Assignment,
    "RestElement" => Rest,
    "ObjectPattern" => Object,
});

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AssignmentPattern {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub left: Box<Pattern>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestElement {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub argument: Box<Pattern>,
    /// Babel places the annotation of `...rest: T[]` here rather than on
    /// the argument.
    #[serde(default)]
    pub type_annotation: Option<TypeAnnotation>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPattern {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub properties: Vec<ObjectPatternMember>,
    #[serde(default)]
    pub type_annotation: Option<TypeAnnotation>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectPatternMember {
    /// `key` or `key: value`
    Property(ObjectPatternProperty),
    /// `...rest`
    Rest(RestElement),
    Unsupported(String),
}

tagged_enum!(ObjectPatternMember {
    "ObjectProperty" => Property,
    "RestElement" => Rest,
});

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObjectPatternProperty {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub key: PropertyKey,
    pub value: Pattern,
    #[serde(default, deserialize_with = "nullable")]
    pub computed: bool,
}

// =========================================================================
// Class members
// =========================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    Method(ClassMethod),
    Property(ClassProperty),
    Unsupported(String),
}

tagged_enum!(ClassMember {
    "ClassMethod" => Method,
    "ClassProperty" => Property,
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    #[default]
    Method,
    Get,
    Set,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMethod {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub key: PropertyKey,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default, deserialize_with = "nullable")]
    pub computed: bool,
    #[serde(rename = "static", default, deserialize_with = "nullable")]
    pub is_static: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub params: Vec<Pattern>,
    #[serde(default)]
    pub return_type: Option<TypeAnnotation>,
    #[serde(default)]
    pub type_parameters: Option<TypeParameterDeclaration>,
    #[serde(default, deserialize_with = "nullable")]
    pub decorators: Vec<Decorator>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProperty {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub key: PropertyKey,
    #[serde(default)]
    pub type_annotation: Option<TypeAnnotation>,
    #[serde(rename = "static", default, deserialize_with = "nullable")]
    pub is_static: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub computed: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub decorators: Vec<Decorator>,
}

/// Name of a class member, object-type property or destructured property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    Unsupported(String),
}

tagged_enum!(PropertyKey {
    "Identifier" => Identifier,
    "StringLiteral" => StringLiteral,
});

impl PropertyKey {
    /// The name as the exclusion filter sees it: identifier name or
    /// string value.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Identifier(id) => Some(&id.name),
            Self::StringLiteral(lit) => Some(&lit.value),
            Self::Unsupported(_) => None,
        }
    }
}

/// Expression positions the emitter reads (superclass references).
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Unsupported(String),
}

tagged_enum!(Expression {
    "Identifier" => Identifier,
});

// =========================================================================
// Program
// =========================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Program {
    #[serde(default, deserialize_with = "nullable")]
    pub body: Vec<Statement>,
}

/// Root of a Babel AST dump: either a `File` wrapping a program or a bare
/// `Program`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SourceFile {
    File { program: Program },
    Program(Program),
}

impl SourceFile {
    pub fn into_program(self) -> Program {
        match self {
            Self::File { program } | Self::Program(program) => program,
        }
    }
}

/// Parse a Babel AST JSON document into its program.
pub fn parse_program(json: &str) -> serde_json::Result<Program> {
    serde_json::from_str::<SourceFile>(json).map(SourceFile::into_program)
}
