//! Declaration node model for the dtsgen declaration emitter.
//!
//! This crate reads the JSON AST produced by Babel with the Flow plugin and
//! exposes the subset of it a declaration emitter needs:
//! - Shared node pieces (`NodeMeta`, `Comment`, `Identifier`, `StringLiteral`)
//! - Flow type annotations (`FlowType`, `ObjectType`, type parameters)
//! - Statements, patterns and class members (`Statement`, `Pattern`, `ClassMember`)
//! - Per-module statement collection (`collect_module`, `ScopeCollector`)
//!
//! Node kinds outside the modelled set deserialize to an `Unsupported`
//! variant carrying the Babel type name instead of failing.

// Spans, comments, identifiers, literals
pub mod node;
pub use node::{Comment, CommentKind, Decorator, Identifier, NodeMeta, RawExtra, StringLiteral};

// Flow type annotations
pub mod types;
pub use types::{
    FlowType, FunctionType, FunctionTypeParam, GenericType, NumberLiteralType, ObjectType,
    ObjectTypeCallProperty, ObjectTypeIndexer, ObjectTypeMember, ObjectTypeProperty,
    TypeAnnotation, TypeName, TypeParameter, TypeParameterDeclaration, TypeParameterInstantiation,
};

// Statements and their parts
pub mod decl;
pub use decl::{
    AssignmentPattern, ClassBody, ClassDeclaration, ClassImplements, ClassMember, ClassMethod,
    ClassProperty, ExportAllDeclaration, ExportDefaultDeclaration, ExportNamedDeclaration,
    ExportSpecifier, ExportSpecifierNode, Expression, FunctionDeclaration, ImportDeclaration,
    ImportDefaultSpecifier, ImportSpecifier, ImportSpecifierNode, InterfaceDeclaration,
    InterfaceExtends, MethodKind, ObjectPattern, ObjectPatternMember, ObjectPatternProperty,
    Pattern, Program, PropertyKey, RestElement, SourceFile, Statement, UnsupportedNode,
    VariableDeclaration, VariableDeclarator, parse_program,
};

// Module statement collection
pub mod visit;
pub use visit::{CollectError, CollectedModule, ScopeCollector, collect_module};
