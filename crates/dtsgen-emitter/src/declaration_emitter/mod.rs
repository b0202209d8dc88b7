//! Declaration Emitter
//!
//! Maps a module's collected Babel statements to the declaration IR.
//!
//! ```javascript
//! // input.js
//! import { Logger } from './logging';
//! export class Appender {
//!     constructor(level) { this._level = level; }
//!     append(logger: Logger): void { ... }
//! }
//! export const version = '1.0';
//! ```
//!
//! Generates (package root `pkg`):
//!
//! ```typescript
//! declare module 'pkg/input' {
//!   import {Logger} from 'pkg/logging';
//!   export class Appender {
//!     constructor(level: any);
//!     append(logger: Logger): void;
//!   }
//!   export const version: any;
//! }
//! ```
//!
//! Every builder returns `Ok(None)` to omit its node. Omission is how the
//! member filter, unsupported input and empty containers all take effect;
//! only an untranslatable type annotation is an error.

use dtsgen_ast::{
    ClassDeclaration, ClassMember, ClassMethod, ClassProperty, ExportNamedDeclaration,
    ExportSpecifierNode, Expression, FlowType, FunctionDeclaration, FunctionType, ImportDeclaration,
    ImportSpecifierNode, InterfaceDeclaration, MethodKind, ObjectPattern, ObjectPatternMember,
    ObjectTypeCallProperty, ObjectTypeIndexer, ObjectTypeMember, ObjectTypeProperty, Pattern,
    PropertyKey, Statement, VariableDeclaration, VariableDeclarator,
};
use tracing::{debug, warn};

use crate::error::EmitError;
use crate::ir::{
    ClassDecl, DeclKind, DeclNode, InterfaceDecl, ObjectParameter, ObjectParameterProperty, Param,
    Parameter, Signature, capture_comments,
};
use crate::options::EmitOptions;
use crate::type_printer::{
    function_type_param_name, generics, print_annotation, print_annotation_or_any,
    print_type, print_type_arguments, print_type_name, print_type_parameters, property_key,
};

type Built<T> = Result<Option<T>, EmitError>;

pub struct DeclarationEmitter<'a> {
    /// Package root name substituted for a leading `.` in `./` sources.
    root: &'a str,
    options: &'a EmitOptions,
}

impl<'a> DeclarationEmitter<'a> {
    pub fn new(root: &'a str, options: &'a EmitOptions) -> Self {
        Self { root, options }
    }

    /// Build the module node from the collected statement lists, imports
    /// first, then free-standing interfaces, then exports.
    pub fn emit_module(
        &self,
        name: &str,
        imports: &[&Statement],
        interfaces: &[&Statement],
        exports: &[&Statement],
    ) -> Result<DeclNode, EmitError> {
        let mut children = Vec::new();
        for statement in imports.iter().chain(interfaces).chain(exports) {
            if let Some(node) = self.statement(statement)? {
                children.push(node);
            }
        }
        Ok(DeclNode::module(name, children))
    }

    pub fn statement(&self, statement: &Statement) -> Built<DeclNode> {
        match statement {
            Statement::Import(import) => self.import(import),
            Statement::ExportAll(export) => Ok(Some(
                DeclNode::export_all(self.rewrite_source(&export.source.value))
                    .with_comments(export.meta.leading_comments.clone()),
            )),
            Statement::ExportNamed(export) => self.export_named(export),
            Statement::Variable(var) => self.variable(var),
            Statement::Function(func) => self.function(func),
            Statement::Class(class) => self.class(class),
            Statement::Interface(iface) => self.interface(iface),
            Statement::ExportDefault(_) | Statement::Unsupported(_) => {
                warn!(kind = statement.kind(), "declaration kind not supported, omitted");
                Ok(None)
            }
        }
    }

    /// `./x` becomes `{root}/x`; every other source passes through.
    pub fn rewrite_source(&self, source: &str) -> String {
        match source.strip_prefix('.') {
            Some(rest) if rest.starts_with('/') => format!("{}{rest}", self.root),
            _ => source.to_string(),
        }
    }

    fn excluded(&self, name: &str) -> bool {
        let excluded = self.options.filter().excludes(name);
        if excluded {
            debug!(name, "member excluded by filter");
        }
        excluded
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    fn import(&self, import: &ImportDeclaration) -> Built<DeclNode> {
        let source = self.rewrite_source(&import.source.value);
        let comments = import.meta.leading_comments.clone();

        let mut named = Vec::new();
        let mut bare = Vec::new();
        for spec in &import.specifiers {
            match spec {
                ImportSpecifierNode::Named(spec) => named.push(
                    DeclNode::import_specifier(&spec.imported.name, &spec.local.name)
                        .with_comments(spec.meta.leading_comments.clone()),
                ),
                ImportSpecifierNode::Default(spec) => bare.push(
                    DeclNode::new(DeclKind::ImportDefaultSpecifier {
                        local: spec.local.name.clone(),
                    })
                    .with_comments(spec.meta.leading_comments.clone()),
                ),
                ImportSpecifierNode::Namespace(spec) => bare.push(
                    DeclNode::new(DeclKind::ImportNamespaceSpecifier {
                        local: spec.local.name.clone(),
                    })
                    .with_comments(spec.meta.leading_comments.clone()),
                ),
                ImportSpecifierNode::Unsupported(kind) => {
                    warn!(kind = kind.as_str(), "import specifier not supported, omitted");
                }
            }
        }

        let node = if !named.is_empty() {
            bare.extend(named);
            DeclNode::import(true, bare, source)
        } else if !bare.is_empty() {
            DeclNode::import(false, bare, source)
        } else {
            DeclNode::import_side_effect(source)
        };
        Ok(Some(node.with_comments(comments)))
    }

    fn export_named(&self, export: &ExportNamedDeclaration) -> Built<DeclNode> {
        let comments = export.meta.leading_comments.clone();

        if let Some(declaration) = &export.declaration {
            // export class Foo {}, export const bar, export function baz() {}
            return Ok(self
                .statement(declaration)?
                .map(|decl| DeclNode::export_declaration(decl).with_comments(comments)));
        }

        // export { foo, bar as baz } [from 'bar'];
        let specifiers: Vec<DeclNode> = export
            .specifiers
            .iter()
            .filter_map(|spec| self.export_specifier(spec))
            .collect();
        if specifiers.is_empty() {
            debug!("export without remaining specifiers omitted");
            return Ok(None);
        }
        let source = export
            .source
            .as_ref()
            .map(|source| self.rewrite_source(&source.value));
        Ok(Some(
            DeclNode::export(specifiers, source).with_comments(comments),
        ))
    }

    fn export_specifier(&self, spec: &ExportSpecifierNode) -> Option<DeclNode> {
        let spec = match spec {
            ExportSpecifierNode::Named(spec) => spec,
            ExportSpecifierNode::Unsupported(kind) => {
                warn!(kind = kind.as_str(), "export specifier not supported, omitted");
                return None;
            }
        };
        let exported = &spec.exported.name;
        let local = &spec.local.name;
        if self.excluded(exported) || self.excluded(local) {
            return None;
        }
        Some(
            DeclNode::export_specifier(exported, Some(local.clone()))
                .with_comments(spec.meta.leading_comments.clone()),
        )
    }

    // =========================================================================
    // Variables and functions
    // =========================================================================

    fn variable(&self, var: &VariableDeclaration) -> Built<DeclNode> {
        let mut declarators = Vec::new();
        for declarator in &var.declarations {
            if let Some(node) = self.declarator(declarator)? {
                declarators.push(node);
            }
        }
        if declarators.is_empty() {
            debug!(kind = var.kind.as_str(), "variable statement without declarators omitted");
            return Ok(None);
        }
        Ok(Some(
            DeclNode::variable(&var.kind, declarators)
                .with_comments(var.meta.leading_comments.clone()),
        ))
    }

    fn declarator(&self, declarator: &VariableDeclarator) -> Built<DeclNode> {
        let Pattern::Identifier(id) = &declarator.id else {
            warn!("destructuring variable declarator not supported, omitted");
            return Ok(None);
        };
        if self.excluded(&id.name) {
            return Ok(None);
        }
        let ty = print_annotation_or_any(id.type_annotation.as_ref())?;
        Ok(Some(
            DeclNode::declarator(&id.name, ty)
                .with_comments(declarator.meta.leading_comments.clone()),
        ))
    }

    fn function(&self, func: &FunctionDeclaration) -> Built<DeclNode> {
        let Some(id) = &func.id else {
            warn!("anonymous function declaration omitted");
            return Ok(None);
        };
        if self.excluded(&id.name) {
            return Ok(None);
        }
        let Some(params) = self.params(&func.params)? else {
            warn!(name = id.name.as_str(), "failed mapping parameters, function omitted");
            return Ok(None);
        };
        let signature = Signature {
            name: Some(id.name.clone()),
            params,
            return_type: print_annotation(func.return_type.as_ref())?,
            type_parameters: print_type_parameters(func.type_parameters.as_ref())?,
        };
        Ok(Some(
            DeclNode::function(signature).with_comments(capture_comments(&func.meta, &func.decorators)),
        ))
    }

    /// Map a parameter list; `None` when any entry cannot be expressed.
    fn params(&self, patterns: &[Pattern]) -> Built<Vec<Param>> {
        let mut params = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            match self.param(pattern)? {
                Some(param) => params.push(param),
                None => return Ok(None),
            }
        }
        Ok(Some(params))
    }

    fn param(&self, pattern: &Pattern) -> Built<Param> {
        Ok(match pattern {
            Pattern::Identifier(id) => Some(
                Parameter {
                    name: id.name.clone(),
                    ty: print_annotation(id.type_annotation.as_ref())?,
                    is_rest: false,
                    is_optional: id.optional,
                }
                .into(),
            ),
            // `a = 1` and `{ a } = {}`
            Pattern::Assignment(assign) => match assign.left.as_ref() {
                Pattern::Identifier(id) => Some(
                    Parameter::new(&id.name, print_annotation(id.type_annotation.as_ref())?)
                        .optional()
                        .into(),
                ),
                Pattern::Object(object) => self.object_param(object)?.map(|mut param| {
                    param.is_optional = true;
                    param.into()
                }),
                other => {
                    warn!(pattern = ?other, "default-valued parameter pattern not supported");
                    None
                }
            },
            Pattern::Rest(rest) => match rest.argument.as_ref() {
                Pattern::Identifier(id) => {
                    let annotation = rest.type_annotation.as_ref().or(id.type_annotation.as_ref());
                    Some(Parameter::new(&id.name, print_annotation(annotation)?).rest().into())
                }
                other => {
                    warn!(pattern = ?other, "rest parameter pattern not supported");
                    None
                }
            },
            Pattern::Object(object) => self.object_param(object)?.map(Param::Object),
            Pattern::Unsupported(kind) => {
                warn!(kind = kind.as_str(), "parameter pattern not supported");
                None
            }
        })
    }

    fn object_param(&self, object: &ObjectPattern) -> Built<ObjectParameter> {
        let ty = print_annotation(object.type_annotation.as_ref())?;
        let mut properties = Vec::with_capacity(object.properties.len());
        for member in &object.properties {
            let ObjectPatternMember::Property(prop) = member else {
                warn!("rest or unknown member in destructured parameter not supported");
                return Ok(None);
            };
            let key = match (&prop.key, prop.computed) {
                (PropertyKey::Identifier(id), false) => id.name.clone(),
                (PropertyKey::StringLiteral(lit), false) => lit.raw(),
                _ => {
                    warn!("computed or unknown key in destructured parameter not supported");
                    return Ok(None);
                }
            };
            let (value, is_optional) = match &prop.value {
                Pattern::Assignment(assign) => (assign.left.as_ref(), true),
                value => (value, false),
            };
            let value = match value {
                Pattern::Identifier(_) => None,
                Pattern::Object(nested) => match self.object_param(nested)? {
                    Some(nested) => Some(nested),
                    None => return Ok(None),
                },
                _ => {
                    warn!(key = key.as_str(), "nested parameter pattern not supported");
                    return Ok(None);
                }
            };
            properties.push(ObjectParameterProperty {
                key,
                value,
                is_optional,
            });
        }
        Ok(Some(ObjectParameter {
            properties,
            ty,
            is_optional: false,
        }))
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn class(&self, class: &ClassDeclaration) -> Built<DeclNode> {
        let Some(id) = &class.id else {
            warn!("anonymous class declaration omitted");
            return Ok(None);
        };
        if self.excluded(&id.name) {
            return Ok(None);
        }
        let super_name = match &class.super_class {
            None => None,
            Some(Expression::Identifier(sup)) => Some(sup.name.clone()),
            Some(Expression::Unsupported(kind)) => {
                warn!(
                    class = id.name.as_str(),
                    kind = kind.as_str(),
                    "only identifiers are supported as superclasses, class omitted"
                );
                return Ok(None);
            }
        };

        let mut members = Vec::new();
        for member in &class.body.body {
            if let Some(node) = self.class_member(member)? {
                members.push(node);
            }
        }
        if members.is_empty() && self.options.ignore_empty_classes {
            debug!(class = id.name.as_str(), "empty class omitted");
            return Ok(None);
        }

        let implements = class
            .implements
            .iter()
            .map(|imp| {
                Ok(DeclNode::new(DeclKind::Implements {
                    name: imp.id.name.clone(),
                    type_parameters: print_type_arguments(imp.type_parameters.as_ref())?,
                })
                .with_comments(imp.meta.leading_comments.clone()))
            })
            .collect::<Result<Vec<_>, EmitError>>()?;

        let decl = ClassDecl {
            name: id.name.clone(),
            super_name,
            members,
            type_parameters: print_type_parameters(class.type_parameters.as_ref())?,
            super_type_parameters: print_type_arguments(class.super_type_parameters.as_ref())?,
            implements,
        };
        Ok(Some(
            DeclNode::new(DeclKind::Class(decl))
                .with_comments(capture_comments(&class.meta, &class.decorators)),
        ))
    }

    fn class_member(&self, member: &ClassMember) -> Built<DeclNode> {
        match member {
            ClassMember::Method(method) => self.class_method(method),
            ClassMember::Property(prop) => self.class_property(prop),
            ClassMember::Unsupported(kind) => {
                warn!(kind = kind.as_str(), "class member not supported, omitted");
                Ok(None)
            }
        }
    }

    /// Member name as rendered, or `None` when excluded or unnameable.
    fn member_name(&self, key: &PropertyKey, computed: bool) -> Option<String> {
        let Some(name) = key.name() else {
            warn!(key = ?key, "member name kind not supported, omitted");
            return None;
        };
        if self.excluded(name) {
            return None;
        }
        match key {
            PropertyKey::Identifier(id) if computed => Some(format!("[{}]", id.name)),
            key => property_key(key),
        }
    }

    fn class_method(&self, method: &ClassMethod) -> Built<DeclNode> {
        let comments = capture_comments(&method.meta, &method.decorators);
        let Some(params) = self.params(&method.params)? else {
            warn!(key = ?method.key.name(), "failed mapping parameters, method omitted");
            return Ok(None);
        };

        if method.kind == MethodKind::Constructor {
            return Ok(Some(DeclNode::constructor(params).with_comments(comments)));
        }

        let Some(name) = self.member_name(&method.key, method.computed) else {
            return Ok(None);
        };
        let node = match method.kind {
            MethodKind::Set => {
                debug!(name = name.as_str(), "setter omitted");
                return Ok(None);
            }
            MethodKind::Get => DeclNode::class_property(
                name,
                print_annotation_or_any(method.return_type.as_ref())?,
                method.is_static,
            ),
            MethodKind::Method | MethodKind::Constructor => {
                let signature = Signature {
                    name: Some(name),
                    params,
                    return_type: print_annotation(method.return_type.as_ref())?,
                    type_parameters: print_type_parameters(method.type_parameters.as_ref())?,
                };
                DeclNode::class_method(signature, method.is_static)
            }
        };
        Ok(Some(node.with_comments(comments)))
    }

    fn class_property(&self, prop: &ClassProperty) -> Built<DeclNode> {
        let Some(name) = self.member_name(&prop.key, prop.computed) else {
            return Ok(None);
        };
        let ty = print_annotation_or_any(prop.type_annotation.as_ref())?;
        Ok(Some(
            DeclNode::class_property(name, ty, prop.is_static)
                .with_comments(capture_comments(&prop.meta, &prop.decorators)),
        ))
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    fn interface(&self, iface: &InterfaceDeclaration) -> Built<DeclNode> {
        let name = &iface.id.name;
        if self.excluded(name) {
            return Ok(None);
        }

        let bases = iface
            .extends
            .iter()
            .map(|base| {
                let args = print_type_arguments(base.type_parameters.as_ref())?;
                Ok(format!("{}{}", print_type_name(&base.id)?, generics(&args)))
            })
            .collect::<Result<Vec<_>, EmitError>>()?;

        // Properties, then indexers, then call signatures.
        let mut members = Vec::new();
        for prop in &iface.body.properties {
            let node = match prop {
                ObjectTypeMember::Property(prop) => self.interface_property(prop)?,
                ObjectTypeMember::Unsupported(kind) => {
                    warn!(kind = kind.as_str(), "interface member not supported, omitted");
                    None
                }
            };
            members.extend(node);
        }
        for indexer in &iface.body.indexers {
            members.push(self.interface_indexer(indexer)?);
        }
        for call in &iface.body.call_properties {
            members.push(self.interface_call(call)?);
        }

        if self.options.ignore_empty_interfaces && bases.is_empty() && members.is_empty() {
            debug!(interface = name.as_str(), "empty interface omitted");
            return Ok(None);
        }

        let decl = InterfaceDecl {
            name: name.clone(),
            members,
            bases,
            type_parameters: print_type_parameters(iface.type_parameters.as_ref())?,
        };
        Ok(Some(
            DeclNode::new(DeclKind::Interface(decl))
                .with_comments(iface.meta.leading_comments.clone()),
        ))
    }

    /// Function-typed properties always become methods; the AST does not
    /// distinguish `foo(): T` from `foo: () => T`.
    fn interface_property(&self, prop: &ObjectTypeProperty) -> Built<DeclNode> {
        let Some(name) = self.member_name(&prop.key, false) else {
            return Ok(None);
        };
        let comments = prop.meta.leading_comments.clone();

        if let FlowType::Function(func) = &prop.value {
            let signature = self.function_type_signature(Some(name), func)?;
            return Ok(Some(
                DeclNode::new(DeclKind::InterfaceMethod {
                    signature,
                    is_static: prop.is_static,
                    is_optional: prop.optional,
                })
                .with_comments(comments),
            ));
        }

        let ty = print_type(&prop.value)?;
        Ok(Some(
            DeclNode::interface_property(name, ty, prop.is_static, prop.optional)
                .with_comments(comments),
        ))
    }

    fn interface_indexer(&self, indexer: &ObjectTypeIndexer) -> Result<DeclNode, EmitError> {
        let name = indexer
            .id
            .as_ref()
            .map_or_else(|| "key".to_string(), |id| id.name.clone());
        Ok(DeclNode::new(DeclKind::InterfaceIndexer {
            name,
            key_type: print_type(&indexer.key)?,
            value_type: print_type(&indexer.value)?,
            is_static: indexer.is_static,
        })
        .with_comments(indexer.meta.leading_comments.clone()))
    }

    fn interface_call(&self, call: &ObjectTypeCallProperty) -> Result<DeclNode, EmitError> {
        let signature = self.function_type_signature(None, &call.value)?;
        Ok(DeclNode::new(DeclKind::InterfaceCall(signature))
            .with_comments(call.meta.leading_comments.clone()))
    }

    fn function_type_signature(
        &self,
        name: Option<String>,
        func: &FunctionType,
    ) -> Result<Signature, EmitError> {
        let mut params = Vec::with_capacity(func.params.len() + 1);
        for (index, param) in func.params.iter().enumerate() {
            let ty = param.type_annotation.as_ref().map(print_type).transpose()?;
            let mut node = Parameter::new(function_type_param_name(param, index), ty);
            node.is_optional = param.optional;
            params.push(Param::Simple(node));
        }
        if let Some(rest) = &func.rest {
            let ty = rest.type_annotation.as_ref().map(print_type).transpose()?;
            params.push(
                Parameter::new(function_type_param_name(rest, params.len()), ty)
                    .rest()
                    .into(),
            );
        }
        Ok(Signature {
            name,
            params,
            return_type: Some(print_type(&func.return_type)?),
            type_parameters: print_type_parameters(func.type_parameters.as_ref())?,
        })
    }
}
