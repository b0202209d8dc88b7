//! Declaration IR printer
//!
//! Every node renders as its comment block followed by its structural text;
//! the combined text is then split into lines and each line is prefixed
//! with the indent step repeated `level` times. Children are rendered at a
//! level relative to their parent, so nesting composes.

use dtsgen_ast::{Comment, CommentKind};

use crate::ir::{
    ClassDecl, DeclKind, DeclNode, InterfaceDecl, ObjectParameter, Param, Parameter, Signature,
};
use crate::type_printer::{ANY, generics};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrinterOptions {
    /// One indentation step.
    pub(crate) indent: String,
    /// Extra indentation for continuation declarators of a variable statement.
    pub(crate) multi_var_indent: String,
    pub(crate) suppress_comments: bool,
    pub(crate) mark_unspecified_as_optional: bool,
    pub(crate) suppress_ambient_declaration: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            multi_var_indent: "  ".to_string(),
            suppress_comments: false,
            mark_unspecified_as_optional: false,
            suppress_ambient_declaration: false,
        }
    }
}

impl PrinterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, value: impl Into<String>) -> Self {
        self.indent = value.into();
        self
    }

    pub fn multi_var_indent(mut self, value: impl Into<String>) -> Self {
        self.multi_var_indent = value.into();
        self
    }

    pub fn suppress_comments(mut self, value: bool) -> Self {
        self.suppress_comments = value;
        self
    }

    pub fn mark_unspecified_as_optional(mut self, value: bool) -> Self {
        self.mark_unspecified_as_optional = value;
        self
    }

    pub fn suppress_ambient_declaration(mut self, value: bool) -> Self {
        self.suppress_ambient_declaration = value;
        self
    }
}

/// Indentation level a node is rendered at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub level: usize,
}

impl RenderContext {
    pub const TOP: Self = Self { level: 0 };
    /// Children render one level below their parent's own text.
    pub const CHILD: Self = Self { level: 1 };

    pub fn at(level: usize) -> Self {
        Self { level }
    }
}

/// Which parts of a node to render.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Part {
    All,
    Comments,
    Structure,
}

#[derive(Clone, Debug, Default)]
pub struct Printer {
    options: PrinterOptions,
}

impl Printer {
    pub fn new(options: PrinterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    /// Render a module tree as a complete, newline-terminated document.
    pub fn print_module(&self, module: &DeclNode) -> String {
        let mut output = self.render(module, RenderContext::TOP);
        output.push('\n');
        output
    }

    /// Render a node with its comments at `ctx.level`.
    pub fn render(&self, node: &DeclNode, ctx: RenderContext) -> String {
        self.render_part(node, ctx, Part::All)
    }

    fn render_part(&self, node: &DeclNode, ctx: RenderContext, part: Part) -> String {
        let mut text = String::new();
        if part != Part::Structure && !self.options.suppress_comments {
            text.push_str(&comment_block(&node.comments));
        }
        if part != Part::Comments {
            text.push_str(&self.structure(node));
        }
        indent_lines(&text, &self.options.indent.repeat(ctx.level))
    }

    fn render_children(&self, children: &[DeclNode], separator: &str) -> String {
        children
            .iter()
            .map(|child| self.render(child, RenderContext::CHILD))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Structural text of a node, unindented. Only children are indented.
    fn structure(&self, node: &DeclNode) -> String {
        match &node.kind {
            DeclKind::Module { name, children } => self.module(name, children),
            DeclKind::ImportDeclaration { source } => format!("import '{source}';"),
            DeclKind::Import {
                enclosed,
                specifiers,
                source,
            } => self.import(*enclosed, specifiers, source),
            DeclKind::ImportSpecifier { imported, local } => {
                if imported == local {
                    imported.clone()
                } else {
                    format!("{imported} as {local}")
                }
            }
            DeclKind::ImportDefaultSpecifier { local } => local.clone(),
            DeclKind::ImportNamespaceSpecifier { local } => format!("* as {local}"),
            DeclKind::ExportAllFrom { source } => format!("export * from '{source}';"),
            DeclKind::ExportNamedDeclaration { declaration } => {
                self.export_declaration(declaration)
            }
            DeclKind::Export { specifiers, source } => {
                let specifiers = self.render_children(specifiers, ",\n");
                match source {
                    Some(source) => format!("export {{\n{specifiers}\n}} from '{source}';"),
                    None => format!("export {{\n{specifiers}\n}};"),
                }
            }
            DeclKind::ExportSpecifier { exported, local } => match local {
                Some(local) if local != exported => format!("{local} as {exported}"),
                _ => exported.clone(),
            },
            DeclKind::VariableDeclaration { kind, declarators } => {
                self.variable_declaration(kind, declarators)
            }
            DeclKind::VariableDeclarator { name, ty } => format!("{name}: {ty}"),
            DeclKind::Function(signature) => format!("function {}", self.signature(signature)),
            DeclKind::InterfaceMethod {
                signature,
                is_static,
                is_optional,
            } => {
                let prefix = static_prefix(*is_static);
                if *is_optional {
                    let name = signature.name.as_deref().unwrap_or_default();
                    let ret = signature.return_type.as_deref().unwrap_or(ANY);
                    format!(
                        "{prefix}{name}?: ({}) => {ret};",
                        self.params(&signature.params)
                    )
                } else {
                    format!("{prefix}{};", self.signature(signature))
                }
            }
            DeclKind::InterfaceCall(signature) => format!("{};", self.signature(signature)),
            DeclKind::ClassMethod {
                signature,
                is_static,
            } => format!("{}{};", static_prefix(*is_static), self.signature(signature)),
            DeclKind::ClassConstructor { params } => {
                format!("constructor({});", self.params(params))
            }
            DeclKind::Interface(interface) => self.interface(interface),
            DeclKind::InterfaceProperty {
                name,
                ty,
                is_static,
                is_optional,
            } => format!(
                "{}{name}{}: {ty};",
                static_prefix(*is_static),
                optional_mark(*is_optional)
            ),
            DeclKind::InterfaceIndexer {
                name,
                key_type,
                value_type,
                is_static,
            } => format!(
                "{}[{name}: {key_type}]: {value_type};",
                static_prefix(*is_static)
            ),
            DeclKind::Class(class) => self.class(class),
            DeclKind::Implements {
                name,
                type_parameters,
            } => format!("{name}{}", generics(type_parameters)),
            DeclKind::ClassProperty {
                name,
                ty,
                is_static,
            } => format!("{}{name}: {ty};", static_prefix(*is_static)),
        }
    }

    fn module(&self, name: &str, children: &[DeclNode]) -> String {
        if self.options.suppress_ambient_declaration {
            return children
                .iter()
                .map(|child| self.render(child, RenderContext::TOP))
                .collect::<Vec<_>>()
                .join("\n");
        }
        block(
            &format!("declare module '{name}'"),
            &self.render_children(children, "\n"),
        )
    }

    fn import(&self, enclosed: bool, specifiers: &[DeclNode], source: &str) -> String {
        let (named, bare): (Vec<&DeclNode>, Vec<&DeclNode>) = specifiers
            .iter()
            .partition(|spec| matches!(spec.kind, DeclKind::ImportSpecifier { .. }));
        let render = |specs: &[&DeclNode]| {
            specs
                .iter()
                .map(|spec| self.render(spec, RenderContext::TOP))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let clause = if enclosed {
            let named = format!("{{{}}}", render(&named));
            if bare.is_empty() {
                named
            } else {
                format!("{}, {named}", render(&bare))
            }
        } else {
            render(&bare)
        };
        format!("import {clause} from '{source}';")
    }

    /// The wrapped declaration's comments go above `export`.
    fn export_declaration(&self, declaration: &DeclNode) -> String {
        let comment = self.render_part(declaration, RenderContext::TOP, Part::Comments);
        let decl = self.render_part(declaration, RenderContext::TOP, Part::Structure);
        if matches!(declaration.kind, DeclKind::Interface(_)) {
            // Interfaces carry their own `export` keyword.
            return format!("{comment}{decl}");
        }
        let suffix = if declaration.prevents_semicolon() {
            ""
        } else {
            ";"
        };
        format!("{comment}export {decl}{suffix}")
    }

    fn variable_declaration(&self, kind: &str, declarators: &[DeclNode]) -> String {
        let declarators = declarators
            .iter()
            .map(|decl| self.render(decl, RenderContext::TOP))
            .filter(|decl| !decl.is_empty())
            .enumerate()
            .map(|(index, decl)| {
                if index == 0 {
                    decl
                } else {
                    indent_lines(&decl, &self.options.multi_var_indent)
                }
            })
            .collect::<Vec<_>>();
        format!("{kind} {}", declarators.join(",\n"))
    }

    fn interface(&self, interface: &InterfaceDecl) -> String {
        let extends = if interface.bases.is_empty() {
            String::new()
        } else {
            format!(" extends {}", interface.bases.join(", "))
        };
        block(
            &format!(
                "export interface {}{}{extends}",
                interface.name,
                generics(&interface.type_parameters)
            ),
            &self.render_children(&interface.members, "\n"),
        )
    }

    fn class(&self, class: &ClassDecl) -> String {
        let mut head = format!("class {}{}", class.name, generics(&class.type_parameters));
        if let Some(super_name) = &class.super_name {
            head.push_str(" extends ");
            head.push_str(super_name);
            head.push_str(&generics(&class.super_type_parameters));
        }
        if !class.implements.is_empty() {
            let implements = class
                .implements
                .iter()
                .map(|node| self.render_part(node, RenderContext::TOP, Part::Structure))
                .collect::<Vec<_>>();
            head.push_str(" implements ");
            head.push_str(&implements.join(", "));
        }
        block(&head, &self.render_children(&class.members, "\n"))
    }

    /// `name<T>(params): type`, with the `: type` suffix only when known.
    fn signature(&self, signature: &Signature) -> String {
        let mut text = format!(
            "{}{}({})",
            signature.name.as_deref().unwrap_or_default(),
            generics(&signature.type_parameters),
            self.params(&signature.params)
        );
        if let Some(ret) = &signature.return_type {
            text.push_str(": ");
            text.push_str(ret);
        }
        text
    }

    /// Render a parameter list. With optional inference on, every untyped
    /// parameter after the last typed one is optional.
    pub fn params(&self, params: &[Param]) -> String {
        let last_typed = params.iter().rposition(Param::is_typed);
        params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let trailing = self.options.mark_unspecified_as_optional
                    && last_typed.is_none_or(|last| index > last);
                match param {
                    Param::Simple(param) => simple_param(param, trailing),
                    Param::Object(param) => self.object_param(param, trailing),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn object_param(&self, param: &ObjectParameter, trailing: bool) -> String {
        let optional = optional_mark(param.is_optional || (trailing && param.ty.is_none()));
        if param.properties.is_empty() {
            let ty = param.ty.as_deref().unwrap_or("{}");
            return format!("{{}}{optional}: {ty}");
        }
        let ty = match &param.ty {
            Some(ty) => ty.clone(),
            None => self.object_param_type(param),
        };
        format!("{}{optional}: {ty}", self.object_pattern(param))
    }

    /// `{\n  a,\n  b: {\n    c\n  }\n}`
    fn object_pattern(&self, param: &ObjectParameter) -> String {
        if param.properties.is_empty() {
            return "{}".to_string();
        }
        let properties = param
            .properties
            .iter()
            .map(|prop| match &prop.value {
                Some(nested) => format!("{}: {}", prop.key, self.object_pattern(nested)),
                None => prop.key.clone(),
            })
            .map(|prop| indent_lines(&prop, &self.options.indent))
            .collect::<Vec<_>>();
        format!("{{\n{}\n}}", properties.join(",\n"))
    }

    /// Structural type of an untyped pattern: `{\n  a: any;\n  b: { ... };\n}`
    fn object_param_type(&self, param: &ObjectParameter) -> String {
        if param.properties.is_empty() {
            return "{}".to_string();
        }
        let last_typed = param.properties.iter().rposition(|prop| prop.value.is_some());
        let members = param
            .properties
            .iter()
            .enumerate()
            .map(|(index, prop)| {
                let ty = match &prop.value {
                    Some(nested) => match &nested.ty {
                        Some(ty) => ty.clone(),
                        None => self.object_param_type(nested),
                    },
                    None => ANY.to_string(),
                };
                let inferred = self.options.mark_unspecified_as_optional
                    && prop.value.is_none()
                    && last_typed.is_none_or(|last| index > last);
                let optional = optional_mark(prop.is_optional || inferred);
                indent_lines(
                    &format!("{}{optional}: {ty};", prop.key),
                    &self.options.indent,
                )
            })
            .collect::<Vec<_>>();
        format!("{{\n{}\n}}", members.join("\n"))
    }
}

fn simple_param(param: &Parameter, trailing: bool) -> String {
    let rest = if param.is_rest { "..." } else { "" };
    let inferred = trailing && param.ty.is_none() && !param.is_rest;
    let optional = optional_mark(param.is_optional || inferred);
    let ty = param.ty.as_deref().unwrap_or(ANY);
    format!("{rest}{}{optional}: {ty}", param.name)
}

/// Comment records as `\n<comments>\n`, or nothing when there are none.
fn comment_block(comments: &[Comment]) -> String {
    let lines = comments
        .iter()
        .filter_map(|comment| match comment.kind {
            CommentKind::CommentLine => Some(format!("//{}", comment.value)),
            CommentKind::CommentBlock => Some(format!("/*{}*/", comment.value)),
            CommentKind::Unknown => None,
        })
        .collect::<Vec<_>>();
    if lines.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", lines.join("\n"))
    }
}

/// `head {\n<body>\n}`, or `head {\n}` for an empty body.
fn block(head: &str, body: &str) -> String {
    if body.is_empty() {
        format!("{head} {{\n}}")
    } else {
        format!("{head} {{\n{body}\n}}")
    }
}

fn indent_lines(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn static_prefix(is_static: bool) -> &'static str {
    if is_static { "static " } else { "" }
}

fn optional_mark(is_optional: bool) -> &'static str {
    if is_optional { "?" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_lines_prefixes_every_line() {
        assert_eq!(indent_lines("a\n\nb", "  "), "  a\n  \n  b");
        assert_eq!(indent_lines("a\nb", ""), "a\nb");
    }

    #[test]
    fn test_comment_block_drops_unknown_kinds() {
        let comments = vec![
            Comment::line(" one"),
            Comment {
                kind: CommentKind::Unknown,
                value: "x".to_string(),
            },
            Comment::block("* two "),
        ];
        assert_eq!(comment_block(&comments), "\n// one\n/** two */\n");
        assert_eq!(comment_block(&[]), "");
    }

    #[test]
    fn test_block_with_empty_body() {
        assert_eq!(block("class A", ""), "class A {\n}");
        assert_eq!(block("class A", "  x: any;"), "class A {\n  x: any;\n}");
    }
}
