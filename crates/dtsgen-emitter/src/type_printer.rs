//! Flow type annotation to TypeScript type text.
//!
//! Translation is total over the supported kinds and fails with
//! [`EmitError::UnsupportedTypeAnnotation`] on anything else. Function
//! types are always parenthesized as a unit so they compose inside unions
//! and arrays.

use dtsgen_ast::{
    FlowType, FunctionType, FunctionTypeParam, ObjectType, ObjectTypeMember, PropertyKey,
    TypeAnnotation, TypeName, TypeParameterDeclaration, TypeParameterInstantiation,
};

use crate::error::EmitError;

pub const ANY: &str = "any";

pub fn print_type(ty: &FlowType) -> Result<String, EmitError> {
    Ok(match ty {
        FlowType::Generic(generic) => {
            let name = print_type_name(&generic.id)?;
            let args = print_type_arguments(generic.type_parameters.as_ref())?;
            format!("{name}{}", generics(&args))
        }
        FlowType::Void => "void".to_string(),
        FlowType::Number => "number".to_string(),
        FlowType::String => "string".to_string(),
        FlowType::Boolean => "boolean".to_string(),
        FlowType::Any => ANY.to_string(),
        FlowType::Null => "null".to_string(),
        FlowType::Union(types) => join_operands(types, " | ", Precedence::Union)?,
        FlowType::Intersection(types) => {
            join_operands(types, " & ", Precedence::Intersection)?
        }
        FlowType::Function(func) => format!("({})", print_function_type(func)?),
        FlowType::Array(element) => format!("{}[]", print_operand(element, Precedence::Postfix)?),
        FlowType::Tuple(types) => {
            let elements = types.iter().map(print_type).collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", elements.join(", "))
        }
        FlowType::Object(object) => print_object_type(object)?,
        FlowType::Nullable(inner) => {
            format!("{} | null | undefined", print_operand(inner, Precedence::Union)?)
        }
        FlowType::StringLiteral(value) => quote(value),
        FlowType::NumberLiteral(lit) => lit
            .extra
            .as_ref()
            .and_then(|extra| extra.raw.clone())
            .unwrap_or_else(|| lit.value.to_string()),
        FlowType::BooleanLiteral(value) => value.to_string(),
        FlowType::Unsupported(kind) => return Err(EmitError::unsupported(kind)),
    })
}

/// Translate an optional annotation wrapper; `None` when absent.
pub fn print_annotation(annotation: Option<&TypeAnnotation>) -> Result<Option<String>, EmitError> {
    annotation
        .map(|annotation| print_type(&annotation.type_annotation))
        .transpose()
}

/// Translate an optional annotation wrapper, defaulting to `any`.
pub fn print_annotation_or_any(annotation: Option<&TypeAnnotation>) -> Result<String, EmitError> {
    Ok(print_annotation(annotation)?.unwrap_or_else(|| ANY.to_string()))
}

pub fn print_type_name(name: &TypeName) -> Result<String, EmitError> {
    match name {
        TypeName::Identifier(id) => Ok(id.name.clone()),
        TypeName::Qualified { qualification, id } => {
            Ok(format!("{}.{}", print_type_name(qualification)?, id.name))
        }
        TypeName::Unsupported(kind) => Err(EmitError::unsupported(kind)),
    }
}

/// `<A, B>` arguments at a use site, as individual strings.
pub fn print_type_arguments(
    args: Option<&TypeParameterInstantiation>,
) -> Result<Vec<String>, EmitError> {
    args.map_or(Ok(Vec::new()), |args| {
        args.params.iter().map(print_type).collect()
    })
}

/// Declared type parameters, each as `T`, `T extends Bound` or
/// `T extends Bound = Default`.
pub fn print_type_parameters(
    params: Option<&TypeParameterDeclaration>,
) -> Result<Vec<String>, EmitError> {
    let Some(params) = params else {
        return Ok(Vec::new());
    };
    params
        .params
        .iter()
        .map(|param| {
            let mut text = param.name.clone();
            if let Some(bound) = print_annotation(param.bound.as_ref())? {
                text.push_str(" extends ");
                text.push_str(&bound);
            }
            if let Some(default) = &param.default {
                text.push_str(" = ");
                text.push_str(&print_type(default)?);
            }
            Ok(text)
        })
        .collect()
}

/// `<A, B>` when non-empty, nothing otherwise.
pub fn generics(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

/// Parameter list of a function type, without surrounding parentheses.
pub fn print_function_type_params(func: &FunctionType) -> Result<Vec<String>, EmitError> {
    let mut params = func
        .params
        .iter()
        .enumerate()
        .map(|(index, param)| print_function_type_param(param, index, false))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(rest) = &func.rest {
        params.push(print_function_type_param(rest, params.len(), true)?);
    }
    Ok(params)
}

/// Name of a function-type parameter; Flow allows unnamed ones.
pub fn function_type_param_name(param: &FunctionTypeParam, index: usize) -> String {
    param
        .name
        .as_ref()
        .map_or_else(|| format!("arg{index}"), |name| name.name.clone())
}

fn print_function_type_param(
    param: &FunctionTypeParam,
    index: usize,
    rest: bool,
) -> Result<String, EmitError> {
    let name = function_type_param_name(param, index);
    let ty = match &param.type_annotation {
        Some(ty) => print_type(ty)?,
        None => ANY.to_string(),
    };
    let prefix = if rest { "..." } else { "" };
    let optional = if param.optional && !rest { "?" } else { "" };
    Ok(format!("{prefix}{name}{optional}: {ty}"))
}

fn print_function_type(func: &FunctionType) -> Result<String, EmitError> {
    let type_params = print_type_parameters(func.type_parameters.as_ref())?;
    let params = print_function_type_params(func)?;
    let ret = print_type(&func.return_type)?;
    Ok(format!(
        "{}({}) => {ret}",
        generics(&type_params),
        params.join(", ")
    ))
}

fn print_object_type(object: &ObjectType) -> Result<String, EmitError> {
    let mut members = Vec::new();
    for member in &object.properties {
        let prop = match member {
            ObjectTypeMember::Property(prop) => prop,
            ObjectTypeMember::Unsupported(kind) => return Err(EmitError::unsupported(kind)),
        };
        let name = match &prop.key {
            PropertyKey::Unsupported(kind) => return Err(EmitError::unsupported(kind)),
            key => property_key(key).unwrap_or_default(),
        };
        let optional = if prop.optional { "?" } else { "" };
        members.push(format!("{name}{optional}: {}", print_type(&prop.value)?));
    }
    for indexer in &object.indexers {
        let name = indexer.id.as_ref().map_or("key", |id| id.name.as_str());
        members.push(format!(
            "[{name}: {}]: {}",
            print_type(&indexer.key)?,
            print_type(&indexer.value)?
        ));
    }
    for call in &object.call_properties {
        let params = print_function_type_params(&call.value)?;
        members.push(format!(
            "({}): {}",
            params.join(", "),
            print_type(&call.value.return_type)?
        ));
    }

    if members.is_empty() {
        Ok("{}".to_string())
    } else {
        Ok(format!("{{ {} }}", members.join(", ")))
    }
}

/// Member name text: identifiers as-is, string keys with their source
/// quoting.
pub fn property_key(key: &PropertyKey) -> Option<String> {
    match key {
        PropertyKey::Identifier(id) => Some(id.name.clone()),
        PropertyKey::StringLiteral(lit) => Some(lit.raw()),
        PropertyKey::Unsupported(_) => None,
    }
}

/// Single-quoted string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Union,
    Intersection,
    Postfix,
}

fn precedence(ty: &FlowType) -> Option<Precedence> {
    match ty {
        FlowType::Union(_) | FlowType::Nullable(_) => Some(Precedence::Union),
        FlowType::Intersection(_) => Some(Precedence::Intersection),
        _ => None,
    }
}

/// Print `ty` as an operand of an operator binding at `context`,
/// parenthesizing looser-binding compositions.
fn print_operand(ty: &FlowType, context: Precedence) -> Result<String, EmitError> {
    let text = print_type(ty)?;
    Ok(match precedence(ty) {
        Some(own) if own < context => format!("({text})"),
        _ => text,
    })
}

fn join_operands(
    types: &[FlowType],
    separator: &str,
    context: Precedence,
) -> Result<String, EmitError> {
    let parts = types
        .iter()
        .map(|ty| print_operand(ty, context))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(separator))
}
