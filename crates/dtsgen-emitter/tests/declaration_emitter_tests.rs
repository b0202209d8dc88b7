//! Tests for mapping Babel statements to declarations

use dtsgen_ast::Statement;
use dtsgen_emitter::{
    DeclarationEmitter, EmitError, EmitOptions, MemberFilter, Printer, RenderContext,
};
use serde_json::{Value, json};

fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn typed(name: &str, ty: Value) -> Value {
    json!({
        "type": "Identifier",
        "name": name,
        "typeAnnotation": annotation(ty)
    })
}

fn annotation(ty: Value) -> Value {
    json!({ "type": "TypeAnnotation", "typeAnnotation": ty })
}

fn kw(kind: &str) -> Value {
    json!({ "type": kind })
}

fn generic(name: &str) -> Value {
    json!({ "type": "GenericTypeAnnotation", "id": ident(name) })
}

fn source(value: &str) -> Value {
    json!({ "type": "StringLiteral", "value": value })
}

fn method(name: &str, kind: &str, params: Vec<Value>, ret: Option<Value>) -> Value {
    json!({
        "type": "ClassMethod",
        "key": ident(name),
        "kind": kind,
        "static": false,
        "computed": false,
        "params": params,
        "returnType": ret.map(annotation)
    })
}

fn property(name: &str, ty: Option<Value>) -> Value {
    json!({
        "type": "ClassProperty",
        "key": ident(name),
        "typeAnnotation": ty.map(annotation),
        "static": false
    })
}

fn class(name: &str, members: Vec<Value>) -> Value {
    json!({
        "type": "ClassDeclaration",
        "id": ident(name),
        "superClass": null,
        "body": { "type": "ClassBody", "body": members }
    })
}

fn export(declaration: Value) -> Value {
    json!({
        "type": "ExportNamedDeclaration",
        "declaration": declaration,
        "specifiers": [],
        "source": null
    })
}

fn interface(name: &str, extends: Vec<Value>, body: Value) -> Value {
    json!({
        "type": "InterfaceDeclaration",
        "id": ident(name),
        "extends": extends,
        "body": body
    })
}

fn object_type(properties: Vec<Value>, indexers: Vec<Value>, calls: Vec<Value>) -> Value {
    json!({
        "type": "ObjectTypeAnnotation",
        "properties": properties,
        "indexers": indexers,
        "callProperties": calls
    })
}

fn emit_with(statement: Value, options: &EmitOptions) -> Result<Option<String>, EmitError> {
    let statement: Statement =
        serde_json::from_value(statement).expect("statement should deserialize");
    let emitter = DeclarationEmitter::new("pkg", options);
    let printer = Printer::new(options.printer_options());
    Ok(emitter
        .statement(&statement)?
        .map(|node| printer.render(&node, RenderContext::TOP)))
}

fn emit(statement: Value) -> Option<String> {
    emit_with(statement, &EmitOptions::default()).expect("no type errors")
}

#[test]
fn test_getter_becomes_property_and_setter_vanishes() {
    let decl = export(class(
        "Foo",
        vec![
            method("value", "get", vec![], Some(kw("StringTypeAnnotation"))),
            method("value", "set", vec![ident("v")], None),
            method("run", "method", vec![], Some(kw("VoidTypeAnnotation"))),
        ],
    ));
    assert_eq!(
        emit(decl).as_deref(),
        Some("export class Foo {\n  value: string;\n  run(): void;\n}")
    );
}

#[test]
fn test_untyped_getter_is_any() {
    let decl = class("Foo", vec![method("size", "get", vec![], None)]);
    assert_eq!(
        emit(decl).as_deref(),
        Some("class Foo {\n  size: any;\n}")
    );
}

#[test]
fn test_constructor_and_properties() {
    let decl = class(
        "Point",
        vec![
            method("constructor", "constructor", vec![ident("x"), ident("y")], None),
            property("x", Some(kw("NumberTypeAnnotation"))),
            property("label", None),
        ],
    );
    assert_eq!(
        emit(decl).as_deref(),
        Some("class Point {\n  constructor(x: any, y: any);\n  x: number;\n  label: any;\n}")
    );
}

#[test]
fn test_default_filter_drops_underscore_members() {
    let decl = class(
        "Foo",
        vec![
            method("_helper", "method", vec![], None),
            property("_state", None),
            method("visible", "method", vec![], Some(kw("VoidTypeAnnotation"))),
        ],
    );
    assert_eq!(
        emit(decl).as_deref(),
        Some("class Foo {\n  visible(): void;\n}")
    );
}

#[test]
fn test_custom_pattern_filter() {
    let options = EmitOptions::new()
        .member_filter(MemberFilter::pattern("^internal").expect("valid pattern"));
    let decl = class(
        "Foo",
        vec![
            method("internalRun", "method", vec![], None),
            method("_kept", "method", vec![], None),
        ],
    );
    assert_eq!(
        emit_with(decl, &options).unwrap().as_deref(),
        Some("class Foo {\n  _kept();\n}")
    );
}

#[test]
fn test_filtered_class_name_omits_class() {
    assert_eq!(emit(class("_Internal", vec![property("a", None)])), None);
}

#[test]
fn test_empty_class_policy() {
    let decl = class("Hidden", vec![property("_x", None)]);
    assert_eq!(emit(decl.clone()).as_deref(), Some("class Hidden {\n}"));

    let options = EmitOptions::new().ignore_empty_classes(true);
    assert_eq!(emit_with(decl, &options).unwrap(), None);
}

#[test]
fn test_empty_interface_policy() {
    let empty = interface("Empty", vec![], object_type(vec![], vec![], vec![]));
    assert_eq!(emit(empty.clone()), None);

    let options = EmitOptions::new().ignore_empty_interfaces(false);
    assert_eq!(
        emit_with(empty, &options).unwrap().as_deref(),
        Some("export interface Empty {\n}")
    );

    let with_base = interface(
        "Marker",
        vec![json!({ "type": "InterfaceExtends", "id": ident("Base") })],
        object_type(vec![], vec![], vec![]),
    );
    assert_eq!(
        emit(with_base).as_deref(),
        Some("export interface Marker extends Base {\n}")
    );
}

#[test]
fn test_interface_member_order_and_kinds() {
    let body = object_type(
        vec![
            json!({
                "type": "ObjectTypeProperty",
                "key": ident("cancel"),
                "value": {
                    "type": "FunctionTypeAnnotation",
                    "params": [{
                        "type": "FunctionTypeParam",
                        "name": ident("result"),
                        "typeAnnotation": kw("AnyTypeAnnotation"),
                        "optional": false
                    }],
                    "returnType": generic("Promise")
                },
                "optional": true
            }),
            json!({
                "type": "ObjectTypeProperty",
                "key": ident("size"),
                "value": kw("NumberTypeAnnotation"),
                "static": true
            }),
            json!({
                "type": "ObjectTypeProperty",
                "key": ident("_secret"),
                "value": kw("StringTypeAnnotation")
            }),
        ],
        vec![json!({
            "type": "ObjectTypeIndexer",
            "id": null,
            "key": kw("StringTypeAnnotation"),
            "value": kw("AnyTypeAnnotation")
        })],
        vec![json!({
            "type": "ObjectTypeCallProperty",
            "value": {
                "type": "FunctionTypeAnnotation",
                "params": [],
                "returnType": generic("Promise")
            }
        })],
    );
    assert_eq!(
        emit(interface("INext", vec![], body)).as_deref(),
        Some(
            "export interface INext {\n  cancel?: (result: any) => Promise;\n  static size: number;\n  [key: string]: any;\n  (): Promise;\n}"
        )
    );
}

#[test]
fn test_exported_interface_is_not_double_exported() {
    let decl = export(interface(
        "Shape",
        vec![],
        object_type(
            vec![json!({
                "type": "ObjectTypeProperty",
                "key": ident("area"),
                "value": kw("NumberTypeAnnotation")
            })],
            vec![],
            vec![],
        ),
    ));
    assert_eq!(
        emit(decl).as_deref(),
        Some("export interface Shape {\n  area: number;\n}")
    );
}

// Relative imports left as `./x` inside `declare module` fail with TS2439.
#[test]
fn test_import_sources_are_rewritten() {
    let decl = json!({
        "type": "ImportDeclaration",
        "specifiers": [
            { "type": "ImportDefaultSpecifier", "local": ident("Def") },
            { "type": "ImportSpecifier", "imported": ident("a"), "local": ident("a") },
            { "type": "ImportSpecifier", "imported": ident("b"), "local": ident("c") }
        ],
        "source": source("./util")
    });
    assert_eq!(
        emit(decl).as_deref(),
        Some("import Def, {a, b as c} from 'pkg/util';")
    );

    let side_effect = json!({
        "type": "ImportDeclaration",
        "specifiers": [],
        "source": source("polyfill")
    });
    assert_eq!(emit(side_effect).as_deref(), Some("import 'polyfill';"));
}

#[test]
fn test_export_specifiers_are_filtered() {
    let specifier = |local: &str, exported: &str| {
        json!({ "type": "ExportSpecifier", "local": ident(local), "exported": ident(exported) })
    };
    let decl = json!({
        "type": "ExportNamedDeclaration",
        "declaration": null,
        "specifiers": [specifier("a", "a"), specifier("_b", "_b"), specifier("c", "d")],
        "source": source("./x")
    });
    assert_eq!(
        emit(decl).as_deref(),
        Some("export {\n  a,\n  c as d\n} from 'pkg/x';")
    );

    let all_hidden = json!({
        "type": "ExportNamedDeclaration",
        "declaration": null,
        "specifiers": [specifier("_a", "_a")],
        "source": null
    });
    assert_eq!(emit(all_hidden), None);
}

#[test]
fn test_export_all_keeps_foreign_source() {
    let decl = json!({ "type": "ExportAllDeclaration", "source": source("a") });
    assert_eq!(emit(decl).as_deref(), Some("export * from 'a';"));
}

#[test]
fn test_variable_declarators() {
    let decl = export(json!({
        "type": "VariableDeclaration",
        "kind": "const",
        "declarations": [
            { "type": "VariableDeclarator", "id": ident("bar") },
            { "type": "VariableDeclarator", "id": typed("count", kw("NumberTypeAnnotation")) },
            { "type": "VariableDeclarator", "id": ident("_hidden") }
        ]
    }));
    assert_eq!(
        emit(decl).as_deref(),
        Some("export const bar: any,\n  count: number;")
    );
}

#[test]
fn test_function_with_type_parameters_and_defaults() {
    let decl = export(json!({
        "type": "FunctionDeclaration",
        "id": ident("wrap"),
        "params": [
            typed("value", generic("T")),
            { "type": "AssignmentPattern", "left": ident("depth") }
        ],
        "returnType": annotation(json!({
            "type": "ArrayTypeAnnotation",
            "elementType": generic("T")
        })),
        "typeParameters": {
            "type": "TypeParameterDeclaration",
            "params": [{ "type": "TypeParameter", "name": "T" }]
        }
    }));
    assert_eq!(
        emit(decl).as_deref(),
        Some("export function wrap<T>(value: T, depth?: any): T[];")
    );
}

#[test]
fn test_function_with_unmappable_param_is_omitted() {
    let decl = export(json!({
        "type": "FunctionDeclaration",
        "id": ident("first"),
        "params": [{ "type": "ArrayPattern", "elements": [] }]
    }));
    assert_eq!(emit(decl), None);
}

#[test]
fn test_non_identifier_superclass_omits_class() {
    let mut decl = class("Mixed", vec![property("a", None)]);
    decl["superClass"] = json!({ "type": "CallExpression" });
    assert_eq!(emit(decl), None);
}

#[test]
fn test_class_heritage() {
    let mut decl = class("Child", vec![property("a", None)]);
    decl["superClass"] = ident("Parent");
    decl["superTypeParameters"] = json!({
        "type": "TypeParameterInstantiation",
        "params": [kw("StringTypeAnnotation")]
    });
    decl["implements"] = json!([{ "type": "ClassImplements", "id": ident("Named") }]);
    assert_eq!(
        emit(decl).as_deref(),
        Some("class Child extends Parent<string> implements Named {\n  a: any;\n}")
    );
}

#[test]
fn test_export_default_is_omitted() {
    let decl = json!({
        "type": "ExportDefaultDeclaration",
        "declaration": class("Foo", vec![])
    });
    assert_eq!(emit(decl), None);
}

#[test]
fn test_decorator_comments_are_used_when_member_has_none() {
    let mut run = method("run", "method", vec![], Some(kw("VoidTypeAnnotation")));
    run["decorators"] = json!([{
        "type": "Decorator",
        "leadingComments": [{ "type": "CommentLine", "value": " note" }]
    }]);
    let decl = class("Foo", vec![run]);
    assert_eq!(
        emit(decl).as_deref(),
        Some("class Foo {\n  \n  // note\n  run(): void;\n}")
    );
}

#[test]
fn test_unsupported_annotation_is_an_error() {
    let decl = export(json!({
        "type": "VariableDeclaration",
        "kind": "let",
        "declarations": [{
            "type": "VariableDeclarator",
            "id": typed("x", kw("TypeofTypeAnnotation"))
        }]
    }));
    let err = emit_with(decl, &EmitOptions::default()).unwrap_err();
    assert_eq!(
        err,
        EmitError::UnsupportedTypeAnnotation {
            kind: "TypeofTypeAnnotation".to_string()
        }
    );
}
