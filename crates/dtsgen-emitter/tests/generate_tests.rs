//! End-to-end tests: Babel AST JSON in, declaration document out

use dtsgen_ast::{collect_module, parse_program};
use dtsgen_emitter::{EmitError, EmitOptions, MemberFilter, ModuleInput, generate};
use indoc::indoc;
use serde_json::{Value, json};

fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn typed(name: &str, ty: Value) -> Value {
    json!({
        "type": "Identifier",
        "name": name,
        "typeAnnotation": { "type": "TypeAnnotation", "typeAnnotation": ty }
    })
}

fn kw(kind: &str) -> Value {
    json!({ "type": kind })
}

fn generic(name: &str) -> Value {
    json!({ "type": "GenericTypeAnnotation", "id": ident(name) })
}

fn program(body: Vec<Value>) -> String {
    json!({
        "type": "File",
        "program": { "type": "Program", "sourceType": "module", "body": body }
    })
    .to_string()
}

fn run(json: &str, module_id: &str, options: &EmitOptions) -> Result<String, EmitError> {
    let program = parse_program(json).expect("program should parse");
    let input = ModuleInput::new(module_id, "acme", collect_module(&program));
    generate(&input, options)
}

fn callback_member(name: &str) -> Value {
    json!({
        "type": "ObjectTypeProperty",
        "key": ident(name),
        "value": {
            "type": "FunctionTypeAnnotation",
            "params": [{
                "type": "FunctionTypeParam",
                "name": ident("result"),
                "typeAnnotation": kw("AnyTypeAnnotation"),
                "optional": false
            }],
            "rest": null,
            "returnType": generic("Promise"),
            "typeParameters": null
        },
        "optional": false,
        "static": false
    })
}

/// ```js
/// interface INext {
///   (): Promise;
///   cancel: (result: any) => Promise;
///   reject: (result: any) => Promise;
///   complete: (result: any) => Promise;
/// }
///
/// export class Foo {
///   run(instruction: number, next: INext): void {}
/// }
/// ```
fn function_object_hybrid() -> String {
    program(vec![
        json!({
            "type": "InterfaceDeclaration",
            "start": 0,
            "end": 150,
            "id": ident("INext"),
            "typeParameters": null,
            "extends": [],
            "body": {
                "type": "ObjectTypeAnnotation",
                "properties": [
                    callback_member("cancel"),
                    callback_member("reject"),
                    callback_member("complete")
                ],
                "indexers": [],
                "callProperties": [{
                    "type": "ObjectTypeCallProperty",
                    "value": {
                        "type": "FunctionTypeAnnotation",
                        "params": [],
                        "returnType": generic("Promise")
                    },
                    "static": false
                }]
            }
        }),
        json!({
            "type": "ExportNamedDeclaration",
            "start": 152,
            "end": 230,
            "declaration": {
                "type": "ClassDeclaration",
                "start": 159,
                "end": 230,
                "id": ident("Foo"),
                "superClass": null,
                "body": {
                    "type": "ClassBody",
                    "body": [{
                        "type": "ClassMethod",
                        "kind": "method",
                        "key": ident("run"),
                        "computed": false,
                        "static": false,
                        "params": [
                            typed("instruction", kw("NumberTypeAnnotation")),
                            typed("next", generic("INext"))
                        ],
                        "returnType": {
                            "type": "TypeAnnotation",
                            "typeAnnotation": kw("VoidTypeAnnotation")
                        },
                        "body": { "type": "BlockStatement", "body": [] }
                    }]
                }
            },
            "specifiers": [],
            "source": null
        }),
    ])
}

#[test]
fn test_function_object_hybrid_interface() {
    let options = EmitOptions::new().suppress_module_path(true);
    let output = run(&function_object_hybrid(), "acme/hybrid", &options).unwrap();
    let expected = indoc! {"
        declare module 'acme' {
          export interface INext {
            cancel(result: any): Promise;
            reject(result: any): Promise;
            complete(result: any): Promise;
            (): Promise;
          }
          export class Foo {
            run(instruction: number, next: INext): void;
          }
        }
    "};
    assert_eq!(output, expected);
}

#[test]
fn test_module_is_named_after_module_id_by_default() {
    let output = run(&function_object_hybrid(), "acme/hybrid", &EmitOptions::new()).unwrap();
    assert!(
        output.starts_with("declare module 'acme/hybrid' {\n"),
        "unexpected header: {output}"
    );
}

/// ```js
/// /**
///   * comment one
///   */
/// export * from 'a';
/// // comment three
/// export const foo = 7;
/// ```
fn commented_exports() -> String {
    program(vec![
        json!({
            "type": "ExportAllDeclaration",
            "leadingComments": [
                { "type": "CommentBlock", "value": "*\n  * comment one\n  " }
            ],
            "source": { "type": "StringLiteral", "value": "a" }
        }),
        json!({
            "type": "ExportNamedDeclaration",
            "leadingComments": [{ "type": "CommentLine", "value": " comment three" }],
            "declaration": {
                "type": "VariableDeclaration",
                "kind": "const",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": ident("foo"),
                    "init": { "type": "NumericLiteral", "value": 7 }
                }]
            },
            "specifiers": [],
            "source": null
        }),
    ])
}

#[test]
fn test_comments_are_kept_above_exports() {
    let options = EmitOptions::new().suppress_module_path(true);
    let output = run(&commented_exports(), "acme/comments", &options).unwrap();
    let expected = [
        "declare module 'acme' {",
        "  ",
        "  /**",
        "    * comment one",
        "    */",
        "  export * from 'a';",
        "  ",
        "  // comment three",
        "  export const foo: any;",
        "}",
        "",
    ]
    .join("\n");
    assert_eq!(output, expected);
}

#[test]
fn test_suppressed_comments_and_ambient_declaration() {
    let options = EmitOptions::new()
        .suppress_comments(true)
        .suppress_ambient_declaration(true);
    let output = run(&commented_exports(), "acme/comments", &options).unwrap();
    assert_eq!(output, "export * from 'a';\nexport const foo: any;\n");
}

#[test]
fn test_imports_come_first_and_are_rewritten() {
    let json = program(vec![
        json!({
            "type": "ExportNamedDeclaration",
            "declaration": {
                "type": "VariableDeclaration",
                "kind": "let",
                "declarations": [{ "type": "VariableDeclarator", "id": ident("bar") }]
            },
            "specifiers": [],
            "source": null
        }),
        json!({
            "type": "ImportDeclaration",
            "specifiers": [{
                "type": "ImportSpecifier",
                "imported": ident("Logger"),
                "local": ident("Logger")
            }],
            "source": { "type": "StringLiteral", "value": "./logging" }
        }),
    ]);
    let output = run(&json, "acme/app", &EmitOptions::new()).unwrap();
    let expected = indoc! {"
        declare module 'acme/app' {
          import {Logger} from 'acme/logging';
          export let bar: any;
        }
    "};
    assert_eq!(output, expected);
}

#[test]
fn test_trailing_untyped_params_are_optional_when_enabled() {
    let json = program(vec![json!({
        "type": "ExportNamedDeclaration",
        "declaration": {
            "type": "FunctionDeclaration",
            "id": ident("f"),
            "params": [typed("a", kw("NumberTypeAnnotation")), ident("b"), ident("c")],
            "returnType": null
        },
        "specifiers": [],
        "source": null
    })]);
    let options = EmitOptions::new()
        .mark_unspecified_as_optional(true)
        .suppress_ambient_declaration(true);
    let output = run(&json, "acme/f", &options).unwrap();
    assert_eq!(output, "export function f(a: number, b?: any, c?: any);\n");
}

#[test]
fn test_untyped_rest_parameter_is_any() {
    let rest = |argument: Value, annotation: Option<Value>| {
        let annotation = match annotation {
            Some(ty) => json!({ "type": "TypeAnnotation", "typeAnnotation": ty }),
            None => Value::Null,
        };
        json!({ "type": "RestElement", "argument": argument, "typeAnnotation": annotation })
    };
    let string_array = json!({
        "type": "ArrayTypeAnnotation",
        "elementType": kw("StringTypeAnnotation")
    });
    let json = program(vec![
        json!({
            "type": "ExportNamedDeclaration",
            "declaration": {
                "type": "FunctionDeclaration",
                "id": ident("g"),
                "params": [rest(ident("rest"), None)]
            },
            "specifiers": [],
            "source": null
        }),
        json!({
            "type": "ExportNamedDeclaration",
            "declaration": {
                "type": "FunctionDeclaration",
                "id": ident("join"),
                "params": [
                    typed("sep", generic("Separator")),
                    rest(ident("parts"), Some(string_array))
                ],
                "returnType": { "type": "TypeAnnotation", "typeAnnotation": kw("StringTypeAnnotation") }
            },
            "specifiers": [],
            "source": null
        }),
    ]);
    let options = EmitOptions::new().suppress_ambient_declaration(true);
    let output = run(&json, "acme/rest", &options).unwrap();
    assert_eq!(
        output,
        "export function g(...rest: any);\nexport function join(sep: Separator, ...parts: string[]): string;\n"
    );
}

#[test]
fn test_private_members_are_filtered_end_to_end() {
    let member = |name: &str| {
        json!({
            "type": "ClassProperty",
            "key": ident(name),
            "typeAnnotation": null,
            "static": false
        })
    };
    let json = program(vec![json!({
        "type": "ExportNamedDeclaration",
        "declaration": {
            "type": "ClassDeclaration",
            "id": ident("Holder"),
            "superClass": null,
            "body": { "type": "ClassBody", "body": [member("_private"), member("public")] }
        },
        "specifiers": [],
        "source": null
    })]);
    let options = EmitOptions::new().suppress_ambient_declaration(true);
    let output = run(&json, "acme/holder", &options).unwrap();
    assert_eq!(output, "export class Holder {\n  public: any;\n}\n");

    let keep_all = options.member_filter(MemberFilter::None);
    let output = run(&json, "acme/holder", &keep_all).unwrap();
    assert_eq!(
        output,
        "export class Holder {\n  _private: any;\n  public: any;\n}\n"
    );
}

#[test]
fn test_unsupported_annotation_fails_the_module() {
    let json = program(vec![
        json!({
            "type": "ExportAllDeclaration",
            "source": { "type": "StringLiteral", "value": "a" }
        }),
        json!({
            "type": "ExportNamedDeclaration",
            "declaration": {
                "type": "FunctionDeclaration",
                "id": ident("g"),
                "params": [typed("x", kw("ExistsTypeAnnotation"))]
            },
            "specifiers": [],
            "source": null
        }),
    ]);
    let err = run(&json, "acme/g", &EmitOptions::new()).unwrap_err();
    assert_eq!(
        err,
        EmitError::UnsupportedTypeAnnotation {
            kind: "ExistsTypeAnnotation".to_string()
        }
    );
}

#[test]
fn test_empty_module() {
    let output = run(&program(vec![]), "acme/empty", &EmitOptions::new()).unwrap();
    assert_eq!(output, "declare module 'acme/empty' {\n}\n");
}

#[test]
fn test_generation_is_deterministic() {
    let options = EmitOptions::new().mark_unspecified_as_optional(true);
    let json = function_object_hybrid();
    let first = run(&json, "acme/hybrid", &options).unwrap();
    let second = run(&json, "acme/hybrid", &options).unwrap();
    assert_eq!(first, second);
}
