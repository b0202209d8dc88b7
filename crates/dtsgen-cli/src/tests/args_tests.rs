use super::args::CliArgs;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parses_inputs_and_naming_options() {
    let args = CliArgs::try_parse_from([
        "dtsgen",
        "--package-name",
        "acme",
        "--module-root",
        "ast",
        "--typings",
        "typings",
        "ast/a.json",
        "ast/nested",
    ])
    .expect("arguments should parse");
    assert_eq!(args.package_name.as_deref(), Some("acme"));
    assert_eq!(args.module_root, Some(PathBuf::from("ast")));
    assert_eq!(args.typings, Some(PathBuf::from("typings")));
    assert_eq!(
        args.inputs,
        vec![PathBuf::from("ast/a.json"), PathBuf::from("ast/nested")]
    );
    assert!(!args.dry_run);
    assert!(!args.suppress_comments);
}

#[test]
fn test_parses_flags_and_camel_case_aliases() {
    let args = CliArgs::try_parse_from([
        "dtsgen",
        "--suppress-module-path",
        "--suppressComments",
        "--suppress-ambient-declaration",
        "--markUnspecifiedAsOptional",
        "--dry-run",
        "--ignore-members",
        "^internal",
        "-c",
        "dtsgen.json",
        "a.json",
    ])
    .expect("arguments should parse");
    assert!(args.suppress_module_path);
    assert!(args.suppress_comments);
    assert!(args.suppress_ambient_declaration);
    assert!(args.mark_unspecified_as_optional);
    assert!(args.dry_run);
    assert_eq!(args.ignore_members.as_deref(), Some("^internal"));
    assert_eq!(args.config, Some(PathBuf::from("dtsgen.json")));
}

#[test]
fn test_inputs_are_required() {
    assert!(CliArgs::try_parse_from(["dtsgen", "--package-name", "acme"]).is_err());
}
