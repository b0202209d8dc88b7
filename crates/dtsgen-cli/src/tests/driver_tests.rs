use super::driver::{discover_inputs, module_id, output_path};
use std::path::{Path, PathBuf};

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, "{}").expect("write file");
}

#[test]
fn test_module_id_strips_json_and_js_extensions() {
    let id = module_id("acme", Path::new("ast"), Path::new("ast/util/strings.js.json"))
        .expect("module id");
    assert_eq!(id, "acme/util/strings");

    let id = module_id("acme", Path::new("ast"), Path::new("ast/index.json")).expect("module id");
    assert_eq!(id, "acme/index");
}

#[test]
fn test_module_id_with_current_dir_root() {
    let id = module_id("pkg", Path::new("."), Path::new("./a/b.json")).expect("module id");
    assert_eq!(id, "pkg/a/b");
}

#[test]
fn test_module_id_outside_root_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path().join("root");
    let outside = dir.path().join("other/a.json");
    std::fs::create_dir_all(&root).expect("create root");
    touch(&outside);
    let err = module_id("acme", &root, &outside).unwrap_err();
    assert!(err.to_string().contains("outside the module root"), "{err}");
}

#[test]
fn test_output_path_mirrors_module_id() {
    assert_eq!(
        output_path(Path::new("typings"), "acme/util/strings"),
        PathBuf::from("typings/acme/util/strings.d.ts")
    );
}

#[test]
fn test_discover_inputs_walks_directories_for_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    touch(&root.join("b.json"));
    touch(&root.join("nested/a.json"));
    touch(&root.join("nested/readme.md"));
    let explicit = root.join("b.json");

    let files = discover_inputs(&[root.to_path_buf(), explicit.clone()]).expect("discover");
    assert_eq!(files, vec![explicit, root.join("nested/a.json")]);
}

#[test]
fn test_discover_inputs_rejects_missing_paths() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.json");
    let err = discover_inputs(&[missing]).unwrap_err();
    assert!(err.to_string().contains("input not found"), "{err}");
}
