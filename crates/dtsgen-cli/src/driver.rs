//! Per-file generation: read the AST dump, collect the module's statements,
//! generate its declarations and write them under the typings directory.
//!
//! Files are independent. A file that fails is recorded in the
//! [`RunReport`] and the run continues with the next one.

use anyhow::{Context, Result, bail};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, info_span};
use walkdir::WalkDir;

use dtsgen_ast::{collect_module, parse_program};
use dtsgen_emitter::{ModuleInput, generate};

use crate::config::ResolvedConfig;

/// Declarations generated for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub input: PathBuf,
    pub module_id: String,
    pub output_path: PathBuf,
    pub text: String,
}

#[derive(Debug)]
pub struct ModuleFailure {
    pub input: PathBuf,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub generated: Vec<GeneratedModule>,
    pub failures: Vec<ModuleFailure>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Expand the command-line inputs into the list of AST files to process.
/// Directories are walked recursively for `*.json`; files are taken as
/// given. The result is sorted and free of duplicates.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input not found: {}", input.display());
        }
        for entry in WalkDir::new(input).follow_links(true) {
            let entry =
                entry.with_context(|| format!("failed to walk directory {}", input.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// `{package}/{path relative to module root}` with the `.json` and `.js`
/// extensions removed and `/` as separator.
pub fn module_id(package_name: &str, module_root: &Path, file: &Path) -> Result<String> {
    let relative = match file.strip_prefix(module_root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => {
            let root = std::fs::canonicalize(module_root).with_context(|| {
                format!("failed to resolve module root {}", module_root.display())
            })?;
            let file = std::fs::canonicalize(file)
                .with_context(|| format!("failed to resolve input {}", file.display()))?;
            match file.strip_prefix(&root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => bail!(
                    "{} is outside the module root {}",
                    file.display(),
                    root.display()
                ),
            }
        }
    };

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => bail!("unexpected path component in {}", relative.display()),
        }
    }
    let Some(last) = segments.pop() else {
        bail!("{} does not name a file under the module root", file.display());
    };
    let stem = last.strip_suffix(".json").unwrap_or(&last);
    let stem = stem.strip_suffix(".js").unwrap_or(stem);
    segments.push(stem.to_string());

    Ok(format!("{package_name}/{}", segments.join("/")))
}

/// `{typings}/{module_id}.d.ts`
pub fn output_path(typings: &Path, module_id: &str) -> PathBuf {
    typings.join(format!("{module_id}.d.ts"))
}

/// Generate the declaration document for one AST file without writing it.
pub fn generate_file(config: &ResolvedConfig, input: &Path) -> Result<GeneratedModule> {
    let module_id = module_id(&config.package_name, &config.module_root, input)?;
    let _span = info_span!("module", id = module_id.as_str()).entered();

    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let program = parse_program(&source)
        .with_context(|| format!("failed to parse AST JSON: {}", input.display()))?;
    let collected = collect_module(&program);
    debug!(
        imports = collected.imports.len(),
        interfaces = collected.interfaces.len(),
        exports = collected.exports.len(),
        "collected module statements"
    );

    let module = ModuleInput::new(&module_id, &config.package_name, collected);
    let text = generate(&module, &config.emit)
        .with_context(|| format!("failed to generate declarations for {module_id}"))?;

    Ok(GeneratedModule {
        input: input.to_path_buf(),
        output_path: output_path(&config.typings, &module_id),
        module_id,
        text,
    })
}

pub fn write_module(module: &GeneratedModule) -> Result<()> {
    if let Some(parent) = module.output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&module.output_path, &module.text)
        .with_context(|| format!("failed to write {}", module.output_path.display()))?;
    info!(path = %module.output_path.display(), "wrote declarations");
    Ok(())
}

/// Process every input. Nothing is written in dry-run mode.
pub fn run(config: &ResolvedConfig, inputs: &[PathBuf]) -> RunReport {
    let mut report = RunReport::default();
    for input in inputs {
        let result = generate_file(config, input).and_then(|module| {
            if !config.dry_run {
                write_module(&module)?;
            }
            Ok(module)
        });
        match result {
            Ok(module) => report.generated.push(module),
            Err(error) => report.failures.push(ModuleFailure {
                input: input.clone(),
                error,
            }),
        }
    }
    info!(
        generated = report.generated.len(),
        failed = report.failures.len(),
        "run finished"
    );
    report
}
