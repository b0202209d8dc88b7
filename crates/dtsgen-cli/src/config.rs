//! Config file loading and merging with CLI flags.
//!
//! The config file is JSON with camelCase keys, either bare or nested under
//! a `dts` key:
//!
//! ```json
//! { "dts": { "packageName": "acme", "typings": "typings", "suppressComments": true } }
//! ```
//!
//! Every key is optional. Flags given on the command line win over the file.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use dtsgen_emitter::{DEFAULT_IGNORE_MEMBERS, EmitOptions, MemberFilter};

use crate::args::CliArgs;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DtsConfig {
    pub package_name: Option<String>,
    pub module_root: Option<PathBuf>,
    pub typings: Option<PathBuf>,
    pub suppress_module_path: bool,
    pub suppress_comments: bool,
    pub suppress_ambient_declaration: bool,
    pub mark_unspecified_as_optional: bool,
    pub ignore_members: String,
    pub ignore_empty_interfaces: bool,
    pub ignore_empty_classes: bool,
    pub dry_run: bool,
}

impl Default for DtsConfig {
    fn default() -> Self {
        Self {
            package_name: None,
            module_root: None,
            typings: None,
            suppress_module_path: false,
            suppress_comments: false,
            suppress_ambient_declaration: false,
            mark_unspecified_as_optional: false,
            ignore_members: DEFAULT_IGNORE_MEMBERS.to_string(),
            ignore_empty_interfaces: true,
            ignore_empty_classes: false,
            dry_run: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    Nested { dts: DtsConfig },
    Bare(DtsConfig),
}

/// Settings for one driver run, after merging and validation.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub package_name: String,
    pub module_root: PathBuf,
    pub typings: PathBuf,
    pub dry_run: bool,
    pub emit: EmitOptions,
}

pub fn parse_config(source: &str) -> Result<DtsConfig> {
    let file: ConfigFile =
        serde_json::from_str(source).context("failed to parse dtsgen config JSON")?;
    Ok(match file {
        ConfigFile::Nested { dts } | ConfigFile::Bare(dts) => dts,
    })
}

pub fn load_config(path: &Path) -> Result<DtsConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

impl DtsConfig {
    /// Overlay command-line flags. Boolean flags can only switch options on.
    pub fn merge_args(mut self, args: &CliArgs) -> Self {
        if let Some(package_name) = &args.package_name {
            self.package_name = Some(package_name.clone());
        }
        if let Some(module_root) = &args.module_root {
            self.module_root = Some(module_root.clone());
        }
        if let Some(typings) = &args.typings {
            self.typings = Some(typings.clone());
        }
        if let Some(ignore_members) = &args.ignore_members {
            self.ignore_members = ignore_members.clone();
        }
        self.suppress_module_path |= args.suppress_module_path;
        self.suppress_comments |= args.suppress_comments;
        self.suppress_ambient_declaration |= args.suppress_ambient_declaration;
        self.mark_unspecified_as_optional |= args.mark_unspecified_as_optional;
        self.dry_run |= args.dry_run;
        self
    }

    /// Validate and build the run settings. The exclusion pattern is
    /// compiled here so a bad pattern fails before any file is read.
    pub fn resolve(self) -> Result<ResolvedConfig> {
        let Some(package_name) = self.package_name.filter(|name| !name.is_empty()) else {
            bail!("a package name is required (--package-name or `packageName` in the config)");
        };
        let filter = if self.ignore_members.is_empty() {
            MemberFilter::None
        } else {
            MemberFilter::pattern(&self.ignore_members)
                .context("invalid `ignoreMembers` pattern")?
        };
        let emit = EmitOptions::new()
            .suppress_module_path(self.suppress_module_path)
            .suppress_comments(self.suppress_comments)
            .suppress_ambient_declaration(self.suppress_ambient_declaration)
            .mark_unspecified_as_optional(self.mark_unspecified_as_optional)
            .member_filter(filter)
            .ignore_empty_interfaces(self.ignore_empty_interfaces)
            .ignore_empty_classes(self.ignore_empty_classes);

        Ok(ResolvedConfig {
            package_name,
            module_root: self.module_root.unwrap_or_else(|| PathBuf::from(".")),
            typings: self.typings.unwrap_or_else(|| PathBuf::from(".")),
            dry_run: self.dry_run,
            emit,
        })
    }
}
