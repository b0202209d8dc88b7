use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the dtsgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "dtsgen",
    version,
    about = "Generate TypeScript declaration files from Babel/Flow AST dumps"
)]
pub struct CliArgs {
    /// AST JSON files, or directories searched recursively for `*.json`.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// JSON config file with dtsgen options.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Module Naming ====================
    /// Package root name; every module id starts with it.
    #[arg(long = "package-name", alias = "packageName")]
    pub package_name: Option<String>,

    /// Directory module ids are computed relative to.
    #[arg(long = "module-root", alias = "moduleRoot")]
    pub module_root: Option<PathBuf>,

    /// Output directory for generated `.d.ts` files.
    #[arg(long)]
    pub typings: Option<PathBuf>,

    // ==================== Output Shape ====================
    /// Regular expression for member names to leave out.
    #[arg(long = "ignore-members", alias = "ignoreMembers")]
    pub ignore_members: Option<String>,

    /// Name each ambient module after the package instead of the module id.
    #[arg(long = "suppress-module-path", alias = "suppressModulePath")]
    pub suppress_module_path: bool,

    /// Drop leading comments from the output.
    #[arg(long = "suppress-comments", alias = "suppressComments")]
    pub suppress_comments: bool,

    /// Emit declarations without the `declare module '...'` wrapper.
    #[arg(
        long = "suppress-ambient-declaration",
        alias = "suppressAmbientDeclaration"
    )]
    pub suppress_ambient_declaration: bool,

    /// Mark trailing parameters without a type annotation as optional.
    #[arg(
        long = "mark-unspecified-as-optional",
        alias = "markUnspecifiedAsOptional"
    )]
    pub mark_unspecified_as_optional: bool,

    /// Generate and print declarations without writing any files.
    #[arg(long = "dry-run", alias = "dryRun")]
    pub dry_run: bool,
}
