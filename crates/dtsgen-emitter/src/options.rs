//! Options for one module's declaration emission.

use crate::filter::MemberFilter;
use crate::printer::PrinterOptions;

#[derive(Clone, Debug)]
pub struct EmitOptions {
    /// Name the ambient module after the package root instead of the module id.
    pub(crate) suppress_module_path: bool,
    pub(crate) suppress_comments: bool,
    /// Render trailing untyped parameters as optional.
    pub(crate) mark_unspecified_as_optional: bool,
    /// Emit children bare instead of inside `declare module '...' { }`.
    pub(crate) suppress_ambient_declaration: bool,
    pub(crate) member_filter: MemberFilter,
    /// Drop interfaces with no members and no bases.
    pub(crate) ignore_empty_interfaces: bool,
    /// Drop classes with no members.
    pub(crate) ignore_empty_classes: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            suppress_module_path: false,
            suppress_comments: false,
            mark_unspecified_as_optional: false,
            suppress_ambient_declaration: false,
            member_filter: MemberFilter::default(),
            ignore_empty_interfaces: true,
            ignore_empty_classes: false,
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppress_module_path(mut self, value: bool) -> Self {
        self.suppress_module_path = value;
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

    pub fn member_filter(mut self, filter: MemberFilter) -> Self {
        self.member_filter = filter;
        self
    }

    pub fn ignore_empty_interfaces(mut self, value: bool) -> Self {
        self.ignore_empty_interfaces = value;
        self
    }

    pub fn ignore_empty_classes(mut self, value: bool) -> Self {
        self.ignore_empty_classes = value;
        self
    }

    pub fn filter(&self) -> &MemberFilter {
        &self.member_filter
    }

    /// Rendering half of these options.
    pub fn printer_options(&self) -> PrinterOptions {
        PrinterOptions::new()
            .suppress_comments(self.suppress_comments)
            .mark_unspecified_as_optional(self.mark_unspecified_as_optional)
            .suppress_ambient_declaration(self.suppress_ambient_declaration)
    }
}
