//! Transform driver
//!
//! Runs alias resolution and the rewrite rules, in order, over one
//! program's top-level statements.

use crate::analysis::AliasResolver;
use crate::error::Result;
use crate::names::{MANIFEST_SYMBOL, ROOT_NAMESPACE};
use crate::options::TransformOptions;
use crate::rewrite::{ExportRewriter, ImportCallRewriter, LazyGetterRewriter, RuleKind};
use jsm_ast::Program;
use tracing::info;

/// One applied rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRewrite {
    pub rule: RuleKind,
    /// Output specifier for imports, bound name for getters and exports
    pub subject: String,
    /// The statement was removed rather than replaced
    pub removed: bool,
}

/// Summary of one transform invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Root namespace aliases, the root included
    pub aliases: Vec<String>,
    /// Aliases of the `utils` sub-namespace
    pub utils_aliases: Vec<String>,
    /// Rewrites in the order they were applied
    pub rewrites: Vec<AppliedRewrite>,
    /// Names in the assembled `module.exports`
    pub exports: Vec<String>,
}

impl TransformReport {
    fn record<I>(&mut self, rule: RuleKind, subjects: I, removed: bool)
    where
        I: IntoIterator<Item = String>,
    {
        self.rewrites
            .extend(subjects.into_iter().map(|subject| AppliedRewrite {
                rule,
                subject,
                removed,
            }));
    }

    /// Number of rewrites applied by `rule`
    pub fn count(&self, rule: RuleKind) -> usize {
        self.rewrites.iter().filter(|r| r.rule == rule).count()
    }

    /// No statement was touched
    pub fn is_unchanged(&self) -> bool {
        self.rewrites.is_empty() && self.exports.is_empty()
    }
}

/// JSM to CommonJS transformer
///
/// Holds configuration only. Alias sets and the export manifest live for a
/// single [`Transformer::transform`] call, so one transformer can be reused
/// across files.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    /// Create a transformer with default options
    pub fn new() -> Self {
        Self::with_options(TransformOptions::default())
    }

    /// Create a transformer with custom options
    pub fn with_options(options: TransformOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Rewrite `program` in place
    ///
    /// Fails without modifying the program when the export manifest is
    /// malformed.
    pub fn transform(&self, program: &mut Program) -> Result<TransformReport> {
        let exporter = ExportRewriter::new();
        let manifest = exporter.collect_manifest(&program.body)?;

        let resolver = AliasResolver::new(&program.body);
        let aliases = resolver.resolve_aliases(ROOT_NAMESPACE);
        let utils_aliases = resolver.resolve_utils_aliases(&aliases);

        let mut report = TransformReport {
            aliases: aliases.iter().map(String::from).collect(),
            utils_aliases: utils_aliases.iter().map(String::from).collect(),
            ..Default::default()
        };

        let imports = ImportCallRewriter::new(&aliases, &utils_aliases, &self.options)
            .rewrite(&mut program.body);
        report.record(
            RuleKind::ImportCallBinding,
            imports.into_iter().map(|binding| binding.specifier),
            false,
        );

        let getters = LazyGetterRewriter::new(&self.options).rewrite(&mut program.body);
        report.record(
            RuleKind::LazyGetterCall,
            getters.into_iter().map(|getter| getter.name),
            false,
        );

        let outcome = exporter.rewrite(&mut program.body);
        report.record(
            RuleKind::ExportCapture,
            std::iter::repeat(MANIFEST_SYMBOL.to_string()).take(outcome.captures_removed),
            true,
        );
        report.record(RuleKind::SelfExportAssignment, outcome.converted, false);
        report.record(RuleKind::SelfExportAssignment, outcome.dropped, true);

        if let Some(assembly) = manifest.assembly_statement() {
            program.body.push(assembly);
        }
        report.exports = manifest.into_names();

        info!(
            imports = report.count(RuleKind::ImportCallBinding),
            getters = report.count(RuleKind::LazyGetterCall),
            self_exports = report.count(RuleKind::SelfExportAssignment),
            exports = report.exports.len(),
            "transformed program"
        );
        Ok(report)
    }
}
