//! Remediation suggestions derived from diagnostics.
//!
//! A second table matches substrings of each diagnostic's own lower-cased
//! text, first match wins, with a generic catch-all. Note the table keys off
//! the diagnostic wording, not the original log: the permission-denied
//! diagnostic has no dedicated entry here and deliberately falls through to
//! the generic fix, matching the upstream heuristic.

/// One fix rule: any needle present in the lower-cased diagnostic selects
/// the fix.
#[derive(Debug)]
pub struct FixRule {
    pub needles: &'static [&'static str],
    pub fix: &'static str,
}

/// Fix rules, in match order.
pub const FIX_RULES: &[FixRule] = &[
    FixRule {
        needles: &["missing python package", "modulenotfounderror"],
        fix: "Add the missing package to requirements.txt; ensure correct package \
              name/version; then redeploy.",
    },
    FixRule {
        needles: &["syntaxerror"],
        fix: "Open the file and inspect the indicated line number for syntax issues; run \
              `python -m pyflakes <file>` or `python -m py_compile <file>` locally.",
    },
    FixRule {
        needles: &["pip install failure"],
        fix: "Pin dependency versions in requirements.txt, try `pip wheel` for heavy \
              packages, or add system dependencies in your Render build script.",
    },
    FixRule {
        needles: &["out of memory"],
        fix: "Use smaller build, split heavy dependencies, or upgrade Render plan. \
              Add swap in build stage if possible.",
    },
];

/// Fix suggested when no rule matches the diagnostic.
pub const GENERIC_FIX: &str = "Inspect logs, confirm environment variables, and retry the build.";

/// Select the fix for a single diagnostic.
pub fn suggest_fix(diagnostic: &str) -> &'static str {
    let lowered = diagnostic.to_lowercase();
    FIX_RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|needle| lowered.contains(needle)))
        .map_or(GENERIC_FIX, |rule| rule.fix)
}

/// Map each diagnostic to its fix. Output order and length mirror the input.
pub fn suggest_fixes(diagnostics: &[String]) -> Vec<String> {
    diagnostics
        .iter()
        .map(|d| suggest_fix(d).to_string())
        .collect()
}
