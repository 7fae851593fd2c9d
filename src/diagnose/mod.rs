//! Heuristic diagnosis of build logs.
//!
//! A fixed ordered rule table of substring predicates is evaluated against
//! the lower-cased log text. Every matching rule contributes its diagnostic;
//! rules are independent and never short-circuit. Rules are data so they can
//! be tested apart from any control flow. This is a placeholder heuristic;
//! deeper analysis is deferred to a future model-backed diagnoser.

pub mod fixes;

/// One diagnosis rule.
///
/// `clauses` is a conjunction of disjunctions over the lower-cased log
/// text: every clause must match, and a clause matches when any one of its
/// needles occurs as a substring.
#[derive(Debug)]
pub struct Rule {
    pub clauses: &'static [&'static [&'static str]],
    pub diagnostic: &'static str,
}

impl Rule {
    fn matches(&self, lowered: &str) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|needle| lowered.contains(needle)))
    }
}

/// Diagnosis rules, in evaluation order.
///
/// The two ModuleNotFoundError spellings (one with a stray space) are both
/// checked, matching the upstream heuristic verbatim.
pub const RULES: &[Rule] = &[
    Rule {
        clauses: &[&["module not founderror", "modulenotfounderror"]],
        diagnostic: "ModuleNotFoundError detected - missing Python package. \
                     Add the missing package to requirements.txt and redeploy.",
    },
    Rule {
        clauses: &[&["syntaxerror"]],
        diagnostic: "SyntaxError detected - check indentation, parentheses or invalid syntax \
                     in the mentioned file and line number.",
    },
    Rule {
        clauses: &[&["pip install"], &["failed", "error"]],
        diagnostic: "pip install failure - try pinning dependency versions or increasing \
                     build resources. Check wheels vs source build.",
    },
    Rule {
        clauses: &[&["permission denied"]],
        diagnostic: "Permission denied - check file permissions and user running the build step.",
    },
    Rule {
        clauses: &[&["out of memory", "oom"]],
        diagnostic: "Out of memory - build is exceeding memory limits; \
                     try smaller build or increase plan.",
    },
];

/// Diagnostic returned when no rule matches. The result is never empty.
pub const FALLBACK_DIAGNOSTIC: &str =
    "No obvious pattern detected. Consider sharing a larger snippet of the build log \
     or running the build locally for step-by-step debugging.";

/// Render a human-readable triage report for log text: one
/// diagnosis/fix pair per matched rule.
pub fn report(log_text: &str) -> String {
    let diagnostics = diagnose(log_text);
    let suggested = fixes::suggest_fixes(&diagnostics);

    let mut out = String::new();
    for (diagnostic, fix) in diagnostics.iter().zip(&suggested) {
        out.push_str(&format!("diagnosis: {diagnostic}\n"));
        out.push_str(&format!("      fix: {fix}\n\n"));
    }
    out
}

/// Scan log text and return every matching diagnostic, in rule order.
///
/// Pure function of its input; no I/O. Falls back to a single generic
/// diagnostic when nothing matches.
pub fn diagnose(log_text: &str) -> Vec<String> {
    let lowered = log_text.to_lowercase();

    let mut diagnostics: Vec<String> = RULES
        .iter()
        .filter(|rule| rule.matches(&lowered))
        .map(|rule| rule.diagnostic.to_string())
        .collect();

    if diagnostics.is_empty() {
        diagnostics.push(FALLBACK_DIAGNOSTIC.to_string());
    }

    diagnostics
}
