//! Option-to-command compiler.
//!
//! Turns a [`ScanOptions`] record into a single sqlmap command line. The
//! mapping is pure and total: the same options always produce the same
//! bytes, and absent or blank fields are omitted rather than rejected.

pub mod enhance;
pub mod rules;

pub use enhance::{payload_variants, tamper_for, STEALTH_SUFFIX, WAF_BYPASS_SUFFIX};
pub use rules::{Clause, Rule, RULES};

use crate::options::ScanOptions;

/// Fixed command every compiled line starts with
pub const INVOCATION_PREFIX: &str = r"python .\sqlmap.py";

/// Compile options into a command line.
///
/// # Examples
/// ```
/// use sqlmapgen::compiler::compile;
/// use sqlmapgen::options::ScanOptions;
///
/// let options = ScanOptions::for_url("http://shop.test/item?id=5");
/// assert_eq!(
///     compile(&options),
///     r#"python .\sqlmap.py -u "http://shop.test/item?id=5""#
/// );
/// ```
pub fn compile(options: &ScanOptions) -> String {
    let mut command = String::from(INVOCATION_PREFIX);
    for rule in RULES.iter().filter(|rule| rule.applies(options)) {
        command.push(' ');
        command.push_str(&rule.render(options));
    }
    command
}

/// Clauses that `compile` would emit for these options, in emission order
pub fn emitted_clauses(options: &ScanOptions) -> Vec<Clause> {
    RULES
        .iter()
        .filter(|rule| rule.applies(options))
        .map(|rule| rule.clause)
        .collect()
}

/// Number of characters in a command, as shown next to the preview
pub fn char_count(command: &str) -> usize {
    command.chars().count()
}
