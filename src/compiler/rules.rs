//! Ordered emission table.
//!
//! Each rule pairs a predicate with a renderer. `compile` walks `RULES`
//! front to back, so the position of a rule in the table is the position
//! of its flag in the command line.

use super::enhance::{tamper_for, STEALTH_SUFFIX, WAF_BYPASS_SUFFIX};
use crate::options::{
    ScanOptions, Technique, UserAgentMode, DEFAULT_LEVEL, DEFAULT_RETRIES, DEFAULT_RISK,
    DEFAULT_THREADS, DEFAULT_TIMEOUT,
};

/// Identifies which part of the command a rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Url,
    Direct,
    LogFile,
    BulkFile,
    RequestFile,
    UserAgent,
    Method,
    Data,
    Cookie,
    Headers,
    Level,
    Risk,
    Technique,
    Enumeration,
    Database,
    Table,
    Threads,
    Delay,
    Timeout,
    Retries,
    Batch,
    RandomAgent,
    Tor,
    CheckTor,
    SmartPayloads,
    WafBypass,
    StealthMode,
}

/// A single (predicate, renderer) pair
pub struct Rule {
    pub clause: Clause,
    applies: fn(&ScanOptions) -> bool,
    render: fn(&ScanOptions) -> String,
}

impl Rule {
    const fn new(
        clause: Clause,
        applies: fn(&ScanOptions) -> bool,
        render: fn(&ScanOptions) -> String,
    ) -> Self {
        Self { clause, applies, render }
    }

    pub fn applies(&self, options: &ScanOptions) -> bool {
        (self.applies)(options)
    }

    /// Render the fragment; only meaningful when `applies` returned true
    pub fn render(&self, options: &ScanOptions) -> String {
        (self.render)(options)
    }
}

pub static RULES: &[Rule] = &[
    Rule::new(
        Clause::Url,
        |o| text(&o.target.url).is_some(),
        |o| quoted("-u", &o.target.url),
    ),
    Rule::new(
        Clause::Direct,
        |o| text(&o.target.direct).is_some(),
        |o| quoted("-d", &o.target.direct),
    ),
    Rule::new(
        Clause::LogFile,
        |o| text(&o.target.log_file).is_some(),
        |o| quoted("-l", &o.target.log_file),
    ),
    Rule::new(
        Clause::BulkFile,
        |o| text(&o.target.bulk_file).is_some(),
        |o| quoted("-m", &o.target.bulk_file),
    ),
    Rule::new(
        Clause::RequestFile,
        |o| text(&o.target.request_file).is_some(),
        |o| quoted("-r", &o.target.request_file),
    ),
    Rule::new(
        Clause::UserAgent,
        has_user_agent,
        render_user_agent,
    ),
    Rule::new(
        Clause::Method,
        |o| text(&o.request.method).is_some(),
        |o| format!("--method={}", o.request.method.trim()),
    ),
    Rule::new(
        Clause::Data,
        |o| text(&o.request.data).is_some(),
        |o| assigned("--data", &o.request.data),
    ),
    Rule::new(
        Clause::Cookie,
        |o| text(&o.request.cookie).is_some(),
        |o| assigned("--cookie", &o.request.cookie),
    ),
    Rule::new(
        Clause::Headers,
        |o| header_lines(o).next().is_some(),
        render_headers,
    ),
    Rule::new(
        Clause::Level,
        |o| o.detection.level != DEFAULT_LEVEL,
        |o| format!("--level={}", o.detection.level),
    ),
    Rule::new(
        Clause::Risk,
        |o| o.detection.risk != DEFAULT_RISK,
        |o| format!("--risk={}", o.detection.risk),
    ),
    Rule::new(
        Clause::Technique,
        has_partial_techniques,
        render_techniques,
    ),
    Rule::new(
        Clause::Enumeration,
        |o| !o.enumeration.flags.is_empty(),
        render_enumeration,
    ),
    Rule::new(
        Clause::Database,
        |o| text(&o.enumeration.database).is_some(),
        |o| quoted("-D", &o.enumeration.database),
    ),
    Rule::new(
        Clause::Table,
        |o| text(&o.enumeration.table).is_some(),
        |o| quoted("-T", &o.enumeration.table),
    ),
    Rule::new(
        Clause::Threads,
        |o| o.performance.threads != DEFAULT_THREADS,
        |o| format!("--threads={}", o.performance.threads),
    ),
    Rule::new(
        Clause::Delay,
        |o| o.performance.delay.is_some(),
        |o| format!("--delay={}", o.performance.delay.unwrap_or_default()),
    ),
    Rule::new(
        Clause::Timeout,
        |o| o.performance.timeout != DEFAULT_TIMEOUT,
        |o| format!("--timeout={}", o.performance.timeout),
    ),
    Rule::new(
        Clause::Retries,
        |o| o.performance.retries != DEFAULT_RETRIES,
        |o| format!("--retries={}", o.performance.retries),
    ),
    Rule::new(
        Clause::Batch,
        |o| o.performance.batch,
        |_| "--batch".to_string(),
    ),
    Rule::new(
        Clause::RandomAgent,
        |o| o.performance.random_agent,
        |_| "--random-agent".to_string(),
    ),
    Rule::new(
        Clause::Tor,
        |o| o.performance.tor,
        |_| "--tor".to_string(),
    ),
    Rule::new(
        Clause::CheckTor,
        |o| o.performance.check_tor,
        |_| "--check-tor".to_string(),
    ),
    Rule::new(
        Clause::SmartPayloads,
        has_smart_tamper,
        render_smart_tamper,
    ),
    Rule::new(
        Clause::WafBypass,
        |o| o.enhancements.waf_bypass,
        |_| WAF_BYPASS_SUFFIX.to_string(),
    ),
    Rule::new(
        Clause::StealthMode,
        |o| o.enhancements.stealth_mode,
        |_| STEALTH_SUFFIX.to_string(),
    ),
];

/// Trimmed value, or `None` when blank
fn text(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// Values are interpolated verbatim; embedded quotes are not escaped.
fn quoted(flag: &str, value: &str) -> String {
    format!("{} \"{}\"", flag, value.trim())
}

fn assigned(flag: &str, value: &str) -> String {
    format!("{}=\"{}\"", flag, value.trim())
}

fn has_user_agent(options: &ScanOptions) -> bool {
    match options.request.user_agent {
        UserAgentMode::Random | UserAgentMode::Mobile => true,
        UserAgentMode::Custom => text(&options.request.custom_agent).is_some(),
        UserAgentMode::Default => false,
    }
}

fn render_user_agent(options: &ScanOptions) -> String {
    match options.request.user_agent {
        UserAgentMode::Random => "--random-agent".to_string(),
        UserAgentMode::Mobile => "--mobile".to_string(),
        UserAgentMode::Custom => quoted("-A", &options.request.custom_agent),
        UserAgentMode::Default => String::new(),
    }
}

fn header_lines(options: &ScanOptions) -> impl Iterator<Item = &str> {
    options
        .request
        .headers
        .iter()
        .flat_map(|entry| entry.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

fn render_headers(options: &ScanOptions) -> String {
    header_lines(options)
        .map(|line| format!("-H \"{}\"", line))
        .collect::<Vec<_>>()
        .join(" ")
}

// All six is the scanner's implicit default and none selected falls back to
// it as well, so only a strict subset is spelled out.
fn has_partial_techniques(options: &ScanOptions) -> bool {
    let selected = options.detection.techniques.len();
    selected > 0 && selected < Technique::ALL.len()
}

fn render_techniques(options: &ScanOptions) -> String {
    let letters: String = options.detection.techniques.iter().map(|t| t.letter()).collect();
    format!("--technique={}", letters)
}

fn render_enumeration(options: &ScanOptions) -> String {
    options
        .enumeration
        .flags
        .iter()
        .map(|flag| flag.flag())
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_smart_tamper(options: &ScanOptions) -> bool {
    options.enhancements.smart_payloads && tamper_for(options.enhancements.target_type).is_some()
}

fn render_smart_tamper(options: &ScanOptions) -> String {
    tamper_for(options.enhancements.target_type)
        .map(|list| format!("--tamper={}", list))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_documented_sequence() {
        let clauses: Vec<Clause> = RULES.iter().map(|r| r.clause).collect();
        assert_eq!(
            clauses,
            vec![
                Clause::Url,
                Clause::Direct,
                Clause::LogFile,
                Clause::BulkFile,
                Clause::RequestFile,
                Clause::UserAgent,
                Clause::Method,
                Clause::Data,
                Clause::Cookie,
                Clause::Headers,
                Clause::Level,
                Clause::Risk,
                Clause::Technique,
                Clause::Enumeration,
                Clause::Database,
                Clause::Table,
                Clause::Threads,
                Clause::Delay,
                Clause::Timeout,
                Clause::Retries,
                Clause::Batch,
                Clause::RandomAgent,
                Clause::Tor,
                Clause::CheckTor,
                Clause::SmartPayloads,
                Clause::WafBypass,
                Clause::StealthMode,
            ]
        );
    }

    #[test]
    fn test_no_rule_applies_to_defaults() {
        let options = ScanOptions::default();
        assert!(RULES.iter().all(|rule| !rule.applies(&options)));
    }

    #[test]
    fn test_blank_text_is_treated_as_absent() {
        assert_eq!(text("  "), None);
        assert_eq!(text(" x "), Some("x"));
    }

    #[test]
    fn test_custom_agent_requires_value() {
        let mut options = ScanOptions::default();
        options.request.user_agent = UserAgentMode::Custom;
        assert!(!has_user_agent(&options));
        options.request.custom_agent = "Scanner/1.0".to_string();
        assert!(has_user_agent(&options));
        assert_eq!(render_user_agent(&options), "-A \"Scanner/1.0\"");
    }
}
