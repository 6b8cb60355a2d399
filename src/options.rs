use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default detection level (`--level` is omitted at this value)
pub const DEFAULT_LEVEL: u8 = 1;
/// Default detection risk (`--risk` is omitted at this value)
pub const DEFAULT_RISK: u8 = 1;
/// Default worker thread count (`--threads` is omitted at this value)
pub const DEFAULT_THREADS: u32 = 1;
/// Default request timeout in seconds (`--timeout` is omitted at this value)
pub const DEFAULT_TIMEOUT: u32 = 30;
/// Default retry count (`--retries` is omitted at this value)
pub const DEFAULT_RETRIES: u32 = 3;

/// User-agent selection for outgoing requests
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserAgentMode {
    /// Leave the scanner's own user agent in place
    #[default]
    Default,
    /// Pick a random browser user agent
    Random,
    /// Imitate a smartphone
    Mobile,
    /// Use the value of `custom_agent`
    Custom,
}

/// SQL injection technique letters, declared in canonical order.
///
/// The derived `Ord` follows declaration order, so a `BTreeSet<Technique>`
/// always iterates as B, E, U, S, T, Q.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Technique {
    /// Boolean-based blind
    B,
    /// Error-based
    E,
    /// UNION query-based
    U,
    /// Stacked queries
    S,
    /// Time-based blind
    T,
    /// Inline queries
    Q,
}

impl Technique {
    /// Every technique in canonical order
    pub const ALL: [Technique; 6] = [
        Technique::B,
        Technique::E,
        Technique::U,
        Technique::S,
        Technique::T,
        Technique::Q,
    ];

    pub fn letter(self) -> char {
        match self {
            Technique::B => 'B',
            Technique::E => 'E',
            Technique::U => 'U',
            Technique::S => 'S',
            Technique::T => 'T',
            Technique::Q => 'Q',
        }
    }

    /// Parse a single technique letter (case-insensitive)
    pub fn from_letter(letter: char) -> Option<Technique> {
        Technique::ALL
            .into_iter()
            .find(|t| t.letter() == letter.to_ascii_uppercase())
    }
}

/// Enumeration switches, declared in the order they are emitted
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Enumeration {
    All,
    Banner,
    CurrentUser,
    CurrentDb,
    Hostname,
    IsDba,
    Users,
    Passwords,
    Dbs,
    Tables,
    Columns,
    Dump,
}

impl Enumeration {
    /// Every enumeration switch in emission order
    pub const ALL: [Enumeration; 12] = [
        Enumeration::All,
        Enumeration::Banner,
        Enumeration::CurrentUser,
        Enumeration::CurrentDb,
        Enumeration::Hostname,
        Enumeration::IsDba,
        Enumeration::Users,
        Enumeration::Passwords,
        Enumeration::Dbs,
        Enumeration::Tables,
        Enumeration::Columns,
        Enumeration::Dump,
    ];

    /// Command-line flag for this switch
    pub fn flag(self) -> &'static str {
        match self {
            Enumeration::All => "-a",
            Enumeration::Banner => "-b",
            Enumeration::CurrentUser => "--current-user",
            Enumeration::CurrentDb => "--current-db",
            Enumeration::Hostname => "--hostname",
            Enumeration::IsDba => "--is-dba",
            Enumeration::Users => "--users",
            Enumeration::Passwords => "--passwords",
            Enumeration::Dbs => "--dbs",
            Enumeration::Tables => "--tables",
            Enumeration::Columns => "--columns",
            Enumeration::Dump => "--dump",
        }
    }
}

/// Kind of page being targeted; drives tamper selection and suggestions
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    #[default]
    None,
    Login,
    Search,
    Product,
    Api,
    Cms,
}

/// Complete scan configuration handed to the compiler.
///
/// Every section defaults independently, so a YAML file only needs to
/// mention the fields it changes:
///
/// ```yaml
/// target:
///   url: "http://shop.test/item?id=5"
/// detection:
///   level: 3
///   techniques: [B, U, T]
/// performance:
///   batch: true
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ScanOptions {
    pub target: TargetSpec,
    pub request: RequestOptions,
    pub detection: DetectionOptions,
    pub enumeration: EnumerationOptions,
    pub performance: PerformanceOptions,
    pub enhancements: Enhancements,
}

impl ScanOptions {
    /// Build options for a single target URL, everything else at defaults
    pub fn for_url(url: &str) -> Self {
        let mut options = Self::default();
        options.target.url = url.to_string();
        options
    }

    /// Validate numeric ranges.
    ///
    /// The compiler never calls this; it renders whatever it is given.
    /// Loaders call it before handing options over.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let detection = &self.detection;
        if !(1..=5).contains(&detection.level) {
            return Err(ValidationError::InvalidDetection(format!(
                "level must be between 1 and 5, got {}",
                detection.level
            )));
        }
        if !(1..=3).contains(&detection.risk) {
            return Err(ValidationError::InvalidDetection(format!(
                "risk must be between 1 and 3, got {}",
                detection.risk
            )));
        }

        if self.performance.threads == 0 {
            return Err(ValidationError::InvalidPerformance(
                "threads must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// True when more than one target mode is populated.
    ///
    /// This is informational only; compilation emits every populated mode.
    pub fn has_multiple_targets(&self) -> bool {
        self.target.populated_modes() > 1
    }
}

/// Alternative ways of naming the scan target
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TargetSpec {
    /// Target URL (`-u`)
    pub url: String,
    /// Direct database connection string (`-d`)
    pub direct: String,
    /// Proxy or HTTP log file to parse targets from (`-l`)
    pub log_file: String,
    /// File listing multiple targets (`-m`)
    pub bulk_file: String,
    /// Raw HTTP request file (`-r`)
    pub request_file: String,
}

impl TargetSpec {
    fn populated_modes(&self) -> usize {
        [
            &self.url,
            &self.direct,
            &self.log_file,
            &self.bulk_file,
            &self.request_file,
        ]
        .iter()
        .filter(|v| !v.trim().is_empty())
        .count()
    }
}

/// Shape of the HTTP requests sent to the target
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RequestOptions {
    pub user_agent: UserAgentMode,
    /// Only used when `user_agent` is `custom`
    pub custom_agent: String,
    /// HTTP method override, e.g. "PUT"
    pub method: String,
    /// POST body
    pub data: String,
    /// Cookie header value
    pub cookie: String,
    /// Raw header lines, one `-H` per non-empty line
    pub headers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DetectionOptions {
    /// 1-5
    pub level: u8,
    /// 1-3
    pub risk: u8,
    pub techniques: BTreeSet<Technique>,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            risk: DEFAULT_RISK,
            techniques: Technique::ALL.into_iter().collect(),
        }
    }
}

/// What to enumerate once an injection point is confirmed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EnumerationOptions {
    pub flags: BTreeSet<Enumeration>,
    /// Database to enumerate (`-D`)
    pub database: String,
    /// Table to enumerate (`-T`)
    pub table: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PerformanceOptions {
    pub threads: u32,
    /// Seconds between requests; emitted whenever set, including zero
    pub delay: Option<u32>,
    /// Seconds
    pub timeout: u32,
    pub retries: u32,
    pub batch: bool,
    /// Independent of `RequestOptions::user_agent`; both may emit `--random-agent`
    pub random_agent: bool,
    pub tor: bool,
    pub check_tor: bool,
}

impl Default for PerformanceOptions {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            delay: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            batch: false,
            random_agent: false,
            tor: false,
            check_tor: false,
        }
    }
}

/// Canned add-ons appended after every other flag
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Enhancements {
    pub smart_payloads: bool,
    pub waf_bypass: bool,
    pub stealth_mode: bool,
    pub target_type: TargetType,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid detection configuration: {0}")]
    InvalidDetection(String),
    #[error("Invalid performance configuration: {0}")]
    InvalidPerformance(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form_defaults() {
        let options = ScanOptions::default();
        assert_eq!(options.detection.level, 1);
        assert_eq!(options.detection.risk, 1);
        assert_eq!(options.detection.techniques.len(), 6);
        assert_eq!(options.performance.threads, 1);
        assert_eq!(options.performance.timeout, 30);
        assert_eq!(options.performance.retries, 3);
        assert_eq!(options.performance.delay, None);
        assert!(options.enumeration.flags.is_empty());
        assert_eq!(options.enhancements.target_type, TargetType::None);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_technique_set_iterates_in_canonical_order() {
        let set: BTreeSet<Technique> = [Technique::Q, Technique::B, Technique::T, Technique::U]
            .into_iter()
            .collect();
        let letters: String = set.iter().map(|t| t.letter()).collect();
        assert_eq!(letters, "BUTQ");
    }

    #[test]
    fn test_technique_from_letter() {
        assert_eq!(Technique::from_letter('s'), Some(Technique::S));
        assert_eq!(Technique::from_letter('Q'), Some(Technique::Q));
        assert_eq!(Technique::from_letter('X'), None);
    }

    #[test]
    fn test_partial_yaml_keeps_section_defaults() {
        let yaml = r#"
target:
  url: "http://shop.test/item?id=5"
detection:
  level: 3
  techniques: [T, B]
enumeration:
  flags: [dbs, current-user]
performance:
  delay: 0
enhancements:
  target_type: login
"#;
        let options: ScanOptions = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(options.target.url, "http://shop.test/item?id=5");
        assert_eq!(options.detection.level, 3);
        assert_eq!(options.detection.risk, 1);
        assert_eq!(
            options.detection.techniques.iter().copied().collect::<Vec<_>>(),
            vec![Technique::B, Technique::T]
        );
        assert_eq!(
            options.enumeration.flags.iter().copied().collect::<Vec<_>>(),
            vec![Enumeration::CurrentUser, Enumeration::Dbs]
        );
        assert_eq!(options.performance.delay, Some(0));
        assert_eq!(options.performance.timeout, 30);
        assert_eq!(options.enhancements.target_type, TargetType::Login);
    }

    #[test]
    fn test_validation_errors() {
        let mut options = ScanOptions::default();
        options.detection.level = 6;
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("level must be between 1 and 5"));

        let mut options = ScanOptions::default();
        options.detection.risk = 0;
        assert!(options.validate().unwrap_err().to_string().contains("risk"));

        let mut options = ScanOptions::default();
        options.performance.threads = 0;
        assert!(matches!(
            options.validate(),
            Err(ValidationError::InvalidPerformance(_))
        ));
    }

    #[test]
    fn test_multiple_targets_detected() {
        let mut options = ScanOptions::for_url("http://a.test");
        assert!(!options.has_multiple_targets());
        options.target.log_file = "proxy.log".to_string();
        assert!(options.has_multiple_targets());
        options.target.log_file = "   ".to_string();
        assert!(!options.has_multiple_targets());
    }
}
