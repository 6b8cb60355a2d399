//! Target heuristics: URL observations, target-type detection and canned tips.
//!
//! Everything here is table lookup over the shape of the target URL. Nothing
//! is remembered between calls.

use crate::options::TargetType;
use log::debug;
use std::fmt;
use url::Url;

/// Query parameter name fragments that commonly carry injectable values
pub const SUSPICIOUS_PARAMS: [&str; 6] = ["id", "user", "page", "cat", "item", "product"];

const NO_URL_TIP: &str = "Enter a target URL to get personalized recommendations";
const NO_TYPE_TIP: &str = "Configure target type for personalized recommendations";
const STANDARD_TARGET: &str = "Target appears standard - proceed with basic testing approach";

/// Suggestion errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SuggestError {
    #[error("Please enter a target URL first")]
    MissingUrl,
    #[error("Invalid URL format. Please check your target URL.")]
    InvalidUrl,
}

/// Severity tag of an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionLevel {
    Success,
    Warning,
    Info,
}

impl fmt::Display for SuggestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionLevel::Success => "success",
            SuggestionLevel::Warning => "warning",
            SuggestionLevel::Info => "info",
        };
        f.write_str(label)
    }
}

/// A single observation about the target URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub level: SuggestionLevel,
    pub message: String,
}

impl Suggestion {
    fn new(level: SuggestionLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Parse a user-entered target URL
pub fn parse_target(url: &str) -> Result<Url, SuggestError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SuggestError::MissingUrl);
    }
    Url::parse(url).map_err(|e| {
        debug!("Rejected target URL '{}': {}", url, e);
        SuggestError::InvalidUrl
    })
}

/// Observations derived from the URL's query, scheme and port
pub fn analyze_url(url: &Url) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let params: Vec<String> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
    if !params.is_empty() {
        suggestions.push(Suggestion::new(
            SuggestionLevel::Success,
            format!("Found {} parameter(s) in URL - good for injection testing", params.len()),
        ));
    }

    let suspicious: Vec<&str> = params
        .iter()
        .filter(|param| {
            let lower = param.to_lowercase();
            SUSPICIOUS_PARAMS.iter().any(|fragment| lower.contains(fragment))
        })
        .map(String::as_str)
        .collect();
    if !suspicious.is_empty() {
        suggestions.push(Suggestion::new(
            SuggestionLevel::Warning,
            format!("Potentially vulnerable parameters detected: {}", suspicious.join(", ")),
        ));
    }

    if url.scheme() == "http" {
        suggestions.push(Suggestion::new(
            SuggestionLevel::Info,
            "HTTP detected - consider enabling --force-ssl for encrypted testing",
        ));
    }

    // port() is None when the port is the scheme default
    if let Some(port) = url.port().filter(|p| *p != 80 && *p != 443) {
        suggestions.push(Suggestion::new(
            SuggestionLevel::Info,
            format!("Custom port {} detected - may indicate development/testing environment", port),
        ));
    }

    suggestions
}

/// Validate a target URL and describe it.
///
/// Never returns an empty list: a URL with nothing notable yields a single
/// "appears standard" observation.
pub fn validate_target(url: &str) -> Result<Vec<Suggestion>, SuggestError> {
    let parsed = parse_target(url)?;
    let mut suggestions = analyze_url(&parsed);
    if suggestions.is_empty() {
        suggestions.push(Suggestion::new(SuggestionLevel::Info, STANDARD_TARGET));
    }
    Ok(suggestions)
}

/// Guess the target type from keywords in the URL path
pub fn detect_target_type(url: &Url) -> Option<(TargetType, &'static str)> {
    let path = url.path().to_lowercase();
    let has = |keywords: &[&str]| contains_any(&path, keywords);

    let detected = if has(&["login", "auth"][..]) {
        (TargetType::Login, "Login form detected - enabling authentication bypass techniques")
    } else if has(&["search"][..]) {
        (TargetType::Search, "Search function detected - enabling search-specific payloads")
    } else if has(&["product", "item", "detail"][..]) {
        (TargetType::Product, "Product/detail page detected - enabling catalog-specific tests")
    } else if has(&["api", "rest"][..]) {
        (TargetType::Api, "API endpoint detected - enabling API-specific testing methods")
    } else if has(&["admin", "cms"][..]) {
        (TargetType::Cms, "Admin/CMS interface detected - enabling privilege escalation tests")
    } else {
        return None;
    };

    debug!("Detected target type {:?} from path '{}'", detected.0, path);
    Some(detected)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Canned tips for a target type
pub fn target_tips(target_type: TargetType) -> &'static [&'static str] {
    match target_type {
        TargetType::Login => &[
            "Consider enabling --forms to test login forms automatically",
            "Use --batch mode to avoid manual intervention",
            "Enable time-based blind techniques for login bypass",
        ],
        TargetType::Search => &[
            "Search functions often vulnerable to UNION-based injection",
            "Consider using --union-cols to optimize UNION detection",
            "Enable --crawl to discover additional search endpoints",
        ],
        TargetType::Product => &[
            "Product pages often use numeric IDs - ideal for basic injection",
            "Consider --dump to extract product/customer data",
            "Use --threads=5 for faster enumeration of product catalogs",
        ],
        TargetType::Api => &[
            "APIs may require specific headers - check authentication",
            "Consider --method=PUT/DELETE for RESTful testing",
            "Use --json-data for JSON payload testing",
        ],
        TargetType::Cms => &[
            "CMS systems often have admin panels - enable --dbs enumeration",
            "Consider --privileges to check admin access levels",
            "Use --dump-all with caution on production systems",
        ],
        TargetType::None => &[],
    }
}

/// Target type to use for tips: a type detected from the URL path replaces
/// the chosen one, otherwise the chosen type stands
pub fn effective_target_type(target_type: TargetType, url: &Url) -> TargetType {
    detect_target_type(url).map_or(target_type, |(detected, _)| detected)
}

/// Ordered recommendations for a target.
///
/// Without a URL this is just the tips of the chosen type. With a URL, the
/// URL observations come first, then the path-detection note, then the tips
/// of the effective target type.
pub fn suggest(target_type: TargetType, url: Option<&str>) -> Result<Vec<String>, SuggestError> {
    let url = match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => url,
        None if target_type == TargetType::None => return Ok(vec![NO_URL_TIP.to_string()]),
        None => return Ok(tip_strings(target_type).collect()),
    };
    let parsed = parse_target(url)?;

    let mut suggestions: Vec<String> = analyze_url(&parsed)
        .into_iter()
        .map(|s| s.message)
        .collect();

    let mut effective = target_type;
    if let Some((detected, note)) = detect_target_type(&parsed) {
        if detected != target_type {
            debug!("Path detection replaces target type {:?} with {:?}", target_type, detected);
        }
        suggestions.push(note.to_string());
        effective = detected;
    }
    suggestions.extend(tip_strings(effective));

    if suggestions.is_empty() {
        suggestions.push(NO_TYPE_TIP.to_string());
    }
    Ok(suggestions)
}

fn tip_strings(target_type: TargetType) -> impl Iterator<Item = String> {
    target_tips(target_type).iter().map(|tip| tip.to_string())
}

/// "1 tip" / "N tips"
pub fn tip_count_label(count: usize) -> String {
    format!("{} tip{}", count, if count == 1 { "" } else { "s" })
}
