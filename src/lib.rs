//! # Sqlmapgen - Command builder for sqlmap scan invocations
//!
//! This library turns a structured description of a SQL injection scan into
//! the exact `sqlmap` command line that runs it, and offers heuristic tips
//! about the target.
//!
//! ## Overview
//!
//! The generated command is only ever produced as text. Nothing in this crate
//! executes it, writes it to disk or sends it anywhere; callers hand the
//! string to whatever sink they like (terminal, clipboard, script).
//!
//! ## Key Features
//!
//! - **Deterministic compilation**: the same options always give the same bytes
//! - **Fixed flag order**: target, request, detection, enumeration, performance, enhancements
//! - **Presets**: `basic`, `aggressive`, `stealth` and `comprehensive` bundles
//! - **Target suggestions**: URL observations and per-target-type tips
//! - **Formatting**: one-flag-per-line view that compacts back losslessly
//!
//! ## Architecture
//!
//! - `options`: The `ScanOptions` record and its enums
//! - `options_loader`: YAML loading and CLI overrides
//! - `compiler`: Ordered emission table and `compile`
//! - `presets`: Named option bundles
//! - `suggest`: URL analysis, target-type detection and tips
//! - `utils`: Command formatting and run-time estimation
//!
//! ## Example Usage
//!
//! ```rust
//! use sqlmapgen::compiler::compile;
//! use sqlmapgen::options::{ScanOptions, Technique};
//!
//! let mut options = ScanOptions::for_url("https://x.test");
//! options.performance.threads = 5;
//! options.performance.batch = true;
//! options.detection.techniques = [Technique::B].into_iter().collect();
//!
//! assert_eq!(
//!     compile(&options),
//!     r#"python .\sqlmap.py -u "https://x.test" --technique=B --threads=5 --batch"#
//! );
//! ```
//!
//! ## Options Format
//!
//! Option files use YAML; every section and field is optional:
//!
//! ```yaml
//! target:
//!   url: "http://shop.test/item?id=5"
//! request:
//!   user_agent: random        # default/random/mobile/custom
//!   headers:
//!     - "X-Forwarded-For: 127.0.0.1"
//! detection:
//!   level: 3
//!   risk: 2
//!   techniques: [B, E, U]
//! enumeration:
//!   flags: [current-user, dbs]
//! performance:
//!   threads: 4
//!   batch: true
//! enhancements:
//!   smart_payloads: true
//!   target_type: product      # none/login/search/product/api/cms
//! ```
//!
//! ## Error Handling
//!
//! Compilation cannot fail. Loading uses `color_eyre` for context-rich
//! errors; domain errors (`ValidationError`, `PresetError`, `SuggestError`)
//! are `thiserror` enums.

pub mod compiler;
pub mod options;
pub mod options_loader;
pub mod presets;
pub mod suggest;
pub mod utils;
