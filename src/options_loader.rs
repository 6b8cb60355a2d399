use crate::options::{ScanOptions, TargetType, UserAgentMode};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse scan options from a YAML file
pub fn load_options(options_path: &Path) -> Result<ScanOptions> {
    info!("Loading scan options from: {:?}", options_path);

    let file = File::open(options_path)
        .wrap_err_with(|| format!("Failed to open options file '{}'", options_path.display()))?;

    let options: ScanOptions = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse options file '{}'", options_path.display()))?;

    options.validate()?;

    Ok(options)
}

/// CLI arguments that can override values from a file or preset
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub url: Option<String>,
    pub level: Option<u8>,
    pub risk: Option<u8>,
    pub threads: Option<u32>,
    pub target_type: Option<TargetType>,
    pub batch: bool,
    pub smart_payloads: bool,
    pub waf_bypass: bool,
    pub stealth_mode: bool,
}

/// Apply CLI overrides on top of loaded options.
///
/// Boolean switches only ever turn features on; an absent switch leaves the
/// loaded value untouched.
pub fn apply_overrides(options: &mut ScanOptions, overrides: &OptionOverrides) -> Result<()> {
    if let Some(url) = &overrides.url {
        info!("Target URL override: {}", url);
        options.target.url = url.clone();
    }
    if let Some(level) = overrides.level {
        options.detection.level = level;
    }
    if let Some(risk) = overrides.risk {
        options.detection.risk = risk;
    }
    if let Some(threads) = overrides.threads {
        options.performance.threads = threads;
    }
    if let Some(target_type) = overrides.target_type {
        options.enhancements.target_type = target_type;
    }

    options.performance.batch |= overrides.batch;
    options.enhancements.smart_payloads |= overrides.smart_payloads;
    options.enhancements.waf_bypass |= overrides.waf_bypass;
    options.enhancements.stealth_mode |= overrides.stealth_mode;

    // Re-validate after applying overrides
    options.validate()?;

    Ok(())
}

/// Log combinations that compile but are probably not what the user meant.
///
/// None of these are rejected; the command is still generated as-is.
pub fn warn_on_ambiguous_options(options: &ScanOptions) {
    if options.has_multiple_targets() {
        warn!("Several target modes are set; every one of them will be passed to the scanner");
    }

    if options.request.user_agent == UserAgentMode::Custom && options.request.custom_agent.trim().is_empty() {
        warn!("User agent mode is 'custom' but no custom agent was given; no agent flag will be emitted");
    }

    if options.detection.techniques.is_empty() {
        warn!("No techniques selected; the scanner will fall back to testing all of them");
    }

    let quoted_fields = [
        ("target.url", &options.target.url),
        ("target.direct", &options.target.direct),
        ("request.custom_agent", &options.request.custom_agent),
        ("request.data", &options.request.data),
        ("request.cookie", &options.request.cookie),
        ("enumeration.database", &options.enumeration.database),
        ("enumeration.table", &options.enumeration.table),
    ];
    for (name, value) in quoted_fields {
        if value.contains('"') {
            warn!("{} contains a double quote; it is not escaped in the generated command", name);
        }
    }

    if options.enhancements.smart_payloads && options.enhancements.target_type == TargetType::None {
        info!("Smart payloads enabled without a target type; no tamper scripts will be added");
    }
}
