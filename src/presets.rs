//! Named option bundles.
//!
//! Applying a preset always starts from `ScanOptions::default()`: whatever
//! was configured before is discarded, then the preset's fields are set.
//! Presets and the enhancement toggles are independent; the `stealth`
//! preset does not turn on `stealth_mode`.

use crate::options::{Enumeration, ScanOptions, Technique};
use log::info;
use std::fmt;
use std::str::FromStr;

/// The four preset identifiers accepted on the command line and in configs
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetName {
    Basic,
    Aggressive,
    Stealth,
    Comprehensive,
}

impl PresetName {
    pub const ALL: [PresetName; 4] = [
        PresetName::Basic,
        PresetName::Aggressive,
        PresetName::Stealth,
        PresetName::Comprehensive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Basic => "basic",
            PresetName::Aggressive => "aggressive",
            PresetName::Stealth => "stealth",
            PresetName::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PresetError::Unknown(s.to_string()))
    }
}

/// Preset lookup errors
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("Unknown preset '{0}' (expected one of: basic, aggressive, stealth, comprehensive)")]
    Unknown(String),
}

/// Field values a preset sets on top of the defaults
#[derive(Debug, Clone)]
pub struct PresetConfig {
    pub level: u8,
    pub risk: u8,
    pub threads: Option<u32>,
    pub delay: Option<u32>,
    pub batch: bool,
    pub random_agent: bool,
    pub techniques: &'static [Technique],
    pub enumeration: &'static [Enumeration],
}

/// A named, described bundle of option values
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: PresetName,
    pub title: &'static str,
    pub description: &'static str,
    pub config: PresetConfig,
}

impl Preset {
    pub fn get(name: PresetName) -> Self {
        match name {
            PresetName::Basic => Self {
                name,
                title: "Basic Scan",
                description: "Safe, fast scan for beginners",
                config: PresetConfig {
                    level: 1,
                    risk: 1,
                    threads: None,
                    delay: None,
                    batch: true,
                    random_agent: false,
                    techniques: &[Technique::B, Technique::E, Technique::U],
                    enumeration: &[],
                },
            },
            PresetName::Aggressive => Self {
                name,
                title: "Aggressive Scan",
                description: "Comprehensive testing with higher risk",
                config: PresetConfig {
                    level: 5,
                    risk: 3,
                    threads: Some(5),
                    delay: None,
                    batch: true,
                    random_agent: false,
                    techniques: &Technique::ALL,
                    enumeration: &[
                        Enumeration::CurrentUser,
                        Enumeration::CurrentDb,
                        Enumeration::Dbs,
                        Enumeration::Tables,
                    ],
                },
            },
            PresetName::Stealth => Self {
                name,
                title: "Stealth Mode",
                description: "Low-profile testing to avoid detection",
                config: PresetConfig {
                    level: 2,
                    risk: 1,
                    threads: None,
                    delay: Some(3),
                    batch: true,
                    random_agent: true,
                    techniques: &[Technique::B, Technique::T],
                    enumeration: &[],
                },
            },
            PresetName::Comprehensive => Self {
                name,
                title: "Comprehensive",
                description: "Full enumeration and data extraction",
                config: PresetConfig {
                    level: 3,
                    risk: 2,
                    threads: Some(3),
                    delay: None,
                    batch: true,
                    random_agent: false,
                    techniques: &[
                        Technique::B,
                        Technique::E,
                        Technique::U,
                        Technique::S,
                        Technique::T,
                    ],
                    enumeration: &[Enumeration::All],
                },
            },
        }
    }

    /// Fresh options carrying only this preset's values
    pub fn to_options(&self) -> ScanOptions {
        let config = &self.config;
        let mut options = ScanOptions::default();

        options.detection.level = config.level;
        options.detection.risk = config.risk;
        options.detection.techniques = config.techniques.iter().copied().collect();

        if let Some(threads) = config.threads {
            options.performance.threads = threads;
        }
        options.performance.delay = config.delay;
        options.performance.batch = config.batch;
        options.performance.random_agent = config.random_agent;

        options.enumeration.flags = config.enumeration.iter().copied().collect();

        options
    }

    /// Confirmation line shown after the preset is applied
    pub fn applied_message(&self) -> String {
        format!("{} preset applied - {}", self.title, self.description)
    }
}

/// Replace the current options with a preset
pub fn apply_preset(name: PresetName) -> ScanOptions {
    let preset = Preset::get(name);
    info!("{}", preset.applied_message());
    preset.to_options()
}

/// Look a preset up by its external identifier and apply it
pub fn apply_preset_by_name(name: &str) -> Result<ScanOptions, PresetError> {
    let name: PresetName = name.parse()?;
    Ok(apply_preset(name))
}
