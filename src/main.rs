use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use sqlmapgen::compiler::{char_count, compile, payload_variants};
use sqlmapgen::options::{ScanOptions, TargetType};
use sqlmapgen::options_loader::{self, OptionOverrides};
use sqlmapgen::presets::{apply_preset, PresetName};
use sqlmapgen::suggest::{self, tip_count_label};
use sqlmapgen::utils::{estimate_test_time, format, ScanReport};

/// Build sqlmap command lines from scan options, presets and target hints
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML file with scan options
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Start from a named preset instead of defaults
    #[arg(short, long, value_enum)]
    preset: Option<PresetName>,

    /// Target URL (overrides the options file)
    #[arg(short, long)]
    url: Option<String>,

    /// Detection level (1-5)
    #[arg(long)]
    level: Option<u8>,

    /// Detection risk (1-3)
    #[arg(long)]
    risk: Option<u8>,

    /// Number of scanner threads
    #[arg(long)]
    threads: Option<u32>,

    /// Kind of page being targeted
    #[arg(short, long, value_enum)]
    target_type: Option<TargetType>,

    /// Never ask for user input
    #[arg(long)]
    batch: bool,

    /// Add tamper scripts suited to the target type
    #[arg(long)]
    smart_payloads: bool,

    /// Append the WAF bypass flags
    #[arg(long)]
    waf_bypass: bool,

    /// Append the stealth flags
    #[arg(long)]
    stealth: bool,

    /// Replace the target type with the one detected from the URL path
    #[arg(long)]
    auto_detect: bool,

    /// Print the command with one long flag per line
    #[arg(short, long)]
    format: bool,

    /// Print tips for the target
    #[arg(long)]
    suggest: bool,

    /// Check the target URL and print observations about it
    #[arg(long)]
    validate: bool,

    /// Print manual test payloads for the target type
    #[arg(long)]
    payloads: bool,

    /// Print a rough run-time estimate
    #[arg(long)]
    estimate: bool,

    /// Emit a JSON report instead of the plain command
    #[arg(long)]
    json: bool,
}

impl Args {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            url: self.url.clone(),
            level: self.level,
            risk: self.risk,
            threads: self.threads,
            target_type: self.target_type,
            batch: self.batch,
            smart_payloads: self.smart_payloads,
            waf_bypass: self.waf_bypass,
            stealth_mode: self.stealth,
        }
    }
}

/// Options from the file or preset, with CLI overrides applied
fn resolve_options(args: &Args) -> Result<ScanOptions> {
    let mut options = match (&args.config, args.preset) {
        (Some(path), _) => options_loader::load_options(path)?,
        (None, Some(preset)) => apply_preset(preset),
        (None, None) => ScanOptions::default(),
    };

    options_loader::apply_overrides(&mut options, &args.overrides())?;

    if args.auto_detect {
        if let Ok(url) = suggest::parse_target(&options.target.url) {
            if let Some((detected, note)) = suggest::detect_target_type(&url) {
                info!("{}", note);
                options.enhancements.target_type = detected;
            }
        }
    }

    options_loader::warn_on_ambiguous_options(&options);
    Ok(options)
}

fn print_validation(url: &str) {
    match suggest::validate_target(url) {
        Ok(observations) => {
            for observation in observations {
                println!("{}", observation);
            }
        }
        Err(e) => warn!("{}", e),
    }
}

fn print_suggestions(options: &ScanOptions) {
    let url = Some(options.target.url.as_str());
    match suggest::suggest(options.enhancements.target_type, url) {
        Ok(tips) => {
            println!("Suggestions ({}):", tip_count_label(tips.len()));
            for tip in tips {
                println!("  - {}", tip);
            }
        }
        Err(e) => warn!("{}", e),
    }
}

fn print_payloads(target_type: TargetType) {
    println!("Payloads ({:?}):", target_type);
    for payload in payload_variants(target_type) {
        println!("  {}", payload);
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr; stdout carries only generated output
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = resolve_options(&args)?;
    let command = compile(&options);

    if args.json {
        let report = ScanReport::new(&command, serde_json::json!([]));
        println!("{}", report.to_json()?);
    } else {
        let shown = if args.format { format(&command) } else { command.clone() };
        println!("{}", shown);
        info!("{} characters", char_count(&shown));
    }

    if args.estimate {
        println!("Estimated test time: {:.0}s", estimate_test_time(&command));
    }

    if args.validate {
        print_validation(&options.target.url);
    }

    if args.suggest {
        print_suggestions(&options);
    }

    if args.payloads {
        print_payloads(options.enhancements.target_type);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["sqlmapgen", "--url", "http://a.test/?id=1", "--batch"]);

        assert_eq!(args.url.as_deref(), Some("http://a.test/?id=1"));
        assert!(args.batch);
        assert!(args.config.is_none());
        assert!(args.preset.is_none());
        assert!(!args.payloads);
    }

    #[test]
    fn test_preset_and_config_conflict() {
        let result = Args::try_parse_from([
            "sqlmapgen",
            "--config", "scan.yaml",
            "--preset", "stealth",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_with_overrides() {
        let args = Args::parse_from([
            "sqlmapgen",
            "--preset", "stealth",
            "--url", "https://x.test",
            "--stealth",
        ]);
        let options = resolve_options(&args).unwrap();
        let command = compile(&options);

        assert!(command.contains("-u \"https://x.test\""));
        // preset delay first, stealth suffix delay last
        let first = command.find("--delay=3").unwrap();
        let second = command.find("--delay=2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_config_file_with_auto_detect() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "target:\n  url: \"https://shop.test/search?q=x\"\nenhancements:\n  smart_payloads: true\n"
        )
        .unwrap();

        let args = Args::parse_from([
            "sqlmapgen",
            "--config", temp_file.path().to_str().unwrap(),
            "--auto-detect",
        ]);
        let options = resolve_options(&args).unwrap();

        assert_eq!(options.enhancements.target_type, TargetType::Search);
        assert!(compile(&options).ends_with("--tamper=between,charunicodeencode"));
    }

    #[test]
    fn test_auto_detect_replaces_explicit_target_type() {
        let args = Args::parse_from([
            "sqlmapgen",
            "--url", "https://shop.test/login.php",
            "--target-type", "cms",
            "--smart-payloads",
            "--auto-detect",
        ]);
        let options = resolve_options(&args).unwrap();

        assert_eq!(options.enhancements.target_type, TargetType::Login);
        assert!(compile(&options).ends_with("--tamper=space2comment,charencode"));
    }

    #[test]
    fn test_auto_detect_keeps_type_when_path_is_unknown() {
        let args = Args::parse_from([
            "sqlmapgen",
            "--url", "https://shop.test/v1/orders?id=3",
            "--target-type", "api",
            "--auto-detect",
        ]);
        let options = resolve_options(&args).unwrap();
        assert_eq!(options.enhancements.target_type, TargetType::Api);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = Args::parse_from(["sqlmapgen", "--level", "7"]);
        assert!(resolve_options(&args).is_err());
    }
}
