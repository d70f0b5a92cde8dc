use std::env;

use anyhow::{anyhow, Context, Result};
use householdsurvey::catalog::Locale;
use householdsurvey::workspace::{
    config_file_path, ensure_workspace_structure, load_or_default, save, SurveyConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let paths = ensure_workspace_structure()?;
    let args = CliArgs::parse()?;
    let config_path = config_file_path()?;
    let mut config = load_or_default()?;
    let changed = !config_path.exists() | args.apply(&mut config);

    if changed {
        save(&config)?;
        tracing::info!(path = %config_path.display(), "configuration saved");
        println!("Survey settings recorded at {}", config_path.display());
    } else {
        println!("Survey settings already configured.");
    }
    println!(
        "  sheet: {}",
        paths.sheet_path(&config.sheet_name).display()
    );
    println!("  dependent capacity: {}", config.dependent_capacity);
    println!(
        "  locales: interview {} / storage {}",
        config.default_locale, config.storage_locale
    );
    println!("  narration: {}", if config.narration_enabled { "on" } else { "off" });

    Ok(())
}

#[derive(Default)]
struct CliArgs {
    sheet: Option<String>,
    capacity: Option<usize>,
    locale: Option<Locale>,
    storage_locale: Option<Locale>,
    narration: Option<bool>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut parsed = CliArgs::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--sheet" => {
                    let value = args.next().context("Expected a sheet name after --sheet")?;
                    parsed.sheet = Some(value);
                }
                "--capacity" => {
                    let value = args
                        .next()
                        .context("Expected a number after --capacity")?
                        .parse::<usize>()
                        .context("--capacity must be a positive integer")?;
                    if value == 0 {
                        return Err(anyhow!("--capacity must be at least 1"));
                    }
                    parsed.capacity = Some(value);
                }
                "--locale" => {
                    let value = args.next().context("Expected fr or ar after --locale")?;
                    parsed.locale = Some(value.parse()?);
                }
                "--storage-locale" => {
                    let value = args
                        .next()
                        .context("Expected fr or ar after --storage-locale")?;
                    parsed.storage_locale = Some(value.parse()?);
                }
                "--narration" => parsed.narration = Some(true),
                "--no-narration" => parsed.narration = Some(false),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(parsed)
    }

    /// Returns whether anything changed.
    fn apply(self, config: &mut SurveyConfig) -> bool {
        let mut changed = false;
        changed |= apply_override(&mut config.sheet_name, self.sheet);
        changed |= apply_override(&mut config.dependent_capacity, self.capacity);
        changed |= apply_override(&mut config.default_locale, self.locale);
        changed |= apply_override(&mut config.storage_locale, self.storage_locale);
        changed |= apply_override(&mut config.narration_enabled, self.narration);
        changed
    }
}

fn apply_override<T: PartialEq>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

fn print_usage() {
    println!("Household survey setup");
    println!("Records installation settings in config.toml.");
    println!("Usage: cargo run --bin setup -- [options]");
    println!("Options:");
    println!("  --sheet <name>            Sheet submissions are written to");
    println!("                            (default: Sondage_Hassi_Elbekay)");
    println!("  --capacity <n>            Dependent slots per stored row (default: 15)");
    println!("  --locale <fr|ar>          Language preselected for interviews (default: fr)");
    println!("  --storage-locale <fr|ar>  Language of labels written to the sheet (default: fr)");
    println!("  --narration | --no-narration");
    println!("                            Read prompts aloud (default: on)");
}
