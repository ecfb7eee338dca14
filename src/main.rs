//! Cmsload CLI - Decode CMS payloads into typed application state
//!
//! # Main Commands
//!
//! ```bash
//! cmsload decode payload.json        # Decode a payload, print the state
//! cmsload validate payload.json     # Schema-check a payload
//! cmsload events payload.json       # Decode and list the events
//! ```

use clap::{Parser, Subcommand};
use cmsload::{
    decode_file, filter_events, group_events_by_start_time, select_event_is_free, validate_entry,
    validate_payload, DecodeOptions, Event, Locale,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cmsload")]
#[command(about = "Decode CMS content payloads into typed application state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a payload file and print the resulting state as JSON
    Decode {
        /// Input payload file
        input: PathBuf,

        /// Locale to resolve localized fields to (default: CMSLOAD_LOCALE or en-GB)
        #[arg(short, long)]
        locale: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip payload schema validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Validate a payload file against the embedded schemas
    Validate {
        /// Input payload file
        input: PathBuf,
    },

    /// Decode a payload file and list the events
    Events {
        /// Input payload file
        input: PathBuf,

        /// Locale to resolve localized fields to (default: CMSLOAD_LOCALE or en-GB)
        #[arg(short, long)]
        locale: Option<String>,

        /// Only list events free to attend
        #[arg(long)]
        free: bool,

        /// Group events by calendar day
        #[arg(long)]
        by_day: bool,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            locale,
            output,
            no_validate,
        } => cmd_decode(&input, locale.as_deref(), output.as_deref(), no_validate),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Events {
            input,
            locale,
            free,
            by_day,
        } => cmd_events(&input, locale.as_deref(), free, by_day),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn resolve_locale(flag: Option<&str>) -> Locale {
    flag.map(Locale::new).unwrap_or_else(Locale::from_env)
}

fn cmd_decode(
    input: &Path,
    locale: Option<&str>,
    output: Option<&Path>,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("decoding: {}", input.display());

    let options = DecodeOptions {
        locale: resolve_locale(locale),
        skip_validation: no_validate,
    };

    let result = decode_file(input, &options)?;

    eprintln!(
        "   entries: {}, assets: {}",
        result.stats.entries, result.stats.assets
    );
    eprintln!(
        "   decoded: {}, dropped: {}, unrecognized: {}",
        result.stats.decoded, result.stats.dropped, result.stats.unrecognized
    );
    eprintln!(
        "   events in state (after recurrence expansion): {}",
        result.stats.occurrences
    );

    let json = serde_json::to_string_pretty(&result.state)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let payload: Value = serde_json::from_str(&content)?;

    let mut invalid = 0;

    if let Err(errors) = validate_payload(&payload) {
        invalid += 1;
        eprintln!("\npayload envelope invalid:");
        for err in errors.iter().take(5) {
            eprintln!("   - {}", err);
        }
    }

    let entries = payload
        .get("entries")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut valid = 0;
    for (i, entry) in entries.iter().enumerate() {
        match validate_entry(entry) {
            Ok(()) => valid += 1,
            Err(errors) => {
                invalid += 1;
                if invalid <= 5 {
                    eprintln!("\nentry {} invalid:", i);
                    for err in errors.iter().take(3) {
                        eprintln!("   - {}", err);
                    }
                }
            }
        }
    }

    eprintln!("\nresults: {} valid entries, {} problems", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_events(
    input: &Path,
    locale: Option<&str>,
    free_only: bool,
    by_day: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = DecodeOptions {
        locale: resolve_locale(locale),
        skip_validation: true,
    };

    let result = decode_file(input, &options)?;

    let events = if free_only {
        filter_events(&result.state.events, select_event_is_free)
    } else {
        result.state.events.clone()
    };

    eprintln!("{} events", events.len());

    if by_day {
        for day in group_events_by_start_time(&events) {
            println!("{}:", day[0].start_time.format("%Y-%m-%d"));
            for event in &day {
                print_event(event);
            }
        }
    } else {
        for event in &events {
            print_event(event);
        }
    }

    Ok(())
}

fn print_event(event: &Event) {
    let price = if select_event_is_free(event) {
        "free".to_string()
    } else {
        format!("{:.2}-{:.2}", event.price_low, event.price_high)
    };
    println!(
        "  {}  {}  ({}, {})",
        event.start_time.format("%Y-%m-%d %H:%M"),
        event.name,
        event.location.name,
        price
    );
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
