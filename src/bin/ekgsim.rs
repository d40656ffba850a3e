//! Command-line front end for the ECG simulator.
//!
//! Renders one lead or all twelve for a pathology and writes the samples to
//! stdout as CSV or JSON.
//!
//! Usage:
//!   cargo run --bin ekgsim -- [OPTIONS]
//!
//! Options:
//!   --pathology <key>     Pathology key (default: normal)
//!   --hr <bpm>            Requested heart rate
//!   --lead <name>|all     Lead to render (default: II)
//!   --seconds <s>         Trace duration (default: 10)
//!   --rate <Hz>           Samples per second (default: 100)
//!   --artifact <pct>      Artifact level
//!   --seed <n>            Seed the artifact noise
//!   --config <file>       Load a saved configuration (.json or binary)
//!   --format csv|json     Output format (default: csv)
//!   --list                List pathology keys
//!   --intervals           Print the header line only

use ekgsim::prelude::*;
use ekgsim::EkgError;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Largest number of samples rendered per lead.
const MAX_SAMPLES: usize = 1_000_000;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Json,
}

/// Parsed command line.
#[derive(Debug)]
struct Options {
    pathology: Option<Pathology>,
    hr: Option<f64>,
    lead: LeadSelection,
    seconds: f64,
    rate: f64,
    artifact: Option<f64>,
    seed: Option<u64>,
    config: Option<String>,
    format: OutputFormat,
    list: bool,
    intervals_only: bool,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pathology: None,
            hr: None,
            lead: LeadSelection::Lead(LeadId::II),
            seconds: 10.0,
            rate: 100.0,
            artifact: None,
            seed: None,
            config: None,
            format: OutputFormat::Csv,
            list: false,
            intervals_only: false,
            help: false,
        }
    }
}

fn invalid(name: &'static str, message: impl Into<String>) -> EkgError {
    EkgError::InvalidParameter {
        name,
        message: message.into(),
    }
}

fn number(name: &'static str, value: Option<&String>) -> ekgsim::Result<f64> {
    let value = value.ok_or_else(|| invalid(name, "missing value"))?;
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(name, format!("'{value}' is not a number")))
}

/// Samples per lead for `seconds` at `rate` Hz, bounded by [`MAX_SAMPLES`].
fn sample_count(seconds: f64, rate: f64) -> ekgsim::Result<usize> {
    if seconds < 0.0 {
        return Err(invalid("seconds", "must not be negative"));
    }
    let samples = (seconds * rate).round();
    if samples > MAX_SAMPLES as f64 {
        return Err(invalid(
            "seconds",
            format!("{seconds} s at {rate} Hz exceeds {MAX_SAMPLES} samples per lead"),
        ));
    }
    Ok(samples as usize)
}

fn parse_args(args: &[String]) -> ekgsim::Result<Options> {
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--pathology" => {
                i += 1;
                let key = args.get(i).ok_or_else(|| invalid("pathology", "missing value"))?;
                opts.pathology = Some(key.parse()?);
            }
            "--hr" => {
                i += 1;
                opts.hr = Some(number("hr", args.get(i))?);
            }
            "--lead" => {
                i += 1;
                let lead = args.get(i).ok_or_else(|| invalid("lead", "missing value"))?;
                opts.lead = lead.parse()?;
            }
            "--seconds" => {
                i += 1;
                opts.seconds = number("seconds", args.get(i))?;
            }
            "--rate" => {
                i += 1;
                opts.rate = number("rate", args.get(i))?;
                if opts.rate <= 0.0 {
                    return Err(invalid("rate", "must be positive"));
                }
            }
            "--artifact" => {
                i += 1;
                opts.artifact = Some(number("artifact", args.get(i))?);
            }
            "--seed" => {
                i += 1;
                let seed = args.get(i).ok_or_else(|| invalid("seed", "missing value"))?;
                opts.seed = Some(
                    seed.parse()
                        .map_err(|_| invalid("seed", format!("'{seed}' is not an integer")))?,
                );
            }
            "--config" => {
                i += 1;
                opts.config = Some(
                    args.get(i)
                        .cloned()
                        .ok_or_else(|| invalid("config", "missing value"))?,
                );
            }
            "--format" => {
                i += 1;
                opts.format = match args.get(i).map(String::as_str) {
                    Some("csv") => OutputFormat::Csv,
                    Some("json") => OutputFormat::Json,
                    other => {
                        return Err(invalid(
                            "format",
                            format!("expected csv or json, got {:?}", other.unwrap_or("")),
                        ))
                    }
                };
            }
            "--list" => {
                opts.list = true;
            }
            "--intervals" => {
                opts.intervals_only = true;
            }
            "--help" | "-h" => {
                opts.help = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
            }
        }
        i += 1;
    }
    sample_count(opts.seconds, opts.rate)?;
    Ok(opts)
}

fn print_help() {
    println!("Usage: ekgsim [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --pathology <key>     Pathology key (default: normal)");
    println!("  --hr <bpm>            Requested heart rate");
    println!("  --lead <name>|all     Lead to render (default: II)");
    println!("  --seconds <s>         Trace duration (default: 10)");
    println!("  --rate <Hz>           Samples per second (default: 100)");
    println!("  --artifact <pct>      Artifact level (0-100)");
    println!("  --seed <n>            Seed the artifact noise");
    println!("  --config <file>       Load a saved configuration");
    println!("  --format csv|json     Output format (default: csv)");
    println!("  --list                List pathology keys");
    println!("  --intervals           Print rate and intervals only");
    println!("  --help, -h            Show this help message");
}

fn print_catalog() {
    for preset in ekgsim::catalog::all() {
        println!("{:<20} {} {}", preset.kind.key(), preset.display_name, preset.rate_hint);
    }
}

fn write_csv(out: &mut impl Write, strips: &[LeadStrip]) -> io::Result<()> {
    let names: Vec<&str> = strips.iter().map(|s| s.lead.name()).collect();
    writeln!(out, "t,{}", names.join(","))?;

    let len = strips.first().map_or(0, |s| s.samples.len());
    let dt = strips.first().map_or(0.0, |s| s.dt);
    for i in 0..len {
        write!(out, "{:.4}", i as f64 * dt)?;
        for strip in strips {
            write!(out, ",{:.5}", strip.samples[i])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run(opts: Options) -> ekgsim::Result<()> {
    let mut config = match &opts.config {
        Some(path) => SimulationConfig::open(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(pathology) = opts.pathology {
        config.pathology = pathology;
        config.store = ParameterStore::from_preset(pathology);
    }
    if let Some(seed) = opts.seed {
        config.seed = Some(seed);
    }

    let mut sim = config.seeded_simulator();
    if let Some(hr) = opts.hr {
        sim.set_param(Param::HeartRate, hr, LeadSelection::All);
    }
    if let Some(level) = opts.artifact {
        sim.set_param(Param::ArtifactLevel, level, LeadSelection::All);
    }

    let header = sim.header();
    if opts.intervals_only {
        println!("{header}");
        return Ok(());
    }
    info!(%header, "rendering");

    let samples = sample_count(opts.seconds, opts.rate)?;
    let leads: Vec<LeadId> = match opts.lead {
        LeadSelection::All => LeadId::ALL.to_vec(),
        LeadSelection::Lead(lead) => vec![lead],
    };
    let strips: Vec<LeadStrip> = leads
        .into_iter()
        .map(|lead| sim.strip(lead, opts.seconds, samples))
        .collect();
    debug!(leads = strips.len(), samples, "rendered strips");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let io_error = |e: io::Error| EkgError::IoError {
        message: format!("Failed to write output: {}", e),
    };
    match opts.format {
        OutputFormat::Csv => write_csv(&mut out, &strips).map_err(io_error)?,
        OutputFormat::Json => {
            let json = strips.to_json()?;
            writeln!(out, "{json}").map_err(io_error)?;
        }
    }
    out.flush().map_err(io_error)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if opts.help {
        print_help();
        return ExitCode::SUCCESS;
    }
    if opts.list {
        print_catalog();
        return ExitCode::SUCCESS;
    }

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("ekgsim")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let opts = parse_args(&args(&[])).unwrap();
        assert_eq!(opts.lead, LeadSelection::Lead(LeadId::II));
        assert_eq!(sample_count(opts.seconds, opts.rate).unwrap(), 1000);
    }

    #[test]
    fn test_parses_options() {
        let opts = parse_args(&args(&[
            "--pathology", "wpw", "--lead", "all", "--seed", "4", "--format", "json",
        ]))
        .unwrap();
        assert_eq!(opts.pathology, Some(Pathology::Wpw));
        assert_eq!(opts.lead, LeadSelection::All);
        assert_eq!(opts.seed, Some(4));
        assert_eq!(opts.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_oversized_trace() {
        let err = parse_args(&args(&["--seconds", "1e9"])).unwrap_err();
        assert!(matches!(err, EkgError::InvalidParameter { name: "seconds", .. }));

        let err = parse_args(&args(&["--seconds", "600", "--rate", "10000"])).unwrap_err();
        assert!(matches!(err, EkgError::InvalidParameter { .. }));

        assert_eq!(sample_count(100.0, 10_000.0).unwrap(), MAX_SAMPLES);
    }

    #[test]
    fn test_rejects_negative_duration() {
        assert!(parse_args(&args(&["--seconds", "-2"])).is_err());
    }

    #[test]
    fn test_bad_values() {
        assert!(parse_args(&args(&["--hr", "fast"])).is_err());
        assert!(parse_args(&args(&["--pathology", "torsades"])).is_err());
        assert!(parse_args(&args(&["--format", "xml"])).is_err());
        assert!(parse_args(&args(&["--rate", "0"])).is_err());
    }
}
