//! Compose the upload stream for a saved jet configuration without a simulator attached.
//!
//! Examples:
//!   jafdtc-gen --config ".\\strike.json"
//!   jafdtc-gen --config ".\\strike.json" --out ".\\strike.wire.json" --summary
//!   jafdtc-gen --config ".\\strike.json" --settings ".\\upload.json" --query-attempts 2
//!   jafdtc-gen --list-devices
//!
//! Notes:
//! - Queries go to an in-process loopback that only answers the preflight, so the DSMS
//!   builder falls back to cold-start loadout and profile assumptions.
//! - Without --config an empty configuration is composed (start/end markers only).

use std::{fs, path::PathBuf, sync::Arc};

use chrono::Local;
use clap::Parser;
use serde::Serialize;

use jafdtc_core::a10c::names::QUERY_PREFLIGHT;
use jafdtc_core::prelude::*;

// ───────────────────────────── CLI Args ─────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "jafdtc-gen",
    version,
    about = "Compose DCS avionics upload streams"
)]
struct Args {
    /// Configuration JSON to compose
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Airframe the configuration belongs to
    #[arg(long, default_value = "a10c")]
    airframe: Airframe,

    /// Output path for the wire text (defaults to stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Upload settings JSON (base wait, query budget, markers)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Override the number of query polling attempts
    #[arg(long)]
    query_attempts: Option<u32>,

    /// Override the base wait after each action, in ms
    #[arg(long)]
    base_wait: Option<u64>,

    /// Run the preflight query before composing
    #[arg(long)]
    preflight: bool,

    /// Print a JSON summary of the composed upload to stderr
    #[arg(long)]
    summary: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the airframe's devices and actions and exit
    #[arg(long)]
    list_devices: bool,
}

// ───────────────────────────── Logger ─────────────────────────────

#[derive(Clone)]
struct StderrLogger {
    verbose: bool,
}

impl CoreLog for StderrLogger {
    fn info(&self, msg: &str) {
        eprintln!("INFO:  {msg}");
    }
    fn warn(&self, msg: &str) {
        eprintln!("WARN:  {msg}");
    }
    fn error(&self, msg: &str) {
        eprintln!("ERROR: {msg}");
    }
    fn debug(&self, msg: &str) {
        if self.verbose {
            eprintln!("DEBUG: {msg}");
        }
    }
}

// ───────────────────────────── Summary ─────────────────────────────

#[derive(Debug, Serialize)]
struct Summary<'a> {
    airframe: &'a str,
    configuration: &'a str,
    edited_systems: Vec<&'static str>,
    commands: usize,
    bytes: usize,
    composed_at: String,
}

// ───────────────────────────── main ─────────────────────────────

fn main() -> Result<(), String> {
    let args = Args::parse();

    if args.list_devices {
        print_devices(&A10C_CATALOG);
        return Ok(());
    }

    let core_log: Arc<dyn CoreLog> = Arc::new(StderrLogger {
        verbose: args.verbose,
    });

    let mut settings = match args.settings.as_ref() {
        Some(p) => UploadSettings::load(p)?,
        None => UploadSettings::default(),
    };
    if let Some(n) = args.query_attempts {
        settings.query_attempts = n;
    }
    if let Some(ms) = args.base_wait {
        settings.base_wait_ms = ms;
    }
    settings.preflight |= args.preflight;

    let config = match args.config.as_ref() {
        Some(p) => {
            core_log.info(&format!("Configuration: {}", p.display()));
            let text =
                fs::read_to_string(p).map_err(|e| format!("read {}: {e}", p.display()))?;
            A10CConfiguration::from_json(&text)?
        }
        None => {
            core_log.warn("No --config given, composing an empty configuration");
            args.airframe.create_configuration("Untitled")
        }
    };

    // Dry-run link: answer the preflight, stay silent on everything else.
    let transport = Arc::new(LoopbackTransport::answering(|func, _| {
        (func == QUERY_PREFLIGHT).then(|| "ready=1".to_string())
    }));
    let agent = A10CUploadAgent::new(
        &config,
        transport.clone(),
        Arc::clone(&core_log),
        settings,
    );
    agent.load().map_err(|e| format!("upload failed: {e}"))?;

    let wire = transport
        .sent()
        .pop()
        .ok_or_else(|| "upload produced no payload".to_string())?;

    match args.out.as_ref() {
        Some(out) => {
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("create output dir {}: {e}", parent.display()))?;
            }
            fs::write(out, &wire).map_err(|e| format!("write {}: {e}", out.display()))?;
            core_log.info(&format!("✅ Wrote {}", out.display()));
        }
        None => println!("{wire}"),
    }

    if args.summary {
        let commands = serde_json::from_str::<Vec<serde_json::Value>>(&wire)
            .map(|v| v.len())
            .map_err(|e| format!("re-read wire text: {e}"))?;
        let summary = Summary {
            airframe: args.airframe.name(),
            configuration: &config.meta.name,
            edited_systems: config.edited_systems().iter().map(SystemTag::name).collect(),
            commands,
            bytes: wire.len(),
            composed_at: Local::now().to_rfc3339(),
        };
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("write summary: {e}"))?;
        eprintln!("{text}");
    }
    Ok(())
}

// ───────────────────────────── helpers ─────────────────────────────

fn print_devices(catalog: &Catalog) {
    println!("{} devices:", catalog.airframe);
    for dev in catalog.iter() {
        let mut line = format!("  {:<5} ({:>2}):", dev.name, dev.id);
        let indent = line.len();
        for a in dev.action_names() {
            if line.len() + 1 + a.len() > 80 {
                println!("{line}");
                line = " ".repeat(indent);
            }
            line.push(' ');
            line.push_str(a);
        }
        println!("{line}");
    }
}
