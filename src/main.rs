// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::process;

use anyhow::{anyhow, Context, Result};
use fretlab::config::{validate_config, ConfigEvent, ConfigWatcher, ViewConfig};
use fretlab::{chord_names, music::key, scale_names, tonality_names, view, ChordType, ScaleType};
use tracing::{info, warn, Level};

fn print_usage() {
    println!("fretlab - Scales and chords on the fretboard");
    println!();
    println!("Usage: fretlab <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  --scale <TONALITY> <SCALE>     Show a scale (e.g. --scale \"F# minor\" minor)");
    println!("  --chord <ROOT> <CHORD>         Show a chord (e.g. --chord Bb dominant7)");
    println!("  --cycle scale|chord <NAME> [minor]");
    println!("                                 Show NAME on all 12 keys of the cycle of fifths");
    println!("  --view <FILE>                  Show the view described by a YAML/TOML file");
    println!("  --watch <FILE>                 Like --view, redrawing when the file changes");
    println!("  --list-scales                  List scale types");
    println!("  --list-chords                  List chord types");
    println!("  --list-tonalities              List tonalities and their key signatures");
    println!("  --help                         Show this help message");
    println!();
    println!("Options:");
    println!("  --strings <N>                  Number of strings, 4-10 (default 7)");
    println!("  --frets <N>                    Number of frets, 0-24 (default 12)");
    println!("  --columns <N>                  Diagrams per row (default 3)");
    println!("  --yaml                         Print positions as YAML instead of diagrams");
    println!("  -v, -vv                        More logging on stderr");
}

/// Options shared by every display command
#[derive(Debug, Default)]
struct Options {
    strings: Option<usize>,
    frets: Option<usize>,
    columns: Option<usize>,
    yaml: bool,
    verbosity: u8,
}

impl Options {
    fn apply(&self, config: &mut ViewConfig) {
        if let Some(strings) = self.strings {
            config.strings = strings;
        }
        if let Some(frets) = self.frets {
            config.frets = frets;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
    }
}

/// Split arguments into positionals and shared options
fn parse_args(args: &[String]) -> Result<(Vec<String>, Options)> {
    let mut positional = Vec::new();
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--strings" => options.strings = Some(parse_number(arg, iter.next())?),
            "--frets" => options.frets = Some(parse_number(arg, iter.next())?),
            "--columns" => options.columns = Some(parse_number(arg, iter.next())?),
            "--yaml" => options.yaml = true,
            "-v" => options.verbosity += 1,
            "-vv" => options.verbosity += 2,
            _ => positional.push(arg.clone()),
        }
    }

    Ok((positional, options))
}

fn parse_number(flag: &str, value: Option<&String>) -> Result<usize> {
    let value = value.ok_or_else(|| anyhow!("{} requires a number", flag))?;
    value
        .parse()
        .map_err(|_| anyhow!("Invalid number for {}: {}", flag, value))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn show(config: &ViewConfig, options: &Options) -> Result<()> {
    config.validate()?;
    let rendered = view::build(config)?;
    info!(boards = rendered.boards.len(), "rendering view");
    if options.yaml {
        print!("{}", rendered.to_yaml()?);
    } else {
        println!("{}", rendered.to_text());
    }
    Ok(())
}

fn watch(path: &str, options: &Options) -> Result<()> {
    let mut file = validate_config(path)?;
    options.apply(&mut file.view);
    show(&file.view, options)?;

    let watcher = ConfigWatcher::new(path, None)?;
    info!(path, "watching view file (press Ctrl+C to stop)");

    while let Some(event) = watcher.recv() {
        match event {
            ConfigEvent::Reloaded(mut file) => {
                options.apply(&mut file.view);
                println!();
                if let Err(e) = show(&file.view, options) {
                    warn!("{:#}", e);
                }
            }
            ConfigEvent::Error(message) => warn!("{}", message),
        }
    }

    Ok(())
}

fn list_scales() {
    for st in ScaleType::all() {
        let intervals: Vec<String> = st.intervals().iter().map(|i| i.to_string()).collect();
        println!("{:<20} {:<20} {}", st.name(), st.label(), intervals.join(" "));
    }
}

fn list_chords() {
    for ct in ChordType::all() {
        let degrees: Vec<String> = ct.degrees().iter().map(|d| d.to_string()).collect();
        println!("{:<20} {:<10} {}", ct.name(), ct.symbol(), degrees.join(" "));
    }
}

fn list_tonalities() {
    for tonality in tonality_names() {
        if let Some(signature) = key::find(tonality) {
            println!("{}", signature);
        }
    }
}

fn require<'a>(positional: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    positional
        .get(index)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("{} requires {}", positional[0], what))
}

fn run(positional: &[String], options: &Options) -> Result<()> {
    let mut config = ViewConfig::default();

    match positional[0].as_str() {
        "--scale" => {
            config.tonality = require(positional, 1, "a tonality")?.to_string();
            config.scale = Some(require(positional, 2, "a scale type")?.to_string());
        }
        "--chord" => {
            config.tonality = require(positional, 1, "a root")?.to_string();
            config.chord = Some(require(positional, 2, "a chord type")?.to_string());
        }
        "--cycle" => {
            let name = require(positional, 2, "a scale or chord name")?.to_string();
            match require(positional, 1, "'scale' or 'chord'")? {
                "scale" => config.scale = Some(name),
                "chord" => config.chord = Some(name),
                other => return Err(anyhow!("Expected 'scale' or 'chord', got '{}'", other)),
            }
            config.cycle = true;
            config.minor = positional.get(3).map(|s| s == "minor").unwrap_or(false);
        }
        "--view" => {
            let path = require(positional, 1, "a file")?;
            config = validate_config(path)
                .with_context(|| format!("Cannot use view file {}", path))?
                .view;
        }
        "--watch" => return watch(require(positional, 1, "a file")?, options),
        "--list-scales" => {
            list_scales();
            return Ok(());
        }
        "--list-chords" => {
            list_chords();
            return Ok(());
        }
        "--list-tonalities" => {
            list_tonalities();
            return Ok(());
        }
        "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        other => {
            eprintln!("Unknown option: {}", other);
            eprintln!("Scales: {}", scale_names().join(", "));
            eprintln!("Chords: {}", chord_names().join(", "));
            print_usage();
            process::exit(1);
        }
    }

    options.apply(&mut config);
    show(&config, options)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (positional, options) = parse_args(&args)?;
    init_logging(options.verbosity);

    if positional.is_empty() {
        println!("fretlab - Scales and chords on the fretboard");
        println!("Run with --help for usage information");
        return Ok(());
    }

    run(&positional, &options)
}
