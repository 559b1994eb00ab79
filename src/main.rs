// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use std::env;
use tracing::Level;

use tonal::harmony::CircleOfFifths;
use tonal::music::format_accidentals;
use tonal::{identify_chord_from_names, Chord, ChordProgression, Instrument, Note, Scale};

fn print_usage() {
    println!("TONAL - Music Theory Calculator");
    println!();
    println!("Usage: tonal <COMMAND> [ARGS] [--verbose]");
    println!();
    println!("Commands:");
    println!("  chord <NAME>                      Show the notes, alias and inversions of a chord");
    println!("  identify <NOTE> <NOTE> ...        Name the chord formed by notes (first note is the bass)");
    println!("  scale <TONIC> [MODE] [FAMILY]     Show a scale (family: diatonic, pentatonic, blues)");
    println!("  fifths <KEY>                      Show the circle of fifths for a key, e.g. Gm");
    println!("  next <KEY> <CHORD>                Suggest chords that can follow a chord in a key");
    println!("  tab <guitar|ukulele> <CHORD>      Show chord shapes for an instrument");
    println!("  --help                            Show this help message");
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn note_list(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|n| n.formatted_name())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_chord(name: &str) -> Result<Chord> {
    Chord::parse(name)
        .with_context(|| format!("Invalid chord: {}", name))?
        .ok_or_else(|| anyhow!("Not a chord name: {}", name))
}

fn parse_key(name: &str) -> Result<Scale> {
    Scale::parse(name).ok_or_else(|| anyhow!("Not a key name: {} (expected e.g. C, F#m, EbM)", name))
}

fn show_chord(name: &str) -> Result<()> {
    let chord = parse_chord(name)?;
    println!("{}", chord.formatted_name());
    println!("  Notes:      {}", note_list(chord.notes()));
    println!("  Intervals:  {:?}", chord.intervals());

    let alias = chord.alias_chord();
    if alias != chord {
        println!("  Alias:      {}", alias.formatted_name());
    }

    println!("  Inversions:");
    for i in 0..chord.inversion_count() {
        let inversion = chord.get_inversion(i);
        println!("    {}: {:<10} {}", i, inversion.formatted_name(), note_list(inversion.notes()));
    }
    Ok(())
}

fn identify(names: &[String]) -> Result<()> {
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    match identify_chord_from_names(&names) {
        Some(chord) => println!("{}", chord.formatted_name()),
        None => println!("No chord found"),
    }
    Ok(())
}

fn show_scale(tonic: &str, mode: Option<&str>, family: Option<&str>) -> Result<()> {
    let family = family.unwrap_or("diatonic");
    let mode = match mode {
        Some(mode) => mode.to_string(),
        None => tonal::ScaleFamily::from_name(family)
            .map(|f| f.default_mode().to_string())
            .unwrap_or_else(|| "major".to_string()),
    };
    let scale = Scale::from_names(tonic, &mode, family)
        .with_context(|| format!("Invalid scale: {} {} {}", tonic, mode, family))?;

    let signature = scale.signature();
    println!("{}", scale.formatted_name());
    println!("  Notes:      {}", note_list(scale.notes()));
    println!(
        "  Signature:  {} {}",
        signature.count,
        format_accidentals(signature.accidental.as_str())
    );
    if let Some(alias) = scale.mode_alias() {
        println!("  Mode alias: {}", alias);
    }
    if !scale.chords().is_empty() {
        let chords: Vec<String> = scale.chords().iter().map(|c| c.formatted_name()).collect();
        println!("  Chords:     {}", chords.join(" "));
    }
    Ok(())
}

fn show_fifths(key: &str) -> Result<()> {
    let scale = parse_key(key)?;
    let circle = CircleOfFifths::new(&scale);
    println!("{}", scale.formatted_name());
    for fifth in circle.fifths() {
        println!(
            "  {:>3}  {:<4} {:<5} {}",
            fifth.position,
            fifth.note.formatted_name(),
            fifth.degree_roman,
            fifth.degree_name
        );
    }
    Ok(())
}

fn show_next(key: &str, chord: &str) -> Result<()> {
    let scale = parse_key(key)?;
    let progression = ChordProgression::new(&scale)?;
    let chord = scale.get_chord_in_scale(&parse_chord(chord)?);
    let next: Vec<String> = progression
        .next_chords(&chord)
        .iter()
        .map(|c| c.formatted_name())
        .collect();
    println!("{} in {}: {}", chord.formatted_name(), scale.formatted_name(), next.join(" "));
    Ok(())
}

fn show_tabs(instrument: &str, chord: &str) -> Result<()> {
    let instrument =
        Instrument::from_name(instrument).ok_or_else(|| anyhow!("Unknown instrument: {}", instrument))?;
    let chord = parse_chord(chord)?;
    let library = instrument.library()?;

    let tabs = library.tabs_for_chord(&chord);
    if tabs.is_empty() {
        println!("No {} shapes for {}", instrument, chord.formatted_name());
        return Ok(());
    }

    println!("{} on {}", chord.formatted_name(), instrument);
    for tab in tabs {
        let frets: Vec<String> = tab
            .iter()
            .map(|&f| if f < 0 { "x".to_string() } else { f.to_string() })
            .collect();
        println!("  {}", frets.join(" "));
    }
    Ok(())
}

fn require(args: &[String], count: usize, message: &str) {
    if args.len() < count {
        eprintln!("Error: {}", message);
        eprintln!("Run with --help for usage information");
        std::process::exit(1);
    }
}

fn main() -> Result<()> {
    let all_args: Vec<String> = env::args().collect();
    let verbose = all_args.iter().any(|a| a == "--verbose" || a == "-v");
    let args: Vec<String> = all_args
        .into_iter()
        .filter(|a| a != "--verbose" && a != "-v")
        .collect();

    init_logging(verbose);

    if args.len() < 2 {
        println!("TONAL - Music Theory Calculator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "chord" => {
            require(&args, 3, "chord requires a chord name");
            show_chord(&args[2])?;
        }
        "identify" => {
            require(&args, 3, "identify requires at least one note");
            identify(&args[2..])?;
        }
        "scale" => {
            require(&args, 3, "scale requires a tonic");
            show_scale(&args[2], args.get(3).map(String::as_str), args.get(4).map(String::as_str))?;
        }
        "fifths" => {
            require(&args, 3, "fifths requires a key");
            show_fifths(&args[2])?;
        }
        "next" => {
            require(&args, 4, "next requires a key and a chord");
            show_next(&args[2], &args[3])?;
        }
        "tab" => {
            require(&args, 4, "tab requires an instrument and a chord");
            show_tabs(&args[2], &args[3])?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
