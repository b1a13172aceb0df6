/// Preview — spin a catalog from the command line.
///
/// Usage: preview <catalog.ron> [--count <n>] [--seed <n>] [--date <yyyy-mm-dd>]
///
/// Prints each spin's caption, accessibility description, and jackpot
/// flag, then a short tally. With --seed (and --date) the run is fully
/// reproducible. Set RUST_LOG=debug to watch the engine's draws.
use std::process;

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use fruit_machine::catalog::Catalog;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog_path = &args[1];
    let mut count: usize = 1;
    let mut seed: Option<u64> = None;
    let mut date: Option<NaiveDate> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = match args[i].parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        eprintln!("ERROR: invalid count '{}'", args[i]);
                        process::exit(1);
                    }
                };
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = match args[i].parse() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        eprintln!("ERROR: invalid seed '{}'", args[i]);
                        process::exit(1);
                    }
                };
            }
            "--date" if i + 1 < args.len() => {
                i += 1;
                date = match args[i].parse() {
                    Ok(d) => Some(d),
                    Err(_) => {
                        eprintln!("ERROR: invalid date '{}' (expected yyyy-mm-dd)", args[i]);
                        process::exit(1);
                    }
                };
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let catalog = match Catalog::load(std::path::Path::new(catalog_path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    let machine = match catalog.into_machine() {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("ERROR: catalog does not assemble: {}", e);
            process::exit(1);
        }
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = date.unwrap_or_else(|| Local::now().date_naive());

    let mut jackpots = 0usize;
    for _ in 0..count {
        let spin = match machine.spin(today, &mut rng) {
            Ok(spin) => spin,
            Err(e) => {
                eprintln!("ERROR: spin failed: {}", e);
                process::exit(1);
            }
        };

        println!("{}", spin.caption);
        println!("  alt: {}", spin.description);
        if spin.jackpot {
            jackpots += 1;
            println!("  JACKPOT");
        }
        println!();
    }

    println!("{} spins, {} jackpots", count, jackpots);
}

fn print_usage() {
    println!("Preview — spin a catalog from the command line.");
    println!();
    println!("Usage: preview <catalog.ron> [--count <n>] [--seed <n>] [--date <yyyy-mm-dd>]");
    println!();
    println!("  --count <n>         Number of spins (default: 1)");
    println!("  --seed <n>          Seed the RNG for a reproducible run");
    println!("  --date <yyyy-mm-dd> Date for {{month}}/{{weekday}} placeholders (default: today)");
}
