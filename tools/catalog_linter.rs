/// Catalog Linter — checks a catalog before the bot goes live.
///
/// Usage: catalog_linter <catalog.ron>
///
/// Loads the descriptor and symbol art, validates every status
/// template, cross-checks placeholder names against what the engine
/// supplies, and reports variety statistics. Exits nonzero when the
/// catalog would fail at runtime.
use std::collections::BTreeSet;
use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use fruit_machine::catalog::Catalog;
use fruit_machine::core::context::CONTEXT_KEYS;
use fruit_machine::core::template::template_weights;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog.ron>");
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = match Catalog::load(Path::new(&args[1])) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} machine styles, {} reels, {} status templates",
        catalog.machines.len(),
        catalog.reels.len(),
        catalog.statuses.len()
    );
    for (index, reel) in catalog.reels.iter().enumerate() {
        let art: usize = reel.symbols.iter().map(|s| s.image_files.len()).sum();
        println!(
            "  reel {}: {} symbols, {} art files",
            index,
            reel.symbols.len(),
            art
        );
    }

    let (errors, warnings) = lint_catalog(&catalog);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(catalog: &Catalog) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if catalog.statuses.is_empty() {
        errors.push("status catalog is empty; every spin would fail".to_string());
    }

    let supplied: BTreeSet<&str> = CONTEXT_KEYS.iter().copied().collect();
    let mut referenced: BTreeSet<String> = BTreeSet::new();

    for (index, status) in catalog.statuses.iter().enumerate() {
        if let Err(e) = status.validate() {
            errors.push(format!("status {}: {}", index, e));
            continue;
        }
        match status.placeholders() {
            Ok(names) => {
                for name in names {
                    if !supplied.contains(name.as_str()) {
                        errors.push(format!(
                            "status {} references unknown placeholder '{{{}}}'",
                            index, name
                        ));
                    }
                    referenced.insert(name);
                }
            }
            Err(e) => errors.push(format!("status {}: {}", index, e)),
        }
    }

    for key in CONTEXT_KEYS {
        if !referenced.contains(*key) {
            warnings.push(format!("no status ever uses '{{{}}}'", key));
        }
    }

    // Distinct caption shapes across the whole catalog, before
    // placeholder values multiply them further.
    let expansions: u64 = template_weights(&catalog.statuses, true).iter().sum();
    println!("Catalog expands into {} distinct caption shapes", expansions);
    if expansions < 10 {
        warnings.push(format!(
            "only {} distinct caption shapes; posts will repeat quickly",
            expansions
        ));
    }

    if let Err(e) = catalog.clone().into_machine() {
        errors.push(format!("catalog does not assemble: {}", e));
    }

    (errors, warnings)
}
