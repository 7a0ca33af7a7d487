//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `parfum_core` linkage without the Flutter runtime.
//! - Print the demo scenting tree from a throwaway in-memory store.

use chrono::Local;
use parfum_core::{open_db_in_memory, seed_demo, PersistedEnum, Scenting};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("parfum_core ping={}", parfum_core::ping());
    println!("parfum_core version={}", parfum_core::core_version());

    let scenting = match open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| seed_demo(&conn).map_err(|err| err.to_string()))
    {
        Ok(scenting) => scenting,
        Err(err) => {
            eprintln!("demo seed failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    print_tree(&scenting);
    ExitCode::SUCCESS
}

fn print_tree(scenting: &Scenting) {
    let now = Local::now();
    println!("{}", scenting.name);
    for medley in &scenting.medleys {
        println!(
            "  {} [{}] maturity={} elapsed_days={} destination={}",
            medley.name,
            medley.status.label(),
            medley.maturity_display(),
            medley.elapsed_days(now),
            medley.destination
        );
        for ingredient in &medley.ingredients {
            println!(
                "    - {} {} {}",
                ingredient.name,
                ingredient.amount,
                ingredient.unit_display()
            );
        }
    }
}
