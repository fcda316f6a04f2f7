use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use vt_core::TraitCategory;

pub fn run(path: &Path) -> Result<(), String> {
    let character = super::load_character(path)?;

    // Header
    match character.generation {
        Some(generation) => println!(
            "  {} {}",
            character.name.bold(),
            format!("(generation {generation})").dimmed()
        ),
        None => println!("  {}", character.name.bold()),
    }
    println!();

    println!("  {}", character.willpower);
    match character.blood_per_turn() {
        Some(per_turn) => println!("  {} ({per_turn} per turn)", character.blood),
        None => println!("  {}", character.blood),
    }
    println!();

    if character.traits.is_empty() {
        println!("  No traits recorded.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Category", "Trait", "Rating", "Specializations"]);

        for category in TraitCategory::SEARCH_ORDER {
            for entry in character.traits.entries(category) {
                let specs = if entry.specializations.is_empty() {
                    "—".to_string()
                } else {
                    entry.specializations.join(", ")
                };
                table.add_row(vec![
                    category.to_string(),
                    entry.name.clone(),
                    entry.value.to_string(),
                    specs,
                ]);
            }
        }
        println!("{table}");
    }

    if !character.macros.is_empty() {
        println!();
        println!("  {}", "Macros".bold());
        for m in character.macros.iter() {
            println!("    {} = {}", m.name, m.expression);
        }
    }

    Ok(())
}
