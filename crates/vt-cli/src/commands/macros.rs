use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use vt_dice::macros;

pub fn add(path: &Path, definition: &str) -> Result<(), String> {
    let (name, body) = macros::parse_definition(definition).map_err(|e| super::describe(&e))?;
    let mut character = super::load_character(path)?;
    let pool = macros::define(&mut character, &name, &body).map_err(|e| super::describe(&e))?;
    super::save_character(path, &character)?;

    println!("  Created macro {}: {body}", name.bold());
    println!("  {}", pool.describe());
    Ok(())
}

pub fn update(path: &Path, definition: &str) -> Result<(), String> {
    let (name, body) = macros::parse_definition(definition).map_err(|e| super::describe(&e))?;
    let mut character = super::load_character(path)?;
    let pool = macros::update(&mut character, &name, &body).map_err(|e| super::describe(&e))?;
    super::save_character(path, &character)?;

    println!("  Updated macro {}: {body}", name.bold());
    println!("  {}", pool.describe());
    Ok(())
}

pub fn delete(path: &Path, name: &str) -> Result<(), String> {
    let mut character = super::load_character(path)?;
    macros::delete(&mut character, name).map_err(|e| super::describe(&e))?;
    super::save_character(path, &character)?;

    println!("  Deleted macro {}", name.bold());
    Ok(())
}

pub fn list(path: &Path) -> Result<(), String> {
    let character = super::load_character(path)?;
    let rows = macros::list(&character);

    if rows.is_empty() {
        println!("  No macros defined.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Expression", "Pool"]);

    for row in &rows {
        let pool = match &row.resolution {
            Ok(r) => r.describe(),
            Err(e) => format!("invalid: {e}"),
        };
        table.add_row(vec![&row.name, &row.expression, &pool]);
    }

    println!("{table}");
    println!();
    println!("  {} macros", rows.len());
    Ok(())
}
