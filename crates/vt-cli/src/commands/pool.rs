use std::path::Path;

pub fn run(path: &Path, expression: &str) -> Result<(), String> {
    let character = super::load_character(path)?;
    let pool = vt_dice::preview_pool(&character, expression).map_err(|e| super::describe(&e))?;

    println!("  {}", pool.describe());
    if pool.total < 0 {
        println!("  (no dice would be rolled)");
    }
    Ok(())
}
