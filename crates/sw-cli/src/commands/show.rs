use std::path::Path;

use colored::Colorize;
use sw_core::StarId;

pub fn run(db: &Path, id: u64, json: bool) -> Result<(), String> {
    let session = super::open_session(db)?;
    let star = session.get_star(StarId(id)).map_err(|e| e.to_string())?;

    if json {
        println!("{}", super::to_json(&star)?);
        return Ok(());
    }

    println!("  {} [{}]", star.to_string().bold(), star.id.to_string().dimmed());
    println!();
    println!("  kind:       {}", star.kind);
    println!("  position:   {}, {}", star.x, star.y);

    println!();
    if star.planets.is_empty() {
        println!("  {} (none)", "Planets:".dimmed());
    } else {
        println!("  {}", "Planets:".dimmed());
        for (position, planet) in star.planets.iter().enumerate() {
            println!("    {}. {planet}", position + 1);
        }
    }

    Ok(())
}
