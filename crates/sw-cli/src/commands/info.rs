use std::path::Path;

use colored::Colorize;

pub fn run(db: &Path) -> Result<(), String> {
    let session = super::open_session(db)?;
    let meta = session.meta();
    let indexed = session.store().is_indexed().map_err(|e| e.to_string())?;

    println!("  {} {}", "Universe".bold(), db.display());
    println!();
    println!("  size:       {}", meta.universe_size);
    println!("  stars:      {}", meta.star_count);
    println!("  seed:       {}", meta.seed);
    println!("  runs:       {}", meta.runs.len());
    println!("  created:    {}", meta.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "  index:      {}",
        if indexed { "built" } else { "stale" }
    );

    Ok(())
}
