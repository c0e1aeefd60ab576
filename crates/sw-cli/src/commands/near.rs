use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(db: &Path, x: f64, y: f64, radius: f64, json: bool) -> Result<(), String> {
    let session = super::open_session(db)?;
    let stars = session
        .stars_within(x, y, radius)
        .map_err(|e| e.to_string())?;

    if json {
        println!("{}", super::to_json(&stars)?);
        return Ok(());
    }

    if stars.is_empty() {
        println!("  No stars found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "X", "Y", "Planets"]);

    for star in &stars {
        table.add_row(vec![
            star.id.to_string(),
            star.kind.to_string(),
            format!("{:.1}", star.x),
            format!("{:.1}", star.y),
            star.planets.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} star{}",
        stars.len(),
        if stars.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
