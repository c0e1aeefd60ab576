use std::path::Path;

use colored::Colorize;
use sw_generator::UniverseConfig;
use sw_store::Store;

pub fn run(db: &Path, stars: u64, size: f64, seed: u64) -> Result<(), String> {
    let config = UniverseConfig::default()
        .with_seed(seed)
        .with_star_count(stars)
        .with_universe_size(size);
    config.validate().map_err(|e| e.to_string())?;

    let store = Store::open(db).map_err(|e| e.to_string())?;
    tracing::info!(path = %db.display(), "opened store");

    let summary = store
        .generate_and_persist(&config)
        .map_err(|e| e.to_string())?;

    println!(
        "  {} {} stars with {} planets in {}",
        "Generated".bold(),
        summary.stars,
        summary.planets,
        db.display()
    );
    if let (Some(first), Some(last)) = (summary.first_id, summary.last_id) {
        println!("  ids {first}..={last}, seed {seed}, size {size}");
    }

    Ok(())
}
