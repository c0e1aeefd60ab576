use std::path::Path;

pub fn run(db: &Path, x: f64, y: f64) -> Result<(), String> {
    let session = super::open_session(db)?;
    match session.star_at(x, y).map_err(|e| e.to_string())? {
        Some(star) => println!("  {star} ({})", star.id),
        None => println!("  There is no star there!"),
    }
    Ok(())
}
