pub mod at;
pub mod explore;
pub mod generate;
pub mod info;
pub mod near;
pub mod show;

use std::path::Path;

use sw_explore::Session;

/// Open the universe stored at `db` without creating anything.
fn open_session(db: &Path) -> Result<Session, String> {
    if !db.is_dir() {
        return Err(format!(
            "no universe at {}; run `sw generate` first",
            db.display()
        ));
    }
    Session::open(db).map_err(|e| e.to_string())
}

/// Serialize a value for `--json` output.
fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization error: {e}"))
}
