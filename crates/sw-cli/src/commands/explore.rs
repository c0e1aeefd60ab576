use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use sw_explore::Explorer;

pub fn run(db: &Path) -> Result<(), String> {
    let session = super::open_session(db)?;
    let star_count = session.star_count();
    let mut explorer = Explorer::new(session);

    println!("  {} {}", "Exploring".bold(), db.display());
    println!("  Stars: {star_count} | Type 'help' for commands, 'quit' to exit.\n");
    match explorer.status() {
        Ok(status) => println!("{status}\n"),
        Err(e) => println!("{}\n", e.to_string().yellow()),
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !explorer.is_finished() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        match explorer.process(&line) {
            Ok(output) => println!("{output}\n"),
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    Ok(())
}
