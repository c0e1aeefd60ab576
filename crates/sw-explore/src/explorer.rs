//! The explorer command loop.

use sw_core::StarId;

use crate::command::{Command, parse_command};
use crate::error::{ExploreError, ExploreResult};
use crate::session::Session;

/// Half-width of the box searched for nearby stars.
pub const NEARBY_RADIUS: f64 = 40.0;

/// Address every exploration starts at.
pub const START_LOCATION: StarId = StarId(0);

const HELP_TEXT: &str = "Commands:\n\
    status (or look, or an empty line) - describe where you are\n\
    warp <index> (or w) - jump to the star at an address\n\
    travel <x>,<y> (or t) - fly to the star at a coordinate\n\
    help - show this text\n\
    quit (or q) - leave";

/// Walks a universe one command at a time.
#[derive(Debug)]
pub struct Explorer {
    session: Session,
    location: StarId,
    finished: bool,
}

impl Explorer {
    /// Start exploring at [`START_LOCATION`].
    pub fn new(session: Session) -> Self {
        Self::at(session, START_LOCATION)
    }

    /// Start exploring at a specific address.
    pub fn at(session: Session, location: StarId) -> Self {
        Self {
            session,
            location,
            finished: false,
        }
    }

    /// The session being explored.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current address.
    pub fn location(&self) -> StarId {
        self.location
    }

    /// Whether the player has quit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Process one line of input and return the response.
    pub fn process(&mut self, input: &str) -> ExploreResult<String> {
        let command = parse_command(input);
        self.execute(command)
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> ExploreResult<String> {
        tracing::trace!(?command, location = %self.location, "explorer command");
        match command {
            Command::Status => self.status(),
            Command::Warp { index } => self.do_warp(index),
            Command::Travel { x, y } => self.do_travel(x, y),
            Command::MissingCoordinates => {
                Ok("Please enter 2 numbers separated by a comma!".to_string())
            }
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::Quit => {
                self.finished = true;
                Ok("Quitting".to_string())
            }
            Command::Unknown { .. } => Ok("Not understood input".to_string()),
        }
    }

    /// Describe the current star, its planets, and its neighbourhood.
    pub fn status(&self) -> ExploreResult<String> {
        let star = match self.session.get_star(self.location) {
            Ok(star) => star,
            Err(ExploreError::Store(e)) if e.is_not_found() => {
                return Err(ExploreError::Lost(self.location));
            }
            Err(e) => return Err(e),
        };

        let mut out = format!("You are at address {}\n{star}\nPlanets:\n", self.location);
        for planet in &star.planets {
            out.push_str(&format!("{planet}\n"));
        }
        out.push_str("\nNearby stars:");
        for nearby in self.session.stars_within(star.x, star.y, NEARBY_RADIUS)? {
            out.push_str(&format!("\n{nearby}"));
        }
        Ok(out)
    }

    fn do_warp(&mut self, index: i64) -> ExploreResult<String> {
        let target = match u64::try_from(index) {
            Ok(id) if id < self.session.star_count() => StarId(id),
            _ => return Ok("Please enter a number in range".to_string()),
        };
        self.location = target;
        self.status()
    }

    fn do_travel(&mut self, x: f64, y: f64) -> ExploreResult<String> {
        let Some(star) = self.session.star_at(x, y)? else {
            return Ok("There is no star there!".to_string());
        };
        self.location = star.id;
        let status = self.status()?;
        Ok(format!("Going to {star} ({}) at {x}, {y}\n{status}", star.id))
    }
}
