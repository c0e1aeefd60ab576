//! Command parsing for explorer input.

/// A parsed explorer command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Describe the current location.
    Status,
    /// Jump straight to a star by its address.
    Warp {
        /// The requested address. May be out of range.
        index: i64,
    },
    /// Fly to whatever star lies at a coordinate pair.
    Travel {
        /// Target x coordinate.
        x: f64,
        /// Target y coordinate.
        y: f64,
    },
    /// A travel command that did not carry two comma-separated values.
    MissingCoordinates,
    /// Show help.
    Help,
    /// Leave the explorer.
    Quit,
    /// Input that could not be understood.
    Unknown {
        /// The original input.
        input: String,
    },
}

const STATUS_VERBS: &[&str] = &["status", "look", "l"];
const WARP_VERBS: &[&str] = &["warp", "w"];
const TRAVEL_VERBS: &[&str] = &["travel", "t"];
const HELP_VERBS: &[&str] = &["help", "h", "?"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

/// Parse one line of explorer input.
///
/// An empty line is [`Command::Status`]. Verbs are case-insensitive.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Status;
    }

    let (verb, rest) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (input.to_lowercase(), ""),
    };
    let unknown = || Command::Unknown {
        input: input.to_string(),
    };

    if STATUS_VERBS.contains(&verb.as_str()) {
        return if rest.is_empty() {
            Command::Status
        } else {
            unknown()
        };
    }
    if WARP_VERBS.contains(&verb.as_str()) {
        return match rest.parse::<i64>() {
            Ok(index) => Command::Warp { index },
            Err(_) => unknown(),
        };
    }
    if TRAVEL_VERBS.contains(&verb.as_str()) {
        return parse_travel(rest).unwrap_or_else(unknown);
    }
    if HELP_VERBS.contains(&verb.as_str()) {
        return Command::Help;
    }
    if QUIT_VERBS.contains(&verb.as_str()) {
        return Command::Quit;
    }

    unknown()
}

/// Parse `x,y`. Extra comma-separated values are ignored.
///
/// Returns `None` when either of the first two values is not a number.
fn parse_travel(args: &str) -> Option<Command> {
    let mut parts = args.split(',');
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Some(Command::MissingCoordinates);
    };
    let x = x.trim().parse::<f64>().ok()?;
    let y = y.trim().parse::<f64>().ok()?;
    Some(Command::Travel { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_status() {
        assert_eq!(parse_command(""), Command::Status);
        assert_eq!(parse_command("   "), Command::Status);
        assert_eq!(parse_command("look"), Command::Status);
        assert_eq!(parse_command("STATUS"), Command::Status);
    }

    #[test]
    fn parse_warp() {
        assert_eq!(parse_command("warp 12"), Command::Warp { index: 12 });
        assert_eq!(parse_command("w 0"), Command::Warp { index: 0 });
        assert_eq!(parse_command("W -3"), Command::Warp { index: -3 });
    }

    #[test]
    fn warp_without_number_is_unknown() {
        assert!(matches!(parse_command("w"), Command::Unknown { .. }));
        assert!(matches!(parse_command("warp ten"), Command::Unknown { .. }));
        assert!(matches!(parse_command("w 1.5"), Command::Unknown { .. }));
    }

    #[test]
    fn parse_travel_coordinates() {
        assert_eq!(
            parse_command("travel 10.5,20"),
            Command::Travel { x: 10.5, y: 20.0 }
        );
        assert_eq!(
            parse_command("t 1, 2"),
            Command::Travel { x: 1.0, y: 2.0 }
        );
        assert_eq!(
            parse_command("t -4,7,99"),
            Command::Travel { x: -4.0, y: 7.0 }
        );
    }

    #[test]
    fn travel_needs_two_values() {
        assert_eq!(parse_command("t"), Command::MissingCoordinates);
        assert_eq!(parse_command("travel 10"), Command::MissingCoordinates);
    }

    #[test]
    fn travel_with_text_is_unknown() {
        assert_eq!(
            parse_command("t north,south"),
            Command::Unknown {
                input: "t north,south".to_string()
            }
        );
        assert!(matches!(parse_command("t 1,"), Command::Unknown { .. }));
    }

    #[test]
    fn parse_help_and_quit() {
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("Quit"), Command::Quit);
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            parse_command("dance wildly"),
            Command::Unknown {
                input: "dance wildly".to_string()
            }
        );
    }
}
