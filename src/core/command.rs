//! Command parser for the : command system

use crate::domain::dashboard::NavigationMode;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Power
    Power,

    // Actions
    Voice,
    Navigate,

    // Settings; `None` flips the current value
    Mode(Option<NavigationMode>),
    Mic(Option<bool>),
    Sound(Option<bool>),

    // App
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        "power" | "pwr" => Command::Power,

        "voice" | "say" => Command::Voice,
        "navigate" | "nav" | "go" => Command::Navigate,

        "mode" => match args {
            None => Command::Mode(None),
            Some(arg) => match arg.parse::<NavigationMode>() {
                Ok(mode) => Command::Mode(Some(mode)),
                Err(_) => Command::Unknown(input.to_string()),
            },
        },
        "indoor" => Command::Mode(Some(NavigationMode::Indoor)),
        "outdoor" => Command::Mode(Some(NavigationMode::Outdoor)),
        "mic" | "microphone" => match parse_switch(args.as_deref()) {
            Ok(value) => Command::Mic(value),
            Err(()) => Command::Unknown(input.to_string()),
        },
        "sound" | "snd" => match parse_switch(args.as_deref()) {
            Ok(value) => Command::Sound(value),
            Err(()) => Command::Unknown(input.to_string()),
        },

        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

fn parse_switch(arg: Option<&str>) -> Result<Option<bool>, ()> {
    let Some(arg) = arg else {
        return Ok(None);
    };
    match arg.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(Some(true)),
        "off" | "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action_commands() {
        assert_eq!(parse_command("power"), Command::Power);
        assert_eq!(parse_command("  PWR "), Command::Power);
        assert_eq!(parse_command("say"), Command::Voice);
        assert_eq!(parse_command("go"), Command::Navigate);
    }

    #[test]
    fn test_parse_mode_commands() {
        assert_eq!(parse_command("mode"), Command::Mode(None));
        assert_eq!(
            parse_command("mode outdoor"),
            Command::Mode(Some(NavigationMode::Outdoor))
        );
        assert_eq!(
            parse_command("indoor"),
            Command::Mode(Some(NavigationMode::Indoor))
        );
        assert_eq!(
            parse_command("mode sideways"),
            Command::Unknown("mode sideways".to_string())
        );
    }

    #[test]
    fn test_parse_switch_commands() {
        assert_eq!(parse_command("mic"), Command::Mic(None));
        assert_eq!(parse_command("mic off"), Command::Mic(Some(false)));
        assert_eq!(parse_command("sound ON"), Command::Sound(Some(true)));
        assert_eq!(
            parse_command("sound loud"),
            Command::Unknown("sound loud".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }
}
