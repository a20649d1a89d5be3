use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Focus(usize),
    Type(Option<String>),
    Release,
    Show,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "quit" | "q" if rest.is_empty() => Ok(Command::Quit),
            "show" if rest.is_empty() => Ok(Command::Show),
            "release" if rest.is_empty() => Ok(Command::Release),
            "clear" if rest.is_empty() => Ok(Command::Type(None)),
            "focus" | "f" => rest.parse::<usize>().map(Command::Focus).map_err(|_| {
                Error::new_command(format!("focus needs a row number, got '{rest}'"))
            }),
            "set" => Ok(Command::Type(Some(rest.to_string()))),
            // anything else is typed into the focused row
            _ => Ok(Command::Type(Some(line.to_string()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse_(line: &str) -> Command {
        line.parse::<Command>().unwrap()
    }

    #[test]
    fn command_01() {
        assert_eq!(parse_("quit"), Command::Quit);
        assert_eq!(parse_("  q "), Command::Quit);
        assert_eq!(parse_("show"), Command::Show);
        assert_eq!(parse_("release"), Command::Release);
        assert_eq!(parse_("clear"), Command::Type(None));
        assert_eq!(parse_("focus 3"), Command::Focus(3));
        assert_eq!(parse_("f 0"), Command::Focus(0));
    }

    #[test]
    fn command_type() {
        assert_eq!(parse_("10"), Command::Type(Some("10".to_string())));
        assert_eq!(parse_("12.5"), Command::Type(Some("12.5".to_string())));
        assert_eq!(parse_("set 7"), Command::Type(Some("7".to_string())));
        assert_eq!(parse_("set"), Command::Type(Some(String::new())));
        assert_eq!(parse_(""), Command::Type(Some(String::new())));
        assert_eq!(parse_("abc"), Command::Type(Some("abc".to_string())));
        assert_eq!(parse_("quit now"), Command::Type(Some("quit now".to_string())));
    }

    #[test]
    fn command_invalid_focus() {
        for line in ["focus", "focus x", "focus -1"] {
            let error = line.parse::<Command>().unwrap_err();
            assert_eq!(error.kind, ErrorKind::Command);
        }
    }
}
