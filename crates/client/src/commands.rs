//! Parsing of terminal input into hangout commands.

use webcom_shared::HangoutCommand;

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Set the search text and run a search.
    Search(String),
    /// Select a hangout from the list.
    Open(String),
    /// Select a user from the last search results.
    User(String),
    /// Act on the selected hangout.
    Command(HangoutCommand),
    /// Compose and send a message to the selected hangout.
    Say(String),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command: /{0}")]
    Unknown(String),
    #[error("/{0} needs an argument")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "\
/search <text>   search hangouts (falls back to users)
/open <user>     select a hangout
/user <user>     start a hangout with a search result
/invite /accept /decline /block /unblock
/list            show hangouts
/quit
<text>           send a message to the selected hangout";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_input(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Input::Say(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let required = |label: &'static str| {
        if arg.is_empty() {
            Err(InputError::MissingArgument(label))
        } else {
            Ok(arg.to_string())
        }
    };

    let input = match name {
        "search" => Input::Search(required("search")?),
        "open" => Input::Open(required("open")?),
        "user" => Input::User(required("user")?),
        "list" => Input::List,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Command(
            other
                .parse()
                .map_err(|_| InputError::Unknown(other.to_string()))?,
        ),
    };
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input("  "), Ok(None));
        assert_eq!(parse_input("/search al"), Ok(Some(Input::Search("al".into()))));
        assert_eq!(parse_input("/open  bob "), Ok(Some(Input::Open("bob".into()))));
        assert_eq!(
            parse_input("/accept"),
            Ok(Some(Input::Command(HangoutCommand::Accept)))
        );
        assert_eq!(parse_input("hi there"), Ok(Some(Input::Say("hi there".into()))));
        assert_eq!(parse_input("/exit"), Ok(Some(Input::Quit)));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(parse_input("/open"), Err(InputError::MissingArgument("open")));
        assert_eq!(parse_input("/wave"), Err(InputError::Unknown("wave".into())));
    }
}
