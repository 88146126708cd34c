#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Answer(String),
    NewPuzzle,
    SignOut,
    Quit,
    Help,
}

pub const HELP: &str = "type an answer and press Enter; :new for another puzzle, :logout to sign out, :quit to exit";

/// Lines starting with ':' are commands; anything else is an answer, kept verbatim.
pub fn parse_line(line: &str) -> InputCommand {
    match line.trim() {
        ":new" | ":n" => InputCommand::NewPuzzle,
        ":logout" => InputCommand::SignOut,
        ":quit" | ":q" => InputCommand::Quit,
        ":help" | ":h" => InputCommand::Help,
        _ => InputCommand::Answer(line.to_string()),
    }
}
