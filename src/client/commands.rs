//! Line command parser for the remote client.
//!
//! Turns typed input like `answer B` or `jump 3` into protocol messages.

use crate::models::Label;
use crate::protocol::ClientMessage;
use crate::session::Direction;

/// What a typed line asks the client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Forward a command to the server.
    Send(ClientMessage),
    /// Print the command list.
    Help,
    /// Leave the client.
    Quit,
}

pub const HELP: &str = r#"Available commands:
  start          - Start a freshly shuffled quiz
  answer <L>     - Answer the current question (A-D); a bare letter works too
  next / n       - Go to the next question
  prev / p       - Go to the previous question
  jump <n>       - Go to question number n
  finish         - End the quiz and show results
  reset          - Discard the quiz
  status / s     - Show the current question again
  help / ?       - Show this help
  quit / exit    - Leave"#;

/// Parse one line. Blank input yields `Ok(None)`.
pub fn parse_command(input: &str) -> Result<Option<LineCommand>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    let parsed = match command.as_str() {
        "start" => send(ClientMessage::Start),
        "answer" => cmd_answer(args)?,
        "next" | "n" => send(ClientMessage::Navigate {
            direction: Direction::Next,
        }),
        "prev" | "previous" | "p" => send(ClientMessage::Navigate {
            direction: Direction::Previous,
        }),
        "jump" => cmd_jump(args)?,
        "finish" => send(ClientMessage::Finish),
        "reset" => send(ClientMessage::Reset),
        "status" | "s" => send(ClientMessage::Status),
        "help" | "?" => LineCommand::Help,
        "quit" | "exit" => LineCommand::Quit,
        other => match single_label(other) {
            Some(label) => send(ClientMessage::Submit { label }),
            None => {
                return Err(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    other
                ));
            }
        },
    };

    Ok(Some(parsed))
}

fn send(msg: ClientMessage) -> LineCommand {
    LineCommand::Send(msg)
}

fn cmd_answer(args: &[&str]) -> Result<LineCommand, String> {
    let Some(arg) = args.first() else {
        return Err("Usage: answer <A-D>".to_string());
    };
    // The server has the final word on whether the label fits the question.
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(label), None) => Ok(send(ClientMessage::Submit { label })),
        _ => Err(format!("Not a single option letter: {}", arg)),
    }
}

fn cmd_jump(args: &[&str]) -> Result<LineCommand, String> {
    let Some(arg) = args.first() else {
        return Err("Usage: jump <question number>".to_string());
    };
    match arg.parse::<usize>() {
        Ok(number) if number >= 1 => Ok(send(ClientMessage::Jump { index: number - 1 })),
        _ => Err(format!("Invalid question number: {}", arg)),
    }
}

fn single_label(word: &str) -> Option<char> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Label::from_char(c).map(Label::as_char),
        _ => None,
    }
}
