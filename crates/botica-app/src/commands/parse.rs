use std::path::PathBuf;

use super::command_enum::{Command, CommandError};

impl Command {
    /// Parse one input line. Blank lines yield `None`. Plain text is kept
    /// verbatim; trimming only decides whether the line is a command.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let Some(rest) = trimmed.strip_prefix('/') else {
            return Ok(Some(Command::Say(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };
        let path = arg.map(PathBuf::from);

        let command = match name.to_ascii_lowercase().as_str() {
            "send" => Command::Send,
            "draft" => Command::ShowDraft,
            "clear" => Command::ClearDraft,
            "voice" => Command::Voice(path.ok_or(CommandError::MissingArgument("voice"))?),
            "upload" => Command::Upload(path.ok_or(CommandError::MissingArgument("upload"))?),
            "export" => Command::Export(path),
            "copy" => Command::Copy(message_number("copy", arg)?),
            "save" => {
                // `/save [n] [file]`: a leading number picks the reply.
                let split = arg.map(|a| a.split_once(char::is_whitespace).unwrap_or((a, "")));
                let (reply, file) = match split {
                    Some((first, rest)) if first.bytes().all(|b| b.is_ascii_digit()) => (
                        message_number("save", Some(first))?,
                        Some(rest.trim()).filter(|r| !r.is_empty()),
                    ),
                    _ => (None, arg),
                };
                Command::Save {
                    reply,
                    path: file.map(PathBuf::from),
                }
            }
            "speak" => Command::Speak(message_number("speak", arg)?),
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "stop" => Command::Stop,
            "history" => Command::History,
            "usage" => Command::Usage,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Optional 1-based message number argument.
fn message_number(command: &'static str, arg: Option<&str>) -> Result<Option<usize>, CommandError> {
    match arg {
        None => Ok(None),
        Some(arg) => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(CommandError::BadMessageNumber(command)),
        },
    }
}
