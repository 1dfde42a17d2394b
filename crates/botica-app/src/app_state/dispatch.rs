//! Command dispatch: routes parsed commands to the appropriate handler.

use botica_common::Notification;

use super::core::ChatApp;
use super::render::{format_message, Labels};
use crate::commands::{help_text, Command};

/// Whether the chat loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

impl ChatApp {
    /// Parse and dispatch one input line.
    pub(super) async fn handle_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(Some(command)) => self.dispatch(command).await,
            Ok(None) => Flow::Continue,
            Err(e) => {
                self.notify(Notification::warning(e.to_string()));
                Flow::Continue
            }
        }
    }

    /// Dispatch a parsed [`Command`].
    pub(super) async fn dispatch(&mut self, command: Command) -> Flow {
        tracing::debug!(?command, "Dispatching command");
        match command {
            Command::Say(text) => {
                self.draft.replace(text);
                self.send_draft();
            }
            Command::Send => self.send_draft(),
            Command::ShowDraft => {
                if self.draft.is_blank() {
                    println!("(draft is empty)");
                } else {
                    println!("{}", self.draft.text());
                }
            }
            Command::ClearDraft => {
                self.draft.clear();
                self.notify(Notification::info("draft cleared"));
            }

            Command::Voice(path) => self.start_voice_capture(path),
            Command::Upload(path) => self.upload(&path).await,

            Command::Export(path) => self.export_history(path),
            Command::Copy(reply) => self.copy_reply(reply),
            Command::Save { reply, path } => self.save_reply(reply, path),

            Command::Speak(reply) => self.speak_reply(reply),
            Command::Pause => self.pause_speech(),
            Command::Resume => self.resume_speech(),
            Command::Stop => self.stop_speech(),

            Command::History => self.print_history(),
            Command::Usage => {
                let usage = self.session.usage();
                println!(
                    "tokens: {} in, {} out, {} total",
                    usage.input_tokens,
                    usage.output_tokens,
                    usage.total_tokens()
                );
            }
            Command::Help => println!("{}", help_text()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// The chosen reply, or the latest one. Misses are reported and yield
    /// `None`.
    pub(super) fn pick_reply(&self, reply: Option<usize>, action: &str) -> Option<String> {
        match reply {
            None => {
                let last = self.session.last_assistant();
                if last.is_none() {
                    self.notify(Notification::info(format!("no reply to {action} yet")));
                }
                last
            }
            Some(number) => {
                let chosen = self.session.assistant_reply(number);
                if chosen.is_none() {
                    self.notify(Notification::warning(format!(
                        "message {number} is not a reply (see /history)"
                    )));
                }
                chosen
            }
        }
    }

    fn print_history(&self) {
        let history = self.session.snapshot();
        if history.is_empty() {
            println!("(no messages yet)");
            return;
        }
        let labels = Labels::from(&self.config.export);
        for (number, message) in history.iter().enumerate() {
            println!("[{}] {}", number + 1, format_message(message, &labels));
        }
    }
}
