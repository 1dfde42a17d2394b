/// `(usage, description)` pairs shown by `/help`.
pub const HELP: &[(&str, &str)] = &[
    ("<text>", "send text as a message"),
    ("/send", "send the current draft"),
    ("/draft", "show the draft"),
    ("/clear", "clear the draft"),
    ("/voice <file>", "transcribe an audio file into the draft"),
    ("/upload <file>", "load a text or PDF file into the draft"),
    ("/export [file]", "export the conversation as a paginated document"),
    ("/copy [n]", "copy a reply (default: the last) to the clipboard"),
    ("/save [n] [file]", "save a reply as a text file"),
    ("/speak [n]", "read a reply aloud"),
    ("/pause", "pause speech"),
    ("/resume", "resume speech"),
    ("/stop", "stop speech"),
    ("/history", "print the conversation with message numbers"),
    ("/usage", "print token usage"),
    ("/help", "show this help"),
    ("/quit", "exit"),
];

/// Render the help table with aligned columns.
pub fn help_text() -> String {
    let width = HELP.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    HELP.iter()
        .map(|(usage, description)| format!("  {usage:<width$}  {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}
