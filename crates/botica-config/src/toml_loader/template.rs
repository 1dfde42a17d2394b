//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Botica Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The Gemini API key is read from GEMINI_API_KEY (environment or .env).

[gemini]
# model = "gemini-1.5-pro"
# api_base = "https://generativelanguage.googleapis.com/v1beta/models"
# temperature = 0.7          # 0.0-2.0
# max_tokens = 4096          # 1-65536
# connect_timeout_secs = 10  # 1-300
# request_timeout_secs = 120 # 1-3600

[session]
# history_file = "/path/to/chatHistory.json"
# turn_timeout_secs = 60     # unset: wait for the upstream call to settle

[voice]
# enabled = true

[voice.transcription]
# Speech-to-text uses OPENAI_API_KEY.
# model = "whisper-1"
# language = "pt"

[voice.speech]
# command = "espeak-ng"
# args = ["-v", "pt-br"]

[import]
# max_chars = 1000           # 1-100000

[export]
# directory = "/path/to/exports"
# file_name = "chat_history.pdf"
# response_file_name = "response.txt"
# wrap_width = 90            # 20-400
# page_height = 280         # 1-10000
# top_margin = 10           # 0-500
# line_height = 7            # 1-50
# message_gap = 5            # 0-50
# user_label = "You: "
# assistant_label = "Assistant: "

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
