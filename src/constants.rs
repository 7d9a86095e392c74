//! Centralized constants for rosh.
//!
//! Default connection settings, prompt labels and fixed strings live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "rosh";

/// Default server host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default server port (the Ollama default).
pub const DEFAULT_PORT: u16 = 11434;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Path of the generation endpoint on the server.
pub const GENERATE_PATH: &str = "/api/generate";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "prompt_history.txt";

// --- Input ---

/// Label shown before the first line of a prompt.
pub const PROMPT_LABEL: &str = "Enter prompt: ";

/// Label shown before continuation lines in multi-line mode.
pub const CONTINUATION_LABEL: &str = "... ";

/// Input line that ends the session.
pub const BYE_COMMAND: &str = "/bye";

/// Number of consecutive blank lines that submit a multi-line prompt.
pub const SUBMIT_BLANK_LINES: usize = 2;

// --- Output ---

/// Character repeated across the terminal to separate turns.
pub const SEPARATOR_CHAR: char = '*';

/// Terminal width used when the real width cannot be determined.
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;
