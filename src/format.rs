use crate::constants::PROMPT_LABEL;
use crate::generate::GenerateResponse;

/// Format a response framed by separator lines.
///
/// The block ends with a single newline after the closing separator.
pub fn response_block(response: &GenerateResponse, separator: &str) -> String {
    format!(
        "{sep}\n[*] Model: {}\n[*] Created At: {}\n[*] Response: {}\n[*] Done: {}\n{sep}\n",
        response.model,
        response.created_at,
        response.response,
        response.done,
        sep = separator,
    )
}

/// Format one transcript entry: the prompt, the framed response and a blank line.
pub fn transcript_block(prompt: &str, response: &GenerateResponse, separator: &str) -> String {
    format!(
        "{}{}\n{}\n",
        PROMPT_LABEL,
        prompt,
        response_block(response, separator)
    )
}
