//! Bounded context window and prompt assembly.
//!
//! The generator sees at most the last [`WINDOW_SIZE`] messages of the
//! conversation; the persisted transcript keeps the full history. The exact
//! prompt framing (one `"<Role>: <content>"` line per message, trailing
//! `"Bot:"` cue) is what the generator was tuned against and must not drift.

use crate::session::{ChatMessage, Sender};

/// Maximum number of history messages fed to the generator
/// (5 user/bot turn pairs).
pub const WINDOW_SIZE: usize = 10;

/// The unterminated cue the prompt ends with, and the marker response
/// extraction searches for.
pub const BOT_CUE: &str = "Bot:";

/// The most recent [`WINDOW_SIZE`] messages of `history`.
///
/// Older messages are dropped from the generator's working set only; the
/// transcript itself is never trimmed.
pub fn recent(history: &[ChatMessage]) -> &[ChatMessage] {
    let start = history.len().saturating_sub(WINDOW_SIZE);
    &history[start..]
}

/// Assembles the generation prompt from prior history and the new input.
///
/// Each retained message becomes one `"<Role>: <content>"` line in
/// chronological order, followed by the new input as a `"Human:"` line and
/// the final unterminated `"Bot:"` cue.
pub fn build_prompt(history: &[ChatMessage], new_input: &str) -> String {
    let mut lines: Vec<String> = recent(history)
        .iter()
        .map(|m| format!("{}: {}", m.sender, m.content))
        .collect();
    lines.push(format!("{}: {}", Sender::User, new_input));
    lines.push(BOT_CUE.to_string());
    lines.join("\n")
}

/// Extracts the reply from raw generated text.
///
/// Completion-style generators echo the prompt, so the reply is whatever
/// follows the *last* `"Bot:"` cue. If the cue is absent the whole text is
/// returned trimmed rather than failing the turn.
pub fn extract_response(generated: &str) -> String {
    match generated.rfind(BOT_CUE) {
        Some(idx) => generated[idx + BOT_CUE.len()..].trim().to_string(),
        None => generated.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ChatMessage;

    fn history_of(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("u{}", i))
                } else {
                    ChatMessage::bot(format!("b{}", i))
                }
            })
            .collect()
    }

    #[test]
    fn window_keeps_only_most_recent_messages() {
        let history = history_of(30);
        let window = recent(&history);
        assert_eq!(window.len(), WINDOW_SIZE);
        assert_eq!(window[0].content, "u20");
        assert_eq!(window[9].content, "b29");
    }

    #[test]
    fn short_history_is_kept_whole() {
        let history = history_of(3);
        assert_eq!(recent(&history).len(), 3);
    }

    #[test]
    fn prompt_framing_is_exact() {
        let history = vec![ChatMessage::user("hi"), ChatMessage::bot("hello")];
        let prompt = build_prompt(&history, "how are you");
        assert_eq!(prompt, "Human: hi\nBot: hello\nHuman: how are you\nBot:");
    }

    #[test]
    fn prompt_only_covers_the_window() {
        let history = history_of(30);
        let prompt = build_prompt(&history, "latest");
        assert!(!prompt.contains("u18"));
        assert!(prompt.contains("u20"));
        // window lines + new input line + cue line
        assert_eq!(prompt.lines().count(), WINDOW_SIZE + 2);
    }

    #[test]
    fn response_follows_last_cue() {
        let generated = "Human: hi\nBot: hello\nHuman: again\nBot:  sure thing  ";
        assert_eq!(extract_response(generated), "sure thing");
    }

    #[test]
    fn missing_cue_falls_back_to_whole_text() {
        assert_eq!(extract_response("  plain answer \n"), "plain answer");
    }
}
