//! Plain-text TranscriptRepository implementation.
//!
//! One `.txt` file per session, one line per message:
//!
//! ```text
//! <timestamp> - <sender>: <content>
//! ```
//!
//! This is the only persisted state format and must stay bit-exact for
//! compatibility with previously saved sessions. The timestamp format never
//! contains `" - "` and the sender labels never contain `": "`, which is
//! what makes the line shape unambiguous.

use async_trait::async_trait;
use ordermate_core::session::{ChatMessage, Sender, TranscriptRepository};
use ordermate_core::{OrdermateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A repository storing each session transcript as a text file under a
/// conversation directory.
///
/// `persist` rewrites the whole file from the in-memory sequence on every
/// call. That is O(total transcript size) per turn; acceptable at the
/// single-user, bounded-session scale this store targets, and called out
/// here rather than hidden.
pub struct TextTranscriptRepository {
    conversation_dir: PathBuf,
}

impl TextTranscriptRepository {
    /// Creates the repository, ensuring the conversation directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(conversation_dir: impl AsRef<Path>) -> Result<Self> {
        let conversation_dir = conversation_dir.as_ref().to_path_buf();
        fs::create_dir_all(&conversation_dir)?;
        Ok(Self { conversation_dir })
    }

    /// Returns the file path for a given storage key.
    fn transcript_path(&self, storage_key: &str) -> PathBuf {
        self.conversation_dir.join(storage_key)
    }
}

/// Renders one message as its transcript line (without the terminator).
fn format_line(message: &ChatMessage) -> String {
    format!(
        "{} - {}: {}",
        message.timestamp, message.sender, message.content
    )
}

/// Parses one transcript line back into a message.
///
/// Splits once on `" - "`, then once on `": "`. Any violation of that shape
/// (including an unknown sender label) is a data-corruption fault.
fn parse_line(storage_key: &str, line_number: usize, line: &str) -> Result<ChatMessage> {
    let malformed = || OrdermateError::MalformedTranscriptLine {
        storage_key: storage_key.to_string(),
        line_number,
        line: line.to_string(),
    };

    let (timestamp, rest) = line.split_once(" - ").ok_or_else(malformed)?;
    let (sender_label, content) = rest.split_once(": ").ok_or_else(malformed)?;
    let sender = Sender::parse(sender_label).ok_or_else(malformed)?;

    Ok(ChatMessage::new(sender, content, timestamp))
}

#[async_trait]
impl TranscriptRepository for TextTranscriptRepository {
    async fn persist(&self, storage_key: &str, messages: &[ChatMessage]) -> Result<()> {
        let mut buf = String::new();
        for message in messages {
            buf.push_str(&format_line(message));
            buf.push('\n');
        }

        let path = self.transcript_path(storage_key);
        fs::write(&path, buf)?;
        tracing::debug!(path = %path.display(), messages = messages.len(), "transcript written");
        Ok(())
    }

    async fn load(&self, storage_key: &str) -> Result<Vec<ChatMessage>> {
        let path = self.transcript_path(storage_key);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        content
            .lines()
            .enumerate()
            .map(|(idx, line)| parse_line(storage_key, idx + 1, line))
            .collect()
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.conversation_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(".txt") {
                keys.push(name.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository() -> (TempDir, TextTranscriptRepository) {
        let dir = TempDir::new().unwrap();
        let repo = TextTranscriptRepository::new(dir.path().join("conversation")).unwrap();
        (dir, repo)
    }

    fn sample_messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Sender::User, "status of order 10107", "2024-03-01 10:15:00"),
            ChatMessage::new(
                Sender::Bot,
                "The STATUS of order 10107 is: Shipped.",
                "2024-03-01 10:15:01",
            ),
        ]
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let (_dir, repo) = repository();
        let messages = sample_messages();

        repo.persist("chat_rt.txt", &messages).await.unwrap();
        let loaded = repo.load("chat_rt.txt").await.unwrap();

        assert_eq!(loaded, messages);
    }

    #[tokio::test]
    async fn content_with_separators_round_trips() {
        let (_dir, repo) = repository();
        // Message content may itself contain " - " and ": "; only the first
        // occurrences in the line act as separators.
        let messages = vec![ChatMessage::new(
            Sender::Bot,
            "The STATUS of order 10107 is: Shipped - finally.",
            "2024-03-01 10:15:01",
        )];

        repo.persist("chat_sep.txt", &messages).await.unwrap();
        let loaded = repo.load("chat_sep.txt").await.unwrap();

        assert_eq!(loaded, messages);
    }

    #[tokio::test]
    async fn persist_is_a_full_rewrite() {
        let (_dir, repo) = repository();
        let messages = sample_messages();

        repo.persist("chat_rw.txt", &messages).await.unwrap();
        // Persisting a shorter sequence must replace, not append.
        repo.persist("chat_rw.txt", &messages[..1]).await.unwrap();

        let loaded = repo.load("chat_rw.txt").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], messages[0]);
    }

    #[tokio::test]
    async fn missing_transcript_is_empty_history() {
        let (_dir, repo) = repository();
        let loaded = repo.load("chat_missing.txt").await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn malformed_line_fails_the_load() {
        let (_dir, repo) = repository();
        let path = repo.transcript_path("chat_bad.txt");
        fs::write(
            &path,
            "2024-03-01 10:15:00 - Human: fine line\nthis line is garbage\n",
        )
        .unwrap();

        let err = repo.load("chat_bad.txt").await.unwrap_err();
        match err {
            OrdermateError::MalformedTranscriptLine {
                storage_key,
                line_number,
                line,
            } => {
                assert_eq!(storage_key, "chat_bad.txt");
                assert_eq!(line_number, 2);
                assert_eq!(line, "this line is garbage");
            }
            other => panic!("expected malformed-line error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_sender_label_is_corruption() {
        let (_dir, repo) = repository();
        let path = repo.transcript_path("chat_sender.txt");
        fs::write(&path, "2024-03-01 10:15:00 - Oracle: hm\n").unwrap();

        let err = repo.load("chat_sender.txt").await.unwrap_err();
        assert!(err.is_malformed_transcript());
    }

    #[tokio::test]
    async fn list_returns_sorted_storage_keys() {
        let (_dir, repo) = repository();
        repo.persist("chat_b.txt", &sample_messages()).await.unwrap();
        repo.persist("chat_a.txt", &sample_messages()).await.unwrap();

        let keys = repo.list().await.unwrap();
        assert_eq!(keys, vec!["chat_a.txt".to_string(), "chat_b.txt".to_string()]);
    }
}
