//! End-to-end checks: the session controller driving the text transcript
//! store against real files.

#[cfg(test)]
mod tests {
    use crate::text_transcript::TextTranscriptRepository;
    use async_trait::async_trait;
    use ordermate_core::generator::{GenerationParams, Generator};
    use ordermate_core::orders::{CellValue, OrderRow, OrderTable};
    use ordermate_core::session::{
        ChatMode, SessionController, TranscriptRepository, TurnOutcome,
    };
    use ordermate_core::{OrdermateError, Result};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    // Structured-query turns never reach the generator; fail loudly if one does.
    struct UnreachableGenerator;

    #[async_trait]
    impl Generator for UnreachableGenerator {
        async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String> {
            Err(OrdermateError::internal("generator should not be called"))
        }
    }

    fn shipped_order_table() -> Arc<OrderTable> {
        let mut table = OrderTable::sales_orders();
        table.push_row(
            OrderRow::new(10107).with_cell("STATUS", CellValue::Text("Shipped".into())),
        );
        Arc::new(table)
    }

    #[tokio::test]
    async fn structured_turn_writes_one_line_per_message() {
        let dir = TempDir::new().unwrap();
        let conversation_dir = dir.path().join("conversation");
        let repository = Arc::new(TextTranscriptRepository::new(&conversation_dir).unwrap());

        let mut controller = SessionController::new(
            ChatMode::StructuredQuery,
            repository.clone(),
            Arc::new(UnreachableGenerator),
            shipped_order_table(),
        );

        let outcome = controller.handle_turn("status of order 10107").await.unwrap();
        let TurnOutcome::Reply(reply) = outcome else {
            panic!("expected a reply");
        };
        assert_eq!(reply.content, "The STATUS of order 10107 is: Shipped.");

        let path = conversation_dir.join(&controller.session().storage_key);
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" - Human: status of order 10107"));
        assert!(lines[1].contains(" - Bot: The STATUS of order 10107 is: Shipped."));

        // What was written loads back as the exact in-memory sequence.
        let loaded = repository
            .load(&controller.session().storage_key)
            .await
            .unwrap();
        assert_eq!(&loaded, &controller.session().messages);
    }

    #[tokio::test]
    async fn empty_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let conversation_dir = dir.path().join("conversation");
        let repository = Arc::new(TextTranscriptRepository::new(&conversation_dir).unwrap());

        let mut controller = SessionController::new(
            ChatMode::StructuredQuery,
            repository,
            Arc::new(UnreachableGenerator),
            shipped_order_table(),
        );

        let outcome = controller.handle_turn("").await.unwrap();
        assert_eq!(outcome, TurnOutcome::Ignored);

        let path = conversation_dir.join(&controller.session().storage_key);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn resumed_session_extends_its_own_transcript() {
        let dir = TempDir::new().unwrap();
        let conversation_dir = dir.path().join("conversation");
        let repository = Arc::new(TextTranscriptRepository::new(&conversation_dir).unwrap());

        let storage_key = {
            let mut controller = SessionController::new(
                ChatMode::StructuredQuery,
                repository.clone(),
                Arc::new(UnreachableGenerator),
                shipped_order_table(),
            );
            controller.handle_turn("status of order 10107").await.unwrap();
            controller.session().storage_key.clone()
        };

        let mut resumed = SessionController::resume(
            &storage_key,
            ChatMode::StructuredQuery,
            repository.clone(),
            Arc::new(UnreachableGenerator),
            shipped_order_table(),
        )
        .await
        .unwrap();
        assert_eq!(resumed.session().len(), 2);

        resumed.handle_turn("status of order 99999").await.unwrap();

        let path = conversation_dir.join(&storage_key);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }
}
