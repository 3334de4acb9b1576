//! Per-turn session orchestration.
//!
//! `SessionController` drives one session through its turn cycle: classify
//! the mode branch, run the generator or the order lookup, append the
//! resulting messages, and persist the transcript. Exactly one turn is
//! processed at a time, start to finish; the controller owns the session's
//! message sequence and is its only writer.

use super::chat_mode::ChatMode;
use super::message::ChatMessage;
use super::model::Session;
use super::repository::TranscriptRepository;
use crate::context;
use crate::error::Result;
use crate::generator::{GenerationParams, Generator};
use crate::intent::{self, FieldMap};
use crate::orders::{resolve, LookupOutcome, OrderTable};
use std::sync::Arc;

/// Where the controller is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session exists but has not been activated yet.
    Idle,
    /// Ready for the next user utterance.
    AwaitingInput,
    /// A turn is being processed.
    Processing,
    /// The turn's transcript write completed.
    Persisted,
}

/// The result of one turn, as seen by the hosting layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Empty input: nothing happened, nothing was appended or persisted.
    Ignored,
    /// The bot replied; the message is already appended and persisted.
    Reply(ChatMessage),
    /// The generator failed. The user's message was kept and persisted, but
    /// no bot message was stored; show [`GENERATION_FAILURE_REPLY`] instead.
    GenerationFailed,
}

/// Display-only notice for a failed generation; never persisted.
pub const GENERATION_FAILURE_REPLY: &str =
    "Sorry, I could not produce a response. Please try again.";

/// Guidance reply when a structured query lacks an order number or a
/// recognized field. This is a defined conversational branch, not an error,
/// and the resolver is not consulted.
pub const SPECIFY_QUERY_REPLY: &str =
    "Please provide a valid order number and specify a detail you're asking for (e.g., status, order date, etc.).";

/// Orchestrates turns for a single session.
pub struct SessionController {
    session: Session,
    state: SessionState,
    repository: Arc<dyn TranscriptRepository>,
    generator: Arc<dyn Generator>,
    orders: Arc<OrderTable>,
    field_map: FieldMap,
    params: GenerationParams,
}

impl SessionController {
    /// Creates a controller around a fresh session and activates it.
    pub fn new(
        mode: ChatMode,
        repository: Arc<dyn TranscriptRepository>,
        generator: Arc<dyn Generator>,
        orders: Arc<OrderTable>,
    ) -> Self {
        Self::activate(Session::new(mode), repository, generator, orders)
    }

    /// Loads a persisted transcript and resumes it as the active session.
    ///
    /// # Errors
    ///
    /// Fails if the transcript cannot be loaded, including the
    /// malformed-line data-integrity fault.
    pub async fn resume(
        storage_key: &str,
        mode: ChatMode,
        repository: Arc<dyn TranscriptRepository>,
        generator: Arc<dyn Generator>,
        orders: Arc<OrderTable>,
    ) -> Result<Self> {
        let messages = repository.load(storage_key).await?;
        let session = Session::from_transcript(mode, storage_key, messages);
        Ok(Self::activate(session, repository, generator, orders))
    }

    fn activate(
        session: Session,
        repository: Arc<dyn TranscriptRepository>,
        generator: Arc<dyn Generator>,
        orders: Arc<OrderTable>,
    ) -> Self {
        let mut controller = Self {
            session,
            state: SessionState::Idle,
            repository,
            generator,
            orders,
            field_map: FieldMap::default(),
            params: GenerationParams::default(),
        };
        // Creation or selection activates the session.
        controller.state = SessionState::AwaitingInput;
        controller
    }

    /// Overrides the keyword mapping, builder style.
    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    /// Overrides the sampling parameters, builder style.
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// The session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current position in the turn cycle.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Switches the conversational mode for subsequent turns.
    pub fn set_mode(&mut self, mode: ChatMode) {
        self.session.mode = mode;
    }

    /// Processes one user utterance, start to finish.
    ///
    /// Empty input is a no-op: no state transition, no message appended, no
    /// write. Otherwise the turn runs its mode branch, appends the turn's
    /// messages, and rewrites the transcript before control returns.
    ///
    /// # Errors
    ///
    /// Fails only on persistence errors. Generator failure is not an error
    /// here: the user message is kept and the outcome reports the failure.
    pub async fn handle_turn(&mut self, input: &str) -> Result<TurnOutcome> {
        if input.is_empty() {
            return Ok(TurnOutcome::Ignored);
        }

        self.state = SessionState::Processing;

        let outcome = match self.session.mode {
            ChatMode::FreeForm => self.free_form_turn(input).await,
            ChatMode::StructuredQuery => self.structured_turn(input),
        };

        self.repository
            .persist(&self.session.storage_key, &self.session.messages)
            .await?;
        self.state = SessionState::Persisted;
        tracing::debug!(
            storage_key = %self.session.storage_key,
            messages = self.session.len(),
            "transcript persisted"
        );

        self.state = SessionState::AwaitingInput;
        Ok(outcome)
    }

    async fn free_form_turn(&mut self, input: &str) -> TurnOutcome {
        // The prompt window covers prior history; the new input gets its own
        // line in build_prompt, so append the user message afterwards.
        let prompt = context::build_prompt(&self.session.messages, input);
        self.session.push(ChatMessage::user(input));

        match self.generator.generate(&prompt, &self.params).await {
            Ok(raw) => {
                let reply = context::extract_response(&raw);
                let message = ChatMessage::bot(reply);
                self.session.push(message.clone());
                TurnOutcome::Reply(message)
            }
            Err(err) => {
                tracing::warn!(error = %err, "generation failed; keeping user message only");
                TurnOutcome::GenerationFailed
            }
        }
    }

    fn structured_turn(&mut self, input: &str) -> TurnOutcome {
        self.session.push(ChatMessage::user(input));

        let parsed = intent::parse(input, &self.field_map);
        let reply = match (parsed.order_number, parsed.field.as_deref()) {
            (Some(order_number), Some(field)) => {
                let outcome = resolve(order_number, field, &self.orders);
                format_outcome(order_number, field, outcome)
            }
            _ => SPECIFY_QUERY_REPLY.to_string(),
        };

        let message = ChatMessage::bot(reply);
        self.session.push(message.clone());
        TurnOutcome::Reply(message)
    }
}

/// Renders a lookup outcome as the response sentence shown to the user.
fn format_outcome(order_number: i64, field: &str, outcome: LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found(value) => {
            format!("The {} of order {} is: {}.", field, order_number, value)
        }
        LookupOutcome::OrderNotFound => {
            format!("No order found for order number {}.", order_number)
        }
        LookupOutcome::FieldNotFound => {
            format!("Column '{}' not found in the dataset.", field)
        }
        LookupOutcome::FieldValueMissing => {
            format!("No data found for '{}' in order {}.", field, order_number)
        }
    }
}
