//! Turn-based conversational protocol shared by the assistant and the
//! interview conductor.
//!
//! A strictly alternating exchange between the local actor (user or
//! candidate) and a remote AI actor, where each remote turn is one blocking
//! HTTP round trip. The state machine is deliberately small: `Idle` accepts
//! input, `AwaitingReply` refuses it, `Complete` is terminal and only the
//! interview flow reaches it.
//!
//! Failure semantics: a failed round trip appends one fixed fallback
//! message and returns to `Idle`. Nothing is retried and no idempotency key
//! is attached, so a manually resent message can duplicate a turn server
//! side — a known gap, not an exactly-once protocol.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::error;

use crate::errors::ClientError;

/// Number of prior turns sent alongside each new message for context.
pub const HISTORY_WINDOW: usize = 5;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    /// The local user or interview candidate.
    Local,
    /// The remote AI actor.
    Remote,
}

/// One exchange unit of a conversation.
#[derive(Debug, Clone)]
pub struct Turn {
    pub author: Author,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn local(text: impl Into<String>) -> Self {
        Self {
            author: Author::Local,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            author: Author::Remote,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply,
    Complete,
}

/// Why a submission was refused. Refusals have no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Input was empty after trimming.
    EmptyInput,
    /// A round trip is already in flight.
    ReplyPending,
    /// The conversation reached its terminal state.
    Completed,
}

/// What one successful round trip produced.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub text: String,
    /// Server signalled the conversation is over (interview only).
    pub complete: bool,
}

/// The single HTTP round trip behind one remote turn.
#[async_trait]
pub trait TurnExchange {
    /// `window` holds the turns preceding `message`, bounded to
    /// [`HISTORY_WINDOW`]; implementations that don't send context may
    /// ignore it.
    async fn exchange(
        &mut self,
        message: &str,
        window: &[Turn],
    ) -> Result<TurnReply, ClientError>;
}

/// How a submission settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote turn was appended.
    Replied,
    /// The round trip failed; the fallback message was appended instead.
    Failed,
}

/// Transcript plus state machine for one conversation.
pub struct Conversation<E> {
    exchange: E,
    turns: Vec<Turn>,
    state: TurnState,
    fallback: String,
}

impl<E> Conversation<E> {
    pub fn new(exchange: E, fallback: impl Into<String>) -> Self {
        Self {
            exchange,
            turns: Vec::new(),
            state: TurnState::Idle,
            fallback: fallback.into(),
        }
    }

    /// Starts with a seeded remote greeting (the assistant page).
    pub fn seeded(
        exchange: E,
        fallback: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Self {
        let mut conversation = Self::new(exchange, fallback);
        conversation.turns.push(Turn::remote(greeting));
        conversation
    }

    /// Resumes from a server-held transcript (the interview page).
    pub fn resume(
        exchange: E,
        fallback: impl Into<String>,
        turns: Vec<Turn>,
        complete: bool,
    ) -> Self {
        Self {
            exchange,
            turns,
            state: if complete {
                TurnState::Complete
            } else {
                TurnState::Idle
            },
            fallback: fallback.into(),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_complete(&self) -> bool {
        self.state == TurnState::Complete
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub fn exchange_mut(&mut self) -> &mut E {
        &mut self.exchange
    }

    /// Latest remote turn, if any.
    pub fn last_remote(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|turn| turn.author == Author::Remote)
    }

    /// First half of a submission: validates input, appends the local turn,
    /// and moves to `AwaitingReply`. Returns the trimmed text to send.
    fn begin(&mut self, input: &str) -> Result<String, Refusal> {
        match self.state {
            TurnState::AwaitingReply => return Err(Refusal::ReplyPending),
            TurnState::Complete => return Err(Refusal::Completed),
            TurnState::Idle => {}
        }
        let text = input.trim();
        if text.is_empty() {
            return Err(Refusal::EmptyInput);
        }
        let text = text.to_string();
        self.turns.push(Turn::local(text.clone()));
        self.state = TurnState::AwaitingReply;
        Ok(text)
    }

    /// Second half: appends the remote turn (or the fallback) and settles
    /// the state machine.
    fn settle(&mut self, result: Result<TurnReply, ClientError>) -> Outcome {
        match result {
            Ok(reply) => {
                self.state = if reply.complete {
                    TurnState::Complete
                } else {
                    TurnState::Idle
                };
                self.turns.push(Turn::remote(reply.text));
                Outcome::Replied
            }
            Err(err) => {
                error!("turn exchange failed: {err}");
                self.turns.push(Turn::remote(self.fallback.clone()));
                self.state = TurnState::Idle;
                Outcome::Failed
            }
        }
    }
}

impl<E: TurnExchange> Conversation<E> {
    /// Drives one full turn: local message out, remote reply (or the
    /// fallback message) in.
    pub async fn submit(&mut self, input: &str) -> Result<Outcome, Refusal> {
        let text = self.begin(input)?;
        // Window: the last HISTORY_WINDOW turns before the new message.
        let prior = &self.turns[..self.turns.len() - 1];
        let start = prior.len().saturating_sub(HISTORY_WINDOW);
        let window = prior[start..].to_vec();
        let result = self.exchange.exchange(&text, &window).await;
        Ok(self.settle(result))
    }
}
