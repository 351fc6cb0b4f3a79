//! Screening session — the conversation state machine.
//!
//! One `step` per user turn, dispatched on `Phase`:
//!
//! ```text
//! Info ──(all fields set)──▶ Stack ──(techs parsed)──▶ Qna ──(questions exhausted)──▶ End
//!   └──────────────(termination keyword, any phase)──────────────────────────────────▶ End
//! ```
//!
//! Data only flows forward: profile → technologies → generated questions → answers.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm_client::LlmError;
use crate::screening::fields::{collect_field, Field, FieldOutcome, ProfileInfo};
use crate::screening::generator::QuestionGenerator;
use crate::screening::questions::{QuestionSet, TOTAL_QUESTION_CAP};
use crate::screening::record::CandidateRecord;
use crate::screening::stack::parse_tech_stack;
use crate::screening::walker::{Cursor, NextPrompt, QuestionWalker};

/// Substrings that end the conversation from any phase.
///
/// Matched case-insensitively anywhere in the message, so "thanks for asking"
/// also ends the session.
pub const END_WORDS: &[&str] = &["bye", "goodbye", "exit", "quit", "stop", "thanks", "thank you"];

pub const SESSION_ENDED_REPLY: &str = "Session already ended. Please start a new conversation.";
pub const EARLY_EXIT_REPLY: &str = "Thanks for your time. We will review and email you next steps.";
pub const FALLBACK_REPLY: &str = "I did not understand. Please continue or type 'exit' to finish.";
pub const STACK_PROMPT: &str = "List your tech stack: languages, frameworks, databases, and tools.";
pub const STACK_AFTER_INFO_PROMPT: &str =
    "Thanks. Now, list your tech stack: languages, frameworks, databases, and tools.";
pub const EMPTY_STACK_REPLY: &str = "Please list at least one technology.";
pub const NO_QUESTIONS_REPLY: &str = "Thanks. We will review your information and follow up by email.";
pub const COMPLETED_REPLY: &str =
    "This concludes the screening. Thank you. We will reach out with next steps.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Info,
    Stack,
    Qna,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

pub fn contains_end_word(input: &str) -> bool {
    let lowered = input.to_lowercase();
    END_WORDS.iter().any(|word| lowered.contains(word))
}

pub struct ScreeningSession {
    id: Uuid,
    generator: Arc<dyn QuestionGenerator>,
    generation_timeout: Duration,
    phase: Phase,
    info: ProfileInfo,
    techs: Vec<String>,
    walker: QuestionWalker,
    history: Vec<Turn>,
}

impl ScreeningSession {
    pub fn new(generator: Arc<dyn QuestionGenerator>, generation_timeout: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            generator,
            generation_timeout,
            phase: Phase::Info,
            info: ProfileInfo::default(),
            techs: Vec::new(),
            walker: QuestionWalker::default(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn done(&self) -> bool {
        self.phase == Phase::End
    }

    /// Question cursor; meaningful only in `Phase::Qna`.
    pub fn cursor(&self) -> &Cursor {
        self.walker.cursor()
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Appends to the display log. The state machine never reads it.
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.history.push(Turn {
            role,
            text: text.into(),
        });
    }

    /// Generated greeting followed by the first profile question, so the
    /// candidate's first reply is taken as their name.
    ///
    /// Calls the generator every time; callers greet once per session.
    pub async fn greet(&self) -> Result<String, LlmError> {
        let greeting = self.generator.generate_greeting().await?;
        Ok(format!("{greeting}\n\n{}", Field::ALL[0].question()))
    }

    /// Handles one user turn and returns the reply to show.
    pub async fn step(&mut self, input: &str) -> String {
        if self.done() {
            return SESSION_ENDED_REPLY.to_string();
        }

        if contains_end_word(input) {
            info!(session_id = %self.id, phase = ?self.phase, "Candidate ended the session early");
            self.phase = Phase::End;
            return EARLY_EXIT_REPLY.to_string();
        }

        match self.phase {
            Phase::Info => self.handle_info(input),
            Phase::Stack => self.handle_stack(input).await,
            Phase::Qna => self.handle_qna(input),
            Phase::End => FALLBACK_REPLY.to_string(),
        }
    }

    /// Snapshot of everything collected so far. Only complete once `done()`.
    pub fn current_record(&self) -> CandidateRecord {
        CandidateRecord::build(&self.info, &self.techs, self.walker.answers())
    }

    fn handle_info(&mut self, input: &str) -> String {
        match collect_field(&mut self.info, input) {
            FieldOutcome::AlreadyComplete => {
                self.enter(Phase::Stack);
                STACK_PROMPT.to_string()
            }
            FieldOutcome::Completed => {
                self.enter(Phase::Stack);
                STACK_AFTER_INFO_PROMPT.to_string()
            }
            FieldOutcome::Ask(field) => field.question().to_string(),
            FieldOutcome::Rejected(reprompt) => reprompt.to_string(),
        }
    }

    async fn handle_stack(&mut self, input: &str) -> String {
        let techs = parse_tech_stack(input);
        if techs.is_empty() {
            return EMPTY_STACK_REPLY.to_string();
        }

        let questions = self.generate_questions(&techs).await;
        self.techs = techs;
        self.walker = QuestionWalker::new(questions);
        self.enter(Phase::Qna);
        self.present_next()
    }

    fn handle_qna(&mut self, input: &str) -> String {
        self.walker.record(input);
        self.present_next()
    }

    fn present_next(&mut self) -> String {
        match self.walker.present() {
            NextPrompt::Question(text) => text,
            NextPrompt::NoQuestions => {
                self.enter(Phase::End);
                NO_QUESTIONS_REPLY.to_string()
            }
            NextPrompt::Exhausted => {
                self.enter(Phase::End);
                COMPLETED_REPLY.to_string()
            }
        }
    }

    /// Generation failures and timeouts degrade to an empty set; the walk then
    /// ends the session through the no-questions path.
    async fn generate_questions(&self, techs: &[String]) -> QuestionSet {
        let result = tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate_questions(techs, TOTAL_QUESTION_CAP),
        )
        .await
        .unwrap_or_else(|_| Err(LlmError::Timeout(self.generation_timeout)));

        match result {
            Ok(questions) => {
                info!(
                    session_id = %self.id,
                    "Generated {} questions across {} technologies",
                    questions.total_questions(),
                    questions.len()
                );
                questions
            }
            Err(e) => {
                warn!(session_id = %self.id, "Question generation failed, continuing without questions: {e}");
                QuestionSet::default()
            }
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug!(session_id = %self.id, from = ?self.phase, to = ?phase, "Phase transition");
        self.phase = phase;
    }
}
