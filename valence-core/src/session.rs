//! The question/answer loop with a respondent.

use std::io::{BufRead, Write};

use tracing::info;

use crate::config::DialogueConfig;
use crate::controller::Controller;
use crate::frame::Frame;
use crate::transcript::{TranscriptEntry, TranscriptSink};
use crate::types::Result;
use crate::verbalisation::TemplateStore;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The respondent sent the end sentinel or closed the input
    EndedByRespondent { answers: usize },
    /// No further question could be phrased
    OutOfQuestions { answers: usize },
}

impl SessionOutcome {
    /// Number of answers recorded during the session.
    pub fn answers(&self) -> usize {
        match self {
            Self::EndedByRespondent { answers } | Self::OutOfQuestions { answers } => *answers,
        }
    }
}

/// A single interview, owning its controller and transcript.
pub struct Session<T: TranscriptSink> {
    controller: Controller,
    config: DialogueConfig,
    transcript: T,
}

impl<T: TranscriptSink> Session<T> {
    /// Create a session with its own copy of the templates.
    pub fn new(store: TemplateStore, config: DialogueConfig, transcript: T) -> Self {
        Self {
            controller: Controller::new(store, &config),
            config,
            transcript,
        }
    }

    /// Create a session around an existing controller.
    pub fn with_controller(controller: Controller, config: DialogueConfig, transcript: T) -> Self {
        Self {
            controller,
            config,
            transcript,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn transcript(&self) -> &T {
        &self.transcript
    }

    /// Consume the session, returning its controller and transcript.
    pub fn into_parts(self) -> (Controller, T) {
        (self.controller, self.transcript)
    }

    /// Interview the respondent about a concept.
    ///
    /// Questions go to `output` as `BOT >> ...` followed by a `HUM >> `
    /// prompt; each line read from `input` is one answer.
    pub fn converse<I: BufRead, O: Write>(
        &mut self,
        concept: &str,
        individual: bool,
        mut input: I,
        mut output: O,
    ) -> Result<SessionOutcome> {
        info!(concept, individual, "Starting session");
        self.transcript
            .record(&TranscriptEntry::Concept(concept.to_string()))?;
        self.controller.add_frame(Frame::new(concept, individual));

        let mut answers = 0;
        loop {
            let prompt = self.controller.get_question();
            let (Some(goal), Some(verbalisation)) = (prompt.goal, prompt.verbalisation) else {
                let closing = self.config.closing_message.clone();
                self.transcript.record(&TranscriptEntry::Bot {
                    goal: None,
                    text: closing.clone(),
                })?;
                writeln!(output, "BOT >> {}", closing)?;
                output.flush()?;
                info!(answers, "Session ended: out of questions");
                return Ok(SessionOutcome::OutOfQuestions { answers });
            };

            self.transcript.record(&TranscriptEntry::Bot {
                goal: Some(goal),
                text: verbalisation.text.clone(),
            })?;
            write!(output, "BOT >> {}\nHUM >> ", verbalisation.text)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                info!(answers, "Session ended: input closed");
                return Ok(SessionOutcome::EndedByRespondent { answers });
            }
            let reply = line.trim_end_matches(['\n', '\r']);
            if reply == self.config.end_sentinel {
                info!(answers, "Session ended by respondent");
                return Ok(SessionOutcome::EndedByRespondent { answers });
            }

            self.transcript.record(&TranscriptEntry::Human {
                goal: Some(goal),
                text: reply.to_string(),
            })?;
            self.controller.memorise_answer(goal, reply);
            answers += 1;
        }
    }
}
