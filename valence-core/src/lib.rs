//! Frame-based dialogue engine for eliciting what people think a concept is
//!
//! A session interviews a respondent about one concept: what it is, whether
//! it is good or bad, how common it is, and which instances it has. Answers
//! are stored verbatim in a [`Frame`]. Once a frame's mandatory slots are
//! filled the engine explores optional slots, sub-contexts built from the
//! respondent's own answers, and other belief holders.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Session                    │
//! │   (reads answers, prints questions, logs)    │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!                 ┌──────▼──────┐
//!                 │ Controller  │
//!                 └──┬───────┬──┘
//!          goal      │       │   phrasing
//!        ┌───────────▼─┐   ┌─▼──────────────────────┐
//!        │   Frame +   │   │ VerbalisationResolver  │
//!        │ Exploration │   │   over TemplateStore   │
//!        └─────────────┘   └────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use valence_core::{DialogueConfig, MemoryTranscript, Session, parse_templates};
//!
//! let store = parse_templates("<concept:instances>|Name a kind of <x>.\n");
//! let mut session = Session::new(store, DialogueConfig::default(), MemoryTranscript::new());
//! let outcome = session.converse("cat", false, std::io::stdin().lock(), std::io::stdout())?;
//! ```

pub mod config;
pub mod controller;
pub mod frame;
pub mod session;
pub mod transcript;
pub mod types;
pub mod verbalisation;

// Re-export main types
pub use config::DialogueConfig;
pub use controller::{Controller, Prompt};
pub use frame::{AttributeBag, Exploration, Frame, SlotKey};
pub use session::{Session, SessionOutcome};
pub use transcript::{MemoryTranscript, NullTranscript, TranscriptEntry, TranscriptSink};
pub use types::*;
pub use verbalisation::{
    load_templates, parse_templates, Template, TemplateStore, Verbalisation,
    VerbalisationRequest, VerbalisationResolver,
};
