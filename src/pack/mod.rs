//! Question packs: the authored data a round is played from.
//!
//! ## Key Types
//!
//! - `AnswerOption`, `Question`: immutable question content
//! - `QuestionPack`: named question list with a per-question time budget
//! - `PackProvider`: pack library, active selection, change notifications
//!
//! Packs are owned by the provider. The round engine only reads a pack when
//! a round starts and keeps its own copies from then on.

pub mod question;
pub mod question_pack;
pub mod provider;

pub use question::{AnswerOption, Question, EXPECTED_OPTION_COUNT};
pub use question_pack::{PackDifficulty, QuestionPack};
pub use provider::{PackChange, PackId, PackProvider};
