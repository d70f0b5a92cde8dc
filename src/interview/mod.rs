//! The interview engine: record model, navigation state machine, the
//! dependents sub-flow, recap, narration and submission.

pub mod child_loop;
pub mod coerce;
pub mod driver;
mod flow;
pub mod narration;
mod recap;
mod record;
mod session;
mod submission;

pub use child_loop::{ChildLoopController, DependentForm, DependentPrompt, Visibility};
pub use coerce::{coerce, parse_count, prefill, Coerced, Prefill, RawAnswer};
pub use driver::{
    DependentAction, InterviewDriver, IntroAction, QuestionAction, RecapAction, Renderer,
};
pub use flow::{FlowController, QuestionPrompt};
pub use narration::{AudioNarrator, SilentNarrator, TranscriptNarrator};
pub use recap::{completion_message, Recap, RecapLine};
pub use record::{AnswerValue, Conditional, DependentRecord, InterviewRecord, PhotoStatus};
pub use session::{Cursor, FlowState, InterviewSession};
pub use submission::{submit, SubmissionReceipt};
