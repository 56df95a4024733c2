pub mod article;
pub mod form;
pub mod notice;
pub mod outcome;

pub use article::{Article, ArticleSummary};
pub use form::{ContactForm, MessageRecord};
pub use notice::{Notice, NoticeKind};
pub use outcome::{OutcomeCode, SubmissionOutcome};
