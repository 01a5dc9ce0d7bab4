// Section Reorder Controller and editing session.
// The session is the only write path into a ResumeDocument; the HTTP handlers
// load a document, apply one session operation and store the result.

pub mod handlers;
pub mod reorder;
pub mod session;
