//! The staged fan-out/fan-in pipeline: `commit` submits a [`Job`], which
//! fans out to four algorithm workers, whose results an aggregator collates
//! into a single payload a responder delivers back to the connection.

mod aggregate;
mod format;
mod job;
mod pipeline;
mod result;

pub use job::{AlgoTask, Job, Outgoing, Reply};
pub use pipeline::Pipeline;
pub use result::{AlgoKind, AlgoResult};
