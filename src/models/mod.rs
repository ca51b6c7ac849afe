//! Data models shared between the front-end and the worker.
//! These serialize to/from the JSON the front-end writes and reads.

mod export_job;
mod export_options;
mod worker_message;

pub use export_job::*;
pub use export_options::*;
pub use worker_message::*;
