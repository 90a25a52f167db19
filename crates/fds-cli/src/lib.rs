//! Library side of the `fds` command: logging setup, the update pipeline,
//! and the rendered summaries.

pub mod logging;
pub mod pipeline;
pub mod summary;
