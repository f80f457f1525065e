//! The line-oriented, pipe-delimited wire protocol clients speak to the
//! graph-compute server: `init`, `edge`, `maxflow`, `print`, and `commit`.

mod command;
mod errors;

pub use command::{parse_command, Command};
pub use errors::ProtocolError;
