use std::fmt::{self, Display};

/// Everything that can go wrong parsing one line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
	/// The verb (first `|`-delimited field) isn't one this server knows.
	UnknownCommand(String),
	/// A known verb was missing a required argument.
	MissingArgument { verb: &'static str, argument: &'static str },
	/// An argument was present but didn't parse as the expected type.
	InvalidArgument {
		verb: &'static str,
		argument: &'static str,
		value: String,
	},
}

impl Display for ProtocolError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProtocolError::UnknownCommand(verb) => write!(f, "Unknown command: {verb}"),
			ProtocolError::MissingArgument { verb, argument } => {
				write!(f, "{verb}: missing argument '{argument}'")
			}
			ProtocolError::InvalidArgument { verb, argument, value } => {
				write!(f, "{verb}: argument '{argument}' has invalid value '{value}'")
			}
		}
	}
}

impl std::error::Error for ProtocolError {}
