use crate::errors::ProtocolError;

/// One parsed client command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	/// `init|n|directed` — (re)initialize the session's graph.
	Init { n: usize, directed: bool },
	/// `edge|u|v|w` — add a weighted edge to the session's graph.
	Edge { u: usize, v: usize, w: f64 },
	/// `maxflow|s|t` — set (or clear, leaving the default) the source/sink
	/// pair the max-flow algorithm runs with at the next `commit`. Either
	/// field may be absent, in which case the server falls back to its
	/// default of `(0, n-1)`.
	MaxFlow { s: Option<usize>, t: Option<usize> },
	/// `print|...` — accepted for wire compatibility, has no effect.
	Print,
	/// `commit` — snapshot the current graph and submit it as a job.
	Commit,
}

/// Parse one line of input. Lines are `|`-delimited, the first field is the
/// verb. Unrecognized verbs (including a blank line) are reported as
/// [`ProtocolError::UnknownCommand`] rather than panicking, so the
/// connection can report an error and keep reading.
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
	let line = line.trim();
	let mut fields = line.split('|').map(str::trim);
	let verb = fields.next().unwrap_or("").to_ascii_lowercase();

	match verb.as_str() {
		"init" => {
			let n = parse_usize("init", "n", &mut fields)?;
			let directed = parse_bool("init", "directed", &mut fields)?;
			Ok(Command::Init { n, directed })
		}
		"edge" => {
			let u = parse_usize("edge", "u", &mut fields)?;
			let v = parse_usize("edge", "v", &mut fields)?;
			let w = parse_f64("edge", "w", &mut fields)?;
			Ok(Command::Edge { u, v, w })
		}
		"maxflow" => {
			let s = fields.next().filter(|f| !f.is_empty()).map(|f| parse_as("maxflow", "s", f)).transpose()?;
			let t = fields.next().filter(|f| !f.is_empty()).map(|f| parse_as("maxflow", "t", f)).transpose()?;
			Ok(Command::MaxFlow { s, t })
		}
		"print" => Ok(Command::Print),
		"commit" => Ok(Command::Commit),
		other => Err(ProtocolError::UnknownCommand(other.to_string())),
	}
}

fn parse_as<T: std::str::FromStr>(verb: &'static str, argument: &'static str, value: &str) -> Result<T, ProtocolError> {
	value.parse().map_err(|_| ProtocolError::InvalidArgument {
		verb,
		argument,
		value: value.to_string(),
	})
}

fn parse_usize<'a>(
	verb: &'static str,
	argument: &'static str,
	fields: &mut impl Iterator<Item = &'a str>,
) -> Result<usize, ProtocolError> {
	let raw = fields.next().ok_or(ProtocolError::MissingArgument { verb, argument })?;
	parse_as(verb, argument, raw)
}

fn parse_f64<'a>(
	verb: &'static str,
	argument: &'static str,
	fields: &mut impl Iterator<Item = &'a str>,
) -> Result<f64, ProtocolError> {
	let raw = fields.next().ok_or(ProtocolError::MissingArgument { verb, argument })?;
	parse_as(verb, argument, raw)
}

fn parse_bool<'a>(
	verb: &'static str,
	argument: &'static str,
	fields: &mut impl Iterator<Item = &'a str>,
) -> Result<bool, ProtocolError> {
	let raw = fields.next().ok_or(ProtocolError::MissingArgument { verb, argument })?;
	match raw {
		"0" => Ok(false),
		"1" => Ok(true),
		"true" => Ok(true),
		"false" => Ok(false),
		_ => Err(ProtocolError::InvalidArgument {
			verb,
			argument,
			value: raw.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_init() {
		assert_eq!(
			parse_command("init|5|1").unwrap(),
			Command::Init { n: 5, directed: true }
		);
		assert_eq!(
			parse_command("init|5|0").unwrap(),
			Command::Init { n: 5, directed: false }
		);
	}

	#[test]
	fn parses_edge() {
		assert_eq!(
			parse_command("edge|0|1|2.5").unwrap(),
			Command::Edge { u: 0, v: 1, w: 2.5 }
		);
	}

	#[test]
	fn parses_maxflow_with_and_without_arguments() {
		assert_eq!(
			parse_command("maxflow|0|3").unwrap(),
			Command::MaxFlow { s: Some(0), t: Some(3) }
		);
		assert_eq!(parse_command("maxflow").unwrap(), Command::MaxFlow { s: None, t: None });
	}

	#[test]
	fn print_is_accepted_and_ignored() {
		assert_eq!(parse_command("print|whatever|args").unwrap(), Command::Print);
		assert_eq!(parse_command("print").unwrap(), Command::Print);
	}

	#[test]
	fn parses_commit() {
		assert_eq!(parse_command("commit").unwrap(), Command::Commit);
	}

	#[test]
	fn unknown_verb_is_reported_by_name() {
		let err = parse_command("frobnicate|1|2").unwrap_err();
		assert_eq!(err.to_string(), "Unknown command: frobnicate");
	}

	#[test]
	fn verbs_are_case_insensitive() {
		assert_eq!(
			parse_command("INIT|5|1").unwrap(),
			Command::Init { n: 5, directed: true }
		);
		assert_eq!(parse_command("Commit").unwrap(), Command::Commit);
		assert_eq!(parse_command("PRINT").unwrap(), Command::Print);
	}

	#[test]
	fn blank_line_is_an_unknown_command() {
		let err = parse_command("").unwrap_err();
		assert_eq!(err, ProtocolError::UnknownCommand(String::new()));
	}

	#[test]
	fn missing_edge_argument_is_reported() {
		let err = parse_command("edge|0|1").unwrap_err();
		assert!(matches!(err, ProtocolError::MissingArgument { verb: "edge", argument: "w" }));
	}

	#[test]
	fn non_numeric_argument_is_reported() {
		let err = parse_command("init|five|1").unwrap_err();
		assert!(matches!(err, ProtocolError::InvalidArgument { verb: "init", .. }));
	}
}
