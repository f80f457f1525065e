//! Text formatting shared by the aggregator and the algorithm sections.

/// Format an edge weight or flow value for inclusion in a job payload.
///
/// Whole-valued weights print without a trailing `.0` (`2` rather than
/// `2.000000`); everything else uses the default `f64` display. This is an
/// implementer's choice not pinned down by the wire protocol — values are
/// never reparsed by the server, only read by a human or test harness.
pub fn fmt_weight(w: f64) -> String {
	if w.is_finite() && w == w.trunc() && w.abs() < 1e15 {
		format!("{}", w.trunc() as i64)
	} else {
		format!("{w}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn whole_numbers_print_without_decimal() {
		assert_eq!(fmt_weight(2.0), "2");
		assert_eq!(fmt_weight(0.0), "0");
		assert_eq!(fmt_weight(-3.0), "-3");
	}

	#[test]
	fn fractional_numbers_keep_their_decimal() {
		assert_eq!(fmt_weight(2.5), "2.5");
	}
}
