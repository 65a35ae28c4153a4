//! Raw form state for the node and link inputs, and its conversion into
//! attribute records.
//!
//! Inputs hold the text the user typed. Numbers are clamped to the widget
//! bounds on submit so out-of-range values never reach the store.

use thiserror::Error;

use crate::topology::{JitterRange, LinkAttrs, NodeAttrs};

/// Errors raised when submitting a form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
	/// The text of `field` is not a finite number.
	#[error("{field} must be a number, got {value:?}")]
	NotANumber { field: &'static str, value: String },

	/// `field` takes whole numbers only.
	#[error("{field} must be a whole number, got {value:?}")]
	NotAnInteger { field: &'static str, value: String },

	/// A link endpoint select is empty.
	#[error("select both nodes before adding a link")]
	MissingEndpoint,

	/// The endpoint is not a current node id.
	#[error("unknown node {0:?}")]
	UnknownEndpoint(String),
}

/// Result type for form submission.
pub type FormResult<T> = Result<T, FormError>;

/// Inclusive bounds of a numeric input widget.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
	/// Smallest accepted value.
	pub min: f64,
	/// Largest accepted value, if any.
	pub max: Option<f64>,
	/// Increment used by the widget's spinner.
	pub step: f64,
}

impl Bounds {
	const fn at_least(min: f64) -> Self {
		Self {
			min,
			max: None,
			step: 1.0,
		}
	}

	/// Whole numbers stored as `u32`.
	const fn counter(min: f64) -> Self {
		Self::between(min, u32::MAX as f64, 1.0)
	}

	const fn between(min: f64, max: f64, step: f64) -> Self {
		Self {
			min,
			max: Some(max),
			step,
		}
	}

	/// Limits `value` to the widget range.
	pub fn clamp(&self, value: f64) -> f64 {
		let value = value.max(self.min);
		match self.max {
			Some(max) => value.min(max),
			None => value,
		}
	}

	fn clamp_whole(&self, value: u64) -> u64 {
		let value = value.max(self.min as u64);
		match self.max {
			Some(max) => value.min(max as u64),
			None => value,
		}
	}
}

/// CPU capacity in percent.
pub const CPU_CAPACITY: Bounds = Bounds::between(1.0, 100.0, 1.0);
/// Memory in megabytes.
pub const MEMORY_CAPACITY: Bounds = Bounds::at_least(1000.0);
/// Queue length in packet slots.
pub const QUEUE_SIZE: Bounds = Bounds::counter(1.0);
/// Node and link failure probability.
pub const FAILURE_RATE: Bounds = Bounds::between(0.0, 1.0, 0.01);
/// Link delay in milliseconds.
pub const DELAY: Bounds = Bounds::counter(1.0);
/// Link bandwidth in Mbps.
pub const BANDWIDTH: Bounds = Bounds::counter(1.0);
/// Either end of the jitter range.
pub const JITTER: Bounds = Bounds::between(JitterRange::MIN, JitterRange::MAX, 0.01);

fn parse_float(field: &'static str, text: &str, bounds: Bounds) -> FormResult<f64> {
	let value: f64 = text.trim().parse().map_err(|_| FormError::NotANumber {
		field,
		value: text.to_string(),
	})?;
	if !value.is_finite() {
		return Err(FormError::NotANumber {
			field,
			value: text.to_string(),
		});
	}
	Ok(bounds.clamp(value))
}

/// Plain digit strings are read exactly; anything else goes through the float
/// path and must have no fractional part.
fn parse_whole(field: &'static str, text: &str, bounds: Bounds) -> FormResult<u64> {
	if let Ok(value) = text.trim().parse::<u64>() {
		return Ok(bounds.clamp_whole(value));
	}
	let value = parse_float(field, text, bounds)?;
	if value.fract() != 0.0 {
		return Err(FormError::NotAnInteger {
			field,
			value: text.to_string(),
		});
	}
	Ok(value as u64)
}

/// [`parse_whole`] for fields stored as `u32`. The bounds keep the value in
/// range; anything beyond saturates.
fn parse_counter(field: &'static str, text: &str, bounds: Bounds) -> FormResult<u32> {
	let value = parse_whole(field, text, bounds)?;
	Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

/// Text state of the node form.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeForm {
	/// Node identifier, used verbatim.
	pub id: String,
	/// CPU capacity text.
	pub cpu_capacity: String,
	/// Memory capacity text.
	pub memory_capacity: String,
	/// Queue size text.
	pub queue_size: String,
	/// Failure rate text.
	pub failure_rate: String,
}

impl Default for NodeForm {
	fn default() -> Self {
		let attrs = NodeAttrs::default();
		Self {
			id: String::new(),
			cpu_capacity: attrs.cpu_capacity.to_string(),
			memory_capacity: attrs.memory_capacity.to_string(),
			queue_size: attrs.queue_size.to_string(),
			failure_rate: attrs.failure_rate.to_string(),
		}
	}
}

impl NodeForm {
	/// Reads the node id and attributes. The id is taken verbatim; an empty
	/// or repeated id is accepted.
	pub fn parse(&self) -> FormResult<(String, NodeAttrs)> {
		let attrs = NodeAttrs {
			cpu_capacity: parse_counter("CPU capacity", &self.cpu_capacity, CPU_CAPACITY)?,
			memory_capacity: parse_whole("memory capacity", &self.memory_capacity, MEMORY_CAPACITY)?,
			queue_size: parse_counter("queue size", &self.queue_size, QUEUE_SIZE)?,
			failure_rate: parse_float("failure rate", &self.failure_rate, FAILURE_RATE)?,
		};
		Ok((self.id.clone(), attrs))
	}
}

/// The endpoint a select shows: the user's choice while it is still a known
/// node, otherwise the first known node.
pub fn resolve_endpoint(choice: Option<&str>, node_ids: &[String]) -> Option<String> {
	choice
		.filter(|id| node_ids.iter().any(|known| known == id))
		.map(str::to_string)
		.or_else(|| node_ids.first().cloned())
}

/// Text state of the link form. Endpoints come from selects listing the
/// current node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkForm {
	/// First endpoint selection.
	pub node1: Option<String>,
	/// Second endpoint selection.
	pub node2: Option<String>,
	/// Delay text.
	pub delay: String,
	/// Bandwidth text.
	pub bandwidth: String,
	/// Lower jitter factor text.
	pub jitter_low: String,
	/// Upper jitter factor text.
	pub jitter_high: String,
	/// Link failure rate text.
	pub failure_rate: String,
}

impl Default for LinkForm {
	fn default() -> Self {
		let attrs = LinkAttrs::default();
		Self {
			node1: None,
			node2: None,
			delay: attrs.delay.to_string(),
			bandwidth: attrs.bandwidth.to_string(),
			jitter_low: attrs.jitter_range.low.to_string(),
			jitter_high: attrs.jitter_range.high.to_string(),
			failure_rate: attrs.failure_rate.to_string(),
		}
	}
}

impl LinkForm {
	/// Reads the endpoints and attributes. A jitter range entered high-first
	/// is reordered.
	pub fn parse(&self) -> FormResult<(String, String, LinkAttrs)> {
		let (Some(node1), Some(node2)) = (&self.node1, &self.node2) else {
			return Err(FormError::MissingEndpoint);
		};

		let low = parse_float("jitter low", &self.jitter_low, JITTER)?;
		let high = parse_float("jitter high", &self.jitter_high, JITTER)?;

		let attrs = LinkAttrs {
			delay: parse_counter("delay", &self.delay, DELAY)?,
			bandwidth: parse_counter("bandwidth", &self.bandwidth, BANDWIDTH)?,
			jitter_range: JitterRange::new(low.min(high), low.max(high)),
			failure_rate: parse_float("link failure rate", &self.failure_rate, FAILURE_RATE)?,
		};
		Ok((node1.clone(), node2.clone(), attrs))
	}
}
