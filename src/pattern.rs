//! Compiled path patterns for route resolution.
//!
//! Patterns are absolute paths made of literal segments plus two capture
//! forms:
//!
//! - `{name}` captures a single segment (everything up to the next `/`)
//! - `{name:*}` captures the rest of the path, including separators, and is
//!   only valid as the final segment
//!
//! A pattern is compiled once, when the route table is built, into an
//! anchored regex. Compilation enforces a maximum pattern length, a maximum
//! segment count and a compiled-regex size limit, so a hostile table cannot
//! be used for ReDoS or memory exhaustion.
//!
//! Captured tail values can contain `/` and `..`; callers that feed them
//! into anything filesystem-shaped must validate them first.

use std::collections::HashMap;

use crate::error::RouterError;

/// Maximum allowed length of a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 512;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 24;

/// Maximum allowed size of the compiled regex in bytes.
const MAX_COMPILED_REGEX_SIZE: usize = 1 << 20;

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The original pattern string.
	raw: String,
	/// Anchored regex the pattern compiles to.
	regex: regex::Regex,
	/// Capture names in segment order.
	param_names: Vec<String>,
	/// True when the pattern has no captures.
	is_static: bool,
}

impl RoutePattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] when the pattern is not an
	/// absolute path, exceeds the length or segment limits, places a
	/// `{name:*}` capture anywhere but the final segment, or compiles to an
	/// invalid or oversized regex.
	pub fn parse(pattern: &str) -> Result<Self, RouterError> {
		let reject = |reason: String| RouterError::InvalidPattern {
			pattern: pattern.to_string(),
			reason,
		};

		if !pattern.starts_with('/') {
			return Err(reject("pattern must be an absolute path".to_string()));
		}
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(reject(format!(
				"length {} exceeds the {} byte limit",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}

		let segments: Vec<&str> = pattern.split('/').collect();
		if segments.len() > MAX_PATH_SEGMENTS {
			return Err(reject(format!(
				"{} segments exceed the limit of {}",
				segments.len(),
				MAX_PATH_SEGMENTS
			)));
		}

		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();

		for (index, segment) in segments.iter().enumerate() {
			if index > 0 {
				regex_str.push('/');
			}

			match parse_capture(segment) {
				Some(Capture::Segment(name)) => {
					regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
					param_names.push(name.to_string());
				}
				Some(Capture::Tail(name)) => {
					if index + 1 != segments.len() {
						return Err(reject(format!(
							"tail capture '{{{}:*}}' must be the final segment",
							name
						)));
					}
					regex_str.push_str(&format!("(?P<{}>.*)", name));
					param_names.push(name.to_string());
				}
				None => regex_str.push_str(&regex::escape(segment)),
			}
		}

		regex_str.push('$');

		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_COMPILED_REGEX_SIZE)
			.build()
			.map_err(|e| reject(e.to_string()))?;

		Ok(Self {
			raw: pattern.to_string(),
			regex,
			is_static: param_names.is_empty(),
			param_names,
		})
	}

	/// Returns the original pattern string.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Returns the capture names in segment order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether the pattern has no captures.
	pub fn is_static(&self) -> bool {
		self.is_static
	}

	/// Returns whether the pattern matches the path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Matches a path, extracting captured parameters on success.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Builds a concrete path from this pattern and the given parameters.
	///
	/// Returns `None` when a capture has no corresponding entry in `params`.
	pub fn fill(&self, params: &HashMap<String, String>) -> Option<String> {
		if self.is_static {
			return Some(self.raw.clone());
		}

		let filled: Option<Vec<String>> = self
			.raw
			.split('/')
			.map(|segment| match parse_capture(segment) {
				Some(Capture::Segment(name)) | Some(Capture::Tail(name)) => {
					params.get(name).cloned()
				}
				None => Some(segment.to_string()),
			})
			.collect();

		filled.map(|segments| segments.join("/"))
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}

/// A capture form found in a single pattern segment.
enum Capture<'a> {
	/// `{name}`
	Segment(&'a str),
	/// `{name:*}`
	Tail(&'a str),
}

/// Parses a segment as a capture, or returns `None` for a literal segment.
fn parse_capture(segment: &str) -> Option<Capture<'_>> {
	let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
	match inner.strip_suffix(":*") {
		Some(name) => Some(Capture::Tail(name)),
		None => Some(Capture::Segment(inner)),
	}
}
