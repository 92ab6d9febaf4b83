use log::info;
use thiserror::Error;

use super::store::EdgeStore;

/// The only accepted header line.
pub const HEADER: &str = "Source\tTarget\tText";

/// Why a network source was rejected. Loading stops at the first problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	/// The source has no non-blank line.
	#[error("source is empty, expected header `Source<TAB>Target<TAB>Text`")]
	MissingHeader,

	/// The first line is not the expected header.
	#[error("unexpected header {found:?}, expected `Source<TAB>Target<TAB>Text`")]
	BadHeader {
		/// The line found instead.
		found: String,
	},

	/// A row does not split into exactly three fields.
	#[error("line {line}: expected 3 tab-separated fields, found {found}")]
	FieldCount {
		/// 1-based line number in the raw source.
		line: usize,
		/// Number of fields the row split into.
		found: usize,
	},
}

/// One raw `(source, target, text)` triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeRow {
	/// `Source` column.
	pub source: String,
	/// `Target` column.
	pub target: String,
	/// `Text` column, `None` when empty.
	pub text: Option<String>,
}

impl EdgeRow {
	/// Row from its three columns; an empty `text` means no text.
	pub fn new(source: &str, target: &str, text: &str) -> Self {
		Self {
			source: source.to_owned(),
			target: target.to_owned(),
			text: (!text.is_empty()).then(|| text.to_owned()),
		}
	}
}

/// Parse tab-separated text into edge rows, header first.
pub fn parse_rows(source: &str) -> Result<Vec<EdgeRow>, ParseError> {
	let mut lines = source
		.lines()
		.enumerate()
		.map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
		.filter(|(_, line)| !line.trim().is_empty());

	let (_, header) = lines.next().ok_or(ParseError::MissingHeader)?;
	if header != HEADER {
		return Err(ParseError::BadHeader {
			found: header.to_owned(),
		});
	}

	lines
		.map(|(line, raw)| {
			let fields: Vec<&str> = raw.split('\t').collect();
			match fields.as_slice() {
				[from, to, text] => Ok(EdgeRow::new(from, to, text)),
				_ => Err(ParseError::FieldCount {
					line,
					found: fields.len(),
				}),
			}
		})
		.collect()
}

/// Parse `source` and index it. Nothing is built if any row is malformed.
pub fn load_edges(source: &str) -> Result<EdgeStore, ParseError> {
	let rows = parse_rows(source)?;
	let store = EdgeStore::from_rows(rows);
	info!(
		"Loaded {} edges over {} nodes",
		store.edge_count(),
		store.node_count()
	);
	Ok(store)
}
