//! Append-only log of processed commands

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
	///running number, starts at 1
	pub n: usize,
	pub input: String,
	///X after the command, or `! error`
	pub output: String
}

#[derive(Clone, Debug, Default)]
pub struct Tape {
	entries: Vec<Entry>,
	///commands recorded since the last clear
	count: usize
}

impl Tape {
	pub fn new() -> Self {Self::default()}

	///append one entry, returns its number
	pub fn record(&mut self, input: &str, output: String) -> usize {
		self.count += 1;
		self.entries.push(Entry {n: self.count, input: input.into(), output});
		self.count
	}

	pub fn entries(&self) -> &[Entry] {&self.entries}

	pub fn last(&self) -> Option<&Entry> {self.entries.last()}

	#[inline(always)]
	pub fn count(&self) -> usize {self.count}

	///drop every entry and restart numbering, reached through [`crate::State::clear_tape`]
	pub fn clear(&mut self) {
		self.entries.clear();
		self.count = 0;
	}
}

impl fmt::Display for Tape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for e in &self.entries {
			writeln!(f, "{:>4}  {:<24} {}", e.n, e.input, e.output)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn records_in_order() {
		let mut t = Tape::new();
		assert_eq!(t.record("1", "1".into()), 1);
		assert_eq!(t.record("2", "2".into()), 2);
		assert_eq!(t.record("+", "3".into()), 3);
		let ins: Vec<&str> = t.entries().iter().map(|e| e.input.as_str()).collect();
		assert_eq!(ins, ["1", "2", "+"]);
		assert_eq!(t.last().map(|e| e.output.as_str()), Some("3"));
		assert_eq!(t.to_string().lines().count(), 3);
	}

	#[test]
	fn clear_resets_the_counter() {
		let mut t = Tape::new();
		t.record("pi", "3.141592654".into());
		t.clear();
		assert!(t.entries().is_empty());
		assert_eq!(t.record("e", "2.718281828".into()), 1);
	}
}
