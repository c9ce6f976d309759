//! Tokenizer: one input word to one token

use regex::Regex;
use crate::backend::Backend;
use crate::cmds::lookup;
use crate::errors::ParseError;
use crate::value::{Kind, Value};

lazy_static! {
	///bare real literal: `5`, `-2.5`, `.5`, `5.`, `6.022e23`
	static ref NUM: Regex = Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([Ee][+-]?[0-9]+)?$").unwrap();
	///anything in parentheses, fields are checked one by one
	static ref TUPLE: Regex = Regex::new(r"^\((.*)\)$").unwrap();
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token<N> {
	Num(Value<N>),
	///arithmetic symbol `+ - * /`
	Op(char),
	///named command, interned from the command table
	Cmd(&'static str)
}

fn real<B: Backend>(b: &B, s: &str) -> Option<B::N> {
	if NUM.is_match(s) {b.parse(s)} else {None}
}

///Recognition order: parenthesized literal (the field count picks octonion, quaternion or
///complex), bare real, operator symbol, named command.
pub fn tokenize<B: Backend>(b: &B, s: &str) -> Result<Token<B::N>, ParseError> {
	let s = s.trim();
	if let Some(c) = TUPLE.captures(s) {
		let fields: Vec<&str> = c[1].split(',').map(str::trim).collect();
		let kind = Kind::of_dim(fields.len()).filter(|k| *k != Kind::Real)
			.ok_or_else(|| ParseError::MalformedLiteral(format!("{s} has {} fields, need 2, 4 or 8", fields.len())))?;
		let comps = fields.iter()
			.map(|f| real(b, f).ok_or_else(|| ParseError::MalformedLiteral(format!("bad field \"{f}\" in {s}"))))
			.collect::<Result<Vec<_>, _>>()?;
		return Ok(Token::Num(Value::build(kind, |i| comps[i].clone())));
	}
	if NUM.is_match(s) {
		return real(b, s).map(|n| Token::Num(Value::Real(n))).ok_or_else(|| ParseError::MalformedLiteral(s.into()));
	}
	match lookup(s) {
		Some((name, _)) => {
			let mut cs = name.chars();
			Ok(match (cs.next(), cs.next()) {
				(Some(c @ ('+'|'-'|'*'|'/')), None) => Token::Op(c),
				_ => Token::Cmd(name)
			})
		},
		None => Err(ParseError::UnrecognizedToken(s.into()))
	}
}

///split on whitespace outside parentheses: `(1, 2) (0,1) *` is three words
pub fn split_line(line: &str) -> Vec<&str> {
	let mut words = Vec::new();
	let mut depth = 0_usize;
	let mut start: Option<usize> = None;
	for (i, c) in line.char_indices() {
		match c {
			'(' => {
				depth += 1;
				start.get_or_insert(i);
			},
			')' => {
				depth = depth.saturating_sub(1);
				start.get_or_insert(i);
			},
			c if c.is_whitespace() && depth == 0 => {
				if let Some(s) = start.take() {words.push(&line[s..i]);}
			},
			_ => {start.get_or_insert(i);}
		}
	}
	if let Some(s) = start {words.push(&line[s..]);}
	words
}
