//! Error taxonomy of the calculator core

use thiserror::Error;
use crate::value::Kind;
use crate::cmds::Op;

///tokenizer failures, the stack is never touched when one of these occurs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	#[error("Unrecognized input \"{0}\"")]
	UnrecognizedToken(String),

	#[error("Malformed literal: {0}")]
	MalformedLiteral(String),
}

///everything a command can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
	#[error(transparent)]
	Parse(#[from] ParseError),

	///only reachable with a misconfigured depth-1 stack
	#[error("Stack underflow")]
	StackUnderflow,

	#[error("Division by zero")]
	DivisionByZero,

	#[error("{op} is not defined for {kind} numbers")]
	Unsupported {op: Op, kind: Kind},

	#[error("Domain error: {0}")]
	Domain(&'static str),

	#[error("Numeric overflow")]
	Overflow,

	#[error("Invalid configuration: {0}")]
	Config(String),

	#[error("Invalid stack snapshot: {0}")]
	Snapshot(String),
}

pub type CalcResult<T> = Result<T, CalcError>;
