//! Stack snapshots as JSON, so a session can be carried across processes

use serde::{Deserialize, Serialize};
use crate::backend::Backend;
use crate::errors::{CalcError, CalcResult};
use crate::stack::RegStack;
use crate::token::{self, Token};
use crate::value::{self, Value};

///registers from X upward plus the memory register, every value as its decimal components
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
	pub stack: Vec<Vec<String>>,
	pub storcl: Vec<String>
}

fn components<B: Backend>(b: &B, v: &Value<B::N>) -> Vec<String> {
	v.comps().iter().map(|c| b.exact(c)).collect()
}

///components back to a value, through the same literal rules as typed input
fn value_of<B: Backend>(b: &B, fields: &[String]) -> CalcResult<Value<B::N>> {
	let lit = match fields {
		[re] => re.clone(),
		_ => format!("({})", fields.join(","))
	};
	match token::tokenize(b, &lit) {
		Ok(Token::Num(v)) if value::is_finite(b, &v) => Ok(v),
		_ => Err(CalcError::Snapshot(format!("{lit} is not a number")))
	}
}

impl Snapshot {
	pub fn of<B: Backend>(b: &B, stk: &RegStack<B::N>) -> Self {
		Self {
			stack: stk.iter().map(|v| components(b, v)).collect(),
			storcl: components(b, stk.mem())
		}
	}

	pub fn restore<B: Backend>(&self, b: &B) -> CalcResult<RegStack<B::N>> {
		if self.stack.is_empty() {return Err(CalcError::Snapshot("no registers".into()));}
		let regs = self.stack.iter().map(|f| value_of(b, f)).collect::<CalcResult<Vec<_>>>()?;
		RegStack::from_parts(regs, value_of(b, &self.storcl)?, Value::Real(b.zero()))
	}

	pub fn to_json(&self) -> CalcResult<String> {
		serde_json::to_string_pretty(self).map_err(|e| CalcError::Snapshot(e.to_string()))
	}

	pub fn from_json(s: &str) -> CalcResult<Self> {
		serde_json::from_str(s).map_err(|e| CalcError::Snapshot(e.to_string()))
	}
}
