//! HP-35 register stack
//!
//! Fixed number of slots, slot 0 is X. The top slot is sticky: pulling the stack down
//! leaves a copy of it behind, pushing discards it. Memory M lives beside the slots and
//! is only touched by [`RegStack::store`].

use tracing::trace;
use crate::errors::{CalcError, CalcResult};
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct RegStack<N> {
	///slot 0 is X
	regs: Vec<Value<N>>,
	///memory register
	mem: Value<N>,
	///fill value for clearing
	zero: Value<N>
}

impl<N: Clone> RegStack<N> {
	///`depth` slots plus memory, all holding `zero`
	pub fn new(depth: usize, zero: Value<N>) -> CalcResult<Self> {
		if depth == 0 {
			return Err(CalcError::Config("stack depth must be at least 1".into()));
		}
		Ok(Self {
			regs: vec![zero.clone(); depth],
			mem: zero.clone(),
			zero
		})
	}

	///rebuild from saved slots (X first) and memory
	pub fn from_parts(regs: Vec<Value<N>>, mem: Value<N>, zero: Value<N>) -> CalcResult<Self> {
		if regs.is_empty() {
			return Err(CalcError::Config("stack depth must be at least 1".into()));
		}
		Ok(Self {regs, mem, zero})
	}

	#[inline(always)]
	pub fn depth(&self) -> usize {self.regs.len()}

	#[inline(always)]
	pub fn x(&self) -> &Value<N> {&self.regs[0]}

	pub fn y(&self) -> CalcResult<&Value<N>> {
		self.regs.get(1).ok_or(CalcError::StackUnderflow)
	}

	pub fn get(&self, slot: usize) -> Option<&Value<N>> {self.regs.get(slot)}

	#[inline(always)]
	pub fn mem(&self) -> &Value<N> {&self.mem}

	///slots from X upward
	pub fn iter(&self) -> std::slice::Iter<'_, Value<N>> {self.regs.iter()}

	///lift everything by one, the top value falls off
	pub fn push(&mut self, v: Value<N>) {
		self.regs.pop();
		self.regs.insert(0, v);
		trace!(depth = self.regs.len(), "push");
	}

	///take X and pull the rest down, the top slot keeps its value
	pub fn pop(&mut self) -> Value<N> {
		let top = self.regs[self.regs.len() - 1].clone();
		let x = self.regs.remove(0);
		self.regs.push(top);
		trace!(depth = self.regs.len(), "pull down");
		x
	}

	///Y to X, Z to Y, ..., X wraps around to the top
	pub fn roll_down(&mut self) {
		self.regs.rotate_left(1);
		trace!(depth = self.regs.len(), "roll down");
	}

	pub fn exchange(&mut self) -> CalcResult<()> {
		if self.regs.len() < 2 {return Err(CalcError::StackUnderflow);}
		self.regs.swap(0, 1);
		Ok(())
	}

	///X to M
	pub fn store(&mut self) {
		self.mem = self.regs[0].clone();
	}

	///M to X, M keeps its value
	pub fn recall(&mut self) {
		self.regs[0] = self.mem.clone();
	}

	///zero every slot, M untouched
	pub fn clear(&mut self) {
		for r in self.regs.iter_mut() {*r = self.zero.clone();}
	}

	pub fn clear_x(&mut self) {
		self.regs[0] = self.zero.clone();
	}

	///unary contract: X = v, nothing else moves
	pub fn replace_x(&mut self, v: Value<N>) {
		self.regs[0] = v;
	}

	///binary contract: X and Y are consumed, `v` lands in X, Z and above move down one
	///with the top slot duplicated
	pub fn binary_result(&mut self, v: Value<N>) -> CalcResult<()> {
		if self.regs.len() < 2 {return Err(CalcError::StackUnderflow);}
		self.pop();
		self.regs[0] = v;
		Ok(())
	}
}
