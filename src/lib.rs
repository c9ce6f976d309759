//! cnc: an HP-35 style RPN calculator over real, complex, quaternion and octonion numbers
//!
//! The kernel is a [`State`]: a fixed-depth register stack with memory, a tape of every
//! processed command and the clamp threshold, all driven through [`State::handle`] one
//! word at a time. Arithmetic is written once against the [`Backend`] trait and runs on
//! binary64 ([`F64`]) or arbitrary-precision decimal on MPFR ([`Big`]).
//!
//! ```
//! use cnc::{Config, State, F64};
//!
//! let mut st = State::new(&Config::default(), F64::default()).unwrap();
//! st.handle_line("i pi * exp 1 +");
//! assert_eq!(st.display_x(), "(0, 0)");
//! ```

#[macro_use]
extern crate lazy_static;

pub mod backend;
pub mod value;
pub mod fns;
pub mod stack;
pub mod tape;
pub mod token;
pub mod cmds;
pub mod conv;
pub mod errors;
pub mod persist;

use tracing::debug;

pub use backend::{Backend, F64, Big};
pub use value::{Value, Kind};
pub use errors::{CalcError, ParseError, CalcResult};
use cmds::{Arity, Op};
use persist::Snapshot;
use stack::RegStack;
use tape::Tape;
use token::Token;

///numeric backend choice, resolved to a concrete [`Backend`] by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BackendKind {
	///IEEE binary64
	#[default]
	Float,
	///decimal, rounded to [`Config::digits`] significant digits
	Big
}

///construction-time settings
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
	///register count, at least 2
	pub depth: usize,
	///clamp threshold, 0 disables clamping
	pub clamp: f64,
	pub backend: BackendKind,
	///significant decimal digits of the `Big` backend
	pub digits: u32
}
impl Default for Config {
	///HP-35 sized stack extended to 8 registers, 1e-10 clamp, binary64, 28 digits for `Big`
	fn default() -> Self {
		Self {
			depth: 8,
			clamp: 1e-10,
			backend: BackendKind::Float,
			digits: 28
		}
	}
}
impl Config {
	pub fn custom_depth(mut self, depth: usize) -> Self {
		self.depth = depth;
		self
	}
	pub fn custom_clamp(mut self, clamp: f64) -> Self {
		self.clamp = clamp;
		self
	}
	///select a backend, `digits` only matters for [`BackendKind::Big`]
	pub fn custom_backend(mut self, backend: BackendKind, digits: u32) -> Self {
		self.backend = backend;
		self.digits = digits;
		self
	}

	pub fn validate(&self) -> CalcResult<()> {
		if self.depth < 2 {
			return Err(CalcError::Config(format!("stack depth {} is below 2", self.depth)));
		}
		if !self.clamp.is_finite() || self.clamp < 0.0 {
			return Err(CalcError::Config(format!("clamp threshold {} must be finite and non-negative", self.clamp)));
		}
		if self.digits == 0 {
			return Err(CalcError::Config("precision must be at least 1 digit".into()));
		}
		Ok(())
	}
}

///what the caller should do after a successful command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
	None,
	///text to show the user (stack listing, tape, help)
	Show(String),
	Quit
}

///debug side channel, delivered to the [`State::on_trace`] callback while debugging is on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trace<'a> {
	///command about to run
	Enter(&'a str),
	///command finished, with the tape output
	Exit(&'a str, &'a str)
}

///result of one [`State::handle`] call plus read-only views of the state it left behind
pub struct Reply<'a, N> {
	pub outcome: CalcResult<Effect>,
	pub stack: &'a RegStack<N>,
	pub tape: &'a Tape
}

///Bundled state of one calculator session
pub struct State<B: Backend> {
	b: B,
	///registers and memory
	stk: RegStack<B::N>,
	tape: Tape,
	///clamp threshold
	clamp: B::N,
	///trace switch, flipped by the debug command
	debug: bool,
	tracer: Option<Box<dyn FnMut(&Trace<'_>)>>
}

impl<B: Backend> State<B> {
	pub fn new(cfg: &Config, b: B) -> CalcResult<Self> {
		cfg.validate()?;
		let clamp = b.from_f64(cfg.clamp);
		let stk = RegStack::new(cfg.depth, Value::Real(b.zero()))?;
		debug!(backend = b.name(), depth = cfg.depth, clamp = cfg.clamp, "new calculator");
		Ok(Self {b, stk, tape: Tape::new(), clamp, debug: false, tracer: None})
	}

	pub fn backend(&self) -> &B {&self.b}
	pub fn stack(&self) -> &RegStack<B::N> {&self.stk}
	pub fn tape(&self) -> &Tape {&self.tape}
	pub fn clamp(&self) -> &B::N {&self.clamp}
	pub fn debug(&self) -> bool {self.debug}
	pub fn set_debug(&mut self, on: bool) {self.debug = on;}

	///install the trace callback, replacing any previous one
	pub fn on_trace(&mut self, f: impl FnMut(&Trace<'_>) + 'static) {
		self.tracer = Some(Box::new(f));
	}

	///X in literal form
	pub fn display_x(&self) -> String {
		conv::fmt_value(&self.b, self.stk.x())
	}

	///full register listing, M first
	pub fn render_stack(&self) -> String {
		conv::fmt_stack(&self.b, &self.stk)
	}

	///stack and memory as JSON
	pub fn save_stack(&self) -> CalcResult<String> {
		Snapshot::of(&self.b, &self.stk).to_json()
	}

	///replace stack and memory with a [`State::save_stack`] snapshot of the same depth,
	///on failure nothing changes
	pub fn load_stack(&mut self, json: &str) -> CalcResult<()> {
		let stk = Snapshot::from_json(json)?.restore(&self.b)?;
		if stk.depth() != self.stk.depth() {
			return Err(CalcError::Snapshot(format!("{} registers, this stack has {}", stk.depth(), self.stk.depth())));
		}
		self.stk = stk;
		debug!(depth = self.stk.depth(), "stack loaded");
		Ok(())
	}

	pub fn clear_tape(&mut self) {
		self.tape.clear();
	}

	fn trace(&mut self, t: Trace<'_>) {
		if !self.debug {return;}
		if let Some(f) = self.tracer.as_mut() {f(&t);}
	}

	///run one word, record it on the tape and hand back the outcome with views of the
	///resulting state; a failed command leaves the stack exactly as it was
	pub fn handle(&mut self, input: &str) -> Reply<'_, B::N> {
		let input = input.trim();
		self.trace(Trace::Enter(input));
		let outcome = self.dispatch(input);
		let shown = match &outcome {
			Ok(_) => self.display_x(),
			Err(e) => format!("! {e}")
		};
		debug!(input, result = %shown, ok = outcome.is_ok(), "handled");
		self.trace(Trace::Exit(input, &shown));
		self.tape.record(input, shown);
		Reply {outcome, stack: &self.stk, tape: &self.tape}
	}

	///run every word of a line, stopping after `quit`
	pub fn handle_line(&mut self, line: &str) -> Vec<(String, CalcResult<Effect>)> {
		let mut out = Vec::new();
		for word in token::split_line(line) {
			let r = self.handle(word).outcome;
			let quit = matches!(r, Ok(Effect::Quit));
			out.push((word.to_string(), r));
			if quit {break;}
		}
		out
	}

	#[inline(always)]
	fn clamped(&self, v: Value<B::N>) -> Value<B::N> {
		value::clamp(&self.b, v, &self.clamp)
	}

	fn dispatch(&mut self, input: &str) -> CalcResult<Effect> {
		let found = match token::tokenize(&self.b, input)? {
			Token::Num(v) => {
				if !value::is_finite(&self.b, &v) {return Err(CalcError::Overflow);}
				let v = self.clamped(v);
				self.stk.push(v);
				return Ok(Effect::None);
			},
			Token::Op(c) => cmds::lookup(c.encode_utf8(&mut [0; 4])),
			Token::Cmd(name) => cmds::lookup(name)
		};
		let info = found.map(|(_, i)| i).ok_or_else(|| ParseError::UnrecognizedToken(input.into()))?;
		let op = info.op;
		match info.arity {
			Arity::Nullary => {
				let v = match op {
					Op::GetClamp => Value::Real(self.clamp.clone()),	//reported as set, never snapped
					_ => self.clamped(self.constant(op)?)
				};
				self.stk.push(v);
			},
			Arity::Unary => {
				let r = fns::unary(&self.b, op, self.stk.x())?;
				let r = self.clamped(r);
				self.stk.replace_x(r);
			},
			Arity::Binary => {
				let r = fns::binary(&self.b, op, self.stk.y()?, self.stk.x())?;
				let r = self.clamped(r);
				self.stk.binary_result(r)?;
			},
			Arity::Eex => {
				let r = fns::eex(&self.b, self.stk.y()?, self.stk.x())?;
				let r = self.clamped(r);
				self.stk.replace_x(r);
			},
			Arity::Stack => {return self.stack_cmd(op);},
			Arity::Meta => {return self.meta_cmd(op);}
		}
		Ok(Effect::None)
	}

	fn constant(&self, op: Op) -> CalcResult<Value<B::N>> {
		let b = &self.b;
		Ok(match op {
			Op::Pi => Value::Real(b.pi()),
			Op::E => Value::Real(b.e()),
			Op::I => value::basis(b, Kind::Complex, 1),
			Op::J => value::basis(b, Kind::Quaternion, 2),
			Op::K => value::basis(b, Kind::Quaternion, 3),
			Op::Unit(n) => value::basis(b, Kind::Octonion, n as usize),
			_ => {return Err(CalcError::Unsupported {op, kind: Kind::Real});}
		})
	}

	fn stack_cmd(&mut self, op: Op) -> CalcResult<Effect> {
		match op {
			Op::Enter => {return Ok(Effect::Show(self.render_stack()));},
			Op::Down => {self.stk.roll_down();},
			Op::Exch => {self.stk.exchange()?;},
			Op::Sto => {self.stk.store();},
			Op::Rcl => {self.stk.recall();},
			Op::Clr => {self.stk.clear();},
			Op::Clx => {self.stk.clear_x();},
			Op::Push => {
				let x = self.stk.x().clone();
				self.stk.push(x);
			},
			_ => {return Err(CalcError::Unsupported {op, kind: self.stk.x().kind()});}
		}
		Ok(Effect::None)
	}

	fn meta_cmd(&mut self, op: Op) -> CalcResult<Effect> {
		Ok(match op {
			Op::Debug => {
				self.debug = !self.debug;
				Effect::Show(format!("debug {}", if self.debug {"on"} else {"off"}))
			},
			Op::SetClamp => {
				let t = self.stk.x().re().clone();
				if !self.b.is_finite(&t) || t < self.b.zero() {
					return Err(CalcError::Domain("clamp threshold must be finite and non-negative"));
				}
				let shown = self.b.fmt(&t);
				self.clamp = t;
				Effect::Show(format!("clamp {shown}"))
			},
			Op::Tape => Effect::Show(self.tape.to_string()),
			Op::Quit => Effect::Quit,
			Op::Help => Effect::Show(cmds::help()),
			_ => {return Err(CalcError::Unsupported {op, kind: self.stk.x().kind()});}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::rc::Rc;

	fn calc() -> State<F64> {
		State::new(&Config::default(), F64::default()).unwrap()
	}

	#[test]
	fn config_validation() {
		assert!(Config::default().validate().is_ok());
		assert!(matches!(Config::default().custom_depth(1).validate(), Err(CalcError::Config(_))));
		assert!(Config::default().custom_clamp(-1.0).validate().is_err());
		assert!(Config::default().custom_clamp(f64::NAN).validate().is_err());
		assert!(Config::default().custom_backend(BackendKind::Big, 0).validate().is_err());
		assert!(State::new(&Config::default().custom_depth(0), F64::default()).is_err());
	}

	#[test]
	fn constants() {
		let mut st = calc();
		st.handle_line("i j k e5");
		assert_eq!(st.display_x(), "(0, 0, 0, 0, 0, 1, 0, 0)");
		assert_eq!(conv::fmt_value(st.backend(), st.stack().get(1).unwrap()), "(0, 0, 0, 1)");
		assert_eq!(conv::fmt_value(st.backend(), st.stack().get(3).unwrap()), "(0, 1)");
	}

	#[test]
	fn clamp_threshold_round_trip() {
		let mut st = calc();
		st.handle("getclamp");
		assert_eq!(st.display_x(), "1e-10");
		st.handle("0");
		assert_eq!(st.handle("setclamp").outcome, Ok(Effect::Show("clamp 0".into())));
		st.handle("0.9999999999999");
		assert_eq!(st.display_x(), "1");	//display rounds, the value is kept
		assert_ne!(st.stack().x(), &Value::Real(1.0));
		st.handle("-1");
		assert!(matches!(st.handle("setclamp").outcome, Err(CalcError::Domain(_))));
		assert_eq!(st.clamp(), &0.0);
	}

	#[test]
	fn wide_clamp_threshold_reads_back_unchanged() {
		let mut st = calc();
		st.handle_line("0.7 setclamp getclamp");
		assert_eq!(st.stack().x(), &Value::Real(0.7));
		st.handle("2.6");
		assert_eq!(st.display_x(), "3");
	}

	#[test]
	fn overflowing_literals_are_rejected() {
		let mut st = calc();
		st.handle_line("1 2");
		let before = st.stack().clone();
		for lit in ["1e400", "(1e400,0)", "(0,0,0,-1e999)"] {
			assert_eq!(st.handle(lit).outcome, Err(CalcError::Overflow), "{lit}");
			assert_eq!(st.stack(), &before);
		}
		assert_eq!(st.tape().last().map(|e| e.output.as_str()), Some("! Numeric overflow"));
	}

	#[test]
	fn meta_commands_leave_the_stack_alone() {
		let mut st = calc();
		st.handle_line("1 2");
		let before = st.stack().clone();
		for cmd in ["tape", "help", "enter", "debug", "debug"] {
			assert!(matches!(st.handle(cmd).outcome, Ok(Effect::Show(_))), "{cmd}");
		}
		assert_eq!(st.stack(), &before);
	}

	#[test]
	fn quit_stops_the_line() {
		let mut st = calc();
		let r = st.handle_line("1 quit 2");
		assert_eq!(r.len(), 2);
		assert_eq!(r[1], ("quit".to_string(), Ok(Effect::Quit)));
		assert_eq!(st.display_x(), "1");
	}

	#[test]
	fn trace_only_while_debugging() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut st = calc();
		let log = seen.clone();
		st.on_trace(move |t| log.borrow_mut().push(format!("{t:?}")));
		st.handle("1");
		assert!(seen.borrow().is_empty());
		st.handle("debug");
		st.handle("2");
		assert_eq!(*seen.borrow(), [
			r#"Exit("debug", "1")"#.to_string(),
			r#"Enter("2")"#.to_string(),
			r#"Exit("2", "2")"#.to_string()
		]);
	}

	#[test]
	fn stack_survives_a_json_round_trip() {
		let mut st = calc();
		st.handle_line("(1,2) sto 0.1 (0,0,1,-4)");
		let json = st.save_stack().unwrap();
		let mut other = calc();
		other.handle("7");
		other.load_stack(&json).unwrap();
		assert_eq!(other.stack(), st.stack());
		assert_eq!(other.handle_line("rcl")[0].1, Ok(Effect::None));
		assert_eq!(other.display_x(), "(1, 2)");

		let mut shallow = State::new(&Config::default().custom_depth(4), F64::default()).unwrap();
		shallow.handle("7");
		assert!(matches!(shallow.load_stack(&json), Err(CalcError::Snapshot(_))));
		assert!(matches!(shallow.load_stack("{}"), Err(CalcError::Snapshot(_))));
		assert_eq!(shallow.display_x(), "7");
	}

	#[test]
	fn tape_clears_on_request() {
		let mut st = calc();
		st.handle_line("1 2 +");
		assert_eq!(st.tape().count(), 3);
		st.clear_tape();
		assert_eq!(st.tape().count(), 0);
		st.handle("4");
		assert_eq!(st.tape().last().map(|e| e.n), Some(1));
		assert_eq!(st.display_x(), "4");
	}

	#[test]
	fn push_and_stack_commands() {
		let mut st = calc();
		st.handle_line("3 push +");
		assert_eq!(st.display_x(), "6");
		st.handle_line("sto clr");
		assert_eq!(st.display_x(), "0");
		st.handle("rcl");
		assert_eq!(st.display_x(), "6");
		st.handle_line("1 exch");
		assert_eq!(st.display_x(), "6");
		st.handle("clx");
		assert_eq!(st.display_x(), "0");
	}
}
