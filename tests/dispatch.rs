//! Command scenarios through `State::handle`, each run on both backends

use cnc::{Backend, CalcError, Config, Effect, Kind, State, Value, value};
use cnc::cmds::Op;

fn calc<B: Backend>(b: B) -> State<B> {
	State::new(&Config::default(), b).unwrap()
}

fn x_as_f64<B: Backend>(st: &State<B>) -> Vec<f64> {
	st.stack().x().comps().iter().map(|c| st.backend().to_f64(c)).collect()
}

fn eex_scales_y<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("6.022 23 eex");
	let x = x_as_f64(&st)[0];
	assert!((x / 6.022e23 - 1.0).abs() < 1e-12, "{x}");
	assert_eq!(st.display_x(), "6.022e23");
	//unary contract: Y is still the mantissa
	let y = st.backend().to_f64(st.stack().get(1).unwrap().re());
	assert!((y - 6.022).abs() < 1e-12);
}

fn clamp_snaps_near_integers<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle("0.9999999999999");
	assert_eq!(st.stack().x(), &Value::Real(st.backend().one()));
	st.handle("1e-12");
	assert_eq!(st.display_x(), "1e-12");
	assert!(!value::is_zero(st.backend(), st.stack().x()));
	st.handle("0");
	assert!(value::is_zero(st.backend(), st.stack().x()));
}

fn division_by_zero_is_atomic<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("5 1 0");
	let before = st.stack().clone();
	let r = st.handle("/");
	assert_eq!(r.outcome, Err(CalcError::DivisionByZero));
	assert_eq!(r.stack, &before);
	assert!(r.tape.last().map_or(false, |e| e.output.starts_with("! ")));
	assert_eq!(st.handle("inv").outcome, Err(CalcError::DivisionByZero));
	assert_eq!(st.stack(), &before);
}

fn unsupported_is_atomic<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle("j");
	let before = st.stack().clone();
	assert_eq!(st.handle("sin").outcome, Err(CalcError::Unsupported {op: Op::Sin, kind: Kind::Quaternion}));
	assert_eq!(st.handle("arg").outcome, Err(CalcError::Unsupported {op: Op::Arg, kind: Kind::Quaternion}));
	st.handle("e3");
	assert_eq!(st.handle("exp").outcome, Err(CalcError::Unsupported {op: Op::Exp, kind: Kind::Octonion}));
	st.handle("clx");
	st.handle("down");
	assert_eq!(st.stack().get(0), before.get(0));
}

fn mixed_kinds_promote<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("(1,2) (0,0,1,0) +");
	assert_eq!(st.stack().x().kind(), Kind::Quaternion);
	assert_eq!(st.display_x(), "(1, 2, 1, 0)");
	st.handle_line("(1,2) j *");
	assert_eq!(st.display_x(), "(0, 0, 1, 2)");
	st.handle_line("2 e7 *");
	assert_eq!(st.stack().x().kind(), Kind::Octonion);
}

fn tape_records_every_command<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("1 2 + foo (1,2,3)");
	let t = st.tape();
	assert_eq!(t.count(), 5);
	let outs: Vec<&str> = t.entries().iter().map(|e| e.output.as_str()).collect();
	assert_eq!(outs[..3], ["1", "2", "3"]);
	assert_eq!(outs[3], "! Unrecognized input \"foo\"");
	assert!(outs[4].starts_with("! Malformed literal"));
	assert_eq!(st.display_x(), "3");
	assert!(matches!(st.handle("tape").outcome, Ok(Effect::Show(s)) if s.lines().count() == 5));
}

fn euler_identity<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("i pi * exp 1 +");
	assert_eq!(st.stack().x().kind(), Kind::Complex);
	assert!(value::is_zero(st.backend(), st.stack().x()));
	assert_eq!(st.display_x(), "(0, 0)");
}

fn top_register_sticks<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("1 2 3 4 5 6 7 8");
	let before = st.stack().clone();
	for _ in 0..8 {st.handle("down");}
	assert_eq!(st.stack(), &before);
	st.handle("+");
	assert_eq!(st.display_x(), "15");
	assert_eq!(st.stack().get(7), st.stack().get(6));
	assert_eq!(st.backend().to_f64(st.stack().get(7).unwrap().re()), 1.0);
}

fn real_functions_go_complex<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("4 chs sqrt");
	assert_eq!(st.display_x(), "(0, 2)");
	st.handle_line("3 2 xtoy");
	assert_eq!(st.display_x(), "8");
	st.handle_line("(3,4) mod");
	assert_eq!(st.display_x(), "5");
	st.handle_line("(3,4) conj imag");
	assert_eq!(st.display_x(), "-4");
	assert!(matches!(st.handle_line("0 ln")[1].1, Err(CalcError::Domain(_))));
}

fn octonions_do_not_associate<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("e1 e2 * e4 *");
	let left = st.display_x();
	st.handle_line("e1 e2 e4 * *");
	let right = st.display_x();
	assert_eq!(left, "(0, 0, 0, 0, 0, 0, 0, 1)");
	assert_eq!(right, "(0, 0, 0, 0, 0, 0, 0, -1)");
}

fn memory_survives_clear<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("(1,1) sto clr rcl");
	assert_eq!(st.display_x(), "(1, 1)");
	let listing = st.render_stack();
	assert!(listing.starts_with("M: (1, 1)\n"));
	assert!(listing.ends_with("X: (1, 1)\n"));
	assert_eq!(listing.lines().count(), 9);
}

fn clamp_threshold_reads_back<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("0.7 setclamp getclamp");
	assert_eq!(st.display_x(), "0.7");
	assert_eq!(st.handle_line("clx getclamp 1 +")[2].1, Ok(Effect::None));
	assert_eq!(st.display_x(), "2");	//1.7 snaps under the wide threshold
}

fn normalize_scales_to_unit<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("(3,4) normalize");
	assert_eq!(st.display_x(), "(0.6, 0.8)");
	st.handle_line("(0,0,0,2) normalize");
	assert_eq!(st.display_x(), "(0, 0, 0, 1)");
	let before = st.stack().clone();
	assert_eq!(st.handle_line("clx normalize")[1].1, Err(CalcError::DivisionByZero));
	assert_eq!(st.stack().get(1), before.get(1));
}

fn eex_with_huge_negative_exponent<B: Backend>(b: B) {
	let mut st = calc(b);
	st.handle_line("5 1e19 chs");
	assert_eq!(st.handle("eex").outcome, Ok(Effect::None));
	assert!(value::is_zero(st.backend(), st.stack().x()));
}

macro_rules! on_both {
	($($name:ident),* $(,)?) => {
		mod binary64 {
			$(#[test] fn $name() {super::$name(cnc::F64::default())})*
		}
		mod mpfr {
			$(#[test] fn $name() {super::$name(cnc::Big::default())})*
		}
	}
}

on_both!(
	eex_scales_y,
	clamp_snaps_near_integers,
	division_by_zero_is_atomic,
	unsupported_is_atomic,
	mixed_kinds_promote,
	tape_records_every_command,
	euler_identity,
	top_register_sticks,
	real_functions_go_complex,
	octonions_do_not_associate,
	memory_survives_clear,
	clamp_threshold_reads_back,
	normalize_scales_to_unit,
	eex_with_huge_negative_exponent,
);

#[test]
fn binary64_overflow_is_reported() {
	let mut st = calc(cnc::F64::default());
	st.handle_line("1e300 1e300");
	let before = st.stack().clone();
	assert_eq!(st.handle("*").outcome, Err(CalcError::Overflow));
	assert_eq!(st.stack(), &before);
}

#[test]
fn binary64_rejects_infinite_literals() {
	let mut st = calc(cnc::F64::default());
	st.handle_line("1 2");
	let before = st.stack().clone();
	assert_eq!(st.handle("1e400").outcome, Err(CalcError::Overflow));
	assert_eq!(st.handle("(1e400,0)").outcome, Err(CalcError::Overflow));
	assert_eq!(st.stack(), &before);
}

#[test]
fn big_backend_is_decimal_exact() {
	let mut st = calc(cnc::Big::default());
	st.handle_line("0.1 3 * 0.3 -");
	assert!(value::is_zero(st.backend(), st.stack().x()));
	assert_eq!(st.display_x(), "0");
	st.handle_line("0.1 0.2 + 0.3 -");
	assert_eq!(st.display_x(), "0");
}

#[test]
fn stack_carries_over_between_sessions() {
	let mut first = calc(cnc::Big::default());
	first.handle_line("2 sqrt sto (1,0,0,1)");
	let json = first.save_stack().unwrap();
	let mut second = calc(cnc::Big::default());
	second.load_stack(&json).unwrap();
	assert_eq!(second.render_stack(), first.render_stack());
	second.handle_line("rcl push *");
	assert_eq!(second.display_x(), "2");
}

#[test]
fn big_backend_keeps_extra_digits() {
	let cfg = Config::default().custom_backend(cnc::BackendKind::Big, 40);
	let mut st = State::new(&cfg, cnc::Big::new(cfg.digits)).unwrap();
	st.handle_line("2 sqrt");
	assert_eq!(st.display_x(), "1.41421356237309504880168872420969807857");
}

#[test]
fn shallow_stack_from_config() {
	let mut st = State::new(&Config::default().custom_depth(2), cnc::F64::default()).unwrap();
	st.handle_line("1 2 3 +");
	assert_eq!(st.display_x(), "5");
	assert_eq!(st.stack().depth(), 2);
	assert_eq!(st.stack().get(1), Some(&Value::Real(2.0)));
}
