//! Conversions to display form

use crate::backend::Backend;
use crate::stack::RegStack;
use crate::value::Value;

///normalize a digit string with optional point and exponent (`-1.2500e3`, `0.00125`)
///into shortest `%g`-style output with at most `digits` significant digits
pub fn tidy(s: &str, digits: usize) -> String {
	let (neg, s) = match s.strip_prefix('-') {
		Some(r) => (true, r),
		None => (false, s.strip_prefix('+').unwrap_or(s))
	};
	let (man, exp) = match s.split_once(['e', 'E', '@']) {
		Some((m, e)) => (m, e.parse::<i64>().unwrap_or(0)),
		None => (s, 0)
	};
	let (int, frac) = man.split_once('.').unwrap_or((man, ""));
	let mut ds: String = int.chars().chain(frac.chars()).collect();
	//decimal exponent of the leading digit
	let mut e = exp + int.len() as i64 - 1;

	let lead = ds.len() - ds.trim_start_matches('0').len();
	if lead == ds.len() {return "0".into();}
	ds.drain(..lead);
	e -= lead as i64;
	ds.truncate(digits.max(1));
	let ds = ds.trim_end_matches('0');

	let body = if e < -5 || e >= digits as i64 {
		let (h, t) = ds.split_at(1);
		if t.is_empty() {format!("{h}e{e}")} else {format!("{h}.{t}e{e}")}
	}
	else if e < 0 {
		format!("0.{}{ds}", "0".repeat((-e - 1) as usize))
	}
	else {
		let p = e as usize + 1;	//digits before the point
		if ds.len() <= p {format!("{ds}{}", "0".repeat(p - ds.len()))}
		else {format!("{}.{}", &ds[..p], &ds[p..])}
	};
	if neg {format!("-{body}")} else {body}
}

///literal form: bare scalar for reals, parenthesized components otherwise
pub fn fmt_value<B: Backend>(b: &B, v: &Value<B::N>) -> String {
	match v {
		Value::Real(x) => b.fmt(x),
		_ => format!("({})", v.comps().iter().map(|c| b.fmt(c)).collect::<Vec<_>>().join(", "))
	}
}

///register name: X, Y, Z, T, then the slot index
pub fn label(slot: usize) -> String {
	match slot {
		0 => "X".into(),
		1 => "Y".into(),
		2 => "Z".into(),
		3 => "T".into(),
		n => n.to_string()
	}
}

///memory first, then the registers from the top down to X
pub fn fmt_stack<B: Backend>(b: &B, stk: &RegStack<B::N>) -> String {
	let mut out = format!("M: {}\n", fmt_value(b, stk.mem()));
	for (i, v) in stk.iter().enumerate().rev() {
		out.push_str(&format!("{}: {}\n", label(i), fmt_value(b, v)));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::F64;
	use crate::value::Value::*;

	#[test]
	fn tidy_picks_plain_or_scientific() {
		assert_eq!(tidy("1.000000000e0", 10), "1");
		assert_eq!(tidy("1.234500000e2", 10), "123.45");
		assert_eq!(tidy("-2.500000000e-1", 10), "-0.25");
		assert_eq!(tidy("1.000000000e-5", 10), "0.00001");
		assert_eq!(tidy("1.000000000e-6", 10), "1e-6");
		assert_eq!(tidy("1.200000000e10", 10), "1.2e10");
		assert_eq!(tidy("9.999999999e9", 10), "9999999999");
		assert_eq!(tidy("-0.000000000e0", 10), "0");
	}

	#[test]
	fn tidy_accepts_positional_input() {
		assert_eq!(tidy("0.0012500", 10), "0.00125");
		assert_eq!(tidy("123.40", 10), "123.4");
		assert_eq!(tidy("+7", 3), "7");
		assert_eq!(tidy("31415.9", 3), "3.14e4");
	}

	#[test]
	fn value_literals() {
		let b = F64::default();
		assert_eq!(fmt_value(&b, &Real(2.5)), "2.5");
		assert_eq!(fmt_value(&b, &Cplx([1.0, -2.0])), "(1, -2)");
		assert_eq!(fmt_value(&b, &Quat([0.0, 1.0, 0.0, 0.5])), "(0, 1, 0, 0.5)");
	}

	#[test]
	fn stack_is_listed_top_down() {
		let b = F64::default();
		let mut s = RegStack::new(5, Real(0.0)).unwrap();
		s.push(Real(1.0));
		s.push(Real(2.0));
		s.store();
		assert_eq!(fmt_stack(&b, &s), "M: 2\n4: 0\nT: 0\nZ: 0\nY: 1\nX: 2\n");
		assert_eq!(label(7), "7");
	}
}
