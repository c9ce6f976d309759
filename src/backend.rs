//! Scalar kernels the algebra layer is written against
//!
//! Two implementations exist: [`F64`] (IEEE binary64) and [`Big`] (MPFR floats via rug,
//! every result rounded to a chosen number of significant decimal digits). Every algebra
//! function takes `&B` and only ever touches scalars through this trait, so both backends
//! run the same control flow.

use std::fmt;
use rug::{Float, float::{Round, Constant}};
use crate::conv::tidy;

///capability set of a numeric backend
pub trait Backend {
	///native scalar
	type N: Clone + PartialEq + PartialOrd + fmt::Debug;

	fn name(&self) -> &'static str;

	fn int(&self, n: i64) -> Self::N;
	fn from_f64(&self, f: f64) -> Self::N;
	fn to_f64(&self, n: &Self::N) -> f64;
	///parse a decimal literal, shape already checked by the tokenizer
	fn parse(&self, s: &str) -> Option<Self::N>;
	///display form with the backend's significant digits
	fn fmt(&self, n: &Self::N) -> String;
	///decimal form that [`Backend::parse`] maps back to the same scalar
	fn exact(&self, n: &Self::N) -> String;

	fn pi(&self) -> Self::N;
	fn e(&self) -> Self::N;

	fn add(&self, a: &Self::N, b: &Self::N) -> Self::N;
	fn sub(&self, a: &Self::N, b: &Self::N) -> Self::N;
	fn mul(&self, a: &Self::N, b: &Self::N) -> Self::N;
	///unchecked, callers test the divisor
	fn div(&self, a: &Self::N, b: &Self::N) -> Self::N;
	fn atan2(&self, y: &Self::N, x: &Self::N) -> Self::N;

	fn neg(&self, a: &Self::N) -> Self::N;
	fn abs(&self, a: &Self::N) -> Self::N;
	fn sqrt(&self, a: &Self::N) -> Self::N;
	fn exp(&self, a: &Self::N) -> Self::N;
	fn ln(&self, a: &Self::N) -> Self::N;
	fn log10(&self, a: &Self::N) -> Self::N;
	fn sin(&self, a: &Self::N) -> Self::N;
	fn cos(&self, a: &Self::N) -> Self::N;
	fn tan(&self, a: &Self::N) -> Self::N;
	fn asin(&self, a: &Self::N) -> Self::N;
	fn acos(&self, a: &Self::N) -> Self::N;
	fn atan(&self, a: &Self::N) -> Self::N;
	fn sinh(&self, a: &Self::N) -> Self::N;
	fn cosh(&self, a: &Self::N) -> Self::N;
	fn tanh(&self, a: &Self::N) -> Self::N;
	fn asinh(&self, a: &Self::N) -> Self::N;
	fn acosh(&self, a: &Self::N) -> Self::N;
	fn atanh(&self, a: &Self::N) -> Self::N;
	///nearest integer, ties away from zero
	fn round(&self, a: &Self::N) -> Self::N;

	///integer part (toward zero) saturated to the i64 range, None if not finite
	fn trunc(&self, a: &Self::N) -> Option<i64>;
	///10^n
	fn pow10(&self, n: i64) -> Self::N;

	fn is_zero(&self, a: &Self::N) -> bool;
	fn is_finite(&self, a: &Self::N) -> bool;

	#[inline(always)]
	fn zero(&self) -> Self::N {self.int(0)}
	#[inline(always)]
	fn one(&self) -> Self::N {self.int(1)}
	#[inline(always)]
	fn sq(&self, a: &Self::N) -> Self::N {self.mul(a, a)}
	#[inline(always)]
	fn half(&self, a: &Self::N) -> Self::N {self.div(a, &self.int(2))}
}

///unary kernels with identical method names on f64 and rug::Float
macro_rules! kernels {
	(decimal: $($f:ident),*) => {$(
		#[inline(always)]
		fn $f(&self, a: &Self::N) -> Self::N {self.decimal(a.clone().$f())}
	)*};
	($($f:ident),*) => {$(
		#[inline(always)]
		fn $f(&self, a: &Self::N) -> Self::N {a.clone().$f()}
	)*}
}

///binary64 backend
#[derive(Clone, Copy, Debug)]
pub struct F64 {
	///significant digits shown
	pub digits: usize
}
impl Default for F64 {
	fn default() -> Self {
		Self {digits: 10}
	}
}

impl Backend for F64 {
	type N = f64;

	fn name(&self) -> &'static str {"binary64"}

	fn int(&self, n: i64) -> f64 {n as f64}
	fn from_f64(&self, f: f64) -> f64 {f}
	fn to_f64(&self, n: &f64) -> f64 {*n}
	fn parse(&self, s: &str) -> Option<f64> {s.parse().ok()}
	fn fmt(&self, n: &f64) -> String {
		if n.is_nan() {return "NaN".into();}
		if n.is_infinite() {return if *n<0.0 {"-∞".into()} else {"∞".into()};}
		tidy(&format!("{:.*e}", self.digits.saturating_sub(1), n), self.digits)
	}
	///shortest round-trip digits
	fn exact(&self, n: &f64) -> String {format!("{n:e}")}

	fn pi(&self) -> f64 {std::f64::consts::PI}
	fn e(&self) -> f64 {std::f64::consts::E}

	fn add(&self, a: &f64, b: &f64) -> f64 {a + b}
	fn sub(&self, a: &f64, b: &f64) -> f64 {a - b}
	fn mul(&self, a: &f64, b: &f64) -> f64 {a * b}
	fn div(&self, a: &f64, b: &f64) -> f64 {a / b}
	fn atan2(&self, y: &f64, x: &f64) -> f64 {y.atan2(*x)}

	fn neg(&self, a: &f64) -> f64 {-a}
	kernels!(abs, sqrt, exp, ln, log10, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh, round);

	fn trunc(&self, a: &f64) -> Option<i64> {
		if a.is_finite() {Some(a.trunc() as i64)} else {None}	//`as` saturates
	}
	fn pow10(&self, n: i64) -> f64 {
		if n <= -400 {0.0}
		else if n >= 400 {f64::INFINITY}
		else {10_f64.powi(n as i32)}
	}

	fn is_zero(&self, a: &f64) -> bool {*a == 0.0}
	fn is_finite(&self, a: &f64) -> bool {a.is_finite()}
}

///arbitrary-precision decimal backend (MPFR through rug)
///
///Every result is rounded to `digits` significant decimal digits, so equal decimal values
///always have equal representations and `0.1 3 * 0.3 -` is exactly zero.
#[derive(Clone, Copy, Debug)]
pub struct Big {
	///mantissa length in bits
	prec: u32,
	///significant decimal digits shown
	digits: usize
}
impl Default for Big {
	///28 digits, the classic decimal-context default
	fn default() -> Self {
		Self::new(28)
	}
}
impl Big {
	///backend carrying at least `digits` significant decimal digits, plus guard bits
	pub fn new(digits: u32) -> Self {
		let digits = digits.max(1);
		Self {
			prec: (f64::from(digits) * std::f64::consts::LOG2_10).ceil() as u32 + 16,
			digits: digits as usize
		}
	}
	pub fn prec(&self) -> u32 {self.prec}
	pub fn digits(&self) -> usize {self.digits}

	///round to `digits` significant decimal digits
	fn decimal(&self, f: Float) -> Float {
		if !f.is_normal() {return f;}	//zero, infinity, NaN
		match Float::parse(f.to_string_radix(10, Some(self.digits))) {
			Ok(p) => Float::with_val(self.prec, p),
			Err(_) => f
		}
	}
}

impl Backend for Big {
	type N = Float;

	fn name(&self) -> &'static str {"mpfr"}

	fn int(&self, n: i64) -> Float {Float::with_val(self.prec, n)}
	///through the shortest decimal form, so `0.7` stays 0.7
	fn from_f64(&self, f: f64) -> Float {
		self.parse(&f.to_string()).unwrap_or_else(|| Float::with_val(self.prec, f))
	}
	fn to_f64(&self, n: &Float) -> f64 {n.to_f64()}
	fn parse(&self, s: &str) -> Option<Float> {
		//rug wants digits on both sides of the point
		let s = s.strip_prefix('+').unwrap_or(s);
		let (man, exp) = match s.split_once(['e', 'E']) {
			Some((m, e)) => (m, Some(e)),
			None => (s, None)
		};
		let mut m = man.to_string();
		if m.starts_with('.') {m.insert(0, '0');}
		if m.starts_with("-.") {m.insert(1, '0');}
		if m.ends_with('.') {m.push('0');}
		if let Some(e) = exp {
			m.push('e');
			m.push_str(e.strip_prefix('+').unwrap_or(e));
		}
		Float::parse(m).ok().map(|p| self.decimal(Float::with_val(self.prec, p)))
	}
	fn fmt(&self, n: &Float) -> String {
		if !n.is_normal() {
			if n.is_zero() {return "0".into();}
			if n.is_nan() {return "NaN".into();}
			if n.is_infinite() {return if n.is_sign_negative() {"-∞".into()} else {"∞".into()};}
		}
		tidy(&n.to_string_radix(10, Some(self.digits)), self.digits)
	}
	fn exact(&self, n: &Float) -> String {n.to_string_radix(10, None)}

	fn pi(&self) -> Float {self.decimal(Float::with_val(self.prec, Constant::Pi))}
	fn e(&self) -> Float {self.decimal(Float::with_val(self.prec, 1_u8).exp())}

	fn add(&self, a: &Float, b: &Float) -> Float {self.decimal(Float::with_val(self.prec, a + b))}
	fn sub(&self, a: &Float, b: &Float) -> Float {self.decimal(Float::with_val(self.prec, a - b))}
	fn mul(&self, a: &Float, b: &Float) -> Float {self.decimal(Float::with_val(self.prec, a * b))}
	fn div(&self, a: &Float, b: &Float) -> Float {self.decimal(Float::with_val(self.prec, a / b))}
	fn atan2(&self, y: &Float, x: &Float) -> Float {self.decimal(y.clone().atan2(x))}

	fn neg(&self, a: &Float) -> Float {-a.clone()}
	kernels!(decimal: abs, sqrt, exp, ln, log10, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh, round);

	fn trunc(&self, a: &Float) -> Option<i64> {
		a.to_integer_round(Round::Zero).map(|(i, _)| {
			i.to_i64().unwrap_or(if i.cmp0().is_lt() {i64::MIN} else {i64::MAX})
		})
	}
	fn pow10(&self, n: i64) -> Float {self.decimal(Float::with_val(self.prec, n).exp10())}

	fn is_zero(&self, a: &Float) -> bool {a.is_zero()}
	fn is_finite(&self, a: &Float) -> bool {a.is_finite()}
}
