//! Hypercomplex values as a closed tagged union
//!
//! A [`Value`] is one of four algebra kinds, each a fixed-size array of backend scalars.
//! Kinds are totally ordered by dimension, mixed binary operands are promoted upward
//! by zero-padding and never demoted.

use std::fmt;
use crate::backend::Backend;

///algebra kind, ordered by dimension
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
	Real,
	Complex,
	Quaternion,
	Octonion
}
impl Kind {
	///number of components
	#[inline(always)]
	pub fn dim(self) -> usize {
		match self {
			Kind::Real => 1,
			Kind::Complex => 2,
			Kind::Quaternion => 4,
			Kind::Octonion => 8
		}
	}

	///kind with exactly `n` components
	pub fn of_dim(n: usize) -> Option<Self> {
		match n {
			1 => Some(Kind::Real),
			2 => Some(Kind::Complex),
			4 => Some(Kind::Quaternion),
			8 => Some(Kind::Octonion),
			_ => None
		}
	}
}
impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", match self {
			Kind::Real => "real",
			Kind::Complex => "complex",
			Kind::Quaternion => "quaternion",
			Kind::Octonion => "octonion"
		})
	}
}

///calculator value
#[derive(Clone, Debug, PartialEq)]
pub enum Value<N> {
	Real(N),
	Cplx([N; 2]),
	Quat([N; 4]),
	Oct([N; 8])
}
use Value::*;

impl<N: Clone> Value<N> {
	pub fn kind(&self) -> Kind {
		match self {
			Real(_) => Kind::Real,
			Cplx(_) => Kind::Complex,
			Quat(_) => Kind::Quaternion,
			Oct(_) => Kind::Octonion
		}
	}

	///components in basis order
	pub fn comps(&self) -> &[N] {
		match self {
			Real(x) => std::slice::from_ref(x),
			Cplx(c) => c,
			Quat(c) => c,
			Oct(c) => c
		}
	}

	///real (first) component
	#[inline(always)]
	pub fn re(&self) -> &N {
		&self.comps()[0]
	}

	///construct a value of `kind` from a component generator
	pub fn build(kind: Kind, mut f: impl FnMut(usize) -> N) -> Self {
		match kind {
			Kind::Real => Real(f(0)),
			Kind::Complex => Cplx(std::array::from_fn(&mut f)),
			Kind::Quaternion => Quat(std::array::from_fn(&mut f)),
			Kind::Octonion => Oct(std::array::from_fn(&mut f))
		}
	}

	///componentwise map, kind preserved
	pub fn map(&self, mut f: impl FnMut(&N) -> N) -> Self {
		let c = self.comps();
		Self::build(self.kind(), |i| f(&c[i]))
	}

	///componentwise combination of two values of the same kind
	pub fn zip(&self, other: &Self, mut f: impl FnMut(&N, &N) -> N) -> Self {
		let (a, b) = (self.comps(), other.comps());
		Self::build(self.kind(), |i| f(&a[i], &b[i]))
	}

	///zero-pad up to `kind`, values already at or above it are returned unchanged
	pub fn promote(&self, kind: Kind, zero: &N) -> Self {
		if kind <= self.kind() {return self.clone();}
		let c = self.comps();
		Self::build(kind, |i| c.get(i).cloned().unwrap_or_else(|| zero.clone()))
	}
}

///bring two operands to their common (higher) kind
pub fn unify<B: Backend>(b: &B, x: &Value<B::N>, y: &Value<B::N>) -> (Value<B::N>, Value<B::N>) {
	let k = x.kind().max(y.kind());
	let z = b.zero();
	(x.promote(k, &z), y.promote(k, &z))
}

///additive identity of `kind`
pub fn zero<B: Backend>(b: &B, kind: Kind) -> Value<B::N> {
	Value::build(kind, |_| b.zero())
}

///unit basis element `idx` of `kind` (0 is the real unit)
pub fn basis<B: Backend>(b: &B, kind: Kind, idx: usize) -> Value<B::N> {
	Value::build(kind, |i| if i==idx {b.one()} else {b.zero()})
}

///all components exactly zero
pub fn is_zero<B: Backend>(b: &B, v: &Value<B::N>) -> bool {
	v.comps().iter().all(|c| b.is_zero(c))
}

///all components finite
pub fn is_finite<B: Backend>(b: &B, v: &Value<B::N>) -> bool {
	v.comps().iter().all(|c| b.is_finite(c))
}

///sum of squared components
pub fn norm_sq<B: Backend>(b: &B, v: &Value<B::N>) -> B::N {
	v.comps().iter().fold(b.zero(), |acc, c| b.add(&acc, &b.sq(c)))
}

///euclidean length of all components
pub fn norm<B: Backend>(b: &B, v: &Value<B::N>) -> B::N {
	match v {
		Real(x) => b.abs(x),
		_ => b.sqrt(&norm_sq(b, v))
	}
}

///equality within `eps` per component, after promotion
pub fn approx_eq<B: Backend>(b: &B, x: &Value<B::N>, y: &Value<B::N>, eps: &B::N) -> bool {
	let (x, y) = unify(b, x, y);
	x.comps().iter().zip(y.comps()).all(|(p, q)| b.abs(&b.sub(p, q)) <= *eps)
}

///snap near-integer components to the integer
///
///A value whose norm rounds to zero is left alone, so tiny entries like `1e-12` survive.
///Otherwise each component closer than `tol` to its nearest integer becomes that integer
///(including components that are merely noise around zero).
pub fn clamp<B: Backend>(b: &B, v: Value<B::N>, tol: &B::N) -> Value<B::N> {
	if b.is_zero(tol) || !is_finite(b, &v) {return v;}
	if b.is_zero(&b.round(&norm(b, &v))) {return v;}
	v.map(|c| {
		let r = b.round(c);
		if b.abs(&b.sub(c, &r)) < *tol {r} else {c.clone()}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::{F64, Big};

	#[test]
	fn kinds_order_by_dimension() {
		assert!(Kind::Real < Kind::Complex);
		assert!(Kind::Complex < Kind::Quaternion);
		assert!(Kind::Quaternion < Kind::Octonion);
		for k in [Kind::Real, Kind::Complex, Kind::Quaternion, Kind::Octonion] {
			assert_eq!(Kind::of_dim(k.dim()), Some(k));
		}
		assert_eq!(Kind::of_dim(3), None);
	}

	#[test]
	fn promotion_zero_pads_and_never_demotes() {
		let b = F64::default();
		let c = Cplx([1.0, 2.0]);
		assert_eq!(c.promote(Kind::Quaternion, &0.0), Quat([1.0, 2.0, 0.0, 0.0]));
		assert_eq!(c.promote(Kind::Real, &0.0), c);

		let (x, y) = unify(&b, &Real(3.0), &Quat([0.0, 1.0, 0.0, 0.0]));
		assert_eq!(x, Quat([3.0, 0.0, 0.0, 0.0]));
		assert_eq!(y.kind(), Kind::Quaternion);
	}

	#[test]
	fn basis_elements() {
		let b = F64::default();
		assert_eq!(basis(&b, Kind::Complex, 1), Cplx([0.0, 1.0]));
		let e5 = basis(&b, Kind::Octonion, 5);
		assert_eq!(e5.comps()[5], 1.0);
		assert_eq!(norm(&b, &e5), 1.0);
	}

	#[test]
	fn norms() {
		let b = F64::default();
		assert_eq!(norm(&b, &Real(-3.0)), 3.0);
		assert_eq!(norm(&b, &Cplx([3.0, 4.0])), 5.0);
		assert_eq!(norm_sq(&b, &Quat([1.0, 2.0, 3.0, 4.0])), 30.0);
	}

	#[test]
	fn clamp_snaps_conversion_noise() {
		let b = F64::default();
		let tol = 1e-10;
		assert_eq!(clamp(&b, Real(0.9999999999999), &tol), Real(1.0));
		assert_eq!(clamp(&b, Real(-2.00000000000004), &tol), Real(-2.0));
		assert_eq!(clamp(&b, Cplx([-1.0, 1.2246467991473532e-16]), &tol), Cplx([-1.0, 0.0]));
		assert_eq!(clamp(&b, Real(1.5), &tol), Real(1.5));
		assert_eq!(clamp(&b, Real(1.0000001), &tol), Real(1.0000001));
	}

	#[test]
	fn clamp_leaves_small_values_and_zero() {
		let b = F64::default();
		let tol = 1e-10;
		assert_eq!(clamp(&b, Real(1e-12), &tol), Real(1e-12));
		assert_eq!(clamp(&b, Real(0.0), &tol), Real(0.0));
		assert_eq!(clamp(&b, Cplx([1e-12, -1e-13]), &tol), Cplx([1e-12, -1e-13]));
		//disabled
		assert_eq!(clamp(&b, Real(0.9999999999999), &0.0), Real(0.9999999999999));
	}

	#[test]
	fn clamp_on_big_backend() {
		let b = Big::default();
		let tol = b.from_f64(1e-10);
		let v = clamp(&b, Real(b.parse("0.9999999999999").unwrap()), &tol);
		assert_eq!(v, Real(b.one()));
		let v = clamp(&b, Real(b.parse("1e-12").unwrap()), &tol);
		assert_eq!(b.fmt(v.re()), "1e-12");
	}

	#[test]
	fn approx_equality_promotes() {
		let b = F64::default();
		assert!(approx_eq(&b, &Real(1.0), &Oct([1.0, 1e-12, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]), &1e-10));
		assert!(!approx_eq(&b, &Real(1.0), &Cplx([1.0, 0.1]), &1e-10));
	}
}
