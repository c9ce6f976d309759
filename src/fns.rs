//! Algebra operations, written once against [`Backend`]
//!
//! Every function reads its operands and builds a fresh [`Value`], nothing is mutated in
//! place. Unsupported (kind, operation) pairs are explicit match arms returning
//! [`CalcError::Unsupported`].

use crate::backend::Backend;
use crate::cmds::Op;
use crate::errors::{CalcError, CalcResult};
use crate::value::{self, Kind, Value, Value::*, unify};

type C<N> = [N; 2];
type Q<N> = [N; 4];
type O<N> = [N; 8];

const ADD: bool = false;
const SUB: bool = true;

#[inline(always)]
fn unsupported<N: Clone>(op: Op, x: &Value<N>) -> CalcError {
	CalcError::Unsupported {op, kind: x.kind()}
}

///reject results with infinite or NaN components
#[inline(always)]
fn checked<B: Backend>(b: &B, v: Value<B::N>) -> CalcResult<Value<B::N>> {
	if value::is_finite(b, &v) {Ok(v)} else {Err(CalcError::Overflow)}
}

///signed sum of products
fn sop<B: Backend>(b: &B, terms: &[(bool, &B::N, &B::N)]) -> B::N {
	terms.iter().fold(b.zero(), |acc, (s, p, q)| {
		let m = b.mul(p, q);
		if *s {b.sub(&acc, &m)} else {b.add(&acc, &m)}
	})
}

fn nonneg<B: Backend>(b: &B, n: B::N) -> B::N {
	if n < b.zero() {b.zero()} else {n}
}

/*--------------
	COMPLEX
--------------*/
fn c_add<B: Backend>(b: &B, x: &C<B::N>, y: &C<B::N>) -> C<B::N> {
	[b.add(&x[0], &y[0]), b.add(&x[1], &y[1])]
}

fn c_sub<B: Backend>(b: &B, x: &C<B::N>, y: &C<B::N>) -> C<B::N> {
	[b.sub(&x[0], &y[0]), b.sub(&x[1], &y[1])]
}

fn c_mul<B: Backend>(b: &B, x: &C<B::N>, y: &C<B::N>) -> C<B::N> {
	[
		sop(b, &[(ADD, &x[0], &y[0]), (SUB, &x[1], &y[1])]),
		sop(b, &[(ADD, &x[0], &y[1]), (ADD, &x[1], &y[0])])
	]
}

fn c_div<B: Backend>(b: &B, x: &C<B::N>, y: &C<B::N>) -> CalcResult<C<B::N>> {
	let d = b.add(&b.sq(&y[0]), &b.sq(&y[1]));
	if b.is_zero(&d) {return Err(CalcError::DivisionByZero);}
	Ok([
		b.div(&sop(b, &[(ADD, &x[0], &y[0]), (ADD, &x[1], &y[1])]), &d),
		b.div(&sop(b, &[(ADD, &x[1], &y[0]), (SUB, &x[0], &y[1])]), &d)
	])
}

#[inline(always)]
fn c_real<B: Backend>(b: &B, n: B::N) -> C<B::N> {
	[n, b.zero()]
}

///i·z
#[inline(always)]
fn c_times_i<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[b.neg(&z[1]), z[0].clone()]
}

///-i·z
#[inline(always)]
fn c_times_neg_i<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[z[1].clone(), b.neg(&z[0])]
}

fn c_half<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[b.half(&z[0]), b.half(&z[1])]
}

fn c_abs<B: Backend>(b: &B, z: &C<B::N>) -> B::N {
	b.sqrt(&b.add(&b.sq(&z[0]), &b.sq(&z[1])))
}

fn c_exp<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	let m = b.exp(&z[0]);
	[b.mul(&m, &b.cos(&z[1])), b.mul(&m, &b.sin(&z[1]))]
}

///principal logarithm
fn c_ln<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	if b.is_zero(&z[0]) && b.is_zero(&z[1]) {return Err(CalcError::Domain("logarithm of zero"));}
	Ok([b.ln(&c_abs(b, z)), b.atan2(&z[1], &z[0])])
}

///principal square root, imaginary part takes the sign of z's
fn c_sqrt<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	if b.is_zero(&z[0]) && b.is_zero(&z[1]) {return [b.zero(), b.zero()];}
	let r = c_abs(b, z);
	let re = b.sqrt(&nonneg(b, b.half(&b.add(&r, &z[0]))));
	let im = b.sqrt(&nonneg(b, b.half(&b.sub(&r, &z[0]))));
	[re, if z[1] < b.zero() {b.neg(&im)} else {im}]
}

fn c_sin<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[b.mul(&b.sin(&z[0]), &b.cosh(&z[1])), b.mul(&b.cos(&z[0]), &b.sinh(&z[1]))]
}

fn c_cos<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[b.mul(&b.cos(&z[0]), &b.cosh(&z[1])), b.neg(&b.mul(&b.sin(&z[0]), &b.sinh(&z[1])))]
}

fn c_sinh<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[b.mul(&b.sinh(&z[0]), &b.cos(&z[1])), b.mul(&b.cosh(&z[0]), &b.sin(&z[1]))]
}

fn c_cosh<B: Backend>(b: &B, z: &C<B::N>) -> C<B::N> {
	[b.mul(&b.cosh(&z[0]), &b.cos(&z[1])), b.mul(&b.sinh(&z[0]), &b.sin(&z[1]))]
}

///asin z = -i ln(iz + sqrt(1 - z²))
fn c_asin<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	let root = c_sqrt(b, &c_sub(b, &c_real(b, b.one()), &c_mul(b, z, z)));
	Ok(c_times_neg_i(b, &c_ln(b, &c_add(b, &c_times_i(b, z), &root))?))
}

///acos z = π/2 - asin z
fn c_acos<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	let a = c_asin(b, z)?;
	Ok([b.sub(&b.half(&b.pi()), &a[0]), b.neg(&a[1])])
}

///atan z = i/2 (ln(1 - iz) - ln(1 + iz))
fn c_atan<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	let one = c_real(b, b.one());
	let iz = c_times_i(b, z);
	let d = c_sub(b, &c_ln(b, &c_sub(b, &one, &iz))?, &c_ln(b, &c_add(b, &one, &iz))?);
	Ok(c_times_i(b, &c_half(b, &d)))
}

///asinh z = ln(z + sqrt(z² + 1))
fn c_asinh<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	let root = c_sqrt(b, &c_add(b, &c_mul(b, z, z), &c_real(b, b.one())));
	c_ln(b, &c_add(b, z, &root))
}

///acosh z = ln(z + sqrt(z + 1)·sqrt(z - 1))
fn c_acosh<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	let one = c_real(b, b.one());
	let root = c_mul(b, &c_sqrt(b, &c_add(b, z, &one)), &c_sqrt(b, &c_sub(b, z, &one)));
	c_ln(b, &c_add(b, z, &root))
}

///atanh z = (ln(1 + z) - ln(1 - z)) / 2
fn c_atanh<B: Backend>(b: &B, z: &C<B::N>) -> CalcResult<C<B::N>> {
	let one = c_real(b, b.one());
	let d = c_sub(b, &c_ln(b, &c_add(b, &one, z))?, &c_ln(b, &c_sub(b, &one, z))?);
	Ok(c_half(b, &d))
}

///transcendental functions over the complex plane
fn c_fn<B: Backend>(b: &B, op: Op, z: &C<B::N>) -> CalcResult<C<B::N>> {
	Ok(match op {
		Op::Sqrt => c_sqrt(b, z),
		Op::Exp => c_exp(b, z),
		Op::Ln => c_ln(b, z)?,
		Op::Log => {
			let l = c_ln(b, z)?;
			let ten = b.ln(&b.int(10));
			[b.div(&l[0], &ten), b.div(&l[1], &ten)]
		},
		Op::Sin => c_sin(b, z),
		Op::Cos => c_cos(b, z),
		Op::Tan => c_div(b, &c_sin(b, z), &c_cos(b, z))?,
		Op::Asin => c_asin(b, z)?,
		Op::Acos => c_acos(b, z)?,
		Op::Atan => c_atan(b, z)?,
		Op::Sinh => c_sinh(b, z),
		Op::Cosh => c_cosh(b, z),
		Op::Tanh => c_div(b, &c_sinh(b, z), &c_cosh(b, z))?,
		Op::Asinh => c_asinh(b, z)?,
		Op::Acosh => c_acosh(b, z)?,
		Op::Atanh => c_atanh(b, z)?,
		_ => {return Err(CalcError::Unsupported {op, kind: Kind::Complex});}
	})
}

///real argument: stays real inside the function's real domain, continues into the
///complex plane outside it (sqrt(-4) = 2i, ln(-1) = iπ)
fn r_fn<B: Backend>(b: &B, op: Op, x: &B::N) -> CalcResult<Value<B::N>> {
	let (zero, one) = (b.zero(), b.one());
	let inside = match op {
		Op::Sqrt => *x >= zero,
		Op::Ln|Op::Log => *x > zero,
		Op::Asin|Op::Acos => b.abs(x) <= one,
		Op::Acosh => *x >= one,
		Op::Atanh => b.abs(x) < one,
		_ => true
	};
	if !inside {
		return c_fn(b, op, &c_real(b, x.clone())).map(Cplx);
	}
	Ok(Real(match op {
		Op::Sqrt => b.sqrt(x),
		Op::Exp => b.exp(x),
		Op::Ln => b.ln(x),
		Op::Log => b.log10(x),
		Op::Sin => b.sin(x),
		Op::Cos => b.cos(x),
		Op::Tan => b.tan(x),
		Op::Asin => b.asin(x),
		Op::Acos => b.acos(x),
		Op::Atan => b.atan(x),
		Op::Sinh => b.sinh(x),
		Op::Cosh => b.cosh(x),
		Op::Tanh => b.tanh(x),
		Op::Asinh => b.asinh(x),
		Op::Acosh => b.acosh(x),
		Op::Atanh => b.atanh(x),
		_ => {return Err(CalcError::Unsupported {op, kind: Kind::Real});}
	}))
}

/*-----------------
	QUATERNION
-----------------*/
///Hamilton product: ij = k, jk = i, ki = j
fn q_mul<B: Backend>(b: &B, p: &Q<B::N>, q: &Q<B::N>) -> Q<B::N> {
	[
		sop(b, &[(ADD, &p[0], &q[0]), (SUB, &p[1], &q[1]), (SUB, &p[2], &q[2]), (SUB, &p[3], &q[3])]),
		sop(b, &[(ADD, &p[0], &q[1]), (ADD, &p[1], &q[0]), (ADD, &p[2], &q[3]), (SUB, &p[3], &q[2])]),
		sop(b, &[(ADD, &p[0], &q[2]), (SUB, &p[1], &q[3]), (ADD, &p[2], &q[0]), (ADD, &p[3], &q[1])]),
		sop(b, &[(ADD, &p[0], &q[3]), (ADD, &p[1], &q[2]), (SUB, &p[2], &q[1]), (ADD, &p[3], &q[0])])
	]
}

fn q_conj<B: Backend>(b: &B, q: &Q<B::N>) -> Q<B::N> {
	[q[0].clone(), b.neg(&q[1]), b.neg(&q[2]), b.neg(&q[3])]
}

fn q_add<B: Backend>(b: &B, p: &Q<B::N>, q: &Q<B::N>) -> Q<B::N> {
	std::array::from_fn(|i| b.add(&p[i], &q[i]))
}

fn q_sub<B: Backend>(b: &B, p: &Q<B::N>, q: &Q<B::N>) -> Q<B::N> {
	std::array::from_fn(|i| b.sub(&p[i], &q[i]))
}

///length of the vector part
fn q_vnorm<B: Backend>(b: &B, q: &Q<B::N>) -> B::N {
	b.sqrt(&b.add(&b.add(&b.sq(&q[1]), &b.sq(&q[2])), &b.sq(&q[3])))
}

///e^w (cos|v| + v/|v| sin|v|)
fn q_exp<B: Backend>(b: &B, q: &Q<B::N>) -> Q<B::N> {
	let ew = b.exp(&q[0]);
	let vn = q_vnorm(b, q);
	if b.is_zero(&vn) {
		return [ew, b.zero(), b.zero(), b.zero()];
	}
	let s = b.div(&b.mul(&ew, &b.sin(&vn)), &vn);
	[b.mul(&ew, &b.cos(&vn)), b.mul(&s, &q[1]), b.mul(&s, &q[2]), b.mul(&s, &q[3])]
}

///ln|q| + v/|v| atan2(|v|, w); a negative real axis value picks i as the rotation axis
fn q_ln<B: Backend>(b: &B, q: &Q<B::N>) -> CalcResult<Q<B::N>> {
	let vn = q_vnorm(b, q);
	if b.is_zero(&vn) {
		if b.is_zero(&q[0]) {return Err(CalcError::Domain("logarithm of zero"));}
		return Ok(if q[0] > b.zero() {
			[b.ln(&q[0]), b.zero(), b.zero(), b.zero()]
		}
		else {
			[b.ln(&b.neg(&q[0])), b.pi(), b.zero(), b.zero()]
		});
	}
	let n = b.sqrt(&b.add(&b.sq(&q[0]), &b.sq(&vn)));
	let s = b.div(&b.atan2(&vn, &q[0]), &vn);
	Ok([b.ln(&n), b.mul(&s, &q[1]), b.mul(&s, &q[2]), b.mul(&s, &q[3])])
}

fn q_sqrt<B: Backend>(b: &B, q: &Q<B::N>) -> CalcResult<Q<B::N>> {
	if q.iter().all(|c| b.is_zero(c)) {return Ok(q.clone());}
	let l = q_ln(b, q)?;
	Ok(q_exp(b, &std::array::from_fn(|i| b.half(&l[i]))))
}

/*---------------
	OCTONION
---------------*/
fn halves<N: Clone>(o: &O<N>) -> (Q<N>, Q<N>) {
	(std::array::from_fn(|i| o[i].clone()), std::array::from_fn(|i| o[i+4].clone()))
}

///Cayley–Dickson doubling of the quaternions: (a,b)(c,d) = (ac - d*b, da + bc*)
fn o_mul<B: Backend>(b: &B, x: &O<B::N>, y: &O<B::N>) -> O<B::N> {
	let (p, q) = halves(x);
	let (r, s) = halves(y);
	let lo = q_sub(b, &q_mul(b, &p, &r), &q_mul(b, &q_conj(b, &s), &q));
	let hi = q_add(b, &q_mul(b, &s, &p), &q_mul(b, &q, &q_conj(b, &r)));
	std::array::from_fn(|i| if i<4 {lo[i].clone()} else {hi[i-4].clone()})
}

/*----------------
	OPERATIONS
----------------*/
pub fn neg<B: Backend>(b: &B, x: &Value<B::N>) -> Value<B::N> {
	x.map(|c| b.neg(c))
}

///negate every imaginary component
pub fn conj<B: Backend>(b: &B, x: &Value<B::N>) -> Value<B::N> {
	let c = x.comps();
	Value::build(x.kind(), |i| if i==0 {c[0].clone()} else {b.neg(&c[i])})
}

pub fn add<B: Backend>(b: &B, y: &Value<B::N>, x: &Value<B::N>) -> Value<B::N> {
	let (y, x) = unify(b, y, x);
	y.zip(&x, |p, q| b.add(p, q))
}

pub fn sub<B: Backend>(b: &B, y: &Value<B::N>, x: &Value<B::N>) -> Value<B::N> {
	let (y, x) = unify(b, y, x);
	y.zip(&x, |p, q| b.sub(p, q))
}

///y·x, non-commutative from quaternions up and non-associative for octonions
pub fn mul<B: Backend>(b: &B, y: &Value<B::N>, x: &Value<B::N>) -> Value<B::N> {
	match unify(b, y, x) {
		(Real(p), Real(q)) => Real(b.mul(&p, &q)),
		(Cplx(p), Cplx(q)) => Cplx(c_mul(b, &p, &q)),
		(Quat(p), Quat(q)) => Quat(q_mul(b, &p, &q)),
		(Oct(p), Oct(q)) => Oct(o_mul(b, &p, &q)),
		_ => unreachable!("unify yields operands of one kind")
	}
}

///conj(x) / |x|²
pub fn inverse<B: Backend>(b: &B, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	if let Real(r) = x {
		if b.is_zero(r) {return Err(CalcError::DivisionByZero);}
		return Ok(Real(b.div(&b.one(), r)));
	}
	let n2 = value::norm_sq(b, x);
	if b.is_zero(&n2) {return Err(CalcError::DivisionByZero);}
	Ok(conj(b, x).map(|c| b.div(c, &n2)))
}

///x / |x|, the unit value in the direction of x
pub fn normalize<B: Backend>(b: &B, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	let n = value::norm(b, x);
	if b.is_zero(&n) {return Err(CalcError::DivisionByZero);}
	Ok(x.map(|c| b.div(c, &n)))
}

///right division y·x⁻¹
pub fn div<B: Backend>(b: &B, y: &Value<B::N>, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	if let (Real(p), Real(q)) = (y, x) {
		if b.is_zero(q) {return Err(CalcError::DivisionByZero);}
		return Ok(Real(b.div(p, q)));
	}
	Ok(mul(b, y, &inverse(b, x)?))
}

///base^ex = exp(ln(base)·ex)
pub fn pow<B: Backend>(b: &B, base: &Value<B::N>, ex: &Value<B::N>) -> CalcResult<Value<B::N>> {
	let (base, ex) = unify(b, base, ex);
	if value::is_zero(b, &base) {
		return if *ex.re() > b.zero() {Ok(value::zero(b, base.kind()))} else {Err(CalcError::DivisionByZero)};
	}
	match (&base, &ex) {
		(Real(x), Real(y)) => {
			if *x > b.zero() {
				Ok(Real(b.exp(&b.mul(&b.ln(x), y))))
			}
			else if b.round(y) == *y {	//negative base, integral exponent: stays real
				let m = b.exp(&b.mul(&b.ln(&b.abs(x)), y));
				let odd = b.trunc(y).map_or(false, |n| n % 2 != 0);
				Ok(Real(if odd {b.neg(&m)} else {m}))
			}
			else {
				let l = c_ln(b, &c_real(b, x.clone()))?;
				Ok(Cplx(c_exp(b, &c_mul(b, &l, &c_real(b, y.clone())))))
			}
		},
		(Cplx(x), Cplx(y)) => Ok(Cplx(c_exp(b, &c_mul(b, &c_ln(b, x)?, y)))),
		(Quat(x), Quat(y)) => Ok(Quat(q_exp(b, &q_mul(b, &q_ln(b, x)?, y)))),
		_ => Err(unsupported(Op::Xtoy, &base))
	}
}

fn transcend<B: Backend>(b: &B, op: Op, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	match x {
		Real(r) => r_fn(b, op, r),
		Cplx(z) => c_fn(b, op, z).map(Cplx),
		Quat(q) => match op {
			Op::Exp => Ok(Quat(q_exp(b, q))),
			Op::Ln => q_ln(b, q).map(Quat),
			Op::Log => {
				let ten = b.ln(&b.int(10));
				Ok(Quat(q_ln(b, q)?.map(|c| b.div(&c, &ten))))
			},
			Op::Sqrt => q_sqrt(b, q).map(Quat),
			_ => Err(unsupported(op, x))
		},
		Oct(_) => Err(unsupported(op, x))
	}
}

///f(X) for every unary command
pub fn unary<B: Backend>(b: &B, op: Op, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	let r = match op {
		Op::Chs => neg(b, x),
		Op::Inv => inverse(b, x)?,
		Op::Conj => conj(b, x),
		Op::Abs => Real(value::norm(b, x)),
		Op::Normalize => normalize(b, x)?,
		Op::Real => Real(x.re().clone()),
		Op::Imag => match x {
			Real(_) => Real(b.zero()),
			Cplx(z) => Real(z[1].clone()),
			_ => {return Err(unsupported(op, x));}
		},
		Op::Arg => match x {
			Real(r) => Real(b.atan2(&b.zero(), r)),
			Cplx(z) => Real(b.atan2(&z[1], &z[0])),
			_ => {return Err(unsupported(op, x));}
		},
		_ => transcend(b, op, x)?
	};
	checked(b, r)
}

///f(Y, X) for every binary command, RPN order: Y op X
pub fn binary<B: Backend>(b: &B, op: Op, y: &Value<B::N>, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	let r = match op {
		Op::Add => add(b, y, x),
		Op::Sub => sub(b, y, x),
		Op::Mul => mul(b, y, x),
		Op::Div => div(b, y, x)?,
		Op::Xtoy => pow(b, x, y)?,	//x to the y
		_ => {return Err(unsupported(op, x));}
	};
	checked(b, r)
}

///Y·10^trunc(re X)
pub fn eex<B: Backend>(b: &B, y: &Value<B::N>, x: &Value<B::N>) -> CalcResult<Value<B::N>> {
	let n = b.trunc(x.re()).ok_or(CalcError::Overflow)?;
	let m = b.pow10(n);
	checked(b, y.map(|c| b.mul(c, &m)))
}
