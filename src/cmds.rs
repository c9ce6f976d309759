//! Command table: names and operator symbols mapped to arity-tagged operations

use std::fmt;
use phf::phf_map;

///how a command uses the stack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
	///pushes a constructed value
	Nullary,
	///replaces X with f(X)
	Unary,
	///replaces X with f(Y, X) and pulls the stack down
	Binary,
	///Y·10^X written into X without pulling down
	Eex,
	///pure stack/memory manipulation
	Stack,
	///calculator state and output, the stack is untouched
	Meta
}

///every operation the dispatcher knows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
	//constants
	Pi, E, I, J, K,
	///octonion basis element e0..e7
	Unit(u8),
	///clamp threshold as a real
	GetClamp,
	//stack
	Enter, Down, Exch, Sto, Rcl, Clr, Clx, Push,
	//binary
	Add, Sub, Mul, Div, Xtoy, Eex,
	//unary
	Chs, Inv, Sqrt, Exp, Ln, Log,
	Sin, Cos, Tan, Asin, Acos, Atan,
	Sinh, Cosh, Tanh, Asinh, Acosh, Atanh,
	Arg, Real, Imag, Conj, Abs, Normalize,
	//state
	Debug, SetClamp, Tape, Quit, Help
}
impl fmt::Display for Op {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Op::Unit(n) => write!(f, "e{n}"),
			_ => write!(f, "{}", format!("{self:?}").to_lowercase())
		}
	}
}

///table entry
#[derive(Clone, Copy, Debug)]
pub struct CmdInfo {
	pub op: Op,
	pub arity: Arity,
	pub help: &'static str
}

macro_rules! cmd {
	($op:expr, $ar:ident, $h:literal) => {
		CmdInfo {op: $op, arity: Arity::$ar, help: $h}
	}
}

///all commands, matched case-sensitively
pub static CMDS: phf::Map<&'static str, CmdInfo> = phf_map! {
	"pi" => cmd!(Op::Pi, Nullary, "push pi onto the stack"),
	"e" => cmd!(Op::E, Nullary, "push e onto the stack"),
	"i" => cmd!(Op::I, Nullary, "push the complex unit i"),
	"j" => cmd!(Op::J, Nullary, "push the quaternion unit j"),
	"k" => cmd!(Op::K, Nullary, "push the quaternion unit k"),
	"e0" => cmd!(Op::Unit(0), Nullary, "push the octonion unit e0"),
	"e1" => cmd!(Op::Unit(1), Nullary, "push the octonion unit e1"),
	"e2" => cmd!(Op::Unit(2), Nullary, "push the octonion unit e2"),
	"e3" => cmd!(Op::Unit(3), Nullary, "push the octonion unit e3"),
	"e4" => cmd!(Op::Unit(4), Nullary, "push the octonion unit e4"),
	"e5" => cmd!(Op::Unit(5), Nullary, "push the octonion unit e5"),
	"e6" => cmd!(Op::Unit(6), Nullary, "push the octonion unit e6"),
	"e7" => cmd!(Op::Unit(7), Nullary, "push the octonion unit e7"),

	"enter" => cmd!(Op::Enter, Stack, "display the stack"),
	"down" => cmd!(Op::Down, Stack, "roll down: t to z, z to y, y to x, x to t"),
	"exch" => cmd!(Op::Exch, Stack, "exchange x and y"),
	"sto" => cmd!(Op::Sto, Stack, "store x into M"),
	"rcl" => cmd!(Op::Rcl, Stack, "replace x with the value in M"),
	"clr" => cmd!(Op::Clr, Stack, "clear the stack"),
	"clear" => cmd!(Op::Clr, Stack, "clear the stack"),
	"clx" => cmd!(Op::Clx, Stack, "clear the x register"),
	"push" => cmd!(Op::Push, Stack, "push x up the stack (duplicate x)"),

	"+" => cmd!(Op::Add, Binary, "add x and y"),
	"-" => cmd!(Op::Sub, Binary, "subtract x from y"),
	"*" => cmd!(Op::Mul, Binary, "multiply y by x"),
	"mul" => cmd!(Op::Mul, Binary, "multiply y by x"),
	"/" => cmd!(Op::Div, Binary, "divide y by x"),
	"div" => cmd!(Op::Div, Binary, "divide y by x"),
	"xtoy" => cmd!(Op::Xtoy, Binary, "put x^y in x, removing both x and y"),
	"eex" => cmd!(Op::Eex, Eex, "replace x with y * 10^int(x)"),

	"chs" => cmd!(Op::Chs, Unary, "reverse the sign of x"),
	"inv" => cmd!(Op::Inv, Unary, "replace x with 1/x"),
	"sqrt" => cmd!(Op::Sqrt, Unary, "replace x with sqrt(x)"),
	"exp" => cmd!(Op::Exp, Unary, "replace x with e^x"),
	"ln" => cmd!(Op::Ln, Unary, "replace x with ln(x) - natural log"),
	"log" => cmd!(Op::Log, Unary, "replace x with log(x) - log base 10"),
	"sin" => cmd!(Op::Sin, Unary, "replace x with sin(x)"),
	"cos" => cmd!(Op::Cos, Unary, "replace x with cos(x)"),
	"tan" => cmd!(Op::Tan, Unary, "replace x with tan(x)"),
	"asin" => cmd!(Op::Asin, Unary, "replace x with asin(x)"),
	"arcsin" => cmd!(Op::Asin, Unary, "replace x with asin(x)"),
	"acos" => cmd!(Op::Acos, Unary, "replace x with acos(x)"),
	"arccos" => cmd!(Op::Acos, Unary, "replace x with acos(x)"),
	"atan" => cmd!(Op::Atan, Unary, "replace x with atan(x)"),
	"arctan" => cmd!(Op::Atan, Unary, "replace x with atan(x)"),
	"sinh" => cmd!(Op::Sinh, Unary, "replace x with sinh(x)"),
	"cosh" => cmd!(Op::Cosh, Unary, "replace x with cosh(x)"),
	"tanh" => cmd!(Op::Tanh, Unary, "replace x with tanh(x)"),
	"asinh" => cmd!(Op::Asinh, Unary, "replace x with asinh(x)"),
	"acosh" => cmd!(Op::Acosh, Unary, "replace x with acosh(x)"),
	"atanh" => cmd!(Op::Atanh, Unary, "replace x with atanh(x)"),
	"arg" => cmd!(Op::Arg, Unary, "replace x with arg(x)"),
	"real" => cmd!(Op::Real, Unary, "put real(x) into x"),
	"imag" => cmd!(Op::Imag, Unary, "put imag(x) into x"),
	"conj" => cmd!(Op::Conj, Unary, "replace x with its conjugate"),
	"mod" => cmd!(Op::Abs, Unary, "replace x with mod(x) [absolute value]"),
	"abs" => cmd!(Op::Abs, Unary, "replace x with mod(x) [absolute value]"),
	"normalize" => cmd!(Op::Normalize, Unary, "replace x with x/mod(x), the unit value in its direction"),

	"debug" => cmd!(Op::Debug, Meta, "toggle the debug trace"),
	"getclamp" => cmd!(Op::GetClamp, Nullary, "push the clamp threshold"),
	"setclamp" => cmd!(Op::SetClamp, Meta, "set the clamp threshold to real(x)"),
	"tape" => cmd!(Op::Tape, Meta, "dump the tape"),
	"quit" => cmd!(Op::Quit, Meta, "exit the calculator"),
	"help" => cmd!(Op::Help, Meta, "display documentation"),
	"?" => cmd!(Op::Help, Meta, "display documentation"),
};

///table lookup returning the interned name
#[inline(always)]
pub fn lookup(name: &str) -> Option<(&'static str, &'static CmdInfo)> {
	CMDS.get_entry(name).map(|(k, v)| (*k, v))
}

///help screen, commands in alphabetical order
pub fn help() -> String {
	let mut names: Vec<&&str> = CMDS.keys().collect();
	names.sort();
	let mut out = String::from(
"Complex Calculator

This calculator is constructed in honor of the late
George R Stibitz and 1972's HP35 scientific calculator.

Functionally it behaves like the HP35, but it operates on
complex numbers, quaternions and octonions.

Euler's identity can be demonstrated by typing
    i pi * exp 1 +

Operations:
");
	for (n, name) in names.into_iter().enumerate() {
		out.push_str(&format!("{:>3}: '{name}' - {}\n", n+1, CMDS[*name].help));
	}
	out.push_str(
"
Hypercomplex literals are entered in parentheses:
    (1,1)          complex 1+1i
    (w,x,y,z)      quaternion
    (e0,...,e7)    octonion
");
	out
}
