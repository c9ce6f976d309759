use std::io::{self, BufRead, Write};
use std::process::exit;
use cnc::{Backend, BackendKind, Big, Config, Effect, State, Trace, F64};
use tracing_subscriber::{prelude::*, fmt, EnvFilter};

const HELPMSG: &str = r##"cnc - hypercomplex RPN calculator in the manner of the HP-35

Command line options:
(order/position of --flags doesn't matter)

<nothing>
	Defaults to "-i".

--inter|-i
	Interactive mode, prompt-eval loop. The prompt shows the number of commands on the tape.

--expr|-e [--inter|-i] EXPR1 [EXPR2] [EXPR3] ...
	Expression mode, executes expressions in order and prints the stack.
	If combined with -i, enters interactive mode after expressions are finished.

[--file|-f] [--inter|-i] FILE1 [FILE2] [FILE3] ...
	File mode, executes contents of files in order. May also be combined with -i.
	For each line in the file(s), comments (following the first #) are removed before execution.
	-f is optional: If at least one option is provided without any --flags, file mode is implied.

Arguments made of a dash and letters only are read as short options, so an expression
like "-pi" has to be written with a space or a number in it ("pi chs", "-e '2 -pi'").

--depth|-n N
	Number of stack registers, at least 2 (default 8).

--clamp|-c X
	Clamp threshold, 0 disables snapping to integers (default 1e-10).

--big|-b [DIGITS]
	Arbitrary-precision decimal backend with DIGITS significant digits (default 28).

--stack|-s FILE
	Load the stack and memory from FILE (JSON) if it exists, and save them back on exit.

--debug|-d
	Start with the command trace on, and debug-level logging unless RUST_LOG says otherwise.

--help|-h
	Ignores all other options and prints this help message.

Type "help" at the prompt for the list of calculator commands."##;

///parse the argument of a valued flag or bail
fn flag_value<T: std::str::FromStr>(flag: &str, arg: Option<String>) -> T {
	match arg.as_deref().map(str::parse::<T>) {
		Some(Ok(v)) => v,
		_ => {
			eprintln!("! Option {flag} needs a valid argument, use -h for help");
			exit(1);
		}
	}
}

fn main() {
	//parse options
	let (mut i, mut e, mut f, mut h, mut d) = (false, false, false, false, false);
	let mut cfg = Config::default();
	let mut names: Vec<String> = Vec::new();
	let mut stack_file: Option<String> = None;
	let mut args = std::env::args().skip(1).peekable();	//skip name of binary
	while let Some(arg) = args.next() {
		if let Some(flag) = arg.strip_prefix("--") {	//long option
			match flag {
				"inter" => {i=true;}
				"expr" => {e=true;}
				"file" => {f=true;}
				"help" => {h=true;}
				"debug" => {d=true;}
				"depth" => {cfg.depth = flag_value("--depth", args.next());}
				"clamp" => {cfg.clamp = flag_value("--clamp", args.next());}
				"stack" => {stack_file = Some(flag_value("--stack", args.next()));}
				"big" => {
					cfg.backend = BackendKind::Big;
					if let Some(n) = args.next_if(|a| a.parse::<u32>().is_ok()) {
						cfg.digits = flag_value("--big", Some(n));
					}
				}
				_ => {
					eprintln!("! Unrecognized option: --{flag}, use -h for help");
					exit(1);
				}
			}
			continue;
		}
		if arg.len() > 1 && arg.starts_with('-') && arg.chars().all(|c| c=='-' || c.is_ascii_alphabetic()) {	//short options, several at once possible
			for flag in arg.chars() {
				match flag {
					'-' => {}	//allow -f-i or similar
					'i' => {i=true;}
					'e' => {e=true;}
					'f' => {f=true;}
					'h' => {h=true;}
					'd' => {d=true;}
					'n' => {cfg.depth = flag_value("-n", args.next());}
					'c' => {cfg.clamp = flag_value("-c", args.next());}
					's' => {stack_file = Some(flag_value("-s", args.next()));}
					'b' => {
						cfg.backend = BackendKind::Big;
						if let Some(n) = args.next_if(|a| a.parse::<u32>().is_ok()) {
							cfg.digits = flag_value("-b", Some(n));
						}
					}
					_ => {
						eprintln!("! Unrecognized option: -{flag}, use -h for help");
						exit(1);
					}
				}
			}
			continue;
		}
		names.push(arg);
	}

	if !(i || e || f) && names.is_empty() {i=true;}	//default to interactive

	if h {	//always exits
		println!("{HELPMSG}");
		return;
	}

	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if d {"debug"} else {"warn"}));
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(io::stderr))
		.with(filter)
		.init();

	let mode = match (i, e, f) {
		(false, false, false) => Mode::File(false),	//no flags: assume filenames
		(true, false, false) => Mode::Inter,
		(_, true, false) => Mode::Expr(i),
		(_, false, true) => Mode::File(i),
		(_, true, true) => {
			eprintln!("! Invalid options: both -e and -f present");
			exit(1);
		}
	};
	let code = match cfg.backend {
		BackendKind::Float => run(&cfg, F64::default(), mode, names, d, stack_file.as_deref()),
		BackendKind::Big => run(&cfg, Big::new(cfg.digits), mode, names, d, stack_file.as_deref())
	};
	exit(code);
}

#[derive(Clone, Copy)]
enum Mode {
	Inter,
	///then interactive?
	Expr(bool),
	File(bool)
}

fn run<B: Backend>(cfg: &Config, b: B, mode: Mode, names: Vec<String>, debug: bool, stack_file: Option<&str>) -> i32 {
	let mut st = match State::new(cfg, b) {
		Ok(st) => st,
		Err(err) => {
			eprintln!("! {err}");
			return 1;
		}
	};
	if let Some(path) = stack_file {
		match std::fs::read_to_string(path) {
			Ok(json) => {
				if let Err(err) = st.load_stack(&json) {
					eprintln!("! Unable to load stack from \"{path}\": {err}");
					return 1;
				}
			},
			Err(err) if err.kind() == io::ErrorKind::NotFound => {}	//first run
			Err(err) => {
				eprintln!("! Unable to read file \"{path}\": {err}");
				return 1;
			}
		}
	}
	st.set_debug(debug);
	let mut depth = 0_usize;
	st.on_trace(move |t| match t {
		Trace::Enter(input) => {
			eprintln!("{}-> {input}", "..".repeat(depth));
			depth += 1;
		},
		Trace::Exit(input, out) => {
			depth = depth.saturating_sub(1);
			eprintln!("{}<- {input} = {out}", "..".repeat(depth));
		}
	});

	let (quit, inter) = match mode {
		Mode::Inter => (false, true),
		Mode::Expr(inter) => (expression_mode(&mut st, names), inter),
		Mode::File(inter) => (file_mode(&mut st, names), inter)
	};
	if inter && !quit {
		interactive_mode(&mut st);
	}
	if let Some(path) = stack_file {
		let saved = st.save_stack().map_err(|e| e.to_string())
			.and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
		if let Err(err) = saved {
			eprintln!("! Unable to save stack to \"{path}\": {err}");
			return 1;
		}
	}
	0
}

///run one line, returns true on quit
fn exec<B: Backend>(st: &mut State<B>, line: &str) -> bool {
	let mut quit = false;
	for (input, res) in st.handle_line(line) {
		match res {
			Ok(Effect::None) => {}
			Ok(Effect::Show(s)) => {
				print!("{s}");
				if !s.ends_with('\n') {println!();}
			}
			Ok(Effect::Quit) => {quit = true;}
			Err(err) => {eprintln!("! {input}: {err}");}
		}
	}
	quit
}

fn interactive_mode<B: Backend>(st: &mut State<B>) {
	let stdin = io::stdin();
	let mut line = String::new();
	loop {
		print!("CNC[{}]> ", st.tape().count());
		io::stdout().flush().ok();
		line.clear();
		match stdin.lock().read_line(&mut line) {
			Ok(0) => {break;}	//EOF
			Ok(_) => {}
			Err(err) => {
				eprintln!("! {err}");
				break;
			}
		}
		if exec(st, &line) {break;}
		print!("{}", st.render_stack());
	}
}

fn expression_mode<B: Backend>(st: &mut State<B>, exprs: Vec<String>) -> bool {
	if exprs.is_empty() {
		eprintln!("! No expression provided");
		return false;
	}
	for expr in exprs {
		if exec(st, &expr) {return true;}
	}
	print!("{}", st.render_stack());
	false
}

fn file_mode<B: Backend>(st: &mut State<B>, files: Vec<String>) -> bool {
	if files.is_empty() {
		eprintln!("! No file name provided");
		return false;
	}
	for name in files {
		match std::fs::read_to_string(&name) {
			Ok(script) => {
				for line in script.lines() {
					let code = line.split('#').next().unwrap_or_default();	//remove comment
					if exec(st, code) {return true;}
				}
			}
			Err(err) => {
				eprintln!("! Unable to read file \"{name}\": {err}");
			}
		}
	}
	print!("{}", st.render_stack());
	false
}
