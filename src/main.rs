use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sr_cli::config::load_rules;
use sr_cli::diagnostics::WriterSink;
use sr_cli::engine::apply_rules;
use sr_cli::resolve::SystemResolver;
use sr_cli::rules::compile_rules;

const OPTION_KEYS: &str = "\
List of search and replace options:
  s:  search string
  sc: run command & search for the returned output
  se: evaluate expression & search for the returned output
  sx: search regex
  r:  replace string
  rc: run command & replace with the returned output
  re: evaluate expression & replace with the returned output

Example: sr --yaml '[{s: foo, r: bar}, {se: int8((1+2)*3), r: nine}]' < in.txt";

#[derive(Parser)]
#[command(name = "sr")]
#[command(
	author,
	version,
	about = "Search and replace stdin using literal, command, expression and regex rules"
)]
#[command(after_help = OPTION_KEYS)]
struct Cli {
	/// Load rules from a YAML file (or TOML, if the name ends in .toml)
	#[arg(long, value_name = "PATH")]
	file: Option<PathBuf>,

	/// Inline YAML rule list, applied before rules from --file
	#[arg(long, value_name = "RULES")]
	yaml: Option<String>,

	/// Load and compile the rules, then exit without reading stdin
	#[arg(long)]
	check: bool,

	/// Log each rule as it is applied
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	// --verbose enables DEBUG, otherwise use RUST_LOG or default to WARN
	let filter = if cli.verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<ExitCode> {
	let rules = load_rules(cli.yaml.as_deref(), cli.file.as_deref())
		.context("Failed to load rules")?;

	let compiled = compile_rules(&rules).context("Failed to compile rules")?;

	if cli.check {
		println!("{} rule(s) OK", compiled.len());
		return Ok(ExitCode::SUCCESS);
	}

	let mut input = Vec::new();
	std::io::stdin()
		.read_to_end(&mut input)
		.context("Failed to read standard input")?;

	let mut sink = WriterSink::new(std::io::stderr());
	let output = apply_rules(input, &compiled, &SystemResolver::default(), &mut sink);

	let mut stdout = std::io::stdout().lock();
	stdout
		.write_all(&output)
		.and_then(|()| stdout.flush())
		.context("Failed to write standard output")?;

	Ok(ExitCode::SUCCESS)
}
