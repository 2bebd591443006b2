use clap::Parser;
use jsone_expr::env::Builder;
use std::path::PathBuf;

/// Evaluates a JSON-e expression and prints the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "jsone-expr", version, about)]
struct Cli {
	/// The expression to evaluate.
	expression: String,

	/// A JSON object whose keys are bound in the context.
	#[arg(short, long)]
	context: Option<String>,

	/// A file containing a JSON object whose keys are bound in the context.
	#[arg(short, long, conflicts_with = "context")]
	file: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
	let json = match (cli.context, cli.file) {
		(Some(context), _) => serde_json::from_str(&context)?,
		(None, Some(file)) => serde_json::from_str(&std::fs::read_to_string(file)?)?,
		(None, None) => serde_json::Map::new(),
	};

	let mut builder = Builder::default();
	builder.json(json);
	let context = builder.build()?;

	let value = jsone_expr::execute(&cli.expression, &context)?;
	println!("{}", serde_json::to_string_pretty(&value)?);

	Ok(())
}

fn main() {
	if let Err(err) = run(Cli::parse()) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}
