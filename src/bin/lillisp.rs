use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lillisp::{Config, Evaluator, Repl, Scanner};

#[derive(Parser)]
#[command(author, version, about = "Lillisp S-expression reader and evaluator")]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive session on stdin/stdout
    Repl,
    /// Evaluate every item of a snippet and print each result
    Eval { source: String },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let mut repl = Repl::with_config(io::stdin().lock(), io::stdout().lock(), &config);
            repl.run()?;
        }
        Command::Eval { source } => eval(&source, &config)?,
    }
    Ok(())
}

fn eval(source: &str, config: &Config) -> anyhow::Result<()> {
    let tokens = Scanner::new(source).scan_tokens();
    let mut parser = lillisp::Parser::with_config(tokens.into_iter(), config.parser.clone());
    let evaluator = Evaluator::new();

    while let Some(expr) = parser.read_top_level_item()? {
        let value = evaluator
            .evaluate(&expr)
            .with_context(|| format!("evaluating {}", expr))?;
        println!("{}", value);
    }
    Ok(())
}
