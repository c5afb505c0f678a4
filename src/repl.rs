//! Read-eval-print session over arbitrary byte streams
//!
//! The session never touches the process: it reads from any [`Read`], writes
//! to any [`Write`], and reports the exit word as [`Step::Quit`] instead of
//! exiting. The `lillisp` binary wires it to stdin and stdout.

use std::io::{Read, Write};

use crate::config::{Config, ReplConfig};
use crate::error::{Error, ErrorSeverity, Result};
use crate::lexer::TokenReader;
use crate::parser::{Expression, SExprParser};
use crate::runtime::{LispEvaluator, Value};

/// What one read produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The input is exhausted
    EndOfInput,
    /// The exit word was read at top level
    Quit,
    /// A top-level atom; echoed, not evaluated
    Atom(Expression),
    /// A top-level list and the result of evaluating it
    List {
        /// The list as read
        expr: Expression,
        /// Evaluation outcome
        value: Result<Value>,
    },
}

/// Interactive session state
pub struct Repl<R, W> {
    parser: SExprParser<TokenReader<R>>,
    evaluator: LispEvaluator,
    output: W,
    config: ReplConfig,
}

impl<R: Read, W: Write> Repl<R, W> {
    /// Creates a session with default configuration
    pub fn new(input: R, output: W) -> Self {
        Self::with_config(input, output, &Config::default())
    }

    /// Creates a session with explicit configuration
    pub fn with_config(input: R, output: W, config: &Config) -> Self {
        let reader = TokenReader::with_config(input, config.scanner.clone());
        Repl {
            parser: SExprParser::with_config(reader, config.parser.clone()),
            evaluator: LispEvaluator::new(),
            output,
            config: config.repl.clone(),
        }
    }

    /// Reads one top-level item and evaluates it if it is a list
    ///
    /// Parse errors are returned as `Err`; evaluation errors are carried in
    /// [`Step::List`] so the caller still sees what was read.
    pub fn step(&mut self) -> Result<Step> {
        let Some(expr) = self.parser.read_top_level_item()? else {
            return Ok(Step::EndOfInput);
        };

        if expr.as_atom() == Some(self.config.exit_word.as_str()) {
            tracing::info!(exit_word = %self.config.exit_word, "exit requested");
            return Ok(Step::Quit);
        }
        if let Expression::Atom(_) = expr {
            return Ok(Step::Atom(expr));
        }

        let value = self.evaluator.evaluate(&expr);
        Ok(Step::List { expr, value })
    }

    /// Runs until the exit word, end of input, or a fatal error
    ///
    /// Recoverable errors are written to the output and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.prompt()?;
            match self.step() {
                Ok(Step::EndOfInput) | Ok(Step::Quit) => return Ok(()),
                Ok(Step::Atom(expr)) => {
                    if self.config.echo {
                        writeln!(self.output, "atom: {}", expr)?;
                    }
                }
                Ok(Step::List { expr, value }) => {
                    if self.config.echo {
                        writeln!(self.output, "list: {}", expr)?;
                    }
                    match value {
                        Ok(value) => writeln!(self.output, "{}", value)?,
                        Err(err) => self.report(&err)?,
                    }
                }
                Err(err) if err.classify() == ErrorSeverity::Fatal => return Err(err),
                Err(err) => self.report(&err)?,
            }
        }
    }

    fn prompt(&mut self) -> Result<()> {
        if !self.config.prompt.is_empty() {
            self.output.write_all(self.config.prompt.as_bytes())?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn report(&mut self, err: &Error) -> Result<()> {
        tracing::warn!(error = %err, parse = err.is_parse_error(), "input rejected");
        writeln!(self.output, "error: {}", err)?;
        Ok(())
    }

    /// Consumes the session, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Config {
        let mut config = Config::default();
        config.repl.prompt = String::new();
        config
    }

    fn session(input: &str) -> Repl<&[u8], Vec<u8>> {
        Repl::with_config(input.as_bytes(), Vec::new(), &quiet())
    }

    fn transcript(input: &str, config: &Config) -> String {
        let mut repl = Repl::with_config(input.as_bytes(), Vec::new(), config);
        repl.run().unwrap();
        String::from_utf8(repl.into_output()).unwrap()
    }

    #[test]
    fn test_steps() {
        let mut repl = session("(+ 4 3) foo (/ 1 0) quit (+ 1 1)");
        assert_eq!(
            repl.step().unwrap(),
            Step::List {
                expr: Expression::list(vec!["+".into(), "4".into(), "3".into()]),
                value: Ok(Value::Int(7)),
            }
        );
        assert_eq!(repl.step().unwrap(), Step::Atom("foo".into()));
        match repl.step().unwrap() {
            Step::List { value, .. } => assert_eq!(value, Err(Error::DivisionByZero)),
            other => panic!("expected a list, got {:?}", other),
        }
        assert_eq!(repl.step().unwrap(), Step::Quit);
    }

    #[test]
    fn test_end_of_input() {
        let mut repl = Repl::new("  \n".as_bytes(), Vec::new());
        assert_eq!(repl.step().unwrap(), Step::EndOfInput);
        assert!(repl.into_output().is_empty());
    }

    #[test]
    fn test_parse_errors_surface() {
        let mut repl = session(") (a");
        assert_eq!(repl.step(), Err(Error::UnmatchedCloseParen));
        assert_eq!(repl.step(), Err(Error::UnmatchedOpenParen));
        assert_eq!(repl.step().unwrap(), Step::EndOfInput);
    }

    #[test]
    fn test_session_continues_after_deep_nesting() {
        let mut config = quiet();
        config.parser.max_depth = 2;
        let mut repl = Repl::with_config("(((a b))) (+ 1 2)".as_bytes(), Vec::new(), &config);
        assert_eq!(repl.step(), Err(Error::NestingTooDeep { limit: 2 }));
        match repl.step().unwrap() {
            Step::List { expr, value } => {
                assert_eq!(expr.to_string(), "(+ 1 2)");
                assert_eq!(value, Ok(Value::Int(3)));
            }
            other => panic!("expected a list, got {:?}", other),
        }
        assert_eq!(repl.step().unwrap(), Step::EndOfInput);
    }

    #[test]
    fn test_exit_word_inside_list_is_data() {
        let mut repl = session("(quit)");
        assert!(matches!(repl.step().unwrap(), Step::List { .. }));
    }

    #[test]
    fn test_run_transcript() {
        let out = transcript("(+ (+ 4 3) (+ 5 2))\nhello\n)\n(x 1 2)\nquit\n(+ 1 1)\n", &quiet());
        assert_eq!(
            out,
            "list: (+ (+ 4 3) (+ 5 2))\n14\n\
             atom: hello\n\
             error: Unmatched ')': no list is open\n\
             list: (x 1 2)\nerror: Unsupported expression: (x 1 2)\n"
        );
    }

    #[test]
    fn test_run_with_prompt_and_no_echo() {
        let mut config = Config::default();
        config.repl.echo = false;
        config.repl.prompt = "> ".to_string();
        let out = transcript("(* 6 7)", &config);
        assert_eq!(out, "> 42\n> ");
    }

    #[test]
    fn test_custom_exit_word() {
        let mut config = quiet();
        config.repl.exit_word = "bye".to_string();
        let out = transcript("quit bye (+ 1 1)", &config);
        assert_eq!(out, "atom: quit\n");
    }
}
