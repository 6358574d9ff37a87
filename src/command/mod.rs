//! Command - a named unit pairing an argument parser with a handler
//!
//! Commands are the leaf of the shell: the runner resolves a line to a
//! command, and the command parses its tokens and invokes its handler,
//! optionally against the shared context. A command with a local error
//! handler absorbs its own failures; otherwise they surface to the runner.

pub mod parser;

use colored::Colorize;

use crate::core::{ReplError, Result};

pub use parser::{ArgSpec, ParseOutcome};
pub use clap::ArgMatches;

/// How a command's handler receives its input. The variant fixes the
/// call signature at construction time: plain handlers see only their
/// parsed arguments, contextual handlers also borrow the shared context.
enum Handler<C> {
    Plain(Box<dyn FnMut(&ArgMatches) -> anyhow::Result<()>>),
    Contextual(Box<dyn FnMut(&ArgMatches, &mut C) -> anyhow::Result<()>>),
}

/// Result of executing a command against one token sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The handler ran (or its error was absorbed locally)
    Ran,
    /// Help was displayed; the handler was deliberately skipped
    HelpShown,
    /// The tokens did not parse; the diagnostic was already printed
    ParseFailed,
}

/// A named, self-contained shell command
pub struct Command<C> {
    name: String,
    parser: Box<dyn ArgSpec>,
    handler: Handler<C>,
    error_handler: Option<Box<dyn FnMut(anyhow::Error)>>,
    help: String,
}

impl<C> std::fmt::Debug for Command<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

impl<C> Command<C> {
    /// Create a command whose handler takes only its parsed arguments
    pub fn new<P, F>(name: impl Into<String>, parser: P, handler: F) -> Result<Self>
    where
        P: ArgSpec + 'static,
        F: FnMut(&ArgMatches) -> anyhow::Result<()> + 'static,
    {
        Self::build(name.into(), Box::new(parser), Handler::Plain(Box::new(handler)))
    }

    /// Create a command whose handler also borrows the shared context
    pub fn with_context<P, F>(name: impl Into<String>, parser: P, handler: F) -> Result<Self>
    where
        P: ArgSpec + 'static,
        F: FnMut(&ArgMatches, &mut C) -> anyhow::Result<()> + 'static,
    {
        Self::build(
            name.into(),
            Box::new(parser),
            Handler::Contextual(Box::new(handler)),
        )
    }

    fn build(name: String, parser: Box<dyn ArgSpec>, handler: Handler<C>) -> Result<Self> {
        if name.is_empty() {
            return Err(ReplError::validation("command name must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ReplError::validation(format!(
                "command name must not contain whitespace: {:?}",
                name
            )));
        }

        Ok(Self {
            name,
            parser,
            handler,
            error_handler: None,
            help: String::new(),
        })
    }

    /// Set the one-line help text shown in the global command listing
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    /// Install a local error handler; errors raised by the command's own
    /// handler are passed to it instead of reaching the runner
    pub fn on_error<H>(mut self, handler: H) -> Self
    where
        H: FnMut(anyhow::Error) + 'static,
    {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// The command's name, the registry key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command's help text (may be empty)
    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Whether the handler borrows the shared context
    pub fn uses_context(&self) -> bool {
        matches!(self.handler, Handler::Contextual(_))
    }

    /// Execute the command against a token sequence (the command name
    /// itself already stripped) and the shared context.
    ///
    /// Parse failures and help requests are display-only no-ops: the
    /// diagnostic or usage text is printed here and the handler never
    /// runs. A handler error is absorbed by the local error handler when
    /// one is installed, and propagated to the caller otherwise.
    pub fn execute(&mut self, tokens: &[String], context: &mut C) -> Result<ExecOutcome> {
        let args = match self.parser.parse_tokens(tokens) {
            ParseOutcome::Failed(message) => {
                eprintln!("{}", message.red());
                return Ok(ExecOutcome::ParseFailed);
            }
            ParseOutcome::HelpRequested => {
                println!("{}", self.parser.render_help().green());
                return Ok(ExecOutcome::HelpShown);
            }
            ParseOutcome::Parsed(args) => args,
        };

        // A permissive parser may accept -h as an ordinary token; a help
        // request still must not run the handler.
        if matches!(tokens.first().map(String::as_str), Some("-h" | "--help")) {
            println!("{}", self.parser.render_help().green());
            return Ok(ExecOutcome::HelpShown);
        }

        let result = match &mut self.handler {
            Handler::Plain(run) => run(&args),
            Handler::Contextual(run) => run(&args, context),
        };

        match result {
            Ok(()) => Ok(ExecOutcome::Ran),
            Err(err) => match &mut self.error_handler {
                Some(absorb) => {
                    absorb(err);
                    Ok(ExecOutcome::Ran)
                }
                None => Err(ReplError::Handler(err)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Parser stub that accepts any tokens, including `-h`, verbatim.
    struct AcceptAll;

    impl ArgSpec for AcceptAll {
        fn parse_tokens(&self, _tokens: &[String]) -> ParseOutcome {
            let matches = clap::Command::new("stub")
                .try_get_matches_from(["stub"])
                .unwrap();
            ParseOutcome::Parsed(matches)
        }

        fn render_help(&self) -> String {
            "stub usage".to_string()
        }
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_names_construct() {
        for name in ["add", "mood-set", "exit()", "x"] {
            assert!(Command::<()>::new(name, AcceptAll, |_| Ok(())).is_ok());
        }
    }

    #[test]
    fn test_bad_names_fail_validation() {
        for name in ["", "two words", "tab\tseparated", " lead"] {
            let err = Command::<()>::new(name, AcceptAll, |_| Ok(())).unwrap_err();
            assert_eq!(err.kind(), "ValidationError");
        }
    }

    #[test]
    fn test_help_token_skips_handler() {
        let ran = Rc::new(RefCell::new(false));
        let ran_inner = ran.clone();
        let mut cmd = Command::<()>::new("probe", AcceptAll, move |_| {
            *ran_inner.borrow_mut() = true;
            Ok(())
        })
        .unwrap();

        let outcome = cmd.execute(&tokens(&["-h"]), &mut ()).unwrap();
        assert_eq!(outcome, ExecOutcome::HelpShown);
        assert!(!*ran.borrow());

        let outcome = cmd.execute(&tokens(&["--help"]), &mut ()).unwrap();
        assert_eq!(outcome, ExecOutcome::HelpShown);
        assert!(!*ran.borrow());
    }

    #[test]
    fn test_parse_failure_skips_handler() {
        let ran = Rc::new(RefCell::new(false));
        let ran_inner = ran.clone();
        let parser = clap::Command::new("one").arg(clap::Arg::new("only").required(true));
        let mut cmd = Command::<()>::new("one", parser, move |_| {
            *ran_inner.borrow_mut() = true;
            Ok(())
        })
        .unwrap();

        let outcome = cmd.execute(&tokens(&["a", "b", "c"]), &mut ()).unwrap();
        assert_eq!(outcome, ExecOutcome::ParseFailed);
        assert!(!*ran.borrow());
    }

    #[test]
    fn test_local_error_handler_absorbs() {
        let seen = Rc::new(RefCell::new(String::new()));
        let seen_inner = seen.clone();
        let mut cmd = Command::<()>::new("boom", AcceptAll, |_| {
            anyhow::bail!("kaput")
        })
        .unwrap()
        .on_error(move |err| {
            *seen_inner.borrow_mut() = err.to_string();
        });

        let outcome = cmd.execute(&tokens(&[]), &mut ()).unwrap();
        assert_eq!(outcome, ExecOutcome::Ran);
        assert_eq!(*seen.borrow(), "kaput");
    }

    #[test]
    fn test_unhandled_error_propagates() {
        let mut cmd = Command::<()>::new("boom", AcceptAll, |_| {
            anyhow::bail!("kaput")
        })
        .unwrap();

        let err = cmd.execute(&tokens(&[]), &mut ()).unwrap_err();
        assert_eq!(err.kind(), "HandlerError");
        assert_eq!(err.to_string(), "kaput");
    }

    #[test]
    fn test_context_flag_reflects_handler_shape() {
        let plain = Command::<u32>::new("p", AcceptAll, |_| Ok(())).unwrap();
        let ctx = Command::<u32>::with_context("c", AcceptAll, |_, n| {
            *n += 1;
            Ok(())
        })
        .unwrap();
        assert!(!plain.uses_context());
        assert!(ctx.uses_context());
    }

    #[test]
    fn test_contextual_handler_mutates_context() {
        let mut cmd = Command::<u32>::with_context("bump", AcceptAll, |_, n| {
            *n += 1;
            Ok(())
        })
        .unwrap();

        let mut count = 0u32;
        cmd.execute(&tokens(&[]), &mut count).unwrap();
        cmd.execute(&tokens(&[]), &mut count).unwrap();
        assert_eq!(count, 2);
    }
}
