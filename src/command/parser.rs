//! The argument-parsing capability commands are built on
//!
//! A command does not care how its tokens are parsed, only that the parser
//! can turn them into a typed argument object or report why it could not.
//! Help requests and parse failures are ordinary values here, never process
//! exits: a malformed argument must bounce the user back to the prompt, not
//! tear the shell down.

use clap::error::ErrorKind;
use clap::ArgMatches;

/// Result of parsing one token sequence
#[derive(Debug)]
pub enum ParseOutcome {
    /// Tokens parsed into a typed argument object; run the handler
    Parsed(ArgMatches),
    /// The user asked for usage; display help and skip the handler
    HelpRequested,
    /// Tokens did not parse; the message carries the rendered diagnostic
    Failed(String),
}

/// Parsing capability required from every command's argument parser
pub trait ArgSpec {
    /// Parse a token sequence (command name already stripped)
    fn parse_tokens(&self, tokens: &[String]) -> ParseOutcome;

    /// Render the full usage/help text
    fn render_help(&self) -> String;
}

/// `clap::Command` is the standard parser. `try_get_matches_from` returns
/// errors as values, so clap's exit-on-error and exit-on-help behaviors
/// never reach the process.
impl ArgSpec for clap::Command {
    fn parse_tokens(&self, tokens: &[String]) -> ParseOutcome {
        let argv =
            std::iter::once(self.get_name().to_string()).chain(tokens.iter().cloned());

        match self.clone().try_get_matches_from(argv) {
            Ok(matches) => ParseOutcome::Parsed(matches),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    ParseOutcome::HelpRequested
                }
                _ => ParseOutcome::Failed(err.to_string()),
            },
        }
    }

    fn render_help(&self) -> String {
        self.clone().render_long_help().to_string()
    }
}
