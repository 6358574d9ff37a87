//! Runner - the orchestrator of the interactive loop
//!
//! Owns the command registry, the alias table, the shared context, and
//! the read-parse-dispatch loop. Commands are registered first, aliases
//! after; `run()` then owns the terminal until an exit token, Ctrl-C, or
//! end of input. Everything is single-threaded and sequential, so
//! contextual commands get exclusive access to the context without any
//! locking.

pub(crate) mod help;
mod input;
mod tokenize;

use std::collections::HashMap;
use std::io::{self, Write};

use colored::Colorize;

use crate::command::{Command, ExecOutcome};
use crate::core::{ReplConfig, ReplError, Result};
use help::{CmdHelp, HelpGroups};
use input::{LineReader, ReadOutcome};
use tokenize::tokenize;

/// Tokens the loop claims for itself; neither commands nor aliases may
/// shadow them.
pub const RESERVED_WORDS: &[&str] = &["help", "h", "ls", "exit", "q", "exit()"];

/// Upper bound on alias-to-alias expansion before the runner assumes a
/// cycle and gives up.
pub const MAX_ALIAS_HOPS: usize = 8;

const HELP_TOKENS: &[&str] = &["help", "h", "ls"];
const EXIT_TOKENS: &[&str] = &["exit", "q", "exit()"];

/// How one input line was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank line; nothing to do
    Empty,
    /// A registered command handled the line
    Handled,
    /// The global help listing was shown
    Help,
    /// The leading token matched nothing; carries the token
    NotFound(String),
    /// An exit token was entered; the loop should terminate
    Exit,
}

/// The interactive shell: registry, aliases, shared context, and loop
pub struct Runner<C> {
    name: String,
    registry: HashMap<String, Command<C>>,
    groups: HelpGroups,
    aliases: Vec<(String, String)>,
    context: C,
    config: ReplConfig,
}

impl<C> Runner<C> {
    /// Create a runner with default configuration
    pub fn new(name: impl Into<String>, context: C) -> Self {
        Self::with_config(name, context, ReplConfig::default())
    }

    /// Create a runner with custom configuration
    pub fn with_config(name: impl Into<String>, context: C, config: ReplConfig) -> Self {
        if !config.output.color {
            colored::control::set_override(false);
        }
        Self {
            name: name.into(),
            registry: HashMap::new(),
            groups: HelpGroups::default(),
            aliases: Vec::new(),
            context,
            config,
        }
    }

    /// The runner's display name, shown in the prompt and farewell
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the shared context
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutably borrow the shared context
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Register commands, optionally under a namespace label used for
    /// grouped help display.
    ///
    /// All commands must be registered before any alias: alias collision
    /// checks run against the commands that exist at alias-registration
    /// time.
    pub fn add_commands(
        &mut self,
        commands: Vec<Command<C>>,
        namespace: Option<&str>,
    ) -> Result<()> {
        if !self.aliases.is_empty() {
            return Err(ReplError::validation(
                "commands must be added before aliases are populated",
            ));
        }

        for command in commands {
            let name = command.name().to_string();
            if RESERVED_WORDS.contains(&name.as_str()) {
                return Err(ReplError::config(format!(
                    "command name {} is reserved",
                    name
                )));
            }
            if self.registry.contains_key(&name) {
                return Err(ReplError::config(format!(
                    "command {} is already registered",
                    name
                )));
            }

            self.groups.push(
                namespace,
                CmdHelp {
                    cmd: name.clone(),
                    help: command.help_text().to_string(),
                },
            );
            self.registry.insert(name, command);
        }

        Ok(())
    }

    /// Register alias -> expansion pairs.
    ///
    /// An alias is substituted for the leading token and the resulting
    /// line is resolved again, so an expansion may carry embedded
    /// arguments ("p2" -> "pow 2").
    pub fn add_aliases(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
        for (alias, expansion) in pairs {
            if !alias.chars().all(|c| c.is_alphanumeric() || c == '_')
                || alias.is_empty()
            {
                return Err(ReplError::validation(format!(
                    "alias must be a single contiguous word: {:?}",
                    alias
                )));
            }
            if RESERVED_WORDS.contains(alias) {
                return Err(ReplError::validation(format!(
                    "alias {} conflicts with a reserved word",
                    alias
                )));
            }
            if self.registry.contains_key(*alias) {
                return Err(ReplError::validation(format!(
                    "alias {} conflicts with an existing command",
                    alias
                )));
            }
            if self.aliases.iter().any(|(existing, _)| existing == alias) {
                return Err(ReplError::validation(format!(
                    "alias {} is already registered",
                    alias
                )));
            }

            self.aliases.push((alias.to_string(), expansion.to_string()));
            self.groups.push_alias(CmdHelp {
                cmd: alias.to_string(),
                help: expansion.to_string(),
            });
        }

        Ok(())
    }

    /// Run the interactive loop until an exit token, interrupt, or end
    /// of input. Register commands and aliases before invoking this.
    pub fn run(&mut self) -> Result<()> {
        let mut reader = LineReader::new(&self.config)?;

        loop {
            let line = match reader.read_line(&self.name)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted | ReadOutcome::Eof => {
                    self.print_farewell();
                    return Ok(());
                }
            };

            match self.run_command(&line) {
                Ok(Dispatch::Exit) => {
                    self.print_farewell();
                    return Ok(());
                }
                Ok(_) => {}
                Err(err) => {
                    if self.config.behavior.catch_errors {
                        tracing::warn!(kind = err.kind(), error = %err, "command failed");
                        eprintln!(
                            "{}",
                            format!("Caught {}: {}", err.kind(), err).red()
                        );
                    } else {
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Resolve and execute one input line.
    ///
    /// Resolution order: built-in help and exit tokens, then alias
    /// expansion (bounded), then the command registry. An unrecognized
    /// leading token is reported and is not fatal.
    pub fn run_command(&mut self, line: &str) -> Result<Dispatch> {
        let mut tokens = tokenize(line);
        let mut hops = 0usize;

        loop {
            let Some(first) = tokens.first().cloned() else {
                return Ok(Dispatch::Empty);
            };

            if HELP_TOKENS.contains(&first.as_str()) {
                print!("{}", self.render_help());
                return Ok(Dispatch::Help);
            }

            if EXIT_TOKENS.contains(&first.as_str()) {
                return Ok(Dispatch::Exit);
            }

            if let Some(expansion) = self
                .aliases
                .iter()
                .find(|(alias, _)| *alias == first)
                .map(|(_, expansion)| expansion.clone())
            {
                hops += 1;
                if hops > MAX_ALIAS_HOPS {
                    return Err(ReplError::config(format!(
                        "alias {} did not resolve within {} expansions (cycle?)",
                        first, MAX_ALIAS_HOPS
                    )));
                }
                tracing::debug!(alias = %first, %expansion, hops, "expanding alias");

                let mut expanded = expansion;
                for token in &tokens[1..] {
                    expanded.push(' ');
                    expanded.push_str(token);
                }
                tokens = tokenize(&expanded);
                continue;
            }

            if let Some(command) = self.registry.get_mut(&first) {
                tracing::debug!(command = %first, args = tokens.len() - 1, "dispatching");
                let outcome = command.execute(&tokens[1..], &mut self.context)?;
                if matches!(outcome, ExecOutcome::Ran | ExecOutcome::HelpShown) {
                    // Separator before the next prompt, for readability.
                    println!();
                }
                let _ = io::stdout().flush();
                return Ok(Dispatch::Handled);
            }

            eprintln!("{}", format!("Command {} not found", first).red());
            return Ok(Dispatch::NotFound(first));
        }
    }

    /// Render the grouped help listing for the current registrations
    pub fn render_help(&self) -> String {
        let longest = self
            .registry
            .keys()
            .map(|name| unicode_width::UnicodeWidthStr::width(name.as_str()))
            .max()
            .unwrap_or(0);
        help::render(&self.groups, longest, help::terminal_width())
    }

    fn print_farewell(&self) {
        println!("Leaving {}", self.name);
    }
}
