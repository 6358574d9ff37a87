//! Calculator shell - replkit demo binary
//!
//! An interactive calculator showing the full surface: namespaced
//! arithmetic commands, an optional-flag command, context-aware mood
//! commands, a command with a local error handler, and aliases.

use anyhow::Context;
use clap::{value_parser, Arg, Parser};
use replkit::{ArgMatches, Command, ReplConfig, Runner};

/// Calculator shell built with replkit
#[derive(Parser, Debug)]
#[command(name = "replkit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use vi editing mode at the prompt
    #[arg(long)]
    vi: bool,

    /// Surface handler errors instead of catching them
    #[arg(long, short = 'd')]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Shared state for the context-aware commands
#[derive(Debug, Default)]
struct ShellState {
    mood: String,
}

fn pair_parser(name: &'static str) -> clap::Command {
    clap::Command::new(name)
        .arg(Arg::new("x").required(true).value_parser(value_parser!(f64)))
        .arg(Arg::new("y").required(true).value_parser(value_parser!(f64)))
}

fn get_pair(args: &ArgMatches) -> anyhow::Result<(f64, f64)> {
    let x = args.get_one::<f64>("x").copied().context("x is required")?;
    let y = args.get_one::<f64>("y").copied().context("y is required")?;
    Ok((x, y))
}

fn arithmetic_commands() -> anyhow::Result<Vec<Command<ShellState>>> {
    let add = Command::new("add", pair_parser("add"), |args| {
        let (x, y) = get_pair(args)?;
        println!("{}", x + y);
        Ok(())
    })?
    .help("Add 2 numbers");

    let sub = Command::new("sub", pair_parser("sub"), |args| {
        let (x, y) = get_pair(args)?;
        println!("{}", x - y);
        Ok(())
    })?
    .help("Subtract second number from first");

    let mult = Command::new("mult", pair_parser("mult"), |args| {
        let (x, y) = get_pair(args)?;
        println!("{}", x * y);
        Ok(())
    })?
    .help("Multiply 2 numbers");

    let div = Command::new("div", pair_parser("div"), |args| {
        let (x, y) = get_pair(args)?;
        anyhow::ensure!(y != 0.0, "cannot divide {} by zero", x);
        println!("{}", x / y);
        Ok(())
    })?
    .help("Divide first number by second");

    let pow = Command::new("pow", pair_parser("pow"), |args| {
        let (x, y) = get_pair(args)?;
        println!("{}", x.powf(y));
        Ok(())
    })?
    .help("x to the power of y");

    Ok(vec![add, sub, mult, div, pow])
}

fn cow_command() -> anyhow::Result<Command<ShellState>> {
    let parser = clap::Command::new("cow").arg(
        Arg::new("word")
            .short('w')
            .long("word")
            .help("cow will say this"),
    );

    Ok(Command::new("cow", parser, |args| {
        match args.get_one::<String>("word") {
            Some(word) => println!("cowsay: {}", word),
            None => println!("cowsay: moo"),
        }
        Ok(())
    })?
    .help("say stuff, demo optional arguments"))
}

fn factorial_command() -> anyhow::Result<Command<ShellState>> {
    let parser = clap::Command::new("factorial").arg(
        Arg::new("x")
            .required(true)
            .value_parser(value_parser!(u32)),
    );

    Ok(Command::new("factorial", parser, |args| {
        let x = args.get_one::<u32>("x").copied().context("x is required")?;
        anyhow::ensure!(x <= 100, "{} is too large, try a number up to 100", x);
        let result = (1..=x).map(f64::from).product::<f64>();
        println!("{}", result);
        Ok(())
    })?
    .help("x!, refuses anything above 100")
    .on_error(|err| println!("factorial says no: {}", err)))
}

fn mood_commands() -> anyhow::Result<Vec<Command<ShellState>>> {
    let mood = Command::with_context("mood", clap::Command::new("mood"), |_, state: &mut ShellState| {
        if state.mood.is_empty() {
            println!("no particular mood yet");
        } else {
            println!("feeling {}", state.mood);
        }
        Ok(())
    })?
    .help("Report the shell's current mood");

    let cheer = Command::with_context("cheer", clap::Command::new("cheer"), |_, state: &mut ShellState| {
        state.mood = "cheerful".to_string();
        println!("mood set to cheerful");
        Ok(())
    })?
    .help("Put the shell in a cheerful mood");

    let gloom = Command::with_context("gloom", clap::Command::new("gloom"), |_, state: &mut ShellState| {
        state.mood = "gloomy".to_string();
        println!("mood set to gloomy");
        Ok(())
    })?
    .help("Put the shell in a gloomy mood");

    Ok(vec![mood, cheer, gloom])
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    // Build configuration with CLI overrides
    let mut config = ReplConfig::load();
    if args.vi {
        config.editor.vi_mode = true;
    }
    if args.debug {
        config.behavior.catch_errors = false;
    }
    if args.no_color {
        config.output.color = false;
    }

    let mut shell = Runner::with_config("calculator", ShellState::default(), config);
    shell.add_commands(arithmetic_commands()?, Some("Arithmetic"))?;
    shell.add_commands(vec![cow_command()?, factorial_command()?], None)?;
    shell.add_commands(mood_commands()?, Some("Mood"))?;
    shell.add_aliases(&[("a", "add"), ("p2", "pow 2")])?;

    shell.run()?;
    Ok(())
}
