//! Command-line interface for stringweave
//! Strips whitespace from text, weaves characters between what is left and optionally reverses it.
//!
//! Usage:
//!   stringweave `[TEXT]` [--preset `<name>`] [--fixed `<char>` | --random `<alphabet>`] [--reverse]
//!   stringweave --interactive [options]     - Weave each line read from stdin
//!   stringweave --list-presets              - List all available presets
//!
//! When TEXT is omitted, all of stdin is read and woven as one input.

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use stringweave::{
    Configuration, Invocation, PipelineState, PresetRegistry, WeaveError, Weaver, WhitespacePolicy,
};
use stringweave_config::{Loader, WeaveConfig};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

/// Project-local config file picked up when `--config` is not given
const LOCAL_CONFIG: &str = "stringweave.toml";

fn cli() -> Command {
    Command::new("stringweave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Strip whitespace, weave characters in between, reverse")
        .arg(
            Arg::new("text")
                .help("Text to weave (reads stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .short('p')
                .help("Named preset to start from (see --list-presets)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("keep-newlines")
                .long("keep-newlines")
                .help("Do not remove line feeds and carriage returns")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-spaces")
                .long("keep-spaces")
                .help("Do not remove spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strip-all")
                .long("strip-all")
                .help("Remove every whitespace character (tabs included)")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["keep-newlines", "keep-spaces"]),
        )
        .arg(
            Arg::new("fixed")
                .long("fixed")
                .short('f')
                .value_name("CHAR")
                .help("Insert CHAR between characters (only the first character is used)"),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .short('r')
                .value_name("ALPHABET")
                .help("Insert a random character from ALPHABET between characters")
                .value_parser(PossibleValuesParser::new(["alphanumeric", "symbols"]))
                .conflicts_with("fixed"),
        )
        .arg(
            Arg::new("reverse")
                .long("reverse")
                .help("Reverse the final string")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("remote-command")
                .long("remote-command")
                .value_name("CMD")
                .help("Delegate whitespace removal to CMD (JSON over stdin/stdout)")
                .conflicts_with_all(["strip-all", "keep-newlines", "keep-spaces"]),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Timeout for the remote command in milliseconds")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(PossibleValuesParser::new(["text", "json"]))
                .default_value("text"),
        )
        .arg(
            Arg::new("interactive")
                .long("interactive")
                .short('i')
                .help("Weave each line of stdin as a separate input")
                .action(ArgAction::SetTrue)
                .conflicts_with("text"),
        )
        .arg(
            Arg::new("list-presets")
                .long("list-presets")
                .help("List available presets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-presets") {
        handle_list_presets_command();
        return;
    }

    if let Err(e) = run(&matches).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

async fn run(matches: &ArgMatches) -> Result<()> {
    let settings = load_settings(matches)?;
    let registry = PresetRegistry::with_defaults();
    let config = settings
        .resolve(&registry)
        .context("invalid weave configuration")?;
    debug!("resolved configuration: {:?}", config);
    warn_ignored_settings(matches, &config);

    let mut weaver = Weaver::new();
    if let Some(normalizer) = settings.remote.normalizer() {
        info!(
            "remote normalizer: {} (timeout {:?})",
            normalizer.command(),
            normalizer.timeout()
        );
        weaver = weaver.with_normalizer(Arc::new(normalizer));
    } else if config.is_remote() {
        warn!("remote policy selected but no remote command is configured");
    }

    let json = matches.get_one::<String>("format").map(String::as_str) == Some("json");

    if matches.get_flag("interactive") {
        return handle_interactive_command(&weaver, &config, json).await;
    }

    let input = match matches.get_one::<String>("text") {
        Some(text) => text.clone(),
        None => read_stdin().await?,
    };
    let output = weaver.transform_async(&input, &config).await?;
    print_output(&input, &output, &config, json)?;
    Ok(())
}

/// Warn about settings the resolved configuration cannot honor.
fn warn_ignored_settings(matches: &ArgMatches, config: &Configuration) {
    let keeps = matches.get_flag("keep-newlines") || matches.get_flag("keep-spaces");
    if keeps && config.policy == WhitespacePolicy::Blanket {
        warn!("--keep-newlines/--keep-spaces have no effect under the blanket policy");
    }
    if config.effective_interleave() != config.interleave {
        warn!("the fixed separator is whitespace this configuration strips; not interleaving");
    }
}

/// Build the layered settings: defaults, config file, then CLI flags.
fn load_settings(matches: &ArgMatches) -> Result<WeaveConfig> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };

    if let Some(preset) = matches.get_one::<String>("preset") {
        loader = loader.set_override("preset", preset.as_str())?;
    }
    if matches.get_flag("keep-newlines") {
        loader = loader.set_override("weave.remove_newlines", false)?;
    }
    if matches.get_flag("keep-spaces") {
        loader = loader.set_override("weave.remove_spaces", false)?;
    }
    if matches.get_flag("strip-all") {
        loader = loader.set_override("weave.policy", "blanket")?;
    }
    if let Some(sep) = matches.get_one::<String>("fixed") {
        loader = loader
            .set_override("weave.interleave", "fixed")?
            .set_override("weave.fixed_char", sep.as_str())?;
    }
    if let Some(alphabet) = matches.get_one::<String>("random") {
        loader = loader
            .set_override("weave.interleave", "random")?
            .set_override("weave.alphabet", alphabet.as_str())?;
    }
    if matches.get_flag("reverse") {
        loader = loader.set_override("weave.reverse", true)?;
    }
    if let Some(command) = matches.get_one::<String>("remote-command") {
        loader = loader
            .set_override("weave.policy", "remote")?
            .set_override("remote.command", command.as_str())?;
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout-ms") {
        let timeout = i64::try_from(*timeout).context("timeout is too large")?;
        loader = loader.set_override("remote.timeout_ms", timeout)?;
    }

    loader.build().context("failed to load configuration")
}

async fn read_stdin() -> Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("failed to read stdin")?;
    Ok(input)
}

#[derive(Serialize)]
struct Report<'a> {
    input: &'a str,
    output: &'a str,
    config: &'a Configuration,
}

fn print_output(input: &str, output: &str, config: &Configuration, json: bool) -> Result<()> {
    if json {
        let report = Report {
            input,
            output,
            config,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Handle the interactive command
///
/// Every line is its own invocation; a blank line or a remote failure is
/// reported and the session carries on.
async fn handle_interactive_command(
    weaver: &Weaver,
    config: &Configuration,
    json: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let invocation: Invocation = weaver.invoke(&line, config).await;
        if let Some(WeaveError::EmptyInput) = invocation.rejection() {
            eprintln!("(enter some text to weave)");
            continue;
        }
        match invocation.state() {
            PipelineState::Done(output) => print_output(&line, output, config, json)?,
            PipelineState::Failed(err) => eprintln!("Error: {}", err),
            state => debug!("invocation ended in non-terminal state {:?}", state),
        }
    }
    Ok(())
}

/// Handle the list-presets command
fn handle_list_presets_command() {
    let registry = PresetRegistry::with_defaults();
    println!("Available presets:\n");

    for preset in registry.list_all() {
        println!("  {}", preset.name);
        println!("    {}", preset.description);
        println!();
    }
}
