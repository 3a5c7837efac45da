//! Main CLI application

use crate::config::find_document_file;
use crate::error::{ConfigError, Result};
use crate::project::Project;
use crate::ui::{Logger, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// Run the CLI application
pub fn run() -> Result<()> {
    // Project-local .env values become visible to shell tasks.
    dotenvy::dotenv().ok();

    let matches = build_command().get_matches();

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        let mut command = build_command();
        clap_complete::generate(*shell, &mut command, "bantam", &mut io::stdout());
        return Ok(());
    }

    let logger = Logger::new(get_verbosity(&matches));

    let document_path = match matches.get_one::<String>("file") {
        Some(path) => PathBuf::from(path),
        None => find_document_file()?,
    };
    let project = Project::load(&document_path)?;

    if matches.get_flag("list") {
        print_targets(&project);
        return Ok(());
    }

    let mut ctx = project.context(logger)?;

    // -p NAME=VALUE replaces a document property for this run.
    if let Some(overrides) = matches.get_many::<String>("property") {
        for pair in overrides {
            let (name, value) = parse_property_override(pair)?;
            if ctx.properties.exists(name) {
                ctx.properties.remove(name)?;
            }
            ctx.properties.add(name, value)?;
        }
    }

    let targets: Vec<String> = matches
        .get_many::<String>("targets")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    project.execute(&targets, &mut ctx)
}

/// Build the clap command
fn build_command() -> Command {
    Command::new("bantam")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A declarative YAML build orchestrator")
        .arg(
            Arg::new("targets")
                .value_name("TARGET")
                .num_args(0..)
                .help("Targets to execute (the default target if none are given)"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to the bantam.yml build document"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List available targets and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("property")
                .short('p')
                .long("property")
                .value_name("NAME=VALUE")
                .help("Override a property for this run (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Generate a shell completion script and exit")
                .value_parser(clap::value_parser!(Shell)),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Split a NAME=VALUE property override
fn parse_property_override(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(ConfigError::Invalid(format!(
            "property override '{}' must have the form NAME=VALUE",
            pair
        ))
        .into()),
    }
}

/// Print the target listing for --list
fn print_targets(project: &Project) {
    let name = project.name.as_deref().unwrap_or("bantam");
    println!("{}", name.bold());
    if let Some(description) = &project.description {
        println!("{}", description);
    }
    println!();

    let listing = project.registry.descriptions();
    if listing.is_empty() {
        println!("No targets defined");
        return;
    }

    for (name, description) in listing {
        let marker = if project.default_target.as_deref() == Some(name.as_str()) {
            " (default)"
        } else {
            ""
        };
        // Pad before styling so alignment survives the ANSI codes.
        println!(
            "  {}{}{}",
            format!("{:<24}", name).bold(),
            description,
            marker.dimmed()
        );
    }
}
