use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use yamlscribe::commentable::{CommentableFile, CommentableYamlFile};
use yamlscribe::config::Config;
use yamlscribe::document::parser::parse_value;
use yamlscribe::file::loader::load_yaml_source;
use yamlscribe::file::saver::save_yaml_file;
use yamlscribe::logging::init_logging;
use yamlscribe::yamlpath::{self, PathSegment};

/// yamlscribe - Dot-path addressing and comments for generated YAML files
#[derive(Parser)]
#[command(name = "yamlscribe")]
#[command(version)]
#[command(
    about = "Address values in YAML files by dot-path and render them with comments",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Config file to use instead of ~/.config/yamlscribe/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at PATH
    Get {
        /// YAML file to read (`-` for stdin)
        file: String,
        path: String,
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Print the container holding the value at PATH
    Container {
        /// YAML file to read (`-` for stdin)
        file: String,
        path: String,
        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Print the last segment of PATH
    Key { path: String },
    /// Print the comment column for PATH
    Indent {
        path: String,
        /// Columns per mapping level (default from config)
        #[arg(long)]
        indent: Option<usize>,
        /// Columns per sequence level (default from config)
        #[arg(long)]
        list_indent: Option<usize>,
    },
    /// Write VALUE (a YAML snippet) at PATH
    Set {
        /// YAML file to read (`-` for stdin)
        file: String,
        path: String,
        value: String,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render FILE as a generated file with comments attached by path
    Comment {
        /// YAML file to read (`-` for stdin)
        file: String,
        /// Comment written at the top of the body
        #[arg(long)]
        header: Option<String>,
        /// Comment placed on the line before a key, as PATH=TEXT
        #[arg(long, value_name = "PATH=TEXT")]
        before: Vec<String>,
        /// Comment placed at the end of a key's line, as PATH=TEXT
        #[arg(long, value_name = "PATH=TEXT")]
        eol: Vec<String>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    run(cli.command, &config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Get { file, path, json } => {
            let tree = load_yaml_source(&file)?;
            let resolved = yamlpath::resolve(&path, tree.root()).with_context(|| path_error(&path))?;
            print_value(&resolved.to_serde_value(), json)
        }
        Command::Container { file, path, json } => {
            let tree = load_yaml_source(&file)?;
            let container = yamlpath::resolve_container(&path, tree.root())
                .with_context(|| path_error(&path))?;
            print_value(&container.to_serde_value(), json)
        }
        Command::Key { path } => {
            let key = yamlpath::final_key(&path).with_context(|| path_error(&path))?;
            match key {
                PathSegment::Index(index) => println!("{}", index),
                other => println!("{}", other),
            }
            Ok(())
        }
        Command::Indent {
            path,
            indent,
            list_indent,
        } => {
            let column = yamlpath::indentation_for(
                &path,
                indent.unwrap_or(config.indent_size),
                list_indent.unwrap_or(config.list_item_indent),
            );
            println!("{}", column);
            Ok(())
        }
        Command::Set {
            file,
            path,
            value,
            output,
        } => {
            let mut tree = load_yaml_source(&file)?;
            let node = parse_value(&value).context("VALUE is not valid YAML")?;
            yamlpath::assign(&path, tree.root_mut(), node).with_context(|| path_error(&path))?;

            let rendered = CommentableYamlFile::new(tree, config.comment_style()).synthesize_contents();
            emit(&rendered, output.as_deref(), config)
        }
        Command::Comment {
            file,
            header,
            before,
            eol,
            output,
        } => {
            let tree = load_yaml_source(&file)?;
            let mut rendered = CommentableYamlFile::new(tree, config.comment_style());

            if let Some(text) = header.as_ref().or(config.header_comment.as_ref()) {
                rendered.set_header_comment(text);
            }
            for arg in &before {
                let (path, text) = split_comment_arg(arg)?;
                rendered
                    .set_comment_before_key_at_path(path, text)
                    .with_context(|| path_error(path))?;
            }
            for arg in &eol {
                let (path, text) = split_comment_arg(arg)?;
                rendered
                    .set_eol_comment_at_path(path, text)
                    .with_context(|| path_error(path))?;
            }

            emit(&rendered.render(), output.as_deref(), config)
        }
    }
}

fn path_error(path: &str) -> String {
    format!("Configuration error at path '{}'", path)
}

/// Splits `PATH=TEXT` at the first `=`.
fn split_comment_arg(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected PATH=TEXT, got '{}'", arg))
}

fn print_value(value: &serde_yaml::Value, json: bool) -> Result<()> {
    let text = if json {
        let mut text = serde_json::to_string_pretty(value).context("Value cannot be shown as JSON")?;
        text.push('\n');
        text
    } else {
        serde_yaml::to_string(value)?
    };

    io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}

fn emit(contents: &str, output: Option<&Path>, config: &Config) -> Result<()> {
    match output {
        Some(path) => save_yaml_file(path, contents, config),
        None => {
            io::stdout().lock().write_all(contents.as_bytes())?;
            Ok(())
        }
    }
}
