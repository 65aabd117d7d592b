use anyhow::{Context, Result};
use nestprops_config::Config;
use nestprops_engine::{Document, RenderOptions, io};
use std::{env, path::PathBuf, process};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Get { key: String, default: Option<String> },
    Set { key: String, value: String },
    Remove { key: String },
    Render { pretty: Option<bool> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    path: PathBuf,
    command: Command,
}

fn parse_args(args: &[String]) -> Option<Invocation> {
    let (path, rest) = args.split_first()?;
    let command = match rest {
        [] => Command::List,
        [cmd, key] if cmd == "get" => Command::Get {
            key: key.clone(),
            default: None,
        },
        [cmd, key, default] if cmd == "get" => Command::Get {
            key: key.clone(),
            default: Some(default.clone()),
        },
        [cmd, key, value] if cmd == "set" => Command::Set {
            key: key.clone(),
            value: value.clone(),
        },
        [cmd, key] if cmd == "remove" => Command::Remove { key: key.clone() },
        [cmd] if cmd == "render" => Command::Render { pretty: None },
        [cmd, flag] if cmd == "render" && flag == "--pretty" => {
            Command::Render { pretty: Some(true) }
        }
        [cmd, flag] if cmd == "render" && flag == "--original" => Command::Render {
            pretty: Some(false),
        },
        _ => return None,
    };

    Some(Invocation {
        path: PathBuf::from(path),
        command,
    })
}

fn load_render_options() -> RenderOptions {
    match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded render defaults from {}", Config::config_path().display());
            config.render_options()
        }
        Ok(None) => RenderOptions::default(),
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            RenderOptions::default()
        }
    }
}

fn run(invocation: Invocation) -> Result<()> {
    let path = &invocation.path;
    let mut document = io::read_document(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    match invocation.command {
        Command::List => {
            for line in list_lines(&document) {
                println!("{line}");
            }
        }
        Command::Get { key, default } => match default {
            Some(default) => println!("{}", document.get_or(&key, &default)),
            None if document.has_key(&key) => println!("{}", document.get(&key)),
            None => anyhow::bail!("Key not found: {key}"),
        },
        Command::Set { key, value } => {
            let previous = document.put(&key, &value);
            log::info!("Set {key} (was {previous:?})");
            save(path, &document)?;
        }
        Command::Remove { key } => {
            if !document.has_key(&key) {
                log::warn!("Key not found: {key}");
            }
            document.remove(&key);
            save(path, &document)?;
        }
        Command::Render { pretty } => {
            let mut options = load_render_options();
            if let Some(pretty) = pretty {
                options.pretty_print = pretty;
            }
            print!("{}", document.render(&options));
        }
    }

    Ok(())
}

/// Writes edits back in original format so untouched lines stay as they were.
fn save(path: &std::path::Path, document: &Document) -> Result<()> {
    io::write_document(path, document, &RenderOptions::original())
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn list_lines(document: &Document) -> Vec<String> {
    let mut keys = document.keys();
    keys.sort();
    keys.into_iter()
        .map(|key| {
            let value = document.get(&key);
            format!("{key} = {value}")
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("nestprops");

    let Some(invocation) = parse_args(args.get(1..).unwrap_or_default()) else {
        eprintln!("Usage: {program} <file> [get <key> [default] | set <key> <value> | remove <key> | render [--pretty|--original]]");
        eprintln!("Render defaults are read from {}", Config::config_path().display());
        process::exit(1);
    };

    run(invocation)
}
