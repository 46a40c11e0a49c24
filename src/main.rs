//! uinput - replay event scripts against a form of universal inputs
//!
//! Loads a form definition, feeds it a script of user and host actions on a virtual clock,
//! and prints every notification the controls emit.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use universal_input::config::form::FormConfig;
use universal_input::{parse_script, ChangeHub, Form, Hooks};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG=debug shows state transitions
    env_logger::init();

    let matches = Command::new("uinput")
        .version(universal_input::VERSION)
        .about("Replay event scripts against a form of universal inputs")
        .long_about(
            "uinput mounts every field of a form definition, replays a script of edits, \
             selections, blurs and host pushes on a virtual clock, and prints the change \
             and end-editing notifications the controls emit.",
        )
        .arg(
            Arg::new("form")
                .long("form")
                .short('f')
                .value_name("FILE")
                .help("Form definition (TOML); defaults to the user config or the demo form"),
        )
        .arg(
            Arg::new("script")
                .help("Event script to replay; read from stdin when omitted")
                .index(1),
        )
        .get_matches();

    let form_config = match matches.get_one::<String>("form") {
        Some(path) => FormConfig::load(&PathBuf::from(path))?,
        None => match FormConfig::default_path().filter(|path| path.is_file()) {
            Some(path) => FormConfig::load(&path)?,
            None => {
                log::info!("no form definition found, using the demo form");
                FormConfig::demo()
            }
        },
    };

    let source = match matches.get_one::<String>("script") {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.is_file() {
                anyhow::bail!("Script does not exist: {}", path.display());
            }
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read script {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let steps = parse_script(&source)?;
    let hub = Arc::new(ChangeHub::new());
    let mut form = Form::from_config(&form_config, Hooks::default(), Arc::clone(&hub))?;

    for step in &steps {
        for event in form.apply(step)? {
            println!("{event}");
        }
    }
    for event in form.settle() {
        println!("{event}");
    }

    println!();
    for (key, value) in form.values() {
        println!("{key} = {}", universal_input::form::describe(value));
    }

    hub.shutdown();
    Ok(())
}
