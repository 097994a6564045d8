//! mender: self-healing command interpreter.
//!
//! Parses `mender <intent> [target] [modifiers...]`, repairs what it can
//! locally, and prints the interpretation as JSON on stdout. Logs go to
//! stderr.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use mender_cli::{CliConfig, Interpreter, LogFormat, OfflineBackend, command_line};
use mender_protocol::CommandMetadata;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env()?;
    init_tracing(config.log_format);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mender starting");

    let vocabulary = Arc::new(config.load_vocabulary()?);
    let interpreter = Interpreter::new(vocabulary, Box::new(OfflineBackend))?
        .with_context(config.inference_context.clone());

    let vocabulary = interpreter.vocabulary();
    tracing::debug!(
        program = %vocabulary.program_name,
        intents = vocabulary.intents.len(),
        targets = vocabulary.targets.len(),
        synonyms = vocabulary.synonyms.len(),
        "vocabulary loaded"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = command_line(&vocabulary.program_name, &args);

    let project_path = config.project_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .map(|dir| dir.display().to_string())
    });
    let metadata = CommandMetadata::stamped(config.user_id.clone(), project_path);

    match interpreter.interpret(&input, metadata) {
        Ok(interpretation) => {
            println!("{}", serde_json::to_string_pretty(&interpretation)?);
            std::process::exit(interpretation.exit_code());
        }
        Err(e) => {
            tracing::error!(error = %e, "could not interpret input");
            eprintln!("{}: {e}", vocabulary.program_name);
            std::process::exit(1);
        }
    }
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
