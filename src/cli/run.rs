// src/cli/run.rs — Default command: run a refinement session

use std::sync::Arc;

use crate::agents::researcher::Researcher;
use crate::agents::supervisor::Supervisor;
use crate::agents::writer::Writer;
use crate::core::controller::Controller;
use crate::core::types::{ControllerConfig, SessionRecord};
use crate::infra::config::Config;
use crate::memory::notepad::NotepadFile;
use crate::memory::store::{JsonFileStore, SnapshotStore};
use crate::provider::roles::RoleModels;
use crate::provider::ModelProvider;

/// Execute one research session through the refinement controller.
pub async fn run_session(
    query: &str,
    provider: Arc<dyn ModelProvider>,
    config: &Config,
    iterations_override: Option<u32>,
    model_override: Option<&str>,
    save_to_notepad: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let roles = RoleModels::resolve(&config.models, model_override);
    tracing::debug!(
        researcher = %roles.researcher,
        writer = %roles.writer,
        "resolved role models",
    );

    let max_iterations = iterations_override.unwrap_or(config.session.max_iterations);

    // Seed the record with the persisted snapshot (read-then-overwrite
    // semantics: this load is the "read" half).
    let store = Arc::new(match config.memory.path.as_deref() {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::open_default(),
    });
    let mut record = SessionRecord::new(query, max_iterations).with_memory(store.load()?);

    let mut controller = Controller::new(ControllerConfig::from(&config.session))
        .with_store(store.clone());
    if save_to_notepad {
        controller = controller.with_sink(Arc::new(NotepadFile::new(&config.notes.path)));
    }
    if !quiet {
        controller = controller.with_progress(super::progress::terminal_progress());
    }

    let researcher = Researcher::new(provider.clone(), roles.researcher);
    let writer = Writer::new(provider, roles.writer);

    let report = controller
        .run(&mut record, &researcher, Some(&Supervisor), &writer)
        .await?;

    // Final note on stdout; everything else stays on stderr.
    println!("{}", report.final_output);

    if !quiet {
        eprintln!(
            "Memory persisted to {}{}",
            store.path().display(),
            if save_to_notepad {
                format!("; note appended to {}", config.notes.path)
            } else {
                String::new()
            },
        );
    }

    Ok(())
}

/// Resolve the query and notepad preference, prompting interactively
/// for whatever the command line left unspecified. Both prompts happen
/// once, up front, before any model call.
pub fn gather_inputs(cli: &super::Cli) -> anyhow::Result<(String, bool)> {
    let interactive = cli.query.is_empty();

    let query = if interactive {
        inquire::Text::new("Research question:").prompt()?
    } else {
        cli.query.join(" ")
    };
    let query = query.trim().to_string();
    if query.is_empty() {
        anyhow::bail!("research question is empty");
    }

    let save = if cli.save {
        true
    } else if cli.no_save || !interactive {
        false
    } else {
        inquire::Confirm::new("Append the final note to the notepad file?")
            .with_default(false)
            .prompt()?
    };

    Ok((query, save))
}
