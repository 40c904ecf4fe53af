// src/cli/progress.rs — Terminal progress renderer for session feedback

use crate::core::types::ProgressEvent;

/// Build a progress callback that writes formatted output to stderr.
///
/// Progress goes to stderr so stdout stays clean for the final note.
/// Returns a closure suitable for `Controller::with_progress()`.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + 'static {
    move |event| eprintln!("{}", render(&event))
}

/// Render one progress event as a single log-style line.
fn render(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::SessionStart {
            query_preview,
            max_iterations,
        } => format!("[session] \"{}\" (cap {})", query_preview, max_iterations),
        ProgressEvent::StepStart {
            iteration,
            max_iterations,
        } => format!("[step {}/{}] researching...", iteration, max_iterations),
        ProgressEvent::StepEnd {
            iteration,
            notes_added,
            needs_more,
        } => format!(
            "[step {}] +{} note(s), needs_more={}",
            iteration, notes_added, needs_more,
        ),
        ProgressEvent::CapReached { max_iterations } => {
            format!("[cap] iteration cap {} reached", max_iterations)
        }
        ProgressEvent::FallbackUsed => "[finalize] writer failed, using fallback note".into(),
        ProgressEvent::Complete {
            iterations,
            notes_total,
            fallback_used,
        } => {
            let suffix = if *fallback_used { ", fallback" } else { "" };
            format!(
                "[done] {} step(s), {} note(s){}",
                iterations, notes_total, suffix,
            )
        }
    }
}
