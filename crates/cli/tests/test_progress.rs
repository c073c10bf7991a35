use cli::progress::{step_summary, GenerationProgress, ProgressBuilder, ProgressType};
use domain::GenerationStatus;
use std::time::Duration;

#[test]
fn test_progress_type_configs() {
    let request = ProgressType::Request.config();
    assert_eq!(request.tick_interval, Duration::from_millis(80));
    assert_eq!(request.color, "cyan");

    let upload = ProgressType::Upload.config();
    assert_eq!(upload.success_message.as_deref(), Some("✓ Upload completed!"));
}

#[test]
fn test_spinners_finish_without_panicking() {
    let spinner = ProgressBuilder::request("Loading...");
    spinner.set_message("Still loading...");
    spinner.finish_success(Some("Loaded"));

    ProgressBuilder::upload("Uploading...").finish_success(None);
    ProgressBuilder::thinking("Thinking...").finish_error("model unavailable");
}

#[test]
fn test_generation_progress_tracks_status() {
    let progress = GenerationProgress::hidden();
    let mut status = GenerationStatus::initializing();
    status.progress = 42.6;
    status.current_step = "Generating file docs".to_string();

    progress.update(&status);
    assert_eq!(progress.position(), 42);

    status.progress = 140.0;
    progress.update(&status);
    assert_eq!(progress.position(), 100);
    progress.finish_success("done");
}

#[test]
fn test_step_summary() {
    let mut status = GenerationStatus::initializing();
    assert_eq!(step_summary(&status), "[· · ·]");
    status.progress = 40.0;
    assert_eq!(step_summary(&status), "[✓ ✓ ◐]");
}
