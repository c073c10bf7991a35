use colored::Colorize;
use domain::entities::StepState;
use domain::GenerationStatus;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Kinds of wait shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressType {
    /// Single short request
    Request,
    /// Multipart upload of a project
    Upload,
    /// Vectorization or a chat answer
    Thinking,
}

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub spinner_chars: &'static str,
    pub tick_interval: Duration,
    pub color: &'static str,
    pub success_message: Option<String>,
}

impl ProgressType {
    pub fn config(self) -> ProgressConfig {
        match self {
            ProgressType::Request => ProgressConfig {
                spinner_chars: "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
                tick_interval: Duration::from_millis(80),
                color: "cyan",
                success_message: None,
            },
            ProgressType::Upload => ProgressConfig {
                spinner_chars: "📁📂📁📂",
                tick_interval: Duration::from_millis(200),
                color: "green",
                success_message: Some("✓ Upload completed!".to_string()),
            },
            ProgressType::Thinking => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
                tick_interval: Duration::from_millis(120),
                color: "magenta",
                success_message: None,
            },
        }
    }

    pub fn create_spinner(self, message: &str) -> AdaptiveSpinner {
        let config = self.config();
        let spinner = ProgressBar::new_spinner();

        let template = match self {
            ProgressType::Upload => "{spinner} {msg}".to_string(),
            _ => format!("{{spinner:.{}}} {{msg}}", config.color),
        };
        let style = ProgressStyle::default_spinner()
            .tick_chars(config.spinner_chars)
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);

        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(config.tick_interval);

        AdaptiveSpinner { spinner, config }
    }
}

/// Spinner for a wait of unknown length
pub struct AdaptiveSpinner {
    spinner: ProgressBar,
    config: ProgressConfig,
}

impl AdaptiveSpinner {
    pub fn set_message(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    pub fn finish_success(&self, message: Option<&str>) {
        let msg = message
            .or(self.config.success_message.as_deref())
            .unwrap_or("✓ Completed!");

        let colored_msg = match self.config.color {
            "cyan" => msg.cyan().to_string(),
            "magenta" => msg.magenta().to_string(),
            _ => msg.green().to_string(),
        };
        self.spinner.finish_with_message(colored_msg);
    }

    pub fn finish_error(&self, message: &str) {
        self.spinner
            .finish_with_message(format!("✗ {message}").red().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

/// Percentage bar for a generation job plus its three display steps
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message(GenerationStatus::initializing().current_step);
        Self { bar }
    }

    /// Hidden bar, for non-interactive output
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn update(&self, status: &GenerationStatus) {
        self.bar.set_position(status.progress.clamp(0.0, 100.0) as u64);
        self.bar.set_message(format!(
            "{} {}",
            step_summary(status),
            status.current_step
        ));
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish_success(&self, message: &str) {
        self.bar.set_position(100);
        self.bar.finish_with_message(message.green().to_string());
    }

    pub fn finish_error(&self, message: &str) {
        self.bar
            .abandon_with_message(format!("✗ {message}").red().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for GenerationProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact step markers, e.g. `[✓ ◐ ·]`
pub fn step_summary(status: &GenerationStatus) -> String {
    let marks: Vec<&str> = status
        .steps()
        .iter()
        .map(|step| match step.state {
            StepState::Completed => "✓",
            StepState::InProgress => "◐",
            StepState::Pending => "·",
        })
        .collect();
    format!("[{}]", marks.join(" "))
}

pub struct ProgressBuilder;

impl ProgressBuilder {
    pub fn request(message: &str) -> AdaptiveSpinner {
        ProgressType::Request.create_spinner(message)
    }

    pub fn upload(message: &str) -> AdaptiveSpinner {
        ProgressType::Upload.create_spinner(message)
    }

    pub fn thinking(message: &str) -> AdaptiveSpinner {
        ProgressType::Thinking.create_spinner(message)
    }
}
