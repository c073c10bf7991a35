use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::commands::{
    generate, models, projects, session, ChatCommand, ConfigCommand, DocsCommand, EvaluateArgs,
    FeedbackCommand, GenerateArgs, SessionCommand, TreeArgs, UploadArgs,
};
use cli::{notify, AppContext, GlobalArgs};
use common::init_structured_logging;
use tracing::debug;

#[derive(Parser)]
#[command(name = "code-insight")]
#[command(about = "Terminal client for the Code Insight documentation service")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or create the configuration
    Config(ConfigCommand),
    /// Store or clear the session token
    Session(SessionCommand),
    /// Show the signed-in user
    Whoami,
    /// List documented projects
    Projects,
    /// Upload a project directory
    Upload(UploadArgs),
    /// List the models offered for generation
    Models,
    /// Show a project's file tree
    Tree(TreeArgs),
    /// Generate documentation for selected paths
    Generate(GenerateArgs),
    /// Follow a running generation job
    Status {
        /// Progress key printed by 'generate'
        progress_key: String,
    },
    /// Read and edit documentation
    Docs(DocsCommand),
    /// Evaluate a document with an AI model
    Evaluate(EvaluateArgs),
    /// Rate documents and sections
    Feedback(FeedbackCommand),
    /// Ask questions about a vectorized project
    Chat(ChatCommand),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        notify::error(&notify::describe(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (config, source) = cli.global.resolve_config().await?;
    if let Err(e) = init_structured_logging(&config.logging) {
        notify::warning(&format!("Logging disabled: {}", e.user_message()));
    }
    debug!(?source, base_url = %config.api.base_url, "Configuration resolved");

    if let Commands::Config(command) = &cli.command {
        return command.execute(&cli.global).await;
    }

    let ctx = AppContext::connect(config)?;
    match cli.command {
        Commands::Config(_) => Ok(()),
        Commands::Session(command) => command.execute(&ctx).await,
        Commands::Whoami => session::whoami(&ctx).await,
        Commands::Projects => projects::list_projects(&ctx).await,
        Commands::Upload(args) => args.execute(&ctx).await,
        Commands::Models => models::list_models(&ctx).await,
        Commands::Tree(args) => args.execute(&ctx).await,
        Commands::Generate(args) => args.execute(&ctx).await,
        Commands::Status { progress_key } => generate::watch(&ctx, &progress_key).await,
        Commands::Docs(command) => command.execute(&ctx).await,
        Commands::Evaluate(args) => args.execute(&ctx).await,
        Commands::Feedback(command) => command.execute(&ctx).await,
        Commands::Chat(command) => command.execute(&ctx).await,
    }
}
