use crate::context::AppContext;
use crate::notify;
use crate::progress::ProgressBuilder;
use crate::render;
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use domain::entities::ChatMessage;
use domain::ChatPanel;

#[derive(Debug, Args)]
pub struct ChatCommand {
    #[command(subcommand)]
    command: ChatSubcommand,
}

#[derive(Debug, Subcommand)]
enum ChatSubcommand {
    /// Whether the project can be chatted with
    Status { project: String },
    /// Index the project so questions can be answered
    Vectorize { project: String },
    /// List threads and show the selected one
    History {
        project: String,

        /// Thread to show (defaults to the most recent)
        #[arg(long)]
        chat: Option<String>,
    },
    /// Ask a question; without --chat a new thread is opened
    Send {
        project: String,
        message: String,

        #[arg(long)]
        chat: Option<String>,
    },
    /// Delete one of the project's threads
    Delete { project: String, chat_id: String },
}

impl ChatCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let client = ctx.client();
        match self.command {
            ChatSubcommand::Status { project } => {
                let vectorized = client.vectorize_status(&project).await?;
                if vectorized {
                    notify::success(&format!("{project} is ready for questions"));
                } else {
                    notify::info(&format!(
                        "{project} is not vectorized yet. Run 'code-insight chat vectorize {project}'"
                    ));
                }
            }
            ChatSubcommand::Vectorize { project } => {
                let mut panel = ChatPanel::new(&project);
                panel.begin_vectorize()?;
                let spinner = ProgressBuilder::thinking(&format!("Vectorizing {project}..."));
                let result = client.vectorize(&project).await;
                panel.finish_vectorize(result.is_ok());
                match result {
                    Ok(response) => spinner.finish_success(Some(&format!(
                        "✓ {} chunks indexed",
                        response.chunks_processed
                    ))),
                    Err(e) => {
                        spinner.finish_error(&e.user_message());
                        return Err(e.into());
                    }
                }
            }
            ChatSubcommand::History { project, chat } => {
                let mut panel = ChatPanel::new(&project);
                panel.replace_history(client.chat_history(&project).await?);
                if let Some(id) = &chat {
                    panel.select_chat(id)?;
                }
                if panel.chats().is_empty() {
                    notify::info("No conversations yet");
                    return Ok(());
                }
                for thread in panel.chats() {
                    let marker = if panel.selected_chat() == Some(thread.id.as_str()) {
                        "*".green().to_string()
                    } else {
                        " ".to_string()
                    };
                    println!(
                        "{} {} {} ({} messages)",
                        marker,
                        thread.id.bold(),
                        thread.created_at.dimmed(),
                        thread.messages.len()
                    );
                }
                println!();
                print!("{}", render::chat_messages(panel.selected_messages()));
            }
            ChatSubcommand::Send {
                project,
                message,
                chat,
            } => {
                let mut panel = ChatPanel::new(&project);
                panel.set_vectorized(client.vectorize_status(&project).await?);
                match &chat {
                    Some(id) => {
                        panel.replace_history(client.chat_history(&project).await?);
                        panel.select_chat(id)?;
                    }
                    None => panel.start_new_chat(),
                }

                let query = panel.begin_send(&message)?;
                let spinner = ProgressBuilder::thinking("Thinking...");
                let result = client.send_chat_message(&query).await;
                panel.finish_send();
                spinner.finish_and_clear();

                let reply = result?;
                print!("{}", render::chat_messages(&[ChatMessage::assistant(&reply.message)]));
                println!();
                println!("{} {}", "chat:".dimmed(), reply.chat_id);
            }
            ChatSubcommand::Delete { project, chat_id } => {
                let mut panel = ChatPanel::new(&project);
                panel.replace_history(client.chat_history(&project).await?);
                if !panel.chats().iter().any(|thread| thread.id == chat_id) {
                    bail!("Chat {chat_id} not found in {project}");
                }

                client.delete_chat(&chat_id).await?;
                panel.chat_deleted(&chat_id);
                notify::success(&format!("Chat {chat_id} deleted"));
                match panel.selected_chat() {
                    Some(current) => notify::info(&format!("Current conversation: {current}")),
                    None => notify::info("The next message opens a new conversation"),
                }
            }
        }
        Ok(())
    }
}
