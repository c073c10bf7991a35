use crate::context::AppContext;
use crate::notify;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use infrastructure::session::{FileTokenStore, TokenStore};

#[derive(Debug, Args)]
pub struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Store a bearer token issued by the Code Insight server
    Set {
        token: String,

        /// Store without asking the server who the token belongs to
        #[arg(long)]
        no_verify: bool,
    },
    /// Log out and forget the stored token
    Clear,
}

impl SessionCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        match self.command {
            SessionSubcommand::Set { token, no_verify } => {
                if no_verify {
                    let store =
                        FileTokenStore::at(ctx.config().session.token_file.as_deref())?;
                    store.save(&token)?;
                    notify::success(&format!("Token stored in {}", store.path().display()));
                    return Ok(());
                }
                let user = ctx.auth().sign_in_with_token(&token).await?;
                notify::success(&format!("Signed in as {}", user.email.bold()));
            }
            SessionSubcommand::Clear => {
                ctx.auth().logout().await?;
                notify::success("Session cleared");
            }
        }
        Ok(())
    }
}

/// `whoami`
pub async fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.current_user().await? {
        Some(user) => {
            println!("{} {}", "email:".dimmed(), user.email.bold());
            println!("{} {}", "id:".dimmed(), user.id);
            if user.is_admin {
                println!("{} {}", "role:".dimmed(), "admin".yellow());
            }
        }
        None => notify::info("Not signed in. Use 'code-insight session set <token>'."),
    }
    Ok(())
}
