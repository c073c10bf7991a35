use crate::context::AppContext;
use crate::notify;
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use domain::{DocLevel, FeedbackDraft};

#[derive(Debug, Args)]
pub struct FeedbackCommand {
    #[command(subcommand)]
    command: FeedbackSubcommand,
}

#[derive(Debug, Subcommand)]
enum FeedbackSubcommand {
    /// Rate a whole document
    File {
        #[arg(long)]
        path: String,

        /// file, folder or project; guessed from the path when omitted
        #[arg(long)]
        level: Option<DocLevel>,

        /// 1 to 5 stars
        #[arg(long)]
        rating: u8,

        /// Comment, at most 500 characters
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Rate one section of a folder or project document
    Section {
        #[arg(long)]
        doc_id: i64,

        #[arg(long)]
        section_id: i64,

        #[arg(long)]
        rating: u8,

        #[arg(long, default_value = "")]
        text: String,
    },
    /// Show whether you already rated a document or its sections
    Status {
        #[arg(long, required_unless_present = "doc_id")]
        path: Option<String>,

        #[arg(long)]
        level: Option<DocLevel>,

        #[arg(long, conflicts_with = "path")]
        doc_id: Option<i64>,
    },
}

impl FeedbackCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let user = ctx.require_user().await?;
        let user_id = user.id.to_string();
        let client = ctx.client();

        match self.command {
            FeedbackSubcommand::File {
                path,
                level,
                rating,
                text,
            } => {
                let level = level.unwrap_or_else(|| DocLevel::classify_path(&path));
                let feedback =
                    FeedbackDraft::new(Some(rating), &text).into_file_feedback(&user_id, &path, level, false)?;
                if client.feedback_status_level(&user_id, &path, level).await? {
                    notify::info("You have already rated this document");
                    return Ok(());
                }
                client.submit_file_feedback(&feedback).await?;
                notify::success(&format!(
                    "Thanks for your feedback {}",
                    feedback.rating.stars()
                ));
            }
            FeedbackSubcommand::Section {
                doc_id,
                section_id,
                rating,
                text,
            } => {
                let feedback = FeedbackDraft::new(Some(rating), &text)
                    .into_section_feedback(&user_id, doc_id, section_id)?;
                let status = client.section_feedback_status(&user_id, doc_id).await?;
                if status.has_feedback(section_id) {
                    notify::info("You have already rated this section");
                    return Ok(());
                }
                client.submit_section_feedback(&feedback).await?;
                notify::success(&format!(
                    "Section {section_id} rated {}",
                    feedback.rating.stars()
                ));
            }
            FeedbackSubcommand::Status {
                path,
                level,
                doc_id,
            } => match (path, doc_id) {
                (Some(path), _) => {
                    let level = level.unwrap_or_else(|| DocLevel::classify_path(&path));
                    let rated = client.feedback_status_level(&user_id, &path, level).await?;
                    let verdict = if rated { "rated" } else { "not rated yet" };
                    println!("{path} ({level}): {verdict}");
                }
                (None, Some(doc_id)) => {
                    let status = client.section_feedback_status(&user_id, doc_id).await?;
                    if status.section_ids.is_empty() {
                        println!("No sections of documentation {doc_id} rated yet");
                    } else {
                        let ids: Vec<String> =
                            status.section_ids.iter().map(i64::to_string).collect();
                        println!("Rated sections of {doc_id}: {}", ids.join(", "));
                    }
                }
                (None, None) => bail!("pass --path or --doc-id"),
            },
        }
        Ok(())
    }
}
