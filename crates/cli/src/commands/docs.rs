use crate::context::AppContext;
use crate::notify;
use crate::render;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use domain::{DocumentationTree, DomainError};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DocsCommand {
    #[command(subcommand)]
    command: DocsSubcommand,
}

/// New content, inline or from a file
#[derive(Debug, Args)]
pub struct ContentArgs {
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    content: Option<String>,

    /// Read the content from this file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl ContentArgs {
    async fn read(&self) -> Result<String> {
        match (&self.content, &self.file) {
            (Some(content), _) => Ok(content.clone()),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, None) => Err(DomainError::MissingField("content".into()).into()),
        }
    }
}

#[derive(Debug, Subcommand)]
enum DocsSubcommand {
    /// Print the documentation of a file, folder or project
    Show {
        path: String,

        /// Print the body exactly as the server sent it
        #[arg(long)]
        raw: bool,
    },
    /// Browse a project's tree and open one document
    Browse {
        project: String,

        /// Tree path of the document to open
        #[arg(long)]
        open: Option<String>,
    },
    /// Replace a document's content
    Edit {
        path: String,

        #[command(flatten)]
        content: ContentArgs,
    },
    /// List the sections of a folder or project document
    Sections { path: String },
    /// Replace one section's content
    EditSection {
        section_id: i64,

        #[command(flatten)]
        content: ContentArgs,
    },
}

impl DocsCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let client = ctx.client();
        match self.command {
            DocsSubcommand::Show { path, raw } => {
                let text = if raw {
                    client.documentation(&path).await?
                } else {
                    client.documentation_text(&path).await?
                };
                println!("{text}");
            }
            DocsSubcommand::Browse { project, open } => {
                let nodes = client.file_structure(&project).await?;
                let mut tree = DocumentationTree::new(nodes);
                tree.expand_all();

                let opened = match open {
                    Some(path) => {
                        if tree.find(&path).is_none() {
                            return Err(DomainError::NodeNotFound(path).into());
                        }
                        tree.select(&path);
                        Some(path)
                    }
                    None => None,
                };
                print!("{}", render::documentation_tree(&tree));

                if let Some(path) = opened {
                    println!();
                    println!("{}", client.documentation_text(&path).await?);
                }
            }
            DocsSubcommand::Edit { path, content } => {
                let content = content.read().await?;
                let doc = client.documentation_ref(&path).await?;
                client.update_documentation(doc.id, &content).await?;
                notify::success(&format!("Documentation {} updated", doc.id));
            }
            DocsSubcommand::Sections { path } => {
                let doc = client.documentation_ref(&path).await?;
                let level = doc.resolved_level(&path);
                if !level.has_sections() {
                    notify::info(&format!("{path} is a {level} document and has no sections"));
                    return Ok(());
                }
                let sections = client.sections(doc.id).await?;
                println!("documentation id: {}", doc.id);
                println!();
                print!("{}", render::sections(&sections));
            }
            DocsSubcommand::EditSection {
                section_id,
                content,
            } => {
                let content = content.read().await?;
                client.update_section(section_id, &content).await?;
                notify::success(&format!("Section {section_id} updated"));
            }
        }
        Ok(())
    }
}
