use crate::context::AppContext;
use crate::render;
use anyhow::Result;
use clap::Args;
use client::ApiClient;
use domain::FileSelectionTree;
use tracing::debug;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Project name as uploaded
    pub project: String,

    /// Preview the selection produced by toggling these paths
    #[arg(long = "select", value_name = "PATH")]
    pub select: Vec<String>,

    /// Show only the top level
    #[arg(long)]
    pub collapsed: bool,
}

impl TreeArgs {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let mut tree = fetch_selection_tree(ctx.client(), &self.project).await?;
        if !self.collapsed {
            tree.expand_all();
        }
        apply_selection(&mut tree, &self.select)?;

        print!("{}", render::selection_tree(&tree));
        if !self.select.is_empty() {
            println!();
            println!("{} paths selected:", tree.selected_count());
            for path in tree.selection() {
                println!("  {path}");
            }
        }
        Ok(())
    }
}

pub async fn fetch_selection_tree(client: &ApiClient, project: &str) -> Result<FileSelectionTree> {
    let nodes = client.file_structure(project).await?;
    Ok(FileSelectionTree::new(nodes).with_listener(|selection| {
        debug!(selected = selection.len(), "Selection changed");
    }))
}

/// Select each path unless an earlier one already pulled it in
pub fn apply_selection(tree: &mut FileSelectionTree, paths: &[String]) -> Result<()> {
    for path in paths {
        if !tree.is_selected(path) {
            tree.toggle_selection(path)?;
        }
    }
    Ok(())
}
