use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::client::TreeDriveClient;
use crate::render;

#[derive(Parser)]
#[command(name = "treedrive", about = "TreeDrive file sharing client", version)]
pub struct ClientArgs {
    /// Server base URL (falls back to treedrive.json, then the built-in default)
    #[arg(short = 'H', long, env = "TREEDRIVE_SERVER")]
    pub server: Option<String>,
    #[command(subcommand)]
    pub subcommand: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to the server
    Login { username: String },
    /// Log out of the current session
    Logout,
    /// Show the currently logged in user
    Whoami,
    /// List the files stored on the server
    List,
    /// Download a file
    Get {
        filename: String,
        /// Local path to write to (defaults to the remote name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upload a local file
    Push {
        path: PathBuf,
        /// Name to store the file under (defaults to the local file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a file from the server
    Delete {
        filename: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run_list(client: &TreeDriveClient) -> Result<(), anyhow::Error> {
    let listing = client.list().await?;
    println!("{}", render::render(&render::view(listing)));
    Ok(())
}

pub async fn run_get(
    client: &TreeDriveClient,
    filename: &str,
    output: Option<&Path>,
) -> Result<(), anyhow::Error> {
    let data = client.download(filename).await?;
    let target = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(filename));
    tokio::fs::write(&target, &data).await?;
    println!("Downloaded {} ({} bytes)", target.display(), data.len());
    Ok(())
}

pub async fn run_push(
    client: &TreeDriveClient,
    path: &Path,
    name: Option<&str>,
) -> Result<(), anyhow::Error> {
    let remote_name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("cannot derive a file name from {}", path.display()))?
            .to_string(),
    };
    let data = tokio::fs::read(path).await?;
    let message = client.upload(&remote_name, data).await?;
    println!("{}", message.trim());
    Ok(())
}

pub async fn run_delete(
    client: &TreeDriveClient,
    filename: &str,
    confirmed: bool,
) -> Result<(), anyhow::Error> {
    if !confirmed && !confirm_delete(filename)? {
        println!("Aborted.");
        return Ok(());
    }
    let message = client.delete(filename).await?;
    println!("{}", message.trim());
    Ok(())
}

fn confirm_delete(filename: &str) -> Result<bool, anyhow::Error> {
    print!("Delete {}? [y/N] ", filename.yellow());
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
