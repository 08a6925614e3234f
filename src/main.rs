mod client;
mod commands;
mod config;
mod error;
mod listing;
mod render;
mod shell;

use clap::Parser;

use crate::client::TreeDriveClient;
use crate::commands::{ClientArgs, Commands};
use crate::config::Config;
use crate::shell::Shell;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = ClientArgs::parse();
    let config = Config::resolve(args.server.clone());
    tracing::info!("using server {}", config.server);
    let client = TreeDriveClient::new(&config)?;

    match &args.subcommand {
        Some(Commands::Login { username }) => {
            println!("{}", client.login(username).await?.trim());
        }
        Some(Commands::Logout) => {
            println!("{}", client.logout().await?.trim());
        }
        Some(Commands::Whoami) => match client.whoami().await? {
            Some(username) => println!("{}", username),
            None => println!("Not logged in"),
        },
        Some(Commands::List) => commands::run_list(&client).await?,
        Some(Commands::Get { filename, output }) => {
            commands::run_get(&client, filename, output.as_deref()).await?
        }
        Some(Commands::Push { path, name }) => {
            commands::run_push(&client, path, name.as_deref()).await?
        }
        Some(Commands::Delete { filename, yes }) => {
            commands::run_delete(&client, filename, *yes).await?
        }
        None => Shell::new(client)?.run().await?,
    }
    Ok(())
}
