use std::path::Path;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::client::TreeDriveClient;
use crate::commands;

#[derive(Debug)]
struct CommandSpec {
    name: &'static str,
    args: usize,
    signature: &'static str,
}

/// Shell command schema: name, argument count and printable signature.
/// Input is validated against this table before anything is sent.
const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "login", args: 1, signature: "login <username>" },
    CommandSpec { name: "logout", args: 0, signature: "logout" },
    CommandSpec { name: "whoami", args: 0, signature: "whoami" },
    CommandSpec { name: "list", args: 0, signature: "list" },
    CommandSpec { name: "get", args: 1, signature: "get <filename>" },
    CommandSpec { name: "push", args: 1, signature: "push <filename>" },
    CommandSpec { name: "delete", args: 1, signature: "delete <filename>" },
    CommandSpec { name: "help", args: 0, signature: "help" },
    CommandSpec { name: "quit", args: 0, signature: "quit" },
    CommandSpec { name: "exit", args: 0, signature: "exit" },
];

const LOGIN_HINT: &str = "You must login first with: login <username>";

fn validate(line: &str) -> Result<(&'static CommandSpec, Vec<String>), String> {
    let mut tokens = line.split_whitespace();
    let first = match tokens.next() {
        Some(first) => first,
        None => return Err("No command given".to_string()),
    };
    let name = first.to_lowercase();
    let spec = match COMMANDS.iter().find(|c| c.name == name) {
        Some(spec) => spec,
        None => return Err(format!("Unknown command: {}", first)),
    };
    let args: Vec<String> = tokens.map(str::to_string).collect();
    if args.len() != spec.args {
        return Err(format!(
            "{} expects {} argument(s): {}",
            spec.name, spec.args, spec.signature
        ));
    }
    Ok((spec, args))
}

pub struct Shell {
    client: TreeDriveClient,
    editor: DefaultEditor,
    logged_in: bool,
}

impl Shell {
    pub fn new(client: TreeDriveClient) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client,
            editor: DefaultEditor::new()?,
            logged_in: false,
        })
    }

    pub async fn run(&mut self) -> Result<(), anyhow::Error> {
        println!("{} v{}", "TreeDrive".green().bold(), env!("CARGO_PKG_VERSION"));
        match self.client.whoami().await {
            Ok(Some(username)) => {
                self.logged_in = true;
                println!("Logged in as {}", username.cyan());
            }
            Ok(None) => println!("Not logged in. Start with {}", "login <username>".cyan()),
            Err(e) => eprintln!("{}: {}", "Error".red(), e),
        }
        println!("Type {} for commands\n", "help".cyan());

        loop {
            match self.editor.readline(&format!("{} ", "treedrive>".green())) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);
                    if !self.dispatch(line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("Error: {:?}", e);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Returns false when the shell should exit.
    async fn dispatch(&mut self, line: &str) -> bool {
        let (spec, args) = match validate(line) {
            Ok(parsed) => parsed,
            Err(message) => {
                if self.logged_in {
                    eprintln!("{}: {}", "Error".red(), message);
                } else {
                    eprintln!("{}", LOGIN_HINT);
                }
                return true;
            }
        };

        match spec.name {
            "help" => {
                println!("Commands:");
                for spec in COMMANDS {
                    println!("  {}", spec.signature);
                }
            }
            "quit" | "exit" => return false,
            "login" => match self.client.login(&args[0]).await {
                Ok(message) => {
                    self.logged_in = true;
                    println!("{}", message.trim());
                }
                Err(e) => eprintln!("{}: {}", "Error".red(), e),
            },
            _ if !self.logged_in => eprintln!("{}", LOGIN_HINT),
            "logout" => match self.client.logout().await {
                Ok(message) => {
                    self.logged_in = false;
                    println!("{}", message.trim());
                }
                Err(e) => eprintln!("{}: {}", "Error".red(), e),
            },
            "whoami" => match self.client.whoami().await {
                Ok(Some(username)) => println!("{}", username),
                Ok(None) => {
                    self.logged_in = false;
                    println!("Not logged in");
                }
                Err(e) => eprintln!("{}: {}", "Error".red(), e),
            },
            "list" => report(commands::run_list(&self.client).await),
            "get" => report(commands::run_get(&self.client, &args[0], None).await),
            "push" => {
                let path = Path::new(&args[0]);
                if path.exists() {
                    report(commands::run_push(&self.client, path, None).await);
                } else {
                    eprintln!(
                        "{}: File '{}' does not exist in the current directory.",
                        "Error".red(),
                        args[0]
                    );
                }
            }
            "delete" => report(commands::run_delete(&self.client, &args[0], false).await),
            _ => {}
        }
        true
    }
}

fn report(result: Result<(), anyhow::Error>) {
    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red(), e);
    }
}
