use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_store::{NewUser, Store, UserRepo};

use super::print_json;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Find a user by email (prints null when absent)
    Email {
        /// Email address to look up
        email: String,
    },
    /// Find a user by id (prints null when absent)
    Id {
        /// User id
        id: i64,
    },
    /// Create a user and print the stored record
    Add(AddUserArgs),
}

#[derive(Parser, Debug)]
pub struct AddUserArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address (must be unique)
    #[arg(long)]
    pub email: String,

    /// Password hash to store
    #[arg(long, env = "LIGHTBNB_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(store: &dyn Store, args: UserArgs) -> Result<()> {
    let repo = UserRepo::new(store);
    match args.command {
        UserCommands::Email { email } => {
            let user = repo
                .find_by_email(&email)
                .await
                .context("Failed to look up user by email")?;
            print_json(&user)
        }
        UserCommands::Id { id } => {
            let user = repo
                .find_by_id(id)
                .await
                .context("Failed to look up user by id")?;
            print_json(&user)
        }
        UserCommands::Add(args) => {
            let user = repo
                .create(&NewUser {
                    name: args.name,
                    email: args.email,
                    password: args.password,
                })
                .await
                .context("Failed to create user")?;
            print_json(&user)
        }
    }
}
