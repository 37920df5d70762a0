//! Aurayale player client.
//!
//! Composition root: loads configuration, restores the zkLogin session
//! and dispatches one command.
//!
//! ```bash
//! aura login                       # prints the Google sign-in URL
//! aura callback '<redirect url>'   # completes the login
//! aura deck --set 1,2,3,4,5,6,7,8,9,10
//! aura wallet bind 0x5290...9ee7             # prints the challenge to sign
//! ```

mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use aura_chain_sui::SuiConfig;
use aura_client::epochs::LazySuiEpochs;
use aura_client::{Client, ClientConfig};
use clap::{Parser, Subcommand};

/// Aurayale player client
#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Sign in with zkLogin and manage your gem deck", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Start a Google zkLogin and print the URL to open
    Login,

    /// Finish the login with the provider redirect
    Callback {
        /// Redirect URL, fragment (`#id_token=...`) or bare parameters
        redirect: String,
    },

    /// Show the local session
    Status,

    /// Forget the session and backend token
    Logout,

    /// Show the current deck, or replace it
    Deck {
        /// Ten gem IDs, comma separated
        #[arg(long, value_delimiter = ',')]
        set: Option<Vec<u64>>,
    },

    /// List owned gems
    Gems,

    /// Game server accounts without zkLogin
    #[command(subcommand)]
    Account(AccountCommand),

    /// Bind an EVM wallet to the game account
    #[command(subcommand)]
    Wallet(WalletCommand),
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Log in with username and password
    Login {
        username: String,
        #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a username/password account
    Register {
        username: String,
        #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in with a Google identity token
    Google { id_token: String },
}

#[derive(Subcommand)]
enum WalletCommand {
    /// Print the challenge to sign, or confirm with its signature
    Bind {
        address: String,
        /// `personal_sign` signature over the challenge
        #[arg(long)]
        signature: Option<String>,
    },

    /// Remove a bound wallet
    Unbind { address: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::setup_logging()?;

    let result = run(cli.command).await;
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

async fn run(command: Command) -> Result<()> {
    let config = ClientConfig::from_env();
    let sui_config = SuiConfig::from_env().context("Invalid Sui configuration")?;
    let epochs = Arc::new(LazySuiEpochs::new(sui_config));

    let mut client = Client::new(&config, epochs)?;

    match command {
        Command::Login => match client.login().await? {
            Some(url) => {
                println!("Open this URL to sign in:\n\n{}\n", url);
                println!("Then run: aura callback '<redirect url>'");
            }
            None => println!("Already logged in. Run `aura logout` first to switch accounts."),
        },
        Command::Callback { redirect } => match client.callback(&redirect).await {
            Ok(address) => println!("Logged in as {}", address),
            Err(e) => {
                // Same indicator the web redirect would carry as `?error=`
                anyhow::bail!("Login failed ({}): {}", e.indicator(), e);
            }
        },
        Command::Status => {
            let status = client.status();
            println!("State:       {}", status.state);
            if let Some(address) = &status.address {
                println!("Address:     {}", address);
            }
            if let Some(max_epoch) = status.max_epoch {
                println!("Max epoch:   {}", max_epoch);
            }
            println!(
                "Game server: {}",
                if status.has_backend_token { "linked" } else { "not linked" }
            );
            if let Some(error) = client.flow().last_error() {
                println!("Last error:  {}", error);
            }
            if status.address.is_some() {
                match client.check_validity().await {
                    Ok(()) => println!("Session:     valid"),
                    Err(e) => println!("Session:     {}", e),
                }
            }
        }
        Command::Logout => {
            client.logout();
            println!("Logged out");
        }
        Command::Deck { set: Some(gems) } => {
            let deck = client.set_deck(&gems).await?;
            println!("Deck updated: {}", format_ids(&deck));
        }
        Command::Deck { set: None } => {
            let deck = client.deck().await?;
            println!("Deck: {}", format_ids(&deck));
        }
        Command::Gems => {
            let gems = client.gems().await?;
            if gems.is_empty() {
                println!("No gems");
            }
            for gem in gems {
                println!("{:>6}  x{:<3} {}", gem.id, gem.quantity, gem.metadata.name);
            }
        }
        Command::Account(AccountCommand::Login { username, password }) => {
            client.password_login(&username, &password).await?;
            println!("Logged in as {}", username);
        }
        Command::Account(AccountCommand::Register { username, password }) => {
            let ack = client.register(&username, &password).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Registered"));
        }
        Command::Account(AccountCommand::Google { id_token }) => {
            client.google_login(&id_token).await?;
            println!("Logged in with Google");
        }
        Command::Wallet(WalletCommand::Bind {
            address,
            signature: None,
        }) => {
            let challenge = client.request_wallet(&address).await?;
            println!("Sign this message with {}:\n\n{}\n", address, challenge.nonce);
            println!("Then run: aura wallet bind {} --signature <sig>", address);
        }
        Command::Wallet(WalletCommand::Bind {
            address,
            signature: Some(signature),
        }) => {
            let ack = client.confirm_wallet(&address, &signature).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Wallet bound"));
        }
        Command::Wallet(WalletCommand::Unbind { address }) => {
            let ack = client.unbind_wallet(&address).await?;
            println!("{}", ack.message.as_deref().unwrap_or("Wallet unbound"));
        }
    }

    Ok(())
}

fn format_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
