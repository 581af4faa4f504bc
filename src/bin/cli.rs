use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use dotenvy::dotenv;
use laptopbay::cli::{issue_token, promote_admin};
use laptopbay::state::init_store;
use laptopbay_config::{JwtConfig, StoreConfig};

#[derive(Parser)]
#[command(name = "laptopbay-cli")]
#[command(about = "LaptopBay CLI - Administrative tools for LaptopBay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grant the admin role to an existing user
    PromoteAdmin {
        /// Email of the user to promote (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print a signed token for an email
    IssueToken {
        /// Email to put in the token claim
        #[arg(short = 'e', long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::PromoteAdmin { email, yes } => handle_promote_admin(email, yes).await,
        Commands::IssueToken { email } => {
            let token = issue_token(&JwtConfig::from_env(), &email)?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn handle_promote_admin(email: Option<String>, yes: bool) -> anyhow::Result<()> {
    let config = StoreConfig::from_env();
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL must be set to promote a user");
    }

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("User email").interact_text()?,
    };

    if !yes
        && !Confirm::new()
            .with_prompt(format!("Grant admin rights to {email}?"))
            .default(false)
            .interact()?
    {
        println!("Aborted.");
        return Ok(());
    }

    let store = init_store(&config).await?;
    promote_admin(store.as_ref(), &email).await?;

    println!("✅ {email} is now an admin");
    Ok(())
}
