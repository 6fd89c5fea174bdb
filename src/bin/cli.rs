use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use uuid::Uuid;

use jobboard_gate::authz::{Permission, PermissionTable, Role, User};
use jobboard_gate::routing::{RouteDecision, RouteTable};
use jobboard_gate::GateConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "jobboard gate inspection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show what the page gate does with a path
    Classify {
        path: String,
        /// Treat the visitor as signed in
        #[arg(long)]
        authenticated: bool,
    },
    /// Evaluate a permission for a user holding the given roles
    Check {
        /// Comma separated, e.g. USER,ENTERPRISE
        #[arg(long, value_delimiter = ',', required = true)]
        roles: Vec<String>,
        #[arg(long)]
        resource: String,
        #[arg(long)]
        action: String,
        /// JSON record handed to data-dependent rules
        #[arg(long)]
        data: Option<String>,
        #[arg(long)]
        user_id: Option<Uuid>,
    },
    /// List the compiled page routes
    Routes,
}

fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(crate_env);
    }

    let cli = Cli::parse();
    let config = GateConfig::from_env()?;

    match cli.command {
        Commands::Classify { path, authenticated } => {
            let routes = RouteTable::job_board(&config)?;
            println!("{}", describe_decision(&routes.classify(&path, authenticated)));
        }
        Commands::Check {
            roles,
            resource,
            action,
            data,
            user_id,
        } => {
            let roles = roles
                .iter()
                .map(|r| r.parse::<Role>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(anyhow::Error::msg)?;
            let user = User::new(user_id.unwrap_or_else(Uuid::new_v4)).with_roles(roles);

            let permission = Permission::parse(&resource, &action)
                .with_context(|| format!("unknown permission '{resource}:{action}'"))?;

            let data: Option<serde_json::Value> = data
                .as_deref()
                .map(serde_json::from_str::<serde_json::Value>)
                .transpose()
                .context("--data must be valid JSON")?;

            let allowed = PermissionTable::job_board().check(Some(&user), permission, data.as_ref())?;
            println!("{}", if allowed { "allowed" } else { "denied" });
        }
        Commands::Routes => {
            let routes = RouteTable::job_board(&config)?;
            println!("{:<10} {:<26} {}", "Category", "Pattern", "Regex");
            for (category, pattern) in routes.entries() {
                println!("{:<10} {:<26} {}", format!("{category:?}"), pattern.as_str(), pattern.regex());
            }
        }
    }

    Ok(())
}

fn describe_decision(decision: &RouteDecision) -> String {
    match decision {
        RouteDecision::Pass { reason } => format!("pass ({reason:?})"),
        RouteDecision::RedirectHome { location } | RouteDecision::RedirectSignIn { location } => {
            format!("{} -> {}", decision.label(), location)
        }
        RouteDecision::RewriteNotFound { target } => format!("{} -> {}", decision.label(), target),
    }
}
