use clap::{
    Parser,
    Subcommand,
};
use std::time::{
    Duration,
    Instant,
};
use wardenac::{
    platform::Builder as PlatformBuilder,
    Platform,
};
use wardencore::{
    params::Params,
    snapshot::Snapshot,
};
use wardendb::Backend;
use wardenrule::rule::ParamMatchesUser;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "WARDEN_DB_URL", env = "WARDEN_DB_URL", default_value = "memory:")]
    warden_db_url: String,
    /// JSON snapshot of items, item children, assignments and rule names
    /// to load before running the query
    #[clap(long, value_name = "WARDEN_SNAPSHOT", env = "WARDEN_SNAPSHOT")]
    warden_snapshot: Option<String>,
    /// Registers a rule that passes when the named parameter equals the
    /// user id, given as NAME=KEY (e.g. IsOwnProfile=targetUserId)
    #[clap(long = "rule", value_name = "NAME=KEY", value_parser = parse_key_val)]
    rules: Vec<(String, String)>,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Checks whether the user is granted the item
    #[command(arg_required_else_help = true)]
    Check {
        user: String,
        item: String,
        /// Runtime parameter as KEY=VALUE; VALUE is read as JSON where
        /// it parses, otherwise as a string
        #[clap(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
        /// Gives up on the check after this many milliseconds
        #[clap(long)]
        timeout_ms: Option<u64>,
    },
    /// Lists every item granted by the item
    #[command(arg_required_else_help = true)]
    Descendants {
        item: String,
    },
    /// Lists every item that grants the item
    #[command(arg_required_else_help = true)]
    Ancestors {
        item: String,
    },
    /// Lists the roles assigned to the user
    #[command(arg_required_else_help = true)]
    Roles {
        user: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("wardenac")
        .module("wardendb")
        .module("wardenrule")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let platform = args.rules.into_iter()
        .fold(PlatformBuilder::new(), |builder, (name, key)| {
            builder.rule(name, ParamMatchesUser::new(key))
        })
        .shared_platform(
            Backend::rbac(args.warden_db_url)
                .await
                .map_err(anyhow::Error::from_boxed)?
        )
        .build()?;

    if let Some(path) = args.warden_snapshot {
        let snapshot: Snapshot = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        platform.import(snapshot).await?;
        log::info!("loaded snapshot from {path}");
    }
    for name in platform.unregistered_rules().await?.into_iter() {
        log::warn!("rule {name} has no predicate; checks relying on it will fail");
    }

    match args.command {
        Commands::Check { user, item, params, timeout_ms } => {
            parse_check(&platform, user, item, params, timeout_ms).await?;
        }
        Commands::Descendants { item } => {
            for name in platform.descendants(&item).await?.into_iter() {
                println!("{name}");
            }
        }
        Commands::Ancestors { item } => {
            for name in platform.ancestors(&item).await?.into_iter() {
                println!("{name}");
            }
        }
        Commands::Roles { user } => {
            for role in platform.roles_for_user(&user).await?.into_iter() {
                println!("{role}");
            }
        }
    }

    Ok(())
}

async fn parse_check<'p>(
    platform: &'p Platform,
    user: String,
    item: String,
    params: Vec<(String, String)>,
    timeout_ms: Option<u64>,
) -> anyhow::Result<()> {
    let params = params.into_iter()
        .map(|(k, v)| {
            let value = serde_json::from_str(&v)
                .unwrap_or(serde_json::Value::String(v));
            (k, value)
        })
        .collect::<Params>();
    let instant = Instant::now();
    let granted = match timeout_ms {
        Some(ms) => platform.can_user_within(
            &user,
            &item,
            &params,
            Duration::from_millis(ms),
        ).await?,
        None => platform.can_user(&user, &item, &params).await?,
    };
    let elapsed = instant.elapsed();
    let granted = if granted {
        "granted"
    } else {
        "denied"
    };
    println!("user {user} {granted} {item}; check took {elapsed:?}");
    Ok(())
}
