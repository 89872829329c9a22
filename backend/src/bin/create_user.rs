//! Provision a registry user with a hashed password.
//!
//! The password is read from the first line of standard input so it never
//! appears in shell history or process listings. Pending migrations are
//! applied before the insert, so a fresh database works. The new user id is
//! printed on success.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, BufRead, Write};

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use exam_registry::domain::ports::UserRepository;
use exam_registry::domain::{DisplayName, EmailAddress, User, UserId, UserRole, hash_password};
use exam_registry::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use tokio::runtime::Builder;
use zeroize::Zeroizing;

/// `create-user` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-user",
    about = "Create a registry user; the password is read from stdin",
    version
)]
struct CliArgs {
    /// Login email address.
    #[arg(long)]
    email: String,
    /// Display name.
    #[arg(long)]
    name: String,
    /// `USER` or `ADMIN`.
    #[arg(long, default_value = "USER", value_parser = parse_role)]
    role: UserRole,
    /// Database connection URL. Falls back to `REGISTRY_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(async_main())
}

async fn async_main() -> color_eyre::Result<()> {
    let args = CliArgs::parse();
    let database_url = args
        .database_url
        .clone()
        .or_else(|| env::var("REGISTRY_DATABASE_URL").ok())
        .ok_or_else(|| eyre!("--database-url or REGISTRY_DATABASE_URL is required"))?;

    let user = User::new(
        UserId::random(),
        EmailAddress::new(&args.email).wrap_err("invalid email")?,
        DisplayName::new(&args.name).wrap_err("invalid name")?,
        args.role,
        Utc::now(),
    );

    let password = read_password()?;
    let hash = hash_password(&password).wrap_err("failed to hash password")?;

    run_pending_migrations(&database_url)
        .await
        .wrap_err("database migrations failed")?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(1))
        .await
        .wrap_err("failed to connect to the database")?;
    DieselUserRepository::new(pool)
        .insert(&user, &hash)
        .await
        .wrap_err("failed to store user")?;

    writeln!(io::stdout().lock(), "{}", user.id()).wrap_err("failed to report user id")?;
    Ok(())
}

fn read_password() -> color_eyre::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    let password = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_owned());
    if password.is_empty() {
        return Err(eyre!("password must not be empty"));
    }
    Ok(password)
}
