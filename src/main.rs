//! Voyaga CLI - a terminal client for the Voyaga vacation-rental platform.
//!
//! Signs in against the Voyaga REST backend, keeps a persisted session with
//! automatic credential refresh, and exposes the account surface (profile,
//! wallet, notifications, Voya AI chat) as subcommands.

mod api;
mod auth;
mod config;
mod models;
mod notify;
mod utils;

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::ApiClient;
use auth::Session;
use config::Config;
use models::{ChatTurn, RegisterRequest};
use notify::{Notifier, ToastKind};
use utils::{format_date, format_usd};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[derive(Parser)]
#[command(
    name = "voyaga",
    version,
    about = "Command line client for the Voyaga travel platform"
)]
struct Cli {
    /// Backend base URL (overrides the configured default)
    #[arg(long, env = "VOYAGA_BASE_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store a session
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        /// Account role: guest or host
        #[arg(long, default_value = "guest")]
        role: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Verify the emailed OTP code
    Verify {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        code: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user's profile
    Whoami,
    /// Show the wallet balance
    Wallet,
    /// List notifications
    Notifications {
        /// Only show unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read { id: i64 },
    /// Chat with the Voya assistant (interactive when no message is given)
    Chat { message: Option<String> },
}

/// Terminal notifier that remembers whether it displayed an error, so
/// `main` does not print the same failure twice.
#[derive(Default)]
struct CliNotifier {
    shown: AtomicBool,
}

impl CliNotifier {
    fn shown(&self) -> bool {
        self.shown.load(Ordering::SeqCst)
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => {
                self.shown.store(true, Ordering::SeqCst);
                eprintln!("error: {}", message);
            }
            ToastKind::Success => println!("{}", message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(ref url) = cli.base_url {
        config.base_url = Some(url.clone());
    }
    debug!(base_url = config.base_url(), "Voyaga CLI starting");

    let mut session = Session::new(Config::data_dir()?);
    session.load().context("Failed to load stored session")?;

    let notifier = Arc::new(CliNotifier::default());
    let client = ApiClient::with_notifier(config.base_url(), notifier.clone())?;

    let result = run_command(cli.command, &client, &mut session, &mut config, notifier.as_ref()).await;

    if let Err(err) = result {
        // Request failures were already surfaced through the notifier
        if !notifier.shown() {
            eprintln!("error: {:#}", err);
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run_command(
    command: Command,
    client: &ApiClient,
    session: &mut Session,
    config: &mut Config,
    notifier: &dyn Notifier,
) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let email = match email.or_else(|| config.last_email.clone()) {
                Some(e) => e,
                None => prompt("Email: ")?,
            };
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };

            let user = client.login(session, &email, &password).await?;
            config.last_email = Some(email);
            config.save()?;

            notifier.notify(
                ToastKind::Success,
                &format!("Welcome back, {}!", user.display_name()),
            );
            // Refresh the wallet badge, as the web UI does after sign-in
            if let Ok(balance) = client.wallet_balance(session).await {
                println!("Wallet balance: {}", format_usd(balance));
            }
        }

        Command::Register {
            email,
            username,
            first_name,
            last_name,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => {
                    let p = prompt("Password: ")?;
                    let confirm = prompt("Confirm password: ")?;
                    if p != confirm {
                        anyhow::bail!("Passwords don't match.");
                    }
                    p
                }
            };

            let request = RegisterRequest {
                email: email.clone(),
                username,
                first_name,
                last_name,
                role,
                password: password.clone(),
                password2: password,
            };
            let payload = client.register(session, &request).await?;
            config.last_email = Some(email);
            config.save()?;

            notifier.notify(
                ToastKind::Success,
                &format!("Welcome to Voyaga, {}!", payload.user.display_name()),
            );
            if let Some(message) = payload.message {
                println!("{}", message);
            }
        }

        Command::Verify { email, code } => {
            let email = match email
                .or_else(|| config.last_email.clone())
                .or_else(|| session.user().map(|u| u.email.clone()))
            {
                Some(e) => e,
                None => prompt("Email: ")?,
            };
            let message = client.verify_otp(session, &email, &code).await?;
            println!("{}", message);
        }

        Command::Logout => {
            session.clear()?;
            notifier.notify(ToastKind::Success, "Signed out successfully");
        }

        Command::Whoami => {
            require_auth(session)?;
            let user = client.profile(session).await?;
            println!("{} <{}>", user.full_name(), user.email);
            println!("  username:  {}", user.username);
            if let Some(ref role) = user.role {
                println!("  role:      {}", role);
            }
            println!("  verified:  {}", if user.is_verified { "yes" } else { "no" });
            println!("  wallet:    {}", format_usd(user.wallet_balance));
            if let Some(ref created) = user.created_at {
                println!("  member since: {}", format_date(created));
            }
        }

        Command::Wallet => {
            require_auth(session)?;
            let balance = client.wallet_balance(session).await?;
            println!("Wallet balance: {}", format_usd(balance));
        }

        Command::Notifications { unread } => {
            require_auth(session)?;
            let list = client
                .notifications(session)
                .await
                .context("Failed to load notifications")?;
            let shown: Vec<_> = list
                .into_iter()
                .filter(|n| !unread || !n.is_read)
                .collect();

            if shown.is_empty() {
                println!("No notifications.");
            }
            for n in shown {
                let marker = if n.is_read { ' ' } else { '*' };
                let date = n.created_at.as_deref().map(format_date).unwrap_or_default();
                println!("{} #{:<5} [{}] {}  {}", marker, n.id, n.notif_type, n.title, date);
                if !n.message.is_empty() {
                    println!("          {}", n.message);
                }
            }
        }

        Command::Read { id } => {
            require_auth(session)?;
            client.mark_notification_read(session, id).await?;
            println!("Notification #{} marked as read.", id);
        }

        Command::Chat { message } => {
            if !session.is_authenticated() {
                println!("Please sign in to chat with Voya AI. Run `voyaga login` first.");
                return Ok(());
            }
            match message {
                Some(message) => {
                    let reply = client.chat(session, &message, &[]).await?;
                    println!("{}", reply);
                }
                None => chat_loop(client, session).await?,
            }
        }
    }

    Ok(())
}

/// Interactive chat: keeps the conversation history so the assistant has
/// context across turns. Exit with an empty line, `exit`, or EOF.
async fn chat_loop(client: &ApiClient, session: &mut Session) -> Result<()> {
    let mut history: Vec<ChatTurn> = Vec::new();

    println!("Chatting with Voya. Empty line or `exit` to quit.");
    loop {
        let line = prompt("you> ")?;
        if line.is_empty() || line == "exit" || line == "quit" {
            return Ok(());
        }

        match client.chat(session, &line, &history).await {
            Ok(reply) => {
                println!("voya> {}", reply);
                history.push(ChatTurn::user(line));
                history.push(ChatTurn::assistant(reply));
            }
            Err(e) => {
                // Failure was already surfaced; keep the conversation going
                debug!(error = %e, "Chat request failed");
                println!("voya> Sorry, I had trouble connecting. Please try again!");
            }
        }
    }
}

fn require_auth(session: &Session) -> Result<()> {
    if !session.is_authenticated() {
        anyhow::bail!("Not signed in. Run `voyaga login` first.");
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        // EOF
        return Ok(String::new());
    }
    Ok(line.trim().to_string())
}
