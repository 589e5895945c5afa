//! # BlogMini Client
//!
//! Terminal front end for the post API. Each command renders one view and
//! fetches everything it shows; nothing is cached between runs.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod api;
mod form;
mod views;

use api::BlogApi;
use form::{FormMode, PostForm};

#[derive(Debug, Parser)]
#[command(name = "blog-client", version, about = "BlogMini terminal client")]
struct Cli {
    /// Base URL of the post API.
    #[arg(long, env = "BLOGMINI_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// Pause after a successful save before showing the home page.
    #[arg(long, default_value_t = 2000)]
    redirect_delay_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all posts (the default).
    List,
    /// Show one post.
    Show { id: String },
    /// Create a post.
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Leave empty to post as "Anonymous".
        #[arg(long, default_value = "")]
        author: String,
    },
    /// Edit a post. Omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Delete a post after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let api = match BlogApi::new(&cli.api_url) {
        Ok(api) => api,
        Err(e) => {
            print!("{}", views::render_error(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };
    let redirect_delay = Duration::from_millis(cli.redirect_delay_ms);

    print!("{}", views::navbar());
    println!();

    let result = run(cli.command.unwrap_or(Command::List), &api, redirect_delay).await;
    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print!("{}", views::render_error(&e.to_string()));
            ExitCode::FAILURE
        }
    };

    print!("{}", views::footer(chrono::Utc::now()));
    code
}

async fn run(command: Command, api: &BlogApi, redirect_delay: Duration) -> anyhow::Result<()> {
    match command {
        Command::List => show_list(api).await,
        Command::Show { id } => {
            let post = api.get(&id).await?;
            print!("{}", views::render_detail(&post));
            Ok(())
        }
        Command::New {
            title,
            content,
            author,
        } => {
            let form = PostForm {
                title,
                content,
                author,
            };
            submit(api, FormMode::Create, form, redirect_delay).await
        }
        Command::Edit {
            id,
            title,
            content,
            author,
        } => {
            let existing = api.get(&id).await?;
            let form = PostForm::prefilled(&existing).overlay(title, content, author);
            submit(api, FormMode::Edit { id }, form, redirect_delay).await
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this post?").await? {
                return Ok(());
            }
            api.delete(&id).await?;
            show_list(api).await
        }
    }
}

async fn show_list(api: &BlogApi) -> anyhow::Result<()> {
    let posts = api.list().await?;
    print!("{}", views::render_list(&posts));
    Ok(())
}

/// Save the form, announce it, then return to the home page after a pause.
async fn submit(
    api: &BlogApi,
    mode: FormMode,
    form: PostForm,
    redirect_delay: Duration,
) -> anyhow::Result<()> {
    println!("{}\n", mode.heading());
    form.validate()?;

    match &mode {
        FormMode::Create => api.create(&form.to_create()).await?,
        FormMode::Edit { id } => api.update(id, &form.to_update()).await?,
    };

    println!("{}\n", mode.success_message());
    tokio::time::sleep(redirect_delay).await;
    show_list(api).await
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{question} [y/N] ").as_bytes())
        .await
        .context("writing prompt")?;
    stdout.flush().await.context("writing prompt")?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await
        .context("reading confirmation")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
