mod cli;

use crate::cli::{Cli, Command};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use mflix_comments::{mongo, CommentsDao, Config, User};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::from_env(),
    }
    .with_overrides(args.mongo_uri.clone(), args.ns.clone());

    let client = mongo::connect(&config.mongo_uri).await?;
    let dao = CommentsDao::with_client(&client, &config.namespace)?;

    let output = match args.command {
        Command::Add(add) => {
            let user = User::new(add.name, add.email);
            let date = parse_date(add.date.as_deref())?;
            let res = dao.add_comment(&add.movie_id, &user, &add.text, date).await?;
            json!({ "insertedId": res.inserted_id.as_object_id().map(|id| id.to_hex()) })
        }
        Command::Update(update) => {
            let date = parse_date(update.date.as_deref())?;
            let res = dao
                .update_comment(&update.comment_id, &update.email, &update.text, date)
                .await?;
            json!({ "matchedCount": res.matched_count, "modifiedCount": res.modified_count })
        }
        Command::Delete(delete) => {
            let res = dao
                .delete_comment(&delete.comment_id, &delete.email)
                .await
                .context("Unable to delete comment")?;
            json!({ "deletedCount": res.deleted_count })
        }
        Command::Top => serde_json::to_value(dao.most_active_commenters().await?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_date(value: Option<&str>) -> Result<DateTime<Utc>> {
    match value {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("'{}' is not an RFC 3339 timestamp", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
