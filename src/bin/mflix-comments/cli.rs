use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for mflix-comments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// MongoDB connection string
    #[arg(long, global = true, env = "MFLIX_DB_URI")]
    pub mongo_uri: Option<String>,

    /// Database holding the comments collection
    #[arg(long, global = true, env = "MFLIX_NS")]
    pub ns: Option<String>,

    /// YAML file with `mongo_uri` and `namespace`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Post a comment on a movie
    Add(AddArgs),

    /// Edit the text of one of your comments
    Update(UpdateArgs),

    /// Delete one of your comments
    Delete(DeleteArgs),

    /// List the 20 most active commenters
    Top,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// _id of the movie being commented on
    #[arg(long)]
    pub movie_id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub text: String,

    /// RFC 3339 timestamp, defaults to now
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub comment_id: String,

    /// Email of the comment owner
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub text: String,

    /// RFC 3339 timestamp, defaults to now
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub comment_id: String,

    /// Email of the comment owner
    #[arg(long)]
    pub email: String,
}
