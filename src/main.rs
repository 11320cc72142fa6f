use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlet::Repository;
use gitlet::commands::plumbing::update_index::UpdateIndexFlags;
use is_terminal::IsTerminal;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A tiny version control system",
    long_about = "Gitlet keeps content-addressed snapshots of a directory, \
    with branches, three-way merges and remotes on the local filesystem.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(long, help = "Create a repository without a working copy")]
        bare: bool,
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Add file contents to the index")]
    Add {
        #[arg(index = 1, help = "File or directory to add")]
        path: String,
    },
    #[command(name = "rm", about = "Remove files from the working copy and the index")]
    Rm {
        #[arg(index = 1)]
        path: String,
        #[arg(short, help = "Allow recursive removal of a directory")]
        r: bool,
        #[arg(short, help = "Force removal")]
        f: bool,
    },
    #[command(name = "commit", about = "Record the index as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "branch", about = "List branches, or create one at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: Option<String>,
    },
    #[command(name = "checkout", about = "Switch to a branch or commit")]
    Checkout {
        #[arg(index = 1)]
        reference: String,
    },
    #[command(name = "diff", about = "Show changed paths between snapshots")]
    Diff {
        #[arg(long = "name-status", help = "Show only names and status of changed files")]
        name_status: bool,
        #[arg(index = 1)]
        ref1: Option<String>,
        #[arg(index = 2)]
        ref2: Option<String>,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "log", about = "Show commit history")]
    Log,
    #[command(name = "remote", about = "Manage configured remotes")]
    Remote {
        #[arg(index = 1)]
        command: String,
        #[arg(index = 2)]
        name: String,
        #[arg(index = 3)]
        url: String,
    },
    #[command(name = "fetch", about = "Download objects and refs from a remote")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: Option<String>,
    },
    #[command(name = "merge", about = "Join another commit into the current branch")]
    Merge {
        #[arg(index = 1)]
        reference: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "push", about = "Update a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
        #[arg(short, help = "Allow non-fast-forward updates")]
        f: bool,
    },
    #[command(name = "clone", about = "Copy a repository into a new directory")]
    Clone {
        #[arg(index = 1)]
        source: String,
        #[arg(index = 2)]
        target: String,
        #[arg(long, help = "Create a repository without a working copy")]
        bare: bool,
    },
    #[command(name = "write-tree", about = "Store the index as a tree object")]
    WriteTree,
    #[command(name = "update-index", about = "Stage or unstage a single file")]
    UpdateIndex {
        #[arg(index = 1)]
        path: String,
        #[arg(long, help = "Start tracking a file not yet in the index")]
        add: bool,
        #[arg(long, help = "Stop tracking a file missing from the working copy")]
        remove: bool,
    },
    #[command(name = "update-ref", about = "Point a ref at a commit")]
    UpdateRef {
        #[arg(index = 1)]
        reference: String,
        #[arg(index = 2)]
        target: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as a blob and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
}

fn discover(pwd: &Path) -> Result<Repository> {
    Repository::discover(pwd, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GITLET_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { bare, path } => {
            let path = match path {
                Some(path) => pwd.join(path),
                None => pwd,
            };

            Repository::new(&path, *bare, Box::new(std::io::stdout()))?.init()?
        }
        Commands::Add { path } => discover(&pwd)?.add(path)?,
        Commands::Rm { path, r, f } => discover(&pwd)?.rm(path, *r, *f)?,
        Commands::Commit { message } => discover(&pwd)?.commit(message)?,
        Commands::Branch { name } => discover(&pwd)?.branch(name.as_deref())?,
        Commands::Checkout { reference } => discover(&pwd)?.checkout(reference)?,
        Commands::Diff {
            name_status,
            ref1,
            ref2,
        } => discover(&pwd)?.diff(ref1.as_deref(), ref2.as_deref(), *name_status)?,
        Commands::Status => discover(&pwd)?.status()?,
        Commands::Log => discover(&pwd)?.log()?,
        Commands::Remote { command, name, url } => discover(&pwd)?.remote(command, name, url)?,
        Commands::Fetch { remote, branch } => discover(&pwd)?.fetch(remote, branch.as_deref())?,
        Commands::Merge { reference } => discover(&pwd)?.merge(reference)?,
        Commands::Pull { remote, branch } => discover(&pwd)?.pull(remote, branch)?,
        Commands::Push { remote, branch, f } => discover(&pwd)?.push(remote, branch, *f)?,
        Commands::Clone {
            source,
            target,
            bare,
        } => Repository::clone_repository(
            &pwd,
            source,
            target,
            *bare,
            Box::new(std::io::stdout()),
        )?,
        Commands::WriteTree => discover(&pwd)?.write_tree()?,
        Commands::UpdateIndex { path, add, remove } => {
            let mut flags = UpdateIndexFlags::empty();
            flags.set(UpdateIndexFlags::ADD, *add);
            flags.set(UpdateIndexFlags::REMOVE, *remove);

            discover(&pwd)?.update_index(path, flags)?
        }
        Commands::UpdateRef { reference, target } => {
            discover(&pwd)?.update_ref(reference, target)?
        }
        Commands::HashObject { write, file } => discover(&pwd)?.hash_object(file, *write)?,
        Commands::CatFile { sha } => discover(&pwd)?.cat_file(sha)?,
    }

    Ok(())
}
