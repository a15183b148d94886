mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use todoboard::api::{ApiConfig, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(
    name = "td",
    version,
    about = "To-do list client for the hosted to-do API"
)]
struct Cli {
    /// Base URL of the to-do service
    #[arg(long, env = "TODOBOARD_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Tenant id all items are stored under
    #[arg(long, env = "TODOBOARD_TENANT", default_value = "todoboard", global = true)]
    tenant: String,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the to-do and done sections
    List {
        /// Page of the to-do section [default: 1]
        #[arg(long, conflicts_with = "unified")]
        todo_page: Option<usize>,
        /// Page of the done section [default: 1]
        #[arg(long, conflicts_with = "unified")]
        done_page: Option<usize>,
        /// Page both sections together (one shared cursor)
        #[arg(long)]
        unified: bool,
        /// Shared page, only with --unified [default: 1]
        #[arg(long, requires = "unified")]
        page: Option<usize>,
        /// Items per page
        #[arg(long, default_value_t = todoboard::board::DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Add a new task
    Add {
        /// Task name
        name: String,
    },
    /// Show one task in detail
    Show {
        /// Task ID
        id: u64,
    },
    /// Mark a task done, or not done again
    Toggle {
        /// Task ID
        id: u64,
    },
    /// Edit a task's name, memo or image
    Edit {
        /// Task ID
        id: u64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New memo (overwrites previous value)
        #[arg(short, long)]
        memo: Option<String>,
        /// Image file to upload and attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },
    /// Run an in-memory stand-in of the to-do service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    todoboard::logging::init_tracing(cli.verbose, cli.quiet);

    let config = ApiConfig::new(cli.base_url, cli.tenant);

    let result = match cli.command {
        Commands::List {
            todo_page,
            done_page,
            unified,
            page,
            page_size,
        } => {
            let pages = if unified {
                commands::list::Pages::Unified(page.unwrap_or(1))
            } else {
                commands::list::Pages::PerSection {
                    todo: todo_page.unwrap_or(1),
                    done: done_page.unwrap_or(1),
                }
            };
            commands::list::run(&config, pages, page_size, cli.json).await
        }
        Commands::Add { name } => commands::add::run(&config, &name, cli.json).await,
        Commands::Show { id } => commands::show::run(&config, id, cli.json).await,
        Commands::Toggle { id } => commands::toggle::run(&config, id, cli.json).await,
        Commands::Edit {
            id,
            name,
            memo,
            image,
        } => {
            commands::edit::run(
                &config,
                id,
                name.as_deref(),
                memo.as_deref(),
                image.as_deref(),
                cli.json,
            )
            .await
        }
        Commands::Delete { id } => commands::delete::run(&config, id, cli.json).await,
        Commands::Serve { port } => todoboard::web::serve(port)
            .await
            .map_err(todoboard::Error::Server),
    };

    if let Err(e) = result {
        // Remote failures were already shown by the notifier.
        if !e.is_remote() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}
