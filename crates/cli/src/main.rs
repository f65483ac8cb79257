use anyhow::Context;
use clap::{Parser, Subcommand};
use libraryhub_app::modules::catalog::{
    models::KNOWN_GENRES,
    pipeline::{visible, GenreFilter, SortKey},
    seed,
};
use libraryhub_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "libraryhub", version, about = "LibraryHub catalog server and tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the sample catalog as JSON lines, filtered and sorted
    Catalog {
        /// Case-insensitive match on title or author
        #[arg(long, default_value = "")]
        search: String,
        /// Exact genre, or `all`
        #[arg(long, default_value = "all")]
        genre: String,
        /// popularity, title, author or year
        #[arg(long, default_value = "popularity")]
        sort: String,
    },
    /// List the genres offered when adding a book
    Genres,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load LibraryHub settings")?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            libraryhub_telemetry::init(&settings.telemetry)?;
            libraryhub_app::bootstrap::serve(settings).await
        }
        Command::Catalog {
            search,
            genre,
            sort,
        } => {
            let books = seed::sample_books();
            let shown = visible(
                &books,
                &search,
                &GenreFilter::parse(&genre),
                SortKey::parse_lenient(&sort),
            );
            for book in shown {
                println!("{}", serde_json::to_string(book)?);
            }
            Ok(())
        }
        Command::Genres => {
            for genre in KNOWN_GENRES {
                println!("{genre}");
            }
            Ok(())
        }
    }
}
