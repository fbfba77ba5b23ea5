use clap::{Args, Parser, Subcommand};
use movie_api::{Director, Movie};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "movie-cli")]
#[command(about = "Command-line client for the movie API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all movies
    List {
        /// Print a human-readable summary instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Show one movie
    Get { id: String },
    /// Add a movie; the server assigns its id
    Create(MovieArgs),
    /// Replace a movie
    Update {
        id: String,
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Remove a movie
    Delete { id: String },
}

#[derive(Args)]
struct MovieArgs {
    #[arg(long, default_value = "")]
    isbn: String,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
}

impl From<MovieArgs> for Movie {
    fn from(args: MovieArgs) -> Self {
        Movie::new(
            String::new(),
            args.isbn,
            args.title,
            Director::new(args.first_name, args.last_name),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let collection = format!("{}/api/movies", cli.url.trim_end_matches('/'));

    match cli.command {
        Commands::List { text: true } => {
            let res = client.get(&collection).send().await?;
            if !res.status().is_success() {
                return print_response(res).await;
            }
            let movies: Vec<Movie> = res.json().await?;
            print!("{}", render_summary(&movies));
        }
        Commands::List { text: false } => {
            print_response(client.get(&collection).send().await?).await?;
        }
        Commands::Get { id } => {
            print_response(client.get(format!("{}/{}", collection, id)).send().await?).await?;
        }
        Commands::Create(args) => {
            let res = client.post(&collection).json(&Movie::from(args)).send().await?;
            print_response(res).await?;
        }
        Commands::Update { id, movie } => {
            let res = client
                .put(format!("{}/{}", collection, id))
                .json(&Movie::from(movie))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Delete { id } => {
            print_response(client.delete(format!("{}/{}", collection, id)).send().await?).await?;
        }
    }

    Ok(())
}

fn render_summary(movies: &[Movie]) -> String {
    let mut out = String::from("All movies:\n");
    for movie in movies {
        let (first, last) = movie
            .director
            .as_ref()
            .map(|d| (d.first_name.as_str(), d.last_name.as_str()))
            .unwrap_or(("", ""));
        out.push_str(&format!("ID: {}\n", movie.id));
        out.push_str(&format!("ISBN: {}\n", movie.isbn));
        out.push_str(&format!("Title: {}\n", movie.title));
        out.push_str(&format!("Director: {} {}\n\n", first, last));
    }
    out
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: movie API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
