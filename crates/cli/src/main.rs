use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{load_dataset, parse_ratings};
use graph::GraphStore;
use recommender::{RankedMovie, RecommendationEngine, catalog, evaluate_accuracy};
use std::path::PathBuf;
use std::time::Instant;

/// CineGraph - movie recommendations over a bipartite user-movie graph
#[derive(Parser)]
#[command(name = "cinegraph")]
#[command(about = "Movie recommendations from co-rating similarity", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV
    #[arg(long, default_value = "data/movies_metadata.csv")]
    movies: PathBuf,

    /// Path to the rating history CSV
    #[arg(long, default_value = "data/ratings_small.csv")]
    ratings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend 3 movies from 3 liked titles and a genre
    Recommend {
        /// A liked movie title (pass exactly three times)
        #[arg(long = "liked")]
        liked: Vec<String>,

        /// Preferred genre for the top 3
        #[arg(long)]
        genre: String,

        /// Print the result as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Submit a (title, rating) review into the graph
    Review {
        /// Movie title (created if unknown)
        #[arg(long)]
        title: String,

        /// Rating on the 0-10 scale
        #[arg(long)]
        rating: f32,
    },

    /// Look up a movie's average rating
    Rating {
        /// Movie title to look up
        #[arg(long)]
        title: String,
    },

    /// List every genre in the catalog
    Genres,

    /// List the most popular movies (by rating, 30+ raters)
    Popular {
        /// Number of titles to show
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Evaluate recommendation accuracy against a held-out rating file
    Evaluate {
        /// Path to the held-out rating CSV
        #[arg(long)]
        holdout: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!(
        "Loading catalog from {} and ratings from {}...",
        cli.movies.display(),
        cli.ratings.display()
    );
    let start = Instant::now();
    let dataset = load_dataset(&cli.movies, &cli.ratings).context("Failed to load dataset")?;

    let mut store = GraphStore::new();
    store
        .add_movies_users(&dataset.movies)
        .context("Failed to build the graph")?;
    store
        .validate()
        .context("Graph failed validation after load")?;

    let (users, movies, edges) = store.counts();
    println!(
        "{} Built graph with {} users, {} movies, {} edges in {:?}",
        "✓".green(),
        users,
        movies,
        edges,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend { liked, genre, json } => {
            handle_recommend(&store, &liked, &genre, json)?
        }
        Commands::Review { title, rating } => handle_review(&mut store, &title, rating)?,
        Commands::Rating { title } => handle_rating(&store, &title),
        Commands::Genres => handle_genres(&store),
        Commands::Popular { limit } => handle_popular(&store, limit),
        Commands::Evaluate { holdout } => handle_evaluate(&store, &holdout)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(store: &GraphStore, liked: &[String], genre: &str, json: bool) -> Result<()> {
    let engine = RecommendationEngine::new();
    let recommendations = engine
        .recommend(store, liked, genre)
        .context("Recommendation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'review' command
fn handle_review(store: &mut GraphStore, title: &str, rating: f32) -> Result<()> {
    let receipt = store
        .submit_review(title, rating)
        .context("Review rejected")?;

    println!("{}", "Thank you for your review!".bold().blue());
    if receipt.created_movie {
        println!("{}Added {} to the catalog", "• ".green(), title.bold());
    }
    println!(
        "{}{} now averages {:.2} over {} ratings",
        "• ".green(),
        title.bold(),
        receipt.avg_rating,
        receipt.num_raters
    );
    Ok(())
}

/// Handle the 'rating' command
fn handle_rating(store: &GraphStore, title: &str) {
    match store.avg_rating(title) {
        Some(avg) => println!("{}: average rating {}", title.bold(), format!("{:.2}", avg).green()),
        None => println!("No movie titled {:?} in the graph", title),
    }
}

/// Handle the 'genres' command
fn handle_genres(store: &GraphStore) {
    println!("{}", "Genres in the catalog:".bold().blue());
    for genre in store.genres() {
        println!("  - {}", genre);
    }
}

/// Handle the 'popular' command
fn handle_popular(store: &GraphStore, limit: usize) {
    println!("{}", "Most popular movies:".bold().blue());
    for (rank, title) in catalog::popular_movies(store, limit).iter().enumerate() {
        let avg = store.avg_rating(title).unwrap_or(0.0);
        println!(
            "{}. {} (avg {:.2})",
            (rank + 1).to_string().green(),
            title,
            avg
        );
    }
}

/// Handle the 'evaluate' command
fn handle_evaluate(store: &GraphStore, holdout: &PathBuf) -> Result<()> {
    let holdout_ratings = parse_ratings(holdout).context("Failed to load holdout ratings")?;
    let engine = RecommendationEngine::new();
    let report = evaluate_accuracy(store, &engine, &holdout_ratings)
        .context("Evaluation failed")?;

    println!("{}", "Recommendation accuracy:".bold().blue());
    for user in &report.per_user {
        println!(
            "  user {}: {:.1}% of held-out watches recommended",
            user.user_id,
            user.percent_matched * 100.0
        );
    }
    println!(
        "{} Mean across {} users: {:.1}%",
        "✓".green(),
        report.per_user.len(),
        report.mean_matched * 100.0
    );
    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[RankedMovie]) {
    println!("{}", "Here are your top 3 recommended movies:".bold().blue());
    for (rank, movie) in recommendations.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), movie.title.bold());
        println!("   Genre: {}", movie.genres.join(", "));
        println!("   Rating: {:.2}", movie.avg_rating);
    }
}
