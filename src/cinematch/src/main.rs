//! CineMatch — content-based and collaborative movie recommendations.
//!
//! Thin CLI over the engine crates: loads the movie/rating tables,
//! builds the engine the chosen command needs, and prints the result.

use cine_catalog::{DataLoader, MovieCatalog};
use cine_collab::CfEngine;
use cine_content::ContentEngine;
use cine_core::config::AppConfig;
use cine_core::types::{CfMode, QueryOutput, RatedHit, SimilarityHit};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "cinematch")]
#[command(about = "Movie recommendations via content similarity and collaborative filtering")]
#[command(version)]
struct Cli {
    /// Directory holding movies.json and ratings.json (overrides config)
    #[arg(long, env = "CINEMATCH__DATA_DIR")]
    data_dir: Option<String>,

    /// Collaborative filtering mode: user or item (overrides config)
    #[arg(long, env = "CINEMATCH__CF__MODE")]
    cf_mode: Option<String>,

    /// Neighborhood size for rating prediction (overrides config)
    #[arg(long, env = "CINEMATCH__CF__NEIGHBORS")]
    neighbors: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Movies most similar to a given movie (content-based)
    Similar {
        movie_id: u32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Rank the catalog against a list of genres (content-based)
    Genres {
        #[arg(required = true)]
        genres: Vec<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
    },
    /// Top movies by critic rating with optional filters
    Top {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 7.0)]
        min_rating: f64,
        #[arg(long)]
        genre: Vec<String>,
        #[arg(long)]
        year_from: Option<i32>,
    },
    /// Movies by director (case-insensitive substring match)
    Director {
        name: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Search movie titles
    Search { query: String },
    /// Movies released in a given year
    Year { year: i32 },
    /// A user's rating history
    UserRatings { user_id: u32 },
    /// Predict the rating a user would give a movie
    Predict { user_id: u32, movie_id: u32 },
    /// Personalized recommendations for a user
    Recommend {
        user_id: u32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 3.0)]
        min_predicted: f64,
    },
    /// Users with the most similar taste (user-based mode)
    SimilarUsers {
        user_id: u32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Movies with the most similar rating vectors (item-based mode)
    SimilarMovies {
        movie_id: u32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Dataset statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(mode) = cli.cf_mode.as_deref() {
        config.cf.mode = mode.parse::<CfMode>()?;
    }
    if let Some(neighbors) = cli.neighbors {
        config.cf.neighbors = neighbors;
    }

    info!(data_dir = %config.data_dir, cf_mode = %config.cf.mode, "Configuration loaded");

    let loader = DataLoader::new(&config.data_dir);

    match cli.command {
        Command::Similar { movie_id, limit } => {
            let movies = loader.load_movies()?;
            let engine = ContentEngine::build(movies, &config.content)?;
            print_output(&QueryOutput::Similarity(engine.similar_to(movie_id, limit)));
        }
        Command::Genres {
            genres,
            limit,
            min_rating,
        } => {
            let movies = loader.load_movies()?;
            let engine = ContentEngine::build(movies, &config.content)?;
            print_output(&QueryOutput::Similarity(engine.query_by_genres(
                &genres,
                limit,
                min_rating,
            )));
        }
        Command::Top {
            limit,
            min_rating,
            genre,
            year_from,
        } => {
            let movies = loader.load_movies()?;
            let engine = ContentEngine::build(movies, &config.content)?;
            let genres = if genre.is_empty() {
                None
            } else {
                Some(genre.as_slice())
            };
            print_output(&QueryOutput::Rated(engine.query_by_rating(
                limit, min_rating, genres, year_from,
            )));
        }
        Command::Director { name, limit } => {
            let movies = loader.load_movies()?;
            let engine = ContentEngine::build(movies, &config.content)?;
            print_output(&QueryOutput::Rated(engine.query_by_director(&name, limit)));
        }
        Command::Search { query } => {
            let catalog = MovieCatalog::new(loader.load_movies()?);
            let hits: Vec<RatedHit> = catalog
                .search_title(&query)
                .into_iter()
                .map(|m| RatedHit {
                    movie_id: m.id,
                    title: m.title.clone(),
                    rating: m.rating,
                    genres: m.genres.clone(),
                    year: m.year,
                })
                .collect();
            print_output(&QueryOutput::Rated(hits));
        }
        Command::Year { year } => {
            let catalog = MovieCatalog::new(loader.load_movies()?);
            let hits: Vec<RatedHit> = catalog
                .by_year(year)
                .into_iter()
                .map(|m| RatedHit {
                    movie_id: m.id,
                    title: m.title.clone(),
                    rating: m.rating,
                    genres: m.genres.clone(),
                    year: m.year,
                })
                .collect();
            print_output(&QueryOutput::Rated(hits));
        }
        Command::UserRatings { user_id } => {
            let (movies, ratings) = loader.load_all()?;
            let catalog = MovieCatalog::new(movies);
            let hits = catalog.ratings_for_user(&ratings, user_id);
            if hits.is_empty() {
                println!("No results.");
            } else {
                println!("{:<4} {:<45} {:>6} {:>6}", "#", "Title", "Score", "Year");
                for (i, hit) in hits.iter().enumerate() {
                    println!(
                        "{:<4} {:<45} {:>6.1} {:>6}",
                        i + 1,
                        hit.title,
                        hit.rating,
                        hit.year
                    );
                }
            }
        }
        Command::Predict { user_id, movie_id } => {
            let (movies, ratings) = loader.load_all()?;
            let engine = CfEngine::build(&ratings, &movies, config.cf.mode);
            match engine.predict_rating(user_id, movie_id, config.cf.neighbors) {
                Some(predicted) => println!("Predicted rating: {predicted:.2}/5.0"),
                None => println!("No prediction possible for this user/movie pair."),
            }
        }
        Command::Recommend {
            user_id,
            limit,
            min_predicted,
        } => {
            let (movies, ratings) = loader.load_all()?;
            let engine = CfEngine::build(&ratings, &movies, config.cf.mode);
            print_output(&QueryOutput::Predicted(engine.recommend_for_user(
                user_id,
                limit,
                config.cf.neighbors,
                min_predicted,
            )));
        }
        Command::SimilarUsers { user_id, limit } => {
            let (movies, ratings) = loader.load_all()?;
            let engine = CfEngine::build(&ratings, &movies, config.cf.mode);
            let neighbors = engine.similar_users(user_id, limit)?;
            if neighbors.is_empty() {
                println!("No results.");
            }
            for (i, (uid, score)) in neighbors.iter().enumerate() {
                println!("{:2}. user {:<8} similarity {:.4}", i + 1, uid, score);
            }
        }
        Command::SimilarMovies { movie_id, limit } => {
            let (movies, ratings) = loader.load_all()?;
            let catalog = MovieCatalog::new(movies.clone());
            let engine = CfEngine::build(&ratings, &movies, config.cf.mode);
            let hits: Vec<SimilarityHit> = engine
                .similar_movies(movie_id, limit)?
                .into_iter()
                .map(|(id, title, score)| {
                    let (rating, year) = catalog
                        .get(id)
                        .map(|m| (m.rating, m.year))
                        .unwrap_or((0.0, 0));
                    SimilarityHit {
                        movie_id: id,
                        title,
                        score,
                        rating,
                        year,
                    }
                })
                .collect();
            print_output(&QueryOutput::Similarity(hits));
        }
        Command::Stats => {
            let (movies, ratings) = loader.load_all()?;
            let catalog = MovieCatalog::new(movies);
            let stats = catalog.statistics(&ratings);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

/// Render a query result. Each variant has its own layout; the variant
/// tag replaces the tuple-shape sniffing the old reporting code did.
fn print_output(output: &QueryOutput) {
    if output.is_empty() {
        println!("No results.");
        return;
    }
    match output {
        QueryOutput::Similarity(hits) => {
            println!("{:<4} {:<45} {:>8} {:>6} {:>6}", "#", "Title", "Score", "IMDb", "Year");
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{:<4} {:<45} {:>8.4} {:>6.1} {:>6}",
                    i + 1,
                    hit.title,
                    hit.score,
                    hit.rating,
                    hit.year
                );
            }
        }
        QueryOutput::Rated(hits) => {
            println!("{:<4} {:<45} {:>6} {:<25} {:>6}", "#", "Title", "IMDb", "Genres", "Year");
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{:<4} {:<45} {:>6.1} {:<25} {:>6}",
                    i + 1,
                    hit.title,
                    hit.rating,
                    hit.genres.join("|"),
                    hit.year
                );
            }
        }
        QueryOutput::Predicted(hits) => {
            println!("{:<4} {:<45} {:>9}", "#", "Title", "Predicted");
            for (i, hit) in hits.iter().enumerate() {
                println!("{:<4} {:<45} {:>9.2}", i + 1, hit.title, hit.predicted);
            }
        }
    }
}
