use data_loader::MovieCatalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let movies = Path::new("data/tmdb_5000_movies.csv");
    let credits = Path::new("data/tmdb_5000_credits.csv");

    println!("Loading TMDb 5000 tables...\n");

    let start = Instant::now();
    let catalog = MovieCatalog::load(movies, credits).expect("Failed to load tables");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Country rows: {}", catalog.len());
    println!("Countries: {}", catalog.countries().len());
}
