//! # Dashboard Crate
//!
//! Per-country popularity dashboard over the movie catalog.
//!
//! ## Components
//!
//! - **selection**: Primary country, compare toggle and second country,
//!   checked against the catalog
//! - **ranking**: Top 10 by popularity and genre counts
//! - **charts**: Popularity bars and the genre distribution
//! - **view**: `build_view`, the whole dashboard as data for one selection
//! - **export**: `top10_<country>.csv`
//! - **session**: Text command loop state for interactive front ends
//!
//! ## Example Usage
//!
//! ```ignore
//! use dashboard::{DashboardView, Selection, build_view};
//! use data_loader::MovieCatalog;
//!
//! let catalog = MovieCatalog::load(movies_path, credits_path)?;
//! let selection = Selection::new("France").resolve(&catalog)?;
//!
//! if let DashboardView::Single(view) = build_view(&catalog, &selection) {
//!     for movie in &view.details {
//!         println!("{} ({})", movie.title, movie.popularity_label());
//!     }
//! }
//! ```
//!
//! The catalog is loaded once and borrowed by everything here; views are
//! recomputed on every selection change and never cached.

// Public modules
pub mod error;
pub mod selection;
pub mod ranking;
pub mod charts;
pub mod view;
pub mod export;
pub mod session;

// Re-export commonly used types
pub use charts::{Bar, GenreChart, PopularityChart, SLICE_PULL, Slice};
pub use error::{DashboardError, Result};
pub use export::{export_csv, export_file_name, export_to_dir};
pub use ranking::{GenreSlice, TOP_N, genre_counts, top10, top_n};
pub use selection::{ResolvedSelection, Selection, secondary_options};
pub use session::{Command, HELP, Outcome, Session};
pub use view::{
    CompareView, CountryPanel, DashboardView, MovieDetail, NO_MOVIES, NO_OVERVIEW,
    SingleCountryView, build_view,
};
