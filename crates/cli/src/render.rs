//! Terminal drawing of dashboard views.

use colored::Colorize;
use dashboard::{CompareView, CountryPanel, DashboardView, GenreChart, PopularityChart, SingleCountryView};

/// Width of the longest bar, in characters
const BAR_WIDTH: usize = 40;
/// Titles longer than this are cut in chart labels
const LABEL_WIDTH: usize = 28;

pub fn print_view(view: &DashboardView) {
    match view {
        DashboardView::Single(view) => print_single(view),
        DashboardView::Compare(view) => print_compare(view),
    }
}

fn print_single(view: &SingleCountryView) {
    println!();
    println!("{}", format!("📍 {}", view.country).bold().blue());

    if let Some(warning) = view.warning() {
        println!("{}", warning.yellow());
        return;
    }

    for (rank, movie) in view.details.iter().enumerate() {
        println!(
            "{}. {}",
            (rank + 1).to_string().green(),
            movie.title.bold()
        );
        println!(
            "   Popularity: {}   Rating: {}",
            movie.popularity_label(),
            movie.rating_label()
        );
        println!("   {}", movie.overview.dimmed());
        if let Some(homepage) = &movie.homepage {
            println!("   {}", homepage.underline());
        }
    }

    println!();
    println!("{}", "📊 Visual Insights".bold());
    print_panel(&view.panel);

    if let Some(name) = view.export_name() {
        println!("Type 'export' to save {}", name.cyan());
    }
}

fn print_compare(view: &CompareView) {
    println!();
    println!(
        "{}",
        format!("🆚 {} vs {}", view.primary.country, view.secondary.country)
            .bold()
            .blue()
    );
    print_panel(&view.primary);
    print_panel(&view.secondary);
}

fn print_panel(panel: &CountryPanel) {
    print_popularity(&panel.popularity);
    print_genres(&panel.genres);
}

fn print_popularity(chart: &PopularityChart) {
    println!();
    println!("{}", chart.title.bold());
    if chart.bars.is_empty() {
        println!("  (no data)");
        return;
    }
    let max = chart.max_value();
    for bar in &chart.bars {
        println!(
            "  {:<width$} {} {:.2}",
            truncate(&bar.label),
            bar_of(bar.value, max).green(),
            bar.value,
            width = LABEL_WIDTH
        );
    }
}

fn print_genres(chart: &GenreChart) {
    println!();
    println!("{}", chart.title.bold());
    if chart.slices.is_empty() {
        println!("  (no data)");
        return;
    }
    for slice in &chart.slices {
        println!(
            "  {:<width$} {} {} ({:.1}%)",
            truncate(&slice.label),
            bar_of(slice.share, 1.0).magenta(),
            slice.count,
            slice.share * 100.0,
            width = LABEL_WIDTH
        );
    }
}

fn bar_of(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let mut cut: String = label.chars().take(LABEL_WIDTH - 1).collect();
    cut.push('…');
    cut
}
