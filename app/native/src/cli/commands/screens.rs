//! Screen listing command.

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::BackdropConfig;
use crate::error::BackdropError;
use crate::screen::{DetectedScreen, query_screens, screen_set};

#[derive(Tabled)]
struct ScreenRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Resolution")]
    resolution: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Primary")]
    primary: String,
}

fn rows(screens: &[DetectedScreen]) -> Vec<ScreenRow> {
    screens
        .iter()
        .enumerate()
        .map(|(index, screen)| ScreenRow {
            index,
            name: screen.name.clone(),
            resolution: format!("{}x{}", screen.geometry.width, screen.geometry.height),
            position: format!("{}, {}", screen.geometry.x, screen.geometry.y),
            primary: output::format_bool(screen.primary),
        })
        .collect()
}

/// Renders the screens as a table.
fn render_table(screens: &[DetectedScreen]) -> String {
    Table::new(rows(screens))
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(2..4)).with(Alignment::right()))
        .with(Modify::new(Columns::new(4..5)).with(Alignment::center()))
        .to_string()
}

/// Lists the detected screens.
///
/// # Errors
///
/// Returns an error if the geometry command fails.
pub fn execute(json: bool, config: &BackdropConfig) -> Result<(), BackdropError> {
    let screens = query_screens(&config.geometry_command)?;

    if json {
        let value = serde_json::to_value(&screens).unwrap_or_default();
        output::print_highlighted_json(&value);
        return Ok(());
    }

    if screens.is_empty() {
        println!("{}", "No screens detected.".dimmed());
        return Ok(());
    }

    let bounds = screen_set(&screens)?.bounds();
    println!("{}", format!("Screens ({})", screens.len()).bold());
    println!("{}", render_table(&screens));
    println!("{} {}x{}", "Canvas:".dimmed(), bounds.width, bounds.height);
    Ok(())
}
