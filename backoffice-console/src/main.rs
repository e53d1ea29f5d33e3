use std::sync::Arc;

use backoffice_console::config::ConsoleConfig;
use backoffice_console::error::ConsoleError;
use backoffice_console::page::SearchPage;
use backoffice_console::source::InMemorySource;
use backoffice_console::{fixtures, logging, paths};
use backoffice_engine::form::Values;
use backoffice_engine::table::{Column, PagerAction, TableView};
use log::info;
use serde::Serialize;
use serde_json::Value;

/// Search criteria for the institutions page.
#[derive(Debug, Default, Serialize)]
struct InstitutionFilter {
    name: String,
    #[serde(rename = "country.name")]
    country: String,
}

fn institution_columns() -> Vec<Column> {
    vec![
        Column::new("Code", "code"),
        Column::new("Name", "name"),
        Column::new("Country", "country.name"),
        Column::new("Status", "active").cell(|value, _| {
            match value {
                Some(Value::Bool(true)) => "Active",
                _ => "Inactive",
            }
            .to_string()
        }),
        Column::new("Limit", "amount"),
    ]
}

fn print_view(title: &str, view: &TableView) {
    println!("== {title}");
    println!("{}", view.headers.join(" | "));
    for row in &view.rows {
        println!("{}", row.cells.join(" | "));
    }
    println!(
        "page {}/{} ({}), {} per page",
        view.pager.page_index + 1,
        view.pager.page_count.max(1),
        view.pager.label,
        view.pager.page_size
    );
    println!();
}

async fn run(config: ConsoleConfig) -> Result<(), ConsoleError> {
    let source = Arc::new(InMemorySource::new(fixtures::institutions(
        config.demo_records,
    )));
    let mut page = SearchPage::new(source, institution_columns(), &config.table, Values::new())?;
    page.form().reset_to_record(&InstitutionFilter::default())?;
    page.mount().await?;
    page.search().await?;
    print_view("All institutions", &page.render());

    page.on_pager(PagerAction::Next).await?;
    print_view("Next page", &page.render());

    if !page.on_pager(PagerAction::Last).await?.is_handled() {
        info!("Already on the last page");
    }
    print_view("Last page", &page.render());

    let largest = config.table.page_sizes.iter().copied().max().unwrap_or_default();
    page.on_pager(PagerAction::SetPageSize(largest)).await?;
    print_view("Larger pages", &page.render());

    page.form().update_value_by_name("country.name", "Kenya")?;
    page.search().await?;
    print_view("Filtered by country", &page.render());

    page.form().reset_to_record(&InstitutionFilter::default())?;
    page.search().await?;
    print_view("Filters cleared", &page.render());

    Ok(())
}

#[tokio::main]
async fn main() {
    let config_path = paths::config_file();
    let loaded = match ConsoleConfig::load(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    match config.level_filter().map(logging::init) {
        Ok(Ok(log_path)) => info!("Logging to {}", log_path.display()),
        Ok(Err(e)) | Err(e) => eprintln!("Logging disabled: {}", e),
    }
    if from_file {
        info!("Loaded config from {}", config_path.display());
    } else {
        info!("No config at {}, using defaults", config_path.display());
    }

    if let Err(e) = run(config).await {
        eprintln!("Error: {}", e);
    }
}
