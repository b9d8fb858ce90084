use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use importer::{
    DirectorySource, LeaderboardSource, LeaderboardValidator, discover_json_files, load_file,
};
use leaderboard::dto::leaderboard::{ColumnView, EntryView, GroupView};
use leaderboard::{
    CompetitorQuery, EntryFilter, GroupsView, LeaderboardConfig, LeaderboardSummary,
    LeaderboardView, Page, PageWindow, SortMode, ViewOptions, combine, group_by_competitor,
    search,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(about = "Normalize, rank and inspect exported racing leaderboards", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::Args)]
struct ViewArgs {
    /// gap, gapPercent, position or date
    #[arg(long, default_value = "gap")]
    sort: SortMode,

    #[arg(long)]
    page: Option<usize>,

    #[arg(long, env = "LEADERBOARD_PAGE_SIZE", default_value_t = 100)]
    page_size: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one leaderboard
    Show {
        file: PathBuf,

        #[command(flatten)]
        display: ViewArgs,

        /// Open the page holding this driver
        #[arg(long)]
        driver: Option<String>,

        /// Group rows by driver
        #[arg(long)]
        group: bool,
    },
    /// Validate a file, or every JSON file in a directory
    Validate { path: PathBuf },
    /// Rank several class leaderboards of one track together
    Combine {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        display: ViewArgs,
    },
    /// Search drivers across a directory of leaderboards
    Search {
        directory: PathBuf,

        /// Substring, or a quoted term for whole-word matching
        term: String,

        #[arg(long)]
        class: Option<String>,

        #[arg(long)]
        difficulty: Option<String>,

        #[command(flatten)]
        display: ViewArgs,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("leaderboard={},importer={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Show {
            file,
            display,
            driver,
            group,
        } => handle_show(&file, &display, driver.as_deref(), group),
        Commands::Validate { path } => handle_validate(&path),
        Commands::Combine { files, display } => handle_combine(&files, &display),
        Commands::Search {
            directory,
            term,
            class,
            difficulty,
            display,
        } => handle_search(&directory, &term, class, difficulty, &display),
    }
}

impl ViewArgs {
    fn options<'a>(&self, driver: Option<&'a str>) -> ViewOptions<'a> {
        ViewOptions {
            sort: self.sort,
            page: self.page,
            page_size: self.page_size.max(1),
            driver,
        }
    }
}

fn handle_show(
    file: &Path,
    display: &ViewArgs,
    driver: Option<&str>,
    group: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_file(file)?;
    let config = LeaderboardConfig::default().with_page_size(display.page_size);
    let options = display.options(driver);

    tracing::info!(
        "{} - {} ({} entries)",
        loaded.track,
        loaded.car_class,
        loaded.entries.len()
    );

    if group {
        let summary = loaded.summary();
        let groups = group_by_competitor(loaded.entries);
        let view = GroupsView::build(groups, &config.columns, options);
        if display.json {
            return print_json(&view);
        }
        println!("{} - {}", summary.track, summary.car_class);
        print_groups(&view);
    } else {
        let view =
            LeaderboardView::build(loaded.summary(), loaded.entries, &config.columns, options);
        if display.json {
            return print_json(&view);
        }
        print_leaderboard(&view);
    }

    Ok(())
}

fn handle_validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = if path.is_dir() {
        discover_json_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    if files.is_empty() {
        tracing::warn!("No JSON files found in {}", path.display());
        return Ok(());
    }

    let mut success_count = 0;
    let mut warning_count = 0;
    let mut error_count = 0;

    for (idx, file) in files.iter().enumerate() {
        tracing::info!("[{}/{}] Validating: {}", idx + 1, files.len(), file.display());

        let result = load_file(file)
            .and_then(|loaded| LeaderboardValidator::validate(&loaded.entries));

        match result {
            Ok(report) => {
                success_count += 1;
                warning_count += report.warnings.len();
                report.log_warnings();
                tracing::info!("  ✓ Valid ({} warning(s))", report.warnings.len());
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ Error: {}", e);
            }
        }
    }

    tracing::info!(
        "Summary: {} valid, {} invalid, {} warning(s)",
        success_count,
        error_count,
        warning_count
    );

    if error_count > 0 {
        return Err(format!("{} file(s) failed validation", error_count).into());
    }

    Ok(())
}

fn handle_combine(
    files: &[PathBuf],
    display: &ViewArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = files
        .iter()
        .map(|file| load_file(file))
        .collect::<Result<Vec<_>, _>>()?;

    let track = loaded
        .first()
        .map(|l| l.track.clone())
        .unwrap_or_default();
    let classes: Vec<String> = loaded.iter().map(|l| l.car_class.clone()).collect();
    let entries = combine(loaded.into_iter().map(|l| l.entries));

    let summary = LeaderboardSummary {
        id: "combined".to_string(),
        track,
        car_class: classes.join(" + "),
        entries: entries.len(),
    };

    let config = LeaderboardConfig::default().with_page_size(display.page_size);
    let view =
        LeaderboardView::build(summary, entries, &config.columns, display.options(None));
    if display.json {
        return print_json(&view);
    }
    print_leaderboard(&view);
    Ok(())
}

fn handle_search(
    directory: &Path,
    term: &str,
    class: Option<String>,
    difficulty: Option<String>,
    display: &ViewArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let leaderboards = DirectorySource::new(directory).load()?;
    let entries = leaderboards.into_iter().flat_map(|l| l.entries);

    let query = CompetitorQuery::parse(term);
    let filter = EntryFilter {
        class_name: class,
        difficulty,
        car: None,
    };
    let groups = search(entries, &query, &filter);
    tracing::info!("{} driver(s) match '{}'", groups.len(), term);

    let config = LeaderboardConfig::default().with_page_size(display.page_size);
    let view = GroupsView::build(groups, &config.columns, display.options(None));
    if display.json {
        return print_json(&view);
    }
    print_groups(&view);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_leaderboard(view: &LeaderboardView) {
    println!("{} - {} (sorted by {})", view.track, view.car_class, view.sort);
    print_table(&view.columns, &view.page.items);
    print_footer(&view.page, &view.page_window);
}

fn print_groups(view: &GroupsView) {
    for group in &view.page.items {
        print_group(group, &view.columns);
    }
    print_footer(&view.page, &view.page_window);
}

fn print_group(group: &GroupView, columns: &[ColumnView]) {
    let first = group.entries.first().map(|e| &e.entry);
    let country = first.map(|e| e.country.as_str()).unwrap_or_default();
    println!();
    match country {
        "" => println!("{} ({} entries)", group.name, group.entries.len()),
        country => println!("{} [{}] ({} entries)", group.name, country, group.entries.len()),
    }
    print_table(columns, &group.entries);
}

fn print_table(columns: &[ColumnView], rows: &[EntryView]) {
    let mut headers = vec!["Driver".to_string()];
    headers.extend(columns.iter().map(|c| c.display_name.clone()));

    let lines: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut line = vec![row.entry.name.clone()];
            line.extend(row.cells.iter().cloned());
            line
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            lines
                .iter()
                .filter_map(|line| line.get(i))
                .chain(std::iter::once(&headers[i]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    println!("{}", render(headers.as_slice()));
    println!("{}", render(rule.as_slice()));
    for line in &lines {
        println!("{}", render(line.as_slice()));
    }
}

fn print_footer<T>(page: &Page<T>, window: &PageWindow) {
    if page.total_items == 0 {
        println!("No entries");
        return;
    }

    let mut buttons = Vec::new();
    if window.show_first {
        buttons.push("1".to_string());
        if window.leading_ellipsis {
            buttons.push("...".to_string());
        }
    }
    for number in &window.pages {
        if *number == page.index {
            buttons.push(format!("[{}]", number));
        } else {
            buttons.push(number.to_string());
        }
    }
    if window.show_last {
        if window.trailing_ellipsis {
            buttons.push("...".to_string());
        }
        buttons.push(page.total_pages.to_string());
    }

    println!(
        "\nShowing {}-{} of {}   {}",
        page.start_index + 1,
        page.end_index,
        page.total_items,
        buttons.join(" ")
    );
}
