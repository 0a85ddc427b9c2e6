use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use gourmet_compass::api::CompassApi;
use gourmet_compass::client::GeminiClient;
use gourmet_compass::commands::bookmark::ToggleOutcome;
use gourmet_compass::commands::config::ConfigAction;
use gourmet_compass::commands::search::SearchOutcome;
use gourmet_compass::commands::{CmdMessage, MessageLevel};
use gourmet_compass::config::CompassConfig;
use gourmet_compass::error::{CompassError, Result};
use gourmet_compass::model::{
    Category, Coordinates, LocationContext, LocationFix, Place, SearchFilters,
};
use gourmet_compass::render::{render, Block, Span};
use gourmet_compass::store::fs::FileStore;
use std::io::{self, Write};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: CompassApi<FileStore>,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::Search {
            cuisine,
            price,
            mode,
            time,
            picks,
            lat,
            lng,
            accuracy,
            address,
        }) => {
            let filters = SearchFilters {
                cuisine,
                price,
                mode,
                time,
                picks,
            };
            handle_search(&mut ctx, filters, lat, lng, accuracy, address)
        }
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Save {
            title,
            uri,
            category,
        }) => handle_save(&mut ctx, title, uri, category),
        Some(Commands::Remove { category, uri }) => {
            let result = ctx.api.remove_item(&category, &uri)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Move { from, to, uri }) => {
            let result = ctx.api.move_item(&from, &to, &uri)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::NewCategory { name }) => {
            let result = ctx.api.create_category(&name, None)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Rename { id, name }) => {
            let result = ctx.api.rename_category(&id, &name)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::DeleteCategory { id, yes }) => {
            let result = ctx.api.delete_category(&id, yes)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Collapse { id }) => {
            let result = ctx.api.toggle_collapsed(&id)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = match std::env::var_os("GOURMET_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let proj_dirs = ProjectDirs::from("com", "gourmet-compass", "gourmet-compass")
                .expect("Could not determine data dir");
            proj_dirs.data_dir().to_path_buf()
        }
    };

    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: CompassApi::new(store),
        data_dir,
    })
}

fn handle_search(
    ctx: &mut AppContext,
    filters: SearchFilters,
    lat: Option<f64>,
    lng: Option<f64>,
    accuracy: Option<f64>,
    address: Option<String>,
) -> Result<()> {
    let location = resolve_location(lat, lng, accuracy, address)?;

    let config = CompassConfig::load(&ctx.data_dir)?;
    let client = GeminiClient::new(&config)?;

    println!(
        "{}",
        format!(
            "正在掃描 {} 的美食...",
            match &location {
                LocationContext::Manual(address) => address.clone(),
                LocationContext::Device(_) => "附近".to_string(),
            }
        )
        .dimmed()
    );

    let outcome = ctx.api.search(&client, &filters, &location)?;
    print_report(&outcome);
    print_places(ctx, &outcome);
    Ok(())
}

/// Coordinates act as the device fix, an address as the manual path.
/// Neither means we have nowhere to center the search.
fn resolve_location(
    lat: Option<f64>,
    lng: Option<f64>,
    accuracy: Option<f64>,
    address: Option<String>,
) -> Result<LocationContext> {
    if let Some(address) = address {
        if address.trim().is_empty() {
            return Err(CompassError::MissingManualAddress);
        }
        println!("{}", format!("📍 {}", address.trim()).dimmed());
        return Ok(LocationContext::Manual(address.trim().to_string()));
    }

    match (lat, lng) {
        (Some(latitude), Some(longitude)) => {
            let fix = LocationFix {
                coordinates: Coordinates {
                    latitude,
                    longitude,
                },
                accuracy_m: accuracy.unwrap_or(0.0),
            };
            if fix.accuracy_m > 0.0 {
                println!(
                    "{}",
                    format!("📡 已定位 ±{:.0}m", fix.accuracy_m).dimmed()
                );
            }
            Ok(LocationContext::Device(fix.coordinates))
        }
        _ => Err(CompassError::LocationUnavailable(
            "請用 --lat/--lng 或 --address 指定搜尋中心".to_string(),
        )),
    }
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print_categories(&result.categories);
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(
    ctx: &mut AppContext,
    title: String,
    uri: String,
    category: Option<String>,
) -> Result<()> {
    let place = Place::new(uri, title);

    match ctx.api.toggle_favorite(&place)? {
        ToggleOutcome::Removed(count) => {
            println!(
                "{}",
                format!("已取消收藏「{}」（移除 {} 筆）", place.title, count).green()
            );
            Ok(())
        }
        ToggleOutcome::NeedsCategory => {
            let category_id = match category {
                Some(id) => id,
                None => match choose_category(&ctx.api.categories())? {
                    Some(id) => id,
                    None => {
                        println!("{}", "Operation cancelled.".dimmed());
                        return Ok(());
                    }
                },
            };
            let result = ctx.api.add_to_category(&category_id, place)?;
            print_messages(&result.messages);
            Ok(())
        }
    }
}

/// The modal the app shows before filing a favorite, reduced to a
/// numbered stdin prompt. Empty or unparsable input cancels.
fn choose_category(categories: &[Category]) -> Result<Option<String>> {
    println!("選擇分類：");
    for (i, cat) in categories.iter().enumerate() {
        println!("  {}. {}", i + 1, cat.name);
    }
    print!("輸入編號: ");
    io::stdout().flush().map_err(CompassError::Io)?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(CompassError::Io)?;

    let choice = match input.trim().parse::<usize>() {
        Ok(n) if (1..=categories.len()).contains(&n) => Some(categories[n - 1].id.clone()),
        _ => None,
    };
    Ok(choice)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = gourmet_compass::commands::config::run(&ctx.data_dir, action)?;
    if let Some(config) = &result.config {
        println!("model = {}", config.model);
        println!(
            "api-key = {}",
            config.get("api-key").unwrap_or_default()
        );
        println!("timeout = {}", config.timeout_secs);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TITLE_WIDTH: usize = 40;

fn print_categories(categories: &[Category]) {
    for cat in categories {
        let marker = if cat.collapsed { "▸" } else { "▾" };
        println!(
            "{} {} {} {}",
            marker,
            cat.name.bold(),
            format!("[{}]", cat.id).dimmed(),
            format!("({})", cat.items.len()).dimmed()
        );

        if cat.collapsed {
            continue;
        }
        for (i, item) in cat.items.iter().enumerate() {
            let title = truncate_to_width(&item.title, TITLE_WIDTH);
            let padding = TITLE_WIDTH.saturating_sub(title.width());
            let uri = truncate_to_width(&item.uri, LINE_WIDTH.saturating_sub(TITLE_WIDTH + 8));
            println!(
                "    {}. {}{} {}",
                i + 1,
                title,
                " ".repeat(padding),
                uri.blue().underline()
            );
        }
        if cat.items.is_empty() {
            println!("{}", "    還沒有收藏任何店家".dimmed());
        }
    }
}

fn print_report(outcome: &SearchOutcome) {
    println!();
    println!("{}", "AI 美食報告".bold());
    println!("--------------------------------");
    for block in render(&outcome.report) {
        match block {
            Block::Blank => println!(),
            Block::Paragraph(spans) => println!("{}", format_spans(&spans)),
            Block::ListItem(spans) => println!("  • {}", format_spans(&spans)),
        }
    }
}

fn format_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.normal().to_string(),
            Span::Emphasis(text) => text.yellow().bold().to_string(),
            Span::Link { label, target } => {
                format!("{} {}", label.blue().underline(), format!("({target})").dimmed())
            }
        })
        .collect()
}

fn print_places(ctx: &AppContext, outcome: &SearchOutcome) {
    println!();
    if outcome.places.is_empty() {
        println!("{}", "🗺️ 這次沒有直接匹配到地圖連結".yellow());
        println!("{}", "請參考上方的文字建議，手動搜尋看看哦！".dimmed());
        return;
    }

    println!("{}", format!("發現 {} 間好店", outcome.places.len()).bold());
    for (i, place) in outcome.places.iter().enumerate() {
        let crown = if i == 0 { " 👑 TOP 1" } else { "" };
        let heart = if ctx.api.is_favorite(&place.uri) {
            " ♥"
        } else {
            ""
        };
        println!(
            "  {}. {}{}{}",
            i + 1,
            place.title.bold(),
            crown.yellow(),
            heart.red()
        );
        println!("     {}", place.uri.blue().underline());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
