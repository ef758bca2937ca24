//! Admin Shell CLI
//!
//! Thin wrapper around adminshell-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Ten-shade brand palette for a base color (hex or preset name)
//! adminshell palette "#0052d9"
//! adminshell palette orange --format css
//!
//! # RGB / HSL breakdown of a color
//! adminshell convert 0052d9
//!
//! # Persisted theme config
//! adminshell theme show
//! adminshell theme set --mode dark --color green
//! adminshell theme init --prefers-dark
//! adminshell theme reset
//!
//! # Menu entries from a JSON route table
//! adminshell menu list routes.json
//! adminshell menu search routes.json list
//!
//! # Persisted application state
//! adminshell app show
//! adminshell app lock --password 1234
//! adminshell app unlock --password 1234
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use adminshell_core::logging::JsonlLayer;
use adminshell_core::theme::{apply_primary_color, load_theme_config, THEME_STORAGE_KEY};
use adminshell_core::{
    generate_color_gradations, hex_to_rgb, index_menu_items, search_menu_items, AppStore,
    KeyValueStore, MenuItem, PresetColor, Rgb, RootStyle, RouteNode, SchemeBroadcaster, Storage,
    ThemeManager, ThemeMode,
};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;

/// Database file inside the data directory
const DATABASE_FILE: &str = "shell.redb";

/// Admin Shell - theme palettes, menu indexing and persisted UI state
#[derive(Parser)]
#[command(name = "adminshell")]
#[command(version)]
#[command(about = "Admin Shell - theme palettes, menu indexing and persisted UI state")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.adminshell/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also append JSONL logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ten-shade palette of a base color
    Palette {
        /// Base color: hex (`#0052d9`, `0052d9`) or preset name (`blue`)
        color: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = PaletteFormat::Text)]
        format: PaletteFormat,
    },

    /// Show the RGB and HSL breakdown of a color
    Convert {
        /// Hex color or preset name
        color: String,
    },

    /// Theme config management
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Menu indexing over a JSON route table
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },

    /// Persisted application state
    App {
        #[command(subcommand)]
        action: AppAction,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PaletteFormat {
    Text,
    Json,
    Css,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the stored theme config
    Show,
    /// Change the stored mode and/or primary color
    Set {
        /// light, dark or auto
        #[arg(short, long)]
        mode: Option<String>,
        /// Hex color or preset name
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Apply the stored theme and print the resulting root style
    Init {
        /// Resolve `auto` as if the host prefers a dark scheme
        #[arg(long)]
        prefers_dark: bool,
    },
    /// Forget the stored theme config
    Reset,
}

#[derive(Subcommand)]
enum MenuAction {
    /// List every menu entry of a route table
    List {
        /// Path to a JSON array of route nodes
        routes: PathBuf,
    },
    /// Search menu entries by title
    Search {
        /// Path to a JSON array of route nodes
        routes: PathBuf,
        /// Case-insensitive title keyword
        keyword: String,
    },
}

#[derive(Subcommand)]
enum AppAction {
    /// Show the persisted application state
    Show,
    /// Set the console title
    Title {
        title: String,
    },
    /// Flip the global theme between light and dark
    ToggleTheme,
    /// Lock the screen
    Lock {
        /// Set a new lock password before locking
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Unlock the screen
    Unlock {
        /// Required when a lock password is set
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn setup_logging(verbosity: u8, log_dir: Option<&Path>) -> Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let jsonl = log_dir.map(JsonlLayer::new).transpose()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(jsonl)
        .init();

    Ok(())
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".adminshell")
        .join("data")
}

fn open_storage(data_dir: &Path) -> Result<Arc<Storage>> {
    Ok(Arc::new(Storage::new(data_dir.join(DATABASE_FILE))?))
}

/// Preset names resolve to their hex value; anything else passes through.
fn resolve_color(input: &str) -> String {
    PresetColor::from_name(input)
        .map(|preset| preset.hex().to_string())
        .unwrap_or_else(|| input.to_string())
}

fn parse_color(input: &str) -> Result<Rgb> {
    match hex_to_rgb(&resolve_color(input)) {
        Some(rgb) => Ok(rgb),
        None => anyhow::bail!(
            "Invalid color: {} (expected #rrggbb or one of: {})",
            input,
            PresetColor::ALL.map(PresetColor::name).join(", ")
        ),
    }
}

fn parse_theme_mode(input: &str) -> Result<ThemeMode> {
    ThemeMode::from_str(input)
        .map_err(|_| anyhow::anyhow!("Invalid theme mode: {} (expected light, dark or auto)", input))
}

fn read_routes(path: &Path) -> Result<Vec<RouteNode>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid route table {}: {}", path.display(), e))
}

fn print_menu_items(items: &[MenuItem]) {
    if items.is_empty() {
        println!("No menu items.");
        return;
    }
    for item in items {
        println!("  {:<24} {:<32} {}", item.title, item.path, item.icon);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.log_dir.as_deref())?;

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);

    match cli.command {
        Commands::Palette { color, format } => {
            let base = resolve_color(&color);
            let palette = generate_color_gradations(&base);

            match format {
                PaletteFormat::Text => {
                    println!("Palette for {}", base);
                    for (index, shade) in palette.iter() {
                        println!("  {:>2}  {}", index, shade);
                    }
                }
                PaletteFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&palette)?);
                }
                PaletteFormat::Css => {
                    let style = RootStyle::new();
                    apply_primary_color(&style, &base);
                    print!("{}", style.to_css());
                }
            }
        }

        Commands::Convert { color } => {
            let rgb = parse_color(&color)?;

            println!("Hex: {}", rgb);
            println!("RGB: rgb({}, {}, {})", rgb.r, rgb.g, rgb.b);
            println!("HSL: {}", rgb.to_hsl());
        }

        Commands::Theme { action } => {
            let storage = open_storage(&data_dir)?;

            match action {
                ThemeAction::Show => {
                    let config = load_theme_config(storage.as_ref());
                    println!("Theme:");
                    println!("  Mode: {}", config.mode);
                    println!("  Primary color: {}", config.primary_color);
                }

                ThemeAction::Set { mode, color } => {
                    if mode.is_none() && color.is_none() {
                        anyhow::bail!("Nothing to set: pass --mode and/or --color");
                    }
                    let mode = mode.as_deref().map(parse_theme_mode).transpose()?;
                    let color = color.as_deref().map(parse_color).transpose()?;

                    let style = Arc::new(RootStyle::new());
                    let mut themes = ThemeManager::new(
                        storage,
                        style,
                        Arc::new(SchemeBroadcaster::new(false)),
                    );
                    if let Some(mode) = mode {
                        themes.set_mode(mode);
                    }
                    if let Some(color) = color {
                        themes.set_primary_color(color.to_hex());
                    }

                    let config = themes.config();
                    println!("Theme updated.");
                    println!("  Mode: {}", config.mode);
                    println!("  Primary color: {}", config.primary_color);
                }

                ThemeAction::Init { prefers_dark } => {
                    let style = Arc::new(RootStyle::new());
                    let mut themes = ThemeManager::new(
                        storage,
                        style.clone(),
                        Arc::new(SchemeBroadcaster::new(prefers_dark)),
                    );
                    let config = themes.init();
                    tracing::info!(mode = %config.mode, resolved = %themes.resolved_mode(), "Theme initialized");

                    print!("{}", style.to_css());
                }

                ThemeAction::Reset => {
                    storage.remove_item(THEME_STORAGE_KEY)?;
                    println!("Theme reset to defaults.");
                }
            }
        }

        Commands::Menu { action } => match action {
            MenuAction::List { routes } => {
                let items = index_menu_items(&read_routes(&routes)?);
                print_menu_items(&items);
            }

            MenuAction::Search { routes, keyword } => {
                let items = index_menu_items(&read_routes(&routes)?);
                print_menu_items(&search_menu_items(&items, &keyword));
            }
        },

        Commands::App { action } => {
            let storage = open_storage(&data_dir)?;
            let mut app = AppStore::load(storage, Arc::new(RootStyle::new()));

            match action {
                AppAction::Show => {
                    let title = if app.title().is_empty() {
                        "(untitled)"
                    } else {
                        app.title()
                    };
                    println!("Application:");
                    println!("  Title: {}", title);
                    println!("  Theme: {}", app.theme());
                    println!("  Sidebar theme: {}", app.sidebar_theme());
                    println!("  Locked: {}", if app.is_locked() { "yes" } else { "no" });
                }

                AppAction::Title { title } => {
                    app.set_title(title);
                    println!("Title set to: {}", app.title());
                }

                AppAction::ToggleTheme => {
                    app.toggle_theme();
                    println!("Theme: {}", app.theme());
                }

                AppAction::Lock { password } => {
                    if let Some(password) = password {
                        app.set_lock_password(password);
                    }
                    app.lock_screen();
                    println!("Screen locked.");
                }

                AppAction::Unlock { password } => {
                    if !app.is_locked() {
                        println!("Screen is not locked.");
                        return Ok(());
                    }
                    if !app.lock_password().is_empty()
                        && password.as_deref() != Some(app.lock_password())
                    {
                        anyhow::bail!("Incorrect lock password");
                    }
                    app.unlock_screen();
                    println!("Screen unlocked.");
                }
            }
        }
    }

    Ok(())
}
