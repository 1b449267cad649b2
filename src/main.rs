//! # Slabel CLI
//!
//! Command-line interface for the slab label designer.
//!
//! ## Usage
//!
//! ```bash
//! # Start the web designer
//! slabel serve --listen 127.0.0.1:8080
//!
//! # Add a label and check the grid
//! slabel add --year-set "1999 Pokémon Base Set" --player Charizard --grade-term MINT --grade 9
//! slabel layout
//!
//! # Write the print sheet to a file
//! slabel render --print --out sheet.html
//!
//! # Back up and restore
//! slabel export --out slab-labels.json
//! slabel import slab-labels.json
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use slabel::{
    Editor, FileStore, LabelRecord, Level, Notification, SlabelError, Workspace,
    render::{RenderMode, page::DesignerPage},
    server::{self, ServerConfig},
    settings::LabelSize,
    transfer,
    units::format_number,
};

/// Slabel - Trading card slab label designer
#[derive(Parser, Debug)]
#[command(name = "slabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved labels and settings
    #[arg(long, env = "SLABEL_DATA_DIR", default_value = "./slabel-data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web designer
    Serve {
        /// Address to listen on
        #[arg(long, env = "SLABEL_LISTEN", default_value = "127.0.0.1:8080")]
        listen: String,
    },

    /// List saved labels
    List,

    /// Add a label (needs a set/year or a card name)
    Add {
        #[arg(long, default_value = "")]
        year_set: String,
        #[arg(long, default_value = "")]
        player: String,
        #[arg(long, default_value = "")]
        variation: String,
        #[arg(long, default_value = "")]
        number: String,
        #[arg(long, default_value = "")]
        grade_term: String,
        #[arg(long, default_value = "")]
        grade: String,
    },

    /// Remove a label by its 1-based number from `list`
    Remove {
        number: usize,
    },

    /// Remove every label
    Clear {
        /// Confirm clearing; nothing happens without it
        #[arg(long)]
        yes: bool,
    },

    /// Show or change the label border
    Border {
        /// Border color (empty for none)
        #[arg(long)]
        color: Option<String>,
        /// Border thickness in CSS pixels
        #[arg(long)]
        size: Option<f64>,
    },

    /// Show or change the label size in inches
    Size {
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },

    /// Print the sheet grid summary
    Layout,

    /// Render the designer page (or the print sheet) as HTML
    Render {
        /// Render the print sheet only
        #[arg(long)]
        print: bool,
        /// Output file (stdout if omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Export labels and settings as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Import a previously exported JSON file
    Import {
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SlabelError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
                data_dir: cli.data_dir,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }
        command => {
            let mut workspace = open_workspace(&cli.data_dir)?;
            edit_workspace(command, &mut workspace)
        }
    }
}

/// Run a headless command against the saved workspace.
fn edit_workspace(command: Commands, workspace: &mut Workspace) -> Result<(), SlabelError> {
    match command {
        Commands::Serve { .. } => {}

        Commands::List => {
            if workspace.labels().is_empty() {
                println!("No labels.");
            }
            for (i, label) in workspace.labels().iter().enumerate() {
                println!(
                    "{:>3}. {} | {} | {} | {} | {} {}",
                    i + 1,
                    label.year_set_line,
                    label.player_line,
                    label.variation_line,
                    label.card_number,
                    label.grade_term,
                    label.grade_number
                );
            }
        }

        Commands::Add {
            year_set,
            player,
            variation,
            number,
            grade_term,
            grade,
        } => {
            let mut editor = Editor::new();
            editor.set_fields(
                LabelRecord::new(year_set, player)
                    .variation(variation)
                    .card_number(number)
                    .grade(grade_term, grade),
            );
            report(&editor.save(workspace)?)?;
        }

        Commands::Remove { number } => {
            let removed = number
                .checked_sub(1)
                .map(|index| workspace.remove_label(index))
                .transpose()?
                .flatten();
            match removed {
                Some(label) => println!("Removed label #{} ({}).", number, label.player_line),
                None => println!("No label #{}; nothing removed.", number),
            }
        }

        Commands::Clear { yes } => {
            if !yes {
                return Err(SlabelError::Validation(
                    "refusing to clear without --yes; this cannot be undone".to_string(),
                ));
            }
            workspace.clear_labels()?;
            println!("All labels cleared.");
        }

        Commands::Border { color, size } => {
            if let Some(color) = color {
                workspace.set_border_color(color)?;
            }
            if let Some(size) = size {
                workspace.set_border_size(size)?;
            }
            let border = workspace.border();
            println!(
                "Border: {} ({})",
                border.css(),
                if border.is_visible() { "visible" } else { "hidden" }
            );
        }

        Commands::Size { width, height } => {
            if width.is_some() || height.is_some() {
                let current = workspace.label_size();
                workspace.set_label_size(LabelSize::new(
                    width.unwrap_or(current.width_in),
                    height.unwrap_or(current.height_in),
                )?)?;
            }
            let size = workspace.label_size();
            println!(
                "Label size: {}in × {}in",
                format_number(size.width_in),
                format_number(size.height_in)
            );
        }

        Commands::Layout => {
            let layout = workspace.layout();
            let grid = layout.grid;
            println!("Labels:        {}", workspace.labels().len());
            println!(
                "Label size:    {}in × {}in",
                format_number(grid.cell_width_in),
                format_number(grid.cell_height_in)
            );
            println!("Columns:       {}", grid.columns);
            println!("Column gap:    {}in", format_number(grid.column_gap_in));
            println!("Row gap:       {}in", format_number(grid.row_gap_in));
            println!("Rows:          {}", layout.rows);
            println!("Rows per page: {}", layout.rows_per_page);
            println!("Pages:         {}", layout.page_count);
            if !layout.fits_width() {
                println!(
                    "Warning: grid is {}in wider than the printable area",
                    format_number(layout.overflow_x_in)
                );
            }
        }

        Commands::Render { print, out } => {
            let mode = if print { RenderMode::Print } else { RenderMode::Screen };
            let html = DesignerPage::new(workspace, mode).render();
            write_output(out.as_deref(), &html)?;
        }

        Commands::Export { out } => {
            let json = transfer::export_json(workspace)?;
            write_output(out.as_deref(), &json)?;
        }

        Commands::Import { file } => {
            let text = fs::read_to_string(&file)?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            report(&transfer::import_text(workspace, &name, &text))?;
        }
    }

    Ok(())
}

fn open_workspace(data_dir: &Path) -> Result<Workspace, SlabelError> {
    let store = FileStore::open(data_dir)?;
    Ok(Workspace::load(Box::new(store)))
}

/// Print a notification; warnings and errors become the command's error.
fn report(notice: &Notification) -> Result<(), SlabelError> {
    let text = match &notice.description {
        Some(description) => format!("{} {}", notice.title, description),
        None => notice.title.clone(),
    };
    match notice.level {
        Level::Success | Level::Info => {
            println!("{}", text);
            Ok(())
        }
        Level::Warning => Err(SlabelError::Validation(text)),
        Level::Error => Err(SlabelError::Import(text)),
    }
}

fn write_output(out: Option<&Path>, contents: &str) -> Result<(), SlabelError> {
    match out {
        Some(path) => {
            fs::write(path, contents)?;
            println!("Saved to {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
