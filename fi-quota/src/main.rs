pub mod bar;
pub mod format;
pub mod gpfs;
pub mod layout;
pub mod palette;

use clap::Parser;
use users::get_current_username;

use crate::format::{count_to_str, kib_to_str};
use crate::layout::{BLOCK_WIDTH, GRID_MARGIN, format_block, render_grid};
use crate::palette::Palette;

/// The main function for the fi-quota CLI application
///
/// Fetches the GPFS quota report for the user and renders a storage bar
/// and a file-count bar per filesystem, side by side when the terminal
/// is wide enough for both
fn main() -> Result<(), String> {
    let args = Args::parse();

    // the user name passed in, if it exists, or else the OS username
    let user_name = match args.user {
        Some(user) => user,
        None => get_current_username()
            .ok_or("could not determine the current user")?
            .to_string_lossy()
            .into_owned(),
    };

    let filesystems = gpfs::fetch_quotas(&user_name).map_err(|e| e.to_string())?;
    if filesystems.is_empty() {
        println!("No quotas reported for {}", user_name);
        return Ok(());
    }

    let palette = Palette::detect(args.no_color);

    // One width query per run; a failed query just means stacked output
    let term_cols = crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(80);
    let grid_mode = term_cols >= 2 * BLOCK_WIDTH + GRID_MARGIN;

    for fs in &filesystems {
        let mut blocks = Vec::new();
        if !fs.blocks.is_unset() {
            blocks.push(format_block(
                &format!("{} storage", fs.name),
                &fs.blocks,
                BLOCK_WIDTH,
                kib_to_str,
                &palette,
            ));
        }
        if !fs.files.is_unset() {
            blocks.push(format_block(
                &format!("{} files", fs.name),
                &fs.files,
                BLOCK_WIDTH,
                count_to_str,
                &palette,
            ));
        }
        if blocks.is_empty() {
            println!("\n{}: no quotas set", fs.name);
            continue;
        }

        println!();
        for line in render_grid(&blocks, BLOCK_WIDTH, grid_mode) {
            println!("{}", line);
        }
    }
    Ok(())
}

const HELP: &str = "it displays the current GPFS block and file quota usage of the user";

#[derive(Parser, Debug)]
#[command(version, about, after_help = HELP)]
struct Args {
    #[arg(help = "The username for which to show quotas. Defaults to the current user.")]
    user: Option<String>,

    #[arg(short, long)]
    #[arg(help = "Disable colored output")]
    no_color: bool,
}
