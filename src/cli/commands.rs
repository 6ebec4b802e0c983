use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::library::transfer::TransferMode;

#[derive(Parser)]
#[command(name = "music-suite")]
#[command(version = "1.0")]
#[command(about = "Personal music-library toolkit: migrate, download, tag and search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Organize music files into genre folders across destination roots
    #[command(visible_aliases = ["am", "transfer"])]
    Migrate {
        /// Source directory containing music files
        #[arg(short, long)]
        source: PathBuf,

        /// Destination roots (primary first, e.g. library then USB)
        #[arg(short, long, num_args = 1.., required = true)]
        destinations: Vec<PathBuf>,

        /// Transfer operation
        #[arg(short = 't', long = "transfer-type", value_enum, default_value_t = TransferMode::Both)]
        transfer_type: TransferMode,
    },

    /// Download every URL listed in a workbook, recording successes
    #[command(visible_alias = "dl")]
    Download {
        /// Workbook directory containing the download-list sheet
        #[arg(short, long)]
        file: PathBuf,

        /// Directory to save downloaded files (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search a URL for each (artist, title) row of a workbook sheet
    #[command(visible_alias = "get-urls")]
    DiscoverUrls {
        /// Workbook directory containing song data
        #[arg(short, long)]
        file: PathBuf,

        /// Sheet to read (artist/title columns)
        #[arg(long, default_value = "songs")]
        sheet: String,
    },

    /// Fill Title/Uploader columns of the past-downloads ledger from URLs
    #[command(visible_alias = "get-info")]
    SongInfo {
        /// Workbook directory containing the pastDownloads sheet
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Convert audio files to ALAC (.m4a)
    #[command(visible_alias = "alac")]
    Convert {
        /// File or folder to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Folder for converted files
        #[arg(short, long)]
        output_folder: PathBuf,
    },

    /// Remove the artist prefix from a file's embedded title tag
    #[command(visible_alias = "clean")]
    CleanTitle {
        /// Audio file to edit
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Search local filenames by artist or song name
    Search {
        /// Base directory to search from
        #[arg(short = 'd', long, default_value = ".")]
        music_dir: PathBuf,

        /// Initial search term to start with
        #[arg(short = 's', long)]
        search_term: Option<String>,
    },
}
