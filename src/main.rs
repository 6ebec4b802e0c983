use clap::Parser;
use music_suite::audio::edit::{clean_title_tag, TitleCleanup};
use music_suite::cli::commands::{Cli, Commands};
use music_suite::external::converter::FfmpegConverter;
use music_suite::{
    search, workflows, GenreMap, Migrator, SymphoniaTagReader, TransferEngine, YtDlpDownloader,
    YtDlpResolver,
};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate {
            source,
            destinations,
            transfer_type,
        } => {
            println!("=== Starting Library Migration ===");
            println!("Source: {}", source.display());
            for dest in &destinations {
                println!("  destination: {}", dest.display());
            }

            let engine = match TransferEngine::new(destinations, transfer_type) {
                Ok(engine) => engine,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return;
                }
            };
            let genres = GenreMap::default_mapping();
            let tags = SymphoniaTagReader::new();
            let migrator = Migrator::new(&genres, &tags, &engine);

            match migrator.migrate(&source) {
                Ok(summary) => {
                    println!("\nGenre Counts:");
                    for (genre, count) in &summary.genre_counts {
                        println!("{}: {}", genre, count);
                    }
                    println!("Total files processed: {}", summary.total_processed);
                    println!("\n=== Library Migration Complete ===");
                }
                Err(e) => eprintln!("Error migrating {}: {}", source.display(), e),
            }
        }

        Commands::Download { file, output } => {
            println!("=== Starting Download Run ===");
            let resolver = YtDlpResolver::new();
            let downloader = YtDlpDownloader::new();

            match workflows::download_list::run(&file, output.as_deref(), &resolver, &downloader) {
                Ok(report) => {
                    println!(
                        "\nDownloaded {} tracks ({} already present, {} failed)",
                        report.downloaded, report.skipped_existing, report.failed
                    );
                    println!("\n=== Download Run Complete ===");
                }
                Err(e) => eprintln!("Error processing {}: {}", file.display(), e),
            }
        }

        Commands::DiscoverUrls { file, sheet } => {
            println!("=== Starting URL Discovery ===");
            let resolver = YtDlpResolver::new();

            match workflows::discover_urls::run(&file, &sheet, &resolver) {
                Ok(report) => {
                    println!(
                        "\nDone! {} songs found, {} not found. Results saved to {}",
                        report.found,
                        report.not_found,
                        report.output.display()
                    );
                }
                Err(e) => eprintln!("Error processing {}: {}", file.display(), e),
            }
        }

        Commands::SongInfo { file } => {
            println!("=== Starting Song Info Backfill ===");
            let resolver = YtDlpResolver::new();

            match workflows::song_info::run(&file, &resolver) {
                Ok(updated) => println!("\nUpdated {} rows in {}", updated, file.display()),
                Err(e) => eprintln!("Error processing {}: {}", file.display(), e),
            }
        }

        Commands::Convert {
            input,
            output_folder,
        } => {
            println!("=== Starting ALAC Conversion ===");
            let converter = FfmpegConverter::new();

            match workflows::convert::run(&input, &output_folder, &converter) {
                Ok(report) => {
                    println!(
                        "\nConverted {} files ({} already present, {} failed)",
                        report.converted, report.skipped_existing, report.failed
                    );
                    println!("\n=== ALAC Conversion Complete ===");
                }
                Err(e) => eprintln!("Error converting {}: {}", input.display(), e),
            }
        }

        Commands::CleanTitle { file } => match clean_title_tag(&file) {
            Ok(TitleCleanup::Updated(title)) => println!("Title updated to: {}", title),
            Ok(TitleCleanup::Unchanged) => {
                println!("No artist delimiter found in title, nothing updated.")
            }
            Err(e) => eprintln!("Error editing {}: {}", file.display(), e),
        },

        Commands::Search {
            music_dir,
            search_term,
        } => {
            if let Err(e) = search::run_interactive(&music_dir, search_term.as_deref()) {
                eprintln!("Search error: {}", e);
            }
        }
    }
}
