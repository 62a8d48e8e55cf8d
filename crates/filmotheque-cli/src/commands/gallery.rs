//! Gallery command - a movie's poster and extra images.

use std::path::PathBuf;

use colored::Colorize;
use filmotheque::MediaLibrary;
use filmotheque::media::MAX_GALLERY_IMAGES;

pub fn run(imdb_id: String, media: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let library = MediaLibrary::new(&media);
    if library.movie_dir(&imdb_id).is_none() {
        return Err(format!("'{}' is not an IMDb id (expected tt followed by digits)", imdb_id).into());
    }

    println!("{}", imdb_id.cyan().bold());

    match library.poster(&imdb_id).path() {
        Some(path) => println!("  {} {}", "Poster:".dimmed(), path.display()),
        None => println!("  {} {}", "Poster:".dimmed(), "none".dimmed()),
    }

    let images = library.gallery(&imdb_id);
    if images.is_empty() {
        println!("  {} {}", "Gallery:".dimmed(), "none".dimmed());
    } else {
        println!(
            "  {} {} image(s), at most {}",
            "Gallery:".dimmed(),
            images.len(),
            MAX_GALLERY_IMAGES
        );
        for image in &images {
            println!("    {}", image.display());
        }
    }
    Ok(())
}
