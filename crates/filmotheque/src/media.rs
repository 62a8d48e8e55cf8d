//! Posters and extra images stored next to the movie list.
//!
//! ```text
//! media/
//! └── tt0133093/
//!     ├── poster.jpg
//!     ├── 01-lobby.jpg
//!     └── 02-rooftop.png
//! ```
//!
//! Every lookup resolves once, to either a usable image or nothing. A folder
//! that cannot be listed, or a file that does not look like an image, is
//! treated as absent.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// File name of a movie's poster.
pub const POSTER_FILE: &str = "poster.jpg";

/// Most extra images shown per movie.
pub const MAX_GALLERY_IMAGES: usize = 8;

static IMAGE_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").expect("valid image pattern"));

static IMDB_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^tt\d+$").expect("valid IMDb id pattern"));

/// Result of looking for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// A readable image at this path.
    Present(PathBuf),
    /// Missing or unusable.
    Absent,
}

impl Probe {
    /// The path, if present.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Probe::Present(path) => Some(path),
            Probe::Absent => None,
        }
    }

    /// Whether an image was found.
    pub fn is_present(&self) -> bool {
        matches!(self, Probe::Present(_))
    }
}

/// Media folder with one sub-folder per IMDb id.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
}

impl MediaLibrary {
    /// Media rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Folder for one movie. `None` unless `imdb_id` looks like `tt` + digits,
    /// which also keeps lookups inside the root.
    pub fn movie_dir(&self, imdb_id: &str) -> Option<PathBuf> {
        IMDB_ID_RE
            .is_match(imdb_id)
            .then(|| self.root.join(imdb_id))
    }

    /// The movie's poster.
    pub fn poster(&self, imdb_id: &str) -> Probe {
        match self.movie_dir(imdb_id) {
            Some(dir) => probe_image(&dir.join(POSTER_FILE)),
            None => Probe::Absent,
        }
    }

    /// Extra images for a movie: image files other than the poster, sorted by
    /// name, unreadable ones skipped, at most [`MAX_GALLERY_IMAGES`].
    pub fn gallery(&self, imdb_id: &str) -> Vec<PathBuf> {
        let Some(dir) = self.movie_dir(imdb_id) else {
            return Vec::new();
        };

        let mut names: Vec<String> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .filter(|name| IMAGE_FILE_RE.is_match(name) && name != POSTER_FILE)
                .collect(),
            Err(e) => {
                log::debug!("Could not list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };
        names.sort();

        let mut images = Vec::new();
        for name in names {
            if images.len() >= MAX_GALLERY_IMAGES {
                break;
            }
            match probe_image(&dir.join(&name)) {
                Probe::Present(path) => images.push(path),
                Probe::Absent => log::debug!("Failed to load image: {}", dir.join(&name).display()),
            }
        }
        images
    }
}

/// Check that `path` is a regular file starting with a known image signature.
pub fn probe_image(path: &Path) -> Probe {
    let mut header = [0u8; 12];
    let read = File::open(path).and_then(|mut file| {
        let mut filled = 0;
        while filled < header.len() {
            match file.read(&mut header[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    });

    match read {
        Ok(n) if has_image_signature(&header[..n]) => Probe::Present(path.to_path_buf()),
        _ => Probe::Absent,
    }
}

fn has_image_signature(header: &[u8]) -> bool {
    header.starts_with(&[0xff, 0xd8, 0xff])
        || header.starts_with(b"\x89PNG\r\n\x1a\n")
        || header.starts_with(b"GIF87a")
        || header.starts_with(b"GIF89a")
        || (header.len() >= 12 && header.starts_with(b"RIFF") && &header[8..12] == b"WEBP")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0, 0x10, b'J', b'F', b'I', b'F'];
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn library() -> (TempDir, MediaLibrary) {
        let dir = TempDir::new().unwrap();
        let library = MediaLibrary::new(dir.path());
        (dir, library)
    }

    #[test]
    fn test_movie_dir_rejects_bad_ids() {
        let (_dir, library) = library();
        assert!(library.movie_dir("tt0133093").is_some());
        assert!(library.movie_dir("../etc").is_none());
        assert!(library.movie_dir("Matrix").is_none());
    }

    #[test]
    fn test_poster_probe() {
        let (dir, library) = library();
        let movie = dir.path().join("tt0133093");
        fs::create_dir(&movie).unwrap();

        assert_eq!(library.poster("tt0133093"), Probe::Absent);

        fs::write(movie.join(POSTER_FILE), b"not an image").unwrap();
        assert_eq!(library.poster("tt0133093"), Probe::Absent);

        fs::write(movie.join(POSTER_FILE), JPEG).unwrap();
        assert!(library.poster("tt0133093").is_present());
    }

    #[test]
    fn test_gallery_filters_sorts_and_limits() {
        let (dir, library) = library();
        let movie = dir.path().join("tt0133093");
        fs::create_dir(&movie).unwrap();

        fs::write(movie.join(POSTER_FILE), JPEG).unwrap();
        fs::write(movie.join("notes.txt"), b"hello").unwrap();
        fs::write(movie.join("broken.jpg"), b"truncated").unwrap();
        for i in 0..10 {
            fs::write(movie.join(format!("{:02}.PNG", 9 - i)), PNG).unwrap();
        }

        let images = library.gallery("tt0133093");
        let names: Vec<String> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names.len(), MAX_GALLERY_IMAGES);
        assert_eq!(names[0], "00.PNG");
        assert_eq!(names[7], "07.PNG");
        assert!(!names.iter().any(|n| n == POSTER_FILE || n == "broken.jpg"));
    }

    #[test]
    fn test_gallery_missing_folder_is_empty() {
        let (_dir, library) = library();
        assert!(library.gallery("tt0000001").is_empty());
    }

    #[test]
    fn test_image_signatures() {
        assert!(has_image_signature(JPEG));
        assert!(has_image_signature(PNG));
        assert!(has_image_signature(b"GIF89a\x01\x00"));
        assert!(has_image_signature(b"RIFF\x00\x00\x00\x00WEBPVP8 "));
        assert!(!has_image_signature(b"RIFF\x00\x00\x00\x00WAVE"));
        assert!(!has_image_signature(b""));
    }
}
