use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{LibrarySettings, PlayerMode};
use crate::error::{PlayerError, Result};

use super::model::Track;

fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Build a `Track` for `path`, reading tags when the file has any.
///
/// Unreadable or untagged files still produce a track titled after the file stem;
/// whether the file actually decodes is only known once it is loaded.
pub fn probe(path: &Path) -> Track {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.trim().to_string();
                    }
                }
                artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                album = tag
                    .album()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    let display = make_display(&title, artist.as_deref());

    Track {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        display,
    }
}

/// Enumerate the audio files of `dir`, sorted case-insensitively by display name.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>> {
    if !dir.exists() {
        return Err(PlayerError::Missing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(PlayerError::NotADirectory(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    // Non-recursive = only the root directory.
    if !settings.recursive {
        walker = walker.max_depth(1);
    }

    let mut tracks: Vec<Track> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(PlayerError::Scan {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            tracks.push(probe(path));
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    debug!(dir = %dir.display(), count = tracks.len(), "scanned folder");
    Ok(tracks)
}

/// Resolve what the user asked to open into a list of tracks for `mode`.
///
/// Playlist mode accepts a folder (scanned) or a single file; single mode
/// only accepts a file.
pub fn load_source(path: &Path, mode: PlayerMode, settings: &LibrarySettings) -> Result<Vec<Track>> {
    if !path.exists() {
        return Err(PlayerError::Missing(path.to_path_buf()));
    }

    match mode {
        PlayerMode::Playlist if path.is_dir() => scan(path, settings),
        _ if path.is_file() => Ok(vec![probe(path)]),
        PlayerMode::Single => Err(PlayerError::NotAFile(path.to_path_buf())),
        PlayerMode::Playlist => Err(PlayerError::NotADirectory(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn make_display_prefers_artist_dash_title() {
        assert_eq!(make_display("Song", Some("Artist")), "Artist - Song");
        assert_eq!(make_display("Song", Some("  Artist  ")), "Artist - Song");
        assert_eq!(make_display("Song", None), "Song");
        assert_eq!(make_display("Song", Some("   ")), "Song");
    }

    #[test]
    fn is_audio_file_matches_allow_list_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.Wav"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn is_audio_file_tolerates_dotted_extensions_in_settings() {
        let settings = LibrarySettings {
            extensions: vec![".FLAC".into(), "  ".into()],
            ..LibrarySettings::default()
        };
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    }

    #[test]
    fn probe_falls_back_to_file_stem_for_untagged_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Night Drive.mp3");
        fs::write(&path, b"not a real mp3").unwrap();

        let track = probe(&path);
        assert_eq!(track.title, "Night Drive");
        assert_eq!(track.display, "Night Drive");
        assert_eq!(track.artist, None);
        assert_eq!(track.path, path);
    }

    #[test]
    fn scan_filters_by_extension_and_sorts_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.wav"), b"not a real wav").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join("d.ogg"), b"not on the allow-list").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default()).unwrap();
        let names: Vec<&str> = tracks.iter().map(|t| t.display.as_str()).collect();
        assert_eq!(names, vec!["A", "b"]);
    }

    #[test]
    fn scan_is_not_recursive_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].display, "root");

        let recursive = LibrarySettings {
            recursive: true,
            ..LibrarySettings::default()
        };
        assert_eq!(scan(dir.path(), &recursive).unwrap().len(), 2);
    }

    #[test]
    fn scan_skips_hidden_files_unless_asked() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].display, "visible");

        let with_hidden = LibrarySettings {
            include_hidden: true,
            ..LibrarySettings::default()
        };
        assert_eq!(scan(dir.path(), &with_hidden).unwrap().len(), 2);
    }

    #[test]
    fn scan_rejects_missing_and_non_directories() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"not real").unwrap();

        assert!(matches!(
            scan(&dir.path().join("nope"), &LibrarySettings::default()),
            Err(PlayerError::Missing(_))
        ));
        assert!(matches!(
            scan(&file, &LibrarySettings::default()),
            Err(PlayerError::NotADirectory(_))
        ));
    }

    #[test]
    fn load_source_respects_player_mode() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"not real").unwrap();
        let settings = LibrarySettings::default();

        assert_eq!(
            load_source(dir.path(), PlayerMode::Playlist, &settings)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            load_source(&file, PlayerMode::Playlist, &settings)
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            load_source(&file, PlayerMode::Single, &settings)
                .unwrap()
                .len(),
            1
        );
        assert!(matches!(
            load_source(dir.path(), PlayerMode::Single, &settings),
            Err(PlayerError::NotAFile(_))
        ));
    }
}
