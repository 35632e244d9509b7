use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}

/// Ordered list of tracks plus the index of the current one.
///
/// `current` is always a valid index while the list is non-empty.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
    current: usize,
}

impl TrackList {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Advance to the next track, wrapping to the first after the last.
    pub fn next(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.tracks.len();
        self.current()
    }

    /// Step back to the previous track, wrapping to the last before the first.
    pub fn previous(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.tracks.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    /// Randomize the order and restart from the first track.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tracks.shuffle(rng);
        self.current = 0;
    }
}
