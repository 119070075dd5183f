//! Multilingual content group types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A media file attached to a content element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Source path of the media file.
    pub path: PathBuf,
    /// True when the file was replaced since loading and must be copied
    /// into the project on the next save.
    pub updated: bool,
}

impl MediaFile {
    /// References a media file already stored inside the project.
    #[must_use]
    pub fn existing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            updated: false,
        }
    }
}

/// One language's copy of a content group.
///
/// A content group is identified by `content_number` and replicated per
/// language. Text and media fields differ between the copies; the
/// `positions` list is kept identical across them by the binder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentElement {
    /// 1-based group number, unique within a language list.
    pub content_number: u32,
    /// Short title text.
    pub title: Option<String>,
    /// Subtitle or description text.
    pub description: Option<String>,
    /// Rich text body.
    pub full_text: Option<String>,
    /// Linked URL.
    pub url: Option<String>,
    /// Attached image.
    pub image: Option<MediaFile>,
    /// Attached audio clip.
    pub audio: Option<MediaFile>,
    /// Attached video clip.
    pub video: Option<MediaFile>,
    /// Canonical position keys of the grid cells bound to this group.
    pub positions: Vec<String>,
}

impl ContentElement {
    /// Creates an empty content element with the given group number.
    #[must_use]
    pub fn new(content_number: u32) -> Self {
        Self {
            content_number,
            ..Self::default()
        }
    }

    /// Builder-style title assignment.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder-style description assignment.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style URL assignment.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder-style full text assignment.
    #[must_use]
    pub fn with_full_text(mut self, full_text: impl Into<String>) -> Self {
        self.full_text = Some(full_text.into());
        self
    }

    /// Attaches a new image and marks it for copying on the next save.
    pub fn set_image(&mut self, path: impl Into<PathBuf>) {
        self.image = Some(MediaFile {
            path: path.into(),
            updated: true,
        });
    }

    /// Attaches a new audio clip and marks it for copying on the next save.
    pub fn set_audio(&mut self, path: impl Into<PathBuf>) {
        self.audio = Some(MediaFile {
            path: path.into(),
            updated: true,
        });
    }

    /// Attaches a new video clip and marks it for copying on the next save.
    pub fn set_video(&mut self, path: impl Into<PathBuf>) {
        self.video = Some(MediaFile {
            path: path.into(),
            updated: true,
        });
    }
}
