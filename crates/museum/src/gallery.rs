//! The entry gallery: a modal over one entry's images, browsed cyclically.
//!
//! [`GalleryState`] is the finite-state value with pure transitions. [`Gallery`] binds it to
//! a presentation host that owns the scroll position and the keyboard subscription.

use crate::model::{GalleryImage, JourneyEntry};

/// Index after `index` in a cyclic sequence of `len` items. Empty sequences do not move.
pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return index;
    }

    (index + 1) % len
}

/// Index before `index` in a cyclic sequence of `len` items. Empty sequences do not move.
pub fn previous_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return index;
    }

    (index % len + len - 1) % len
}

/// Keys the gallery reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl From<&str> for GalleryKey {
    /// Map a DOM `KeyboardEvent.key` name.
    fn from(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => GalleryKey::Escape,
            "ArrowLeft" | "Left" => GalleryKey::ArrowLeft,
            "ArrowRight" | "Right" => GalleryKey::ArrowRight,
            _ => GalleryKey::Other,
        }
    }
}

/// Which gallery controls make sense for a gallery of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryControls {
    /// The image stage. Hidden for galleries without images.
    pub stage: bool,
    /// Previous/next buttons.
    pub arrows: bool,
    pub thumbnails: bool,
}

impl GalleryControls {
    pub fn for_len(len: usize) -> Self {
        Self {
            stage: len > 0,
            arrows: len > 1,
            thumbnails: len > 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GalleryState<'a> {
    #[default]
    Closed,
    Open {
        entry: &'a JourneyEntry,
        /// Always a valid index into the entry's gallery images, unless it has none.
        index: usize,
    },
}

impl<'a> GalleryState<'a> {
    /// Open `entry` at its first image. Any previously open entry is replaced.
    #[must_use]
    pub fn open(self, entry: &'a JourneyEntry) -> Self {
        GalleryState::Open { entry, index: 0 }
    }

    #[must_use]
    pub fn close(self) -> Self {
        GalleryState::Closed
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            GalleryState::Open { entry, index } => GalleryState::Open {
                entry,
                index: next_index(index, entry.gallery_len()),
            },
            GalleryState::Closed => self,
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            GalleryState::Open { entry, index } => GalleryState::Open {
                entry,
                index: previous_index(index, entry.gallery_len()),
            },
            GalleryState::Closed => self,
        }
    }

    /// Show image `target` directly. Out-of-range targets are ignored.
    #[must_use]
    pub fn jump_to(self, target: usize) -> Self {
        match self {
            GalleryState::Open { entry, .. } if target < entry.gallery_len() => {
                GalleryState::Open {
                    entry,
                    index: target,
                }
            }
            _ => self,
        }
    }

    /// Apply a key press. Keys only act while the gallery is open.
    #[must_use]
    pub fn on_key(self, key: GalleryKey) -> Self {
        if !self.is_open() {
            return self;
        }

        match key {
            GalleryKey::Escape => self.close(),
            GalleryKey::ArrowRight => self.next(),
            GalleryKey::ArrowLeft => self.previous(),
            GalleryKey::Other => self,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, GalleryState::Open { .. })
    }

    pub fn entry(&self) -> Option<&'a JourneyEntry> {
        match self {
            GalleryState::Open { entry, .. } => Some(*entry),
            GalleryState::Closed => None,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            GalleryState::Open { index, .. } => Some(*index),
            GalleryState::Closed => None,
        }
    }

    /// The image on stage, if the gallery is open and has any.
    pub fn current_image(&self) -> Option<GalleryImage> {
        let GalleryState::Open { entry, index } = self else {
            return None;
        };

        entry.gallery_images().into_iter().nth(*index)
    }

    pub fn controls(&self) -> GalleryControls {
        GalleryControls::for_len(self.entry().map_or(0, JourneyEntry::gallery_len))
    }
}

/// The presentation side of the gallery.
pub trait GalleryHost {
    /// Guard for a keyboard listener. Dropping it removes the listener.
    type KeySubscription;

    fn scroll_position(&self) -> f64;

    fn scroll_to(&mut self, top: f64);

    fn subscribe_keys(&mut self) -> Self::KeySubscription;
}

/// A [`GalleryState`] bound to its host.
///
/// The keyboard subscription is held exactly while the gallery is open. It is released on
/// close and when the gallery itself is dropped.
pub struct Gallery<'a, H: GalleryHost> {
    host: H,
    state: GalleryState<'a>,
    remembered_scroll: Option<f64>,
    keys: Option<H::KeySubscription>,
}

impl<'a, H: GalleryHost> Gallery<'a, H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: GalleryState::Closed,
            remembered_scroll: None,
            keys: None,
        }
    }

    pub fn state(&self) -> GalleryState<'a> {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn open(&mut self, entry: &'a JourneyEntry) {
        if !self.state.is_open() {
            self.remembered_scroll = Some(self.host.scroll_position());
            self.keys = Some(self.host.subscribe_keys());
        }

        tracing::debug!(entry = %entry.id, "opening gallery");
        self.state = self.state.open(entry);
        self.host.scroll_to(0.0);
    }

    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }

        tracing::debug!("closing gallery");
        self.state = self.state.close();
        self.keys = None;

        if let Some(top) = self.remembered_scroll.take() {
            self.host.scroll_to(top);
        }
    }

    pub fn next(&mut self) {
        self.state = self.state.next();
    }

    pub fn previous(&mut self) {
        self.state = self.state.previous();
    }

    pub fn jump_to(&mut self, index: usize) {
        self.state = self.state.jump_to(index);
    }

    pub fn handle_key(&mut self, key: GalleryKey) {
        match key {
            GalleryKey::Escape => self.close(),
            _ => self.state = self.state.on_key(key),
        }
    }
}
