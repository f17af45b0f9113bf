//! The palette store: an ordered, never-empty list of palettes with a ring
//! cursor pointing at the one currently shown.

use crate::storage::palette_store_key;
use crate::{ArtError, ArtResult, Palette, PaletteId, Storage};

/// Wrap `index` into `0..count`, including negative indices.
///
/// Returns 0 when `count` is 0.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)] // Palette counts are tiny
pub fn bounds_checked_index(index: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.rem_euclid(count as isize) as usize
}

/// A named collection of palettes, persisted under `"<name>:paletteStore"`.
#[derive(Debug)]
pub struct PaletteStore {
    name: String,
    palettes: Vec<Palette>,
    cursor_index: usize,
    storage: Box<dyn Storage>,
}

impl PaletteStore {
    /// Open the store called `name`, reading its palettes from `storage`.
    ///
    /// Missing, malformed, or empty stored data falls back to the built-in
    /// palettes.
    #[must_use]
    pub fn open(name: impl Into<String>, storage: impl Storage + 'static) -> Self {
        let name = name.into();
        let stored = match storage.read(&palette_store_key(&name)) {
            Ok(Some(bytes)) => serde_json::from_slice::<Vec<Palette>>(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed palette store {name}: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read palette store {name}: {e}");
                Vec::new()
            }
        };

        let palettes = if stored.is_empty() {
            tracing::info!("Palette store {name} has no stored data, using built-ins");
            let builtins = Palette::builtins();
            if builtins.is_empty() {
                vec![Palette::warning()]
            } else {
                builtins
            }
        } else {
            stored
        };

        Self {
            name,
            palettes,
            cursor_index: 0,
            storage: Box::new(storage),
        }
    }

    /// The store's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All palettes in order.
    #[must_use]
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Number of palettes (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Check if the store holds no palettes; never true once opened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Replace every palette. An empty list is rejected and the store keeps
    /// its current palettes.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::EmptyPaletteStore`] if `palettes` is empty.
    pub fn set_palettes(&mut self, palettes: Vec<Palette>) -> ArtResult<()> {
        if palettes.is_empty() && !self.palettes.is_empty() {
            tracing::warn!("Rejected emptying palette store {}", self.name);
            return Err(ArtError::EmptyPaletteStore);
        }
        self.palettes = palettes;
        self.autosave();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    /// Index of the palette currently shown.
    #[must_use]
    pub fn cursor_index(&self) -> usize {
        bounds_checked_index(self.cursor_as_isize(), self.palettes.len())
    }

    /// Point the cursor at `index`, wrapping in either direction.
    pub fn set_cursor_index(&mut self, index: isize) {
        self.cursor_index = bounds_checked_index(index, self.palettes.len());
    }

    /// Move the cursor by `delta` palettes, wrapping in either direction.
    pub fn advance_cursor(&mut self, delta: isize) {
        self.set_cursor_index(self.cursor_as_isize() + delta);
    }

    /// The palette currently shown.
    #[must_use]
    pub fn current(&self) -> &Palette {
        &self.palettes[self.cursor_index()]
    }

    #[allow(clippy::cast_possible_wrap)] // Palette counts are tiny
    fn cursor_as_isize(&self) -> isize {
        self.cursor_index as isize
    }

    // -----------------------------------------------------------------------
    // Adding palettes
    //
    // These avoid duplicating palettes with the same id: an existing entry is
    // moved or replaced instead. They do not repair duplication that is
    // already present.
    // -----------------------------------------------------------------------

    /// Insert `palette` at `index` (the cursor if `None`). If a palette with
    /// the same id exists it is moved to that index and replaced.
    pub fn insert(&mut self, palette: Palette, index: Option<isize>) {
        let insertion_index = bounds_checked_index(
            index.unwrap_or_else(|| self.cursor_as_isize()),
            self.palettes.len(),
        );
        if let Some(existing) = self.index_of(palette.id) {
            self.palettes.remove(existing);
            tracing::debug!(
                "Moved palette {} from {existing} to {insertion_index}",
                palette.id
            );
        }
        let insertion_index = insertion_index.min(self.palettes.len());
        self.palettes.insert(insertion_index, palette);
        self.autosave();
    }

    /// Create and insert a new palette. Returns its id.
    pub fn insert_new(&mut self, name: &str, emojis: &str, index: Option<isize>) -> PaletteId {
        let palette = Palette::new(name, emojis);
        let id = palette.id;
        self.insert(palette, index);
        id
    }

    /// Append `palette`. If a palette with the same id exists it is removed
    /// first, or replaced outright when it is the only one.
    pub fn append(&mut self, palette: Palette) {
        match self.index_of(palette.id) {
            Some(_) if self.palettes.len() == 1 => {
                self.palettes = vec![palette];
            }
            Some(existing) => {
                self.palettes.remove(existing);
                self.palettes.push(palette);
            }
            None => self.palettes.push(palette),
        }
        self.autosave();
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Remove the palette at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IndexOutOfBounds`] for a bad index and
    /// [`ArtError::EmptyPaletteStore`] if it is the last palette.
    pub fn remove(&mut self, index: usize) -> ArtResult<Palette> {
        let len = self.palettes.len();
        if index >= len {
            return Err(ArtError::IndexOutOfBounds { index, len });
        }
        if len == 1 {
            tracing::warn!("Rejected removing the last palette of {}", self.name);
            return Err(ArtError::EmptyPaletteStore);
        }
        let removed = self.palettes.remove(index);
        self.autosave();
        Ok(removed)
    }

    /// Move the palette at `from` so that it ends up at `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IndexOutOfBounds`] if either index is invalid.
    pub fn move_palette(&mut self, from: usize, to: usize) -> ArtResult<()> {
        let len = self.palettes.len();
        for index in [from, to] {
            if index >= len {
                return Err(ArtError::IndexOutOfBounds { index, len });
            }
        }
        let palette = self.palettes.remove(from);
        self.palettes.insert(to, palette);
        self.autosave();
        Ok(())
    }

    /// Edit the palette at `index` in place.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IndexOutOfBounds`] if `index` is invalid.
    pub fn update<F>(&mut self, index: usize, f: F) -> ArtResult<()>
    where
        F: FnOnce(&mut Palette),
    {
        let len = self.palettes.len();
        let palette = self
            .palettes
            .get_mut(index)
            .ok_or(ArtError::IndexOutOfBounds { index, len })?;
        f(palette);
        self.autosave();
        Ok(())
    }

    /// Index of the palette with the given id.
    #[must_use]
    pub fn index_of(&self, id: PaletteId) -> Option<usize> {
        self.palettes.iter().position(|palette| palette.id == id)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Write the palettes to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self) -> ArtResult<()> {
        let json = serde_json::to_vec(&self.palettes)?;
        self.storage.write(&palette_store_key(&self.name), &json)
    }

    fn autosave(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to persist palette store {}: {e}", self.name);
        }
    }
}
