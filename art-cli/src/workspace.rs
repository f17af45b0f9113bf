//! An opened data directory: the document, the palette store, and the
//! controller that edits them.

use std::fs;
use std::io::Write;

use anyhow::Context;
use art_core::{
    ArtDocument, ArtError, DropPayload, DropTarget, EmojiId, FileStorage, Gesture, GestureFrame,
    InteractionController, PaletteStore, Position, ViewportPoint, ViewportSize,
};
use serde::Deserialize;
use url::Url;

use crate::{ArtConfig, Command, PaletteCommand};

/// One line of a gesture script.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptLine {
    /// A single gesture, tagged with `"type"`.
    Gesture(Gesture),
    /// Several gesture families active in the same event.
    Frame(GestureFrame),
}

/// Everything one command needs.
#[derive(Debug)]
pub struct Workspace {
    document: ArtDocument,
    palettes: PaletteStore,
    controller: InteractionController,
    viewport: ViewportSize,
}

impl Workspace {
    /// Open the document and palette store under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: &ArtConfig) -> anyhow::Result<Self> {
        let storage = FileStorage::new(config.data_dir.clone()).with_context(|| {
            format!("Failed to open data directory {}", config.data_dir.display())
        })?;
        tracing::debug!("Opened data directory {}", storage.data_dir().display());

        let document = ArtDocument::open(storage.clone());
        let palettes = PaletteStore::open(config.store_name.as_str(), storage);
        let controller =
            InteractionController::new(config.controller).with_view(config.zoom, config.pan);

        Ok(Self {
            document,
            palettes,
            controller,
            viewport: config.viewport,
        })
    }

    /// The open document.
    #[must_use]
    pub fn document(&self) -> &ArtDocument {
        &self.document
    }

    /// The open palette store.
    #[must_use]
    pub fn palettes(&self) -> &PaletteStore {
        &self.palettes
    }

    /// The controller, with any view state left by a replay.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Run `command`, writing its report to `out`.
    ///
    /// Every committed document change is reported as one JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown ids or names, invalid URLs, unreadable
    /// scripts, rejected drops, and failed writes to `out`.
    pub fn execute(&mut self, command: &Command, out: &mut dyn Write) -> anyhow::Result<()> {
        tracing::debug!("Executing {command:?}");
        match command {
            Command::Show => self.show(out)?,
            Command::Add { emoji, x, y, size } => {
                self.document
                    .add_emoji(emoji, Position::new(*x, *y), *size)
                    .ok_or(ArtError::IdSpaceExhausted)?;
            }
            Command::Move { id, x, y } => {
                let id = self.resolve(*id)?;
                self.document.move_emoji_by_id(id, Position::new(*x, *y));
            }
            Command::Resize { id, size } => {
                let id = self.resolve(*id)?;
                self.document.resize_emoji_by_id(id, *size);
            }
            Command::Remove { id } => {
                let id = self.resolve(*id)?;
                self.document.remove_emoji_by_id(id);
            }
            Command::Background { url } => {
                let background = url
                    .as_deref()
                    .map(Url::parse)
                    .transpose()
                    .map_err(ArtError::from)?;
                self.document.set_background(background);
            }
            Command::Drop {
                payload,
                at_x,
                at_y,
            } => self.drop_string(payload, *at_x, *at_y)?,
            Command::Replay { script } => {
                let text = fs::read_to_string(script)
                    .with_context(|| format!("Failed to read script {}", script.display()))?;
                self.replay(&text, out)?;
            }
            Command::Palettes(command) => self.palette_command(command, out)?,
        }
        self.report_changes(out)
    }

    /// Apply a gesture script, blank lines skipped. Each line is either one
    /// JSON [`Gesture`] or a [`GestureFrame`] whose families apply together.
    /// Prints the resulting view.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first line that is not a gesture.
    pub fn replay(&mut self, script: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let mut applied = 0usize;
        for (number, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed: ScriptLine = serde_json::from_str(line)
                .with_context(|| format!("Invalid gesture on line {}", number + 1))?;
            match parsed {
                ScriptLine::Gesture(gesture) => {
                    self.controller
                        .handle(gesture, &mut self.document, self.viewport);
                }
                ScriptLine::Frame(frame) => {
                    self.controller
                        .handle_frame(&frame, &mut self.document, self.viewport);
                }
            }
            applied += 1;
        }
        tracing::info!("Replayed {applied} gestures");

        let pan = self.controller.pan();
        writeln!(
            out,
            "replayed {applied} gestures: zoom {} pan ({}, {}) selected {}",
            self.controller.zoom(),
            pan.width,
            pan.height,
            self.controller.selection().len()
        )?;
        Ok(())
    }

    fn show(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.document.background() {
            Some(url) => writeln!(out, "background {url}")?,
            None => writeln!(out, "background none")?,
        }
        for emoji in self.document.emojis() {
            writeln!(
                out,
                "#{} {} at {} size {}",
                emoji.id, emoji.emoji, emoji.position, emoji.size
            )?;
        }
        Ok(())
    }

    fn resolve(&self, raw: u64) -> anyhow::Result<EmojiId> {
        let id = EmojiId::new(raw);
        if self.document.index_of(id).is_none() {
            return Err(ArtError::EmojiNotFound(id.to_string()).into());
        }
        Ok(id)
    }

    fn drop_string(
        &mut self,
        payload: &str,
        at_x: Option<f64>,
        at_y: Option<f64>,
    ) -> anyhow::Result<()> {
        let center = self.viewport.center();
        let location = ViewportPoint::new(at_x.unwrap_or(center.x), at_y.unwrap_or(center.y));
        let payload = DropPayload::from_string(payload);
        let accepted = self.controller.drop_payload(
            DropTarget::Canvas,
            payload,
            location,
            self.viewport,
            &mut self.document,
        );
        anyhow::ensure!(accepted, "Drop was rejected by the canvas");
        Ok(())
    }

    fn palette_command(&mut self, command: &PaletteCommand, out: &mut dyn Write) -> anyhow::Result<()> {
        match command {
            PaletteCommand::List => {
                let current = self.palettes.cursor_index();
                for (index, palette) in self.palettes.palettes().iter().enumerate() {
                    let marker = if index == current { '*' } else { ' ' };
                    writeln!(out, "{marker} {index} {} {}", palette.name, palette.emojis())?;
                }
            }
            PaletteCommand::Next { steps } => {
                self.palettes.advance_cursor(*steps);
                let palette = self.palettes.current();
                writeln!(
                    out,
                    "{} {} {}",
                    self.palettes.cursor_index(),
                    palette.name,
                    palette.emojis()
                )?;
            }
            PaletteCommand::New { name, emojis, at } => {
                let id = self.palettes.insert_new(name, emojis, *at);
                writeln!(out, "created palette {name} ({id})")?;
            }
            PaletteCommand::AddEmojis { name, emojis } => {
                let index = self.palette_index(name)?;
                self.palettes
                    .update(index, |palette| palette.add_emojis(emojis))?;
            }
            PaletteCommand::Remove { name } => {
                let index = self.palette_index(name)?;
                let removed = self.palettes.remove(index)?;
                writeln!(out, "removed palette {}", removed.name)?;
            }
        }
        Ok(())
    }

    fn palette_index(&self, name: &str) -> anyhow::Result<usize> {
        self.palettes
            .palettes()
            .iter()
            .position(|palette| palette.name == name)
            .ok_or_else(|| ArtError::PaletteNotFound(name.to_string()).into())
    }

    fn report_changes(&mut self, out: &mut dyn Write) -> anyhow::Result<()> {
        for change in self.document.take_changes() {
            writeln!(out, "{}", serde_json::to_string(&change)?)?;
        }
        Ok(())
    }
}
