use std::io::Write;

use color_eyre::eyre::{Result, eyre};
use tracing::debug;

use crate::application::ImageOperations;
use crate::application::services::LocalDeletion;
use crate::domain::entities::{Image, ImageId, ImageQuery};
use crate::infrastructure::config::Command;

/// Runs one CLI command against the image operations and prints the result.
pub struct CommandRunner {
    ops: ImageOperations,
    page_size: u32,
}

impl CommandRunner {
    #[must_use]
    pub const fn new(ops: ImageOperations, page_size: u32) -> Self {
        Self { ops, page_size }
    }

    #[must_use]
    pub const fn operations(&self) -> &ImageOperations {
        &self.ops
    }

    /// Executes `command`, writing human readable output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails or output cannot be written.
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        debug!(command = ?command, "Running command");

        match command {
            Command::Browse { page, limit } => {
                self.browse(page, limit.unwrap_or(self.page_size), out).await
            }
            Command::Save { id } => self.save(&ImageId::new(id), out).await,
            Command::List => self.list(out).await,
            Command::Show { id } => self.show(&ImageId::new(id), out).await,
            Command::Delete { id } => self.delete(&ImageId::new(id), out).await,
            Command::Clear => self.clear(out).await,
            Command::PurgeCache => self.purge_cache(out).await,
        }
    }

    async fn browse<W: Write>(&self, page: u32, limit: u32, out: &mut W) -> Result<()> {
        let result = self.ops.browse(ImageQuery::new(page, limit)).await?;

        for image in &result.images {
            let marker = if self.ops.is_saved(&image.id) { " *" } else { "" };
            writeln!(out, "{}{marker}", describe(image))?;
        }
        match result.next_page {
            Some(next) => writeln!(out, "more: --page {next}")?,
            None => writeln!(out, "end of gallery")?,
        }
        Ok(())
    }

    async fn save<W: Write>(&self, id: &ImageId, out: &mut W) -> Result<()> {
        let image = self.ops.fetch(id).await?;
        let saved = self.ops.save(image).await?;

        let source = saved
            .local_path()
            .map_or_else(|| saved.url.clone(), |path| path.display().to_string());
        writeln!(out, "saved {} -> {source}", saved.id)?;
        Ok(())
    }

    async fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        let images = self.ops.store().saved_images();
        if images.is_empty() {
            writeln!(out, "no saved images")?;
            return Ok(());
        }

        for image in &images {
            let source = self.ops.resolve_source(image).await;
            writeln!(out, "{}  {source}", describe(image))?;
        }
        Ok(())
    }

    async fn show<W: Write>(&self, id: &ImageId, out: &mut W) -> Result<()> {
        let image = self
            .ops
            .store()
            .find(id)
            .ok_or_else(|| eyre!("image {id} is not saved"))?;

        writeln!(out, "id:     {}", image.id)?;
        writeln!(out, "author: {}", image.author)?;
        writeln!(out, "size:   {}x{}", image.width, image.height)?;
        writeln!(out, "url:    {}", image.url)?;
        writeln!(out, "source: {}", self.ops.resolve_source(&image).await)?;
        Ok(())
    }

    async fn delete<W: Write>(&self, id: &ImageId, out: &mut W) -> Result<()> {
        if !self.ops.is_saved(id) {
            return Err(eyre!("image {id} is not saved"));
        }
        self.ops.delete(id).await?;
        writeln!(out, "deleted {id}")?;
        Ok(())
    }

    async fn clear<W: Write>(&self, out: &mut W) -> Result<()> {
        let count = self.ops.store().saved_images().len();
        self.ops.clear_all().await?;
        writeln!(out, "cleared {count} saved images")?;
        Ok(())
    }

    async fn purge_cache<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.ops.purge_local_cache().await {
            LocalDeletion::Removed => writeln!(out, "local cache removed")?,
            LocalDeletion::NotFound => writeln!(out, "local cache already empty")?,
            LocalDeletion::Unavailable => writeln!(out, "local storage is unavailable")?,
            LocalDeletion::Failed(reason) => return Err(eyre!("failed to purge cache: {reason}")),
        }
        Ok(())
    }
}

fn describe(image: &Image) -> String {
    format!(
        "{:>6}  {:<24}  {}x{}",
        image.id, image.author, image.width, image.height
    )
}
