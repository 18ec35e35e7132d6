//! Category handlers

use anyhow::{Result, bail};

use crate::TaskTracker;
use crate::formatting;
use crate::validation;

impl TaskTracker {
    pub fn handle_add_category(&mut self, title: String) -> Result<String> {
        // add_category is a silent no-op on duplicates, so check first
        if self.store.find_category_by_title(&title).is_some() {
            bail!("Category '{}' already exists", title);
        }
        self.store.add_category(title.clone())?;
        self.mark_dirty();
        Ok(format!("Category '{}' created", title))
    }

    pub fn handle_rename_category(&mut self, title: String, new_title: String) -> Result<String> {
        let id = validation::resolve_category(&self.store, &title)?;
        self.store.update_category(id, new_title.clone())?;
        self.mark_dirty();
        Ok(format!("Category '{}' renamed to '{}'", title, new_title))
    }

    /// Delete a category and all of its tasks
    ///
    /// Refused without `confirmed` when any task would be removed.
    pub fn handle_delete_category(&mut self, title: String, confirmed: bool) -> Result<String> {
        let id = validation::resolve_category(&self.store, &title)?;

        let affected = self.store.preview_delete_category(id)?;
        if !affected.is_empty() && !confirmed {
            let mut message = format!(
                "Deleting category '{}' will delete {} task(s):\n",
                title,
                affected.len()
            );
            for task in affected {
                message.push_str(&format!("- [{}] {}\n", task.id(), task.title));
            }
            message.push_str("Run again with --yes to confirm.");
            bail!(message);
        }

        let removed = self.store.delete_category(id)?;
        self.mark_dirty();
        Ok(format!(
            "Deleted category '{}' and {} task(s)",
            title,
            removed.len()
        ))
    }

    pub fn handle_list_categories(&self) -> Result<String> {
        Ok(formatting::format_categories(self.store.categories()))
    }
}
