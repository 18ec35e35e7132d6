//! List, search and summary handlers

use anyhow::Result;

use crate::TaskTracker;
use crate::formatting;
use crate::tracker::SearchCriteria;
use crate::validation;

impl TaskTracker {
    /// List tasks, optionally filtered by title substring, category and priority
    pub fn handle_list(
        &self,
        title: Option<String>,
        category: Option<String>,
        priority: Option<String>,
    ) -> Result<String> {
        let criteria = SearchCriteria {
            title: title.filter(|t| !t.is_empty()),
            category: category
                .map(|c| validation::resolve_category(&self.store, &c))
                .transpose()?,
            priority: priority
                .map(|p| validation::resolve_priority(&self.store, &p))
                .transpose()?,
        };

        let tasks = self.store.search(&criteria);
        Ok(formatting::format_tasks(&tasks, &self.store))
    }

    pub fn handle_summary(&self) -> Result<String> {
        Ok(formatting::format_summary(&self.store.summary()))
    }
}
