use anyhow::Result;

use crate::HistoryEntry;

use super::super::Container;

pub struct HistoryController<'a> {
    container: &'a Container,
}

impl<'a> HistoryController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn history(&self, username: String) -> Result<String> {
        let use_case = self.container.history_use_case();
        let entries = use_case.execute(&username).await?;
        Ok(self.format_history(&username, &entries))
    }

    fn format_history(&self, username: &str, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return format!("No history for {}.", username);
        }

        let mut output = format!("History for {} ({} entries):\n\n", username, entries.len());
        for (i, entry) in entries.iter().enumerate() {
            output.push_str(&format!("{}. [{}]\n", i + 1, entry.timestamp()));
            output.push_str(&format!("   > {}\n", entry.prompt()));
            let reply: String = entry
                .response()
                .lines()
                .map(|l| format!("   | {}", l))
                .collect::<Vec<_>>()
                .join("\n");
            output.push_str(&reply);
            output.push_str("\n\n");
        }

        output
    }
}
