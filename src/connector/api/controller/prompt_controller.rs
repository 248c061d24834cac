use anyhow::Result;

use super::super::Container;

pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn prompt(&self, text: String, username: String) -> Result<String> {
        let use_case = self.container.submit_prompt_use_case();
        let response = use_case.execute(&username, &text).await?;
        Ok(response)
    }
}
