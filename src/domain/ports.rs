use crate::domain::model::{AnswerNode, Container, Flags, InitOptions};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A puzzle solver that can be mounted into a container.
pub trait Application: Send + Sync {
    fn name(&self) -> &str;

    /// Renders into `options.node` and returns the live instance.
    fn init(&self, options: InitOptions) -> Result<Box<dyn Instance>>;
}

/// A running application bound to one answer node.
pub trait Instance: Send {
    fn flags(&self) -> &Flags;
}

/// Where puzzle input text comes from.
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn fetch_text(&self, locator: &str) -> Result<String>;
}

/// The page containers get appended to.
pub trait PageSink: Send + Sync {
    fn append(&self, container: Container) -> AnswerNode;
}
