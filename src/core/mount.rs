use crate::domain::model::{Container, Flags, InitOptions, Part};
use crate::domain::ports::{Application, InputSource, Instance, PageSink};
use crate::utils::error::{HarnessError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Mounts applications onto a page, fetching their input from one source.
#[derive(Clone)]
pub struct Harness {
    page: Arc<dyn PageSink>,
    inputs: Arc<dyn InputSource>,
}

impl Harness {
    pub fn new(page: Arc<dyn PageSink>, inputs: Arc<dyn InputSource>) -> Self {
        Self { page, inputs }
    }

    /// Appends a `(Solution N)` container right away, then fetches `locator`
    /// in a spawned task and initializes `application` with the text.
    ///
    /// Must be called from within a Tokio runtime. The container stays empty
    /// if the fetch fails; the failure is only visible through the handle.
    pub fn mount(
        &self,
        application: Arc<dyn Application>,
        part: Part,
        locator: impl Into<String>,
    ) -> MountHandle {
        let locator = locator.into();
        let node = self.page.append(Container::for_part(part));
        tracing::debug!(
            "Mounted container for part {} of '{}' (input: {})",
            part,
            application.name(),
            locator
        );

        let inputs = Arc::clone(&self.inputs);
        let task_locator = locator.clone();
        let task = tokio::spawn(async move {
            let input = match inputs.fetch_text(&task_locator).await {
                Ok(input) => input,
                Err(e) => {
                    tracing::debug!("Input fetch for part {} failed: {}", part, e);
                    return Err(e);
                }
            };

            tracing::debug!(
                "Initializing '{}' for part {} with {} bytes of input",
                application.name(),
                part,
                input.len()
            );
            application.init(InitOptions {
                node,
                flags: Flags { part, input },
            })
        });

        MountHandle {
            part,
            locator,
            task,
        }
    }
}

/// Outcome of one mount. Dropping it or calling [`MountHandle::detach`]
/// leaves the mount running unobserved.
#[must_use = "await `settled` to observe failures, or call `detach` to ignore them"]
pub struct MountHandle {
    part: Part,
    locator: String,
    task: JoinHandle<Result<Box<dyn Instance>>>,
}

impl MountHandle {
    pub fn part(&self) -> Part {
        self.part
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the fetch and initialization to finish.
    pub async fn settled(self) -> Result<Box<dyn Instance>> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(HarnessError::MountTaskError {
                part: self.part,
                message: e.to_string(),
            }),
        }
    }

    /// Fire-and-forget: the mount keeps running and its outcome is discarded.
    pub fn detach(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::Page;
    use crate::domain::model::AnswerNode;
    use async_trait::async_trait;

    struct FixedInputs;

    #[async_trait]
    impl InputSource for FixedInputs {
        async fn fetch_text(&self, locator: &str) -> Result<String> {
            Ok(format!("contents of {}", locator))
        }
    }

    struct Shout;

    struct ShoutInstance {
        flags: Flags,
    }

    impl Instance for ShoutInstance {
        fn flags(&self) -> &Flags {
            &self.flags
        }
    }

    impl Application for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn init(&self, options: InitOptions) -> Result<Box<dyn Instance>> {
            options.node.render(options.flags.input.to_uppercase());
            Ok(Box::new(ShoutInstance {
                flags: options.flags,
            }))
        }
    }

    struct Panics;

    impl Application for Panics {
        fn name(&self) -> &str {
            "panics"
        }

        fn init(&self, _options: InitOptions) -> Result<Box<dyn Instance>> {
            panic!("solver blew up");
        }
    }

    #[tokio::test]
    async fn test_mount_renders_into_appended_container() {
        let page = Page::new();
        let harness = Harness::new(Arc::new(page.clone()), Arc::new(FixedInputs));

        let handle = harness.mount(Arc::new(Shout), Part(1), "a.txt");
        assert_eq!(handle.part(), Part(1));
        assert_eq!(handle.locator(), "a.txt");

        let instance = handle.settled().await.unwrap();
        assert_eq!(instance.flags().input, "contents of a.txt");

        let blocks = page.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].answer.content().as_deref(), Some("CONTENTS OF A.TXT"));
    }

    #[tokio::test]
    async fn test_panicking_application_is_isolated() {
        let page = Page::new();
        let harness = Harness::new(Arc::new(page.clone()), Arc::new(FixedInputs));

        let broken = harness.mount(Arc::new(Panics), Part(1), "a.txt");
        let healthy = harness.mount(Arc::new(Shout), Part(2), "b.txt");

        let err = broken.settled().await.err().unwrap();
        assert!(matches!(err, HarnessError::MountTaskError { part: Part(1), .. }));
        assert!(healthy.settled().await.is_ok());

        let answers: Vec<AnswerNode> = page.blocks().into_iter().map(|b| b.answer).collect();
        assert!(answers[0].is_empty());
        assert!(!answers[1].is_empty());
    }
}
