use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Bottom margin applied to every solution container.
pub const CONTAINER_MARGIN_BOTTOM_PX: u32 = 16;

/// Which part of a day's puzzle is being solved. Not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Part(pub u32);

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Part {
    fn from(value: u32) -> Self {
        Part(value)
    }
}

/// Payload handed to an application on initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub part: Part,
    pub input: String,
}

/// Slot a mounted application renders its output into.
///
/// Clones share the same slot, so the page and the application see the same
/// content.
#[derive(Debug, Clone, Default)]
pub struct AnswerNode {
    content: Arc<Mutex<Option<String>>>,
}

impl AnswerNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, text: impl Into<String>) {
        let mut content = self.content.lock().unwrap_or_else(PoisonError::into_inner);
        *content = Some(text.into());
    }

    pub fn content(&self) -> Option<String> {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// True when both handles point at the same slot.
    pub fn same_node(&self, other: &AnswerNode) -> bool {
        Arc::ptr_eq(&self.content, &other.content)
    }
}

/// One block on the page: a bold label followed by the answer node.
#[derive(Debug, Clone)]
pub struct Container {
    pub label: String,
    pub margin_bottom_px: u32,
    pub answer: AnswerNode,
}

impl Container {
    pub fn for_part(part: Part) -> Self {
        Self {
            label: format!("(Solution {})", part),
            margin_bottom_px: CONTAINER_MARGIN_BOTTOM_PX,
            answer: AnswerNode::new(),
        }
    }
}

/// Arguments of [`Application::init`](crate::domain::ports::Application::init).
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub node: AnswerNode,
    pub flags: Flags,
}
