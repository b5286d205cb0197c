use crate::domain::model::{AnswerNode, Container};
use crate::domain::ports::PageSink;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// In-memory page. Blocks keep the order their containers were appended in,
/// regardless of when each answer gets rendered.
#[derive(Debug, Clone, Default)]
pub struct Page {
    blocks: Arc<Mutex<Vec<Container>>>,
}

#[derive(Debug, Serialize)]
struct BlockView<'a> {
    label: &'a str,
    margin_bottom_px: u32,
    answer: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current blocks. Answer nodes are still live.
    pub fn blocks(&self) -> Vec<Container> {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn render(&self, format: PageFormat, title: &str) -> Result<String> {
        let blocks = self.blocks();
        match format {
            PageFormat::Text => Ok(render_text(&blocks)),
            PageFormat::Html => Ok(render_html(&blocks, title)),
            PageFormat::Json => {
                let views: Vec<BlockView<'_>> = blocks
                    .iter()
                    .map(|block| BlockView {
                        label: &block.label,
                        margin_bottom_px: block.margin_bottom_px,
                        answer: block.answer.content(),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&views)?)
            }
        }
    }
}

impl PageSink for Page {
    fn append(&self, container: Container) -> AnswerNode {
        let node = container.answer.clone();
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(container);
        node
    }
}

fn render_text(blocks: &[Container]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&block.label);
        out.push('\n');
        if let Some(answer) = block.answer.content() {
            out.push_str(&answer);
            if !answer.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}

fn render_html(blocks: &[Container], title: &str) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", escape_html(title)));
    for block in blocks {
        out.push_str(&format!(
            "<div style=\"margin-bottom: {}px\"><b>{}</b><div>{}</div></div>\n",
            block.margin_bottom_px,
            escape_html(&block.label),
            escape_html(&block.answer.content().unwrap_or_default()),
        ));
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
