//! Diagnostic applications bundled with the binary. Puzzle solvers live
//! outside this crate and register through [`ApplicationRegistry`].
//!
//! [`ApplicationRegistry`]: crate::app::registry::ApplicationRegistry

use crate::domain::model::{Flags, InitOptions};
use crate::domain::ports::{Application, Instance};
use crate::utils::error::Result;

/// Instance that only remembers what it was initialized with.
#[derive(Debug, Clone)]
pub struct StaticInstance {
    flags: Flags,
}

impl Instance for StaticInstance {
    fn flags(&self) -> &Flags {
        &self.flags
    }
}

/// Renders the input text verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Application for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn init(&self, options: InitOptions) -> Result<Box<dyn Instance>> {
        options.node.render(options.flags.input.clone());
        Ok(Box::new(StaticInstance {
            flags: options.flags,
        }))
    }
}

/// Renders line and byte counts of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineStats;

impl Application for LineStats {
    fn name(&self) -> &str {
        "line-stats"
    }

    fn init(&self, options: InitOptions) -> Result<Box<dyn Instance>> {
        let input = &options.flags.input;
        let lines = input.lines().count();
        let blank = input.lines().filter(|l| l.trim().is_empty()).count();
        options.node.render(format!(
            "part {}: {} lines ({} blank), {} bytes",
            options.flags.part,
            lines,
            blank,
            input.len()
        ));
        Ok(Box::new(StaticInstance {
            flags: options.flags,
        }))
    }
}
