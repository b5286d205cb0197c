pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{input_source_for, HttpInputs, LocalInputs};
pub use app::ApplicationRegistry;
pub use config::HarnessConfig;
pub use crate::core::{
    mount::{Harness, MountHandle},
    page::{Page, PageFormat},
    runner::{RunReport, Runner},
};
pub use domain::model::{AnswerNode, Container, Flags, InitOptions, Part};
pub use domain::ports::{Application, InputSource, Instance, PageSink};
pub use utils::error::{HarnessError, Result};
