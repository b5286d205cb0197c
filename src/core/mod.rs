pub mod mount;
pub mod page;
pub mod runner;

pub use crate::domain::model::{AnswerNode, Container, Flags, InitOptions, Part};
pub use crate::domain::ports::{Application, InputSource, Instance, PageSink};
pub use crate::utils::error::Result;
