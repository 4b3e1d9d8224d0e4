//! Document capture pipeline.
//!
//! - [`PipelineBuilder`]: fluent builder for configuring a pipeline
//! - [`Pipeline`]: starts jobs, by callback ([`Pipeline::run`]) or as a future
//!   ([`Pipeline::render`])
//! - [`CompletionHandler`]: receives the single outcome of a job
//!
//! # Example
//!
//! ```ignore
//! use folio::PipelineBuilder;
//! use folio::text::{TextDocument, TextSurface};
//!
//! let pipeline = PipelineBuilder::new().build()?;
//! let surface = TextSurface::on_current_runtime(TextDocument::parse("Hello"))?;
//! let path = pipeline.render(surface, "/tmp/out.pdf").await?;
//! ```

mod builder;
pub mod config;
mod guard;
mod handler;
mod job;
mod orchestrator;

pub use builder::PipelineBuilder;
pub use config::PipelineConfig;
pub use handler::{Callbacks, CompletionHandler, PipelineOutcome};
pub use orchestrator::Pipeline;
