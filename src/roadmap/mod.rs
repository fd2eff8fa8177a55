//! Learning roadmap documents and their JSON and Markdown renderings.

pub mod json;
pub mod markdown;
mod models;

pub use models::{Difficulty, Phase, Project, Resource, ResourceType, Roadmap, Topic};
