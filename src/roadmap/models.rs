//! Roadmap document model.
//!
//! Field names serialize in camelCase and enums as their variant names, so a
//! roadmap produced by the chat model as JSON loads directly. Every field has
//! a default, which lets partially filled documents load as well.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Kind of learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum ResourceType {
    #[default]
    Documentation,
    Article,
    Video,
    Course,
    Tool,
    Book,
}

impl ResourceType {
    /// Emoji shown next to the type in rendered tables.
    pub fn emoji(&self) -> &'static str {
        match self {
            ResourceType::Documentation => "📖",
            ResourceType::Article => "📄",
            ResourceType::Video => "📺",
            ResourceType::Course => "🎓",
            ResourceType::Tool => "🔧",
            ResourceType::Book => "📚",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Topic {
    pub name: String,
    pub description: String,
    pub resources: Vec<Resource>,
    pub hands_on_tasks: Vec<String>,
    pub key_concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    /// Older documents spell this key `skillsParcticed`
    #[serde(alias = "skillsParcticed")]
    pub skills_practiced: Vec<String>,
    pub difficulty: Difficulty,
    pub requirements: Vec<String>,
    pub estimated_time: String,
}

/// One stage of a roadmap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phase {
    pub phase_number: u32,
    pub title: String,
    pub duration: String,
    pub learning_objectives: Vec<String>,
    pub topics: Vec<Topic>,
    pub projects: Vec<Project>,
    pub milestones: Vec<String>,
}

/// A complete learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Roadmap {
    pub title: String,
    pub domain: String,
    pub description: String,
    pub target_audience: String,
    pub prerequisites: Vec<String>,
    pub total_duration: String,
    pub phases: Vec<Phase>,
    pub next_steps: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Default for Roadmap {
    fn default() -> Self {
        Roadmap {
            title: String::new(),
            domain: String::new(),
            description: String::new(),
            target_audience: String::new(),
            prerequisites: Vec::new(),
            total_duration: String::new(),
            phases: Vec::new(),
            next_steps: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}
