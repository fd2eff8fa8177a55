//! Markdown rendering of roadmaps.
//!
//! Sections that would be empty are omitted. Objectives, hands-on tasks and
//! milestones render as task-list checkboxes so the document doubles as a
//! progress tracker.

use std::fmt::{self, Write};
use std::path::Path;

use log::debug;

use super::models::{Phase, Project, Roadmap, Topic};
use crate::error_handling::RoadmapError;

/// Renders a full roadmap.
pub fn format_roadmap(roadmap: &Roadmap) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_roadmap(&mut out, roadmap);
    out
}

/// Renders one phase, ending with a horizontal rule.
pub fn format_phase(phase: &Phase) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_phase(&mut out, phase);
    out
}

pub async fn save_to_file(roadmap: &Roadmap, path: &Path) -> Result<(), RoadmapError> {
    tokio::fs::write(path, format_roadmap(roadmap)).await?;
    debug!("Wrote roadmap Markdown to {}", path.display());
    Ok(())
}

fn write_roadmap(out: &mut impl Write, roadmap: &Roadmap) -> fmt::Result {
    writeln!(out, "# 🗺️ {}", roadmap.title)?;
    writeln!(out)?;
    writeln!(out, "**Domain:** {}", roadmap.domain)?;
    writeln!(out)?;
    writeln!(out, "## Overview")?;
    writeln!(out)?;
    writeln!(out, "{}", roadmap.description)?;
    writeln!(out)?;
    writeln!(out, "- **Target Audience:** {}", roadmap.target_audience)?;
    writeln!(out, "- **Total Duration:** {}", roadmap.total_duration)?;
    writeln!(
        out,
        "- **Generated:** {}",
        roadmap.generated_at.format("%B %d, %Y")
    )?;
    writeln!(out)?;

    if !roadmap.prerequisites.is_empty() {
        writeln!(out, "## Prerequisites")?;
        writeln!(out)?;
        write_bullets(out, &roadmap.prerequisites)?;
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out)?;

    for phase in &roadmap.phases {
        write_phase(out, phase)?;
        writeln!(out)?;
    }

    if !roadmap.next_steps.is_empty() {
        writeln!(out, "## 🚀 Next Steps")?;
        writeln!(out)?;
        write_bullets(out, &roadmap.next_steps)?;
        writeln!(out)?;
    }

    Ok(())
}

fn write_phase(out: &mut impl Write, phase: &Phase) -> fmt::Result {
    writeln!(out, "## Phase {}: {}", phase.phase_number, phase.title)?;
    writeln!(out)?;
    writeln!(out, "**Duration:** {}", phase.duration)?;
    writeln!(out)?;

    if !phase.learning_objectives.is_empty() {
        writeln!(out, "### 🎯 Learning Objectives")?;
        writeln!(out)?;
        write_checklist(out, &phase.learning_objectives)?;
        writeln!(out)?;
    }

    if !phase.topics.is_empty() {
        writeln!(out, "### 📚 Topics")?;
        writeln!(out)?;
        for topic in &phase.topics {
            write_topic(out, topic)?;
            writeln!(out)?;
        }
    }

    if !phase.projects.is_empty() {
        writeln!(out, "### 🛠️ Projects")?;
        writeln!(out)?;
        for project in &phase.projects {
            write_project(out, project)?;
            writeln!(out)?;
        }
    }

    if !phase.milestones.is_empty() {
        writeln!(out, "### ✅ Milestones")?;
        writeln!(out)?;
        write_checklist(out, &phase.milestones)?;
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out)
}

fn write_topic(out: &mut impl Write, topic: &Topic) -> fmt::Result {
    writeln!(out, "#### {}", topic.name)?;
    writeln!(out)?;
    writeln!(out, "{}", topic.description)?;
    writeln!(out)?;

    if !topic.key_concepts.is_empty() {
        writeln!(out, "**Key Concepts:**")?;
        write_bullets(out, &topic.key_concepts)?;
        writeln!(out)?;
    }

    if !topic.resources.is_empty() {
        writeln!(out, "**Resources:**")?;
        writeln!(out)?;
        writeln!(out, "| Type | Title | Difficulty | Time |")?;
        writeln!(out, "|------|-------|------------|------|")?;
        for resource in &topic.resources {
            writeln!(
                out,
                "| {} {} | [{}]({}) | {} | {} |",
                resource.resource_type.emoji(),
                resource.resource_type,
                resource.title,
                resource.url,
                resource.difficulty,
                resource.estimated_time
            )?;
        }
        writeln!(out)?;
    }

    if !topic.hands_on_tasks.is_empty() {
        writeln!(out, "**Hands-on Tasks:**")?;
        write_checklist(out, &topic.hands_on_tasks)?;
        writeln!(out)?;
    }

    Ok(())
}

fn write_project(out: &mut impl Write, project: &Project) -> fmt::Result {
    writeln!(out, "#### 💻 {}", project.name)?;
    writeln!(out)?;
    writeln!(out, "{}", project.description)?;
    writeln!(out)?;
    writeln!(out, "- **Difficulty:** {}", project.difficulty)?;
    writeln!(out, "- **Estimated Time:** {}", project.estimated_time)?;

    if !project.skills_practiced.is_empty() {
        writeln!(out, "- **Skills:** {}", project.skills_practiced.join(", "))?;
    }

    if !project.requirements.is_empty() {
        writeln!(out, "- **Requirements:**")?;
        for requirement in &project.requirements {
            writeln!(out, "  - {}", requirement)?;
        }
    }

    writeln!(out)
}

fn write_bullets(out: &mut impl Write, items: &[String]) -> fmt::Result {
    for item in items {
        writeln!(out, "- {}", item)?;
    }
    Ok(())
}

fn write_checklist(out: &mut impl Write, items: &[String]) -> fmt::Result {
    for item in items {
        writeln!(out, "- [ ] {}", item)?;
    }
    Ok(())
}
