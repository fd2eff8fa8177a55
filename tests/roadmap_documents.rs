//! Loading roadmap JSON documents and rendering them to files.

use roadmap_agent::roadmap::{json, markdown, Difficulty, ResourceType};

const DOCUMENT: &str = r#"{
  "title": "UI/UX Designer",
  "domain": "ui-ux",
  "description": "Design usable interfaces.",
  "targetAudience": "Career changers",
  "prerequisites": [],
  "totalDuration": "5 months",
  "phases": [
    {
      "phaseNumber": 1,
      "title": "Design Foundations",
      "duration": "3 weeks",
      "learningObjectives": ["Apply visual hierarchy"],
      "topics": [
        {
          "name": "Typography",
          "description": "Type scales and pairing.",
          "resources": [
            {
              "title": "Type Basics",
              "type": "Video",
              "url": "https://www.youtube.com/watch?v=type",
              "description": "",
              "difficulty": "Beginner",
              "estimatedTime": "45 min"
            }
          ],
          "handsOnTasks": ["Recreate a landing page"],
          "keyConcepts": ["Leading", "Kerning"]
        }
      ],
      "projects": [
        {
          "name": "Mobile Redesign",
          "description": "Redesign a banking app.",
          "skillsParcticed": ["Figma"],
          "difficulty": "Intermediate",
          "requirements": []
        }
      ],
      "milestones": []
    }
  ],
  "nextSteps": ["Build a portfolio"],
  "generatedAt": "2026-01-15T09:30:00Z"
}"#;

#[tokio::test]
async fn test_load_document_and_render_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("roadmap.json");
    let output = dir.path().join("roadmap.md");
    std::fs::write(&input, DOCUMENT).unwrap();

    let roadmap = json::load_from_file(&input).await.unwrap();
    let resource = &roadmap.phases[0].topics[0].resources[0];
    assert_eq!(resource.resource_type, ResourceType::Video);
    assert_eq!(roadmap.phases[0].projects[0].difficulty, Difficulty::Intermediate);
    assert_eq!(roadmap.phases[0].projects[0].skills_practiced, vec!["Figma"]);

    markdown::save_to_file(&roadmap, &output).await.unwrap();
    let md = std::fs::read_to_string(&output).unwrap();

    assert!(md.contains("- **Generated:** January 15, 2026"));
    assert!(md.contains("| 📺 Video | [Type Basics](https://www.youtube.com/watch?v=type) | Beginner | 45 min |"));
    assert!(md.contains("**Key Concepts:**\n- Leading\n- Kerning\n"));
    assert!(md.contains("#### 💻 Mobile Redesign"));
    assert!(md.contains("- **Skills:** Figma\n"));
    // Empty lists produce no section
    assert!(!md.contains("## Prerequisites"));
    assert!(!md.contains("### ✅ Milestones"));
}

#[tokio::test]
async fn test_json_save_normalizes_keys() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("normalized.json");

    let roadmap = json::from_json(DOCUMENT).unwrap();
    json::save_to_file(&roadmap, &output).await.unwrap();
    let written = std::fs::read_to_string(&output).unwrap();

    assert!(written.contains("\"skillsPracticed\""));
    assert!(!written.contains("skillsParcticed"));
    assert_eq!(json::load_from_file(&output).await.unwrap(), roadmap);
}
