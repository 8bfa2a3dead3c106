use serde::{de::DeserializeOwned, Serialize};

use crate::{Message, Project, ProjectDraft, ProjectPatch, ResourceId, Skill, SkillDraft, SkillPatch};

/// A backend collection reachable at `/<COLLECTION>` with per-entity routes
/// at `/<COLLECTION>/{id}`.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment of the collection, e.g. `skills`.
    const COLLECTION: &'static str;
    /// Human readable singular name used in notices, e.g. `skill`.
    const LABEL: &'static str;

    fn id(&self) -> ResourceId;
}

/// A collection the admin may add entities to.
pub trait Creatable: Resource {
    type Draft: Serialize + Clone + Default + Send + Sync + 'static;

    /// Client-side check run before a draft is posted. Returns the message to
    /// show when the draft is incomplete.
    fn validate_draft(draft: &Self::Draft) -> Result<(), String>;
}

/// A collection whose entities may be edited in place.
pub trait Editable: Resource {
    type Patch: Serialize + Clone + Send + Sync + 'static;

    fn validate_patch(_patch: &Self::Patch) -> Result<(), String> {
        Ok(())
    }

    /// Merge an accepted patch into the local copy. Fields absent from the
    /// patch must stay untouched.
    fn apply_patch(&mut self, patch: &Self::Patch);
}

fn check_level(level: Option<u8>) -> Result<(), String> {
    match level {
        Some(level) if level > 100 => Err(format!("Level must be between 0 and 100, got {level}")),
        _ => Ok(()),
    }
}

impl Resource for Skill {
    const COLLECTION: &'static str = "skills";
    const LABEL: &'static str = "skill";

    fn id(&self) -> ResourceId {
        self.id
    }
}

impl Creatable for Skill {
    type Draft = SkillDraft;

    fn validate_draft(draft: &SkillDraft) -> Result<(), String> {
        if draft.name.trim().is_empty() {
            return Err("Skill name is required".to_string());
        }
        check_level(draft.level)
    }
}

impl Editable for Skill {
    type Patch = SkillPatch;

    fn validate_patch(patch: &SkillPatch) -> Result<(), String> {
        if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err("Skill name is required".to_string());
        }
        check_level(patch.level.flatten())
    }

    fn apply_patch(&mut self, patch: &SkillPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(icon) = &patch.icon {
            self.icon.clone_from(icon);
        }
    }
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "project";

    fn id(&self) -> ResourceId {
        self.id
    }
}

impl Creatable for Project {
    type Draft = ProjectDraft;

    fn validate_draft(draft: &ProjectDraft) -> Result<(), String> {
        if draft.title.trim().is_empty() {
            return Err("Project title is required".to_string());
        }
        if draft.image.trim().is_empty() {
            return Err("Project thumbnail is required".to_string());
        }
        Ok(())
    }
}

impl Editable for Project {
    type Patch = ProjectPatch;

    fn validate_patch(patch: &ProjectPatch) -> Result<(), String> {
        if patch.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err("Project title is required".to_string());
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &ProjectPatch) {
        let fields = [
            (&mut self.title, &patch.title),
            (&mut self.image, &patch.image),
            (&mut self.video_url, &patch.video_url),
            (&mut self.description, &patch.description),
            (&mut self.category, &patch.category),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
    }
}

impl Resource for Message {
    const COLLECTION: &'static str = "messages";
    const LABEL: &'static str = "message";

    fn id(&self) -> ResourceId {
        self.id
    }
}
