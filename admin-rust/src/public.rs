use crate::fallback;
use portfolio_client::{ContentFields, ContentKey, PortfolioClient, Project, ResourceId, Skill};

/// Where a page's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Backend,
    Fallback,
}

/// Fill every blank field that has built-in copy.
fn with_fallback_copy(mut content: ContentFields) -> ContentFields {
    for key in ContentKey::ALL {
        if content.non_empty(key).is_none() {
            if let Some(value) = fallback::content_value(key) {
                content.set(key, value);
            }
        }
    }
    content
}

/// Home, about and skills sections.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub content: ContentFields,
    pub skills: Vec<Skill>,
    pub skills_source: Source,
}

impl HomePage {
    /// Never fails: whatever the backend cannot provide is filled from the
    /// built-in copy.
    pub async fn load(client: &PortfolioClient) -> Self {
        let (content, skills) = futures::join!(client.fetch_content(), client.list::<Skill>());

        let content = content.unwrap_or_else(|error| {
            tracing::warn!(%error, "content unavailable, showing built-in copy");
            ContentFields::new()
        });
        let (skills, skills_source) = match skills {
            Ok(skills) if !skills.is_empty() => (skills, Source::Backend),
            Ok(_) => (fallback::skills(), Source::Fallback),
            Err(error) => {
                tracing::warn!(%error, "skills unavailable, showing built-in list");
                (fallback::skills(), Source::Fallback)
            }
        };

        Self {
            content: with_fallback_copy(content),
            skills,
            skills_source,
        }
    }

    #[must_use]
    pub fn offline() -> Self {
        Self {
            content: fallback::content(),
            skills: fallback::skills(),
            skills_source: Source::Fallback,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.content.name()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.content.title()
    }

    #[must_use]
    pub fn slogan(&self) -> &str {
        self.content.slogan()
    }

    #[must_use]
    pub fn about(&self) -> &str {
        self.content.about()
    }

    #[must_use]
    pub fn profile_image(&self) -> Option<&str> {
        self.content.non_empty(ContentKey::ProfileImage)
    }
}

/// The player shown over the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoModal {
    pub project_id: ResourceId,
    pub title: String,
    pub embed_url: String,
    pub is_short: bool,
}

/// The project gallery.
#[derive(Debug, Clone)]
pub struct WorkPage {
    pub projects: Vec<Project>,
    pub source: Source,
    modal: Option<VideoModal>,
}

impl WorkPage {
    pub async fn load(client: &PortfolioClient) -> Self {
        match client.list::<Project>().await {
            Ok(projects) if !projects.is_empty() => Self::new(projects, Source::Backend),
            Ok(_) => Self::offline(),
            Err(error) => {
                tracing::warn!(%error, "projects unavailable, showing built-in showcase");
                Self::offline()
            }
        }
    }

    #[must_use]
    pub fn offline() -> Self {
        Self::new(fallback::projects(), Source::Fallback)
    }

    fn new(projects: Vec<Project>, source: Source) -> Self {
        Self {
            projects,
            source,
            modal: None,
        }
    }

    /// Landscape videos, in server order.
    pub fn videos(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| !project.is_short())
    }

    pub fn shorts(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| project.is_short())
    }

    /// Open the player for a project. Projects without a video URL do not
    /// open anything.
    pub fn open(&mut self, id: ResourceId) -> Option<&VideoModal> {
        let project = self.projects.iter().find(|project| project.id == id)?;
        let embed_url = project.embed_url()?;
        self.modal = Some(VideoModal {
            project_id: project.id,
            title: project.title.clone(),
            embed_url,
            is_short: project.is_short(),
        });
        self.modal.as_ref()
    }

    pub fn close(&mut self) {
        self.modal = None;
    }

    #[must_use]
    pub fn modal(&self) -> Option<&VideoModal> {
        self.modal.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub key: ContentKey,
    pub label: &'static str,
    pub url: String,
}

/// Social links in the site footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub links: Vec<SocialLink>,
}

impl Footer {
    const KEYS: [ContentKey; 3] = [ContentKey::Instagram, ContentKey::Linkedin, ContentKey::X];

    /// Links from stored content, blanks replaced by the built-in ones.
    #[must_use]
    pub fn from_content(content: &ContentFields) -> Self {
        let links = Self::KEYS
            .into_iter()
            .filter_map(|key| {
                let url = content
                    .non_empty(key)
                    .or_else(|| fallback::content_value(key))?;
                Some(SocialLink {
                    key,
                    label: key.label(),
                    url: url.to_string(),
                })
            })
            .collect();
        Self { links }
    }

    pub async fn load(client: &PortfolioClient) -> Self {
        match client.fetch_content().await {
            Ok(content) => Self::from_content(&content),
            Err(error) => {
                tracing::warn!(%error, "content unavailable, showing built-in links");
                Self::from_content(&ContentFields::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_gallery_splits_videos_and_shorts() {
        let page = WorkPage::offline();
        assert_eq!(page.videos().count(), 11);
        assert_eq!(page.shorts().count(), 4);
        assert!(page.shorts().all(|project| project.title.starts_with("YouTube Shorts")));
    }

    #[test]
    fn footer_prefers_stored_links() {
        let mut content = ContentFields::new();
        content.set(ContentKey::Instagram, "https://instagram.com/editor");
        content.set(ContentKey::Linkedin, "   ");

        let footer = Footer::from_content(&content);
        let urls: Vec<&str> = footer.links.iter().map(|link| link.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://instagram.com/editor",
                fallback::LINKEDIN,
                fallback::X
            ]
        );
    }
}
