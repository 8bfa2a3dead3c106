//! Built-in copy the public pages show when the backend is unreachable or
//! has nothing stored yet.

use portfolio_client::{ContentFields, ContentKey, Project, Skill};

pub const NAME: &str = "Ismail Sanouni";
pub const TITLE: &str = "Video Editor & Motion Designer";
pub const SLOGAN: &str = "Transforming ideas into compelling visual stories with precision, creativity, and technical mastery. From concept to final cut, I bring your vision to life through innovative editing, seamless storytelling, and cinematic-quality production.";
pub const ABOUT: &str = "I am a Video Editor and Content Creator dedicated to helping YouTubers turn raw footage into dynamic, engaging, and professional videos. I specialize in smooth storytelling, precise cuts, and captivating visuals that keep audiences hooked from start to finish.

Whether it\u{2019}s gaming, vlogs, tech, or tutorials, I deliver fast, high-quality edits tailored to your unique style, ensuring your content stands out and resonates with viewers.";

pub const INSTAGRAM: &str = "https://www.instagram.com/ismailsn_12";
pub const LINKEDIN: &str = "https://www.linkedin.com/in/ismailsanouni/";
pub const X: &str = "https://twitter.com/ismailsanouni";

const SKILLS: [(&str, &str); 12] = [
    ("Adobe Premiere Pro", "Industry-standard video editing software for fast, precise edits and professional output."),
    ("Adobe After Effects", "Professional motion graphics and visual effects software for creating dynamic compositions and stunning animations."),
    ("Adobe Illustrator", "Professional vector graphics software for designing precise, scalable illustrations, logos, and graphics."),
    ("Canva Pro", "Easy-to-use online design tool for quickly creating visuals, presentations, and engaging content."),
    ("Adobe Photoshop", "Professional image editing and creation software for precise and creative visuals."),
    ("Final Cut Pro", "Professional video editing software for fast, precise, and cinematic-quality edits."),
    ("DaVinci Resolve", "Professional video editing and color grading software for precise, cinematic-quality videos."),
    ("Avid Media Composer", "Professional video editing software used in film and TV for precise, collaborative editing."),
    ("Adobe Lightroom", "Professional photo editing software to quickly adjust, organize, and enhance your images."),
    ("Adobe Audition", "Professional audio editing and mixing software for clear, precise, studio-quality sound."),
    ("Color Grading", "Professional technique to adjust colors and mood in a video for a consistent and impactful visual look."),
    ("YouTube Advertising", "YouTube advertising to reach a wide audience, increase visibility, and drive effective conversions."),
];

const SHOWCASE: [(&str, &str); 15] = [
    ("YouTube Video 1", "https://www.youtube.com/watch?v=SFpqILrea3g"),
    ("YouTube Video 2", "https://www.youtube.com/watch?v=x89fLNpfCjk"),
    ("YouTube Video 3", "https://www.youtube.com/watch?v=N8ea8Q0yKVM"),
    ("YouTube Video 4", "https://www.youtube.com/watch?v=QmyH15xocnI"),
    ("YouTube Video 5", "https://www.youtube.com/watch?v=nA82QtQsgns"),
    ("YouTube Video 6", "https://www.youtube.com/watch?v=EaPb5i7uxv4"),
    ("YouTube Shorts 1", "https://www.youtube.com/shorts/_SR_R7K4WLg"),
    ("YouTube Shorts 2", "https://www.youtube.com/shorts/LBRSwmcOFV4"),
    ("YouTube Shorts 3", "https://www.youtube.com/shorts/o4kTj0D3j6M"),
    ("YouTube Shorts 4", "https://www.youtube.com/shorts/76BRkjpcXF0"),
    ("YouTube Video 7", "https://www.youtube.com/watch?v=WwzxcgKU_2c"),
    ("YouTube Video 8", "https://www.youtube.com/watch?v=arjK0I-HzkM"),
    ("YouTube Video 9", "https://www.youtube.com/watch?v=K_t8o9vKT70"),
    ("YouTube Video 10", "https://www.youtube.com/watch?v=uVDxLbEfn1U"),
    ("YouTube Video 11", "https://www.youtube.com/watch?v=4GjFOSwf-hI"),
];

/// Fallback for `key`, if there is one.
#[must_use]
pub fn content_value(key: ContentKey) -> Option<&'static str> {
    match key {
        ContentKey::Name => Some(NAME),
        ContentKey::Title => Some(TITLE),
        ContentKey::Slogan => Some(SLOGAN),
        ContentKey::About => Some(ABOUT),
        ContentKey::Instagram => Some(INSTAGRAM),
        ContentKey::Linkedin => Some(LINKEDIN),
        ContentKey::X => Some(X),
        _ => None,
    }
}

#[must_use]
pub fn content() -> ContentFields {
    ContentKey::ALL
        .into_iter()
        .filter_map(|key| content_value(key).map(|value| (key, value.to_string())))
        .collect()
}

#[must_use]
pub fn skills() -> Vec<Skill> {
    SKILLS
        .iter()
        .zip(1..)
        .map(|(&(name, description), id)| Skill {
            id,
            name: name.to_string(),
            level: None,
            description: description.to_string(),
            icon: Some(format!("/assets/skills/skill{id:02}.png")),
        })
        .collect()
}

#[must_use]
pub fn projects() -> Vec<Project> {
    SHOWCASE
        .iter()
        .zip(1..)
        .map(|(&(title, video_url), id)| Project {
            id,
            title: title.to_string(),
            image: String::new(),
            video_url: video_url.to_string(),
            description: String::new(),
            category: "Premiere Pro".to_string(),
        })
        .collect()
}
