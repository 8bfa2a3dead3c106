use reqwest::Url;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_PLAYER: &str = "https://player.vimeo.com/video/";

/// Derive an embeddable player URL from a pasted share link.
///
/// Handles YouTube watch, short-link, Shorts and Vimeo page URLs. Player URLs
/// and anything unrecognised come back unchanged, so deriving twice is the
/// same as deriving once.
#[must_use]
pub fn embed_url(url: &str) -> String {
    let trimmed = url.trim();
    let Ok(parsed) = Url::parse(trimmed) else {
        return url.to_string();
    };
    let host = parsed.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.strip_prefix("m.").unwrap_or(host);
    let mut segments = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    let video_id = match host {
        "youtube.com" => match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
                .filter(|id| !id.is_empty())
                .map(|id| format!("{YOUTUBE_EMBED}{id}")),
            Some("shorts" | "live") => segments.next().map(|id| format!("{YOUTUBE_EMBED}{id}")),
            _ => None,
        },
        "youtu.be" => segments.next().map(|id| format!("{YOUTUBE_EMBED}{id}")),
        "vimeo.com" => segments
            .find(|segment| segment.chars().all(|c| c.is_ascii_digit()))
            .map(|id| format!("{VIMEO_PLAYER}{id}")),
        _ => None,
    };

    video_id.unwrap_or_else(|| url.to_string())
}

/// `true` for YouTube Shorts links.
#[must_use]
pub fn is_short(url: &str) -> bool {
    Url::parse(url.trim()).is_ok_and(|parsed| {
        let host = parsed.host_str().unwrap_or_default();
        host.ends_with("youtube.com") && parsed.path().starts_with("/shorts/")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = "https://www.youtube.com/embed/SFpqILrea3g";

    #[test]
    fn youtube_watch_link() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=SFpqILrea3g"),
            EXPECTED
        );
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=SFpqILrea3g&t=42s"),
            EXPECTED
        );
    }

    #[test]
    fn youtube_short_link() {
        assert_eq!(embed_url("https://youtu.be/SFpqILrea3g"), EXPECTED);
        assert_eq!(embed_url("https://youtu.be/SFpqILrea3g?si=share"), EXPECTED);
    }

    #[test]
    fn youtube_shorts_link() {
        assert_eq!(
            embed_url("https://www.youtube.com/shorts/_SR_R7K4WLg"),
            "https://www.youtube.com/embed/_SR_R7K4WLg"
        );
        assert!(is_short("https://www.youtube.com/shorts/_SR_R7K4WLg"));
        assert!(!is_short("https://www.youtube.com/watch?v=SFpqILrea3g"));
    }

    #[test]
    fn vimeo_link() {
        assert_eq!(
            embed_url("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        for input in [
            "https://www.youtube.com/watch?v=SFpqILrea3g",
            "https://youtu.be/SFpqILrea3g",
            "https://vimeo.com/76979871",
            "https://www.youtube.com/shorts/LBRSwmcOFV4",
        ] {
            let once = embed_url(input);
            assert_eq!(embed_url(&once), once, "input: {input}");
        }
        assert_eq!(embed_url(EXPECTED), EXPECTED);
        assert_eq!(
            embed_url("https://player.vimeo.com/video/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
    }

    #[test]
    fn unrecognised_input_is_returned_unchanged() {
        assert_eq!(embed_url(""), "");
        assert_eq!(embed_url("not a url"), "not a url");
        assert_eq!(
            embed_url("https://example.com/watch?v=abc"),
            "https://example.com/watch?v=abc"
        );
        assert_eq!(
            embed_url("https://www.youtube.com/watch"),
            "https://www.youtube.com/watch"
        );
    }
}
