use crate::config::MediaConfig;

/// Builds the externally reachable URL of a stored upload:
/// `host + static_url + media_url + relative_path`, with exactly one slash
/// between segments.
pub fn public_url(media: &MediaConfig, relative_path: &str) -> String {
    let segments = [
        media.static_url.as_str(),
        media.media_url.as_str(),
        relative_path,
    ];

    let mut url = media.host.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}
