use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::feed::Episode;

/// Shown in a grid whose slice of the feed is empty
pub const EMPTY_SECTION_HTML: &str =
    r#"<p class="text-gray-500 col-span-full">No episodes to display in this section.</p>"#;

/// Compact row card used by the most-played and all-episodes grids
pub fn podcast_card_html(episode: &Episode) -> String {
    let title = encode_text(&episode.title);
    let title_attr = encode_double_quoted_attribute(&episode.title);
    let audio_url = encode_double_quoted_attribute(&episode.audio_url);
    let link = encode_double_quoted_attribute(&episode.link);

    format!(
        r#"<div class="podcast-card flex items-center space-x-4 shadow">
    <a href="{audio_url}" target="_blank" class="play-button focus:outline-none" aria-label="Play episode {title_attr}">
        <span class="material-icons text-gray-700">play_arrow</span>
    </a>
    <div><h4 class="font-medium text-gray-700 truncate" title="{title_attr}"><a href="{link}" target="_blank">{title}</a></h4><p class="text-sm text-gray-500">{duration}</p></div>
</div>
"#,
        duration = episode.formatted_duration(),
    )
}

/// Large card with artwork used by the highlights grid
pub fn highlight_card_html(episode: &Episode) -> String {
    let title = encode_text(&episode.title);
    let title_attr = encode_double_quoted_attribute(&episode.title);
    let audio_url = encode_double_quoted_attribute(&episode.audio_url);
    let link = encode_double_quoted_attribute(&episode.link);

    let thumbnail = match &episode.image_url {
        Some(image_url) => format!(
            r#"<img src="{}" alt="{title_attr}" class="w-full h-48 object-cover">"#,
            encode_double_quoted_attribute(image_url)
        ),
        None => r#"<span class="material-icons text-6xl text-gray-400">mic</span>"#.to_string(),
    };

    format!(
        r#"<div class="bg-white rounded-xl shadow-lg overflow-hidden">
    <a href="{audio_url}" target="_blank" class="w-full h-48 thumbnail-placeholder flex items-center justify-center bg-gray-200 hover:bg-gray-300" aria-label="Play episode {title_attr}">{thumbnail}</a>
    <div class="p-4"><h4 class="font-semibold text-gray-800 mb-1 truncate" title="{title_attr}"><a href="{link}" target="_blank">{title}</a></h4><p class="text-sm text-gray-500 mb-2">{duration}</p></div>
</div>
"#,
        duration = episode.formatted_duration(),
    )
}

/// Artwork of the featured episode
pub fn featured_image_html(episode: &Episode) -> String {
    match &episode.image_url {
        Some(image_url) => format!(
            r#"<img src="{}" alt="{}" class="w-full h-full object-cover rounded-lg">"#,
            encode_double_quoted_attribute(image_url),
            encode_double_quoted_attribute(&episode.title)
        ),
        None => r#"<span class="material-icons text-8xl text-gray-400">podcasts</span>"#.to_string(),
    }
}
