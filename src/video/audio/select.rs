use crate::video::support::probe::StreamDescriptor;

const ITALIAN_BONUS: u32 = 100;
const ENGLISH_BONUS: u32 = 90;
const PER_CHANNEL: u32 = 5;
const DEFAULT_DISPOSITION: u32 = 2;

/// Preference score for an audio stream: Italian, then English, then more
/// channels, then the container's default track.
pub fn audio_score(stream: &StreamDescriptor) -> u32 {
    let language_bonus = match stream.language.as_deref().map(str::to_ascii_lowercase) {
        Some(lang) if lang == "ita" => ITALIAN_BONUS,
        Some(lang) if lang == "eng" || lang == "en" => ENGLISH_BONUS,
        _ => 0,
    };
    let default_bonus = if stream.is_default {
        DEFAULT_DISPOSITION
    } else {
        0
    };
    // channel counts come straight from container metadata
    language_bonus
        .saturating_add(stream.channels.saturating_mul(PER_CHANNEL))
        .saturating_add(default_bonus)
}

/// Container index of the best audio stream, or `None` when the input has
/// no audio at all. Equal scores keep the earliest stream.
pub fn select_primary_audio(streams: &[StreamDescriptor]) -> Option<u32> {
    let mut best: Option<(&StreamDescriptor, u32)> = None;
    for stream in streams.iter().filter(|s| s.is_audio()) {
        let score = audio_score(stream);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((stream, score));
        }
    }
    best.map(|(stream, _)| stream.index)
}
