//! Deterministic language-candidate ranking.
//!
//! Given a `CaptionAvailability` snapshot, compute the ordered list of
//! (language, track kind) pairs the cascade should attempt. Pure function,
//! no I/O; index 0 is the highest priority and no (tag, is_manual) pair is
//! ever emitted twice.

use ytscribe_models::{CaptionAvailability, LanguageCandidate};

/// Pseudo-language keys the source reports that are not caption tracks.
const NON_LANGUAGE_KEYS: &[&str] = &["live_chat", "rechat"];

/// Suffix marking the non-translated, originally transcribed auto track.
const ORIG_SUFFIX: &str = "-orig";

/// Base language code: the leading subtag before a hyphen ("pt-BR" -> "pt").
pub fn base_code(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Rank the available caption tracks.
///
/// Order: manual in the original language, then English manual, then the
/// rest of the manual pool, then the original-language auto track (always
/// requested under its base code so the source serves the untranslated
/// transcription instead of routing through its translation pipeline, the
/// main trigger of upstream throttling), then English auto, then the rest
/// of the auto pool.
pub fn prioritize(availability: &CaptionAvailability) -> Vec<LanguageCandidate> {
    let manual: Vec<&str> = availability
        .manual
        .iter()
        .map(String::as_str)
        .filter(|t| !is_non_language(t))
        .collect();
    let auto: Vec<&str> = availability
        .auto
        .iter()
        .map(String::as_str)
        .filter(|t| !is_non_language(t))
        .collect();

    let mut ranked: Vec<LanguageCandidate> = Vec::new();
    let mut push = |list: &mut Vec<LanguageCandidate>, candidate: LanguageCandidate| {
        if !list.contains(&candidate) {
            list.push(candidate);
        }
    };

    // 1. Manual captions in the video's original language (exact or base-code
    //    match), skipping any "-orig" marker tags.
    if let Some(original) = availability.original_language.as_deref() {
        let original_base = base_code(original);
        for tag in &manual {
            if tag.ends_with(ORIG_SUFFIX) {
                continue;
            }
            if *tag == original || base_code(tag) == original_base {
                push(&mut ranked, LanguageCandidate::manual(*tag));
            }
        }
    }

    // 2. English manual captions.
    for tag in &manual {
        if tag.starts_with("en") {
            push(&mut ranked, LanguageCandidate::manual(*tag));
        }
    }

    // 3. Every remaining manual language, natural key order.
    for tag in &manual {
        push(&mut ranked, LanguageCandidate::manual(*tag));
    }

    // 4. The original-language auto track. The source keys it either under
    //    the bare base code or under "<base>-orig"; requesting the base code
    //    retrieves the same untranslated track either way.
    if let Some(original) = availability.original_language.as_deref() {
        let base = base_code(original);
        let orig_key = format!("{base}{ORIG_SUFFIX}");
        if auto.iter().any(|t| *t == base || *t == orig_key) {
            push(&mut ranked, LanguageCandidate::auto(base));
        }
    }

    // 5. Bare English auto captions ("en-orig" alone does not count).
    if auto.contains(&"en") {
        push(&mut ranked, LanguageCandidate::auto("en"));
    }

    // 6. Every remaining auto language, natural key order. "-orig" keys are
    //    requested under their base code, never verbatim.
    for tag in &auto {
        let request_tag = tag.strip_suffix(ORIG_SUFFIX).unwrap_or(tag);
        push(&mut ranked, LanguageCandidate::auto(request_tag));
    }

    ranked
}

fn is_non_language(tag: &str) -> bool {
    NON_LANGUAGE_KEYS.contains(&tag)
}
