//! Share link codec.
//!
//! A result travels as `/results?p=<persona>&v=<vision>&st=<structure>&sp=<speed>&e=<empathy>`.
//! Decoding is go/no-go: all five keys must be present and non-empty or
//! nothing is recovered.

use url::form_urlencoded;

use super::catalog::Catalog;
use super::types::{Persona, Trait, TraitScores};

/// Path the encoded query string is appended to.
pub const RESULTS_PATH: &str = "/results";

pub const PERSONA_KEY: &str = "p";
pub const VISION_KEY: &str = "v";
pub const STRUCTURE_KEY: &str = "st";
pub const SPEED_KEY: &str = "sp";
pub const EMPATHY_KEY: &str = "e";

/// Query key carrying a trait's raw score.
pub fn trait_key(t: Trait) -> &'static str {
    match t {
        Trait::Vision => VISION_KEY,
        Trait::Structure => STRUCTURE_KEY,
        Trait::Speed => SPEED_KEY,
        Trait::Empathy => EMPATHY_KEY,
    }
}

/// Build the relative share link for a result.
pub fn encode_results(persona: &Persona, traits: &TraitScores) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair(PERSONA_KEY, persona.id);
    for t in Trait::all() {
        query.append_pair(trait_key(*t), &traits.get(*t).to_string());
    }
    format!("{}?{}", RESULTS_PATH, query.finish())
}

/// Join a relative share link onto the site origin.
pub fn absolute_link(base_url: &str, link: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), link)
}

/// What a share link yielded.
///
/// `traits` is `None` only when a required key was missing; `persona` is
/// also `None` when the id is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedResult {
    pub persona: Option<&'static Persona>,
    pub traits: Option<TraitScores>,
}

impl DecodedResult {
    pub fn empty() -> Self {
        Self {
            persona: None,
            traits: None,
        }
    }

    /// Both halves present; anything else should send the user to the start.
    pub fn complete(&self) -> Option<(&'static Persona, TraitScores)> {
        match (self.persona, self.traits) {
            (Some(persona), Some(traits)) => Some((persona, traits)),
            _ => None,
        }
    }
}

/// Decode from already-split query parameters.
///
/// The first occurrence of a key wins. Scores parse leniently: see
/// [`parse_score`].
pub fn decode_params<I, K, V>(catalog: &Catalog, params: I) -> DecodedResult
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut persona_id: Option<String> = None;
    let mut raw: [Option<String>; 4] = Default::default();

    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());
        if key == PERSONA_KEY {
            persona_id.get_or_insert_with(|| value.to_string());
            continue;
        }
        if let Some(index) = Trait::all().iter().position(|t| trait_key(*t) == key) {
            raw[index].get_or_insert_with(|| value.to_string());
        }
    }

    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    if !present(&persona_id) || !raw.iter().all(present) {
        return DecodedResult::empty();
    }

    let score = |index: usize| raw[index].as_deref().map(parse_score).unwrap_or(0);
    let traits = TraitScores::new(score(0), score(1), score(2), score(3));
    let persona = persona_id.as_deref().and_then(|id| catalog.persona(id));

    DecodedResult {
        persona,
        traits: Some(traits),
    }
}

/// Decode a raw (still percent-encoded) query string.
pub fn decode_query(catalog: &Catalog, query: &str) -> DecodedResult {
    decode_params(catalog, form_urlencoded::parse(query.trim_start_matches('?').as_bytes()))
}

/// Decode whatever a user pasted: a relative link, a full URL or a bare query.
pub fn decode_link(catalog: &Catalog, link: &str) -> DecodedResult {
    decode_query(catalog, extract_query(link))
}

/// Persona id carried by a link, whether or not the catalog knows it.
pub fn link_persona_id(link: &str) -> Option<String> {
    form_urlencoded::parse(extract_query(link).trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == PERSONA_KEY)
        .map(|(_, value)| value.into_owned())
}

fn extract_query(link: &str) -> &str {
    let link = link.trim();
    let link = link.split_once('#').map_or(link, |(before, _)| before);
    match link.split_once('?') {
        Some((_, query)) => query,
        None if link.contains('=') => link,
        None => "",
    }
}

/// Lenient base-10 integer parse.
///
/// Skips leading whitespace (including a byte order mark), accepts one sign
/// and reads leading digits; trailing garbage is ignored. No digits gives 0.
/// Values outside `i32` saturate.
pub fn parse_score(raw: &str) -> i32 {
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
