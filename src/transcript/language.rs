// transcript/language.rs
//
// English-content heuristic gate. The compliance prompts are written for
// English transcripts; non-English speech produces refusal-style model output.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Indicator vocabulary: common function words, sports commentary terms,
/// frequent verbs and adjectives seen in creator content.
static ENGLISH_INDICATORS: &[&str] = &[
    // Function words
    "the", "and", "is", "are", "was", "were", "have", "has", "had", "will", "would", "could",
    "should", "this", "that", "with", "for", "from", "about", "like", "very", "some", "other",
    "own",
    // Sports terminology
    "ball", "bat", "run", "game", "play", "team", "player", "score", "win", "lose", "match",
    "field", "catch", "hit", "throw", "bowl", "wicket", "over", "innings", "goal", "point",
    "round", "serve", "pass", "shoot", "defend", "attack", "coach", "captain", "referee",
    "umpire", "tournament", "league", "championship", "final", "season",
    // Common verbs
    "take", "get", "make", "go", "know", "see", "come", "think", "look", "want", "give", "use",
    "find", "tell", "ask", "feel", "try", "leave", "call", "going", "coming", "doing", "saying",
    "playing", "talking", "watching", "listening", "starting", "ending",
    // Numbers and time
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "thousand", "first", "second", "third", "minute", "hour", "morning", "evening", "today",
    "yesterday", "tomorrow", "week", "month", "year", "day", "time",
    // Common adjectives
    "good", "bad", "big", "small", "high", "low", "fast", "slow", "new", "old", "young", "easy",
    "hard", "strong", "great", "little", "long", "last", "nice", "clean",
];

// Structural fallbacks: timecode lines plus function words in running text
static ENGLISH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[0-9]+:[0-9]+",
        r"\bthe\s",
        r"\band\s",
        r"\bis\s",
        r"\bare\s",
        r"\bwas\s",
        r"\bwere\s",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

const MIN_INDICATOR_HITS: usize = 5;
const MIN_PATTERN_HITS: usize = 3;

/// Heuristic check that a transcript is predominantly English
pub fn is_likely_english(transcript: &str) -> bool {
    if transcript.trim().is_empty() {
        return false;
    }

    let lower = transcript.to_lowercase();
    let words: HashSet<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let indicator_hits = ENGLISH_INDICATORS
        .iter()
        .filter(|w| words.contains(**w))
        .count();

    if indicator_hits >= MIN_INDICATOR_HITS {
        return true;
    }

    let pattern_hits = ENGLISH_PATTERNS
        .iter()
        .filter(|p| p.is_match(&lower))
        .count();

    pattern_hits >= MIN_PATTERN_HITS
}
