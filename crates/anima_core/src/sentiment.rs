//! Simple keyword-based sentiment analysis.
//!
//! Shared between the decay engine (text-driven mood stimulus) and the
//! belief-tension lexicons to avoid duplicating word lists.

/// Positive sentiment markers.
pub const POSITIVE: &[&str] = &[
    "yes", "want", "like", "love", "hope", "good", "okay", "ok", "sure",
];

/// Negative sentiment markers.
pub const NEGATIVE: &[&str] = &[
    "no", "not", "never", "can't", "cannot", "wont", "won't", "hate", "bad", "afraid", "doubt",
];

/// Intensifiers; exclamation marks are counted separately.
const INTENSE: &[&str] = &["very", "really", "extremely", "so", "too"];

/// Contrast bridges joining opposing clauses.
pub const BRIDGES: &[&str] = &["but", "however", "though", "yet", "although", "still"];

/// Lowercase word tokens: alphabetic runs, apostrophes kept inside words
/// ("can't" stays one token).
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in lower.chars() {
        if ch.is_alphabetic() || ch == '\'' {
            current.push(ch);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Analyze text for emotional valence and intensity.
///
/// Returns `(valence, intensity)` where:
/// - `valence` is in `[-1.0, 1.0]` (negative to positive)
/// - `intensity` is in `[0.1, 1.0]`
pub fn analyze_sentiment(text: &str) -> (f64, f64) {
    let tokens = tokenize(text);
    let pos = tokens.iter().filter(|t| POSITIVE.contains(&t.as_str())).count() as f64;
    let neg = tokens.iter().filter(|t| NEGATIVE.contains(&t.as_str())).count() as f64;
    let int = tokens.iter().filter(|t| INTENSE.contains(&t.as_str())).count() as f64
        + text.matches('!').count() as f64;

    let valence = (pos - neg) / (pos + neg + 1.0);
    let intensity = ((pos + neg + int) / 5.0).clamp(0.1, 1.0);

    (valence, intensity)
}

/// Map text to a scalar mood stimulus in [0, 1]; neutral text yields 0.5.
pub fn mood_stimulus(text: &str) -> f64 {
    let (valence, intensity) = analyze_sentiment(text);
    (0.5 + valence * 0.5 * intensity).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let (v, i) = analyze_sentiment("the weather changed today");
        assert!((v - 0.0).abs() < 0.01);
        assert!((i - 0.1).abs() < 0.01);
    }

    #[test]
    fn test_positive_text() {
        let (v, _) = analyze_sentiment("I love this, it is so good");
        assert!(v > 0.0);
    }

    #[test]
    fn test_negative_text() {
        let (v, _) = analyze_sentiment("I hate this, it is bad and I'm afraid");
        assert!(v < 0.0);
    }

    #[test]
    fn test_intensity_rises_with_markers() {
        let (_, i1) = analyze_sentiment("good");
        let (_, i2) = analyze_sentiment("really extremely good!");
        assert!(i2 > i1);
    }

    #[test]
    fn test_tokenize_keeps_apostrophes() {
        let tokens = tokenize("I can't, I won't!");
        assert!(tokens.contains(&"can't".to_string()));
        assert!(tokens.contains(&"won't".to_string()));
    }

    #[test]
    fn test_mood_stimulus_bounds() {
        assert!((mood_stimulus("") - 0.5).abs() < 1e-9);
        assert!(mood_stimulus("love love love good good good") > 0.5);
        assert!(mood_stimulus("hate hate bad bad never") < 0.5);
    }
}
