// Paw Response Engine — Content Heuristics
//
// Classifies message text into the shape signals the scoring stages use
// (question, code, urgency, help-seeking, playful, technical, greeting).
// Keyword/pattern heuristics only — no model call, fast and deterministic.
// Patterns are compiled once and shared across threads.

use log::warn;
use regex::Regex;
use std::sync::LazyLock;

// ── Types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSignal {
    Question,
    CodeMention,
    Urgency,
    HelpSeeking,
    PlayfulLanguage,
    TechnicalContent,
    TechnicalComplexity,
    Greeting,
}

/// Everything the scoring stages need to know about the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentProfile {
    pub question: bool,
    pub code_mention: bool,
    pub urgency: bool,
    pub help_seeking: bool,
    pub playful: bool,
    pub technical: bool,
    pub technical_complexity: bool,
    pub greeting: bool,
    /// Char count of the untrimmed content.
    pub char_len: usize,
    /// Char count after trimming surrounding whitespace.
    pub trimmed_len: usize,
}

// ── Pattern definitions ────────────────────────────────────────────────

struct SignalPattern {
    regex: Regex,
    signal: ContentSignal,
}

/// Greetings only count when the whole message is about this short.
const GREETING_MAX_CHARS: usize = 32;

static CONTENT_PATTERNS: LazyLock<Vec<SignalPattern>> = LazyLock::new(|| {
    let patterns: Vec<(&str, ContentSignal)> = vec![
        // Latin, inverted, full-width question marks and the interrobang
        (r"[?¿？‽]", ContentSignal::Question),
        (
            // `TypeError`, `ValueError`: exception names carry no boundary before `Error`
            r"(?i)```|\b(function|class|async|error|traceback)\b|(?-i:[a-z0-9]Error\b)",
            ContentSignal::CodeMention,
        ),
        (r"(?i)\b(urgent|asap|now|quick)\b", ContentSignal::Urgency),
        (
            r"(?i)\b(help|helping|stuck|struggling|confused|advice|support|how do i|how can i|can you|could you|please)\b",
            ContentSignal::HelpSeeking,
        ),
        (
            r"(?i)\b(lol|lmao|rofl|(?:ha){2,}|(?:he){2,}|xd|jk|joke|pun|meme)\b|[😂🤣😜😄😆🙃]",
            ContentSignal::PlayfulLanguage,
        ),
        (
            r"(?i)```|\b(api|code|bug|compile[rd]?|deploy\w*|database|server|function|algorithm|rust|python|javascript|typescript|sql|docker|kubernetes|regex|stack ?trace|runtime|cpu|gpu)\b",
            ContentSignal::TechnicalContent,
        ),
        (
            r"(?i)\b(architecture|algorithm\w*|optimi[sz]\w*|performance|concurren\w*|distributed|scalab\w*|refactor\w*|debug\w*|memory leak|race condition|deadlock|complexity|design pattern|trade-?offs?)\b",
            ContentSignal::TechnicalComplexity,
        ),
        (
            r"(?i)^\s*(hi|hello|hey|heya|hiya|yo|sup|howdy|gm|good (morning|afternoon|evening|night))\b",
            ContentSignal::Greeting,
        ),
    ];

    patterns
        .into_iter()
        .filter_map(|(pattern, signal)| match Regex::new(pattern) {
            Ok(regex) => Some(SignalPattern { regex, signal }),
            Err(e) => {
                warn!("[respond] Failed to compile content pattern {:?}: {}", signal, e);
                None
            }
        })
        .collect()
});

// ── Classification ─────────────────────────────────────────────────────

/// Run every content pattern over the text.
pub fn analyze(content: &str) -> ContentProfile {
    let trimmed = content.trim();
    let mut profile = ContentProfile {
        char_len: content.chars().count(),
        trimmed_len: trimmed.chars().count(),
        ..Default::default()
    };

    for pattern in CONTENT_PATTERNS.iter() {
        if !pattern.regex.is_match(content) {
            continue;
        }
        match pattern.signal {
            ContentSignal::Question => profile.question = true,
            ContentSignal::CodeMention => profile.code_mention = true,
            ContentSignal::Urgency => profile.urgency = true,
            ContentSignal::HelpSeeking => profile.help_seeking = true,
            ContentSignal::PlayfulLanguage => profile.playful = true,
            ContentSignal::TechnicalContent => profile.technical = true,
            ContentSignal::TechnicalComplexity => profile.technical_complexity = true,
            ContentSignal::Greeting => profile.greeting = profile.trimmed_len <= GREETING_MAX_CHARS,
        }
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_chatter_has_no_signals() {
        let p = analyze("just got back from the store");
        assert!(!p.question && !p.code_mention && !p.urgency);
        assert!(!p.help_seeking && !p.playful && !p.technical && !p.greeting);
    }

    #[test]
    fn question_marks_detected() {
        assert!(analyze("anyone around?").question);
        assert!(analyze("¿qué tal").question);
        assert!(analyze("本当？").question);
    }

    #[test]
    fn code_tokens_detected() {
        assert!(analyze("```rust\nfn main() {}\n```").code_mention);
        assert!(analyze("got a Traceback from pip").code_mention);
        assert!(analyze("the async runtime").code_mention);
        assert!(!analyze("classic movie night").code_mention);
    }

    #[test]
    fn exception_names_count_as_code() {
        assert!(analyze("TypeError: cannot read property of undefined").code_mention);
        assert!(analyze("it raises a ValueError on empty input").code_mention);
        assert!(analyze("ERROR in build step").code_mention);
        assert!(!analyze("a horror film and some terror").code_mention);
    }

    #[test]
    fn urgency_is_word_bounded() {
        assert!(analyze("need this ASAP").urgency);
        assert!(analyze("do it now").urgency);
        assert!(!analyze("I know nothing").urgency);
    }

    #[test]
    fn help_and_playful_language() {
        assert!(analyze("I'm stuck on this, any advice").help_seeking);
        assert!(analyze("lol that was great").playful);
        assert!(analyze("hahaha").playful);
    }

    #[test]
    fn technical_vocabulary() {
        let p = analyze("Our distributed database has a race condition");
        assert!(p.technical);
        assert!(p.technical_complexity);
        assert!(!analyze("nice weather today").technical);
    }

    #[test]
    fn greeting_only_when_short() {
        assert!(analyze("hey there!").greeting);
        assert!(analyze("Good morning everyone").greeting);
        assert!(!analyze("hey, can you walk me through how the scheduler handles retries").greeting);
        assert!(!analyze("they said hello").greeting);
    }

    #[test]
    fn lengths_count_chars_after_trim() {
        let p = analyze("  hi  ");
        assert_eq!(p.char_len, 6);
        assert_eq!(p.trimmed_len, 2);
    }
}
