// Contact-information detectors.
//
// Each detector proposes candidate spans over the scanned text. The classifier
// runs them in a fixed order and threads one `ClaimSet` through all of them, so
// a substring claimed by an earlier detector is never reported again by a later
// one. Every pattern here runs on the `regex`/`aho-corasick` engines, which scan
// in linear time, so adversarial input cannot trigger backtracking blowups.

use super::checksum::{iban_valid, luhn_valid};
use super::moderation_models::{InfractionType, ModerationPolicy, Severity};
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::ops::Range;

// ============================================================================
// CLAIMS
// ============================================================================

/// Spans and substrings already attributed to an infraction.
#[derive(Debug, Default)]
pub struct ClaimSet {
    spans: Vec<Range<usize>>,
    texts: Vec<(InfractionType, String)>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A range is claimed if it overlaps a claimed span, or if an earlier
    /// category already claimed text ending in it (the domain of a claimed
    /// email, the local part of a claimed phone number). Tails only block other
    /// categories: two addresses sharing a suffix are both reported.
    pub fn is_claimed(&self, text: &str, range: &Range<usize>, by: InfractionType) -> bool {
        if self
            .spans
            .iter()
            .any(|s| s.start < range.end && range.start < s.end)
        {
            return true;
        }

        let candidate = &text[range.clone()];
        self.texts
            .iter()
            .any(|(owner, claimed)| *owner != by && is_tail_of(claimed, candidate))
    }

    pub fn claim(&mut self, text: &str, range: Range<usize>, by: InfractionType) {
        self.texts.push((by, text[range.clone()].to_string()));
        self.spans.push(range);
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// `candidate` equals `claimed`, or ends it right after a non-alphanumeric char.
fn is_tail_of(claimed: &str, candidate: &str) -> bool {
    if candidate.len() > claimed.len() {
        return false;
    }
    let split = claimed.len() - candidate.len();
    if !claimed.is_char_boundary(split) || !claimed[split..].eq_ignore_ascii_case(candidate) {
        return false;
    }
    split == 0 || !char_before(claimed, split).is_some_and(|c| c.is_alphanumeric())
}

// ============================================================================
// DETECTOR TRAIT
// ============================================================================

/// A candidate match. `span` is preferred; if it collides with an earlier claim
/// the detector falls back to `core` (e.g. a payment keyword without the
/// identifier that followed it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub span: Range<usize>,
    pub core: Range<usize>,
}

impl Candidate {
    pub fn new(span: Range<usize>) -> Self {
        Self {
            core: span.clone(),
            span,
        }
    }

    pub fn with_core(span: Range<usize>, core: Range<usize>) -> Self {
        Self { span, core }
    }
}

/// One stage of the classifier pipeline.
pub trait Detector: Send + Sync {
    /// Category reported for this detector's matches.
    fn infraction_type(&self) -> InfractionType;

    /// Severity attached to the infraction.
    fn severity(&self) -> Severity;

    /// Candidate spans over `text`, in the order they should be claimed.
    fn candidates(&self, text: &str) -> Vec<Candidate>;

    /// Claim unclaimed candidates and return their literal text, deduplicated
    /// in first-seen order.
    fn detect(&self, text: &str, claims: &mut ClaimSet) -> Vec<String> {
        let by = self.infraction_type();
        let mut found: Vec<String> = Vec::new();

        for candidate in self.candidates(text) {
            let range = if !claims.is_claimed(text, &candidate.span, by) {
                candidate.span
            } else if candidate.core != candidate.span
                && !claims.is_claimed(text, &candidate.core, by)
            {
                candidate.core
            } else {
                continue;
            };

            let matched = &text[range.clone()];
            if !found.iter().any(|f| f == matched) {
                found.push(matched.to_string());
            }
            claims.claim(text, range, by);
        }

        found
    }
}

/// The fixed detector order: email, phone, social handle, payment, link.
pub fn default_detectors(policy: &ModerationPolicy) -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(EmailDetector::new()),
        Box::new(PhoneDetector::new(
            policy.min_phone_digits,
            policy.max_phone_digits,
        )),
        Box::new(SocialHandleDetector::new()),
        Box::new(PaymentDetector::new()),
        Box::new(ExternalLinkDetector::new()),
    ]
}

// ============================================================================
// HELPERS
// ============================================================================

fn char_before(text: &str, idx: usize) -> Option<char> {
    text[..idx].chars().next_back()
}

fn char_after(text: &str, idx: usize) -> Option<char> {
    text[idx..].chars().next()
}

/// Drop sentence punctuation that the greedy URL/handle patterns swallow.
fn trim_trailing(text: &str, mut range: Range<usize>, junk: &[char]) -> Range<usize> {
    while let Some(c) = char_before(text, range.end) {
        if range.end <= range.start || !junk.contains(&c) {
            break;
        }
        range.end -= c.len_utf8();
    }
    range
}

const URL_TRAILING_JUNK: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\''];

// ============================================================================
// EMAIL
// ============================================================================

// "@" and "." plus their spaced and written-out forms: " @ ", "[at]",
// "(arroba)", " arroba ", " . ", "[dot]", " punto ". Spaced symbols need
// whitespace on both sides so "hola @juan.perez" stays a mention.
const AT: &str = r"(?:@|\s+@\s+|\s*[\[({]\s*(?:at|arroba)\s*[\])}]\s*|\s+(?:at|arroba)\s+)";
const DOT: &str = r"(?:\.|\s+\.\s+|\s*[\[({]\s*(?:dot|punto)\s*[\])}]\s*|\s+(?:dot|punto)\s+)";

// Words that read as "<word> at <site>" in prose ("find me at example.com").
// Never taken as the local part of a bare-word "at"/"arroba" address.
const PROSE_LOCAL_PARTS: &[&str] = &[
    "me", "you", "us", "him", "her", "them", "it", "we", "i", "mi", "tu", "te", "yo", "nos",
    "lo", "la", "le", "look", "here", "there", "meet", "find",
];

pub struct EmailDetector {
    pattern: Regex,
}

impl EmailDetector {
    pub fn new() -> Self {
        let pattern = format!(
            r"(?i)(?P<local>[\w.%+\-]+)(?P<at>{AT})[\w\-]+(?:{DOT}[\w\-]+)*{DOT}[a-z]{{2,}}\b"
        );
        Self {
            pattern: Regex::new(&pattern).expect("email pattern is valid"),
        }
    }

    fn is_prose(local: &str, at: &str) -> bool {
        let at = at.trim();
        (at.eq_ignore_ascii_case("at") || at.eq_ignore_ascii_case("arroba"))
            && PROSE_LOCAL_PARTS
                .iter()
                .any(|w| w.eq_ignore_ascii_case(local))
    }
}

impl Default for EmailDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for EmailDetector {
    fn infraction_type(&self) -> InfractionType {
        InfractionType::Email
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut out = Vec::new();

        for caps in self.pattern.captures_iter(text) {
            let (Some(whole), Some(local), Some(at)) =
                (caps.get(0), caps.name("local"), caps.name("at"))
            else {
                continue;
            };
            if Self::is_prose(local.as_str(), at.as_str()) {
                continue;
            }
            out.push(Candidate::new(whole.range()));
        }

        out
    }
}

// ============================================================================
// PHONE
// ============================================================================

const NUMBER_WORDS: &[&str] = &[
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve", "zero",
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

// Spelled-out runs need this many number words before they count as a phone.
const MIN_SPELLED_WORDS: usize = 3;

pub struct PhoneDetector {
    numeric: Regex,
    spelled: Regex,
    min_digits: usize,
    max_digits: usize,
}

impl PhoneDetector {
    pub fn new(min_digits: usize, max_digits: usize) -> Self {
        let words = NUMBER_WORDS.join("|");
        let spelled = format!(r"(?i)\b(?:{words})\b(?:[\s,.\-]+(?:(?:{words})\b|[0-9]+))*");

        Self {
            numeric: Regex::new(r"(?:\+|\(\+?)?[0-9](?:[ .\-()]{0,2}[0-9])*")
                .expect("phone pattern is valid"),
            spelled: Regex::new(&spelled).expect("spelled phone pattern is valid"),
            min_digits,
            max_digits,
        }
    }

    fn in_bounds(&self, digits: usize) -> bool {
        digits >= self.min_digits && digits <= self.max_digits
    }

    /// Card-length runs that pass Luhn belong to the payment detector.
    fn is_card(run: &str, digits: usize) -> bool {
        (13..=19).contains(&digits) && luhn_valid(run)
    }

    /// Split an over-long run at its separators and take, from left to right,
    /// the longest stretch of whole digit groups that fits the phone bounds.
    fn windows(&self, text: &str, run: Range<usize>) -> Vec<Range<usize>> {
        let mut groups: Vec<Range<usize>> = Vec::new();
        for (i, b) in text[run.clone()].bytes().enumerate() {
            let at = run.start + i;
            if !b.is_ascii_digit() {
                continue;
            }
            match groups.last_mut() {
                Some(last) if last.end == at => last.end = at + 1,
                _ => groups.push(at..at + 1),
            }
        }

        let mut out = Vec::new();
        let mut i = 0;
        while i < groups.len() {
            let mut digits = 0;
            let mut best = None;
            for (j, group) in groups.iter().enumerate().skip(i) {
                digits += group.len();
                if digits > self.max_digits {
                    break;
                }
                if digits >= self.min_digits {
                    best = Some(j);
                }
            }

            match best {
                Some(j) => {
                    // The first window keeps a leading "+" or "(".
                    let start = if i == 0 { run.start } else { groups[i].start };
                    out.push(start..groups[j].end);
                    i = j + 1;
                }
                None => i += 1,
            }
        }
        out
    }

    /// Count (digits, number words) in a spelled-out fragment.
    fn count_spelled(fragment: &str) -> (usize, usize) {
        let mut digits = 0;
        let mut words = 0;
        for token in fragment
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if token.chars().all(|c| c.is_ascii_digit()) {
                digits += token.len();
            } else if NUMBER_WORDS.iter().any(|w| w.eq_ignore_ascii_case(token)) {
                digits += 1;
                words += 1;
            }
        }
        (digits, words)
    }
}

impl Default for PhoneDetector {
    fn default() -> Self {
        let policy = ModerationPolicy::default();
        Self::new(policy.min_phone_digits, policy.max_phone_digits)
    }
}

impl Detector for PhoneDetector {
    fn infraction_type(&self) -> InfractionType {
        InfractionType::Phone
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut out = Vec::new();

        for m in self.numeric.find_iter(text) {
            // Digits glued to letters are identifiers (IBANs, order codes), not phones.
            let glued_before = char_before(text, m.start()).is_some_and(|c| c.is_alphanumeric());
            let glued_after = char_after(text, m.end()).is_some_and(|c| c.is_alphanumeric());
            if glued_before || glued_after {
                continue;
            }

            let digits = m.as_str().chars().filter(|c| c.is_ascii_digit()).count();
            if self.in_bounds(digits) {
                out.push(Candidate::new(m.range()));
            } else if digits > self.max_digits && !Self::is_card(m.as_str(), digits) {
                // Neighbouring numbers merge into one run; look at each group window.
                out.extend(self.windows(text, m.range()).into_iter().map(Candidate::new));
            }
        }

        for m in self.spelled.find_iter(text) {
            let (digits, words) = Self::count_spelled(m.as_str());
            if words >= MIN_SPELLED_WORDS && self.in_bounds(digits) {
                out.push(Candidate::new(m.range()));
            }
        }

        out
    }
}

// ============================================================================
// SOCIAL HANDLES
// ============================================================================

const PLATFORM_DOMAINS: &str = r"instagram\.com|instagr\.am|twitter\.com|x\.com|t\.me|telegram\.me|tiktok\.com|facebook\.com|fb\.com|fb\.me|youtube\.com|youtu\.be|linkedin\.com|snapchat\.com|onlyfans\.com|wa\.me|discord\.gg|discord\.com|twitch\.tv|pinterest\.com|threads\.net";

const PLATFORM_NAMES: &str = r"instagram|insta|ig|twitter|tiktok|telegram|snapchat|snap|facebook|fb|discord|whatsapp|onlyfans|kik|signal|threads|twitch|youtube|linkedin";

// Words that follow "<platform> es/is/como" in ordinary sentences.
const NOT_HANDLES: &[&str] = &[
    "genial", "bueno", "buena", "mejor", "para", "muy", "una", "privado", "privada", "nuevo",
    "nueva", "the", "great", "not", "cool", "awesome",
];

pub struct SocialHandleDetector {
    urls: Regex,
    mentions: Regex,
    named: Regex,
}

impl SocialHandleDetector {
    pub fn new() -> Self {
        let urls = format!(r"(?i)\b(?:https?://)?(?:www\.)?(?:{PLATFORM_DOMAINS})\b(?:/[\w.@\-]+)*");
        let named = format!(
            r"(?i)\b(?:{PLATFORM_NAMES})\b(?P<sep>\s*:\s*|\s+(?:es|is|como|as|user|usuario|username|handle|id)\s*:?\s+|\s+)(?P<handle>@?\w[\w.\-]{{2,29}})"
        );

        Self {
            urls: Regex::new(&urls).expect("platform url pattern is valid"),
            mentions: Regex::new(r"@\w[\w.]{1,29}").expect("mention pattern is valid"),
            named: Regex::new(&named).expect("platform name pattern is valid"),
        }
    }

    /// After a colon or a connector ("es", "como", "usuario") any word is a
    /// handle unless it is ordinary prose ("mi instagram es genial"). After a
    /// bare space only handle-shaped words count ("instagram para ver" does not).
    fn looks_like_handle(sep: &str, handle: &str) -> bool {
        if handle.starts_with('@')
            || handle
                .chars()
                .any(|c| c == '_' || c == '.' || c.is_ascii_digit())
        {
            return true;
        }
        !sep.trim().is_empty()
            && !NOT_HANDLES
                .iter()
                .any(|w| w.eq_ignore_ascii_case(handle))
    }
}

impl Default for SocialHandleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SocialHandleDetector {
    fn infraction_type(&self) -> InfractionType {
        InfractionType::SocialHandle
    }

    fn severity(&self) -> Severity {
        Severity::Secondary
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut out = Vec::new();

        for m in self.urls.find_iter(text) {
            out.push(Candidate::new(trim_trailing(text, m.range(), URL_TRAILING_JUNK)));
        }

        for m in self.mentions.find_iter(text) {
            // "juan@gmail" is an address, not a mention.
            let glued = char_before(text, m.start())
                .is_some_and(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'));
            if glued {
                continue;
            }
            let range = trim_trailing(text, m.range(), &['.']);
            if text[range.start + 1..range.end].chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            out.push(Candidate::new(range));
        }

        for caps in self.named.captures_iter(text) {
            let (Some(whole), Some(sep), Some(handle)) =
                (caps.get(0), caps.name("sep"), caps.name("handle"))
            else {
                continue;
            };
            let handle_range = trim_trailing(text, handle.range(), &['.', '-']);
            let handle_text = &text[handle_range.clone()];
            if Self::looks_like_handle(sep.as_str(), handle_text) {
                out.push(Candidate::new(whole.start()..handle_range.end));
            }
        }

        out
    }
}

// ============================================================================
// PAYMENT REFERENCES
// ============================================================================

const PAYMENT_KEYWORDS: &[&str] = &[
    "paypal",
    "paypal.me",
    "bizum",
    "stripe",
    "venmo",
    "cashapp",
    "cash app",
    "zelle",
    "revolut",
    "skrill",
    "payoneer",
    "western union",
    "moneygram",
    "transferencia",
    "transferencia bancaria",
    "bank transfer",
    "wire transfer",
    "iban",
    "bitcoin",
    "usdt",
];

pub struct PaymentDetector {
    keywords: AhoCorasick,
    path: Regex,
    identifier: Regex,
    iban: Regex,
    card: Regex,
}

impl PaymentDetector {
    pub fn new() -> Self {
        let keywords = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(PAYMENT_KEYWORDS)
            .expect("payment keyword automaton builds");

        Self {
            keywords,
            path: Regex::new(r"^/[\w.\-]+").expect("payment path pattern is valid"),
            identifier: Regex::new(
                r"(?i)^[ \t]*(?:[:\-][ \t]*)?(?:(?:al|a|to|en|at|por|es|is)[ \t]*:?[ \t]+)?(?P<id>[a-z]{2}[0-9]{2}(?:[ ]?[a-z0-9]{4}){2,7}(?:[ ]?[a-z0-9]{1,3})?|[\w.%+\-]+@[\w\-]+(?:\.[\w\-]+)+|\+?[0-9](?:[ .\-]?[0-9]){6,14})",
            )
            .expect("payment identifier pattern is valid"),
            iban: Regex::new(r"\b[A-Z]{2}[0-9]{2}(?:[ ]?[A-Z0-9]{4}){2,7}(?:[ ]?[A-Z0-9]{1,3})?\b")
                .expect("iban pattern is valid"),
            card: Regex::new(r"\b[0-9](?:[ \-]?[0-9]){12,18}\b").expect("card pattern is valid"),
        }
    }

    /// End of the identifier that directly follows a keyword, if any.
    fn identifier_end(&self, text: &str, keyword_end: usize) -> Option<usize> {
        let rest = &text[keyword_end..];
        if let Some(m) = self.path.find(rest) {
            return Some(keyword_end + m.end());
        }
        self.identifier
            .captures(rest)
            .and_then(|caps| caps.name("id"))
            .map(|id| keyword_end + id.end())
    }
}

impl Default for PaymentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PaymentDetector {
    fn infraction_type(&self) -> InfractionType {
        InfractionType::PaymentReference
    }

    fn severity(&self) -> Severity {
        Severity::Secondary
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        let mut out = Vec::new();

        for m in self.keywords.find_iter(text) {
            let standalone = !char_before(text, m.start()).is_some_and(|c| c.is_alphanumeric())
                && !char_after(text, m.end()).is_some_and(|c| c.is_alphanumeric());
            if !standalone {
                continue;
            }

            let keyword = m.start()..m.end();
            match self.identifier_end(text, m.end()) {
                Some(end) => out.push(Candidate::with_core(m.start()..end, keyword)),
                None => out.push(Candidate::new(keyword)),
            }
        }

        for m in self.iban.find_iter(text) {
            if iban_valid(m.as_str()) {
                out.push(Candidate::new(m.range()));
            }
        }

        for m in self.card.find_iter(text) {
            if luhn_valid(m.as_str()) {
                out.push(Candidate::new(m.range()));
            }
        }

        out
    }
}

// ============================================================================
// EXTERNAL LINKS
// ============================================================================

const LINK_TLDS: &str = "com|net|org|es|io|co|me|info|biz|app|dev|xyz|site|online|store|shop|art|blog|tv|us|uk|de|fr|it|pt|eu|mx|ar|cl|pe|br|ca|ly|gl|link|page|web|club|pro|live|tech|cat";

pub struct ExternalLinkDetector {
    pattern: Regex,
}

impl ExternalLinkDetector {
    pub fn new() -> Self {
        let pattern = format!(
            r#"(?i)\b(?:https?://[^\s<>"']+|www\.[^\s<>"']+|(?:[\w\-]+\.)+(?:{LINK_TLDS})\b(?:/[^\s<>"']*)?)"#
        );
        Self {
            pattern: Regex::new(&pattern).expect("link pattern is valid"),
        }
    }
}

impl Default for ExternalLinkDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ExternalLinkDetector {
    fn infraction_type(&self) -> InfractionType {
        InfractionType::ExternalLink
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        self.pattern
            .find_iter(text)
            .map(|m| Candidate::new(trim_trailing(text, m.range(), URL_TRAILING_JUNK)))
            .filter(|c| !c.span.is_empty())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(detector: &dyn Detector, text: &str) -> Vec<String> {
        detector.detect(text, &mut ClaimSet::new())
    }

    #[test]
    fn test_email_plain() {
        let found = run(&EmailDetector::new(), "Mi email es juan@gmail.com.");
        assert_eq!(found, vec!["juan@gmail.com"]);
    }

    #[test]
    fn test_email_obfuscated() {
        let detector = EmailDetector::new();
        assert_eq!(
            run(&detector, "Contáctame en mi-correo[at]hotmail.com"),
            vec!["mi-correo[at]hotmail.com"]
        );
        assert_eq!(
            run(&detector, "Escríbeme a usuario(arroba)yahoo.es"),
            vec!["usuario(arroba)yahoo.es"]
        );
        assert_eq!(
            run(&detector, "juan ARROBA gmail PUNTO com"),
            vec!["juan ARROBA gmail PUNTO com"]
        );
        assert_eq!(
            run(&detector, "ana [at] proton [dot] me"),
            vec!["ana [at] proton [dot] me"]
        );
    }

    #[test]
    fn test_email_spaced_symbols() {
        let detector = EmailDetector::new();
        assert_eq!(run(&detector, "juan @ gmail.com"), vec!["juan @ gmail.com"]);
        assert_eq!(run(&detector, "juan @ gmail . com"), vec!["juan @ gmail . com"]);
        assert!(run(&detector, "hola @juan.perez y más").is_empty());
    }

    #[test]
    fn test_email_prose_at_is_not_an_address() {
        let detector = EmailDetector::new();
        assert!(run(&detector, "Find me at miportfolio.com").is_empty());
        assert_eq!(
            run(&detector, "escribe a juan arroba gmail.com"),
            vec!["juan arroba gmail.com"]
        );
    }

    #[test]
    fn test_email_ignores_mentions() {
        assert!(run(&EmailDetector::new(), "hola @juan, nos vemos").is_empty());
    }

    #[test]
    fn test_phone_formats() {
        let detector = PhoneDetector::default();
        assert_eq!(run(&detector, "Mi teléfono es 555-123-456"), vec!["555-123-456"]);
        assert_eq!(run(&detector, "Llámame al +34 666 777 888"), vec!["+34 666 777 888"]);
        assert_eq!(run(&detector, "Mi WhatsApp es 123456789"), vec!["123456789"]);
        assert_eq!(run(&detector, "(+34) 911.222.333"), vec!["(+34) 911.222.333"]);
    }

    #[test]
    fn test_phone_length_bounds() {
        let detector = PhoneDetector::default();
        assert!(run(&detector, "Tengo 123456 fotos").is_empty());
        assert!(run(&detector, "Pedido 1234567890123456789").is_empty());
        assert!(run(&detector, "ref AB123456789").is_empty());
    }

    #[test]
    fn test_phone_adjacent_numbers_are_split() {
        let detector = PhoneDetector::default();
        assert_eq!(
            run(&detector, "Llámame: 666777888 911222333"),
            vec!["666777888", "911222333"]
        );
        assert_eq!(
            run(&detector, "Mi WhatsApp es 123456789 12345678"),
            vec!["123456789", "12345678"]
        );
        assert_eq!(
            run(&detector, "Tel 666 777 888 999 000 111"),
            vec!["666 777 888 999 000"]
        );
    }

    #[test]
    fn test_phone_leaves_card_numbers_to_payments() {
        let detector = PhoneDetector::default();
        assert!(run(&detector, "tarjeta 4111 1111 1111 1111").is_empty());
    }

    #[test]
    fn test_phone_spelled_out() {
        let detector = PhoneDetector::default();
        assert_eq!(
            run(&detector, "llama al seis seis seis 777 888"),
            vec!["seis seis seis 777 888"]
        );
        assert!(run(&detector, "tengo dos gatos y tres perros").is_empty());
    }

    #[test]
    fn test_social_mentions_and_urls() {
        let detector = SocialHandleDetector::new();
        assert_eq!(
            run(&detector, "Búscame en Instagram como @miartista"),
            vec!["@miartista"]
        );
        assert_eq!(
            run(&detector, "Mi Twitter es twitter.com/artista"),
            vec!["twitter.com/artista"]
        );
        assert_eq!(
            run(&detector, "Hablemos por Telegram: @usuario."),
            vec!["@usuario"]
        );
        assert_eq!(
            run(&detector, "mira tiktok.com/@baila"),
            vec!["tiktok.com/@baila"]
        );
    }

    #[test]
    fn test_social_platform_name_with_handle() {
        let detector = SocialHandleDetector::new();
        assert_eq!(
            run(&detector, "Instagram: miartista"),
            vec!["Instagram: miartista"]
        );
        assert!(run(&detector, "me encanta instagram para ver fotos").is_empty());
    }

    #[test]
    fn test_social_handle_after_connector() {
        let detector = SocialHandleDetector::new();
        assert_eq!(
            run(&detector, "Mi Instagram es miartista"),
            vec!["Instagram es miartista"]
        );
        assert_eq!(
            run(&detector, "Sígueme en instagram como miartista"),
            vec!["instagram como miartista"]
        );
        assert_eq!(
            run(&detector, "Mi usuario de Telegram es juanito"),
            vec!["Telegram es juanito"]
        );
        assert!(run(&detector, "Mi Instagram es genial").is_empty());
    }

    #[test]
    fn test_social_skips_email_addresses() {
        assert!(run(&SocialHandleDetector::new(), "juan@gmail.com").is_empty());
    }

    #[test]
    fn test_payment_keywords() {
        let detector = PaymentDetector::new();
        assert_eq!(run(&detector, "Pago por Stripe directo"), vec!["Stripe"]);
        assert_eq!(
            run(&detector, "Hazme un Bizum al 666777888"),
            vec!["Bizum al 666777888"]
        );
        assert_eq!(run(&detector, "paypal.me/juanito"), vec!["paypal.me/juanito"]);
        assert!(run(&detector, "unpaypalish word").is_empty());
    }

    #[test]
    fn test_payment_falls_back_to_keyword_when_identifier_claimed() {
        let text = "Hazme un Bizum al 666777888";
        let mut claims = ClaimSet::new();
        let phones = PhoneDetector::default().detect(text, &mut claims);
        assert_eq!(phones, vec!["666777888"]);

        let payments = PaymentDetector::new().detect(text, &mut claims);
        assert_eq!(payments, vec!["Bizum"]);
    }

    #[test]
    fn test_payment_iban_and_card() {
        let detector = PaymentDetector::new();
        assert_eq!(
            run(&detector, "cuenta ES91 2100 0418 4502 0005 1332"),
            vec!["ES91 2100 0418 4502 0005 1332"]
        );
        assert_eq!(
            run(&detector, "tarjeta 4111 1111 1111 1111"),
            vec!["4111 1111 1111 1111"]
        );
        assert!(run(&detector, "tarjeta 1234 5678 9012 3456").is_empty());
    }

    #[test]
    fn test_links() {
        let detector = ExternalLinkDetector::new();
        assert_eq!(
            run(&detector, "Visita mi web en miportfolio.com"),
            vec!["miportfolio.com"]
        );
        assert_eq!(
            run(&detector, "Mira mis fotos en ejemplo.net/galeria."),
            vec!["ejemplo.net/galeria"]
        );
        assert_eq!(
            run(&detector, "https://example.org/a?b=c, y más"),
            vec!["https://example.org/a?b=c"]
        );
        assert!(run(&detector, "adjunto foto.png y pi=3.14").is_empty());
    }

    #[test]
    fn test_claims_block_overlaps_and_domain_tails() {
        let text = "juan@gmail.com o gmail.com";
        let mut claims = ClaimSet::new();
        EmailDetector::new().detect(text, &mut claims);
        assert_eq!(claims.len(), 1);

        let links = ExternalLinkDetector::new().detect(text, &mut claims);
        assert!(links.is_empty());
    }

    #[test]
    fn test_tails_only_block_other_categories() {
        let found = run(&EmailDetector::new(), "ana.garcia@gmail.com y garcia@gmail.com");
        assert_eq!(found, vec!["ana.garcia@gmail.com", "garcia@gmail.com"]);

        let text = "ana.garcia@gmail.com y garcia@gmail.com y gmail.com";
        let mut claims = ClaimSet::new();
        claims.claim(text, 0..20, InfractionType::Email);
        assert!(!claims.is_claimed(text, &(23..39), InfractionType::Email));
        assert!(claims.is_claimed(text, &(42..51), InfractionType::ExternalLink));
    }

    #[test]
    fn test_tail_requires_boundary() {
        assert!(is_tail_of("juan@gmail.com", "gmail.com"));
        assert!(is_tail_of("juan@gmail.com", "JUAN@GMAIL.COM"));
        assert!(!is_tail_of("juan@mygmail.com", "gmail.com"));
    }

    #[test]
    fn test_duplicates_reported_once() {
        let found = run(&EmailDetector::new(), "a@b.com, a@b.com y c@d.es");
        assert_eq!(found, vec!["a@b.com", "c@d.es"]);
    }
}
