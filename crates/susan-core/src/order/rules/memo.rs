//! Memo extraction: urgency, time and handling requests.

use regex::Regex;

use super::patterns::{MEMO_SPECIAL, MEMO_TIME, MEMO_URGENT};
use super::{ExtractionMatch, FieldExtractor};

/// Memo extractor.
///
/// Patterns are tried in priority order (urgency, time, special handling);
/// the first match becomes the whole memo, later ones are not merged in.
pub struct MemoExtractor;

impl MemoExtractor {
    pub fn new() -> Self {
        Self
    }

    fn patterns() -> [&'static Regex; 3] {
        [&*MEMO_URGENT, &*MEMO_TIME, &*MEMO_SPECIAL]
    }
}

impl Default for MemoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MemoExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for pattern in Self::patterns() {
            for m in pattern.find_iter(text) {
                if results.iter().any(|r| r.overlaps(m.start(), m.end())) {
                    continue;
                }

                let memo = m.as_str().trim().trim_end_matches([',', '~']).trim_end();
                if memo.is_empty() {
                    continue;
                }

                results.push(
                    ExtractionMatch::new(memo.to_string(), m.as_str())
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memo(text: &str) -> Option<String> {
        MemoExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_urgent_memo() {
        assert_eq!(
            memo("고등어 50박스, 갈치 30박스 주문해주세요. 급한 주문입니다.").as_deref(),
            Some("급한 주문입니다")
        );
    }

    #[test]
    fn test_time_memo() {
        assert_eq!(
            memo("광어 3마리 오전 10시까지 도착해야 합니다").as_deref(),
            Some("오전 10시까지 도착해야 합니다")
        );
    }

    #[test]
    fn test_special_memo() {
        assert_eq!(
            memo("오징어 20킬로 손질해서 보내주세요").as_deref(),
            Some("손질해서 보내주세요")
        );
    }

    #[test]
    fn test_urgency_beats_earlier_special_request() {
        let text = "얼음 많이 넣어주세요. 그리고 빨리 보내주세요!";
        assert_eq!(memo(text).as_deref(), Some("빨리 보내주세요"));

        let all = MemoExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_no_memo() {
        assert_eq!(memo("방어 5마리"), None);
    }
}
