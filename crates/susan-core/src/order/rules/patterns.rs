//! Fixed regex patterns for Korean order text.
//!
//! Item and business-name patterns depend on configured tables and are
//! compiled by their extractors instead.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Delivery date phrases, highest priority first. The leading
    // non-digit keeps `100일` from reading as day 0.
    pub static ref MONTH_DAY_TIME: Regex = Regex::new(
        r"(?:^|\D)(\d{1,2})\s*월\s*(\d{1,2})\s*일\s*(오전|오후|아침|저녁|밤|새벽)?\s*(\d{1,2})\s*시"
    ).unwrap();

    pub static ref MONTH_DAY: Regex = Regex::new(
        r"(?:^|\D)(\d{1,2})\s*월\s*(\d{1,2})\s*일"
    ).unwrap();

    pub static ref DAY_TIME: Regex = Regex::new(
        r"(?:^|\D)(\d{1,2})\s*일\s*(오전|오후|아침|저녁|밤|새벽)?\s*(\d{1,2})\s*시"
    ).unwrap();

    pub static ref DAY_ONLY: Regex = Regex::new(
        r"(?:^|\D)(\d{1,2})\s*일"
    ).unwrap();

    // Memo phrases, highest priority first
    pub static ref MEMO_URGENT: Regex = Regex::new(
        r"(?:급한|급하게|급히|긴급|빨리|서둘러)[^.!?\n]*"
    ).unwrap();

    pub static ref MEMO_TIME: Regex = Regex::new(
        r"(?:(?:오전|오후|아침|저녁|새벽)\s*\d{1,2}\s*시|\d{1,2}\s*시\s*(?:까지|전에|이전))[^.!?\n]*"
    ).unwrap();

    pub static ref MEMO_SPECIAL: Regex = Regex::new(
        r"(?:손질|포장|냉동|냉장|얼음|신선도|조심)[^.!?\n]*"
    ).unwrap();
}

/// Unit tokens that mark calendar, clock or currency fragments rather than
/// order quantities (`10월`, `5일`, `3시`, `15000원`).
pub const NON_ORDER_UNIT_MARKERS: [char; 5] = ['월', '일', '시', '분', '원'];

/// Hangul syllable range used by the item and business patterns.
pub const HANGUL: &str = "가-힣";
