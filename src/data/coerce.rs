use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{
    Listing, ACCOMMODATES_COLUMN, HOST_ID_COLUMN, ID_COLUMN, PRICE_COLUMN, REVIEW_SCORE_COLUMN,
};

// Optional sign, digits with an optional fraction, optional exponent.
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("Invalid regex: leading number")
});

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-])?([0-9]+)").expect("Invalid regex: leading integer"));

// ---------------------------------------------------------------------------
// Raw row → typed Listing
// ---------------------------------------------------------------------------

/// Turn a raw `column → text` row into a [`Listing`].
///
/// Never fails: absent, empty or malformed numeric fields become `0`.
/// Columns other than the five typed ones are kept as-is in `extra`.
pub fn coerce_listing(mut raw: BTreeMap<String, String>) -> Listing {
    let id = raw.remove(ID_COLUMN).unwrap_or_default();
    let host_id = raw.remove(HOST_ID_COLUMN).unwrap_or_default();
    let price = parse_price(raw.remove(PRICE_COLUMN).as_deref());
    let accommodates = parse_accommodates(raw.remove(ACCOMMODATES_COLUMN).as_deref());
    let review_scores_rating = parse_decimal(raw.remove(REVIEW_SCORE_COLUMN).as_deref());

    Listing {
        id,
        host_id,
        price,
        accommodates,
        review_scores_rating,
        extra: raw,
    }
}

/// `"$1,200.50"` → `1200.5`. Strips `$` and `,` anywhere in the text.
pub fn parse_price(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    parse_decimal(Some(&cleaned))
}

/// Leading integer of the text (`"4 guests"` → `4`), `0` otherwise.
/// Negative counts are `0`; runs too long for `u32` saturate.
pub fn parse_accommodates(raw: Option<&str>) -> u32 {
    let Some(caps) = raw.and_then(|s| LEADING_INT.captures(s)) else {
        return 0;
    };
    if caps.get(1).is_some_and(|sign| sign.as_str() == "-") {
        return 0;
    }
    // The digit group only fails to parse on overflow.
    caps[2].parse().unwrap_or(u32::MAX)
}

/// Leading decimal number of the text (`"4.8 stars"` → `4.8`), `0` otherwise.
pub fn parse_decimal(raw: Option<&str>) -> f64 {
    raw.and_then(|s| LEADING_NUMBER.captures(s))
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
