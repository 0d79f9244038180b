//! Parsing of loosely typed OSM tag values

use crate::model::RawTag;

/// Unit suffixes stripped from `width=*` values before parsing
pub const WIDTH_UNITS: [&str; 1] = ["m"];

/// Outcome of reading a numeric tag.
///
/// `Malformed` keeps the raw text so callers and tests can tell it apart from
/// a missing tag; the weighting treats both the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue<T> {
    Absent,
    Malformed(String),
    Present(T),
}

impl<T: Copy> TagValue<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            TagValue::Present(value) => Some(*value),
            TagValue::Absent | TagValue::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, TagValue::Malformed(_))
    }
}

/// Incline in percent, `"-8%"`, `"8 %"` and `8.0` all parse to a number
pub fn parse_incline(tag: Option<&RawTag>) -> TagValue<f64> {
    parse_numeric(tag, |text| strip_suffix(text, "%"))
}

/// Width in meters, `"1.2 m"`, `"1.2m"` and `1.2` all parse to 1.2
pub fn parse_width(tag: Option<&RawTag>) -> TagValue<f64> {
    parse_numeric(tag, |text| {
        WIDTH_UNITS
            .iter()
            .fold(text, |acc, unit| strip_suffix(acc, unit))
    })
}

/// Trims, then drops one trailing `suffix`
fn strip_suffix<'a>(text: &'a str, suffix: &str) -> &'a str {
    let text = text.trim();
    text.strip_suffix(suffix).unwrap_or(text)
}

fn parse_numeric(tag: Option<&RawTag>, strip: impl Fn(&str) -> &str) -> TagValue<f64> {
    match tag {
        None => TagValue::Absent,
        Some(RawTag::Number(value)) if value.is_finite() => TagValue::Present(*value),
        Some(RawTag::Number(value)) => TagValue::Malformed(value.to_string()),
        Some(RawTag::Text(text)) => {
            let cleaned = strip(text);
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return TagValue::Absent;
            }
            match cleaned.parse::<f64>() {
                Ok(value) if value.is_finite() => TagValue::Present(value),
                _ => TagValue::Malformed(text.clone()),
            }
        }
    }
}

/// Coarse surface quality as seen by a wheelchair user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceClass {
    /// unpaved, gravel, dirt, grass, sand
    Irregular,
    /// paved, asphalt, concrete
    Solid,
    Other,
}

pub fn classify_surface(surface: Option<&str>) -> SurfaceClass {
    match surface {
        Some("unpaved" | "gravel" | "dirt" | "grass" | "sand") => SurfaceClass::Irregular,
        Some("paved" | "asphalt" | "concrete") => SurfaceClass::Solid,
        _ => SurfaceClass::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incline_accepts_numbers_and_percent_strings() {
        assert_eq!(parse_incline(Some(&RawTag::Number(-7.5))), TagValue::Present(-7.5));
        assert_eq!(parse_incline(Some(&"12%".into())), TagValue::Present(12.0));
        assert_eq!(parse_incline(Some(&" -3 % ".into())), TagValue::Present(-3.0));
        assert_eq!(parse_incline(None), TagValue::Absent);
    }

    #[test]
    fn incline_keywords_are_malformed() {
        let parsed = parse_incline(Some(&"up".into()));
        assert!(parsed.is_malformed());
        assert_eq!(parsed.value(), None);
        assert_eq!(parsed, TagValue::Malformed("up".to_string()));
    }

    #[test]
    fn width_strips_meter_suffix() {
        assert_eq!(parse_width(Some(&"1.2 m".into())), TagValue::Present(1.2));
        assert_eq!(parse_width(Some(&"2m".into())), TagValue::Present(2.0));
        assert!(parse_width(Some(&"narrow".into())).is_malformed());
    }

    #[test]
    fn units_are_only_stripped_at_the_end() {
        assert!(parse_width(Some(&"1m5".into())).is_malformed());
        assert!(parse_width(Some(&"m2".into())).is_malformed());
        assert!(parse_incline(Some(&"1%5".into())).is_malformed());
        assert!(parse_incline(Some(&"%8".into())).is_malformed());
    }

    #[test]
    fn empty_text_counts_as_absent() {
        assert_eq!(parse_width(Some(&"".into())), TagValue::Absent);
        assert_eq!(parse_incline(Some(&"%".into())), TagValue::Absent);
    }

    #[test]
    fn non_finite_numbers_are_malformed() {
        assert!(parse_width(Some(&RawTag::Number(f64::NAN))).is_malformed());
    }

    #[test]
    fn surface_classes() {
        assert_eq!(classify_surface(Some("gravel")), SurfaceClass::Irregular);
        assert_eq!(classify_surface(Some("asphalt")), SurfaceClass::Solid);
        assert_eq!(classify_surface(Some("paving_stones")), SurfaceClass::Other);
        assert_eq!(classify_surface(None), SurfaceClass::Other);
    }
}
