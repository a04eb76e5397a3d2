//! Frame filename parsing.
//!
//! Two grammars, selected by the caller from the variable kind:
//!
//! - single-level: `<variable>_<DD>-<MM>-<YYYY>_<HH>_<MM>.png`
//! - multi-level: `<variable>_<level>_<DD>-<MM>-<YYYY>_<HH>_<MM>.png`
//!
//! With [`TimeFormat::Colon`] the time tail is `<HH>:<MM>` instead.

use gallery_common::{TimeFormat, ValidTime, VariableKind};

/// Level and valid time recovered from a frame name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStamp {
    /// Pressure level token; only ever set for multi-level names.
    pub level: Option<String>,
    pub valid_time: ValidTime,
}

impl FrameStamp {
    /// Result of a failed parse: no level, earliest possible time.
    pub fn unparsed() -> Self {
        Self {
            level: None,
            valid_time: ValidTime::EARLIEST,
        }
    }

    pub fn is_parsed(&self) -> bool {
        !self.valid_time.is_sentinel()
    }
}

/// Parse one frame file name.
///
/// The name must end in `.<extension>` and the rest must match the
/// grammar for `kind` in full. Any mismatch yields
/// [`FrameStamp::unparsed`], never an error.
pub fn parse_frame_name(
    file_name: &str,
    kind: VariableKind,
    format: TimeFormat,
    extension: &str,
) -> FrameStamp {
    file_name
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .and_then(|base| parse_base_name(base, kind, format))
        .unwrap_or_else(FrameStamp::unparsed)
}

fn parse_base_name(base: &str, kind: VariableKind, format: TimeFormat) -> Option<FrameStamp> {
    let (head, valid_time) = format.split_tail(base)?;

    match kind {
        VariableKind::SingleLevel => {
            if head.is_empty() {
                return None;
            }
            Some(FrameStamp {
                level: None,
                valid_time,
            })
        }
        VariableKind::MultiLevel => {
            let (variable, level) = head.rsplit_once('_')?;
            if variable.is_empty() || level.is_empty() || !level.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            Some(FrameStamp {
                level: Some(level.to_string()),
                valid_time,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(name: &str) -> FrameStamp {
        parse_frame_name(name, VariableKind::SingleLevel, TimeFormat::Underscore, "png")
    }

    fn multi(name: &str) -> FrameStamp {
        parse_frame_name(name, VariableKind::MultiLevel, TimeFormat::Underscore, "png")
    }

    #[test]
    fn test_extension_required() {
        assert!(!single("slp_01-06-2025_03_00").is_parsed());
        assert!(!single("slp_01-06-2025_03_00.jpg").is_parsed());
        assert!(!single("slp_01-06-2025_03_00png").is_parsed());
    }

    #[test]
    fn test_single_level() {
        let stamp = single("slp_01-06-2025_03_00.png");
        assert!(stamp.is_parsed());
        assert_eq!(stamp.level, None);
        assert_eq!(
            stamp.valid_time.file_label(TimeFormat::Underscore),
            "01-06-2025_03_00"
        );
    }

    #[test]
    fn test_single_level_variable_with_underscores() {
        let stamp = single("ppn_accum_02-06-2025_18_00.png");
        assert!(stamp.is_parsed());
        assert_eq!(stamp.level, None);
    }

    #[test]
    fn test_multi_level() {
        let stamp = multi("u_temp_500_01-06-2025_00_00.png");
        assert_eq!(stamp.level.as_deref(), Some("500"));
        assert!(stamp.is_parsed());

        let stamp = multi("u_winds_temp_850_01-06-2025_06_00.png");
        assert_eq!(stamp.level.as_deref(), Some("850"));
    }

    #[test]
    fn test_multi_level_requires_numeric_level() {
        assert_eq!(multi("u_temp_high_01-06-2025_00_00.png"), FrameStamp::unparsed());
        assert_eq!(multi("500_01-06-2025_00_00.png"), FrameStamp::unparsed());
        assert_eq!(multi("_500_01-06-2025_00_00.png"), FrameStamp::unparsed());
    }

    #[test]
    fn test_malformed_names_fall_back() {
        for name in [
            "slp_bad-name.png",
            "slp.png",
            "01-06-2025_00_00.png",
            "_01-06-2025_00_00.png",
            "slp_01-06-2025_00.png",
            "slp_01-06-2025_00_00_00.png",
            "slp_1-6-2025_00_00.png",
            "slp_32-06-2025_00_00.png",
        ] {
            let stamp = single(name);
            assert!(!stamp.is_parsed(), "{name} should not parse");
            assert_eq!(stamp.level, None);
        }
    }

    #[test]
    fn test_extra_token_reads_as_part_of_variable() {
        // Extra tokens before the timestamp belong to the variable name.
        assert!(single("slp_extra_01-06-2025_00_00.png").is_parsed());
    }

    #[test]
    fn test_grammar_is_not_guessed() {
        // A multi-level name read as single-level is still well formed,
        // but its level is never reported.
        let stamp = single("u_temp_500_01-06-2025_00_00.png");
        assert!(stamp.is_parsed());
        assert_eq!(stamp.level, None);

        // A single-level name read as multi-level fails.
        assert!(!multi("slp_01-06-2025_00_00.png").is_parsed());
    }

    #[test]
    fn test_legacy_colon_format() {
        let stamp = parse_frame_name(
            "u_temp_500_01-06-2025_00:00.png",
            VariableKind::MultiLevel,
            TimeFormat::Colon,
            "png",
        );
        assert_eq!(stamp.level.as_deref(), Some("500"));

        let stamp = parse_frame_name(
            "slp_01-06-2025_00_00.png",
            VariableKind::SingleLevel,
            TimeFormat::Colon,
            "png",
        );
        assert!(!stamp.is_parsed());
    }
}
