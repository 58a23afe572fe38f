use regex::Regex;

/// Normalize a catalog title into a filesystem-safe name.
///
/// Square brackets become parentheses; everything outside Hangul syllables,
/// ASCII letters and digits, `_`, `(`, `)`, `<`, `>`, `,` and whitespace is
/// dropped; whitespace runs collapse to a single space. Two titles are
/// treated as equal wherever the catalog is searched by title iff their
/// sanitized forms are character-equal.
pub fn sanitize(text: &str) -> String {
    let text = text.replace('[', "(").replace(']', ")");
    let kept = text
        .chars()
        .filter(|&c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '\u{AC00}'..='\u{D7A3}' | '_' | '(' | ')' | '<' | '>' | ',')
        })
        .collect::<String>();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True for a 24-character lowercase hex catalog identifier.
pub fn is_catalog_id(name: &str) -> bool {
    name.len() == 24 && name.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

/// Structured capture of a media filename: sequence number, the middle
/// token (a lecture id or a sanitized title), and the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaName {
    pub sn: u32,
    pub token: String,
    pub ext: String,
}

/// Parse an id-scheme filename, `NNN_<lectureId>.mkv|vtt`.
pub fn parse_id_name(name: &str) -> Option<MediaName> {
    let re = Regex::new(r"^(\d{3})_([0-9a-f]{24})\.(mkv|vtt)$").ok()?;
    let caps = re.captures(name)?;
    Some(MediaName {
        sn: caps[1].parse().ok()?,
        token: caps[2].to_string(),
        ext: caps[3].to_string(),
    })
}

/// Parse a title-scheme filename, `NNN_<title>.mkv|vtt`.
pub fn parse_title_name(name: &str) -> Option<MediaName> {
    let re = Regex::new(r"^(\d{3})_(.+?)\.(mkv|vtt)$").ok()?;
    let caps = re.captures(name)?;
    Some(MediaName {
        sn: caps[1].parse().ok()?,
        token: caps[2].to_string(),
        ext: caps[3].to_string(),
    })
}

pub fn media_file_name(sn: u32, token: &str, ext: &str) -> String {
    format!("{sn:03}_{token}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_brackets_and_disallowed() {
        assert_eq!(sanitize("Intro [Part 1]: 요리"), "Intro (Part 1) 요리");
    }

    #[test]
    fn test_sanitize_keeps_allowed_punctuation() {
        assert_eq!(
            sanitize("a_b (c) <d>, e"),
            "a_b (c) <d>, e"
        );
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize("  spaced\t\tout \n title  "), "spaced out title");
    }

    #[test]
    fn test_sanitize_hangul() {
        assert_eq!(sanitize("김치찌개 만들기"), "김치찌개 만들기");
    }

    #[test]
    fn test_sanitize_drops_symbols() {
        assert_eq!(sanitize("50% off! #1 & more…"), "50 off 1 more");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for s in [
            "Intro [Part 1]: 요리",
            "  spaced\t\tout \n title  ",
            "50% off! #1 & more…",
            "김치찌개 만들기",
            "",
        ] {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn test_sanitize_empty_result() {
        assert_eq!(sanitize("!@#$%^&*"), "");
    }

    #[test]
    fn test_is_catalog_id_valid() {
        assert!(is_catalog_id("5f3a9c8e1b2d4f6a8c0e2b4d"));
        assert!(is_catalog_id(&"a".repeat(24)));
    }

    #[test]
    fn test_is_catalog_id_rejects_uppercase() {
        assert!(!is_catalog_id("5F3A9C8E1B2D4F6A8C0E2B4D"));
    }

    #[test]
    fn test_is_catalog_id_rejects_wrong_length() {
        assert!(!is_catalog_id(&"a".repeat(23)));
        assert!(!is_catalog_id(&"a".repeat(25)));
        assert!(!is_catalog_id(""));
    }

    #[test]
    fn test_is_catalog_id_rejects_non_hex() {
        assert!(!is_catalog_id("5f3a9c8e1b2d4f6a8c0e2b4z"));
        assert!(!is_catalog_id("Cooking Basics (Season 1)"));
    }

    #[test]
    fn test_parse_id_name_valid() {
        let id = "5f3a9c8e1b2d4f6a8c0e2b4d";
        assert_eq!(
            parse_id_name(&format!("001_{id}.mkv")),
            Some(MediaName {
                sn: 1,
                token: id.to_string(),
                ext: "mkv".to_string(),
            })
        );
        assert_eq!(
            parse_id_name(&format!("042_{id}.vtt")),
            Some(MediaName {
                sn: 42,
                token: id.to_string(),
                ext: "vtt".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_id_name_rejects_bad_id() {
        assert!(parse_id_name("001_5F3A9C8E1B2D4F6A8C0E2B4D.mkv").is_none());
        assert!(parse_id_name(&format!("001_{}.mkv", "a".repeat(23))).is_none());
        assert!(parse_id_name("001_Some Title.mkv").is_none());
    }

    #[test]
    fn test_parse_id_name_rejects_bad_sn() {
        let id = "a".repeat(24);
        assert!(parse_id_name(&format!("01_{id}.mkv")).is_none());
        assert!(parse_id_name(&format!("0001_{id}.mkv")).is_none());
    }

    #[test]
    fn test_parse_id_name_rejects_foreign_extension() {
        let id = "a".repeat(24);
        assert!(parse_id_name(&format!("001_{id}.mp4")).is_none());
        assert!(parse_id_name(&format!("001_{id}.srt")).is_none());
        assert!(parse_id_name(&format!("001_{id}")).is_none());
    }

    #[test]
    fn test_parse_title_name_valid() {
        assert_eq!(
            parse_title_name("003_Plating and Garnish.vtt"),
            Some(MediaName {
                sn: 3,
                token: "Plating and Garnish".to_string(),
                ext: "vtt".to_string(),
            })
        );
        assert_eq!(
            parse_title_name("012_김치찌개 만들기.mkv"),
            Some(MediaName {
                sn: 12,
                token: "김치찌개 만들기".to_string(),
                ext: "mkv".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_title_name_captures_up_to_final_extension() {
        assert_eq!(
            parse_title_name("001_a.b.mkv"),
            Some(MediaName {
                sn: 1,
                token: "a.b".to_string(),
                ext: "mkv".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_title_name_accepts_id_token() {
        // An id-scheme name is also a valid title-scheme name; the reverse
        // pass relies on the catalog lookup missing for such tokens.
        let id = "a".repeat(24);
        let parsed = parse_title_name(&format!("001_{id}.mkv")).unwrap();
        assert_eq!(parsed.token, id);
    }

    #[test]
    fn test_parse_title_name_rejects_empty_title() {
        assert!(parse_title_name("001_.mkv").is_none());
    }

    #[test]
    fn test_parse_title_name_rejects_missing_sn() {
        assert!(parse_title_name("Some Title.mkv").is_none());
        assert!(parse_title_name("01_Some Title.mkv").is_none());
    }

    #[test]
    fn test_media_file_name() {
        assert_eq!(media_file_name(1, "Bar", "mkv"), "001_Bar.mkv");
        assert_eq!(media_file_name(42, "a".repeat(24).as_str(), "vtt"), format!("042_{}.vtt", "a".repeat(24)));
        assert_eq!(media_file_name(123, "x", "mkv"), "123_x.mkv");
    }

    #[test]
    fn test_media_file_name_round_trips_through_parse() {
        let name = media_file_name(7, "Knife Skills (Basics)", "mkv");
        let parsed = parse_title_name(&name).unwrap();
        assert_eq!(parsed.sn, 7);
        assert_eq!(parsed.token, "Knife Skills (Basics)");
        assert_eq!(parsed.ext, "mkv");
    }
}
