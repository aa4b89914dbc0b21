//! Default collations for MySQL character sets.

/// Returns the default collation MySQL assigns to `character_set`.
///
/// Returns `None` for character sets outside the known table, in which
/// case no collation rule applies.
#[must_use]
pub fn default_collation_for(character_set: &str) -> Option<&'static str> {
    let collation = match character_set {
        "big5" => "big5_chinese_ci",
        "dec8" => "dec8_swedish_ci",
        "cp850" => "cp850_general_ci",
        "hp8" => "hp8_english_ci",
        "koi8r" => "koi8r_general_ci",
        "latin1" => "latin1_swedish_ci",
        "latin2" => "latin2_general_ci",
        "swe7" => "swe7_swedish_ci",
        "ascii" => "ascii_general_ci",
        "ujis" => "ujis_japanese_ci",
        "sjis" => "sjis_japanese_ci",
        "hebrew" => "hebrew_general_ci",
        "tis620" => "tis620_thai_ci",
        "euckr" => "euckr_korean_ci",
        "koi8u" => "koi8u_general_ci",
        "gb2312" => "gb2312_chinese_ci",
        "greek" => "greek_general_ci",
        "cp1250" => "cp1250_general_ci",
        "gbk" => "gbk_chinese_ci",
        "latin5" => "latin5_turkish_ci",
        "armscii8" => "armscii8_general_ci",
        "utf8" => "utf8_general_ci",
        "ucs2" => "ucs2_general_ci",
        "cp866" => "cp866_general_ci",
        "keybcs2" => "keybcs2_general_ci",
        "macce" => "macce_general_ci",
        "macroman" => "macroman_general_ci",
        "cp852" => "cp852_general_ci",
        "latin7" => "latin7_general_ci",
        "utf8mb4" => "utf8mb4_general_ci",
        "cp1251" => "cp1251_general_ci",
        "utf16" => "utf16_general_ci",
        "utf16le" => "utf16le_general_ci",
        "cp1256" => "cp1256_general_ci",
        "cp1257" => "cp1257_general_ci",
        "utf32" => "utf32_general_ci",
        "binary" => "binary",
        "geostd8" => "geostd8_general_ci",
        "cp932" => "cp932_japanese_ci",
        "eucjpms" => "eucjpms_japanese_ci",
        "gb18030" => "gb18030_chinese_ci",
        _ => return None,
    };
    Some(collation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_character_sets() {
        assert_eq!(default_collation_for("utf8"), Some("utf8_general_ci"));
        assert_eq!(default_collation_for("utf8mb4"), Some("utf8mb4_general_ci"));
        assert_eq!(default_collation_for("latin1"), Some("latin1_swedish_ci"));
        assert_eq!(default_collation_for("hp8"), Some("hp8_english_ci"));
        assert_eq!(default_collation_for("binary"), Some("binary"));
        assert_eq!(default_collation_for("gb18030"), Some("gb18030_chinese_ci"));
    }

    const ALL_DEFAULTS: [(&str, &str); 41] = [
        ("big5", "big5_chinese_ci"),
        ("dec8", "dec8_swedish_ci"),
        ("cp850", "cp850_general_ci"),
        ("hp8", "hp8_english_ci"),
        ("koi8r", "koi8r_general_ci"),
        ("latin1", "latin1_swedish_ci"),
        ("latin2", "latin2_general_ci"),
        ("swe7", "swe7_swedish_ci"),
        ("ascii", "ascii_general_ci"),
        ("ujis", "ujis_japanese_ci"),
        ("sjis", "sjis_japanese_ci"),
        ("hebrew", "hebrew_general_ci"),
        ("tis620", "tis620_thai_ci"),
        ("euckr", "euckr_korean_ci"),
        ("koi8u", "koi8u_general_ci"),
        ("gb2312", "gb2312_chinese_ci"),
        ("greek", "greek_general_ci"),
        ("cp1250", "cp1250_general_ci"),
        ("gbk", "gbk_chinese_ci"),
        ("latin5", "latin5_turkish_ci"),
        ("armscii8", "armscii8_general_ci"),
        ("utf8", "utf8_general_ci"),
        ("ucs2", "ucs2_general_ci"),
        ("cp866", "cp866_general_ci"),
        ("keybcs2", "keybcs2_general_ci"),
        ("macce", "macce_general_ci"),
        ("macroman", "macroman_general_ci"),
        ("cp852", "cp852_general_ci"),
        ("latin7", "latin7_general_ci"),
        ("utf8mb4", "utf8mb4_general_ci"),
        ("cp1251", "cp1251_general_ci"),
        ("utf16", "utf16_general_ci"),
        ("utf16le", "utf16le_general_ci"),
        ("cp1256", "cp1256_general_ci"),
        ("cp1257", "cp1257_general_ci"),
        ("utf32", "utf32_general_ci"),
        ("binary", "binary"),
        ("geostd8", "geostd8_general_ci"),
        ("cp932", "cp932_japanese_ci"),
        ("eucjpms", "eucjpms_japanese_ci"),
        ("gb18030", "gb18030_chinese_ci"),
    ];

    #[test]
    fn test_all_default_collations() {
        for (character_set, collation) in ALL_DEFAULTS {
            assert_eq!(
                default_collation_for(character_set),
                Some(collation),
                "character set {character_set}"
            );
        }
    }

    #[test]
    fn test_unknown_character_set() {
        assert_eq!(default_collation_for("klingon"), None);
        assert_eq!(default_collation_for(""), None);
        // Lookup is exact; MySQL reports character set names in lowercase.
        assert_eq!(default_collation_for("UTF8"), None);
    }
}
