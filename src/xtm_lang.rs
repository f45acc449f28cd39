// Multi-language support module
// Provides localized UI strings for English and Chinese

#[derive(Clone)]
pub struct Assets {
    // Header messages
    pub status_attempts_fmt: &'static str, // "Attempts left: {}"
    pub status_won: &'static str,
    pub status_lost_fmt: &'static str, // "... ({},{}) ..." with 1-based row, col

    // Terminal size messages
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str, // "Minimum size required: {} x {}"
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        status_attempts_fmt: "Attempts left: {}",
        status_won: "You found the mole! Press R to play again.",
        status_lost_fmt: "You lost! Mole was at ({},{}). Press R to retry.",

        tsmsg_line1: "Terminal too small",
        tsmsg_line2: "Minimum size required: {} x {}",
    }
}

/// Returns Chinese language assets
pub fn chinese_assets() -> Assets {
    Assets {
        status_attempts_fmt: "剩余机会：{}",
        status_won: "你找到了鼹鼠！按 R 再玩一次。",
        status_lost_fmt: "你输了！鼹鼠在 ({},{})。按 R 重试。",

        tsmsg_line1: "终端窗口过小",
        tsmsg_line2: "最小需要尺寸：{} x {}",
    }
}

/// Fill the `{}` placeholders of a template from left to right
fn fill(template: &str, args: &[&dyn std::fmt::Display]) -> String {
    args.iter()
        .fold(template.to_string(), |s, a| s.replacen("{}", &a.to_string(), 1))
}

/// Active language and its string assets
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Creates a new Lang instance from a language code
    /// Normalizes input (e.g., "zh-CN" → "zh") and defaults to English for unsupported languages
    pub fn new(lang_code: &str) -> Self {
        let normalized = lang_code.to_lowercase();
        if normalized.starts_with("zh") {
            Lang {
                current_lang: "zh".to_string(),
                assets: chinese_assets(),
            }
        } else {
            Lang {
                current_lang: "en".to_string(),
                assets: english_assets(),
            }
        }
    }

    pub fn attempts_left(&self, attempts: u32) -> String {
        fill(self.assets.status_attempts_fmt, &[&attempts])
    }

    /// Loss message naming the mole's position, 1-indexed for players
    pub fn lost(&self, (row, col): (usize, usize)) -> String {
        fill(self.assets.status_lost_fmt, &[&(row + 1), &(col + 1)])
    }

    pub fn min_size(&self, (w, h): (u16, u16)) -> String {
        fill(self.assets.tsmsg_line2, &[&w, &h])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_are_normalized() {
        assert_eq!(Lang::new("zh-CN").current_lang, "zh");
        assert_eq!(Lang::new("ZH_tw").current_lang, "zh");
        assert_eq!(Lang::new("en-US").current_lang, "en");
        assert_eq!(Lang::new("fr").current_lang, "en");
        assert_eq!(Lang::new("").current_lang, "en");
    }

    #[test]
    fn english_messages() {
        let lang = Lang::new("en");
        assert_eq!(lang.attempts_left(5), "Attempts left: 5");
        assert_eq!(lang.lost((0, 7)), "You lost! Mole was at (1,8). Press R to retry.");
        assert_eq!(lang.min_size((16, 11)), "Minimum size required: 16 x 11");
    }

    #[test]
    fn chinese_messages() {
        let lang = Lang::new("zh");
        assert_eq!(lang.attempts_left(2), "剩余机会：2");
        assert_eq!(lang.lost((3, 4)), "你输了！鼹鼠在 (4,5)。按 R 重试。");
    }
}
