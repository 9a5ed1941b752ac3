//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),           // 深灰背景
        bg_secondary: Color::Rgb(48, 48, 48), // 选中行背景
        highlight: Color::Rgb(0, 255, 136),   // 亮绿色
        accent: Color::Rgb(217, 70, 239),     // 品红
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        success: Color::Rgb(0, 255, 136),
        error: Color::Rgb(255, 85, 85),
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        highlight: Color::Rgb(0, 128, 68),
        accent: Color::Rgb(192, 38, 211),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        success: Color::Rgb(0, 150, 80),
        error: Color::Rgb(200, 50, 50),
    }
}

/// Dracula
pub fn dracula_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(40, 42, 54),
        bg_secondary: Color::Rgb(68, 71, 90),
        highlight: Color::Rgb(189, 147, 249),
        accent: Color::Rgb(255, 121, 198),
        text: Color::Rgb(248, 248, 242),
        muted: Color::Rgb(98, 114, 164),
        border: Color::Rgb(68, 71, 90),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    }
}

/// Nord
pub fn nord_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(46, 52, 64),
        bg_secondary: Color::Rgb(59, 66, 82),
        highlight: Color::Rgb(136, 192, 208),
        accent: Color::Rgb(180, 142, 173),
        text: Color::Rgb(236, 239, 244),
        muted: Color::Rgb(118, 128, 148),
        border: Color::Rgb(76, 86, 106),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    }
}
