//! 系统主题检测

use std::process::Command;

/// 检测系统是否为深色模式
///
/// macOS 读取 AppleInterfaceStyle；其他系统看终端的 COLORFGBG（背景色号 < 7 视为深色）。
/// 都无法判断时默认深色。
pub fn detect_system_theme() -> bool {
    if cfg!(target_os = "macos") {
        return Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|output| {
                output.status.success()
                    && String::from_utf8_lossy(&output.stdout)
                        .trim()
                        .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(false);
    }
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| parse_colorfgbg(&v))
        .unwrap_or(true)
}

/// "15;0" → Some(true)，"0;15" → Some(false)
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg < 7 || bg == 8)
}
