// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the sphindex CLI.
//!
//! OneDark on dark terminals, One Light on light ones. The theme comes from
//! `SPHINDEX_THEME` ("dark" / "light"), then the `COLORFGBG` hint some
//! terminals export, and falls back to dark. `NO_COLOR` and non-TTY stdout
//! turn styling off entirely, so piped output stays plain.

use std::sync::OnceLock;

/// Width between the `│` borders.
pub const BOX_WIDTH: usize = 76;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn theme_from_env(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    match explicit.map(str::to_lowercase).as_deref() {
        Some("light" | "l") => return Theme::Light,
        Some("dark" | "d") => return Theme::Dark,
        _ => {}
    }
    // "fg;bg": backgrounds 7 and 9-15 are light colors.
    let light_bg = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok())
        .is_some_and(|bg| bg >= 7 && bg != 8);
    if light_bg {
        Theme::Light
    } else {
        Theme::Dark
    }
}

pub fn theme() -> Theme {
    *THEME.get_or_init(|| {
        theme_from_env(
            std::env::var("SPHINDEX_THEME").ok().as_deref(),
            std::env::var("COLORFGBG").ok().as_deref(),
        )
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

type Rgb = (u8, u8, u8);

struct Palette {
    red: Rgb,
    green: Rgb,
    yellow: Rgb,
    blue: Rgb,
    magenta: Rgb,
    cyan: Rgb,
    gray: Rgb,
    bright_green: Rgb,
}

// https://github.com/joshdick/onedark.vim
const ONEDARK: Palette = Palette {
    red: (224, 108, 117),
    green: (152, 195, 121),
    yellow: (229, 192, 123),
    blue: (97, 175, 239),
    magenta: (198, 120, 221),
    cyan: (86, 182, 194),
    gray: (92, 99, 112),
    bright_green: (166, 226, 46),
};

// https://github.com/sonph/onehalf
const ONELIGHT: Palette = Palette {
    red: (228, 86, 73),
    green: (80, 161, 79),
    yellow: (193, 132, 1),
    blue: (64, 120, 242),
    magenta: (166, 38, 164),
    cyan: (1, 132, 188),
    gray: (160, 161, 167),
    bright_green: (68, 140, 39),
};

fn palette() -> &'static Palette {
    match theme() {
        Theme::Dark => &ONEDARK,
        Theme::Light => &ONELIGHT,
    }
}

fn rgb((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

macro_rules! theme_color {
    ($fn_name:ident, $field:ident) => {
        #[allow(non_snake_case)]
        pub fn $fn_name() -> String {
            rgb(palette().$field)
        }
    };
}

theme_color!(RED, red);
theme_color!(GREEN, green);
theme_color!(YELLOW, yellow);
theme_color!(BLUE, blue);
theme_color!(MAGENTA, magenta);
theme_color!(CYAN, cyan);
theme_color!(GRAY, gray);
theme_color!(BRIGHT_GREEN, bright_green);

// ═══════════════════════════════════════════════════════════════════════════
// STYLING
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Is stderr a terminal? Progress bars are only drawn there.
pub fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

/// Theme color plus modifiers, or plain text when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length as it appears on screen: ANSI escapes skipped.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if !in_escape => len += 1,
            _ => {}
        }
    }
    len
}

fn border(color_fn: fn() -> String) -> (String, &'static str) {
    if use_colors() {
        (color_fn(), RESET)
    } else {
        (String::new(), "")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

/// `│ content          │`
pub fn row(content: &str) {
    let (b, r) = border(GRAY);
    let content = truncate(content, BOX_WIDTH);
    let pad = BOX_WIDTH.saturating_sub(visible_len(&content));
    println!("{b}│{r}{content}{}{b}│{r}", " ".repeat(pad));
}

/// `│ label ......... value │` with the value right-aligned.
pub fn kv_row(label: &str, value: &str) {
    row(&kv_line(label, value));
}

/// Label and value keep at least two spaces between them; a plain value
/// too wide for the box is cut.
fn kv_line(label: &str, value: &str) -> String {
    let left = format!("  {}", styled(&[DIM], label));
    let room = BOX_WIDTH.saturating_sub(visible_len(&left) + 4);
    let right = format!("{}  ", truncate(value, room));
    let gap = BOX_WIDTH
        .saturating_sub(visible_len(&left) + visible_len(&right))
        .max(2);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn labelled_rule(left: char, right: char, label: &str) {
    let (b, r) = border(GRAY);
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{b}{left}{r}{label_part}{b}{}{right}{r}", "─".repeat(rest));
}

/// `┌─ LABEL ──────────┐`
pub fn section_top(label: &str) {
    labelled_rule('┌', '┐', label);
}

/// `├─ LABEL ──────────┤`
pub fn section_mid(label: &str) {
    labelled_rule('├', '┤', label);
}

/// `└──────────────────┘`
pub fn section_bot() {
    let (b, r) = border(GRAY);
    println!("{b}└{}┘{r}", "─".repeat(BOX_WIDTH));
}

/// Boxed, centered banner.
pub fn title(text: &str) {
    let (b, r) = border(BLUE);
    let colored = themed(CYAN, &[BOLD], text);
    let total = BOX_WIDTH.saturating_sub(visible_len(&colored));
    let left = total / 2;
    println!("{b}╔{}╗{r}", "═".repeat(BOX_WIDTH));
    println!(
        "{b}║{r}{}{colored}{}{b}║{r}",
        " ".repeat(left),
        " ".repeat(total - left)
    );
    println!("{b}╚{}╝{r}", "═".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    format!("{}{}", " ".repeat(width.saturating_sub(visible)), s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(visible)))
}

/// Cut plain text to `max` visible chars with a trailing `…`.
/// Styled strings are returned untouched.
pub fn truncate(s: &str, max: usize) -> String {
    if s.contains('\x1b') || s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// `size (NN% smaller)` for a compressed size.
pub fn savings(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return themed(GRAY, &[], "n/a");
    }
    let saved = (1.0 - compressed as f64 / raw as f64) * 100.0;
    let pct = format!("{:.0}% smaller", saved);
    format!("{} ({})", format_size(compressed), themed(GREEN, &[], &pct))
}

/// Score colored by strength: object name hits and title hits stand out.
pub fn score_value(score: i32) -> String {
    let text = format!("{:>4}", score);
    let color: fn() -> String = if score >= 15 {
        BRIGHT_GREEN
    } else if score >= 7 {
        GREEN
    } else if score > 0 {
        YELLOW
    } else {
        GRAY
    };
    themed(color, &[], &text)
}

pub fn kind_badge(kind: &str) -> String {
    match kind {
        "object" => themed(MAGENTA, &[], "[obj ]"),
        _ => themed(BLUE, &[], "[text]"),
    }
}

pub fn ok(text: &str) -> String {
    format!("{} {}", themed(GREEN, &[BOLD], "✓"), text)
}

pub fn warning(text: &str) -> String {
    format!("{} {}", themed(YELLOW, &[BOLD], "!"), text)
}

pub fn error(text: &str) -> String {
    format!("{} {}", themed(RED, &[BOLD], "✗"), text)
}
