/*
 * Platform-agnostic color primitives and the title pane palette. Nothing in
 * here touches Win32, so both the portable chrome logic and its tests can use
 * these types on any target.
 */

use crate::types::DecorationStyle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /*
     * Mixes two colors channel by channel. `percent` is the weight of `self`
     * (1.0 yields `self`, 0.0 yields `other`); values outside 0..=1 are clamped.
     */
    pub fn blend(self, other: Color, percent: f64) -> Color {
        let percent = percent.clamp(0.0, 1.0);
        let inverse = 1.0 - percent;
        let mix = |a: u8, b: u8| -> u8 { (a as f64 * percent + b as f64 * inverse) as u8 };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

// ── Default palette ───────────────────────────────────────────────────────────

const TITLE_BACKGROUND: Color = Color::rgb(0x3C, 0x3F, 0x41);
const TITLE_FOREGROUND: Color = Color::rgb(0xBB, 0xBB, 0xBB);
const TITLE_INACTIVE_BACKGROUND: Color = Color::rgb(0x45, 0x48, 0x4A);
const TITLE_INACTIVE_FOREGROUND: Color = Color::rgb(0x80, 0x80, 0x80);
const TITLE_BORDER: Color = Color::rgb(0x2B, 0x2B, 0x2B);
const ERROR_DIALOG_BACKGROUND: Color = Color::rgb(0x6E, 0x3B, 0x3B);
const QUESTION_DIALOG_BACKGROUND: Color = Color::rgb(0x3B, 0x4D, 0x6E);
const WARNING_DIALOG_BACKGROUND: Color = Color::rgb(0x6E, 0x5E, 0x3B);

/// A background/foreground pair used for one color role of the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub background: Color,
    pub foreground: Color,
}

/*
 * Colors for every title bar role. The active pair depends on the decoration
 * style (error/question/warning dialogs get their own tint); the inactive
 * pair and border are shared by all styles.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePanePalette {
    pub frame: ColorPair,
    pub error_dialog: ColorPair,
    pub question_dialog: ColorPair,
    pub warning_dialog: ColorPair,
    pub inactive: ColorPair,
    pub border: Color,
}

impl TitlePanePalette {
    pub fn active_for(&self, style: DecorationStyle) -> ColorPair {
        match style {
            DecorationStyle::ErrorDialog => self.error_dialog,
            DecorationStyle::QuestionDialog
            | DecorationStyle::ColorChooserDialog
            | DecorationStyle::FileChooserDialog => self.question_dialog,
            DecorationStyle::WarningDialog => self.warning_dialog,
            _ => self.frame,
        }
    }

    pub fn pair_for(&self, style: DecorationStyle, active: bool) -> ColorPair {
        if active {
            self.active_for(style)
        } else {
            self.inactive
        }
    }
}

impl Default for TitlePanePalette {
    fn default() -> Self {
        let dialog = |background| ColorPair {
            background,
            foreground: TITLE_FOREGROUND,
        };
        Self {
            frame: dialog(TITLE_BACKGROUND),
            error_dialog: dialog(ERROR_DIALOG_BACKGROUND),
            question_dialog: dialog(QUESTION_DIALOG_BACKGROUND),
            warning_dialog: dialog(WARNING_DIALOG_BACKGROUND),
            inactive: ColorPair {
                background: TITLE_INACTIVE_BACKGROUND,
                foreground: TITLE_INACTIVE_FOREGROUND,
            },
            border: TITLE_BORDER,
        }
    }
}
