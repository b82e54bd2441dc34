//! The fixed table of named cell styles shared by every sheet.
//!
//! Built once per workbook and referenced immutably by the rendering
//! logic. Day-column pairs alternate between two background bands keyed
//! by day index parity.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatUnderline};

// ── Palette ───────────────────────────────────────────────────────────────────

const CHROME_BG: Color = Color::RGB(0x5C5B5A);
const BORDER_GREY: Color = Color::RGB(0x808080);
const SSID_BG: Color = Color::RGB(0xC0C0C0);
const BAND_EVEN_BG: Color = Color::RGB(0xF2F2F2);
const BAND_ODD_BG: Color = Color::RGB(0xFFFFFF);
const LOCATION_RULE: Color = Color::RGB(0x0000EE);
const SUBGROUP_RULE: Color = Color::RGB(0x800080);

// ── SheetStyles ───────────────────────────────────────────────────────────────

/// Every named cell format used by the sheet renderer.
#[derive(Debug, Clone)]
pub struct SheetStyles {
    /// Merged report title band.
    pub title: Format,
    /// Merged sheet-name label in column A.
    pub site_label: Format,
    /// Static column headers and the "Users" day sub-header.
    pub header: Format,
    /// "Sessions" day sub-header carrying the vertical day separator.
    pub header_day_sep: Format,
    /// Merged per-day date label.
    pub day_header: Format,
    /// Bold stand-alone headings (summary and time-stamps boxes).
    pub heading: Format,
    /// Underlined column titles in the summary block.
    pub column_title: Format,
    /// Location summary row label.
    pub location_label: Format,
    /// Location summary row counts.
    pub location_count: Format,
    /// SSID breakdown row label.
    pub ssid_label: Format,
    /// SSID breakdown row counts.
    pub ssid_count: Format,
    /// Building/sublocation breakdown row label.
    pub subgroup_label: Format,
    /// Building/sublocation breakdown row counts.
    pub subgroup_count: Format,
    day_sessions: [Format; 2],
    day_users: [Format; 2],
}

impl SheetStyles {
    pub fn new() -> Self {
        let chrome = |size: f64| {
            Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(CHROME_BG)
                .set_font_color(Color::White)
                .set_font_size(size)
        };

        let header = chrome(10.0).set_border_bottom(FormatBorder::Medium);

        let day_cell = |bg: Color, separated: bool| {
            let format = Format::new()
                .set_background_color(bg)
                .set_align(FormatAlign::Right)
                .set_border_top(FormatBorder::Thin)
                .set_border_bottom(FormatBorder::Thin);
            if separated {
                format
                    .set_border_left(FormatBorder::Medium)
                    .set_border_right(FormatBorder::Medium)
                    .set_border_color(BORDER_GREY)
            } else {
                format
            }
        };

        Self {
            title: chrome(14.0),
            site_label: chrome(12.0).set_text_wrap(),
            header_day_sep: header
                .clone()
                .set_border_left(FormatBorder::Medium)
                .set_border_color(BORDER_GREY),
            header,
            day_header: Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_bold()
                .set_font_size(10.0)
                .set_border_bottom(FormatBorder::Medium)
                .set_border_left(FormatBorder::Medium)
                .set_border_color(BORDER_GREY),
            heading: Format::new().set_bold(),
            column_title: Format::new()
                .set_align(FormatAlign::Center)
                .set_font_size(10.0)
                .set_underline(FormatUnderline::Single),
            location_label: Format::new()
                .set_bold()
                .set_font_size(10.0)
                .set_align(FormatAlign::Left)
                .set_border_bottom(FormatBorder::Thin)
                .set_border_bottom_color(LOCATION_RULE),
            location_count: Format::new()
                .set_bold()
                .set_font_size(10.0)
                .set_align(FormatAlign::Right)
                .set_border_bottom(FormatBorder::Thin)
                .set_border_bottom_color(LOCATION_RULE),
            ssid_label: Format::new()
                .set_font_size(10.0)
                .set_align(FormatAlign::Left)
                .set_background_color(SSID_BG),
            ssid_count: Format::new()
                .set_font_size(10.0)
                .set_align(FormatAlign::Right)
                .set_background_color(SSID_BG),
            subgroup_label: Format::new()
                .set_font_size(10.0)
                .set_align(FormatAlign::Left)
                .set_border_bottom(FormatBorder::Thin)
                .set_border_bottom_color(SUBGROUP_RULE),
            subgroup_count: Format::new()
                .set_font_size(10.0)
                .set_align(FormatAlign::Right)
                .set_border_bottom(FormatBorder::Thin)
                .set_border_bottom_color(SUBGROUP_RULE),
            day_sessions: [
                day_cell(BAND_EVEN_BG, true),
                day_cell(BAND_ODD_BG, true),
            ],
            day_users: [day_cell(BAND_EVEN_BG, false), day_cell(BAND_ODD_BG, false)],
        }
    }

    /// "Sessions" cell format for the day column at `day_index`.
    pub fn day_sessions(&self, day_index: usize) -> &Format {
        &self.day_sessions[day_index % 2]
    }

    /// "Users" cell format for the day column at `day_index`.
    pub fn day_users(&self, day_index: usize) -> &Format {
        &self.day_users[day_index % 2]
    }
}

impl Default for SheetStyles {
    fn default() -> Self {
        Self::new()
    }
}
