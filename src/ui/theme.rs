use crate::editor::ThemeName;
use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub comment: Color,
    pub success: Color,
    pub error: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub line_number: Color,
}

pub const MONOKAI: Theme = Theme {
    bg: Color::Rgb(39, 40, 34),
    fg: Color::Rgb(248, 248, 242),
    primary: Color::Rgb(102, 217, 239),   // Cyan
    secondary: Color::Rgb(253, 151, 31),  // Orange
    comment: Color::Rgb(117, 113, 94),
    success: Color::Rgb(166, 226, 46),    // Green
    error: Color::Rgb(249, 38, 114),      // Pink/red
    keyword: Color::Rgb(249, 38, 114),
    string: Color::Rgb(230, 219, 116),    // Yellow
    number: Color::Rgb(174, 129, 255),    // Purple
    border_focused: Color::Rgb(230, 219, 116),
    border_normal: Color::Rgb(117, 113, 94),
    current_line_bg: Color::Rgb(62, 61, 50),
    line_number: Color::Rgb(144, 144, 138),
};

pub const MOCHA: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),
    string: Color::Rgb(250, 179, 135),
    number: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    line_number: Color::Rgb(108, 112, 134),
};

/// Palette for a theme preset
pub fn palette(name: ThemeName) -> &'static Theme {
    match name {
        ThemeName::Monokai => &MONOKAI,
        ThemeName::Mocha => &MOCHA,
    }
}
