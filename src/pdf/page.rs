use lopdf::Object;
use lopdf::content::Operation;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const LINE_SPACING: f32 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Regular => b"F1",
            Self::Bold => b"F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Top-down flowing text writer producing one operation list per page.
pub struct PageWriter {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageWriter {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    pub fn move_down(&mut self, points: f32) {
        self.y -= points;
    }

    /// Blank line at `size`.
    pub fn gap(&mut self, size: f32) {
        self.move_down(size * LINE_SPACING);
    }

    pub fn text(&mut self, text: &str, size: f32) {
        self.styled(text, size, Font::Regular, Align::Left, false);
    }

    pub fn bold(&mut self, text: &str, size: f32) {
        self.styled(text, size, Font::Bold, Align::Left, false);
    }

    pub fn heading(&mut self, text: &str, size: f32) {
        self.styled(text, size, Font::Regular, Align::Left, true);
    }

    pub fn right(&mut self, text: &str, size: f32, font: Font) {
        self.styled(text, size, font, Align::Right, false);
    }

    /// Write `text`, wrapping at the content width and splitting on newlines.
    pub fn styled(&mut self, text: &str, size: f32, font: Font, align: Align, underline: bool) {
        let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (size * AVG_GLYPH_WIDTH)) as usize;
        for line in text.lines() {
            for chunk in wrap(line, max_chars) {
                self.line(&chunk, size, font, align, underline);
            }
        }
        if text.is_empty() {
            self.gap(size);
        }
    }

    fn line(&mut self, text: &str, size: f32, font: Font, align: Align, underline: bool) {
        let leading = size * LINE_SPACING;
        self.ensure_space(leading);
        self.y -= size;

        let width = text_width(text, size);
        let x = match align {
            Align::Left => MARGIN,
            Align::Right => PAGE_WIDTH - MARGIN - width,
        };

        self.current.push(Operation::new("BT", vec![]));
        self.current.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font.resource_name().to_vec()),
                Object::Real(size),
            ],
        ));
        self.current.push(Operation::new(
            "Td",
            vec![Object::Real(x), Object::Real(self.y)],
        ));
        self.current.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(text))],
        ));
        self.current.push(Operation::new("ET", vec![]));

        if underline {
            let y = self.y - 2.0;
            self.current.extend([
                Operation::new("w", vec![Object::Real(0.5)]),
                Operation::new("m", vec![Object::Real(x), Object::Real(y)]),
                Operation::new("l", vec![Object::Real(x + width), Object::Real(y)]),
                Operation::new("S", vec![]),
            ]);
        }

        self.y -= leading - size;
    }

    /// Draw an image XObject with its top-left corner at (`x`, current y).
    pub fn image(&mut self, name: &str, x: f32, width: f32, height: f32) {
        self.ensure_space(height);
        let bottom = self.y - height;
        self.current.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(width),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(height),
                    Object::Real(x),
                    Object::Real(bottom),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
        self.y = bottom;
    }

    /// Draw an image without moving the cursor.
    pub fn image_at(&mut self, name: &str, x: f32, top: f32, width: f32, height: f32) {
        let saved = self.y;
        self.y = top;
        self.image(name, x, width, height);
        self.y = saved;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.new_page();
        }
    }

    pub fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Operation lists, one per page. Never empty.
    pub fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH
}

/// Greedy word wrap; words longer than a line are hard-split. Leading
/// indentation is repeated on every wrapped line.
fn wrap(line: &str, max_chars: usize) -> Vec<String> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let max_chars = max_chars.saturating_sub(indent.chars().count()).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in body.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    if !indent.is_empty() && !body.is_empty() {
        for line in &mut lines {
            line.insert_str(0, indent);
        }
    }
    lines
}

/// Encode for the standard fonts' WinAnsiEncoding. Characters outside
/// Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}
