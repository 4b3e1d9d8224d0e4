//! Greedy line-breaking pagination for [`TextDocument`]s.

use crate::document::{Block, TextDocument};
use crate::encoding::text_width;
use crate::error::BackendError;
use folio_types::PageFormat;

pub(crate) const BODY_FONT_SIZE: f32 = 11.0;
pub(crate) const BODY_LINE_HEIGHT: f32 = 14.0;
pub(crate) const TITLE_FONT_SIZE: f32 = 18.0;
pub(crate) const TITLE_LINE_HEIGHT: f32 = 24.0;
const PARAGRAPH_GAP: f32 = 7.0;
/// Padding between the printable area and the text, like a page body margin.
const BODY_PADDING: f32 = 36.0;

/// A line of text positioned on a page. `y` is the distance from the top of
/// the page to the top of the line box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
}

struct Cursor {
    pages: Vec<LaidOutPage>,
    x: f32,
    top: f32,
    bottom: f32,
    y: f32,
}

impl Cursor {
    fn new(x: f32, top: f32, bottom: f32) -> Self {
        Self {
            pages: vec![LaidOutPage::default()],
            x,
            top,
            bottom,
            y: top,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.y = self.top;
    }

    fn place(&mut self, text: String, font_size: f32, line_height: f32) {
        let page_has_content = self.pages.last().is_some_and(|p| !p.lines.is_empty());
        if self.y + line_height > self.bottom && page_has_content {
            self.new_page();
        }
        let (x, y) = (self.x, self.y);
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                text,
                x,
                y,
                font_size,
            });
        }
        self.y += line_height;
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }
}

/// Splits `text` into lines no wider than `max_width` points in Helvetica at
/// `font_size`, breaking on whitespace and hard-splitting words that do not
/// fit on a line of their own. A line always holds at least one character.
pub(crate) fn wrap(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let space = text_width(" ", font_size);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0;

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        let mut word_width = text_width(&word, font_size);

        if word_width > max_width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            let mut piece = String::new();
            let mut piece_width = 0.0;
            for c in word.chars() {
                let w = text_width(c.encode_utf8(&mut [0; 4]), font_size);
                if piece_width + w > max_width && !piece.is_empty() {
                    lines.push(std::mem::take(&mut piece));
                    piece_width = 0.0;
                }
                piece.push(c);
                piece_width += w;
            }
            word = piece;
            word_width = piece_width;
        }

        if !line.is_empty() && line_width + space + word_width > max_width {
            lines.push(std::mem::take(&mut line));
            line_width = 0.0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_width += space;
        }
        line.push_str(&word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Lays the document out on pages of `format`. Always yields at least one page.
pub fn paginate(document: &TextDocument, format: &PageFormat) -> Result<Vec<LaidOutPage>, BackendError> {
    let (area_x, area_y, area_w, area_h) = format.printable_area_pt();
    let width = area_w - 2.0 * BODY_PADDING;
    let height = area_h - 2.0 * BODY_PADDING;
    if width < TITLE_FONT_SIZE || height < TITLE_LINE_HEIGHT {
        return Err(BackendError::NoPrintableArea {
            width: area_w.max(0.0),
            height: area_h.max(0.0),
        });
    }

    let x = area_x + BODY_PADDING;
    let top = area_y + BODY_PADDING;
    let mut cursor = Cursor::new(x, top, top + height);

    if let Some(title) = &document.title {
        for line in wrap(title, width, TITLE_FONT_SIZE) {
            cursor.place(line, TITLE_FONT_SIZE, TITLE_LINE_HEIGHT);
        }
        cursor.gap(PARAGRAPH_GAP);
    }

    for block in &document.blocks {
        match block {
            Block::Paragraph(text) => {
                for line in wrap(text, width, BODY_FONT_SIZE) {
                    cursor.place(line, BODY_FONT_SIZE, BODY_LINE_HEIGHT);
                }
                cursor.gap(PARAGRAPH_GAP);
            }
            Block::PageBreak => cursor.new_page(),
        }
    }

    Ok(cursor.pages)
}
