use std::fs;
use std::io;
use std::path::Path;

/// A unit of document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    PageBreak,
}

/// A plain-text document: an optional title followed by paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl TextDocument {
    pub fn new(title: Option<String>, blocks: Vec<Block>) -> Self {
        Self { title, blocks }
    }

    /// Parses plain text. A first line starting with `# ` becomes the title,
    /// blank lines separate paragraphs and a form feed (`\f`) forces a new page.
    /// Lines inside a paragraph are joined with single spaces.
    pub fn parse(text: &str) -> Self {
        let mut title = None;
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        fn flush(current: &mut Vec<&str>, blocks: &mut Vec<Block>) {
            if !current.is_empty() {
                blocks.push(Block::Paragraph(current.join(" ")));
                current.clear();
            }
        }

        for (index, raw_line) in text.lines().enumerate() {
            if index == 0
                && let Some(heading) = raw_line.strip_prefix("# ")
            {
                title = Some(heading.trim().to_string());
                continue;
            }

            let mut segments = raw_line.split('\u{c}').peekable();
            while let Some(segment) = segments.next() {
                let trimmed = segment.trim();
                if trimmed.is_empty() {
                    flush(&mut current, &mut blocks);
                } else {
                    current.push(trimmed);
                }
                if segments.peek().is_some() {
                    flush(&mut current, &mut blocks);
                    blocks.push(Block::PageBreak);
                }
            }
        }
        flush(&mut current, &mut blocks);

        Self { title, blocks }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to read document from '{}': {}", path.display(), e),
            )
        })?;
        Ok(Self::parse(&text))
    }
}
