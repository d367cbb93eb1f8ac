//! Output file naming.
//!
//! A name format is plain text with `{placeholder}` fields:
//!
//! | Field      | Value                              |
//! |------------|------------------------------------|
//! | `{class_}` | Player class, e.g. `Siren`         |
//! | `{skin}`   | Skin name from the input directory |
//! | `{part}`   | `head`, `body` or `palette_<part>` |
//! | `{date}`   | Local time as `DDMMYYYY-HHMMSS`    |
//!
//! `{{` and `}}` write literal braces.

use chrono::{DateTime, Local};

use crate::error::{Result, SkinError};

use super::SkinInfo;

/// Default output name format.
pub const DEFAULT_OUTNAME: &str = "skin_{part}_{class_}";

/// Substrings that could escape the output directory.
const BAD_PATH_CHARS: [&str; 8] = ["/", "\\", "..", ":", "*", ">", "<", "|"];

const DATE_FORMAT: &str = "%d%m%Y-%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Class,
    Skin,
    Part,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
}

/// A validated output name format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    segments: Vec<Segment>,
}

impl Default for OutputName {
    /// [`DEFAULT_OUTNAME`], pre-parsed.
    fn default() -> Self {
        Self {
            segments: vec![
                Segment::Text("skin_".to_string()),
                Segment::Field(Field::Part),
                Segment::Text("_".to_string()),
                Segment::Field(Field::Class),
            ],
        }
    }
}

impl OutputName {
    /// Parse and validate a name format.
    pub fn parse(format: &str) -> Result<Self> {
        if let Some(bad) = BAD_PATH_CHARS.iter().find(|bad| format.contains(**bad)) {
            return Err(invalid(
                format,
                format!("contains '{}'", bad),
                "Output names may not contain / \\ .. : * > < or |",
            ));
        }

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(invalid(format, "unclosed '{'", PLACEHOLDER_HELP))
                            }
                        }
                    }
                    let field = match name.as_str() {
                        "class_" => Field::Class,
                        "skin" => Field::Skin,
                        "part" => Field::Part,
                        "date" => Field::Date,
                        other => {
                            return Err(invalid(
                                format,
                                format!("unknown placeholder '{{{}}}'", other),
                                PLACEHOLDER_HELP,
                            ))
                        }
                    };
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => return Err(invalid(format, "unmatched '}'", PLACEHOLDER_HELP)),
                c => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        if segments.is_empty() {
            return Err(invalid(format, "empty name", PLACEHOLDER_HELP));
        }

        Ok(Self { segments })
    }

    /// Expand the format for one output file, without extension.
    pub fn render(&self, info: &SkinInfo, part: &str, now: &DateTime<Local>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.clone(),
                Segment::Field(Field::Class) => info.class.clone(),
                Segment::Field(Field::Skin) => info.skin.clone(),
                Segment::Field(Field::Part) => part.to_string(),
                Segment::Field(Field::Date) => now.format(DATE_FORMAT).to_string(),
            })
            .collect()
    }

    /// Expand the format into a `.png` file name.
    pub fn file_name(&self, info: &SkinInfo, part: &str, now: &DateTime<Local>) -> String {
        format!("{}.png", self.render(info, part, now))
    }
}

const PLACEHOLDER_HELP: &str = "Available placeholders: {class_}, {skin}, {part}, {date}";

fn invalid(format: &str, reason: impl Into<String>, help: &str) -> SkinError {
    SkinError::Parse {
        message: format!("Invalid output name '{}': {}", format, reason.into()),
        help: Some(help.to_string()),
    }
}
