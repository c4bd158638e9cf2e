//! Page layout for exported plans, kept free of any PDF machinery so the
//! pagination rules are testable on their own. Coordinates are measured
//! in millimeters from the top edge; the painter flips them into PDF
//! space.

use crate::model::StudyTopic;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_MM: f64 = 15.0;

/// A topic never starts below this much space from the bottom edge.
pub const BREAK_THRESHOLD_MM: f64 = 30.0;

pub const TITLE_PT: f64 = 18.0;
pub const HEADING_PT: f64 = 14.0;
pub const BODY_PT: f64 = 11.0;

pub const TITLE_ADVANCE_MM: f64 = 10.0;
pub const HEADING_ADVANCE_MM: f64 = 8.0;
pub const LINE_ADVANCE_MM: f64 = 6.0;
pub const SECTION_GAP_MM: f64 = 10.0;

/// Body characters per wrapped line in the usable width.
pub const WRAP_COLUMNS: usize = 88;

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub size: f64,
    /// Millimeters below the top edge.
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<Line>,
}

/// Greedy word wrap. Words longer than the limit get a line of their
/// own rather than being split.
pub fn wrap_text(text: &str, max_columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut columns = 0usize;

    for word in text.split_whitespace() {
        let word_columns = word.chars().count();
        if columns > 0 && columns + 1 + word_columns > max_columns {
            lines.push(std::mem::take(&mut line));
            columns = 0;
        }
        if columns > 0 {
            line.push(' ');
            columns += 1;
        }
        line.push_str(word);
        columns += word_columns;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Lays the title and the numbered topic sections out onto as many pages
/// as they need.
pub fn paginate(title: &str, topics: &[StudyTopic]) -> Vec<PageLayout> {
    let mut pages: Vec<PageLayout> = Vec::new();
    let mut current = PageLayout::default();
    let mut y = MARGIN_MM;

    current.lines.push(Line {
        text: title.to_string(),
        size: TITLE_PT,
        y,
    });
    y += TITLE_ADVANCE_MM;

    for (index, topic) in topics.iter().enumerate() {
        if y > PAGE_HEIGHT_MM - BREAK_THRESHOLD_MM {
            pages.push(std::mem::take(&mut current));
            y = MARGIN_MM;
        }

        current.lines.push(Line {
            text: format!("{}. {}", index + 1, topic.name),
            size: HEADING_PT,
            y,
        });
        y += HEADING_ADVANCE_MM;

        for text in wrap_text(&topic.desc, WRAP_COLUMNS) {
            if y > PAGE_HEIGHT_MM - MARGIN_MM {
                pages.push(std::mem::take(&mut current));
                y = MARGIN_MM;
            }
            current.lines.push(Line {
                text,
                size: BODY_PT,
                y,
            });
            y += LINE_ADVANCE_MM;
        }
        y += SECTION_GAP_MM;
    }

    pages.push(current);
    pages
}
