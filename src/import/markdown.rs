//! Single-pass scanner for definition documents
//!
//! A definition document is Markdown-like text: a title heading, labelled
//! `- **Label:** value` lines, sections introduced by headings, and inside
//! those sections pipe tables, bullet lists, paragraphs or fenced code
//! blocks. [`MarkdownDocument::parse`] walks the text once and splits it
//! into those pieces; the `Section` helpers then decode one section body
//! each, so no field lookup re-scans the whole document.

use crate::models::placeholder::{PLACEHOLDER, strip_placeholder};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}(#{1,6})\s+(.*?)\s*#*\s*$").expect("Invalid regex"));
static RE_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*+]\s+\*\*([^*]+?)\s*[:：]?\s*\*\*\s*[:：]?\s*(.*)$").expect("Invalid regex")
});
static RE_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+(.*)$").expect("Invalid regex"));
static RE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("Invalid regex"));
static RE_BRACKET_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("Invalid regex"));
static RE_SECTION_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)*[.、)]?|[一二三四五六七八九十]+[、.])\s*").expect("Invalid regex")
});
static RE_TABLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:?-{1,}:?$").expect("Invalid regex"));

/// A heading and the lines beneath it, up to the next heading of the same
/// or a higher level. Subsection headings stay in the body as plain lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Heading level (number of `#`)
    pub level: usize,
    /// Heading text with any leading section number removed
    pub title: &'a str,
    /// Body lines, verbatim
    pub lines: Vec<&'a str>,
}

/// A document split into title, labelled values and sections
#[derive(Debug, Clone, Default)]
pub struct MarkdownDocument<'a> {
    title: Option<&'a str>,
    labels: Vec<(&'a str, &'a str)>,
    sections: Vec<Section<'a>>,
}

impl<'a> MarkdownDocument<'a> {
    /// Scan `text` once. Headings and labels inside fenced code blocks are
    /// treated as plain body lines. A line belongs to its own section and to
    /// every enclosing section of a lower level.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dw_definition_sdk::import::markdown::MarkdownDocument;
    ///
    /// let doc = MarkdownDocument::parse("# Table definition: dw.t\n\n- **Owner:** 张三\n");
    /// assert_eq!(doc.title(), Some("Table definition: dw.t"));
    /// assert_eq!(doc.label(&["Owner"]), Some("张三".to_string()));
    /// ```
    pub fn parse(text: &'a str) -> Self {
        let mut doc = MarkdownDocument::default();
        // Indices of sections whose body is still open
        let mut open: Vec<usize> = Vec::new();
        let mut in_fence = false;

        for line in text.lines() {
            if is_fence(line) {
                in_fence = !in_fence;
                doc.push_body_line(&open, line);
                continue;
            }

            if !in_fence {
                if let Some(caps) = RE_HEADING.captures(line) {
                    let level = caps.get(1).map_or(1, |m| m.as_str().len());
                    let raw_title = caps.get(2).map_or("", |m| m.as_str());
                    if doc.title.is_none() {
                        doc.title = Some(raw_title);
                    }
                    open.retain(|&idx| doc.sections[idx].level < level);
                    doc.push_body_line(&open, line);
                    doc.sections.push(Section {
                        level,
                        title: strip_section_number(raw_title),
                        lines: Vec::new(),
                    });
                    open.push(doc.sections.len() - 1);
                    continue;
                }

                if let Some(caps) = RE_LABEL.captures(line) {
                    let label = caps.get(1).map_or("", |m| m.as_str().trim());
                    let value = caps.get(2).map_or("", |m| m.as_str().trim());
                    doc.labels.push((label, value));
                }
            }

            doc.push_body_line(&open, line);
        }

        doc
    }

    fn push_body_line(&mut self, open: &[usize], line: &'a str) {
        for &idx in open {
            self.sections[idx].lines.push(line);
        }
    }

    /// Text of the first heading in the document
    pub fn title(&self) -> Option<&'a str> {
        self.title
    }

    /// Value of the first `- **Label:** value` line whose label is one of
    /// `names`, with placeholder tokens stripped. An empty string after
    /// stripping is reported as `None`.
    pub fn label(&self, names: &[&str]) -> Option<String> {
        self.labels
            .iter()
            .find(|(label, _)| names.contains(label))
            .map(|(_, value)| clean_inline(value))
            .filter(|value| !value.is_empty())
    }

    /// First section whose title starts with one of `names`
    pub fn section(&self, names: &[&str]) -> Option<&Section<'a>> {
        self.sections
            .iter()
            .find(|s| names.iter().any(|name| s.title.starts_with(name)))
    }

    /// Try each group of names in order and return the first section found.
    /// Used for primary/fallback subsection headings.
    pub fn section_with_fallback(&self, candidates: &[&[&str]]) -> Option<&Section<'a>> {
        candidates.iter().find_map(|names| self.section(names))
    }

    pub fn sections(&self) -> &[Section<'a>] {
        &self.sections
    }
}

impl<'a> Section<'a> {
    /// Rows of the first pipe table in the section or its subsections,
    /// header and separator rows removed. Each row is returned as trimmed
    /// cells with `\|` unescaped.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        let table_lines: Vec<&str> = self
            .lines
            .iter()
            .skip_while(|line| !line.trim_start().starts_with('|'))
            .take_while(|line| line.trim_start().starts_with('|'))
            .copied()
            .collect();

        table_lines
            .iter()
            .skip(1)
            .map(|line| split_table_row(line))
            .filter(|cells| !is_separator_row(cells))
            .collect()
    }

    /// Items of the first contiguous bullet list in the section. The list
    /// ends at a blank line or any non-bullet line, and subsections are not
    /// searched.
    pub fn list_items(&self) -> Vec<&'a str> {
        self.direct_lines()
            .iter()
            .copied()
            .skip_while(|line| !RE_BULLET.is_match(line))
            .map_while(|line| RE_BULLET.captures(line))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
            .collect()
    }

    /// Trimmed contents of the first fenced code block in the section.
    /// An unterminated fence runs to the end of the section.
    pub fn code_block(&self) -> Option<String> {
        let mut lines = self.lines.iter().skip_while(|line| !is_fence(line));
        lines.next()?;
        let body: Vec<&str> = lines
            .take_while(|line| !is_fence(line))
            .copied()
            .collect();
        let content = body.join("\n").trim().to_string();
        if content.is_empty() { None } else { Some(content) }
    }

    /// Non-empty plain lines of the section joined with newlines, skipping
    /// labelled values, tables, list items, code and subsections.
    pub fn paragraph(&self) -> Option<String> {
        let mut in_fence = false;
        let mut parts = Vec::new();
        for line in self.direct_lines() {
            if is_fence(line) {
                in_fence = !in_fence;
                continue;
            }
            let trimmed = line.trim();
            if in_fence
                || trimmed.is_empty()
                || trimmed.starts_with('|')
                || trimmed.starts_with('>')
                || RE_BULLET.is_match(line)
            {
                continue;
            }
            parts.push(clean_inline(trimmed));
        }
        let text = parts.join("\n").trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Body lines before the first subsection heading
    fn direct_lines(&self) -> &[&'a str] {
        let mut in_fence = false;
        let end = self
            .lines
            .iter()
            .position(|line| {
                if is_fence(line) {
                    in_fence = !in_fence;
                    return false;
                }
                !in_fence && RE_HEADING.is_match(line)
            })
            .unwrap_or(self.lines.len());
        &self.lines[..end]
    }
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn strip_section_number(title: &str) -> &str {
    match RE_SECTION_NUMBER.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

/// Split a pipe-table row on unescaped `|`
fn split_table_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = match inner.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => inner,
    };

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                cell.push('|');
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| RE_TABLE_SEPARATOR.is_match(cell.replace(' ', "").as_str()))
}

/// Strip placeholder tokens, emphasis and code markers from an inline value
pub fn clean_inline(value: &str) -> String {
    let without_links = RE_LINK.replace_all(value, "$1");
    let stripped = without_links.replace("**", "").replace('`', "");
    strip_placeholder(&stripped)
}

/// Clean one list item. `prefer_bracket_label` selects a `[label]` over the
/// surrounding text when present (used for related-metric links).
pub fn clean_list_item(item: &str, prefer_bracket_label: bool) -> String {
    if prefer_bracket_label
        && !item.contains(PLACEHOLDER)
        && let Some(caps) = RE_BRACKET_LABEL.captures(item)
    {
        let label = caps.get(1).map_or("", |m| m.as_str());
        return clean_inline(label);
    }
    clean_inline(item)
}
