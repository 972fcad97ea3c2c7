//! GEDCOM line reader: turns `LEVEL [@XREF@] TAG [VALUE]` lines into a
//! record tree.

use regex::Regex;

use crate::error::{GedgraphError, Result};

const LINE_PATTERN: &str = r"^\s*(\d+)\s+(?:(@[^@\s]+@)\s+)?([A-Za-z0-9_]+)(?:\s(.*))?$";

/// One GEDCOM record with its nested sub-records
#[derive(Debug, Clone, PartialEq)]
pub struct GedcomRecord {
    pub level: usize,
    pub xref: Option<String>,
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<GedcomRecord>,
    /// 1-based source line
    pub line: usize,
}

impl GedcomRecord {
    /// First direct sub-record with the given tag
    pub fn child(&self, tag: &str) -> Option<&GedcomRecord> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct sub-records with the given tag, in file order
    pub fn children_with<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a GedcomRecord> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Value of the first sub-record with `tag`, if it has one
    pub fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(GedcomRecord::value)
    }

    /// The value when it is a pointer (`@F1@`)
    pub fn pointer(&self) -> Option<&str> {
        self.value()
            .map(str::trim)
            .filter(|v| v.len() > 2 && v.starts_with('@') && v.ends_with('@'))
    }
}

/// Parse GEDCOM text into its level-0 records.
///
/// Malformed lines are skipped with a warning; `CONC`/`CONT` continuation
/// lines are folded into the value of the record they continue.
pub fn parse_records(content: &str) -> Result<Vec<GedcomRecord>> {
    let line_re = Regex::new(LINE_PATTERN).map_err(|e| GedgraphError::Parse {
        line: 0,
        message: format!("invalid line pattern: {}", e),
    })?;

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut roots = Vec::new();
    let mut stack: Vec<GedcomRecord> = Vec::new();
    let mut skipped = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let caps = match line_re.captures(raw.trim_end()) {
            Some(caps) => caps,
            None => {
                log::warn!("Skipping malformed GEDCOM line {}: {:?}", line_no, raw);
                skipped += 1;
                continue;
            }
        };

        let level: usize = match caps[1].parse() {
            Ok(level) => level,
            Err(_) => {
                log::warn!("Skipping GEDCOM line {} with unusable level", line_no);
                skipped += 1;
                continue;
            }
        };
        let tag = caps[3].to_string();
        let value = caps
            .get(4)
            .map(|m| m.as_str().to_string())
            .filter(|v| !v.is_empty());

        // Close every open record at this level or deeper
        while stack.last().is_some_and(|top| top.level >= level) {
            if let Some(done) = stack.pop() {
                attach(&mut stack, &mut roots, done);
            }
        }

        if tag == "CONC" || tag == "CONT" {
            if let Some(parent) = stack.last_mut() {
                let mut joined = parent.value.take().unwrap_or_default();
                if tag == "CONT" {
                    joined.push('\n');
                }
                joined.push_str(value.as_deref().unwrap_or(""));
                parent.value = Some(joined);
                continue;
            }
        }

        stack.push(GedcomRecord {
            level,
            xref: caps.get(2).map(|m| m.as_str().to_string()),
            tag,
            value,
            children: Vec::new(),
            line: line_no,
        });
    }

    while let Some(done) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    if skipped > 0 {
        log::warn!("Skipped {} malformed GEDCOM line(s)", skipped);
    }

    Ok(roots)
}

fn attach(stack: &mut [GedcomRecord], roots: &mut Vec<GedcomRecord>, record: GedcomRecord) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(record),
        None => roots.push(record),
    }
}
