//! Reference page extraction
//!
//! Locates an ingredient's entry link on the index page and reads labelled
//! values from the detail page tables. Detail pages mark header cells with
//! `rowhead` / `rowhead_split` and value cells with `data3`; some rows put a
//! nested `row_header` cell between the label and its value.

use crate::types::{ReferenceField, ReferenceValues};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

lazy_static! {
    static ref MARKER_RE: Regex = Regex::new(r"[<>]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref ANCHOR_SELECTOR: Selector = Selector::parse("a[href]").unwrap();
}

const VALUE_CLASS: &str = "data3";
const NESTED_HEADER_CLASS: &str = "row_header";

/// Trim and drop `<` / `>` inequality markers ("<0.1" -> "0.1")
pub fn clean_value(value: &str) -> String {
    MARKER_RE.replace_all(value.trim(), "").trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

fn element_text(el: &ElementRef) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// First anchor whose text contains `name` (case-insensitive), resolved against `base`.
pub fn find_entry_link_in(html: &str, base: &Url, name: &str) -> Option<Url> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let doc = Html::parse_document(html);
    doc.select(&ANCHOR_SELECTOR)
        .filter(|a| element_text(a).to_lowercase().contains(&needle))
        .find_map(|a| a.value().attr("href").and_then(|href| base.join(href).ok()))
}

/// Class carried by the `th` cell holding a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    RowHead,
    RowHeadSplit,
}

impl HeaderClass {
    pub fn class_name(&self) -> &'static str {
        match self {
            HeaderClass::RowHead => "rowhead",
            HeaderClass::RowHeadSplit => "rowhead_split",
        }
    }
}

/// How the value cell is reached from the label cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The next `td.data3` after the header
    DirectNext,
    /// The next `td.row_header` after the header, then the next `td.data3` after that
    NestedRowHeader,
}

/// Which header to use when a label appears more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
}

#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub field: ReferenceField,
    pub header: HeaderClass,
    pub strategy: Strategy,
    pub occurrence: Occurrence,
}

/// Where each field lives on a detail page
pub const LABELS: [LabelRule; 5] = [
    LabelRule {
        field: ReferenceField::Solubility,
        header: HeaderClass::RowHead,
        strategy: Strategy::DirectNext,
        occurrence: Occurrence::First,
    },
    LabelRule {
        field: ReferenceField::HalfLife,
        header: HeaderClass::RowHeadSplit,
        strategy: Strategy::DirectNext,
        // Pages list aqueous and soil DT50; the soil value comes last
        occurrence: Occurrence::Last,
    },
    LabelRule {
        field: ReferenceField::Koc,
        header: HeaderClass::RowHeadSplit,
        strategy: Strategy::DirectNext,
        occurrence: Occurrence::First,
    },
    LabelRule {
        field: ReferenceField::MammalLd50,
        header: HeaderClass::RowHead,
        strategy: Strategy::DirectNext,
        occurrence: Occurrence::First,
    },
    LabelRule {
        field: ReferenceField::BeeLd50,
        header: HeaderClass::RowHeadSplit,
        strategy: Strategy::NestedRowHeader,
        occurrence: Occurrence::First,
    },
];

/// All elements of a document in document order
struct DocumentCursor<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> DocumentCursor<'a> {
    fn new(doc: &'a Html) -> Self {
        let elements = doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();
        Self { elements }
    }

    fn is_cell(el: &ElementRef, tag: &str, class: &str) -> bool {
        el.value().name() == tag && el.value().classes().any(|c| c == class)
    }

    fn find_header(&self, rule: &LabelRule) -> Option<usize> {
        let label = rule.field.label();
        let matches = |el: &ElementRef| {
            Self::is_cell(el, "th", rule.header.class_name()) && element_text(el).contains(label)
        };
        match rule.occurrence {
            Occurrence::First => self.elements.iter().position(matches),
            Occurrence::Last => self.elements.iter().rposition(matches),
        }
    }

    fn next_after(&self, from: usize, tag: &str, class: &str) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, el)| Self::is_cell(el, tag, class))
            .map(|(i, _)| i)
    }

    fn value_for(&self, rule: &LabelRule) -> Option<String> {
        let header = self.find_header(rule)?;
        let value = match rule.strategy {
            Strategy::DirectNext => self.next_after(header, "td", VALUE_CLASS)?,
            Strategy::NestedRowHeader => {
                let nested = self.next_after(header, "td", NESTED_HEADER_CLASS)?;
                self.next_after(nested, "td", VALUE_CLASS)?
            }
        };
        Some(clean_value(&self.elements[value].text().collect::<String>()))
    }
}

/// Read every labelled field from a detail page. Labels that are absent yield `None`.
pub fn extract_reference_values(html: &str) -> ReferenceValues {
    let doc = Html::parse_document(html);
    let cursor = DocumentCursor::new(&doc);

    let mut values = ReferenceValues::default();
    for rule in &LABELS {
        values.set(rule.field, cursor.value_for(rule));
    }
    values
}
