//! Field extraction rules for directory listing markup.
//!
//! Each rule is a small pure function so a single rule can be changed when a site
//! changes its markup. Missing fields become empty strings; a container is never dropped.

use crate::domain::model::Record;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static CONTAINER_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"listing|card|result").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+?\d[\d\s-]{8,}\d").unwrap());

static DIV_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div[class]").unwrap());
static HEADING_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1, h2, h3").unwrap());
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static PARAGRAPH_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p[class]").unwrap());

/// Parses one listing page and returns a record per matched container, in document order.
pub fn extract(html: &str) -> Vec<Record> {
    let document = Html::parse_document(html);

    document
        .select(&DIV_SEL)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(container_class_matches)
        })
        .map(extract_record)
        .collect()
}

pub fn extract_record(container: ElementRef<'_>) -> Record {
    let text = flatten_text(container);

    Record {
        name: extract_name(container),
        email: extract_email(&text),
        phone: extract_phone(&text),
        address: extract_address(container),
        website: extract_website(container),
        description: extract_description(container),
        ..Record::default()
    }
}

pub fn container_class_matches(class: &str) -> bool {
    CONTAINER_CLASS_RE.is_match(class)
}

/// First h1-h3, else the first link whose class mentions "name".
pub fn extract_name(container: ElementRef<'_>) -> String {
    if let Some(heading) = container.select(&HEADING_SEL).next() {
        return element_text(heading);
    }

    container
        .select(&LINK_SEL)
        .find(|a| class_contains(*a, "name"))
        .map(element_text)
        .unwrap_or_default()
}

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_address(container: ElementRef<'_>) -> String {
    first_paragraph_with_class(container, "addr")
}

pub fn extract_description(container: ElementRef<'_>) -> String {
    first_paragraph_with_class(container, "desc")
}

pub fn extract_website(container: ElementRef<'_>) -> String {
    container
        .select(&LINK_SEL)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| href.contains("http"))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Text nodes trimmed, empties dropped, joined with single spaces.
pub fn flatten_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

fn class_contains(el: ElementRef<'_>, needle: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|class| class.contains(needle))
}

fn first_paragraph_with_class(container: ElementRef<'_>, needle: &str) -> String {
    container
        .select(&PARAGRAPH_SEL)
        .find(|p| class_contains(*p, needle))
        .map(element_text)
        .unwrap_or_default()
}
