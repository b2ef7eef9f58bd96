#![allow(dead_code)]

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::error::Error;
use std::io::{Cursor, Read};
use zip::ZipArchive;

pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParagraph {
    pub style: Option<String>,
    pub text: String,
}

pub fn read_part(archive: &[u8], name: &str) -> TestResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;
    let mut file = archive.by_name(name)?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Rows of the first worksheet, cells resolved through the shared string table.
pub fn read_sheet_rows(archive: &[u8]) -> TestResult<Vec<Vec<String>>> {
    let shared = match read_part(archive, "xl/sharedStrings.xml") {
        Ok(xml) => parse_shared_strings(&xml)?,
        Err(_) => Vec::new(),
    };
    let sheet = read_part(archive, "xl/worksheets/sheet1.xml")?;

    let mut reader = Reader::from_str(&sheet);
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut cell: Option<(usize, usize, bool)> = None;
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"row" =>
            {
                if let Some(row) = attribute(&element, b"r")? {
                    let row: usize = row.parse()?;
                    ensure_len(&mut rows, row);
                }
            }
            Event::Start(element) if element.local_name().as_ref() == b"c" => {
                let reference = attribute(&element, b"r")?.unwrap_or_default();
                let (row, column) = parse_reference(&reference)?;
                let shared_string = attribute(&element, b"t")?.as_deref() == Some("s");
                cell = Some((row, column, shared_string));
                value.clear();
            }
            Event::Text(text) if cell.is_some() => value.push_str(&text.unescape()?),
            Event::End(element) if element.local_name().as_ref() == b"c" => {
                if let Some((row, column, shared_string)) = cell.take() {
                    let resolved = if shared_string {
                        let index: usize = value.trim().parse()?;
                        shared.get(index).cloned().unwrap_or_default()
                    } else {
                        value.clone()
                    };
                    ensure_len(&mut rows, row + 1);
                    let cells = &mut rows[row];
                    if cells.len() <= column {
                        cells.resize(column + 1, String::new());
                    }
                    cells[column] = resolved;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    for row in &mut rows {
        if row.len() < 2 {
            row.resize(2, String::new());
        }
    }
    Ok(rows)
}

/// Body paragraphs of a DOCX with their paragraph style ids.
pub fn read_doc_paragraphs(archive: &[u8]) -> TestResult<Vec<DocParagraph>> {
    let xml = read_part(archive, "word/document.xml")?;
    let mut reader = Reader::from_str(&xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<DocParagraph> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.local_name().as_ref() == b"p" => {
                current = Some(DocParagraph {
                    style: None,
                    text: String::new(),
                });
            }
            Event::Empty(element) if element.local_name().as_ref() == b"p" => {
                paragraphs.push(DocParagraph {
                    style: None,
                    text: String::new(),
                });
            }
            Event::Start(element) | Event::Empty(element)
                if element.local_name().as_ref() == b"pStyle" =>
            {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.style = attribute(&element, b"w:val")?;
                }
            }
            Event::Start(element) if element.local_name().as_ref() == b"t" => in_text = true,
            Event::End(element) if element.local_name().as_ref() == b"t" => in_text = false,
            Event::Text(text) if in_text => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.text.push_str(&text.unescape()?);
                }
            }
            Event::End(element) if element.local_name().as_ref() == b"p" => {
                if let Some(paragraph) = current.take() {
                    paragraphs.push(paragraph);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parse_shared_strings(xml: &str) -> TestResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.local_name().as_ref() == b"si" => {
                current = Some(String::new());
            }
            Event::Empty(element) if element.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Event::Start(element) if element.local_name().as_ref() == b"t" => in_text = true,
            Event::End(element) if element.local_name().as_ref() == b"t" => in_text = false,
            Event::Text(text) if in_text => {
                if let Some(value) = current.as_mut() {
                    value.push_str(&text.unescape()?);
                }
            }
            Event::End(element) if element.local_name().as_ref() == b"si" => {
                if let Some(value) = current.take() {
                    strings.push(value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> TestResult<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

// "B12" -> (11, 1)
fn parse_reference(reference: &str) -> TestResult<(usize, usize)> {
    let split = reference
        .find(|ch: char| ch.is_ascii_digit())
        .ok_or_else(|| format!("cell reference without row: {reference}"))?;
    let (letters, digits) = reference.split_at(split);

    let column = letters
        .bytes()
        .fold(0usize, |acc, byte| acc * 26 + usize::from(byte - b'A' + 1));
    let row: usize = digits.parse()?;
    Ok((row - 1, column - 1))
}

fn ensure_len(rows: &mut Vec<Vec<String>>, len: usize) {
    if rows.len() < len {
        rows.resize(len, Vec::new());
    }
}
