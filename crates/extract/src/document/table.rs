//! Table inference from laid-out page text.
//!
//! Text extraction flattens tables into lines. A line becomes a row when its
//! columns are separated by tabs or runs of two or more spaces, when it carries
//! a course-code token (split around the code and its trailing numbers), or
//! when it reads like a course table header. Consecutive rows form one table;
//! blank lines do not break a table, any other line does.

use std::sync::LazyLock;

use regex::Regex;

use super::Table;
use crate::normalize::squash;

static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t+|\s{2,}").expect("column gap regex"));

/// Institution course-code template, e.g. `UE24CS3001`.
static CODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}\d{2}[A-Z]{2}\d{4}$").expect("code token regex"));

/// Tables need a header plus at least one body row.
const MIN_TABLE_ROWS: usize = 2;

pub fn detect_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Table = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match split_row(line) {
            Some(cells) => current.push(cells),
            None => flush(&mut current, &mut tables),
        }
    }
    flush(&mut current, &mut tables);

    tables
}

fn flush(current: &mut Table, tables: &mut Vec<Table>) {
    if current.len() >= MIN_TABLE_ROWS {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

fn split_row(line: &str) -> Option<Vec<String>> {
    let cells: Vec<String> = COLUMN_GAP
        .split(line)
        .map(|c| c.trim().to_string())
        .collect();
    if cells.len() >= 2 {
        return Some(cells);
    }
    if let Some(cells) = split_around_code(line) {
        return Some(cells);
    }
    if is_header_line(line) {
        return Some(vec![line.to_string()]);
    }
    None
}

fn is_header_line(line: &str) -> bool {
    let squashed = squash(line);
    squashed.contains("coursecode") && squashed.contains("coursetitle")
}

/// Split a single-spaced row such as `1 UE24CS3001 Data Structures 3 0 1 4`
/// into `[1, UE24CS3001, Data Structures, 3, 0, 1, 4]`.
fn split_around_code(line: &str) -> Option<Vec<String>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let code_idx = tokens.iter().position(|t| CODE_TOKEN.is_match(t))?;

    let mut cells: Vec<String> = tokens[..=code_idx].iter().map(|t| t.to_string()).collect();

    let rest = &tokens[code_idx + 1..];
    let numeric_tail = rest
        .iter()
        .rev()
        .take_while(|t| t.bytes().all(|b| b.is_ascii_digit()))
        .count();
    let (title, numbers) = rest.split_at(rest.len() - numeric_tail);

    if !title.is_empty() {
        cells.push(title.join(" "));
    }
    cells.extend(numbers.iter().map(|t| t.to_string()));
    Some(cells)
}
