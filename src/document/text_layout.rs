// src/document/text_layout.rs
//! Rebuilds reading-order lines from a page's content stream.
//!
//! Statements draw every table cell as its own positioned string, so the text
//! has to be regrouped by baseline: runs sharing a baseline form one line,
//! ordered left to right, and separately positioned runs are split by a space.

use lopdf::content::Operation;
use lopdf::Object;

// Runs whose baselines differ by less than this share a line (in font sizes).
const LINE_TOLERANCE_RATIO: f64 = 0.4;
const MIN_LINE_TOLERANCE: f64 = 1.0;
// TJ adjustments below this (thousandths of an em) are word gaps, not kerning.
const TJ_SPACE_THRESHOLD: f64 = -250.0;

/// A string shown at one pen position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    fn translate(self, tx: f64, ty: f64) -> Matrix {
        Matrix {
            e: tx * self.a + ty * self.c + self.e,
            f: tx * self.b + ty * self.d + self.f,
            ..self
        }
    }
}

struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    font_size: f64,
    leading: f64,
    // Set by every positioning operator; a show after it starts a new run
    repositioned: bool,
    runs: Vec<TextRun>,
}

impl TextState {
    fn new() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font_size: 0.0,
            leading: 0.0,
            repositioned: true,
            runs: Vec::new(),
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = self.line_matrix.translate(tx, ty);
        self.matrix = self.line_matrix;
        self.repositioned = true;
    }

    fn set_matrix(&mut self, m: Matrix) {
        self.line_matrix = m;
        self.matrix = m;
        self.repositioned = true;
    }

    fn show(&mut self, text: String) {
        match self.runs.last_mut() {
            Some(last) if !self.repositioned => last.text.push_str(&text),
            _ => {
                let scale = self.matrix.d.abs();
                let size = if scale > 0.0 { self.font_size * scale } else { self.font_size };
                self.runs.push(TextRun { x: self.matrix.e, y: self.matrix.f, size, text });
            }
        }
        self.repositioned = false;
    }
}

fn number(obj: Option<&Object>) -> Option<f64> {
    match obj? {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn string(obj: Option<&Object>) -> Option<String> {
    match obj? {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

/// UTF-16BE when the string carries a byte-order mark, single bytes otherwise.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], *pair.get(1).unwrap_or(&0)]))
            .collect();
        return char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Walks text operators and returns every shown run with its pen position.
///
/// Operators with missing or mistyped operands are ignored.
pub fn text_runs(operations: &[Operation]) -> Vec<TextRun> {
    let mut state = TextState::new();

    for op in operations {
        let args = &op.operands;
        match op.operator.as_str() {
            "BT" => state.set_matrix(Matrix::IDENTITY),
            "Tf" => {
                if let Some(size) = number(args.get(1)) {
                    state.font_size = size;
                }
            }
            "TL" => {
                if let Some(leading) = number(args.first()) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (number(args.first()), number(args.get(1))) {
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.move_line(tx, ty);
                }
            }
            "Tm" => {
                let values: Vec<f64> = args.iter().filter_map(|o| number(Some(o))).collect();
                if let [a, b, c, d, e, f] = values[..] {
                    state.set_matrix(Matrix { a, b, c, d, e, f });
                }
            }
            "T*" => state.move_line(0.0, -state.leading),
            "Tj" => {
                if let Some(text) = string(args.first()) {
                    state.show(text);
                }
            }
            "'" => {
                state.move_line(0.0, -state.leading);
                if let Some(text) = string(args.first()) {
                    state.show(text);
                }
            }
            "\"" => {
                state.move_line(0.0, -state.leading);
                if let Some(text) = string(args.get(2)) {
                    state.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = args.first() {
                    let mut text = String::new();
                    for item in items {
                        match item {
                            Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                            other => {
                                if number(Some(other)).is_some_and(|n| n < TJ_SPACE_THRESHOLD) {
                                    text.push(' ');
                                }
                            }
                        }
                    }
                    state.show(text);
                }
            }
            _ => {}
        }
    }

    state.runs
}

/// Groups runs into lines top to bottom, each read left to right.
pub fn assemble_lines(mut runs: Vec<TextRun>) -> String {
    runs.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut lines: Vec<(f64, Vec<TextRun>)> = Vec::new();
    for run in runs {
        let tolerance = (run.size * LINE_TOLERANCE_RATIO).max(MIN_LINE_TOLERANCE);
        match lines.last_mut() {
            Some((baseline, row)) if (*baseline - run.y).abs() <= tolerance => row.push(run),
            _ => lines.push((run.y, vec![run])),
        }
    }

    lines
        .into_iter()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            row.iter()
                .map(|run| run.text.trim())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
