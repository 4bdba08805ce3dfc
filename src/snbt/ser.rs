//! Text encoding: [`TagValue`] → canonical text.

use std::fmt::Write;

use super::lexer::is_number_literal;
use crate::{CompoundTag, ListTag, SnbtOptions, TagValue};

/// Serializes `value` to its canonical text form.
///
/// Parsing the output yields an equal tree, except that a Float or Double NaN
/// never compares equal to itself.
#[must_use]
pub fn to_string(value: &TagValue, options: &SnbtOptions) -> String {
    let mut serializer = Serializer {
        output: String::new(),
        options,
        level: 0,
    };
    serializer.write_value(value);
    serializer.output
}

struct Serializer<'a> {
    output: String,
    options: &'a SnbtOptions,
    level: usize,
}

impl Serializer<'_> {
    fn write_value(&mut self, value: &TagValue) {
        match value {
            TagValue::Byte(v) => self.write_display(v, "b"),
            TagValue::Short(v) => self.write_display(v, "s"),
            TagValue::Int(v) => self.write_display(v, ""),
            TagValue::Long(v) => self.write_display(v, "l"),
            TagValue::Float(v) => {
                let text = format_float(f64::from(*v), v.is_nan(), || v.to_string());
                self.output.push_str(&text);
                self.output.push('f');
            }
            TagValue::Double(v) => {
                let text = format_float(*v, v.is_nan(), || v.to_string());
                self.output.push_str(&text);
            }
            TagValue::String(s) => write_string(&mut self.output, s),
            TagValue::ByteArray(values) => self.write_array('B', values, "b"),
            TagValue::IntArray(values) => self.write_array('I', values, ""),
            TagValue::LongArray(values) => self.write_array('L', values, "l"),
            TagValue::List(list) => self.write_list(list),
            TagValue::Compound(compound) => self.write_compound(compound),
        }
    }

    fn write_display<T: std::fmt::Display>(&mut self, v: T, suffix: &str) {
        let _ = write!(self.output, "{}{}", v, suffix);
    }

    fn write_array<T: std::fmt::Display>(&mut self, prefix: char, values: &[T], suffix: &str) {
        self.output.push('[');
        self.output.push(prefix);
        self.output.push(';');
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_display(v, suffix);
        }
        self.output.push(']');
    }

    fn write_list(&mut self, list: &ListTag) {
        if list.is_empty() {
            self.output.push_str("[]");
            return;
        }

        if self.options.pretty && list.element_kind().is_container() {
            self.output.push('[');
            self.level += 1;
            for (i, value) in list.iter().enumerate() {
                if i > 0 {
                    self.output.push(',');
                }
                self.newline();
                self.write_value(value);
            }
            self.level -= 1;
            self.newline();
            self.output.push(']');
            return;
        }

        self.output.push_str("[ ");
        for (i, value) in list.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_value(value);
        }
        self.output.push_str(" ]");
    }

    fn write_compound(&mut self, compound: &CompoundTag) {
        if compound.is_empty() {
            self.output.push_str("{}");
            return;
        }

        self.output.push('{');
        self.level += 1;
        for (i, tag) in compound.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
                if !self.options.pretty {
                    self.output.push(' ');
                }
            }
            if self.options.pretty {
                self.newline();
            }
            write_string(&mut self.output, tag.name());
            self.output.push_str(": ");
            self.write_value(tag.value());
        }
        self.level -= 1;
        if self.options.pretty {
            self.newline();
        }
        self.output.push('}');
    }

    fn newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.level * self.options.indent {
            self.output.push(' ');
        }
    }
}

/// Formats a float so that it reads back as a float: finite values always
/// carry a `.`, the rest use the special words.
fn format_float(v: f64, nan: bool, display: impl FnOnce() -> String) -> String {
    if nan {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let mut text = display();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Returns `true` if `s` can be written without quotes and still read back
/// as the same string.
fn is_bare_string(s: &str) -> bool {
    !s.is_empty()
        && s != "true"
        && s != "false"
        && !is_number_literal(s)
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_string(output: &mut String, s: &str) {
    if is_bare_string(s) {
        output.push_str(s);
        return;
    }

    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\t' => output.push_str("\\t"),
            '\r' => output.push_str("\\r"),
            '\u{8}' => output.push_str("\\b"),
            '\u{c}' => output.push_str("\\f"),
            c if c.is_ascii_control() || !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(output, "\\u{:04X}", unit);
                }
            }
            c => output.push(c),
        }
    }
    output.push('"');
}
