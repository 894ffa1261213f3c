use std::fmt::Write;

use bytes::Bytes;
use thriftwire::{FieldValue, MapItem, TType, Value, ValueVisitor};

/// Formats a Value as human-readable ASCII text.
pub fn to_ascii(value: &Value) -> String {
    let mut output = String::new();
    value.apply(&mut AsciiFormatter {
        output: &mut output,
        indent: 0,
    });
    output
}

struct AsciiFormatter<'a> {
    output: &'a mut String,
    indent: usize,
}

impl AsciiFormatter<'_> {
    /// Writes `{`, one line per entry, then `}` at the current indentation.
    fn block<T>(&mut self, entries: &[T], mut entry: impl FnMut(&mut Self, &T)) {
        self.output.push('{');
        if entries.is_empty() {
            self.output.push('}');
            return;
        }
        self.output.push('\n');
        self.indent += 1;
        for e in entries {
            self.pad();
            entry(self, e);
            self.output.push_str(",\n");
        }
        self.indent -= 1;
        self.pad();
        self.output.push('}');
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    fn sequence(&mut self, kind: &str, value_ttype: TType, values: &[Value]) {
        write!(self.output, "{kind}<{value_ttype}> ").unwrap();
        self.block(values, |f, v| v.apply(f));
    }
}

impl ValueVisitor for AsciiFormatter<'_> {
    type Output = ();

    fn visit_bool(&mut self, value: bool) {
        self.output.push_str(if value { "true" } else { "false" });
    }

    fn visit_byte(&mut self, value: i8) {
        write!(self.output, "{value}i8").unwrap();
    }

    fn visit_double(&mut self, value: f64) {
        write!(self.output, "{value}f64").unwrap();
    }

    fn visit_i16(&mut self, value: i16) {
        write!(self.output, "{value}i16").unwrap();
    }

    fn visit_i32(&mut self, value: i32) {
        write!(self.output, "{value}i32").unwrap();
    }

    fn visit_i64(&mut self, value: i64) {
        write!(self.output, "{value}i64").unwrap();
    }

    fn visit_binary(&mut self, value: &Bytes) {
        match std::str::from_utf8(value) {
            Ok(s) => format_string_literal(self.output, s),
            Err(_) => {
                self.output.push_str("0x");
                for b in value.iter() {
                    write!(self.output, "{b:02x}").unwrap();
                }
            }
        }
    }

    fn visit_struct(&mut self, fields: &[FieldValue]) {
        self.output.push_str("struct ");
        self.block(fields, |f, field| {
            write!(f.output, "{}: ", field.id).unwrap();
            field.value.apply(f);
        });
    }

    fn visit_map(&mut self, key_ttype: TType, value_ttype: TType, items: &[MapItem]) {
        write!(self.output, "map<{key_ttype}, {value_ttype}> ").unwrap();
        self.block(items, |f, item| {
            item.key.apply(f);
            f.output.push_str(": ");
            item.value.apply(f);
        });
    }

    fn visit_set(&mut self, value_ttype: TType, values: &[Value]) {
        self.sequence("set", value_ttype, values);
    }

    fn visit_list(&mut self, value_ttype: TType, values: &[Value]) {
        self.sequence("list", value_ttype, values);
    }
}

/// Formats a string as a quoted literal with escapes.
fn format_string_literal(output: &mut String, s: &str) {
    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_ascii_control() => write!(output, "\\x{:02x}", c as u32).unwrap(),
            c => output.push(c),
        }
    }
    output.push('"');
}
