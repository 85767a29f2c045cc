//! `application/x-www-form-urlencoded` body builder.
//!
//! The sharing API is served by PHP, which reads list parameters written as
//! `name[0]=a&name[1]=b`. `FormBody::push_list` produces exactly that shape.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Everything except RFC 3986 unreserved characters gets escaped.
const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered list of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn push_list<I, S>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (index, value) in values.into_iter().enumerate() {
            self.fields.push((format!("{name}[{index}]"), value.into()));
        }
        self
    }

    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Percent-encode a single form name, form value, or URL path segment.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_encodes_to_empty_string() {
        assert_eq!(FormBody::new().encode(), "");
    }

    #[test]
    fn fields_keep_insertion_order() {
        let mut form = FormBody::new();
        form.push("expireDate", "2017-01-01").push("permissions", "1");
        assert_eq!(form.encode(), "expireDate=2017-01-01&permissions=1");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let mut form = FormBody::new();
        form.push("personalNote", "a note & more=yes");
        assert_eq!(form.encode(), "personalNote=a%20note%20%26%20more%3Dyes");
    }

    #[test]
    fn list_values_use_indexed_brackets() {
        let mut form = FormBody::new();
        form.push_list("recipients", ["a@example.com", "b@example.com"]);
        assert_eq!(
            form.encode(),
            "recipients%5B0%5D=a%40example.com&recipients%5B1%5D=b%40example.com"
        );
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode_component("ü"), "%C3%BC");
        assert_eq!(encode_component("a/b"), "a%2Fb");
    }
}
