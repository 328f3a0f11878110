//! Loading of `key.properties` files
//!
//! The file uses the Java properties format: `#` or `!` comment lines,
//! `=`, `:` or whitespace between key and value, backslash line
//! continuations and `\uXXXX` escapes.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, SigningError};

/// Key-value pairs read from a signing properties file.
///
/// The mapping is read-only once loaded. A file that does not exist loads
/// as an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningProperties {
    entries: BTreeMap<String, String>,
    source: Option<PathBuf>,
}

impl SigningProperties {
    /// Load properties from a file, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = {
            let mut file = match File::open(path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %path.display(), "signing properties file not found");
                    return Ok(Self {
                        entries: BTreeMap::new(),
                        source: Some(path.to_path_buf()),
                    });
                }
                Err(source) => {
                    return Err(SigningError::Read {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            };

            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|source| SigningError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
            bytes
        };

        let mut properties = Self::parse(&decode(bytes))?;
        properties.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            keys = properties.len(),
            "loaded signing properties"
        );
        Ok(properties)
    }

    /// Parse properties from text
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (line, logical) in logical_lines(input) {
            let (raw_key, raw_value) = split_entry(&logical);
            let key = unescape(raw_key, line)?;
            let value = unescape(raw_value, line)?;
            entries.insert(key, value);
        }

        Ok(Self {
            entries,
            source: None,
        })
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File the properties were read from, or looked for when absent
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SigningProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }
}

/// UTF-8 when valid, otherwise ISO-8859-1 like `Properties.load(InputStream)`
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().into_iter().map(char::from).collect())
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

/// Join continuation lines, dropping comments and blank lines.
/// Each logical line is tagged with its first physical line number.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut logical_lines = Vec::new();
    let mut lines = physical_lines(input).into_iter().enumerate();

    while let Some((index, raw)) = lines.next() {
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::new();
        let mut current = trimmed;
        loop {
            if !ends_with_continuation(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(is_blank),
                None => break,
            }
        }

        logical_lines.push((index + 1, logical));
    }

    logical_lines
}

/// Split on `\n`, `\r\n` or a lone `\r`
fn physical_lines(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&input[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&input[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < input.len() {
        lines.push(&input[start..]);
    }
    lines
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..i], line[i + 1..].trim_start_matches(is_blank)),
            c if is_blank(c) => {
                let rest = line[i..].trim_start_matches(is_blank);
                let rest = rest
                    .strip_prefix(|c: char| c == '=' || c == ':')
                    .map(|r| r.trim_start_matches(is_blank))
                    .unwrap_or(rest);
                return (&line[..i], rest);
            }
            _ => {}
        }
    }

    (line, "")
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_hex4(&mut chars, line)?;
                let code = if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate, must be followed by \uDC00-\uDFFF
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(SigningError::MalformedEscape { line });
                    }
                    let low = read_hex4(&mut chars, line)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(SigningError::MalformedEscape { line });
                    }
                    0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    unit
                };
                out.push(char::from_u32(code).ok_or(SigningError::MalformedEscape { line })?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_hex4(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SigningError::MalformedEscape { line });
    }
    u32::from_str_radix(&hex, 16).map_err(|_| SigningError::MalformedEscape { line })
}
