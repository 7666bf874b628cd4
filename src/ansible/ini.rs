// ABOUTME: Line-oriented INI parser matching the dialect Ansible's ansible.cfg files are written in
// ABOUTME: Handles sections, DEFAULT fallbacks, continuation lines, inline comments and %(name)s interpolation

use std::collections::HashMap;
use thiserror::Error;

const DEFAULT_SECTION: &str = "DEFAULT";
const MAX_INTERPOLATION_DEPTH: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IniError {
    #[error("line {line}: option defined before any [section] header")]
    MissingSectionHeader { line: usize },

    #[error("line {line}: cannot parse '{text}'")]
    InvalidLine { line: usize, text: String },

    #[error("'{key}' in [{section}] references missing option '{reference}'")]
    MissingReference {
        section: String,
        key: String,
        reference: String,
    },

    #[error("'{key}' in [{section}] has a malformed '%' expression: {value}")]
    BadInterpolation {
        section: String,
        key: String,
        value: String,
    },

    #[error("'{key}' in [{section}] nests interpolation too deeply (recursive reference?)")]
    InterpolationDepth { section: String, key: String },
}

type Options = HashMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    defaults: Options,
    sections: HashMap<String, Options>,
}

impl IniFile {
    pub fn parse(content: &str) -> Result<Self, IniError> {
        let mut ini = IniFile::default();
        // (section name, None for DEFAULT) and the option the next continuation line extends
        let mut current: Option<Option<String>> = None;
        let mut last_option: Option<String> = None;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;

            if raw.trim().is_empty() || raw.starts_with('#') || raw.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(char::is_whitespace);
            if indented {
                if let (Some(section), Some(option)) = (&current, &last_option) {
                    let value = raw.trim();
                    if !value.is_empty() {
                        let options = ini.options_mut(section.as_deref());
                        if let Some(existing) = options.get_mut(option) {
                            existing.push('\n');
                            existing.push_str(value);
                        }
                    }
                    continue;
                }
            }

            if let Some(header) = parse_section_header(raw) {
                let section = if header == DEFAULT_SECTION {
                    None
                } else {
                    ini.sections.entry(header.to_string()).or_default();
                    Some(header.to_string())
                };
                current = Some(section);
                last_option = None;
                continue;
            }

            let Some(section) = &current else {
                return Err(IniError::MissingSectionHeader { line: line_no });
            };

            let Some((key, value)) = parse_option(raw) else {
                return Err(IniError::InvalidLine {
                    line: line_no,
                    text: raw.to_string(),
                });
            };

            ini.options_mut(section.as_deref()).insert(key.clone(), value);
            last_option = Some(key);
        }

        Ok(ini)
    }

    fn options_mut(&mut self, section: Option<&str>) -> &mut Options {
        match section {
            Some(name) => self.sections.entry(name.to_string()).or_default(),
            None => &mut self.defaults,
        }
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Raw option lookup: the section first, then `[DEFAULT]`.
    fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(key))
            .or_else(|| self.defaults.get(key))
            .map(String::as_str)
    }

    /// Interpolated value of `key` in `section`. `Ok(None)` when either the
    /// section or the option does not exist.
    pub fn get(&self, section: &str, key: &str) -> Result<Option<String>, IniError> {
        if !self.has_section(section) {
            return Ok(None);
        }

        let key = key.to_lowercase();
        match self.lookup(section, &key) {
            Some(raw) => self.interpolate(section, &key, raw, 1).map(Some),
            None => Ok(None),
        }
    }

    fn interpolate(
        &self,
        section: &str,
        key: &str,
        raw: &str,
        depth: usize,
    ) -> Result<String, IniError> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(IniError::InterpolationDepth {
                section: section.to_string(),
                key: key.to_string(),
            });
        }

        let bad = || IniError::BadInterpolation {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
        };

        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];

            if let Some(after) = rest.strip_prefix('%') {
                out.push('%');
                rest = after;
                continue;
            }

            let inner = rest.strip_prefix('(').ok_or_else(bad)?;
            let close = inner.find(")s").ok_or_else(bad)?;
            let reference = inner[..close].to_lowercase();
            if reference.is_empty() {
                return Err(bad());
            }
            rest = &inner[close + 2..];

            let value = self
                .lookup(section, &reference)
                .ok_or_else(|| IniError::MissingReference {
                    section: section.to_string(),
                    key: key.to_string(),
                    reference: reference.clone(),
                })?;

            if value.contains('%') {
                out.push_str(&self.interpolate(section, key, value, depth + 1)?);
            } else {
                out.push_str(value);
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn parse_section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?;
    let end = inner.find(']')?;
    let header = &inner[..end];
    if header.is_empty() { None } else { Some(header) }
}

/// `key = value` or `key: value`, split at the first delimiter.
fn parse_option(line: &str) -> Option<(String, String)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }

    let delimiter = line.find(['=', ':'])?;
    let key = line[..delimiter].trim_end();
    if key.is_empty() {
        return None;
    }

    let mut value = &line[delimiter + 1..];

    // Inline comments need whitespace before the ';'
    if let Some(pos) = value.find(';') {
        if value[..pos].ends_with(char::is_whitespace) {
            value = &value[..pos];
        }
    }

    let value = value.trim();
    let value = if value == "\"\"" { "" } else { value };

    Some((key.to_lowercase(), value.to_string()))
}
