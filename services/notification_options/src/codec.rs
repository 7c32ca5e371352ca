use std::collections::HashMap;
use std::str::FromStr;

use tracing::debug;
use xml::reader::{ParserConfig, XmlEvent as ReadEvent};
use xml::writer::{EmitterConfig, XmlEvent as WriteEvent};

use crate::config::CodecConfig;
use crate::error::OptionsError;
use crate::models::Options;

pub const ROOT_ELEMENT: &str = "options";

const ID: &str = "id";
const BADGE: &str = "badge";
const AT: &str = "at";

const KNOWN_ATTRIBUTES: [&str; 9] = [ID, BADGE, AT, "title", "text", "sound", "image", "every", "data"];

type Attributes = HashMap<String, String>;

/// Converts [`Options`] to and from the `<options ... />` record.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn parse(&self, record: &str) -> Result<Options, OptionsError> {
        if record.len() > self.config.max_record_bytes {
            return Err(OptionsError::MalformedInput(format!(
                "record is {} bytes, limit is {}",
                record.len(),
                self.config.max_record_bytes
            )));
        }

        let attributes = self.read_attributes(record)?;

        let id = required(&attributes, ID)?;
        let badge = required(&attributes, BADGE)?;
        let at = required(&attributes, AT)?;

        // presence, not truthiness: title="" stays Some("")
        let optional = |name: &str| attributes.get(name).cloned();
        let options = Options {
            id,
            title: optional("title"),
            text: optional("text"),
            badge,
            sound: optional("sound"),
            image: optional("image"),
            at,
            every: optional("every"),
            data: optional("data"),
            attachments: Vec::new(),
            buttons: Vec::new(),
        };

        for name in attributes.keys().filter(|name| !KNOWN_ATTRIBUTES.contains(&name.as_str())) {
            debug!(attribute = %name, id = options.id, "ignoring unknown options attribute");
        }
        debug!(id = options.id, at = options.at, "parsed options record");
        Ok(options)
    }

    pub fn serialize(&self, options: &Options) -> Result<String, OptionsError> {
        let id = options.id.to_string();
        let badge = options.badge.to_string();
        let at = options.at.to_string();

        let mut escaped = Vec::new();
        for (name, value) in options.optional_attributes() {
            if let Some(value) = value {
                ensure_xml_chars(name, value)?;
                escaped.push((name, escape_attribute(value)));
            }
        }

        let mut element = WriteEvent::start_element(ROOT_ELEMENT)
            .attr(ID, &id)
            .attr(BADGE, &badge)
            .attr(AT, &at);
        for (name, value) in &escaped {
            element = element.attr(*name, value);
        }

        // values are pre-escaped; the writer's own escaping leaves TAB raw
        let mut emitter = EmitterConfig::new();
        emitter.perform_escaping = false;
        let mut writer = emitter
            .write_document_declaration(self.config.xml_declaration)
            .normalize_empty_elements(true)
            .pad_self_closing(true)
            .perform_indent(false)
            .create_writer(Vec::new());

        writer.write(element).map_err(emit_error)?;
        writer.write(WriteEvent::end_element()).map_err(emit_error)?;

        let record = String::from_utf8(writer.into_inner()).map_err(emit_error)?;
        debug!(id = options.id, bytes = record.len(), "serialized options record");
        Ok(record)
    }

    /// Attributes of the document element. The whole document is consumed so
    /// trailing garbage still fails as malformed.
    fn read_attributes(&self, record: &str) -> Result<Attributes, OptionsError> {
        let reader = ParserConfig::new()
            .allow_multiple_root_elements(false)
            .create_reader(record.as_bytes());
        let mut root: Option<Attributes> = None;

        for event in reader {
            match event.map_err(|e| OptionsError::MalformedInput(e.to_string()))? {
                ReadEvent::StartElement { name, attributes, .. } if root.is_none() => {
                    if self.config.require_options_root && name.local_name != ROOT_ELEMENT {
                        return Err(OptionsError::MalformedInput(format!(
                            "expected <{ROOT_ELEMENT}> root element, found <{}>",
                            name.local_name
                        )));
                    }

                    let mut bag = Attributes::with_capacity(attributes.len());
                    for attribute in attributes {
                        if attribute.name.prefix.is_some() {
                            continue;
                        }
                        let key = attribute.name.local_name;
                        if bag.contains_key(&key) {
                            return Err(OptionsError::MalformedInput(format!(
                                "attribute `{key}` appears more than once"
                            )));
                        }
                        bag.insert(key, attribute.value);
                    }
                    root = Some(bag);
                }
                ReadEvent::EndDocument => break,
                _ => {}
            }
        }

        root.ok_or_else(|| OptionsError::MalformedInput("no root element".into()))
    }
}

/// Parses `record` with the default configuration.
pub fn parse(record: &str) -> Result<Options, OptionsError> {
    Codec::default().parse(record)
}

/// Serializes `options` with the default configuration.
pub fn serialize(options: &Options) -> Result<String, OptionsError> {
    Codec::default().serialize(options)
}

fn required<T: FromStr>(attributes: &Attributes, field: &'static str) -> Result<T, OptionsError> {
    let raw = attributes
        .get(field)
        .ok_or(OptionsError::MissingRequiredField(field))?;

    raw.trim()
        .parse()
        .map_err(|_| OptionsError::InvalidFieldValue { field, value: raw.clone() })
}

// XML 1.0 Char production; anything else can't be carried in an attribute.
fn ensure_xml_chars(field: &str, value: &str) -> Result<(), OptionsError> {
    let forbidden = value.chars().find(|&c| {
        matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
    });

    match forbidden {
        Some(c) => Err(OptionsError::InvalidDescriptor(format!(
            "`{field}` contains character U+{:04X} which XML cannot carry",
            c as u32
        ))),
        None => Ok(()),
    }
}

// Whitespace goes out as character references so attribute-value
// normalization on the reading side keeps it intact.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
    out
}

fn emit_error(e: impl std::fmt::Display) -> OptionsError {
    OptionsError::Emit(e.to_string())
}
