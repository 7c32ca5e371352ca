use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::OptionsError;

/// Descriptor for one scheduled local notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Options {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub badge: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub at: i64,                     // fire time, epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every: Option<String>,       // "day", "week", or a custom token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,        // opaque, caller-defined encoding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl Options {
    /// Minimal descriptor: badge 0, every optional field unset.
    pub fn new(id: i32, at: i64) -> Self {
        Self {
            id,
            title: None,
            text: None,
            badge: 0,
            sound: None,
            image: None,
            at,
            every: None,
            data: None,
            attachments: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Parses an `<options ... />` record with the default codec.
    pub fn parse(record: &str) -> Result<Self, OptionsError> {
        Codec::default().parse(record)
    }

    /// Renders this descriptor as an `<options ... />` record with the default codec.
    pub fn to_xml(&self) -> Result<String, OptionsError> {
        Codec::default().serialize(self)
    }

    /// Optional attributes in emission order.
    pub(crate) fn optional_attributes(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("title", self.title.as_deref()),
            ("text", self.text.as_deref()),
            ("sound", self.sound.as_deref()),
            ("image", self.image.as_deref()),
            ("every", self.every.as_deref()),
            ("data", self.data.as_deref()),
        ]
    }
}

/// Button kinds a toast action can take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    #[default]
    Button,
    Input,
}

/// Action attached to a notification. Carried in memory only; the
/// `<options>` record has no representation for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Button {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub launch: bool,                // bring the app to the foreground on press
    #[serde(rename = "type", default)]
    pub kind: ButtonKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_text: Option<String>,  // placeholder for input actions
}

impl Button {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), launch: false, kind: ButtonKind::Button, empty_text: None }
    }

    pub fn input(id: impl Into<String>, title: impl Into<String>, empty_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            launch: false,
            kind: ButtonKind::Input,
            empty_text: Some(empty_text.into()),
        }
    }

    pub fn launching(mut self) -> Self {
        self.launch = true;
        self
    }
}

/// Host-side construction path. `id` and `at` must be supplied before
/// [`OptionsBuilder::build`]; `badge` falls back to 0.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    id: Option<i32>,
    badge: Option<i32>,
    at: Option<i64>,
    title: Option<String>,
    text: Option<String>,
    sound: Option<String>,
    image: Option<String>,
    every: Option<String>,
    data: Option<String>,
    attachments: Vec<String>,
    buttons: Vec<Button>,
}

impl OptionsBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn badge(mut self, badge: i32) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn at(mut self, at: i64) -> Self {
        self.at = Some(at);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn every(mut self, every: impl Into<String>) -> Self {
        self.every = Some(every.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachments.push(attachment.into());
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn build(self) -> Result<Options, OptionsError> {
        let id = self
            .id
            .ok_or_else(|| OptionsError::InvalidDescriptor("`id` was never set".into()))?;
        let at = self
            .at
            .ok_or_else(|| OptionsError::InvalidDescriptor("`at` was never set".into()))?;

        Ok(Options {
            id,
            title: self.title,
            text: self.text,
            badge: self.badge.unwrap_or(0),
            sound: self.sound,
            image: self.image,
            at,
            every: self.every,
            data: self.data,
            attachments: self.attachments,
            buttons: self.buttons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_badge_to_zero() {
        let options = Options::builder().id(7).at(1_700_000_000).title("Hi").build().unwrap();
        assert_eq!(options.badge, 0);
        assert_eq!(options.title.as_deref(), Some("Hi"));
        assert!(options.text.is_none());
    }

    #[test]
    fn builder_rejects_missing_id() {
        let err = Options::builder().at(1).build().unwrap_err();
        assert!(matches!(err, OptionsError::InvalidDescriptor(ref msg) if msg.contains("id")));
    }

    #[test]
    fn builder_rejects_missing_at() {
        let err = Options::builder().id(1).badge(3).build().unwrap_err();
        assert!(matches!(err, OptionsError::InvalidDescriptor(ref msg) if msg.contains("at")));
    }

    #[test]
    fn builder_keeps_attachments_and_buttons() {
        let options = Options::builder()
            .id(1)
            .at(2)
            .attachment("file:///img.png")
            .button(Button::new("ok", "OK").launching())
            .button(Button::input("reply", "Reply", "Type a message"))
            .build()
            .unwrap();

        assert_eq!(options.attachments, vec!["file:///img.png".to_string()]);
        assert_eq!(options.buttons.len(), 2);
        assert!(options.buttons[0].launch);
        assert_eq!(options.buttons[1].kind, ButtonKind::Input);
        assert_eq!(options.buttons[1].empty_text.as_deref(), Some("Type a message"));
    }

    #[test]
    fn json_skips_unset_fields() {
        let json = serde_json::to_value(Options::new(1, 2)).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 1, "badge": 0, "at": 2 }));
    }

    #[test]
    fn json_keeps_empty_strings_and_button_type() {
        let mut options = Options::new(1, 2);
        options.text = Some(String::new());
        options.buttons.push(Button::input("r", "Reply", ""));

        let json = serde_json::to_string(&options).unwrap();
        let back: Options = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
        assert!(json.contains(r#""type":"input""#));
    }

    #[test]
    fn json_badge_defaults_when_missing() {
        let options: Options = serde_json::from_str(r#"{ "id": 4, "at": 10 }"#).unwrap();
        assert_eq!(options, Options::new(4, 10));
    }
}
