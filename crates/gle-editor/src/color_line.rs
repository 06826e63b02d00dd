//! Property-grid line editing a CSS color string property of a control.
//!
//! The line keeps a typed [`Color`] alongside the text it came from. Picker
//! and text edits replace both; per-channel edits rewrite the text as
//! `#RRGGBB`. Every successful edit is written back to the target control
//! and announced with the previous and new color.

use crate::events::{Observable, PropertyChangedEvent, PropertyValue};
use gle_core::{Color, ColorParseError, ControlId, ControlTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

pub struct ColorLine {
    label: String,
    target: ControlId,
    property_name: String,
    color: Color,
    color_text: String,
    /// Contents of the inline text box, applied by [`ColorLine::convert`].
    text_input: String,
    is_expanded: bool,
    on_value_change: Option<Box<dyn FnMut(&str)>>,
}

impl ColorLine {
    /// Bind a line to `target.property_name`. Returns `None` if the control
    /// or the property does not exist. Unparseable initial text shows as
    /// transparent until the next edit.
    pub fn new(
        label: impl Into<String>,
        tree: &ControlTree,
        target: ControlId,
        property_name: impl Into<String>,
    ) -> Option<Self> {
        let property_name = property_name.into();
        let text = tree.get(target)?.string_property(&property_name)?.to_string();
        let color = Color::parse_css(&text).unwrap_or_else(|e| {
            log::warn!("{target:?}.{property_name}: {e}");
            Color::TRANSPARENT
        });

        Some(Self {
            label: label.into(),
            target,
            property_name,
            color,
            text_input: text.clone(),
            color_text: text,
            is_expanded: false,
            on_value_change: None,
        })
    }

    /// Callback invoked with the new text after every picker or text edit.
    pub fn with_value_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> ControlId {
        self.target
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn color_text(&self) -> &str {
        &self.color_text
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Toggle the per-channel (r, g, b) row.
    pub fn switch_expand_state(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    /// Apply new color text from the picker or the text box.
    ///
    /// Rejected text leaves the color, the target property and the
    /// notification channel untouched.
    pub fn on_change(
        &mut self,
        tree: &mut ControlTree,
        events: Option<&Observable<PropertyChangedEvent>>,
        new_value: &str,
    ) -> Result<(), ColorParseError> {
        let new_color = Color::parse_css(new_value).inspect_err(|e| {
            log::warn!("{:?}.{}: rejected color: {e}", self.target, self.property_name);
        })?;

        if let Some(events) = events {
            events.notify(&PropertyChangedEvent::new(
                self.target,
                self.property_name.as_str(),
                PropertyValue::Color(new_color),
                PropertyValue::Color(self.color),
            ));
        }

        self.set_property_value(tree, new_value);
        self.color = new_color;
        self.color_text = new_value.to_string();
        self.text_input = new_value.to_string();

        if let Some(callback) = self.on_value_change.as_mut() {
            callback(new_value);
        }
        Ok(())
    }

    /// Edit the inline text box without applying it.
    pub fn set_text_input(&mut self, text: impl Into<String>) {
        self.text_input = text.into();
    }

    /// Parse and apply the text box contents.
    pub fn convert(
        &mut self,
        tree: &mut ControlTree,
        events: Option<&Observable<PropertyChangedEvent>>,
    ) -> Result<(), ColorParseError> {
        let text = self.text_input.clone();
        self.on_change(tree, events, &text)
    }

    /// Set one channel (0.0 to 1.0) and write the result back as `#RRGGBB`.
    pub fn update_channel(
        &mut self,
        tree: &mut ControlTree,
        events: Option<&Observable<PropertyChangedEvent>>,
        channel: Channel,
        value: f32,
    ) {
        let previous = self.color;
        match channel {
            Channel::R => self.color.r = value,
            Channel::G => self.color.g = value,
            Channel::B => self.color.b = value,
        }
        let hex = self.color.to_hex_rgb();
        self.set_property_value(tree, &hex);
        self.text_input = hex.clone();
        self.color_text = hex;
        self.raise_on_property_changed(events, previous);
    }

    pub fn update_state_r(
        &mut self,
        tree: &mut ControlTree,
        events: Option<&Observable<PropertyChangedEvent>>,
        value: f32,
    ) {
        self.update_channel(tree, events, Channel::R, value);
    }

    pub fn update_state_g(
        &mut self,
        tree: &mut ControlTree,
        events: Option<&Observable<PropertyChangedEvent>>,
        value: f32,
    ) {
        self.update_channel(tree, events, Channel::G, value);
    }

    pub fn update_state_b(
        &mut self,
        tree: &mut ControlTree,
        events: Option<&Observable<PropertyChangedEvent>>,
        value: f32,
    ) {
        self.update_channel(tree, events, Channel::B, value);
    }

    /// Text placed on the clipboard by the copy button.
    pub fn copy_to_clipboard(&self) -> String {
        self.color.to_hex_rgb()
    }

    fn set_property_value(&self, tree: &mut ControlTree, value: &str) {
        let written = tree
            .get_mut(self.target)
            .is_some_and(|c| c.set_string_property(&self.property_name, value));
        if !written {
            log::warn!(
                "{:?}.{}: property no longer writable",
                self.target,
                self.property_name
            );
        }
    }

    fn raise_on_property_changed(
        &self,
        events: Option<&Observable<PropertyChangedEvent>>,
        previous: Color,
    ) {
        let Some(events) = events else {
            return;
        };
        events.notify(&PropertyChangedEvent::new(
            self.target,
            self.property_name.as_str(),
            PropertyValue::Color(self.color),
            PropertyValue::Color(previous),
        ));
    }
}

impl std::fmt::Debug for ColorLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorLine")
            .field("label", &self.label)
            .field("target", &self.target)
            .field("property_name", &self.property_name)
            .field("color_text", &self.color_text)
            .field("is_expanded", &self.is_expanded)
            .finish()
    }
}
