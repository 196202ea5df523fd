/*
 * Text formatting for the numeric fields of a color chooser.
 *
 * A chooser shows one decimal field per channel of its color model (red,
 * green, blue or hue, saturation, brightness) plus one hex field for the
 * whole color. `ColorValueFormatter` converts between field text and values;
 * `ColorValueField` is the editable text state around it. It acts as a
 * document filter that rejects edits which could never form a valid value,
 * flags rejected edits with a temporary error marker, and defers commits and
 * selection changes through a `UiTaskQueue` so they run after the edit that
 * caused them has finished.
 */

use std::time::{Duration, Instant};

use crate::error::{ChromeError, Result as ChromeResult};
use crate::styling_primitives::Color;
use crate::ui_task_queue::UiTaskQueue;

/// How long a rejected edit keeps the field marked as erroneous.
pub const DEFAULT_ERROR_DELAY: Duration = Duration::from_millis(500);

const HEX_LENGTH: usize = 6;
const HEX_LENGTH_WITH_ALPHA: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorModel {
    name: &'static str,
    channels: Vec<ChannelRange>,
}

impl ColorModel {
    pub fn new(name: &'static str, channels: Vec<ChannelRange>) -> Self {
        Self { name, channels }
    }

    pub fn rgb() -> Self {
        let channel = |label| ChannelRange {
            label,
            min: 0,
            max: 255,
            default: 0,
        };
        Self::new("RGB", vec![channel("R"), channel("G"), channel("B")])
    }

    pub fn hsb() -> Self {
        Self::new(
            "HSB",
            vec![
                ChannelRange {
                    label: "H",
                    min: 0,
                    max: 359,
                    default: 0,
                },
                ChannelRange {
                    label: "S",
                    min: 0,
                    max: 100,
                    default: 0,
                },
                ChannelRange {
                    label: "B",
                    min: 0,
                    max: 100,
                    default: 0,
                },
            ],
        )
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelRange> {
        self.channels.get(index)
    }
}

/// A value shown in one chooser field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorValue {
    Channel(i32),
    Color { color: Color, alpha: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Channel(usize),
    Hex,
}

#[derive(Debug, Clone)]
pub struct ColorValueFormatter {
    model: ColorModel,
    kind: FieldKind,
    transparency_enabled: bool,
}

impl ColorValueFormatter {
    /// A decimal field for channel `field_index` of `model`.
    pub fn channel(model: ColorModel, field_index: usize) -> ChromeResult<Self> {
        if model.channel(field_index).is_none() {
            return Err(ChromeError::OperationFailed(format!(
                "{} color model has no channel {field_index}",
                model.name
            )));
        }
        Ok(Self {
            model,
            kind: FieldKind::Channel(field_index),
            transparency_enabled: false,
        })
    }

    /// The hex field showing the whole color.
    pub fn hex(model: ColorModel) -> Self {
        Self {
            model,
            kind: FieldKind::Hex,
            transparency_enabled: false,
        }
    }

    pub fn is_hex(&self) -> bool {
        self.kind == FieldKind::Hex
    }

    pub fn radix(&self) -> u32 {
        if self.is_hex() { 16 } else { 10 }
    }

    /*
     * Swapping the model keeps the field index. A channel field whose index
     * does not exist in the new model is refused and the old model stays.
     */
    pub fn set_model(&mut self, model: ColorModel) -> ChromeResult<()> {
        if let FieldKind::Channel(index) = self.kind {
            if model.channel(index).is_none() {
                return Err(ChromeError::OperationFailed(format!(
                    "{} color model has no channel {index}",
                    model.name
                )));
            }
        }
        self.model = model;
        Ok(())
    }

    pub fn set_transparency_enabled(&mut self, enabled: bool) {
        self.transparency_enabled = enabled;
    }

    /// Maximum number of characters the field accepts.
    pub fn max_length(&self) -> usize {
        match self.kind {
            FieldKind::Hex => self.hex_length(),
            FieldKind::Channel(_) => self.range().max.to_string().len(),
        }
    }

    fn hex_length(&self) -> usize {
        if self.transparency_enabled {
            HEX_LENGTH_WITH_ALPHA
        } else {
            HEX_LENGTH
        }
    }

    fn range(&self) -> ChannelRange {
        let index = match self.kind {
            FieldKind::Channel(index) => index,
            FieldKind::Hex => 0,
        };
        self.model.channel(index).copied().unwrap_or(ChannelRange {
            label: "",
            min: 0,
            max: 255,
            default: 0,
        })
    }

    pub fn string_to_value(&self, text: &str) -> ChromeResult<ColorValue> {
        match self.kind {
            FieldKind::Hex => self.parse_hex(text),
            FieldKind::Channel(_) => self.parse_channel(text),
        }
    }

    // Short input is right-padded with 'F', so "80" reads as 80FFFF.
    fn parse_hex(&self, text: &str) -> ChromeResult<ColorValue> {
        if text.is_empty() {
            return Ok(ColorValue::Color {
                color: Color::default(),
                alpha: u8::MAX,
            });
        }
        let length = self.hex_length();
        if text.len() > length || !text.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ChromeError::InvalidFormat(format!(
                "'{text}' is not a {length} digit hex color"
            )));
        }
        let padded = format!("{text:F<length$}");
        let pair = |index: usize| -> ChromeResult<u8> {
            let digits = &padded[index * 2..index * 2 + 2];
            u8::from_str_radix(digits, 16).map_err(|err| {
                ChromeError::InvalidFormat(format!("illegal hex pair '{digits}': {err}"))
            })
        };
        let color = Color::rgb(pair(0)?, pair(1)?, pair(2)?);
        let alpha = if length == HEX_LENGTH_WITH_ALPHA {
            pair(3)?
        } else {
            u8::MAX
        };
        Ok(ColorValue::Color { color, alpha })
    }

    fn parse_channel(&self, text: &str) -> ChromeResult<ColorValue> {
        let range = self.range();
        if text.is_empty() {
            return Ok(ColorValue::Channel(range.default));
        }
        let value: i32 = text
            .parse()
            .map_err(|err| ChromeError::InvalidFormat(format!("illegal format '{text}': {err}")))?;
        if value < range.min || value > range.max {
            return Err(ChromeError::InvalidFormat(format!(
                "value {value} not in range [{},{}]",
                range.min, range.max
            )));
        }
        Ok(ColorValue::Channel(value))
    }

    pub fn value_to_string(&self, value: &ColorValue) -> ChromeResult<String> {
        match (self.kind, value) {
            (FieldKind::Channel(_), ColorValue::Channel(value)) => Ok(value.to_string()),
            (FieldKind::Hex, ColorValue::Color { color, alpha }) => {
                let mut text = format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b);
                if self.transparency_enabled {
                    text.push_str(&format!("{alpha:02X}"));
                }
                Ok(text)
            }
            (kind, value) => Err(ChromeError::InvalidFormat(format!(
                "cannot show {value:?} in a {kind:?} field"
            ))),
        }
    }

    fn accepts_length(&self, length: usize) -> bool {
        length <= self.max_length()
    }

    fn accepts_digits(&self, text: &str) -> bool {
        let radix = self.radix();
        text.chars().all(|ch| ch.is_digit(radix))
    }

    fn accepts_value(&self, text: &str) -> bool {
        self.is_hex() || self.string_to_value(text).is_ok()
    }
}

/// Work a field defers to the next turn of the UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTask {
    Commit,
    SelectAll,
    ClearSelection,
}

#[derive(Debug, Clone)]
pub struct ColorValueField {
    formatter: ColorValueFormatter,
    text: String,
    selection: (usize, usize),
    value: Option<ColorValue>,
    has_error: bool,
    error_delay: Duration,
    error_deadline: Option<Instant>,
}

impl ColorValueField {
    pub fn new(formatter: ColorValueFormatter) -> Self {
        Self {
            formatter,
            text: String::new(),
            selection: (0, 0),
            value: None,
            has_error: false,
            error_delay: DEFAULT_ERROR_DELAY,
            error_deadline: None,
        }
    }

    pub fn with_error_delay(mut self, delay: Duration) -> Self {
        self.error_delay = delay;
        self
    }

    pub fn formatter(&self) -> &ColorValueFormatter {
        &self.formatter
    }

    pub fn formatter_mut(&mut self) -> &mut ColorValueFormatter {
        &mut self.formatter
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<ColorValue> {
        self.value
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Shows `value` in the field, replacing the text without running the filter.
    pub fn display(&mut self, value: ColorValue) -> ChromeResult<()> {
        self.text = self.formatter.value_to_string(&value)?;
        self.value = Some(value);
        self.selection = (0, 0);
        Ok(())
    }

    /*
     * Document filter entry points. `Ok(false)` means the edit was rejected
     * and the error marker armed; `Err` means the offsets do not address the
     * current text.
     */
    pub fn insert(
        &mut self,
        offset: usize,
        text: &str,
        now: Instant,
        tasks: &mut UiTaskQueue<FieldTask>,
    ) -> ChromeResult<bool> {
        self.replace(offset, 0, text, now, tasks)
    }

    pub fn remove(
        &mut self,
        offset: usize,
        length: usize,
        now: Instant,
        tasks: &mut UiTaskQueue<FieldTask>,
    ) -> ChromeResult<bool> {
        let end = self.checked_range(offset, length)?;
        if !self.formatter.accepts_length(self.text.len() - length) {
            self.error(now);
            return Ok(false);
        }
        self.text.replace_range(offset..end, "");
        self.clamp_selection();
        self.commit(tasks);
        Ok(true)
    }

    pub fn replace(
        &mut self,
        offset: usize,
        length: usize,
        text: &str,
        now: Instant,
        tasks: &mut UiTaskQueue<FieldTask>,
    ) -> ChromeResult<bool> {
        let end = self.checked_range(offset, length)?;
        let new_length = self.text.len() - length + text.len();
        if !self.formatter.accepts_length(new_length) || !self.formatter.accepts_digits(text) {
            log::debug!("ColorValueFormatter: rejected '{text}' at {offset}");
            self.error(now);
            return Ok(false);
        }
        let mut candidate = self.text.clone();
        candidate.replace_range(offset..end, text);
        if !self.formatter.accepts_value(&candidate) {
            log::debug!("ColorValueFormatter: '{candidate}' is out of range");
            self.error(now);
            return Ok(false);
        }
        self.text
            .replace_range(offset..end, &text.to_ascii_uppercase());
        self.clamp_selection();
        self.commit(tasks);
        Ok(true)
    }

    pub fn focus_gained(&mut self, tasks: &mut UiTaskQueue<FieldTask>) {
        tasks.post(FieldTask::SelectAll);
    }

    pub fn focus_lost(&mut self, tasks: &mut UiTaskQueue<FieldTask>) {
        tasks.post(FieldTask::ClearSelection);
    }

    /// Runs a task previously posted by this field.
    pub fn run_task(&mut self, task: FieldTask) {
        match task {
            FieldTask::Commit => match self.formatter.string_to_value(&self.text) {
                Ok(value) => {
                    log::trace!("ColorValueFormatter: committed {value:?}");
                    self.value = Some(value);
                }
                Err(err) => {
                    log::warn!("ColorValueFormatter: commit of '{}' failed: {err}", self.text);
                }
            },
            FieldTask::SelectAll => self.selection = (0, self.text.len()),
            FieldTask::ClearSelection => self.selection = (0, 0),
        }
    }

    /// Clears the error marker once its delay has elapsed. Returns whether it was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.error_deadline {
            Some(deadline) if now >= deadline => {
                self.error_deadline = None;
                self.has_error = false;
                true
            }
            _ => false,
        }
    }

    fn checked_range(&self, offset: usize, length: usize) -> ChromeResult<usize> {
        match offset.checked_add(length) {
            Some(end) if end <= self.text.len() => Ok(end),
            _ => Err(ChromeError::InvalidFormat(format!(
                "edit at {offset}+{length} outside text of length {}",
                self.text.len()
            ))),
        }
    }

    fn clamp_selection(&mut self) {
        let length = self.text.len();
        self.selection = (self.selection.0.min(length), self.selection.1.min(length));
    }

    fn error(&mut self, now: Instant) {
        self.has_error = true;
        // A new rejection restarts the timer.
        self.error_deadline = Some(now + self.error_delay);
    }

    fn commit(&mut self, tasks: &mut UiTaskQueue<FieldTask>) {
        self.has_error = false;
        self.error_deadline = None;
        tasks.post(FieldTask::Commit);
    }
}
