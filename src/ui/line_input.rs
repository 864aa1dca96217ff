use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::provider::image::expand_home;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "heic"];
const MAX_COMPLETIONS: usize = 50;

/// Which text box is being edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputField {
    LoginName,
    EssayTheme,
    EssayImagePath,
}

impl InputField {
    pub fn max_chars(self) -> usize {
        match self {
            InputField::LoginName => 40,
            InputField::EssayTheme => 200,
            InputField::EssayImagePath => 1024,
        }
    }

    pub fn completes_paths(self) -> bool {
        self == InputField::EssayImagePath
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
    /// Tab on a field without completion; the caller moves focus.
    NextField,
}

pub struct LineInput {
    field: InputField,
    text: String,
    /// Char index, 0 = before the first char.
    cursor: usize,
    completions: Vec<String>,
    completion_index: Option<usize>,
    /// Set when the directory being completed could not be listed.
    pub completion_error: bool,
}

impl LineInput {
    pub fn new(field: InputField, text: &str) -> Self {
        Self {
            field,
            text: text.to_string(),
            cursor: text.chars().count(),
            completions: Vec::new(),
            completion_index: None,
            completion_error: false,
        }
    }

    pub fn field(&self) -> InputField {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.reset_completion();
    }

    /// (before cursor, char under cursor, after cursor) for styled rendering.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_at(self.cursor);
        match self.text[at..].chars().next() {
            Some(ch) => (&self.text[..at], Some(ch), &self.text[at + ch.len_utf8()..]),
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.reset_completion();
        }
        match key.code {
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Tab | KeyCode::BackTab if !self.field.completes_paths() => {
                return InputResult::NextField;
            }
            KeyCode::Tab => self.complete(true),
            KeyCode::BackTab => self.complete(false),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_at(self.cursor);
            }
            KeyCode::Delete if self.cursor < self.len() => self.remove_at(self.cursor),
            KeyCode::Char(ch) if !ctrl => {
                if self.len() < self.field.max_chars() {
                    let at = self.byte_at(self.cursor);
                    self.text.insert(at, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(b, _)| b)
    }

    fn remove_at(&mut self, char_idx: usize) {
        let at = self.byte_at(char_idx);
        if let Some(ch) = self.text[at..].chars().next() {
            self.text.replace_range(at..at + ch.len_utf8(), "");
        }
    }

    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let (from, to) = (self.byte_at(start), self.byte_at(self.cursor));
        self.text.replace_range(from..to, "");
        self.cursor = start;
    }

    fn reset_completion(&mut self) {
        self.completions.clear();
        self.completion_index = None;
        self.completion_error = false;
    }

    fn complete(&mut self, forward: bool) {
        if self.cursor < self.len() {
            return;
        }
        let next = match self.completion_index {
            None => {
                self.completions = self.list_completions();
                if self.completions.is_empty() {
                    return;
                }
                0
            }
            Some(idx) => {
                let count = self.completions.len();
                if forward {
                    (idx + 1) % count
                } else {
                    (idx + count - 1) % count
                }
            }
        };
        self.completion_index = Some(next);
        self.text = self.completions[next].clone();
        self.cursor = self.len();
    }

    fn list_completions(&mut self) -> Vec<String> {
        let split = self.text.rfind(['/', '\\']).map_or(0, |pos| pos + 1);
        let (dir, partial) = self.text.split_at(split);
        let lookup = if dir.is_empty() {
            PathBuf::from(".")
        } else {
            expand_home(dir, dirs::home_dir().as_deref())
        };
        let entries = match fs::read_dir(&lookup) {
            Ok(entries) => entries.map(|entry| {
                entry.map(|e| {
                    let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    (e.file_name().to_string_lossy().into_owned(), is_dir)
                })
            }),
            Err(_) => {
                self.completion_error = true;
                return Vec::new();
            }
        };
        let (dir, partial) = (dir.to_string(), partial.to_string());
        self.filter_completions(entries, &dir, &partial)
    }

    /// Keep directories and image files matching `partial`, directories first.
    fn filter_completions(
        &mut self,
        entries: impl Iterator<Item = io::Result<(String, bool)>>,
        dir: &str,
        partial: &str,
    ) -> Vec<String> {
        let show_hidden = partial.starts_with('.');
        let mut found: Vec<(bool, String)> = Vec::new();
        for entry in entries {
            let Ok((name, is_dir)) = entry else {
                self.completion_error = true;
                return Vec::new();
            };
            if (!show_hidden && name.starts_with('.')) || !name.starts_with(partial) {
                continue;
            }
            if is_dir {
                found.push((true, format!("{dir}{name}{MAIN_SEPARATOR}")));
            } else if is_image_name(&name) {
                found.push((false, format!("{dir}{name}")));
            }
        }
        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        found.truncate(MAX_COMPLETIONS);
        found.into_iter().map(|(_, path)| path).collect()
    }
}

fn is_image_name(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
