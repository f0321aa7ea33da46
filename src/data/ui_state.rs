//! UI State - view identity, menu focus, prompts and notices
//!
//! This module contains UI state that is independent of rendering.
//! The TUI frontend reads from these structures.

/// Which panel is currently visible
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewId {
    #[default]
    Menu,
    MediaPlayer,
    TextViewer,
    ImageViewer,
}

impl ViewId {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Menu => "Multimedia Library",
            Self::MediaPlayer => "Media Player",
            Self::TextViewer => "Text Viewer",
            Self::ImageViewer => "Image Viewer",
        }
    }
}

/// Entries of the 2x2 main menu grid, in reading order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    MediaPlayer,
    TextViewer,
    ImageViewer,
    Camera,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        Self::MediaPlayer,
        Self::TextViewer,
        Self::ImageViewer,
        Self::Camera,
    ];

    pub fn label(&self, camera_running: bool) -> &'static str {
        match self {
            Self::MediaPlayer => "Video / Music Player",
            Self::TextViewer => "Text Viewer",
            Self::ImageViewer => "Image Viewer",
            Self::Camera if camera_running => "Stop Gesture Camera",
            Self::Camera => "Start Gesture Camera",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Current input mode, derived from which overlay (if any) is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Keys go to the active view
    Normal,
    /// Path prompt is open
    Prompt,
    /// A modal notice is waiting to be dismissed
    Notice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Modal message shown over the current view
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Panel that will receive the path typed into the prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptTarget {
    Media,
    Text,
    Image,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico"];
const MEDIA_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "oga", "m4a"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "log", "csv", "toml", "json", "pdf"];

impl PromptTarget {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Media => "Open media file",
            Self::Text => "Open text file",
            Self::Image => "Open image file",
        }
    }

    /// Prompt owned by a panel view
    pub fn for_view(view: ViewId) -> Option<Self> {
        match view {
            ViewId::Menu => None,
            ViewId::MediaPlayer => Some(Self::Media),
            ViewId::TextViewer => Some(Self::Text),
            ViewId::ImageViewer => Some(Self::Image),
        }
    }

    /// Panel that handles a file, judged by its extension
    pub fn for_path(path: &std::path::Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Media)
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Text)
        } else {
            None
        }
    }

    pub fn view(&self) -> ViewId {
        match self {
            Self::Media => ViewId::MediaPlayer,
            Self::Text => ViewId::TextViewer,
            Self::Image => ViewId::ImageViewer,
        }
    }
}

/// Single-line path input standing in for a file dialog
#[derive(Clone, Debug, PartialEq)]
pub struct PathPrompt {
    pub target: PromptTarget,
    pub input: String,
    /// Cursor position in chars
    pub cursor: usize,
}

impl PathPrompt {
    pub fn new(target: PromptTarget) -> Self {
        Self {
            target,
            input: String::new(),
            cursor: 0,
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.input.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.input.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

/// Application UI state
#[derive(Clone, Debug)]
pub struct UiState {
    /// Highlighted entry in the main menu grid (index into `MenuEntry::ALL`)
    pub menu_selected: usize,

    /// Open path prompt, if any
    pub prompt: Option<PathPrompt>,

    /// Modal notice, if any
    pub notice: Option<Notice>,

    /// Status bar text
    pub status_text: String,

    /// Whether the gesture listener is bound
    pub gesture_listening: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            menu_selected: 0,
            prompt: None,
            notice: None,
            status_text: String::from("Ready"),
            gesture_listening: false,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.notice.is_some() {
            InputMode::Notice
        } else if self.prompt.is_some() {
            InputMode::Prompt
        } else {
            InputMode::Normal
        }
    }

    pub fn selected_menu_entry(&self) -> MenuEntry {
        MenuEntry::from_index(self.menu_selected).unwrap_or(MenuEntry::MediaPlayer)
    }

    /// Move the menu cursor within the 2x2 grid
    pub fn move_menu_selection(&mut self, dx: i32, dy: i32) {
        let col = (self.menu_selected % 2) as i32;
        let row = (self.menu_selected / 2) as i32;
        let col = (col + dx).clamp(0, 1);
        let row = (row + dy).clamp(0, 1);
        self.menu_selected = (row * 2 + col) as usize;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
