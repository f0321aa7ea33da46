use crate::camera::{CameraEvent, CameraProcess};
use crate::config::Config;
use crate::core::actions::{ImageAction, MediaAction, Origin, RoutedAction, TextAction};
use crate::core::commands::GestureCommand;
use crate::core::input_router::{self, InputAction};
use crate::core::navigator::ViewNavigator;
use crate::core::panel::ActivePanel;
use crate::core::router;
use crate::data::ui_state::{MenuEntry, Notice, PathPrompt, PromptTarget, UiState, ViewId};
use crate::recent_files::TomlRecentFiles;
use crate::sound;
use crate::widgets::{ImageViewerState, MediaPlayerState, PlaybackState, TextViewerState};
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Core application state (frontend-agnostic)
///
/// AppCore owns every panel and is the single place where gestures, keys,
/// and timers change state. The frontend reads it to render and reports the
/// drawn geometry back through the panel states.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Menu cursor, prompt, notice, status bar
    pub ui: UiState,

    /// Which view is showing
    pub navigator: ViewNavigator,

    pub media: MediaPlayerState,
    pub text: TextViewerState,
    pub image: ImageViewerState,

    /// External gesture detector
    pub camera: CameraProcess,

    /// Origin of the last camera start, for reporting a failed launch
    camera_origin: Origin,

    /// Application running flag
    pub running: bool,

    /// Set when state changed and the frontend should redraw
    pub needs_render: bool,

    /// Last forced repaint while media is playing
    last_progress_render: Instant,
}

impl AppCore {
    /// Create AppCore with the real audio device and TOML-backed file lists
    pub fn new(config: Config) -> Self {
        let media = MediaPlayerState::new(
            sound::open_output(config.media.sound_enabled),
            config.media.initial_volume,
        );
        let text = TextViewerState::new(Box::new(TomlRecentFiles::new(config.recent_text_path())));
        let image = ImageViewerState::new(
            Box::new(TomlRecentFiles::new(config.recent_images_path())),
            config.image.zoom_limits(),
        );
        Self::with_parts(config, media, text, image)
    }

    /// Create AppCore from prebuilt panels
    pub fn with_parts(
        config: Config,
        media: MediaPlayerState,
        text: TextViewerState,
        image: ImageViewerState,
    ) -> Self {
        let camera = CameraProcess::new(
            config.camera.command.clone(),
            config.camera.args.clone(),
            config.camera_startup_grace(),
        );

        Self {
            config,
            ui: UiState::new(),
            navigator: ViewNavigator::new(),
            media,
            text,
            image,
            camera,
            camera_origin: Origin::User,
            running: true,
            needs_render: true,
            last_progress_render: Instant::now(),
        }
    }

    pub fn current_view(&self) -> ViewId {
        self.navigator.current()
    }

    /// Handle one token from the gesture listener
    pub fn handle_gesture(&mut self, token: &str) {
        let Some(command) = GestureCommand::parse(token) else {
            debug!("Ignoring unknown gesture token {:?}", token);
            return;
        };

        let view = self.current_view();
        match router::route(view, command) {
            Some(action) => {
                debug!("Gesture '{}' in {:?} -> {:?}", command, view, action);
                self.apply(action, Origin::Gesture);
            }
            None => debug!("Gesture '{}' has no effect in {:?}", command, view),
        }
    }

    pub fn set_gesture_listening(&mut self, addr: SocketAddr) {
        debug!("Gesture input active on {}", addr);
        self.ui.gesture_listening = true;
        self.ui.status_text = format!("Listening for gestures on {}", addr);
        self.needs_render = true;
    }

    /// Control surface of the visible panel
    pub fn active_panel(&mut self) -> ActivePanel<'_> {
        match self.navigator.current() {
            ViewId::Menu => ActivePanel::Menu,
            ViewId::MediaPlayer => ActivePanel::Media(&mut self.media),
            ViewId::TextViewer => ActivePanel::Text(&mut self.text),
            ViewId::ImageViewer => ActivePanel::Image(&mut self.image),
        }
    }

    /// Perform a routed action on the active panel
    pub fn apply(&mut self, action: RoutedAction, origin: Origin) {
        self.needs_render = true;

        let seek = self.config.media.seek_step_secs;
        let volume = self.config.media.volume_step;
        let zoom = self.config.image.zoom_step;
        let pan = match origin {
            Origin::Gesture => self.config.image.gesture_pan_step,
            Origin::User => self.config.image.key_pan_step,
        };

        match action {
            RoutedAction::Navigate(ViewId::Menu) => self.go_menu(),
            RoutedAction::Navigate(view) => self.show_view(view),
            RoutedAction::ToggleCamera => self.toggle_camera(origin),
            RoutedAction::Text(text_action) => match self.active_panel() {
                ActivePanel::Text(panel) => {
                    let moved = match text_action {
                        TextAction::NextPage => panel.advance_page(),
                        TextAction::PrevPage => panel.retreat_page(),
                    };
                    if !moved {
                        debug!("{:?} at document boundary", text_action);
                    }
                }
                _ => debug!("{:?} ignored outside the text viewer", text_action),
            },
            RoutedAction::Media(media_action) => match self.active_panel() {
                ActivePanel::Media(panel) => match media_action {
                    MediaAction::TogglePlayPause => panel.toggle_play_pause(),
                    MediaAction::SeekForward => panel.seek_relative(seek),
                    MediaAction::SeekBackward => panel.seek_relative(-seek),
                    MediaAction::NextTrack => {
                        panel.next_track();
                    }
                    MediaAction::PrevTrack => {
                        panel.previous_track();
                    }
                    MediaAction::VolumeUp => panel.adjust_volume(volume),
                    MediaAction::VolumeDown => panel.adjust_volume(-volume),
                },
                _ => debug!("{:?} ignored outside the media player", media_action),
            },
            RoutedAction::Image(image_action) => match self.active_panel() {
                ActivePanel::Image(panel) => match image_action {
                    ImageAction::Pan(direction) => {
                        let (ux, uy) = direction.unit();
                        panel.pan(ux * pan, uy * pan);
                    }
                    ImageAction::ZoomIn => panel.zoom_at_center(zoom),
                    ImageAction::ZoomOut => panel.zoom_at_center(1.0 / zoom),
                },
                _ => debug!("{:?} ignored outside the image viewer", image_action),
            },
        }
    }

    /// Switch to a view; the other panels keep their state
    pub fn show_view(&mut self, view: ViewId) {
        if self.navigator.show(view) {
            self.needs_render = true;
        }
    }

    pub fn go_menu(&mut self) {
        if self.navigator.go_menu() {
            self.needs_render = true;
        }
    }

    /// Start the gesture detector when stopped, kill it when running
    pub fn toggle_camera(&mut self, origin: Origin) {
        self.needs_render = true;
        match self.camera.toggle() {
            Ok(true) => {
                self.camera_origin = origin;
                self.ui.status_text = String::from("Camera started");
            }
            Ok(false) => {
                self.ui.status_text = String::from("Camera stopped");
            }
            Err(e) => {
                error!("{:#}", e);
                self.ui.status_text = String::from("Camera failed to start");
                self.notify(
                    origin,
                    Notice::error(
                        "Camera",
                        format!("Could not start the gesture detector: {:#}", e),
                    ),
                );
            }
        }
    }

    /// Show a notice for user actions; gesture failures stay in the log
    fn notify(&mut self, origin: Origin, notice: Notice) {
        match origin {
            Origin::User => self.ui.notice = Some(notice),
            Origin::Gesture => debug!("Notice suppressed for gesture: {}", notice.message),
        }
    }

    fn activate_menu_entry(&mut self, entry: MenuEntry) {
        match entry {
            MenuEntry::MediaPlayer => self.show_view(ViewId::MediaPlayer),
            MenuEntry::TextViewer => self.show_view(ViewId::TextViewer),
            MenuEntry::ImageViewer => self.show_view(ViewId::ImageViewer),
            MenuEntry::Camera => self.toggle_camera(Origin::User),
        }
    }

    /// Open a file in the panel matching its extension
    pub fn open_file(&mut self, path: &Path) {
        match PromptTarget::for_path(path) {
            Some(target) => self.open_path(target, path),
            None => {
                warn!("Unsupported file type: {:?}", path);
                self.notify(
                    Origin::User,
                    Notice::warning(
                        "Unsupported file",
                        format!("Don't know how to open {}", path.display()),
                    ),
                );
            }
        }
    }

    /// Open a file in a specific panel and show that panel
    pub fn open_path(&mut self, target: PromptTarget, path: &Path) {
        self.needs_render = true;
        let result = match target {
            PromptTarget::Media => self.media.open(path),
            PromptTarget::Text => self.text.open(path),
            PromptTarget::Image => self.image.open(path),
        };

        match result {
            Ok(()) => {
                self.show_view(target.view());
                self.ui.status_text = format!("Opened {}", path.display());
            }
            Err(e) => {
                warn!("{:#}", e);
                self.notify(
                    Origin::User,
                    Notice::warning(target.view().title(), format!("{:#}", e)),
                );
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let action =
            input_router::route_key(self.current_view(), self.ui.input_mode(), code, modifiers);
        self.perform(action);
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, kind: MouseEventKind, modifiers: KeyModifiers) {
        let action =
            input_router::route_mouse(self.current_view(), self.ui.input_mode(), kind, modifiers);
        self.perform(action);
    }

    /// Pasted text goes into the open prompt
    pub fn handle_paste(&mut self, text: &str) {
        if let Some(prompt) = self.ui.prompt.as_mut() {
            prompt.insert_str(text);
            self.needs_render = true;
        }
    }

    fn perform(&mut self, action: InputAction) {
        if action == InputAction::None {
            return;
        }
        self.needs_render = true;

        match action {
            InputAction::Quit => self.running = false,
            InputAction::MenuMove(dx, dy) => self.ui.move_menu_selection(dx, dy),
            InputAction::MenuActivate => self.activate_menu_entry(self.ui.selected_menu_entry()),
            InputAction::MenuSelect(entry) => {
                if let Some(index) = MenuEntry::ALL.iter().position(|e| *e == entry) {
                    self.ui.menu_selected = index;
                }
                self.activate_menu_entry(entry);
            }
            InputAction::Back => self.go_menu(),
            InputAction::OpenPrompt => {
                self.ui.prompt = PromptTarget::for_view(self.current_view()).map(PathPrompt::new);
            }
            InputAction::Routed(routed) => self.apply(routed, Origin::User),
            InputAction::SidebarUp => self.text.select_previous(),
            InputAction::SidebarDown => self.text.select_next(),
            InputAction::LoadSelected => {
                if let Err(e) = self.text.load_selected() {
                    warn!("{:#}", e);
                    self.notify(Origin::User, Notice::warning("Text Viewer", format!("{:#}", e)));
                }
            }
            InputAction::RemoveSelected => {
                self.text.remove_selected();
            }
            InputAction::ClearImage => self.image.clear(),
            InputAction::OpenRecentImage(index) => {
                if self.image.image.is_none() && index < self.image.recent.len() {
                    if let Err(e) = self.image.open_recent(index) {
                        warn!("{:#}", e);
                        self.notify(
                            Origin::User,
                            Notice::warning("Image Viewer", format!("{:#}", e)),
                        );
                    }
                }
            }
            InputAction::DismissNotice => self.ui.notice = None,
            InputAction::PromptSubmit => self.submit_prompt(),
            InputAction::PromptCancel => self.ui.prompt = None,
            edit => {
                if let Some(prompt) = self.ui.prompt.as_mut() {
                    match edit {
                        InputAction::PromptInsert(c) => prompt.insert_char(c),
                        InputAction::PromptBackspace => prompt.backspace(),
                        InputAction::PromptDelete => prompt.delete(),
                        InputAction::PromptLeft => prompt.move_left(),
                        InputAction::PromptRight => prompt.move_right(),
                        InputAction::PromptHome => prompt.home(),
                        InputAction::PromptEnd => prompt.end(),
                        _ => {}
                    }
                }
            }
        }
    }

    fn submit_prompt(&mut self) {
        let Some(prompt) = self.ui.prompt.take() else {
            return;
        };

        let Some(path) = prompt_path(&prompt.input) else {
            return;
        };
        self.open_path(prompt.target, &path);
    }

    /// Periodic work: camera liveness, media auto-advance, progress repaint
    pub fn tick(&mut self) {
        if let Some(event) = self.camera.poll() {
            self.needs_render = true;
            match event {
                CameraEvent::LaunchFailed(detail) => {
                    self.ui.status_text = String::from("Camera failed to start");
                    let origin = self.camera_origin;
                    self.notify(
                        origin,
                        Notice::error(
                            "Camera",
                            format!("The gesture detector exited right away: {}", detail),
                        ),
                    );
                }
                CameraEvent::Exited(_) => {
                    self.ui.status_text = String::from("Camera stopped");
                }
            }
        }

        if self.media.tick() {
            self.needs_render = true;
        }

        if self.media.state == PlaybackState::Playing
            && self.last_progress_render.elapsed() >= Duration::from_secs(1)
        {
            self.last_progress_render = Instant::now();
            self.needs_render = true;
        }
    }

    /// Kill the camera process and stop playback
    pub fn shutdown(&mut self) {
        info!("Shutting down");
        self.camera.stop();
        self.media.stop();
    }
}

/// Typed or pasted path, without surrounding whitespace or quotes
fn prompt_path(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::panel::ViewportControl;
    use crate::data::ui_state::NoticeLevel;
    use crate::recent_files::MemoryRecentFiles;
    use crate::widgets::media_player::tests::FakeOutput;
    use crate::widgets::{LoadedImage, ZoomLimits};
    use image::RgbaImage;
    use std::fs;

    fn test_core() -> AppCore {
        let config = Config::default();
        let media = MediaPlayerState::new(Box::new(FakeOutput::default()), 50);
        let text = TextViewerState::new(Box::new(MemoryRecentFiles::new()));
        let image = ImageViewerState::new(Box::new(MemoryRecentFiles::new()), ZoomLimits::default());
        AppCore::with_parts(config, media, text, image)
    }

    fn core_with_camera(command: &str, args: &[&str]) -> AppCore {
        let mut config = Config::default();
        config.camera.command = command.to_string();
        config.camera.args = args.iter().map(|s| s.to_string()).collect();
        let media = MediaPlayerState::new(Box::new(FakeOutput::default()), 50);
        let text = TextViewerState::new(Box::new(MemoryRecentFiles::new()));
        let image = ImageViewerState::new(Box::new(MemoryRecentFiles::new()), ZoomLimits::default());
        AppCore::with_parts(config, media, text, image)
    }

    fn load_book(core: &mut AppCore, lines: usize) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.txt");
        let text: Vec<String> = (0..lines).map(|i| format!("line {}", i)).collect();
        fs::write(&path, text.join("\n")).unwrap();

        core.text.set_page_geometry(10, 40);
        core.text.open(&path).unwrap();
        dir
    }

    fn show_large_image(core: &mut AppCore) {
        core.image.set_viewport(400.0, 400.0);
        core.image.show(LoadedImage {
            path: PathBuf::from("/img/large.png"),
            pixels: RgbaImage::new(400, 400),
        });
        // fit = 0.9, zoom in so there is room to scroll
        core.image.zoom_at_center(4.0);
        core.image.scroll_x = 200.0;
        core.image.scroll_y = 200.0;
    }

    #[test]
    fn test_open_tokens_only_from_menu() {
        let mut core = test_core();
        core.handle_gesture("open_media");
        assert_eq!(core.current_view(), ViewId::MediaPlayer);

        core.handle_gesture("open_image");
        assert_eq!(core.current_view(), ViewId::MediaPlayer);

        core.handle_gesture("go_menu");
        core.handle_gesture("open_image");
        assert_eq!(core.current_view(), ViewId::ImageViewer);
    }

    #[test]
    fn test_go_menu_from_every_panel() {
        for token in ["open_media", "open_text", "open_image"] {
            let mut core = test_core();
            core.handle_gesture(token);
            assert_ne!(core.current_view(), ViewId::Menu);
            core.handle_gesture("go_menu");
            assert_eq!(core.current_view(), ViewId::Menu);
        }
    }

    #[test]
    fn test_unknown_and_empty_tokens_are_ignored() {
        let mut core = test_core();
        core.needs_render = false;
        for token in ["", "NEXT", "open media", "\u{fffd}"] {
            core.handle_gesture(token);
        }
        assert_eq!(core.current_view(), ViewId::Menu);
        assert!(!core.needs_render);
    }

    #[test]
    fn test_text_page_round_trip_by_gesture() {
        let mut core = test_core();
        let _dir = load_book(&mut core, 200);
        core.handle_gesture("open_text");

        for _ in 0..3 {
            core.handle_gesture("next");
        }
        assert_eq!(core.text.page_index, 6);
        for _ in 0..3 {
            core.handle_gesture("prev");
        }
        assert_eq!(core.text.page_index, 0);
    }

    #[test]
    fn test_text_page_survives_navigation() {
        let mut core = test_core();
        let _dir = load_book(&mut core, 200);
        core.handle_gesture("open_text");
        for _ in 0..3 {
            core.handle_gesture("next");
        }
        assert_eq!(core.text.page_index, 6);
        core.handle_gesture("go_menu");

        // Tokens for other views do nothing while in the menu
        core.handle_gesture("next");
        core.handle_gesture("open_text");
        assert_eq!(core.current_view(), ViewId::TextViewer);
        assert_eq!(core.text.page_index, 6);
    }

    #[tokio::test]
    async fn test_socket_payload_drives_panels() {
        use crate::gesture::{GestureListener, GestureMessage};
        use tokio::io::AsyncWriteExt;
        use tokio::net::TcpStream;
        use tokio::sync::mpsc;

        let mut core = test_core();
        let _dir = load_book(&mut core, 200);

        let listener = GestureListener::bind(0).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(GestureListener::run(listener, tx, Duration::from_secs(2)));

        let addr = match rx.recv().await {
            Some(GestureMessage::Listening(addr)) => addr,
            other => panic!("expected Listening, got {:?}", other),
        };
        core.set_gesture_listening(addr);

        for payload in [b"open_text".as_slice(), b"  next\n".as_slice()] {
            let mut client = TcpStream::connect(addr).await.unwrap();
            client.write_all(payload).await.unwrap();
            client.shutdown().await.unwrap();

            match rx.recv().await {
                Some(GestureMessage::Command(token)) => core.handle_gesture(&token),
                other => panic!("expected Command, got {:?}", other),
            }
        }

        assert!(core.ui.gesture_listening);
        assert_eq!(core.current_view(), ViewId::TextViewer);
        assert_eq!(core.text.page_index, 2);
    }

    #[test]
    fn test_cross_view_tokens_are_noops() {
        let mut core = test_core();
        let _dir = load_book(&mut core, 200);
        core.handle_gesture("open_text");
        let volume = core.media.volume;

        core.handle_gesture("volume_down");
        core.handle_gesture("zoom_in");
        core.handle_gesture("open_camera");
        assert_eq!(core.media.volume, volume);
        assert_eq!(core.image.user_scale, 1.0);
        assert!(!core.camera.is_running());
        assert_eq!(core.text.page_index, 0);
    }

    #[test]
    fn test_media_gestures_use_configured_steps() {
        let mut core = test_core();
        core.handle_gesture("open_media");
        core.handle_gesture("volume_up");
        assert_eq!(core.media.volume, 55);

        for _ in 0..20 {
            core.handle_gesture("volume_up");
        }
        assert_eq!(core.media.volume, 100);
    }

    #[test]
    fn test_gesture_and_key_pan_steps_differ() {
        let mut core = test_core();
        show_large_image(&mut core);
        core.show_view(ViewId::ImageViewer);

        core.handle_gesture("pan_right");
        assert_eq!(core.image.scroll_x, 250.0);

        core.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(core.image.scroll_x, 230.0);

        core.handle_gesture("pan_up");
        assert_eq!(core.image.scroll_y, 150.0);
    }

    #[test]
    fn test_zoom_gestures_round_trip() {
        let mut core = test_core();
        show_large_image(&mut core);
        core.show_view(ViewId::ImageViewer);
        let (scale, sx, sy) = (core.image.user_scale, core.image.scroll_x, core.image.scroll_y);

        core.handle_gesture("zoom_in");
        assert!(core.image.user_scale > scale);
        core.handle_gesture("zoom_out");
        assert!((core.image.user_scale - scale).abs() < 1e-9);
        assert!((core.image.scroll_x - sx).abs() < 1e-6);
        assert!((core.image.scroll_y - sy).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_gesture_camera_failure_is_silent() {
        let mut core = core_with_camera("definitely-not-a-gesture-detector", &[]);
        core.handle_gesture("open_camera");
        assert!(!core.camera.is_running());
        assert!(core.ui.notice.is_none());
    }

    #[tokio::test]
    async fn test_user_camera_failure_shows_notice() {
        let mut core = core_with_camera("definitely-not-a-gesture-detector", &[]);
        core.handle_key(KeyCode::Char('4'), KeyModifiers::NONE);
        assert!(!core.camera.is_running());
        assert!(core.ui.notice.is_some());
        assert_eq!(core.current_view(), ViewId::Menu);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_camera_twice_starts_then_kills() {
        let mut core = core_with_camera("sleep", &["30"]);
        core.handle_gesture("open_camera");
        assert!(core.camera.is_running());
        assert_eq!(core.current_view(), ViewId::Menu);

        core.handle_gesture("open_camera");
        assert!(!core.camera.is_running());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_shutdown_kills_camera() {
        let mut core = core_with_camera("sleep", &["30"]);
        core.toggle_camera(Origin::User);
        assert!(core.camera.is_running());
        core.shutdown();
        assert!(!core.camera.is_running());
    }

    #[test]
    fn test_prompt_opens_file_and_switches_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let mut core = test_core();
        core.show_view(ViewId::TextViewer);
        core.handle_key(KeyCode::Char('o'), KeyModifiers::NONE);
        assert!(core.ui.prompt.is_some());

        core.handle_paste(&format!("\"{}\"", path.display()));
        core.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(core.ui.prompt.is_none());
        assert!(core.ui.notice.is_none());
        assert_eq!(core.text.documents, vec![path]);
    }

    #[test]
    fn test_failed_open_shows_notice_and_keeps_view() {
        let mut core = test_core();
        core.show_view(ViewId::ImageViewer);
        core.open_path(PromptTarget::Image, Path::new("/definitely/missing.png"));
        assert!(core.ui.notice.is_some());
        assert!(core.image.image.is_none());

        // Notice swallows keys until dismissed
        core.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(core.ui.notice.is_none());
        assert_eq!(core.current_view(), ViewId::ImageViewer);
    }

    #[test]
    fn test_unreadable_pdf_shows_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        fs::write(&path, "not a pdf").unwrap();

        let mut core = test_core();
        core.open_file(&path);
        let notice = core.ui.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("PDF"));
        assert!(core.text.documents.is_empty());
        assert_eq!(core.current_view(), ViewId::Menu);
    }

    #[test]
    fn test_unsupported_file_type_is_reported() {
        let mut core = test_core();
        core.open_file(Path::new("/tmp/archive.zip"));
        assert!(core.ui.notice.is_some());
        assert_eq!(core.current_view(), ViewId::Menu);
    }

    #[test]
    fn test_keyboard_navigation_and_quit() {
        let mut core = test_core();
        core.handle_key(KeyCode::Right, KeyModifiers::NONE);
        core.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(core.current_view(), ViewId::TextViewer);

        core.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(core.running);

        core.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(core.current_view(), ViewId::Menu);
        core.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!core.running);
    }

    #[test]
    fn test_prompt_path_strips_quotes() {
        assert_eq!(prompt_path("  '/a b/c.txt' "), Some(PathBuf::from("/a b/c.txt")));
        assert_eq!(prompt_path("\"x.png\""), Some(PathBuf::from("x.png")));
        assert_eq!(prompt_path("   "), None);
    }
}
