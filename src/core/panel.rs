//! Control surfaces the router is allowed to touch on each panel.
//!
//! Only operations reachable from gesture commands live here. The router
//! picks the surface through `ActivePanel`, selected by the current `ViewId`.

/// Two-page spread navigation (text viewer)
pub trait PageControl {
    /// Move forward one page pair. Returns false at the last pair.
    fn advance_page(&mut self) -> bool;
    /// Move back one page pair. Returns false at the first pair.
    fn retreat_page(&mut self) -> bool;
}

/// Playback transport (media player)
pub trait TransportControl {
    fn toggle_play_pause(&mut self);
    fn seek_relative(&mut self, secs: i64);
    /// Returns false past the end of the playlist
    fn next_track(&mut self) -> bool;
    /// Returns false before the start of the playlist
    fn previous_track(&mut self) -> bool;
    /// Volume is clamped to 0..=100
    fn adjust_volume(&mut self, delta: i32);
}

/// Pan and zoom (image viewer)
pub trait ViewportControl {
    fn pan(&mut self, dx: f64, dy: f64);
    fn zoom_at_center(&mut self, factor: f64);
}

/// The active view's control surface
pub enum ActivePanel<'a> {
    Menu,
    Media(&'a mut dyn TransportControl),
    Text(&'a mut dyn PageControl),
    Image(&'a mut dyn ViewportControl),
}
