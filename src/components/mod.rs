pub mod app;
pub mod file_picker;
pub mod transport;
pub mod waveform_player;
