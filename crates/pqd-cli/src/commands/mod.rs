pub mod completions;
pub mod compute;
pub mod presets;
pub mod quadrants;
pub mod sweep;
pub mod tui;
pub mod waveforms;
