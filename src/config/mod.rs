mod settings;

pub use settings::{Settings, SlackConfig, load_settings};
