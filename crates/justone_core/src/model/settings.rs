//! Behavior switches persisted one key per flag.

/// Persisted boolean switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingFlag {
    /// Disables the one-entry-per-day gate.
    DevMode,
    /// Whether the entry list offers delete buttons.
    ShowDeleteButtons,
    /// Whether the image picker crops the selection.
    AllowImageEditing,
}

impl SettingFlag {
    pub const ALL: [SettingFlag; 3] = [
        SettingFlag::DevMode,
        SettingFlag::ShowDeleteButtons,
        SettingFlag::AllowImageEditing,
    ];

    /// Storage key holding this flag's JSON boolean.
    pub fn key(self) -> &'static str {
        match self {
            Self::DevMode => "devMode",
            Self::ShowDeleteButtons => "showDeleteButtons",
            Self::AllowImageEditing => "allowImageEditing",
        }
    }

    /// Value reported while the key has never been written.
    pub fn default_value(self) -> bool {
        match self {
            Self::DevMode => false,
            Self::ShowDeleteButtons | Self::AllowImageEditing => true,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.key() == key)
    }
}

/// Snapshot of all flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub dev_mode: bool,
    pub show_delete_buttons: bool,
    pub allow_image_editing: bool,
}

impl Settings {
    pub fn get(&self, flag: SettingFlag) -> bool {
        match flag {
            SettingFlag::DevMode => self.dev_mode,
            SettingFlag::ShowDeleteButtons => self.show_delete_buttons,
            SettingFlag::AllowImageEditing => self.allow_image_editing,
        }
    }

    pub fn set(&mut self, flag: SettingFlag, value: bool) {
        match flag {
            SettingFlag::DevMode => self.dev_mode = value,
            SettingFlag::ShowDeleteButtons => self.show_delete_buttons = value,
            SettingFlag::AllowImageEditing => self.allow_image_editing = value,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            dev_mode: false,
            show_delete_buttons: false,
            allow_image_editing: false,
        };
        for flag in SettingFlag::ALL {
            settings.set(flag, flag.default_value());
        }
        settings
    }
}

/// Picker configuration handed to the external media picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePickerOptions {
    pub allows_editing: bool,
    /// Crop aspect as `(width, height)`; only set when editing is allowed.
    pub aspect: Option<(u32, u32)>,
    pub quality: f32,
}

impl ImagePickerOptions {
    pub const CROP_ASPECT: (u32, u32) = (4, 3);

    pub fn from_settings(settings: &Settings) -> Self {
        let allows_editing = settings.allow_image_editing;
        Self {
            allows_editing,
            aspect: allows_editing.then_some(Self::CROP_ASPECT),
            quality: 1.0,
        }
    }
}
