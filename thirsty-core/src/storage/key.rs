/// Named records in the application's key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    TodayRecord,
    Settings,
    History,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::TodayRecord,
        StorageKey::Settings,
        StorageKey::History,
    ];

    /// Key under which the record is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::TodayRecord => "thirsty_today_record",
            StorageKey::Settings => "thirsty_settings",
            StorageKey::History => "thirsty_history",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
