use serde::{Deserialize, Serialize};

/// Configuration for the users_directory module (`modules.users_directory`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersDirectoryConfig {
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for UsersDirectoryConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
        }
    }
}

fn default_max_name_length() -> usize {
    255
}
