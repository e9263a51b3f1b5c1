use std::{env, path::PathBuf};

/// Runtime settings, read from the environment (after `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr:  String,
    pub upload_dir: PathBuf,
    pub chat_file:  PathBuf,
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr:  "0.0.0.0:3000".into(),
            upload_dir: "uploads".into(),
            chat_file:  "chat_data.json".into(),
            static_dir: "static".into(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        Self {
            bind_addr:  get("BIND_ADDR").unwrap_or(d.bind_addr),
            upload_dir: get("UPLOAD_DIR").map(PathBuf::from).unwrap_or(d.upload_dir),
            chat_file:  get("CHAT_FILE").map(PathBuf::from).unwrap_or(d.chat_file),
            static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or(d.static_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let c = Config::from_lookup(|_| None);
        assert_eq!(c.bind_addr, "0.0.0.0:3000");
        assert_eq!(c.chat_file, PathBuf::from("chat_data.json"));
        assert_eq!(c.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn overrides_apply() {
        let c = Config::from_lookup(|k| (k == "UPLOAD_DIR").then(|| "/srv/blobs".to_string()));
        assert_eq!(c.upload_dir, PathBuf::from("/srv/blobs"));
        assert_eq!(c.static_dir, PathBuf::from("static"));
    }
}
