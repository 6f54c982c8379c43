use std::path::Path;

use super::schema::AlertingConfig;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Validation(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

pub fn load_from_file(path: &Path) -> Result<AlertingConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<AlertingConfig, LoadError> {
    let cfg: AlertingConfig = serde_yaml::from_str(yaml)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &AlertingConfig) -> Result<(), LoadError> {
    let Some(ruler) = &cfg.ruler else {
        return Ok(());
    };
    if ruler.url.is_empty() {
        return Err(LoadError::Validation("ruler.url must not be empty".into()));
    }
    if !ruler.url.starts_with("http://") && !ruler.url.starts_with("https://") {
        return Err(LoadError::Validation(
            "ruler.url must be an http(s) URL".into(),
        ));
    }
    if ruler.namespace.is_empty() || ruler.group.is_empty() {
        return Err(LoadError::Validation(
            "ruler.namespace and ruler.group must not be empty".into(),
        ));
    }
    if ruler.save_timeout_seconds == 0 {
        return Err(LoadError::Validation(
            "ruler.save_timeout_seconds must be > 0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config() {
        let yaml = r#"
ruler:
  url: https://ruler.example.com/api/prom
  save_timeout_seconds: 5
"#;
        let cfg = load_from_str(yaml).unwrap();
        assert_eq!(cfg.ruler.unwrap().url, "https://ruler.example.com/api/prom");
    }

    #[test]
    fn empty_file_is_valid_but_disabled() {
        let cfg = load_from_str("{}").unwrap();
        assert!(!cfg.alerting_enabled());
    }

    #[test]
    fn empty_url_rejected() {
        let err = load_from_str("ruler:\n  url: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("ruler.url"));
    }

    #[test]
    fn non_http_url_rejected() {
        let err = load_from_str("ruler:\n  url: grpc://ruler:9095\n").unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = load_from_str("ruler:\n  url: http://r\n  save_timeout_seconds: 0\n").unwrap_err();
        assert!(err.to_string().contains("save_timeout_seconds"));
    }

    #[test]
    fn load_from_file_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "ruler:\n  url: http://localhost:9009\n  group: sm\n").unwrap();
        let cfg = load_from_file(&path).unwrap();
        assert_eq!(cfg.ruler.unwrap().group, "sm");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_from_file(Path::new("/nonexistent/synthalert.yml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
