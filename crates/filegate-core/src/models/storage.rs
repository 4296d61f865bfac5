use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend tag reported by the remote file-service
///
/// Sent as a multipart field hint on upload and echoed back in `FileRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStorage {
    /// Stored inline in the service's database
    Db,
    S3,
    Local,
}

impl FromStr for FileStorage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "db" => Ok(FileStorage::Db),
            "s3" => Ok(FileStorage::S3),
            "local" => Ok(FileStorage::Local),
            _ => Err(anyhow::anyhow!("Invalid file storage: {}", s)),
        }
    }
}

impl Display for FileStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStorage::Db => write!(f, "db"),
            FileStorage::S3 => write!(f, "s3"),
            FileStorage::Local => write!(f, "local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("DB".parse::<FileStorage>().unwrap(), FileStorage::Db);
        assert_eq!("s3".parse::<FileStorage>().unwrap(), FileStorage::S3);
        assert!("tape".parse::<FileStorage>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for storage in [FileStorage::Db, FileStorage::S3, FileStorage::Local] {
            assert_eq!(storage.to_string().parse::<FileStorage>().unwrap(), storage);
        }
    }
}
